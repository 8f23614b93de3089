//! The composition function
//!
//! One invocation: decode the intent, decode the observed snapshot, evaluate
//! the pipeline up to the readiness frontier, and assemble the response.
//! Every failure becomes a single fatal result; callers always get a response.

use declarative::{
    DesiredState, DiffSummary, Error, ObservedSnapshot, ResourceDiff, Result, RunFunctionRequest,
    RunFunctionResponse, assemble, compute_diffs,
};
use serde_json::Value;

use crate::config::FunctionConfig;
use crate::intent::Intent;
use crate::resource;

/// Desired state for one invocation, with how it relates to what was observed
#[derive(Debug, Clone)]
pub struct Composition {
    pub state: DesiredState,
    pub diffs: Vec<ResourceDiff>,
}

/// Compute desired state for a request
pub fn compose(req: &RunFunctionRequest, config: &FunctionConfig) -> Result<Composition> {
    let composite = req
        .observed
        .composite
        .as_ref()
        .ok_or(Error::MissingComposite)?;

    // Validate the intent before looking at anything observed
    let intent = Intent::decode(&composite.resource)?;

    let observed = ObservedSnapshot::decode(
        req.observed.resource_documents(),
        &config.external_name_annotation,
    )?;

    let evaluation = resource::pipeline(config)?.evaluate(&intent, &observed)?;
    let state = assemble(evaluation);

    let diffs = compute_diffs(&observed, &state.resources);
    let summary = DiffSummary::from_diffs(&diffs);
    log::debug!(
        "{} desired: {} to create, {} observed, {} orphaned",
        summary.total(),
        summary.creates,
        summary.observed,
        summary.orphaned
    );

    Ok(Composition { state, diffs })
}

/// Run the function against a decoded request
pub fn run_function(req: &RunFunctionRequest, config: &FunctionConfig) -> RunFunctionResponse {
    log::info!("Running function (tag: {:?})", req.meta.tag);

    let mut rsp = RunFunctionResponse::to(req, config.ttl());
    match compose(req, config) {
        Ok(composition) => {
            if let Err(e) = rsp.set_desired(composition.state) {
                log::warn!("Cannot encode desired resources: {e}");
                rsp.fatal(format!("cannot encode desired resources: {e}"));
            }
        }
        Err(e) => {
            log::warn!("Composition failed: {e}");
            rsp.fatal(e.to_string());
        }
    }
    rsp
}

/// Run the function against raw request JSON
///
/// A request that can't be decoded still gets a fatal response, echoing its
/// tag when one can be found.
pub fn run_json(input: &str, config: &FunctionConfig) -> RunFunctionResponse {
    let value: Value = match serde_json::from_str(input) {
        Ok(value) => value,
        Err(e) => return decode_failure(String::new(), e, config),
    };

    let tag = value
        .pointer("/meta/tag")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match serde_json::from_value::<RunFunctionRequest>(value) {
        Ok(req) => run_function(&req, config),
        Err(e) => decode_failure(tag, e, config),
    }
}

fn decode_failure(
    tag: String,
    err: serde_json::Error,
    config: &FunctionConfig,
) -> RunFunctionResponse {
    let err = Error::decode("request", err);
    log::warn!("{err}");

    let mut rsp = RunFunctionResponse::with_tag(tag, config.ttl());
    rsp.fatal(err.to_string());
    rsp
}
