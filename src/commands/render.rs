//! `render` - compose from local documents and show what would be desired

use anyhow::{Context as AnyhowContext, Result, bail};
use colored::Colorize;
use declarative::envelope::{ObservedState, RequestMeta, Resource};
use declarative::{Change, DiffSummary, ResourceDiff, RunFunctionRequest};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::Context;
use crate::cli::RenderArgs;
use crate::function;
use crate::ui;

pub fn run(ctx: &Context, args: RenderArgs) -> Result<()> {
    let req = build_request(&args)?;

    if args.json {
        let rsp = function::run_function(&req, &ctx.config);
        println!("{}", serde_json::to_string_pretty(&rsp)?);
        return Ok(());
    }

    let composition = match function::compose(&req, &ctx.config) {
        Ok(composition) => composition,
        Err(e) => {
            ui::failure(&e.to_string());
            bail!("Composition failed");
        }
    };

    let name = req
        .observed
        .composite
        .as_ref()
        .and_then(|c| c.resource.pointer("/metadata/name"))
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>");
    ui::title(&format!("Composition: {name}"));

    ui::group("Results");
    if composition.state.results.is_empty() {
        ui::ok("All resources resolved");
    }
    for result in &composition.state.results {
        ui::result(result);
    }

    ui::group("Desired resources");
    for diff in &composition.diffs {
        print_diff(diff);
        if !ctx.quiet
            && let Some(resource) = composition.state.resources.get(&diff.key)
        {
            ui::detail(&format!("{} {}", resource.api_version, resource.spec));
        }
    }

    let summary = DiffSummary::from_diffs(&composition.diffs);
    println!();
    ui::note(&format!(
        "{}: {} to create, {} observed, {} orphaned",
        ui::count(composition.state.resources.len(), "desired resource"),
        summary.creates,
        summary.observed,
        summary.orphaned
    ));

    Ok(())
}

fn print_diff(diff: &ResourceDiff) {
    let marker = match diff.change {
        Change::Create => "+".green(),
        Change::Observed => "=".dimmed(),
        Change::Orphaned => "-".red(),
    };
    println!("  {marker} {:<6} {:<14} {}", diff.key.bold(), diff.kind, diff.change);
}

fn build_request(args: &RenderArgs) -> Result<RunFunctionRequest> {
    let composite = read_json(&args.composite)?;

    let resources = match &args.observed {
        Some(path) => observed_resources(read_json(path)?)
            .with_context(|| format!("Invalid observed resources: {}", path.display()))?,
        None => BTreeMap::new(),
    };

    Ok(RunFunctionRequest {
        meta: RequestMeta {
            tag: args.tag.clone(),
        },
        observed: ObservedState {
            composite: Some(Resource {
                resource: composite,
            }),
            resources,
        },
    })
}

/// Observed resources keyed by logical key
///
/// Entries may be bare documents or already wrapped as `{"resource": ...}`.
fn observed_resources(value: Value) -> Result<BTreeMap<String, Resource>> {
    let Value::Object(map) = value else {
        bail!("expected an object keyed by logical key");
    };

    Ok(map
        .into_iter()
        .map(|(key, doc)| {
            let resource = match doc {
                Value::Object(mut wrapper)
                    if wrapper.len() == 1 && wrapper.contains_key("resource") =>
                {
                    wrapper.remove("resource").unwrap_or_default()
                }
                doc => doc,
            };
            (key, Resource { resource })
        })
        .collect())
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}
