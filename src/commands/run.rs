//! `run` - one function invocation over JSON
//!
//! Stdout carries only the response, so the host can pipe it straight back.

use anyhow::{Context as AnyhowContext, Result};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::Context;
use crate::cli::RunArgs;
use crate::function;

pub fn run(ctx: &Context, args: RunArgs) -> Result<()> {
    let input = read_request(args.input.as_deref())?;
    let rsp = function::run_json(&input, &ctx.config);

    if rsp.is_fatal() {
        log::info!("Responding with a fatal result");
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&rsp)
    } else {
        serde_json::to_string(&rsp)
    }
    .context("Failed to encode response")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").context("Failed to write response")?;
    Ok(())
}

fn read_request(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read request: {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Could not read request from stdin")?;
            Ok(input)
        }
    }
}
