//! Eval command handler

use crate::cli::{EncodeMode, EvalArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use safeval_core::{Chain, Scalar, SmartValue};
use serde::Serialize;

/// Machine-readable result of an evaluation
#[derive(Debug, Serialize)]
pub struct EvalReport {
    pub input: Scalar,
    pub steps: Vec<String>,
    pub value: Scalar,
    pub encode: EncodeMode,
    pub output: String,
    pub numeric_error: bool,
}

/// Encode a value for output
pub fn render(value: &SmartValue, mode: EncodeMode) -> String {
    match mode {
        EncodeMode::Html => value.html_encode(),
        EncodeMode::Url => value.url_encode(),
        EncodeMode::Json => value.json_encode(),
        EncodeMode::Raw => value.no_encode(),
    }
}

/// Build the chain for an eval invocation: preset steps run first
fn build_chain(args: &EvalArgs, config: &Config, cli_steps: Vec<String>) -> Result<Chain> {
    let mut steps = match &args.preset {
        Some(name) => config.preset(name)?.to_vec(),
        None => Vec::new(),
    };
    steps.extend(cli_steps);
    Ok(Chain::parse(&steps)?)
}

/// Evaluate without writing anything
pub fn evaluate(args: &EvalArgs, config: &Config) -> Result<EvalReport> {
    let (raw, cli_steps) = args.input();
    let chain = build_chain(args, config, cli_steps)?;

    let _timer = Timer::with_details("eval", &chain.to_string());
    tracing::debug!(input = ?raw, chain = %chain, "Evaluating");

    let input = SmartValue::with_settings(raw.clone(), config.settings_handle());
    let result = chain.apply(&input);
    let encode = args.encode.unwrap_or(config.output.encode);

    Ok(EvalReport {
        input: raw,
        steps: chain.steps().iter().map(ToString::to_string).collect(),
        output: render(&result, encode),
        value: result.value().clone(),
        encode,
        numeric_error: result.has_numeric_error(),
    })
}

/// Handle the eval command
pub fn handle_eval(args: EvalArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let report = evaluate(&args, config)?;

    if output.format() != OutputFormat::Human {
        return output.data(&report);
    }

    if !report.steps.is_empty() {
        output.debug(&format!("steps: {}", report.steps.join(" | ")))?;
    }
    output.writeln(&report.output)?;
    if report.numeric_error {
        output.warning("numeric error: a step received a non-numeric operand or a zero divisor")?;
    }

    Ok(())
}
