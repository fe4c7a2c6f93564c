//! The `eval` command.

use el_eval::{EvalError, EvalResult, ValueType};

use super::is_template;
use crate::config::ProcessorConfig;
use crate::processor::ElProcessor;

/// Options following `el eval <expr>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalOptions {
    /// `--define name=<expr>`, applied in order before evaluation.
    pub defines: Vec<(String, String)>,
    /// `--as <type>`: coerce the result.
    pub expected: ValueType,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            defines: Vec::new(),
            expected: ValueType::Any,
        }
    }
}

/// Parse the arguments after the expression.
pub fn parse_eval_options(args: &[String]) -> Result<EvalOptions, String> {
    let mut options = EvalOptions::default();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--define" | "-d" => {
                let Some(definition) = args.next() else {
                    return Err(format!("{arg} needs a `name=<expr>` argument"));
                };
                options.defines.push(parse_define(definition)?);
            }
            "--as" => {
                let Some(name) = args.next() else {
                    return Err("--as needs a type name".to_string());
                };
                options.expected =
                    ValueType::from_name(name).ok_or_else(|| format!("unknown type '{name}'"))?;
            }
            other => {
                if let Some(definition) = other.strip_prefix("--define=") {
                    options.defines.push(parse_define(definition)?);
                } else {
                    return Err(format!("unknown option '{other}'"));
                }
            }
        }
    }
    Ok(options)
}

fn parse_define(definition: &str) -> Result<(String, String), String> {
    match definition.split_once('=') {
        Some((name, expr)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), expr.to_string()))
        }
        _ => Err(format!("expected `name=<expr>`, found '{definition}'")),
    }
}

/// Evaluate `source` with a processor configured from the environment.
///
/// Template text is evaluated as written; anything else is treated as a
/// bare expression.
pub fn evaluate(source: &str, options: &EvalOptions) -> EvalResult {
    let mut el = ElProcessor::with_config(ProcessorConfig::from_env());
    for (name, expr) in &options.defines {
        let value = el
            .eval(expr)
            .map_err(|err| err.with_note(format!("in definition of '{name}'")))?;
        el.define_bean(name, value);
    }
    if is_template(source) {
        let expr = el
            .factory()
            .create_value_expression(source, options.expected.clone())?;
        expr.get_value(el.context_mut())
    } else {
        el.get_value(source, options.expected.clone())
    }
}

/// Evaluate and print the result.
pub fn eval_expression(source: &str, options: &EvalOptions) {
    match evaluate(source, options) {
        Ok(value) => println!("{value}"),
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    }
}

fn report(err: &EvalError) {
    eprintln!("error[{}]: {err}", err.category());
}

#[cfg(test)]
mod tests;
