use std::collections::HashMap;

use url::Url;

use crate::cli::Cli;
use crate::error::RegisterError;
use crate::model::{parse_header, ProbeConfig};

// Conventional HTTP status range.
const STATUS_MIN: u16 = 100;
const STATUS_MAX: u16 = 599;

/// Required target fields that live outside the metadata blob.
#[derive(Debug, Clone)]
pub struct TargetInput {
    pub name: String,
    pub address: String,
    pub interval: i32,
}

/// Checks every invariant a target must satisfy before anything is built
/// or persisted. Failures name the offending flag; no partial target is
/// ever produced from invalid input.
pub fn validate(cli: &Cli) -> Result<(TargetInput, ProbeConfig), RegisterError> {
    if cli.name.trim().is_empty() {
        return Err(RegisterError::validation("--name", "must not be empty"));
    }

    let parsed = Url::parse(&cli.target)
        .map_err(|e| RegisterError::validation("--target", e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(RegisterError::validation(
                "--target",
                format!("scheme must be http or https, got '{other}'"),
            ));
        }
    }

    if cli.method.is_empty() || !cli.method.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(RegisterError::validation("--method", "must be an HTTP verb"));
    }

    if cli.interval <= 0 {
        return Err(RegisterError::validation(
            "--interval",
            "must be greater than zero",
        ));
    }

    if cli.success_min < STATUS_MIN {
        return Err(RegisterError::validation(
            "--success-min",
            format!("must be at least {STATUS_MIN}"),
        ));
    }
    if cli.success_max > STATUS_MAX {
        return Err(RegisterError::validation(
            "--success-max",
            format!("must be at most {STATUS_MAX}"),
        ));
    }
    if cli.success_min > cli.success_max {
        return Err(RegisterError::validation(
            "--success-min",
            "must not exceed --success-max",
        ));
    }

    if let Some(timeout) = cli.timeout {
        if timeout == 0 {
            return Err(RegisterError::validation(
                "--timeout",
                "must be greater than zero",
            ));
        }
    }

    // Later occurrence overwrites earlier for the same header name.
    let mut headers = HashMap::new();
    for token in &cli.headers {
        let (name, value) = parse_header(token)?;
        headers.insert(name, value);
    }

    let config = ProbeConfig {
        method: cli.method.clone(),
        success_min: cli.success_min,
        success_max: cli.success_max,
        insecure: cli.insecure,
        follow_redirects: cli.redirect.then_some(cli.redirect_max),
        body: cli.body.clone(),
        headers,
        timeout: cli.timeout,
    };

    Ok((
        TargetInput {
            name: cli.name.clone(),
            address: cli.target.clone(),
            interval: cli.interval,
        },
        config,
    ))
}
