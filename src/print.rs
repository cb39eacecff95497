//! Result printing: success JSON on stdout, error JSON on stderr.

#![deny(clippy::all, clippy::pedantic)]

use serde::Serialize;

use crate::client::CliError;

pub fn success<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value).map_err(|e| CliError::Render(e.to_string()))?;
    println!("{out}");
    Ok(())
}

pub fn failure(err: &CliError) {
    eprintln!("{}", err.to_json());
}
