#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::args::Payload;
use crate::client::CliError;

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        Ok(data)
    } else if let Some(v) = val {
        Ok(v)
    } else {
        Err(CliError::InvalidInput(
            "a body is required (use --data or --data-file)".into(),
        ))
    }
}

/// Parse a request body into the typed shape the endpoint expects.
pub fn read_json<T: DeserializeOwned>(payload: Payload) -> Result<T, CliError> {
    let raw = read_value(payload.data, payload.data_file)?;
    serde_json::from_str(&raw).map_err(|e| CliError::InvalidInput(e.to_string()))
}
