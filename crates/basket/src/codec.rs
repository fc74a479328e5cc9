//! Messages as bytes: JSON on the wire, a file on disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::message::BasketMessage;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("message is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot access message file: {0}")]
    Io(#[from] std::io::Error),
}

pub fn encode(message: &BasketMessage) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(message)?)
}

pub fn decode(bytes: &[u8]) -> Result<BasketMessage, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Write the encoded message to `path`, replacing any existing file.
pub fn save(path: impl AsRef<Path>, message: &BasketMessage) -> Result<(), CodecError> {
    let path = path.as_ref();
    fs::write(path, encode(message)?)?;
    tracing::info!(path = %path.display(), message = %message, "message saved");
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<BasketMessage, CodecError> {
    let path = path.as_ref();
    let message = decode(&fs::read(path)?)?;
    tracing::info!(path = %path.display(), message = %message, "message loaded");
    Ok(message)
}
