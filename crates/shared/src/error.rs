use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Transport,
    Status,
    Decode,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlotIndexError {
    #[error("slot index {index} out of range (grid has {slots} slots)")]
    OutOfRange { index: usize, slots: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DragPayloadError {
    #[error("drag payload {payload:?} is not a slot number")]
    NotANumber { payload: String },
    #[error("drag payload names an invalid slot: {0}")]
    InvalidSlot(#[from] SlotIndexError),
}

/// Failure reported by a catalog source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code:?}: {message}")]
pub struct CatalogError {
    pub code: ErrorCode,
    pub message: String,
}

impl CatalogError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
