//! Channel messages.
//!
//! The serialized form mirrors the extension's runtime messages:
//! `{"type": "TABELOG_DATA", "payload": {...}}`.

use crate::model::LookupRequest;
use serde::{Deserialize, Serialize};

/// Presentation → background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackgroundRequest {
    FetchTabelog(LookupRequest),
}

/// Background → presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentMessage {
    TabelogData {
        name: String,
        rating: Option<f64>,
        url: Option<String>,
    },
    TabelogError {
        name: String,
        error: String,
    },
    DebugLog {
        message: String,
        #[serde(default)]
        args: Vec<serde_json::Value>,
    },
}

impl ContentMessage {
    /// Place name this message reports on, if it is a lookup result.
    pub fn subject(&self) -> Option<&str> {
        match self {
            ContentMessage::TabelogData { name, .. } | ContentMessage::TabelogError { name, .. } => {
                Some(name.as_str())
            }
            ContentMessage::DebugLog { .. } => None,
        }
    }
}
