//! Defines the event and message structures exchanged with the front end.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::view_model::UiState;

/// Events sent from the Rust backend to the front end.
///
/// Serialized as `{"event": "<name>", "payload": ...}`, one per output line.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum UserEvent {
    /// A complete state update to re-render the panel.
    StateUpdate(Box<UiState>),
    /// An error message to be displayed to the user.
    ShowError(String),
    /// A file was handed to the default application.
    FileOpened(PathBuf),
}

/// A message received from the front end.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
