//! The interactive layer of the file browser.
//!
//! The front end sends `IpcMessage`s as JSON; `handle_ipc_message` routes each
//! one to a handler in `commands`, which replies through an `EventProxy`.

pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod view_model;

use crate::core::FileLauncher;
use events::{IpcMessage, UserEvent};
use file_dialog::DialogService;
use proxy::EventProxy;
use state::AppState;
use std::sync::{Arc, Mutex};

/// Parses one IPC message and dispatches it to its command handler.
///
/// Malformed messages and unknown commands are logged and otherwise ignored.
pub fn handle_ipc_message<P, D, L>(
    message: &str,
    dialog: &D,
    launcher: &L,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) where
    P: EventProxy,
    D: DialogService + ?Sized,
    L: FileLauncher + ?Sized,
{
    let msg: IpcMessage = match serde_json::from_str(message) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message: {} ({})", message, e);
            return;
        }
    };

    tracing::debug!("IPC command: {}", msg.command);

    match msg.command.as_str() {
        "initialize" => commands::initialize(proxy, state),
        "selectDirectory" => commands::select_directory(dialog, proxy, state),
        "setDirectory" => commands::set_directory(msg.payload, proxy, state),
        "clearDirectory" => commands::clear_directory(proxy, state),
        "refresh" => commands::refresh(proxy, state),
        "updateSearchTerm" => commands::update_search_term(msg.payload, proxy, state),
        "clearSearchTerm" => commands::clear_search_term(proxy, state),
        "updateSearchPattern" => commands::update_search_pattern(msg.payload, proxy, state),
        "applyPreset" => commands::apply_preset(msg.payload, proxy, state),
        "clearSearchSettings" => commands::clear_search_settings(proxy, state),
        "openFile" => commands::open_file(launcher, msg.payload, proxy, state),
        other => tracing::warn!("Unknown IPC command received: {}", other),
    }
}

/// Serializes an event as the single JSON line the front end reads.
pub fn render_user_event(event: &UserEvent) -> serde_json::Result<String> {
    serde_json::to_string(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_show_error() {
        let line = render_user_event(&UserEvent::ShowError("boom".to_string())).unwrap();
        assert_eq!(line, r#"{"event":"showError","payload":"boom"}"#);
    }

    #[test]
    fn test_render_file_opened() {
        let line = render_user_event(&UserEvent::FileOpened("/tmp/a.txt".into())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["event"], "fileOpened");
        assert_eq!(value["payload"], "/tmp/a.txt");
    }
}
