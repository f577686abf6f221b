// src/app/commands.rs
//! Contains all the command handlers that are callable from the front end via IPC.
//!
//! Each function in this module corresponds to a specific `IpcMessage::command`.
//! Handlers mutate the `AppState`, persist what changed, re-run the search when
//! its inputs changed, and send `UserEvent`s back. No error escapes a handler:
//! failures are logged and, where the user needs to know, sent as `ShowError`.

use super::events::UserEvent;
use super::file_dialog::DialogService;
use super::helpers::{lock_state, notify, refresh_and_report, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::AppState;
use crate::config::preferences;
use crate::core::launcher::{self, FileLauncher};
use crate::core::pattern::{normalize_pattern_string, CATCH_ALL_PATTERN};
use crate::core::CoreError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Handles the initial request for state from the front end when it loads.
///
/// A failure of the search run at startup is reported with the first call only.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let mut state_guard = lock_state(&state);
    if let Some(message) = state_guard.startup_error.take() {
        proxy.send_event(UserEvent::ShowError(message));
    }
    notify(&state_guard, &proxy);
}

/// Opens a folder dialog, starting at the current directory if there is one,
/// and switches to the chosen directory.
pub fn select_directory<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    // The lock must not be held while the modal dialog is open.
    let start_dir = {
        let state_guard = lock_state(&state);
        state_guard
            .has_directory()
            .then(|| PathBuf::from(&state_guard.current_directory))
    };

    match dialog.pick_directory(start_dir.as_deref()) {
        Some(path) => change_directory(&path.to_string_lossy(), &proxy, &state),
        None => {
            tracing::info!("User cancelled directory selection.");
            initialize(proxy, state);
        }
    }
}

/// Switches to the directory given as a string payload.
pub fn set_directory<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match serde_json::from_value::<String>(payload.clone()) {
        Ok(path) => change_directory(&path, &proxy, &state),
        Err(_) => tracing::warn!("Invalid directory path payload: {:?}", payload),
    }
}

fn change_directory<P: EventProxy>(path: &str, proxy: &P, state: &Arc<Mutex<AppState>>) {
    with_state_and_notify(state, proxy, |s| {
        match preferences::save_directory_path(&mut *s.preferences, path) {
            Ok(()) => {}
            Err(CoreError::Preferences(e)) => {
                tracing::warn!("Failed to persist directory path: {}", e);
            }
            Err(e) => {
                tracing::warn!("Refusing directory selection: {}", e);
                proxy.send_event(UserEvent::ShowError(e.to_string()));
                return;
            }
        }
        tracing::info!("Browsing directory: {}", path);
        s.current_directory = path.to_string();
        refresh_and_report(s, proxy);
    });
}

/// Forgets the saved directory. Search settings are kept.
pub fn clear_directory<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        if let Err(e) = preferences::clear_directory_path(&mut *s.preferences) {
            tracing::warn!("Failed to persist cleared directory: {}", e);
        }
        s.reset_directory_state();
    });
}

/// Re-runs the search for the current inputs.
pub fn refresh<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| refresh_and_report(s, &proxy));
}

/// Replaces the search term with the string payload.
pub fn update_search_term<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match serde_json::from_value::<String>(payload.clone()) {
        Ok(term) => apply_search_term(term, &proxy, &state),
        Err(_) => tracing::warn!("Invalid search term payload: {:?}", payload),
    }
}

pub fn clear_search_term<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    apply_search_term(String::new(), &proxy, &state);
}

fn apply_search_term<P: EventProxy>(term: String, proxy: &P, state: &Arc<Mutex<AppState>>) {
    with_state_and_notify(state, proxy, |s| {
        if s.search_term == term {
            return;
        }
        s.search_term = term;
        if let Err(e) = preferences::save_search_term(&mut *s.preferences, &s.search_term) {
            tracing::warn!("Failed to persist search term: {}", e);
        }
        refresh_and_report(s, proxy);
    });
}

/// Replaces the pattern string with the string payload. A blank pattern
/// string is stored as the catch-all pattern.
pub fn update_search_pattern<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match serde_json::from_value::<String>(payload.clone()) {
        Ok(pattern) => apply_search_pattern(&pattern, &proxy, &state),
        Err(_) => tracing::warn!("Invalid search pattern payload: {:?}", payload),
    }
}

/// Uses the pattern string of the preset whose label is the payload.
pub fn apply_preset<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Ok(label) = serde_json::from_value::<String>(payload.clone()) else {
        tracing::warn!("Invalid preset label payload: {:?}", payload);
        return;
    };

    let patterns = lock_state(&state)
        .config
        .preset(&label)
        .map(|preset| preset.patterns.clone());

    match patterns {
        Some(patterns) => apply_search_pattern(&patterns, &proxy, &state),
        None => {
            let message = format!("Unknown pattern preset: {}", label);
            tracing::warn!("{}", message);
            proxy.send_event(UserEvent::ShowError(message));
        }
    }
}

fn apply_search_pattern<P: EventProxy>(pattern: &str, proxy: &P, state: &Arc<Mutex<AppState>>) {
    with_state_and_notify(state, proxy, |s| {
        let normalized = normalize_pattern_string(pattern);
        if s.search_pattern == normalized {
            return;
        }
        s.search_pattern = normalized;
        if let Err(e) = preferences::save_search_pattern(&mut *s.preferences, &s.search_pattern) {
            tracing::warn!("Failed to persist search pattern: {}", e);
        }
        refresh_and_report(s, proxy);
    });
}

/// Resets the search term to empty and the pattern to the catch-all pattern,
/// and removes both from the preference store.
pub fn clear_search_settings<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.search_term.clear();
        s.search_pattern = CATCH_ALL_PATTERN.to_string();
        if let Err(e) = preferences::clear_search_settings(&mut *s.preferences) {
            tracing::warn!("Failed to persist cleared search settings: {}", e);
        }
        refresh_and_report(s, &proxy);
    });
}

/// Opens the file given as a path payload with the default application.
///
/// A file that has vanished since the last search triggers a refresh so the
/// list stops showing it.
pub fn open_file<P: EventProxy, L: FileLauncher + ?Sized>(
    launcher: &L,
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Ok(path) = serde_json::from_value::<PathBuf>(payload.clone()) else {
        tracing::warn!("Invalid file path payload: {:?}", payload);
        return;
    };

    match launcher::open_file(launcher, Path::new(&path)) {
        Ok(()) => proxy.send_event(UserEvent::FileOpened(path)),
        Err(e) => {
            tracing::error!("{}", e);
            proxy.send_event(UserEvent::ShowError(e.to_string()));
            if matches!(e, CoreError::FileNotFound(_)) {
                with_state_and_notify(&state, &proxy, |s| refresh_and_report(s, &proxy));
            }
        }
    }
}
