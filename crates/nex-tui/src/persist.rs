//! UI preference persistence.
//!
//! Best-effort on both ends: a missing or malformed preferences file
//! falls back to defaults, and a failed save is logged and otherwise
//! ignored. Preferences must never take the dashboard down.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPrefs {
    pub dark_mode: bool,
}

fn prefs_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nex").join("ui.toml"))
}

pub fn load_prefs() -> UiPrefs {
    let Some(path) = prefs_path() else {
        return UiPrefs::default();
    };
    let Ok(text) = fs::read_to_string(&path) else {
        return UiPrefs::default();
    };
    match toml::from_str(&text) {
        Ok(prefs) => prefs,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed preferences");
            UiPrefs::default()
        }
    }
}

pub fn save_prefs(prefs: &UiPrefs) {
    let Some(path) = prefs_path() else {
        return;
    };
    let text = match toml::to_string(prefs) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "cannot serialize preferences");
            return;
        }
    };
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            warn!(path = %parent.display(), error = %err, "cannot create preferences dir");
            return;
        }
    }
    match fs::write(&path, text) {
        Ok(()) => debug!(path = %path.display(), "preferences saved"),
        Err(err) => warn!(path = %path.display(), error = %err, "cannot save preferences"),
    }
}
