use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_SETTINGS_PATH: &str = "note_editor.toml";

const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(1000);
const DEFAULT_SAVE_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Timing knobs for the editor workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    /// Simulated fetch latency between `Loading` and `FinishLoading`.
    pub load_delay: Duration,
    /// Wait between a successful save and `FinishSaving`.
    pub save_settle_delay: Duration,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            load_delay: DEFAULT_LOAD_DELAY,
            save_settle_delay: DEFAULT_SAVE_SETTLE_DELAY,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    load_delay_ms: Option<u64>,
    save_settle_delay_ms: Option<u64>,
}

pub fn load_settings() -> EditorSettings {
    load_settings_from(Path::new(DEFAULT_SETTINGS_PATH))
}

/// Defaults, then the TOML file at `path` if it exists, then
/// `NOTE_EDITOR__*` environment variables.
pub fn load_settings_from(path: &Path) -> EditorSettings {
    let mut settings = EditorSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_settings(&mut settings, &raw, path);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_settings(settings: &mut EditorSettings, raw: &str, path: &Path) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed settings file");
            return;
        }
    };

    if let Some(ms) = file_cfg.load_delay_ms {
        settings.load_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = file_cfg.save_settle_delay_ms {
        settings.save_settle_delay = Duration::from_millis(ms);
    }
}

fn apply_env_overrides(settings: &mut EditorSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(delay) = env_millis(&lookup, "NOTE_EDITOR__LOAD_DELAY_MS") {
        settings.load_delay = delay;
    }
    if let Some(delay) = env_millis(&lookup, "NOTE_EDITOR__SAVE_SETTLE_DELAY_MS") {
        settings.save_settle_delay = delay;
    }
}

fn env_millis(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            warn!(key, value = %raw, "ignoring non-numeric delay override");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
