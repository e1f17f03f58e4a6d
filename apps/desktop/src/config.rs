use std::{fs, path::Path};

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "vsm.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub process_name: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            process_name: "Dynamic process".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    process_name: Option<String>,
    log_filter: Option<String>,
}

/// Defaults, then the TOML file, then `APP__*` environment overrides.
/// A missing or malformed file leaves the defaults in place; the returned
/// warning is logged once logging is up.
pub fn load_settings(path: Option<&Path>) -> (Settings, Option<String>) {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut settings = Settings::default();
    let mut warning = None;

    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(err) => {
                warning = Some(format!(
                    "ignoring malformed config '{}': {err}",
                    path.display()
                ))
            }
        },
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
            warning = Some(format!("cannot read config '{}': {err}", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    (settings, warning)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.process_name {
        settings.process_name = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__PROCESS_NAME") {
        settings.process_name = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
