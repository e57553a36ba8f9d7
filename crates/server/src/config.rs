use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub resources_root: String,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:7788".into(),
            resources_root: "public/Resources".into(),
            max_body_bytes: 64 * 1024,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| env::var(key).ok());

    settings
}

/// `server.toml` holds flat top-level keys; unknown keys are ignored.
pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = file_cfg.get("resources_root").and_then(toml::Value::as_str) {
        settings.resources_root = v.to_string();
    }
    let max_body_bytes = match file_cfg.get("max_body_bytes") {
        Some(toml::Value::Integer(v)) => usize::try_from(*v).ok(),
        Some(toml::Value::String(v)) => v.parse().ok(),
        _ => None,
    };
    if let Some(v) = max_body_bytes {
        settings.max_body_bytes = v;
    }
}

/// Plain names first, then `APP__` names, so the prefixed form wins.
pub(crate) fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    for key in ["SERVER_BIND", "APP__BIND_ADDR"] {
        if let Some(v) = var(key) {
            settings.server_bind = v;
        }
    }
    for key in ["RESOURCES_ROOT", "APP__RESOURCES_ROOT"] {
        if let Some(v) = var(key) {
            settings.resources_root = v;
        }
    }
    if let Some(v) = var("APP__MAX_BODY_BYTES").and_then(|v| v.parse().ok()) {
        settings.max_body_bytes = v;
    }
}

pub fn prepare_resources_root(raw_root: &str) -> anyhow::Result<PathBuf> {
    let cwd = env::current_dir().context("failed to read current directory")?;
    Ok(resolve_resources_root(raw_root, &cwd))
}

pub(crate) fn resolve_resources_root(raw_root: &str, cwd: &Path) -> PathBuf {
    let raw_root = raw_root.trim();
    let root = if raw_root.is_empty() {
        PathBuf::from(Settings::default().resources_root)
    } else {
        PathBuf::from(raw_root)
    };

    if root.is_absolute() {
        root
    } else {
        cwd.join(root)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
