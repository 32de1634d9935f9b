use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, warn};

const CONFIG_ENV_VAR: &str = "MEMENTO_CONFIG";
const CONFIG_DIR: &str = "memento";
const CONFIG_FILE: &str = "memento.toml";

pub const DEFAULT_PREVIEW_CHARS: usize = 150;

#[derive(Debug, Clone)]
pub struct Config {
    /// Raw color setting; the renderer parses on/off/yes/no/1/0.
    pub color: String,
    /// Path opened when the invocation names no route.
    pub default_route: String,
    /// Diary entries longer than this many characters render clipped
    /// until expanded.
    pub preview_chars: usize,
    pub loaded_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    color: Option<String>,
    default_route: Option<String>,
    preview_chars: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: "on".to_string(),
            default_route: "/".to_string(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            loaded_file: None,
        }
    }
}

impl Config {
    #[tracing::instrument(skip(config_override))]
    pub fn load(config_override: Option<&Path>) -> anyhow::Result<Self> {
        match resolve_config_path(config_override) {
            Some(path) => {
                info!(file = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => {
                warn!("no config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed: ConfigFile = toml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let mut cfg = Self::default();
        if let Some(color) = parsed.color {
            cfg.color = color;
        }
        if let Some(route) = parsed.default_route {
            cfg.default_route = route;
        }
        if let Some(chars) = parsed.preview_chars {
            cfg.preview_chars = chars;
        }
        cfg.loaded_file = Some(path.to_path_buf());
        Ok(cfg)
    }
}

/// Paths named by the flag or env var are returned without an existence
/// check; the standard candidate only when the file is present.
fn resolve_config_path(config_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_override {
        return Some(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = env_path.trim();
        if trimmed == "/dev/null" {
            return None;
        }
        if !trimmed.is_empty() {
            return Some(expand_tilde(Path::new(trimmed)));
        }
    }

    let candidate = dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))?;
    if candidate.exists() {
        Some(candidate)
    } else {
        debug!(file = %candidate.display(), "no config file at standard location");
        None
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
