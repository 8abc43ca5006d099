use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use crate::error::ConfigError;
use crate::models::{ConfigSource, PassportConfig};
use crate::util::{
    non_empty_var, parse_bool_var, parse_duration_var, parse_f32_var,
};

/// Environment variables read by [`ConfigLoader`].
pub mod env_keys {
    /// Path to a TOML or JSON config file. Relative paths resolve against
    /// the loader's base directory.
    pub const CONFIG_PATH: &str = "PASSPORT_CONFIG_PATH";
    /// Inline JSON config.
    pub const CONFIG_JSON: &str = "PASSPORT_CONFIG_JSON";

    pub const API_URL: &str = "PASSPORT_API_URL";
    pub const ACCOUNT_URL: &str = "PASSPORT_ACCOUNT_URL";
    /// Humantime duration, e.g. `10s`.
    pub const ATTEND_TIMEOUT: &str = "PASSPORT_ATTEND_TIMEOUT";
    pub const TOUCH_SLOP: &str = "PASSPORT_TOUCH_SLOP";
    pub const COMMIT_THRESHOLD: &str = "PASSPORT_COMMIT_THRESHOLD";
    /// Humantime duration of the panel settle animation.
    pub const SETTLE: &str = "PASSPORT_SETTLE";
    pub const EASING: &str = "PASSPORT_EASING";
    /// Humantime duration before a scanner hint reverts.
    pub const HINT_RESET: &str = "PASSPORT_HINT_RESET";
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub const LOG: &str = "PASSPORT_LOG";
    /// Truthy (`1`, `true`, `yes`, `on`) skips `<base_dir>/.env`.
    pub const NO_DOTENV: &str = "PASSPORT_NO_DOTENV";

    pub const ALL: &[&str] = &[
        CONFIG_PATH,
        CONFIG_JSON,
        API_URL,
        ACCOUNT_URL,
        ATTEND_TIMEOUT,
        TOUCH_SLOP,
        COMMIT_THRESHOLD,
        SETTLE,
        EASING,
        HINT_RESET,
        LOG,
        NO_DOTENV,
    ];
}

const DEFAULT_FILES: &[&str] = &[
    "passport.toml",
    "passport.json",
    "config/passport.toml",
    "config/passport.json",
];

/// Result of [`ConfigLoader::load`].
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: PassportConfig,
    pub source: ConfigSource,
    /// `.env` file that was applied, if any.
    pub dotenv: Option<PathBuf>,
    /// Environment variables that overrode file values.
    pub overrides: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_dir: PathBuf,
    load_dotenv: bool,
    explicit: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        let base_dir =
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(base_dir)
    }
}

impl ConfigLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            load_dotenv: true,
            explicit: None,
        }
    }

    /// Use `path` instead of `$PASSPORT_CONFIG_PATH` and the default files,
    /// e.g. from a `--config` flag.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Skip `<base_dir>/.env`. Same as setting `$PASSPORT_NO_DOTENV`.
    pub fn without_dotenv(mut self) -> Self {
        self.load_dotenv = false;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve the configuration.
    ///
    /// Order:
    /// 1) `<base_dir>/.env` is applied to the process environment without
    ///    replacing variables that are already set,
    /// 2) the file given to [`ConfigLoader::with_file`], else
    ///    `$PASSPORT_CONFIG_PATH`, else `$PASSPORT_CONFIG_JSON`, else the
    ///    first default file found under `base_dir`, else defaults,
    /// 3) individual `PASSPORT_*` overrides.
    pub fn load(&self) -> anyhow::Result<ConfigLoad> {
        let dotenv = self.apply_dotenv()?;
        let (mut config, source) = self.load_base()?;
        let overrides = apply_env_overrides(&mut config)?;
        config.validate().with_context(|| {
            format!("invalid configuration from {source}")
        })?;

        debug!(%source, ?overrides, "Configuration loaded");
        Ok(ConfigLoad {
            config,
            source,
            dotenv,
            overrides,
        })
    }

    fn apply_dotenv(&self) -> anyhow::Result<Option<PathBuf>> {
        if !self.load_dotenv || parse_bool_var(env_keys::NO_DOTENV) == Some(true)
        {
            return Ok(None);
        }
        let path = self.base_dir.join(".env");
        if !path.is_file() {
            return Ok(None);
        }
        dotenvy::from_path(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(path))
    }

    fn load_base(&self) -> anyhow::Result<(PassportConfig, ConfigSource)> {
        if let Some(path) = &self.explicit {
            let path = self.resolve(path);
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        if let Some(raw) = non_empty_var(env_keys::CONFIG_PATH) {
            let path = self.resolve(Path::new(&raw));
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = non_empty_var(env_keys::CONFIG_JSON) {
            let config = parse_json(&raw).with_context(|| {
                format!("failed to parse {}", env_keys::CONFIG_JSON)
            })?;
            return Ok((config, ConfigSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((PassportConfig::default(), ConfigSource::Default))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        DEFAULT_FILES
            .iter()
            .map(|candidate| self.base_dir.join(candidate))
            .find(|path| path.is_file())
    }
}

pub fn load_from_file(path: &Path) -> anyhow::Result<PassportConfig> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!("failed to read config from {}", path.display())
    })?;
    let origin = path.display().to_string();

    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents).map_err(|err| {
            ConfigError::Parse {
                origin,
                message: err.to_string(),
            }
        }),
        Some("toml") => toml::from_str(&contents).map_err(|err| {
            ConfigError::Parse {
                origin,
                message: err.to_string(),
            }
        }),
        _ => parse_from_str(&contents, &origin),
    };
    Ok(parsed?)
}

/// Try TOML first, then JSON.
pub fn parse_from_str(
    contents: &str,
    origin: &str,
) -> Result<PassportConfig, ConfigError> {
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| ConfigError::Parse {
            origin: origin.to_string(),
            message: format!("toml error: {toml_err}; json error: {json_err}"),
        })
    })
}

pub fn parse_json(raw: &str) -> Result<PassportConfig, ConfigError> {
    serde_json::from_str(raw).map_err(|err| ConfigError::Parse {
        origin: "inline json".to_string(),
        message: err.to_string(),
    })
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn apply_env_overrides(
    config: &mut PassportConfig,
) -> Result<Vec<&'static str>, ConfigError> {
    let mut applied = Vec::new();

    if let Some(url) = non_empty_var(env_keys::API_URL) {
        url::Url::parse(&url)
            .map_err(|err| ConfigError::invalid(env_keys::API_URL, &url, err))?;
        config.api.attend_url = url;
        applied.push(env_keys::API_URL);
    }
    if let Some(url) = non_empty_var(env_keys::ACCOUNT_URL) {
        url::Url::parse(&url).map_err(|err| {
            ConfigError::invalid(env_keys::ACCOUNT_URL, &url, err)
        })?;
        config.api.account_url = url;
        applied.push(env_keys::ACCOUNT_URL);
    }
    if let Some(timeout) = parse_duration_var(env_keys::ATTEND_TIMEOUT)? {
        if timeout.is_zero() {
            return Err(ConfigError::invalid(
                env_keys::ATTEND_TIMEOUT,
                "0",
                "must be positive",
            ));
        }
        config.api.attend_timeout_ms = millis(timeout);
        applied.push(env_keys::ATTEND_TIMEOUT);
    }
    if let Some(slop) = parse_f32_var(env_keys::TOUCH_SLOP)? {
        config.navigation.touch_slop_px = slop;
        applied.push(env_keys::TOUCH_SLOP);
    }
    if let Some(threshold) = parse_f32_var(env_keys::COMMIT_THRESHOLD)? {
        config.navigation.commit_threshold_px = threshold;
        applied.push(env_keys::COMMIT_THRESHOLD);
    }
    if let Some(settle) = parse_duration_var(env_keys::SETTLE)? {
        config.navigation.settle_ms = millis(settle);
        applied.push(env_keys::SETTLE);
    }
    if let Some(easing) = non_empty_var(env_keys::EASING) {
        config.navigation.easing = easing;
        applied.push(env_keys::EASING);
    }
    if let Some(reset) = parse_duration_var(env_keys::HINT_RESET)? {
        config.scan.hint_reset_ms = millis(reset);
        applied.push(env_keys::HINT_RESET);
    }
    if let Some(filter) = non_empty_var(env_keys::LOG) {
        config.logging.filter = Some(filter);
        applied.push(env_keys::LOG);
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_toml_and_json() {
        let from_toml =
            parse_from_str("[scan]\nhint_reset_ms = 900\n", "test").unwrap();
        assert_eq!(from_toml.scan.hint_reset_ms, 900);

        let from_json =
            parse_from_str(r#"{"scan":{"hint_reset_ms":900}}"#, "test").unwrap();
        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn parse_reports_both_errors() {
        let err = parse_from_str("{ nope", "broken.cfg").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("broken.cfg"));
        assert!(text.contains("toml error"));
        assert!(text.contains("json error"));
    }
}
