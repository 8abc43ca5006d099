use std::path::PathBuf;
use std::time::Duration;

use passport_core::constants::{attendance, navigation, scan};
use passport_core::navigation::{EasingKind, NavigationConfig};
use passport_core::vision::VerifierConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// File that produced the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("built-in defaults"),
            Self::EnvPath(path) => {
                write!(f, "$PASSPORT_CONFIG_PATH ({})", path.display())
            }
            Self::EnvInline => f.write_str("$PASSPORT_CONFIG_JSON"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PassportConfig {
    pub api: ApiSettings,
    pub navigation: NavigationSettings,
    /// Authenticity thresholds, see [`VerifierConfig`].
    pub verifier: VerifierConfig,
    pub scan: ScanSettings,
    pub logging: LoggingSettings,
}

impl PassportConfig {
    /// Check cross-field constraints the types cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.attend_url()?;
        self.navigation.easing()?;
        if self.verifier.sample_step < 1 {
            return Err(ConfigError::invalid(
                "verifier.sample_step",
                self.verifier.sample_step.to_string(),
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.verifier.min_white_ratio) {
            return Err(ConfigError::invalid(
                "verifier.min_white_ratio",
                self.verifier.min_white_ratio.to_string(),
                "must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Remote endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Attendance POST endpoint.
    pub attend_url: String,
    /// Opened by the account settings menu entry.
    pub account_url: String,
    /// Connect and read timeout for the attendance call (ms).
    pub attend_timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            attend_url: attendance::ENDPOINT.to_string(),
            account_url: attendance::ACCOUNT_URL.to_string(),
            attend_timeout_ms: attendance::TIMEOUT_SECS * 1_000,
        }
    }
}

impl ApiSettings {
    pub fn attend_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.attend_url).map_err(|err| {
            ConfigError::invalid("api.attend_url", &self.attend_url, err)
        })
    }

    pub fn attend_timeout(&self) -> Duration {
        Duration::from_millis(self.attend_timeout_ms)
    }
}

/// Gesture tuning. Units are screen pixels and milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationSettings {
    pub touch_slop_px: f32,
    pub commit_threshold_px: f32,
    pub tap_suppression_ms: u64,
    pub settle_ms: u64,
    /// `decelerate`, `ease-out`, `ease-in-out`, `ease-in` or `linear`.
    pub easing: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            touch_slop_px: navigation::TOUCH_SLOP_PX,
            commit_threshold_px: navigation::COMMIT_THRESHOLD_PX,
            tap_suppression_ms: navigation::TAP_SUPPRESSION_MS,
            settle_ms: navigation::SETTLE_MS,
            easing: "decelerate".to_string(),
        }
    }
}

impl NavigationSettings {
    pub fn easing(&self) -> Result<EasingKind, ConfigError> {
        EasingKind::from_name(&self.easing)
            .ok_or_else(|| ConfigError::UnknownEasing(self.easing.clone()))
    }

    pub fn to_navigation_config(&self) -> Result<NavigationConfig, ConfigError> {
        Ok(NavigationConfig {
            touch_slop_px: self.touch_slop_px,
            commit_threshold_px: self.commit_threshold_px,
            tap_suppression: Duration::from_millis(self.tap_suppression_ms),
            settle_duration: Duration::from_millis(self.settle_ms),
            settle_easing: self.easing()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Quiet period before a rejection hint reverts (ms).
    pub hint_reset_ms: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            hint_reset_ms: scan::HINT_RESET_MS,
        }
    }
}

impl ScanSettings {
    pub fn hint_reset(&self) -> Duration {
        Duration::from_millis(self.hint_reset_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is
    /// unset.
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_constants() {
        let config = PassportConfig::default();
        config.validate().unwrap();
        let nav = config.navigation.to_navigation_config().unwrap();
        assert_eq!(nav, NavigationConfig {
            settle_easing: EasingKind::decelerate(),
            ..NavigationConfig::default()
        });
        assert_eq!(config.api.attend_timeout(), Duration::from_secs(30));
        assert_eq!(config.scan.hint_reset(), Duration::from_millis(2_500));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: PassportConfig = toml::from_str(
            r#"
            [navigation]
            touch_slop_px = 16.0
            easing = "ease-out"

            [verifier]
            min_white_ratio = 0.8
            "#,
        )
        .unwrap();
        assert_eq!(config.navigation.touch_slop_px, 16.0);
        assert_eq!(config.navigation.commit_threshold_px, 100.0);
        assert_eq!(config.navigation.easing().unwrap(), EasingKind::EaseOut);
        assert_eq!(config.verifier.min_white_ratio, 0.8);
        assert_eq!(config.verifier.white_luma, 230);
        assert_eq!(config.api, ApiSettings::default());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = PassportConfig::default();
        config.navigation.easing = "bounce".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownEasing(name)) if name == "bounce"
        ));

        let mut config = PassportConfig::default();
        config.verifier.min_white_ratio = 1.5;
        assert!(config.validate().is_err());

        let mut config = PassportConfig::default();
        config.api.attend_url = "::nope".into();
        assert!(config.validate().is_err());
    }
}
