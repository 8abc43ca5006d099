use std::time::Duration;

use passport_config::{ConfigError, PassportConfig};
use passport_core::navigation::{NavigationConfig, NavigationController};
use passport_core::scan::ScanCoordinator;
use passport_core::traits::SignedInUser;
use passport_core::vision::VerifierConfig;
use passport_model::Viewport;
use url::Url;

use crate::messages::Dialog;
use crate::views::{EventsView, LeaderboardView, ProfileView};

/// Settings `State` is built from.
#[derive(Debug, Clone)]
pub struct StateConfig {
    pub viewport: Viewport,
    pub navigation: NavigationConfig,
    pub verifier: VerifierConfig,
    pub hint_reset: Duration,
    pub account_url: Option<Url>,
}

impl StateConfig {
    pub fn from_config(
        config: &PassportConfig,
        viewport: Viewport,
    ) -> Result<Self, ConfigError> {
        let account_url = Url::parse(&config.api.account_url).map_err(|err| {
            ConfigError::invalid("api.account_url", &config.api.account_url, err)
        })?;
        Ok(Self {
            viewport,
            navigation: config.navigation.to_navigation_config()?,
            verifier: config.verifier,
            hint_reset: config.scan.hint_reset(),
            account_url: Some(account_url),
        })
    }
}

/// Whole application state. Only [`update`](crate::update::update) mutates
/// it.
#[derive(Debug)]
pub struct State {
    pub navigation: NavigationController,
    pub scan: ScanCoordinator,
    pub events: EventsView,
    pub leaderboard: LeaderboardView,
    pub profile: ProfileView,
    pub user: Option<SignedInUser>,
    pub dialog: Option<Dialog>,
    pub account_url: Option<Url>,
    /// A check-in request is on its way.
    pub attending: bool,
}

impl State {
    pub fn new(config: StateConfig) -> Self {
        Self {
            navigation: NavigationController::new_with_config(
                config.viewport,
                config.navigation,
            ),
            scan: ScanCoordinator::new(config.verifier, config.hint_reset),
            events: EventsView::default(),
            leaderboard: LeaderboardView::default(),
            profile: ProfileView::default(),
            user: None,
            dialog: None,
            account_url: config.account_url,
            attending: false,
        }
    }

    /// Default tuning on the given screen.
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self::new(StateConfig {
            viewport,
            navigation: NavigationConfig::default(),
            verifier: VerifierConfig::default(),
            hint_reset: Duration::from_millis(
                passport_core::constants::scan::HINT_RESET_MS,
            ),
            account_url: Url::parse(
                passport_core::constants::attendance::ACCOUNT_URL,
            )
            .ok(),
        })
    }
}
