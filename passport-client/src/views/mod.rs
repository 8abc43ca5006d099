//! View models derived from [`State`](crate::state::State). Rendering is left
//! to the host; these types carry exactly what it needs to draw.

pub mod events;
pub mod leaderboard;
pub mod nav;
pub mod profile;

use passport_model::{DirtyFields, PanelLayout, PanelMode};
use serde::Serialize;

pub use events::{EventDetail, EventsView, event_label};
pub use leaderboard::{LeaderRow, LeaderboardView};
pub use nav::{FloatingNav, floating_target};
pub use profile::{ProfileField, ProfileView};

use crate::messages::Dialog;
use crate::state::State;

/// Everything on screen for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub mode: PanelMode,
    pub layout: PanelLayout,
    pub floating_nav: Option<&'static str>,
    pub scan_hint: String,
    pub events: Vec<String>,
    pub leaders: Vec<String>,
    pub profile_heading: String,
    #[serde(skip)]
    pub profile_dirty: DirtyFields,
    pub dialog: Option<(String, String)>,
}

impl Screen {
    pub fn capture(state: &State) -> Self {
        let mode = state.navigation.mode();
        Self {
            mode,
            layout: state.navigation.layout(),
            floating_nav: FloatingNav::for_mode(mode).label(),
            scan_hint: state.scan.hint_display(),
            events: state.events.labels(),
            leaders: state.leaderboard.labels(),
            profile_heading: state.profile.heading(),
            profile_dirty: state.profile.dirty(),
            dialog: state
                .dialog
                .as_ref()
                .map(|Dialog { title, message }| (title.clone(), message.clone())),
        }
    }
}
