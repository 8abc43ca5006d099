use passport_model::PanelMode;

/// Floating navigation button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatingNav {
    Hidden,
    Scan,
    Back,
}

impl FloatingNav {
    pub fn for_mode(mode: PanelMode) -> Self {
        match mode {
            PanelMode::Scanner => Self::Hidden,
            PanelMode::List => Self::Scan,
            PanelMode::Profile | PanelMode::Leaderboard => Self::Back,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Scan => Some("Scan"),
            Self::Back => Some("Back"),
        }
    }
}

/// Where a floating-button tap leads from `mode`.
pub fn floating_target(mode: PanelMode) -> PanelMode {
    match mode {
        PanelMode::List => PanelMode::Scanner,
        _ => PanelMode::List,
    }
}
