//! Pure panel placement: `(mode, viewport, offsets) -> PanelLayout`.

use passport_model::{PanelLayout, PanelMode, Translation, Viewport};

/// Resting translation of every panel for `mode`, shifted by the live drag
/// offsets. Only one of `h`/`v` is non-zero during a drag.
pub fn place(mode: PanelMode, viewport: Viewport, h: f32, v: f32) -> PanelLayout {
    let sw = viewport.width;
    let sh = viewport.height;

    let profile_x = match mode {
        PanelMode::Profile => 0.0,
        _ => -sw,
    };
    let hub_x = match mode {
        PanelMode::Profile => sw,
        PanelMode::Leaderboard => -sw,
        _ => 0.0,
    };
    let hub_y = match mode {
        PanelMode::Scanner => -sh,
        _ => 0.0,
    };
    let leaderboard_x = match mode {
        PanelMode::Leaderboard => 0.0,
        _ => sw,
    };
    let scanner_y = match mode {
        PanelMode::Scanner => 0.0,
        _ => sh,
    };

    PanelLayout {
        profile: Translation::new(profile_x + h, 0.0),
        hub: Translation::new(hub_x + h, hub_y + v),
        leaderboard: Translation::new(leaderboard_x + h, 0.0),
        scanner: Translation::new(0.0, scanner_y + v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport {
        width: 400.0,
        height: 800.0,
    };

    #[test]
    fn resting_layout_per_mode() {
        let list = place(PanelMode::List, VP, 0.0, 0.0);
        assert_eq!(list.profile, Translation::new(-400.0, 0.0));
        assert_eq!(list.hub, Translation::ZERO);
        assert_eq!(list.leaderboard, Translation::new(400.0, 0.0));
        assert_eq!(list.scanner, Translation::new(0.0, 800.0));

        let profile = place(PanelMode::Profile, VP, 0.0, 0.0);
        assert_eq!(profile.profile, Translation::ZERO);
        assert_eq!(profile.hub, Translation::new(400.0, 0.0));

        let board = place(PanelMode::Leaderboard, VP, 0.0, 0.0);
        assert_eq!(board.hub, Translation::new(-400.0, 0.0));
        assert_eq!(board.leaderboard, Translation::ZERO);

        let scanner = place(PanelMode::Scanner, VP, 0.0, 0.0);
        assert_eq!(scanner.hub, Translation::new(0.0, -800.0));
        assert_eq!(scanner.scanner, Translation::ZERO);
    }

    #[test]
    fn offsets_shift_every_panel_on_their_axis() {
        let layout = place(PanelMode::List, VP, -50.0, 0.0);
        assert_eq!(layout.profile.x, -450.0);
        assert_eq!(layout.hub.x, -50.0);
        assert_eq!(layout.leaderboard.x, 350.0);
        assert_eq!(layout.scanner, Translation::new(0.0, 800.0));

        let layout = place(PanelMode::Scanner, VP, 0.0, 120.0);
        assert_eq!(layout.hub.y, -680.0);
        assert_eq!(layout.scanner.y, 120.0);
        assert_eq!(layout.profile.y, 0.0);
    }
}
