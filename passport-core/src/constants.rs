//! Compiled defaults. Runtime overrides flow in through the `*Config`
//! structs of each module.

pub mod navigation {
    /// Movement before a drag is recognized (px). Roughly the platform's
    /// scaled touch slop on a 3x display.
    pub const TOUCH_SLOP_PX: f32 = 24.0;
    /// Displacement past which a release commits to the neighbouring panel.
    pub const COMMIT_THRESHOLD_PX: f32 = 100.0;
    /// Taps within this window after a gesture ends are swallowed.
    pub const TAP_SUPPRESSION_MS: u64 = 400;
    pub const SETTLE_MS: u64 = 300;
    /// Factor of the decelerate curve `1 - (1 - t)^(2 * factor)`.
    pub const DECELERATE_FACTOR: f32 = 2.0;
}

pub mod verifier {
    pub const SAMPLE_STEP: i32 = 2;
    pub const MIN_MARGIN_PX: i32 = 6;
    pub const MARGIN_FRACTION: f64 = 0.08;

    pub const WHITE_LUMA: u8 = 230;
    pub const MIN_WHITE_RATIO: f64 = 0.70;

    pub const TEXTURE_MIN_LUMA: u8 = 200;
    pub const TEXTURE_MAX_GRADIENT: i32 = 12;
    pub const TEXTURE_MIN_SAMPLES: u32 = 160;
    pub const TEXTURE_MIN_VARIANCE: f64 = 14.0;
    pub const TEXTURE_MIN_DEVIATION: f64 = 4.0;
}

pub mod scan {
    pub const HINT_RESET_MS: u64 = 2_500;
    pub const IDLE_PROMPT: &str = "Point at a Passport event QR code";
    pub const STOPPED_PROMPT: &str = "Tap to launch scanner";
    /// Second line shown under every scanner hint.
    pub const SCREEN_NOTICE: &str = "Screen scans off";

    pub const HINT_PAPER_AND_PRINTOUT: &str =
        "Needs white paper and the official printout.";
    pub const HINT_WHITE_PAPER: &str =
        "Place the QR on white paper under bright light.";
    pub const HINT_TEXTURE: &str =
        "Printed QR texture missing. Use the official printout.";
}

pub mod attendance {
    pub const ENDPOINT: &str = "https://pass.contact/api/attend";
    pub const ACCOUNT_URL: &str = "https://pass.contact/account";
    pub const TIMEOUT_SECS: u64 = 30;
    /// Characters of a failed response body kept for the error dialog.
    pub const BODY_PREVIEW_CHARS: usize = 500;
    pub const LEADERS_COLLECTION: &str = "leaders";
    pub const EVENTS_COLLECTION: &str = "events";
}
