use std::fmt;

use passport_model::{BoundingBox, LumaFrame, Rotation};
use tracing::debug;

use super::border::{self, BorderReport};
use super::config::VerifierConfig;
use super::mapping::map_box_to_frame;
use super::texture::{self, TextureReport};
use crate::constants::scan as hints;

/// Why a decoded code was not accepted, with the hint shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Both checks failed.
    PaperAndPrintout,
    /// Only the white ring check failed.
    WhitePaper,
    /// Only the print texture check failed.
    Texture,
}

impl Rejection {
    pub fn hint(&self) -> &'static str {
        match self {
            Self::PaperAndPrintout => hints::HINT_PAPER_AND_PRINTOUT,
            Self::WhitePaper => hints::HINT_WHITE_PAPER,
            Self::Texture => hints::HINT_TEXTURE,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hint())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// Box the checks ran against, in frame space.
    pub frame_box: BoundingBox,
    pub border: BorderReport,
    pub texture: TextureReport,
}

impl Verdict {
    pub fn is_authentic(&self) -> bool {
        self.border.passed && self.texture.passed
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match (self.border.passed, self.texture.passed) {
            (true, true) => None,
            (false, false) => Some(Rejection::PaperAndPrintout),
            (false, true) => Some(Rejection::WhitePaper),
            (true, false) => Some(Rejection::Texture),
        }
    }
}

/// Stateless per frame; holds only thresholds.
#[derive(Debug, Clone, Default)]
pub struct AuthenticityVerifier {
    cfg: VerifierConfig,
}

impl AuthenticityVerifier {
    pub fn new(cfg: VerifierConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.cfg
    }

    /// Run both checks for a box reported by the decoder.
    pub fn verify(
        &self,
        frame: &LumaFrame<'_>,
        detector_box: BoundingBox,
        rotation: Rotation,
    ) -> Verdict {
        let frame_box = map_box_to_frame(
            detector_box,
            rotation,
            frame.width(),
            frame.height(),
        );
        self.verify_frame_box(frame, frame_box)
    }

    /// Run both checks for a box already in frame space.
    pub fn verify_frame_box(
        &self,
        frame: &LumaFrame<'_>,
        frame_box: BoundingBox,
    ) -> Verdict {
        let verdict = Verdict {
            frame_box,
            border: border::check(frame, frame_box, &self.cfg),
            texture: texture::check(frame, frame_box, &self.cfg),
        };
        debug!(
            ?frame_box,
            white_ratio = verdict.border.ratio(),
            ring_samples = verdict.border.total,
            texture_samples = verdict.texture.samples,
            variance = verdict.texture.variance,
            deviation = verdict.texture.mean_abs_deviation,
            authentic = verdict.is_authentic(),
            "Authenticity verdict"
        );
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::fixtures::{code_on_screen, flat_reprint, printed_code};

    const FRAME_BOX: BoundingBox = BoundingBox {
        left: 100,
        top: 100,
        right: 300,
        bottom: 300,
    };

    fn verify(owned: &passport_model::OwnedLumaFrame) -> Verdict {
        AuthenticityVerifier::default().verify(
            &owned.view().unwrap(),
            FRAME_BOX,
            Rotation::Deg0,
        )
    }

    #[test]
    fn printed_code_is_accepted() {
        let verdict = verify(&printed_code(400, 400, FRAME_BOX));
        assert!(verdict.is_authentic(), "{verdict:?}");
        assert_eq!(verdict.rejection(), None);
    }

    #[test]
    fn each_failure_maps_to_its_hint() {
        let screen = verify(&code_on_screen(400, 400, FRAME_BOX));
        assert_eq!(screen.rejection(), Some(Rejection::WhitePaper));
        assert_eq!(
            screen.rejection().map(|r| r.hint()),
            Some("Place the QR on white paper under bright light.")
        );

        let reprint = verify(&flat_reprint(400, 400, FRAME_BOX));
        assert_eq!(reprint.rejection(), Some(Rejection::Texture));

        let dark = verify(&passport_model::OwnedLumaFrame::filled(400, 400, 20));
        assert_eq!(dark.rejection(), Some(Rejection::PaperAndPrintout));
        assert_eq!(
            dark.rejection().unwrap().to_string(),
            "Needs white paper and the official printout."
        );
    }

    #[test]
    fn rotated_detector_box_is_mapped_before_sampling() {
        // 400x300 sensor, decoder sees the 300x400 upright image.
        let frame_box = BoundingBox::new(100, 48, 300, 248);
        let owned = printed_code(400, 300, frame_box);
        let verifier = AuthenticityVerifier::default();
        let verdict = verifier.verify(
            &owned.view().unwrap(),
            BoundingBox::new(51, 100, 251, 300),
            Rotation::Deg90,
        );
        assert_eq!(verdict.frame_box, frame_box);
        assert!(verdict.is_authentic(), "{verdict:?}");

        // Same detector box without rotation lands on the wrong pixels.
        let unrotated = verifier.verify(
            &owned.view().unwrap(),
            BoundingBox::new(51, 100, 251, 300),
            Rotation::Deg0,
        );
        assert!(!unrotated.is_authentic());
    }
}
