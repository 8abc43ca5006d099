//! Commands behind the `passport` binary. Argument parsing lives in
//! `main.rs`; everything here takes plain option structs so it can be
//! driven from tests.

use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use passport_config::PassportConfig;
use passport_core::attendance::{
    AttendanceFlow, AttendanceOutcome, HttpAttendanceClient,
};
use passport_core::constants::attendance::LEADERS_COLLECTION;
use passport_core::infra::{
    MemoryDocumentStore, StaticDecoder, StaticIdentity, StillFrameSource,
};
use passport_core::traits::{
    AttendanceApi, CameraFrame, DocumentStore, IdentityProvider,
};
use passport_core::vision::{AuthenticityVerifier, Verdict};
use passport_model::{
    BearerToken, BoundingBox, Detection, Document, OwnedLumaFrame, Rotation,
    StudentId, Viewport, extract_event_id,
};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::messages::{Dialog, DomainMessage, Effect};
use crate::replay::{PointerTrace, ReplayStep, replay};
use crate::runtime::{FRAME_INTERVAL, Runtime, Services};
use crate::state::{State, StateConfig};

/// Logical screen size used when a command has no real display.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 412.0,
    height: 915.0,
};

/// Parse `left,top,right,bottom`.
pub fn parse_box(raw: &str) -> Result<BoundingBox, String> {
    let parts = raw
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid box '{raw}': {err}"))?;
    match parts.as_slice() {
        &[left, top, right, bottom] => {
            Ok(BoundingBox::new(left, top, right, bottom))
        }
        _ => Err(format!(
            "invalid box '{raw}': expected left,top,right,bottom"
        )),
    }
}

/// Parse a rotation in degrees. Only quarter turns are meaningful; other
/// values are rejected here rather than silently treated as upright.
pub fn parse_rotation(raw: &str) -> Result<Rotation, String> {
    match raw.trim().parse::<i32>() {
        Ok(degrees @ (0 | 90 | 180 | 270)) => Ok(Rotation::from_degrees(degrees)),
        Ok(other) => Err(format!("unsupported rotation {other}, use 0/90/180/270")),
        Err(err) => Err(format!("invalid rotation '{raw}': {err}")),
    }
}

/// Decode an image file into a packed luminance plane.
pub fn load_luma(path: &Path) -> anyhow::Result<OwnedLumaFrame> {
    let image = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .to_luma8();
    let (width, height) = image.dimensions();
    debug!(width, height, path = %path.display(), "Loaded still frame");
    Ok(OwnedLumaFrame {
        data: image.into_raw(),
        width,
        height,
        row_stride: width as usize,
        pixel_stride: 1,
    })
}

pub fn state_config(config: &PassportConfig) -> anyhow::Result<StateConfig> {
    Ok(StateConfig::from_config(config, DEFAULT_VIEWPORT)?)
}

fn attendance_api(
    config: &PassportConfig,
) -> anyhow::Result<Arc<dyn AttendanceApi>> {
    let client = HttpAttendanceClient::new(
        &config.api.attend_url,
        config.api.attend_timeout(),
    )?;
    Ok(Arc::new(client))
}

fn identity(email: Option<&str>, token: Option<&str>) -> Arc<dyn IdentityProvider> {
    match email {
        Some(email) => Arc::new(StaticIdentity::signed_in(
            email,
            token.map(BearerToken::new),
        )),
        None => Arc::new(StaticIdentity::signed_out()),
    }
}

// ---- replay -------------------------------------------------------------

pub fn replay_file(
    path: &Path,
    config: &PassportConfig,
) -> anyhow::Result<Vec<ReplayStep>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read trace {}", path.display()))?;
    let trace = PointerTrace::from_json(&raw)
        .with_context(|| format!("invalid trace {}", path.display()))?;
    info!(events = trace.events.len(), "Replaying pointer trace");
    Ok(replay(&trace, state_config(config)?))
}

// ---- verify -------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub image: PathBuf,
    /// Code box in detector (upright) coordinates.
    pub detector_box: BoundingBox,
    pub rotation: Rotation,
}

pub fn verify_image(
    options: &VerifyOptions,
    config: &PassportConfig,
) -> anyhow::Result<Verdict> {
    let luma = load_luma(&options.image)?;
    let frame = luma.view()?;
    let verifier = AuthenticityVerifier::new(config.verifier);
    Ok(verifier.verify(&frame, options.detector_box, options.rotation))
}

// ---- attend -------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AttendOptions {
    /// Raw QR payload or bare event id.
    pub payload: String,
    pub email: String,
    pub token: String,
    /// Saved profile values sent along with the check-in.
    pub full_name: Option<String>,
    pub address: Option<String>,
}

/// Profile store holding the saved name and address for `email`, as the
/// hosted store would.
fn profile_store(
    email: &str,
    full_name: Option<&str>,
    address: Option<&str>,
) -> MemoryDocumentStore {
    let store = MemoryDocumentStore::new();
    let Some(student_id) = StudentId::from_email(email) else {
        return store;
    };
    let mut fields = Map::new();
    if let Some(name) = full_name {
        fields.insert("fullName".into(), Value::String(name.to_owned()));
    }
    if let Some(address) = address {
        fields.insert("address".into(), Value::String(address.to_owned()));
    }
    if !fields.is_empty() {
        store.insert(
            LEADERS_COLLECTION,
            Document::new(student_id.as_str(), fields),
        );
    }
    store
}

pub async fn attend(
    options: &AttendOptions,
    config: &PassportConfig,
) -> anyhow::Result<AttendanceOutcome> {
    let event_id = extract_event_id(&options.payload);
    let store: Arc<dyn DocumentStore> = Arc::new(profile_store(
        &options.email,
        options.full_name.as_deref(),
        options.address.as_deref(),
    ));
    let flow = AttendanceFlow::new(
        identity(Some(&options.email), Some(&options.token)),
        store,
        attendance_api(config)?,
    );
    info!(event_id, endpoint = %config.api.attend_url, "Submitting attendance");
    Ok(flow.submit(event_id).await?)
}

// ---- scan ---------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Still image served as every camera frame.
    pub image: PathBuf,
    pub detector_box: BoundingBox,
    pub rotation: Rotation,
    /// Payload the stand-in decoder reports for every frame.
    pub payload: String,
    pub email: Option<String>,
    pub token: Option<String>,
    /// Give up when nothing conclusive happened by then.
    pub timeout: Duration,
}

/// What a `passport scan` session surfaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// Last scanner hint on screen.
    pub hint: String,
    pub toasts: Vec<String>,
    pub confirmation: Option<String>,
    pub dialog: Option<Dialog>,
    pub sign_in_requested: bool,
    pub timed_out: bool,
}

impl ScanReport {
    fn record(&mut self, effect: Effect) {
        match effect {
            Effect::Toast(text) => self.toasts.push(text),
            Effect::OpenConfirmation { title } => self.confirmation = Some(title),
            Effect::OpenSignIn => self.sign_in_requested = true,
            other => debug!(effect = ?other, "Ignored host effect"),
        }
    }
}

/// Open the scanner from the hub, feed `image` as the camera and run until
/// the attendance round-trip resolves or `timeout` passes.
pub async fn scan_image(
    options: &ScanOptions,
    config: &PassportConfig,
) -> anyhow::Result<ScanReport> {
    if options.timeout.is_zero() {
        bail!("scan timeout must be positive");
    }
    let frame = CameraFrame {
        luma: load_luma(&options.image)?,
        rotation: options.rotation,
    };
    let identity = identity(options.email.as_deref(), options.token.as_deref());
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let decoder = Arc::new(StaticDecoder::new(vec![Detection::qr(
        options.payload.clone(),
        options.detector_box,
    )]));
    let services = Services {
        attendance: AttendanceFlow::new(
            Arc::clone(&identity),
            Arc::clone(&store),
            attendance_api(config)?,
        ),
        store,
        identity,
        decoder,
    };
    let camera = Box::new(StillFrameSource::new(vec![frame], FRAME_INTERVAL));
    let mut runtime =
        Runtime::new(State::new(state_config(config)?), services, camera);

    let mut report = ScanReport::default();
    for effect in runtime.bootstrap() {
        report.record(effect);
    }
    for effect in runtime.dispatch(DomainMessage::FloatingNavTapped) {
        report.record(effect);
    }

    let mut submitted = false;
    let finished = tokio::time::timeout(
        options.timeout,
        runtime.run(|state, effects| {
            for effect in effects {
                report.record(effect);
            }
            report.hint = state.scan.hint_display();
            submitted |= state.attending;
            if state.dialog.is_some() {
                report.dialog = state.dialog.clone();
                return ControlFlow::Break(());
            }
            if submitted && !state.attending {
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        }),
    )
    .await;
    runtime.shutdown();

    report.timed_out = finished.is_err();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_boxes() {
        assert_eq!(
            parse_box("10, 20,30,40").unwrap(),
            BoundingBox::new(10, 20, 30, 40)
        );
        assert!(parse_box("10,20,30").is_err());
        assert!(parse_box("a,b,c,d").is_err());
    }

    #[test]
    fn rotation_rejects_odd_angles() {
        assert_eq!(parse_rotation("90").unwrap(), Rotation::Deg90);
        assert!(parse_rotation("45").is_err());
    }

    #[tokio::test]
    async fn profile_store_holds_saved_fields() {
        let store = profile_store("ada@school.edu", Some("Ada L"), None);
        let doc = store
            .get(LEADERS_COLLECTION, "ada")
            .await
            .unwrap()
            .expect("profile document");
        assert_eq!(doc.get_str("fullName"), Some("Ada L"));
        assert_eq!(doc.get_str("address"), None);

        let empty = profile_store("ada@school.edu", None, None);
        assert!(empty.is_empty(LEADERS_COLLECTION));
    }

    #[test]
    fn verify_reads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.png");
        let luma = passport_core::vision::fixtures::printed_code(
            400,
            400,
            BoundingBox::new(100, 100, 300, 300),
        );
        image::GrayImage::from_raw(luma.width, luma.height, luma.data)
            .unwrap()
            .save(&path)
            .unwrap();

        let verdict = verify_image(
            &VerifyOptions {
                image: path,
                detector_box: BoundingBox::new(100, 100, 300, 300),
                rotation: Rotation::Deg0,
            },
            &PassportConfig::default(),
        )
        .unwrap();
        assert!(verdict.is_authentic(), "{verdict:?}");
    }
}
