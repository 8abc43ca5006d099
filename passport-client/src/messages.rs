//! Messages consumed by [`update`](crate::update::update) and the effects it
//! hands back to the runtime.

use std::fmt;
use std::sync::Arc;

use passport_core::attendance::{AttendanceError, AttendanceOutcome};
use passport_core::navigation::PointerEvent;
use passport_core::scan::ScanTicket;
use passport_core::traits::{CameraFrame, SignedInUser};
use passport_model::{
    Detection, Document, PanelMode, ProfileFields, StudentId, Viewport,
};
use serde_json::{Map, Value};
use tokio::sync::OwnedSemaphorePermit;
use url::Url;

use crate::views::events::EventDetail;
use crate::views::profile::ProfileField;

/// Everything that can change [`State`](crate::state::State). Producers on
/// other threads post these to the runtime channel; they are applied one at
/// a time.
#[derive(Debug, Clone)]
pub enum DomainMessage {
    // Navigation
    Pointer(PointerEvent),
    /// Animation frame.
    Tick,
    ViewportResized(Viewport),
    ListScrolled {
        first_visible: usize,
        visible: usize,
        total: usize,
    },
    HeaderNav(PanelMode),
    FloatingNavTapped,
    BackPressed,

    // Session
    SessionChanged(Option<SignedInUser>),
    SignOutRequested,
    AccountSettingsRequested,

    // Data
    EventsLoaded(Result<Vec<Document>, String>),
    LeadersLoaded(Result<Vec<Document>, String>),
    ProfileLoaded(Result<Option<Document>, String>),
    EventTapped(usize),
    EventLongPressed(usize),
    ProfileEdited(ProfileField, String),
    SaveProfileRequested,
    ProfileSaved(Result<ProfileFields, String>),

    // Scanner
    ScannerTapped,
    CameraUnavailable(String),
    ScanDecoded {
        ticket: ScanTicket,
        frame: CameraFrame,
        detections: Vec<Detection>,
        /// Keeps the worker from decoding the next frame until `update`
        /// has judged this one.
        ack: FrameAck,
    },
    AttendanceFinished(Result<AttendanceOutcome, AttendanceError>),
    DialogDismissed,
}

impl DomainMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pointer(_) => "Pointer",
            Self::Tick => "Tick",
            Self::ViewportResized(_) => "ViewportResized",
            Self::ListScrolled { .. } => "ListScrolled",
            Self::HeaderNav(_) => "HeaderNav",
            Self::FloatingNavTapped => "FloatingNavTapped",
            Self::BackPressed => "BackPressed",
            Self::SessionChanged(_) => "SessionChanged",
            Self::SignOutRequested => "SignOutRequested",
            Self::AccountSettingsRequested => "AccountSettingsRequested",
            Self::EventsLoaded(_) => "EventsLoaded",
            Self::LeadersLoaded(_) => "LeadersLoaded",
            Self::ProfileLoaded(_) => "ProfileLoaded",
            Self::EventTapped(_) => "EventTapped",
            Self::EventLongPressed(_) => "EventLongPressed",
            Self::ProfileEdited(..) => "ProfileEdited",
            Self::SaveProfileRequested => "SaveProfileRequested",
            Self::ProfileSaved(_) => "ProfileSaved",
            Self::ScannerTapped => "ScannerTapped",
            Self::CameraUnavailable(_) => "CameraUnavailable",
            Self::ScanDecoded { .. } => "ScanDecoded",
            Self::AttendanceFinished(_) => "AttendanceFinished",
            Self::DialogDismissed => "DialogDismissed",
        }
    }
}

/// Analysis slot held by a decoded frame. The scan worker waits for it to
/// be dropped before taking another frame, so at most one frame is between
/// decode and judgement at a time.
#[derive(Clone)]
pub struct FrameAck(Option<Arc<OwnedSemaphorePermit>>);

impl FrameAck {
    pub fn new(permit: OwnedSemaphorePermit) -> Self {
        Self(Some(Arc::new(permit)))
    }

    /// Ack not tied to any worker.
    pub fn detached() -> Self {
        Self(None)
    }

    /// Let the worker move on to the next frame.
    pub fn release(self) {}
}

impl fmt::Debug for FrameAck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FrameAck")
            .field(&if self.0.is_some() { "held" } else { "detached" })
            .finish()
    }
}

/// Work requested by `update`. The runtime performs the internal ones
/// (camera, store, attendance) and surfaces the rest to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartCamera(ScanTicket),
    StopCamera,
    LoadEvents,
    LoadLeaderboard,
    LoadProfile(StudentId),
    SaveProfile {
        student_id: StudentId,
        fields: Map<String, Value>,
        draft: ProfileFields,
    },
    /// Extracted event id, not yet validated.
    SubmitAttendance(String),

    /// A drag was just taken over: children that saw the earlier events
    /// get a synthetic cancel. Raised at most once per gesture.
    CancelChildren,
    /// Hand the event on to the touched child; the panels did not consume it.
    ForwardPointer(PointerEvent),
    OpenUrl(Url),
    OpenEventDetail(EventDetail),
    OpenConfirmation { title: String },
    OpenSignIn,
    SignOut,
    Toast(String),
    /// Back pressed on the hub; the host decides how to exit.
    Exit,
}

impl Effect {
    /// Effects the host platform has to carry out.
    pub fn is_host_facing(&self) -> bool {
        matches!(
            self,
            Self::CancelChildren
                | Self::ForwardPointer(_)
                | Self::OpenUrl(_)
                | Self::OpenEventDetail(_)
                | Self::OpenConfirmation { .. }
                | Self::OpenSignIn
                | Self::SignOut
                | Self::Toast(_)
                | Self::Exit
        )
    }
}

/// Modal shown over the panels. Dismissing it returns to the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}
