//! The single place where [`State`] changes.
//!
//! `update` runs on the runtime's serialization point, so navigation, scan
//! judging and dialog handling never race each other. Anything slow is
//! returned as an [`Effect`] for the runtime to carry out.

use std::time::Instant;

use passport_core::attendance::{AttendanceError, AttendanceOutcome};
use passport_core::navigation::{NavigationSignal, SettleComplete};
use passport_core::scan::{ScanOutcome, ScanTicket};
use passport_core::traits::CameraFrame;
use passport_model::{Detection, PanelMode};
use tracing::{debug, info, warn};

use crate::messages::{Dialog, DomainMessage, Effect};
use crate::state::State;
use crate::views::floating_target;

const CAMERA_DENIED: &str = "Camera permission denied";

pub fn update(
    state: &mut State,
    message: DomainMessage,
    now: Instant,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    match message {
        DomainMessage::Pointer(event) => {
            let outcome = state.navigation.handle_pointer(event);
            if outcome.cancel_children {
                effects.push(Effect::CancelChildren);
            }
            if !outcome.intercepted {
                effects.push(Effect::ForwardPointer(event));
            }
        }
        DomainMessage::Tick => {
            if let Some(done) = state.navigation.tick(now) {
                on_settled(state, done, &mut effects);
            }
            state.scan.tick(now);
        }
        DomainMessage::ViewportResized(viewport) => {
            state.navigation.set_viewport(viewport);
        }
        DomainMessage::ListScrolled {
            first_visible,
            visible,
            total,
        } => {
            state
                .navigation
                .update_list_scroll(first_visible, visible, total);
        }
        DomainMessage::HeaderNav(mode) => {
            if !state.navigation.should_suppress_tap(now) {
                state.navigation.navigate_to(mode, now);
            }
        }
        DomainMessage::FloatingNavTapped => {
            if !state.navigation.should_suppress_tap(now) {
                let target = floating_target(state.navigation.mode());
                state.navigation.navigate_to(target, now);
            }
        }
        DomainMessage::BackPressed => {
            if !state.navigation.back(now) {
                effects.push(Effect::Exit);
            }
        }

        DomainMessage::SessionChanged(user) => {
            let student_id = user.as_ref().and_then(|u| u.student_id());
            state.profile.set_student(student_id.clone());
            state.user = user;
            match student_id {
                Some(id) => effects.push(Effect::LoadProfile(id)),
                None => state.profile.load(None),
            }
        }
        DomainMessage::SignOutRequested => {
            state.user = None;
            state.profile.set_student(None);
            effects.push(Effect::SignOut);
            effects.push(Effect::OpenSignIn);
        }
        DomainMessage::AccountSettingsRequested => {
            if let Some(url) = state.account_url.clone() {
                effects.push(Effect::OpenUrl(url));
            }
        }

        DomainMessage::EventsLoaded(result) => match result {
            Ok(docs) => state.events.replace(&docs),
            Err(message) => effects.push(Effect::Toast(message)),
        },
        DomainMessage::LeadersLoaded(result) => match result {
            Ok(docs) => state.leaderboard.replace(&docs),
            Err(message) => effects.push(Effect::Toast(message)),
        },
        DomainMessage::ProfileLoaded(result) => match result {
            Ok(doc) => state.profile.load(doc.as_ref()),
            Err(message) => warn!(%message, "Profile load failed"),
        },
        DomainMessage::EventTapped(index) => {
            if !state.navigation.should_suppress_tap(now) {
                effects.extend(state.events.tap(index));
            }
        }
        DomainMessage::EventLongPressed(index) => {
            if !state.navigation.should_suppress_tap(now) {
                effects.extend(state.events.long_press(index));
            }
        }
        DomainMessage::ProfileEdited(field, value) => {
            state.profile.edit(field, value);
        }
        DomainMessage::SaveProfileRequested => {
            if let Some((student_id, fields)) = state.profile.begin_save() {
                effects.push(Effect::SaveProfile {
                    student_id,
                    fields,
                    draft: state.profile.edited().clone(),
                });
            }
        }
        DomainMessage::ProfileSaved(result) => match result {
            Ok(saved) => {
                state.profile.finish_save(Some(saved));
                effects.push(Effect::Toast("Profile saved".to_string()));
            }
            Err(message) => {
                state.profile.finish_save(None);
                effects.push(Effect::Toast(format!("Save failed: {message}")));
            }
        },

        DomainMessage::ScannerTapped => {
            if !state.navigation.should_suppress_tap(now)
                && state.navigation.mode() == PanelMode::Scanner
                && !state.scan.is_active()
            {
                effects.push(Effect::StartCamera(state.scan.start()));
            }
        }
        DomainMessage::CameraUnavailable(reason) => {
            warn!(%reason, "Camera unavailable");
            if state.scan.stop() {
                effects.push(Effect::StopCamera);
            }
            effects.push(Effect::Toast(CAMERA_DENIED.to_string()));
            state.navigation.navigate_to(PanelMode::List, now);
        }
        DomainMessage::ScanDecoded {
            ticket,
            frame,
            detections,
            ack,
        } => {
            on_scan_decoded(state, ticket, &frame, &detections, now, &mut effects);
            ack.release();
        }
        DomainMessage::AttendanceFinished(result) => {
            state.attending = false;
            on_attendance(state, result, &mut effects);
        }
        DomainMessage::DialogDismissed => {
            if state.dialog.take().is_some() {
                state.navigation.navigate_to(PanelMode::List, now);
            }
        }
    }
    effects
}

/// Camera follows the panel: on when the scanner lands, off when leaving it.
fn on_settled(state: &mut State, done: SettleComplete, effects: &mut Vec<Effect>) {
    match done.signal {
        Some(NavigationSignal::StartCamera) => {
            effects.push(Effect::StartCamera(state.scan.start()));
        }
        Some(NavigationSignal::StopCamera) => {
            if state.scan.stop() {
                effects.push(Effect::StopCamera);
            }
        }
        None => {}
    }

    match done.mode {
        PanelMode::List => effects.push(Effect::LoadEvents),
        PanelMode::Leaderboard => effects.push(Effect::LoadLeaderboard),
        PanelMode::Profile => {
            if let Some(id) = state.profile.student_id() {
                effects.push(Effect::LoadProfile(id.clone()));
            }
        }
        PanelMode::Scanner => {}
    }
}

fn on_scan_decoded(
    state: &mut State,
    ticket: ScanTicket,
    frame: &CameraFrame,
    detections: &[Detection],
    now: Instant,
    effects: &mut Vec<Effect>,
) {
    let luma = match frame.luma.view() {
        Ok(luma) => luma,
        Err(err) => {
            warn!(%err, "Dropping malformed camera frame");
            return;
        }
    };

    match state
        .scan
        .on_decoded(ticket, &luma, detections, frame.rotation, now)
    {
        ScanOutcome::Ignored | ScanOutcome::NoCode | ScanOutcome::Rejected(_) => {}
        ScanOutcome::Accepted(scan) => {
            info!(session = %scan.session, event_id = %scan.event_id, "Submitting attendance");
            // Release the camera now; the settle back to the hub follows.
            effects.push(Effect::StopCamera);
            state.navigation.navigate_to(PanelMode::List, now);
            state.attending = true;
            effects.push(Effect::SubmitAttendance(scan.event_id));
        }
    }
}

fn on_attendance(
    state: &mut State,
    result: Result<AttendanceOutcome, AttendanceError>,
    effects: &mut Vec<Effect>,
) {
    match result {
        Ok(outcome) => {
            effects.push(Effect::Toast(outcome.notice()));
            if let AttendanceOutcome::Confirmed { title, .. } = outcome {
                effects.push(Effect::OpenConfirmation { title });
            }
        }
        Err(err) if err.wants_dialog() => {
            debug!(%err, "Attendance failed");
            state.dialog = Some(Dialog::error(err.to_string()));
        }
        Err(err) => {
            effects.push(Effect::Toast(err.to_string()));
            effects.push(Effect::OpenSignIn);
        }
    }
}
