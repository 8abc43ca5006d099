//! Async shell around [`update`].
//!
//! One loop owns [`State`] and applies messages in arrival order. The scan
//! worker, store reads and attendance calls run as tokio tasks and report
//! back through the same channel, so none of them touch state directly.

pub mod scan_worker;

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use passport_core::attendance::AttendanceFlow;
use passport_core::constants::attendance::{
    EVENTS_COLLECTION, LEADERS_COLLECTION,
};
use passport_core::scan::{LatestFrameSlot, ScanTicket};
use passport_core::traits::{
    BarcodeDecoder, DocumentStore, FrameSink, FrameSource, IdentityProvider,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

pub use scan_worker::spawn_scan_worker;

use crate::messages::{DomainMessage, Effect};
use crate::state::State;
use crate::update::update;
use crate::views::Screen;

/// Animation tick period.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Collaborators the runtime calls on behalf of `update`.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub decoder: Arc<dyn BarcodeDecoder>,
    pub attendance: AttendanceFlow,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("attendance", &self.attendance)
            .finish_non_exhaustive()
    }
}

struct Capture {
    ticket: ScanTicket,
    slot: FrameSink,
    worker: JoinHandle<()>,
}

pub struct Runtime {
    state: State,
    services: Services,
    camera: Box<dyn FrameSource>,
    capture: Option<Capture>,
    tx: UnboundedSender<DomainMessage>,
    rx: UnboundedReceiver<DomainMessage>,
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("mode", &self.state.navigation.mode())
            .field("scan", &self.state.scan.phase())
            .field("capturing", &self.capture.is_some())
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(
        state: State,
        services: Services,
        camera: Box<dyn FrameSource>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            services,
            camera,
            capture: None,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        Screen::capture(&self.state)
    }

    /// Handle for producers outside the loop (input, platform callbacks).
    pub fn sender(&self) -> UnboundedSender<DomainMessage> {
        self.tx.clone()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Publish the signed-in user and load both lists.
    pub fn bootstrap(&mut self) -> Vec<Effect> {
        let user = self.services.identity.current_user();
        info!(
            signed_in = user.is_some(),
            "Starting Passport client"
        );
        let surfaced = self.dispatch(DomainMessage::SessionChanged(user));

        let store = Arc::clone(&self.services.store);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let (events, leaders) = futures::join!(
                store.list(EVENTS_COLLECTION),
                store.list(LEADERS_COLLECTION)
            );
            let _ = tx.send(DomainMessage::EventsLoaded(
                events.map_err(|e| e.to_string()),
            ));
            let _ = tx.send(DomainMessage::LeadersLoaded(
                leaders.map_err(|e| e.to_string()),
            ));
        });
        surfaced
    }

    /// Apply one message. Internal effects are carried out here; the ones
    /// the host must handle are returned.
    pub fn dispatch(&mut self, message: DomainMessage) -> Vec<Effect> {
        if !matches!(message, DomainMessage::Tick) {
            trace!(message = message.name(), "Dispatch");
        }
        let effects = update(&mut self.state, message, Instant::now());
        let mut surfaced = Vec::new();
        for effect in effects {
            if effect.is_host_facing() {
                surfaced.push(effect);
            } else {
                self.perform(effect);
            }
        }
        surfaced
    }

    /// Drive the loop: queued messages in order, plus an animation tick.
    /// `host` is called after every message with the surfaced effects
    /// (often none) and may stop the loop.
    pub async fn run<F>(&mut self, mut host: F)
    where
        F: FnMut(&State, Vec<Effect>) -> ControlFlow<()>,
    {
        let mut ticker = tokio::time::interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            let message = tokio::select! {
                Some(message) = self.rx.recv() => message,
                _ = ticker.tick() => DomainMessage::Tick,
            };
            let surfaced = self.dispatch(message);
            if host(&self.state, surfaced).is_break() {
                return;
            }
        }
    }

    /// Release the camera and its worker.
    pub fn shutdown(&mut self) {
        self.stop_capture();
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::StartCamera(ticket) => self.start_capture(ticket),
            Effect::StopCamera => self.stop_capture(),
            Effect::LoadEvents => {
                let store = Arc::clone(&self.services.store);
                self.spawn(async move {
                    DomainMessage::EventsLoaded(
                        store
                            .list(EVENTS_COLLECTION)
                            .await
                            .map_err(|e| e.to_string()),
                    )
                });
            }
            Effect::LoadLeaderboard => {
                let store = Arc::clone(&self.services.store);
                self.spawn(async move {
                    DomainMessage::LeadersLoaded(
                        store
                            .list(LEADERS_COLLECTION)
                            .await
                            .map_err(|e| e.to_string()),
                    )
                });
            }
            Effect::LoadProfile(student_id) => {
                let store = Arc::clone(&self.services.store);
                self.spawn(async move {
                    DomainMessage::ProfileLoaded(
                        store
                            .get(LEADERS_COLLECTION, student_id.as_str())
                            .await
                            .map_err(|e| e.to_string()),
                    )
                });
            }
            Effect::SaveProfile {
                student_id,
                fields,
                draft,
            } => {
                let store = Arc::clone(&self.services.store);
                self.spawn(async move {
                    let saved = store
                        .merge(LEADERS_COLLECTION, student_id.as_str(), fields)
                        .await
                        .map(|()| draft)
                        .map_err(|e| e.to_string());
                    DomainMessage::ProfileSaved(saved)
                });
            }
            Effect::SubmitAttendance(event_id) => {
                let flow = self.services.attendance.clone();
                self.spawn(async move {
                    DomainMessage::AttendanceFinished(flow.submit(&event_id).await)
                });
            }
            other => debug!(effect = ?other, "Host effect reached perform"),
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: std::future::Future<Output = DomainMessage> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    fn start_capture(&mut self, ticket: ScanTicket) {
        if let Some(capture) = &self.capture {
            if capture.ticket == ticket {
                return;
            }
            self.stop_capture();
        }

        let slot: FrameSink = Arc::new(LatestFrameSlot::new());
        if let Err(err) = self.camera.start(Arc::clone(&slot)) {
            warn!(%err, "Camera failed to start");
            let _ = self.tx.send(DomainMessage::CameraUnavailable(err.to_string()));
            return;
        }
        let worker = spawn_scan_worker(
            Arc::clone(&slot),
            ticket,
            Arc::clone(&self.services.decoder),
            self.tx.clone(),
        );
        info!(session = %ticket.session(), "Camera started");
        self.capture = Some(Capture {
            ticket,
            slot,
            worker,
        });
    }

    fn stop_capture(&mut self) {
        let Some(capture) = self.capture.take() else {
            return;
        };
        self.camera.stop();
        // The worker ends once the slot is closed and drained.
        drop(capture.slot.close());
        debug!(
            session = %capture.ticket.session(),
            finished = capture.worker.is_finished(),
            "Camera stopped"
        );
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.stop_capture();
    }
}
