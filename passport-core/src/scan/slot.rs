//! Single-slot "latest wins" hand-off between the camera thread and the
//! scan worker.

use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Debug)]
struct SlotState<T> {
    pending: Option<T>,
    closed: bool,
    superseded: u64,
}

/// Holds at most one undelivered frame. A newer frame replaces the pending
/// one, which is handed back to the producer to release.
#[derive(Debug)]
pub struct LatestFrameSlot<T> {
    state: Mutex<SlotState<T>>,
    notify: Notify,
}

impl<T> Default for LatestFrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestFrameSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                pending: None,
                closed: false,
                superseded: 0,
            }),
            notify: Notify::new(),
        }
    }

    /// Store `frame`, returning the undelivered frame it replaced. Once the
    /// slot is closed the frame is handed straight back.
    pub fn offer(&self, frame: T) -> Option<T> {
        let mut state = self.state.lock();
        if state.closed {
            return Some(frame);
        }
        let previous = state.pending.replace(frame);
        if previous.is_some() {
            state.superseded += 1;
        }
        drop(state);
        self.notify.notify_one();
        previous
    }

    pub fn try_take(&self) -> Option<T> {
        self.state.lock().pending.take()
    }

    /// Wait for the next frame. `None` once the slot is closed and drained.
    pub async fn recv(&self) -> Option<T> {
        loop {
            {
                let mut state = self.state.lock();
                if let Some(frame) = state.pending.take() {
                    return Some(frame);
                }
                if state.closed {
                    return None;
                }
            }
            self.notify.notified().await;
        }
    }

    /// Stop accepting frames and wake the receiver. The pending frame, if
    /// any, is returned for release.
    pub fn close(&self) -> Option<T> {
        let mut state = self.state.lock();
        state.closed = true;
        let pending = state.pending.take();
        drop(state);
        self.notify.notify_waiters();
        self.notify.notify_one();
        pending
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Frames replaced before the worker got to them.
    pub fn superseded(&self) -> u64 {
        self.state.lock().superseded
    }
}
