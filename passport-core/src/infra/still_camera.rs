use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::error::{CoreError, Result};
use crate::traits::{CameraFrame, FrameSink, FrameSource};

/// Camera stand-in that cycles through a fixed list of frames on its own
/// thread, like a device delivering on a capture thread.
#[derive(Debug)]
pub struct StillFrameSource {
    frames: Arc<Vec<CameraFrame>>,
    interval: Duration,
    running: Option<Capture>,
}

#[derive(Debug)]
struct Capture {
    alive: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl StillFrameSource {
    pub fn new(frames: Vec<CameraFrame>, interval: Duration) -> Self {
        Self {
            frames: Arc::new(frames),
            interval,
            running: None,
        }
    }
}

impl FrameSource for StillFrameSource {
    fn start(&mut self, sink: FrameSink) -> Result<()> {
        if self.running.is_some() {
            return Ok(());
        }
        if self.frames.is_empty() {
            return Err(CoreError::Camera("no frames to replay".into()));
        }

        let alive = Arc::new(AtomicBool::new(true));
        let frames = Arc::clone(&self.frames);
        let interval = self.interval;
        let flag = Arc::clone(&alive);

        let handle = std::thread::Builder::new()
            .name("still-camera".into())
            .spawn(move || {
                let mut delivered = 0u64;
                for frame in frames.iter().cycle() {
                    if !flag.load(Ordering::Acquire) || sink.is_closed() {
                        break;
                    }
                    // Superseded frames are released right here.
                    drop(sink.offer(frame.clone()));
                    delivered += 1;
                    std::thread::sleep(interval);
                }
                debug!(delivered, "Still camera stopped");
            })
            .map_err(|e| CoreError::Camera(format!("capture thread: {e}")))?;

        self.running = Some(Capture { alive, handle });
        Ok(())
    }

    fn stop(&mut self) {
        let Some(capture) = self.running.take() else {
            return;
        };
        capture.alive.store(false, Ordering::Release);
        // Detached: the thread sees the flag once its current sleep ends.
        debug!(
            finished = capture.handle.is_finished(),
            "Still camera stop requested"
        );
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for StillFrameSource {
    fn drop(&mut self) {
        self.stop();
    }
}
