use std::sync::Arc;

use passport_core::scan::ScanTicket;
use passport_core::traits::{BarcodeDecoder, FrameSink};
use tokio::sync::Semaphore;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::messages::{DomainMessage, FrameAck};

/// Drains the latest-frame slot for one camera session. Frames are decoded
/// one at a time and every completion is posted back tagged with `ticket`;
/// whether it still counts is decided when `update` consumes it.
///
/// The next frame is not taken until the [`FrameAck`] of the previous one
/// is released, so frames arriving meanwhile collapse in the slot.
pub fn spawn_scan_worker(
    slot: FrameSink,
    ticket: ScanTicket,
    decoder: Arc<dyn BarcodeDecoder>,
    tx: UnboundedSender<DomainMessage>,
) -> JoinHandle<()> {
    let gate = Arc::new(Semaphore::new(1));
    tokio::spawn(async move {
        let mut decoded = 0u64;
        loop {
            let Ok(permit) = Arc::clone(&gate).acquire_owned().await else {
                break;
            };
            let Some(frame) = slot.recv().await else {
                break;
            };
            match decoder.decode(&frame).await {
                Ok(detections) => {
                    decoded += 1;
                    trace!(count = detections.len(), "Frame decoded");
                    let message = DomainMessage::ScanDecoded {
                        ticket,
                        frame,
                        detections,
                        ack: FrameAck::new(permit),
                    };
                    if tx.send(message).is_err() {
                        break;
                    }
                }
                Err(err) => debug!(%err, "Decode failed, frame dropped"),
            }
        }
        debug!(
            session = %ticket.session(),
            decoded,
            superseded = slot.superseded(),
            "Scan worker finished"
        );
    })
}
