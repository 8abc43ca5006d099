//! Core data model definitions shared across Passport crates.
#![allow(missing_docs)]

pub mod attendance;
pub mod barcode;
pub mod documents;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod ids;
pub mod panel;
pub mod prelude;
pub mod profile;
pub mod urls;

// Intentionally curated re-exports for downstream consumers.
pub use attendance::{
    AttendanceReply, AttendanceRequest, AttendanceResponse, BearerToken,
};
pub use barcode::{BarcodeFormat, Detection};
pub use documents::{Document, EventDocument, LeaderDocument};
pub use error::{ModelError, Result as ModelResult};
pub use frame::{LumaFrame, OwnedLumaFrame};
pub use geometry::{BoundingBox, Point, Rotation};
pub use ids::{EventId, StudentId, extract_event_id};
pub use panel::{DragAxis, PanelLayout, PanelMode, Translation, Viewport};
pub use profile::{AddressParts, DirtyFields, ProfileFields};
pub use urls::{is_navigable_link, parse_navigable_link};
