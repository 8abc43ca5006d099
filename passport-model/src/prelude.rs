//! Common imports for crates built on the Passport model.

pub use crate::attendance::{
    AttendanceReply, AttendanceRequest, AttendanceResponse, BearerToken,
};
pub use crate::barcode::{BarcodeFormat, Detection};
pub use crate::documents::{Document, EventDocument, LeaderDocument};
pub use crate::error::{ModelError, Result as ModelResult};
pub use crate::frame::{LumaFrame, OwnedLumaFrame};
pub use crate::geometry::{BoundingBox, Point, Rotation};
pub use crate::ids::{EventId, StudentId, extract_event_id};
pub use crate::panel::{
    DragAxis, PanelLayout, PanelMode, Translation, Viewport,
};
pub use crate::profile::{AddressParts, DirtyFields, ProfileFields};
