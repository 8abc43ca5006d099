//! In-process implementations of the collaborator traits. Used by the CLI,
//! by tests, and as stand-ins where no platform backend is wired.

pub mod memory_store;
pub mod static_decoder;
pub mod static_identity;
pub mod still_camera;

pub use memory_store::MemoryDocumentStore;
pub use static_decoder::StaticDecoder;
pub use static_identity::StaticIdentity;
pub use still_camera::StillFrameSource;
