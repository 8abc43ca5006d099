pub mod config;
pub mod controller;
pub mod easing;
pub mod gesture;
pub mod messages;
pub mod placement;
pub mod settle;
pub mod tap_guard;

// Re-export primary types for convenience
pub use config::NavigationConfig;
pub use controller::NavigationController;
pub use easing::EasingKind;
pub use gesture::GestureState;
pub use messages::{
    NavigationSignal, PointerEvent, PointerOutcome, PointerPhase,
    SettleComplete,
};
pub use placement::place;
pub use settle::SettleAnimation;
pub use tap_guard::TapGuard;
