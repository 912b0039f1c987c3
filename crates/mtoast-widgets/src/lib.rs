#![forbid(unsafe_code)]

//! Toast widgets: the element builder, stacking, the shared container, and
//! the lifecycle manager that ties them to a surface.

pub mod builder;
pub mod container;
pub mod manager;
mod record;
pub mod stack;
pub mod theme;

pub use builder::{AnimationFlags, BorderSegment, BuiltToast, ToastBuilder, ToastContent, build_toast};
pub use container::ToastContainer;
pub use manager::{EXIT_DURATION_MS, RESUME_GRACE_MS, ToastManager};
pub use record::{TimerPurpose, ToastSnapshot};
pub use stack::{StackGeometry, StackSlot, compute_stack};
pub use theme::{AriaRole, IconSet, TypeStyle};
