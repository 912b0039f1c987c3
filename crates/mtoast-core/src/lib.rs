#![forbid(unsafe_code)]

//! Core: toast vocabulary, validation, identifiers, events, and the
//! capability traits a rendering surface must provide.

pub mod config;
pub mod error;
pub mod event;
pub mod id;
pub mod logging;
pub mod markup;
pub mod surface;
pub mod validate;

pub use config::{
    AnimationDirection, ConfigChanges, HorizontalAnchor, ResolvedOptions, ToastConfig,
    ToastConfigPatch, ToastOptions, ToastPosition, ToastType, UnknownToken, VerticalAnchor,
};
pub use error::{ListenerError, Result, ToastError};
pub use event::{EventBus, ListenerId, ToastEvent};
pub use id::ToastId;
pub use markup::escape_html;
pub use surface::{
    Document, DomEventKind, FrameHandle, ListenerHandle, Millis, NodeId, OwnerId, ScheduledTask,
    Scheduler, SharedSurface, Surface, TaskKind, TimerHandle, share,
};
pub use validate::{validate_config, validate_toast_options};

// Without the feature the no-op macros are already at the crate root.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
