#![forbid(unsafe_code)]

//! Error taxonomy.
//!
//! Validation failures are returned synchronously before any state changes.
//! Listener failures never leave the event bus: they are captured as
//! [`ListenerError`] values, logged, and counted.

use core::fmt;

use crate::event::ToastEvent;

/// Errors returned by toast operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastError {
    /// A per-toast option is out of range or not a recognized token.
    InvalidOption(String),
    /// A configuration field is out of range or not a recognized token.
    InvalidConfig(String),
    /// The manager was destroyed and can no longer show toasts.
    Destroyed,
}

impl fmt::Display for ToastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOption(msg) => write!(f, "invalid toast option: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid toast config: {msg}"),
            Self::Destroyed => f.write_str("toast manager has been destroyed"),
        }
    }
}

impl std::error::Error for ToastError {}

/// Standard result type for toast APIs.
pub type Result<T> = std::result::Result<T, ToastError>;

/// A subscriber that panicked while an event was being emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerError {
    /// Event being emitted when the listener failed.
    pub event: ToastEvent,
    /// Message extracted from the panic payload.
    pub message: String,
}

impl ListenerError {
    pub(crate) fn from_panic(event: ToastEvent, payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self { event, message }
    }
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} listener failed: {}", self.event, self.message)
    }
}

impl std::error::Error for ListenerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_field() {
        let err = ToastError::InvalidOption("autoDismiss must be a non-negative number".into());
        assert_eq!(
            err.to_string(),
            "invalid toast option: autoDismiss must be a non-negative number"
        );
        assert_eq!(
            ToastError::Destroyed.to_string(),
            "toast manager has been destroyed"
        );
    }

    #[test]
    fn listener_error_from_str_and_string_payloads() {
        let a = ListenerError::from_panic(ToastEvent::Show, Box::new("boom"));
        assert_eq!(a.message, "boom");
        let b = ListenerError::from_panic(ToastEvent::Dismiss, Box::new(String::from("bang")));
        assert_eq!(b.message, "bang");
        assert_eq!(b.to_string(), "dismiss listener failed: bang");
        let c = ListenerError::from_panic(ToastEvent::Show, Box::new(42_u8));
        assert_eq!(c.message, "unknown panic");
    }
}
