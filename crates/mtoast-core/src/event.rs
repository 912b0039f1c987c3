#![forbid(unsafe_code)]

//! Lifecycle notifications.
//!
//! [`EventBus`] is a small typed publish/subscribe registry. Subscribers are
//! called in registration order and each one runs inside its own unwind
//! boundary: a panicking subscriber is reported as a [`ListenerError`] and
//! the remaining subscribers still run.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Subscriber panics | Bug in host callback | Logged at `warn`, returned from [`EventBus::emit`], emission continues |
//! | `off` with stale id | Already removed | Returns `false` |

use core::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::{Deserialize, Serialize};

use crate::error::ListenerError;

/// Lifecycle event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastEvent {
    /// A toast became visible.
    Show,
    /// A toast started its exit transition.
    Dismiss,
}

impl ToastEvent {
    /// Event name as hosts spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Dismiss => "dismiss",
        }
    }
}

impl fmt::Display for ToastEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

type Callback<T> = Box<dyn FnMut(&T)>;

struct Subscription<T> {
    event: ToastEvent,
    id: ListenerId,
    callback: Callback<T>,
}

/// Typed publish/subscribe registry for [`ToastEvent`]s carrying `T`.
pub struct EventBus<T> {
    subscriptions: Vec<Subscription<T>>,
    next_id: u64,
    failures: u64,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 1,
            failures: 0,
        }
    }
}

impl<T> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .field("failures", &self.failures)
            .finish()
    }
}

impl<T> EventBus<T> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `callback` to `event`.
    pub fn on(&mut self, event: ToastEvent, callback: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            event,
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Unsubscribe. Returns whether a subscription was removed.
    pub fn off(&mut self, event: ToastEvent, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions
            .retain(|sub| !(sub.event == event && sub.id == id));
        self.subscriptions.len() != before
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    /// Number of subscribers for `event`.
    #[must_use]
    pub fn listener_count(&self, event: ToastEvent) -> usize {
        self.subscriptions
            .iter()
            .filter(|sub| sub.event == event)
            .count()
    }

    /// Total subscriber panics caught since creation.
    #[must_use]
    pub const fn failure_count(&self) -> u64 {
        self.failures
    }

    /// Call every subscriber of `event` with `payload`.
    ///
    /// Panics are isolated per subscriber and returned.
    pub fn emit(&mut self, event: ToastEvent, payload: &T) -> Vec<ListenerError> {
        let mut errors = Vec::new();
        for sub in self.subscriptions.iter_mut().filter(|s| s.event == event) {
            let callback = &mut sub.callback;
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| callback(payload))) {
                let err = ListenerError::from_panic(event, panic);
                crate::warn!(
                    event = %event,
                    listener = sub.id.get(),
                    message = %err.message,
                    "toast listener failed"
                );
                errors.push(err);
            }
        }
        self.failures += errors.len() as u64;
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn FnMut(&u32)>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |tag: &'static str| -> Box<dyn FnMut(&u32)> {
            let sink = Rc::clone(&sink);
            Box::new(move |n: &u32| sink.borrow_mut().push(format!("{tag}:{n}")))
        };
        (log, make)
    }

    #[test]
    fn emits_in_registration_order_to_matching_event_only() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        bus.on(ToastEvent::Show, make("a"));
        bus.on(ToastEvent::Dismiss, make("x"));
        bus.on(ToastEvent::Show, make("b"));

        let errors = bus.emit(ToastEvent::Show, &7);
        assert!(errors.is_empty());
        assert_eq!(*log.borrow(), vec!["a:7", "b:7"]);
    }

    #[test]
    fn off_removes_only_the_named_subscription() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        let a = bus.on(ToastEvent::Show, make("a"));
        bus.on(ToastEvent::Show, make("b"));

        assert!(!bus.off(ToastEvent::Dismiss, a));
        assert!(bus.off(ToastEvent::Show, a));
        assert!(!bus.off(ToastEvent::Show, a));
        bus.emit(ToastEvent::Show, &1);
        assert_eq!(*log.borrow(), vec!["b:1"]);
        assert_eq!(bus.listener_count(ToastEvent::Show), 1);
    }

    #[test]
    fn panicking_listener_does_not_stop_the_rest() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        bus.on(ToastEvent::Dismiss, |_: &u32| panic!("listener exploded"));
        bus.on(ToastEvent::Dismiss, make("after"));

        let errors = bus.emit(ToastEvent::Dismiss, &3);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, ToastEvent::Dismiss);
        assert_eq!(errors[0].message, "listener exploded");
        assert_eq!(*log.borrow(), vec!["after:3"]);
        assert_eq!(bus.failure_count(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        bus.on(ToastEvent::Show, make("a"));
        bus.clear();
        bus.emit(ToastEvent::Show, &1);
        assert!(log.borrow().is_empty());
        assert_eq!(bus.listener_count(ToastEvent::Show), 0);
    }
}
