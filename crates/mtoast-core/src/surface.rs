#![forbid(unsafe_code)]

//! Rendering-surface capabilities.
//!
//! The toast machinery never touches a concrete page. It talks to a
//! [`Document`] for element structure and to a [`Scheduler`] for time, and a
//! host provides both (usually as one value implementing [`Surface`]).
//!
//! Scheduled work is data, not closures: a [`ScheduledTask`] names the
//! manager that owns it and what should happen. The owner drains its due
//! tasks with [`Scheduler::next_due`] and runs them itself, which keeps the
//! surface free of back-references into managers.
//!
//! # Invariants
//!
//! 1. Handles are never reused within one surface.
//! 2. A cleared timer or cancelled frame is never returned by `next_due`.
//! 3. `next_due` yields tasks in `(deadline, scheduling order)` order and
//!    never moves the clock backwards.
//! 4. Lookups on a detached or unknown node return `None`/empty rather than
//!    failing.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::id::ToastId;

/// Milliseconds on the surface clock.
pub type Millis = u64;

macro_rules! raw_handle {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name($inner);

        impl $name {
            /// Wrap a surface-assigned value.
            #[must_use]
            pub const fn from_raw(raw: $inner) -> Self {
                Self(raw)
            }

            /// Surface-assigned value.
            #[must_use]
            pub const fn raw(self) -> $inner {
                self.0
            }
        }
    };
}

raw_handle!(
    /// Opaque element handle.
    NodeId(u32)
);
raw_handle!(
    /// Registered event listener.
    ListenerHandle(u64)
);
raw_handle!(
    /// Pending timeout.
    TimerHandle(u64)
);
raw_handle!(
    /// Pending next-paint callback.
    FrameHandle(u64)
);

/// Identity of one task owner (one manager) on a shared surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocate a process-unique owner id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Pointer and click events a toast reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventKind {
    /// Primary button activation.
    Click,
    /// Pointer entered the element.
    PointerEnter,
    /// Pointer left the element.
    PointerLeave,
}

impl DomEventKind {
    /// DOM event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
        }
    }
}

impl fmt::Display for DomEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a scheduled task does when it comes due.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Flip a freshly attached toast to visible.
    Reveal(ToastId),
    /// Auto-dismiss countdown expired.
    AutoDismiss(ToastId),
    /// Exit transition finished; detach and forget the toast.
    Detach(ToastId),
}

impl TaskKind {
    /// Toast the task targets.
    #[must_use]
    pub fn toast(&self) -> &ToastId {
        match self {
            Self::Reveal(id) | Self::AutoDismiss(id) | Self::Detach(id) => id,
        }
    }
}

/// A unit of deferred work, tagged with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduledTask {
    /// Manager that scheduled the task.
    pub owner: OwnerId,
    /// Work to perform.
    pub kind: TaskKind,
}

/// Element tree capability.
pub trait Document {
    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;
    /// The `<head>` element.
    fn head(&self) -> NodeId;
    /// The `<body>` element.
    fn body(&self) -> NodeId;
    /// The root `<html>` element.
    fn document_element(&self) -> NodeId;

    /// Set an attribute.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    /// Read an attribute.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    /// Remove an attribute.
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    /// Add a class (no-op if present).
    fn add_class(&mut self, node: NodeId, class: &str);
    /// Remove a class (no-op if absent).
    fn remove_class(&mut self, node: NodeId, class: &str);
    /// Whether the element carries a class.
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Set an inline style property, including `--custom` properties.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
    /// Read an inline style property.
    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    /// Remove an inline style property.
    fn remove_style(&mut self, node: NodeId, property: &str);

    /// Replace the element's children with a text node. Never parsed.
    fn set_text(&mut self, node: NodeId, text: &str);
    /// Replace the element's children with trusted markup.
    fn set_markup(&mut self, node: NodeId, markup: &str);

    /// Append `child` to `parent`, moving it if already attached elsewhere.
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    /// Remove an element (and its subtree) from its parent.
    fn detach(&mut self, node: NodeId);
    /// Parent element, if any.
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    /// Child elements in order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    /// Whether the element is connected to the document.
    fn is_attached(&self, node: NodeId) -> bool;

    /// Connected element with the given `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;
    /// Descendants of `root` carrying `class`, in document order.
    fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId>;
    /// Descendants of `root` with tag `tag`, in document order.
    fn query_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId>;

    /// Start delivering `kind` events on `node` to the host.
    fn add_listener(&mut self, node: NodeId, kind: DomEventKind) -> ListenerHandle;
    /// Stop delivering a listener's events. Returns whether it was registered.
    fn remove_listener(&mut self, handle: ListenerHandle) -> bool;
}

/// Time and deferred-work capability.
pub trait Scheduler {
    /// Current surface time.
    fn now(&self) -> Millis;
    /// Run `task` once `delay` ms have elapsed.
    fn set_timeout(&mut self, delay: Millis, task: ScheduledTask) -> TimerHandle;
    /// Cancel a timeout. Returns whether it was still pending.
    fn clear_timeout(&mut self, handle: TimerHandle) -> bool;
    /// Run `task` at the next paint opportunity.
    fn request_frame(&mut self, task: ScheduledTask) -> FrameHandle;
    /// Cancel a frame callback. Returns whether it was still pending.
    fn cancel_frame(&mut self, handle: FrameHandle) -> bool;
    /// Pop the earliest task of `owner` due at or before `until`.
    ///
    /// Host-driven clocks move forward to the task's deadline.
    fn next_due(&mut self, owner: OwnerId, until: Millis) -> Option<ScheduledTask>;
    /// Move the clock forward to `until` (never backwards).
    fn advance_to(&mut self, until: Millis);
}

/// A complete rendering surface.
pub trait Surface: Document + Scheduler {}

impl<T: Document + Scheduler + ?Sized> Surface for T {}

/// Handle to a surface shared by every manager drawing on it.
pub type SharedSurface<S> = Rc<RefCell<S>>;

/// Wrap a surface for sharing.
#[must_use]
pub fn share<S: Surface>(surface: S) -> SharedSurface<S> {
    Rc::new(RefCell::new(surface))
}
