#![forbid(unsafe_code)]

//! `mtoast-web` provides a host-driven rendering surface for modern toasts.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment mirrors the element tree
//!   into a real page and forwards pointer events back to the manager.
//! - **Deterministic time**: the host advances a monotonic clock explicitly;
//!   timers and paint callbacks fire only when the owner drains them.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The same surface backs every test in the workspace, so its inspection
//! helpers (`text`, `outer_html`, `pending_timers`, ...) are part of the API.

pub mod tree;

use core::time::Duration;
use std::collections::{BTreeMap, HashMap};

use mtoast_core::{
    Document, DomEventKind, FrameHandle, ListenerHandle, Millis, NodeId, OwnerId, ScheduledTask,
    Scheduler, TimerHandle,
};

pub use tree::{Content, ElementTree};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Current monotonic time in whole milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> Millis {
        u64::try_from(self.now.as_millis()).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    Timer,
    Frame,
}

#[derive(Debug, Clone)]
struct Pending {
    kind: PendingKind,
    task: ScheduledTask,
}

/// Timers and frame callbacks ordered by `(deadline, sequence)`.
#[derive(Debug, Default, Clone)]
struct TaskQueue {
    entries: BTreeMap<(Millis, u64), Pending>,
    by_seq: HashMap<u64, Millis>,
    next_seq: u64,
}

impl TaskQueue {
    fn push(&mut self, deadline: Millis, kind: PendingKind, task: ScheduledTask) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.entries.insert((deadline, seq), Pending { kind, task });
        self.by_seq.insert(seq, deadline);
        seq
    }

    fn cancel(&mut self, seq: u64, kind: PendingKind) -> bool {
        let Some(&deadline) = self.by_seq.get(&seq) else {
            return false;
        };
        if self
            .entries
            .get(&(deadline, seq))
            .is_none_or(|p| p.kind != kind)
        {
            return false;
        }
        self.entries.remove(&(deadline, seq));
        self.by_seq.remove(&seq);
        true
    }

    fn pop_due(&mut self, owner: OwnerId, until: Millis) -> Option<(Millis, ScheduledTask)> {
        let key = self
            .entries
            .iter()
            .take_while(|((deadline, _), _)| *deadline <= until)
            .find(|(_, p)| p.task.owner == owner)
            .map(|(key, _)| *key)?;
        let pending = self.entries.remove(&key)?;
        self.by_seq.remove(&key.1);
        Some((key.0, pending.task))
    }

    fn count(&self, kind: PendingKind) -> usize {
        self.entries.values().filter(|p| p.kind == kind).count()
    }
}

/// In-memory document plus deterministic scheduler.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    clock: DeterministicClock,
    tree: ElementTree,
    queue: TaskQueue,
    listeners: BTreeMap<u64, (NodeId, DomEventKind)>,
    next_listener: u64,
    cleared_timeouts: usize,
    cancelled_frames: usize,
}

impl HeadlessSurface {
    /// Empty document at time `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutably access the clock.
    pub fn clock_mut(&mut self) -> &mut DeterministicClock {
        &mut self.clock
    }

    /// Move the clock forward by `dt` ms without running anything.
    pub fn advance(&mut self, dt: Millis) {
        self.clock.advance(Duration::from_millis(dt));
    }

    /// Read-only view of the element tree.
    #[must_use]
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Tag name of an element.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.tree.get(node).map(|el| el.tag.as_str())
    }

    /// Text set with [`Document::set_text`], if that is the element's content.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.tree.get(node).map(|el| &el.content) {
            Some(Content::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Markup set with [`Document::set_markup`], if that is the element's content.
    #[must_use]
    pub fn markup(&self, node: NodeId) -> Option<&str> {
        match self.tree.get(node).map(|el| &el.content) {
            Some(Content::Markup(markup)) => Some(markup),
            _ => None,
        }
    }

    /// Classes of an element in insertion order.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.tree
            .get(node)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    /// Serialized subtree.
    #[must_use]
    pub fn outer_html(&self, node: NodeId) -> String {
        self.tree.outer_html(node)
    }

    /// Registered listeners across the document.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether `node` has a listener for `kind`.
    #[must_use]
    pub fn has_listener(&self, node: NodeId, kind: DomEventKind) -> bool {
        self.listeners.values().any(|&(n, k)| n == node && k == kind)
    }

    /// Timeouts not yet fired or cleared.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.queue.count(PendingKind::Timer)
    }

    /// Frame callbacks not yet run or cancelled.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.queue.count(PendingKind::Frame)
    }

    /// Successful [`Scheduler::clear_timeout`] calls so far.
    #[must_use]
    pub const fn cleared_timeouts(&self) -> usize {
        self.cleared_timeouts
    }

    /// Successful [`Scheduler::cancel_frame`] calls so far.
    #[must_use]
    pub const fn cancelled_frames(&self) -> usize {
        self.cancelled_frames
    }
}

impl Document for HeadlessSurface {
    fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create(tag)
    }

    fn head(&self) -> NodeId {
        ElementTree::HEAD
    }

    fn body(&self) -> NodeId {
        ElementTree::BODY
    }

    fn document_element(&self) -> NodeId {
        ElementTree::HTML
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(el) = self.tree.get_mut(node) else {
            return;
        };
        if name == "class" {
            el.classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        match el.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let el = self.tree.get(node)?;
        match name {
            "class" if !el.classes.is_empty() => Some(el.classes.join(" ")),
            "style" if !el.styles.is_empty() => Some(tree::serialize_styles(&el.styles)),
            _ => el
                .attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone()),
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.tree.get_mut(node) {
            if name == "class" {
                el.classes.clear();
            }
            el.attributes.retain(|(k, _)| k != name);
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.tree.get_mut(node)
            && !class.is_empty()
            && !el.classes.iter().any(|c| c == class)
        {
            el.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.tree.get_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree
            .get(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(el) = self.tree.get_mut(node) else {
            return;
        };
        match el.styles.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => el.styles.push((property.to_string(), value.to_string())),
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree
            .get(node)?
            .styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone())
    }

    fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(el) = self.tree.get_mut(node) {
            el.styles.retain(|(k, _)| k != property);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.tree.replace_content(node, Content::Text(text.to_string()));
    }

    fn set_markup(&mut self, node: NodeId, markup: &str) {
        self.tree
            .replace_content(node, Content::Markup(markup.to_string()));
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append(parent, child);
    }

    fn detach(&mut self, node: NodeId) {
        self.tree.unlink(node);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.get(node)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .get(node)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.tree.is_connected(node)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(ElementTree::HTML)
            .into_iter()
            .find(|&n| self.attribute(n, "id").as_deref() == Some(id))
    }

    fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    fn query_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| self.tag(n) == Some(tag.as_str()))
            .collect()
    }

    fn add_listener(&mut self, node: NodeId, kind: DomEventKind) -> ListenerHandle {
        self.next_listener += 1;
        self.listeners.insert(self.next_listener, (node, kind));
        ListenerHandle::from_raw(self.next_listener)
    }

    fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(&handle.raw()).is_some()
    }
}

impl Scheduler for HeadlessSurface {
    fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    fn set_timeout(&mut self, delay: Millis, task: ScheduledTask) -> TimerHandle {
        let deadline = self.now().saturating_add(delay);
        TimerHandle::from_raw(self.queue.push(deadline, PendingKind::Timer, task))
    }

    fn clear_timeout(&mut self, handle: TimerHandle) -> bool {
        let cleared = self.queue.cancel(handle.raw(), PendingKind::Timer);
        if cleared {
            self.cleared_timeouts += 1;
        }
        cleared
    }

    fn request_frame(&mut self, task: ScheduledTask) -> FrameHandle {
        let now = self.now();
        FrameHandle::from_raw(self.queue.push(now, PendingKind::Frame, task))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        let cancelled = self.queue.cancel(handle.raw(), PendingKind::Frame);
        if cancelled {
            self.cancelled_frames += 1;
        }
        cancelled
    }

    fn next_due(&mut self, owner: OwnerId, until: Millis) -> Option<ScheduledTask> {
        let (deadline, task) = self.queue.pop_due(owner, until)?;
        self.advance_to(deadline);
        Some(task)
    }

    fn advance_to(&mut self, until: Millis) {
        if until > self.now() {
            self.clock.set(Duration::from_millis(until));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtoast_core::{TaskKind, ToastId};
    use pretty_assertions::assert_eq;

    fn task(owner: OwnerId, n: u64) -> ScheduledTask {
        ScheduledTask {
            owner,
            kind: TaskKind::AutoDismiss(ToastId::from_parts(n, n)),
        }
    }

    #[test]
    fn clock_advances_saturating() {
        let mut clock = DeterministicClock::new();
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now_ms(), 250);
        clock.set(Duration::MAX);
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::MAX);
    }

    #[test]
    fn timers_fire_in_deadline_then_sequence_order() {
        let owner = OwnerId::next();
        let mut surface = HeadlessSurface::new();
        surface.set_timeout(50, task(owner, 1));
        surface.set_timeout(10, task(owner, 2));
        surface.set_timeout(10, task(owner, 3));

        let order: Vec<_> = std::iter::from_fn(|| surface.next_due(owner, 100))
            .map(|t| t.kind.toast().timestamp())
            .collect();
        assert_eq!(order, vec![Some(2), Some(3), Some(1)]);
        assert_eq!(surface.now(), 50);
    }

    #[test]
    fn next_due_respects_owner_and_horizon() {
        let a = OwnerId::next();
        let b = OwnerId::next();
        let mut surface = HeadlessSurface::new();
        surface.set_timeout(5, task(b, 1));
        surface.set_timeout(20, task(a, 2));

        assert_eq!(surface.next_due(a, 10), None);
        assert_eq!(surface.now(), 0);
        assert!(surface.next_due(a, 20).is_some());
        assert_eq!(surface.pending_timers(), 1);
    }

    #[test]
    fn cleared_timer_never_fires_and_is_counted() {
        let owner = OwnerId::next();
        let mut surface = HeadlessSurface::new();
        let handle = surface.set_timeout(5, task(owner, 1));
        assert!(surface.clear_timeout(handle));
        assert!(!surface.clear_timeout(handle));
        assert_eq!(surface.cleared_timeouts(), 1);
        assert_eq!(surface.next_due(owner, 100), None);
    }

    #[test]
    fn frames_are_due_now_and_not_cleared_as_timers() {
        let owner = OwnerId::next();
        let mut surface = HeadlessSurface::new();
        surface.advance(30);
        let frame = surface.request_frame(task(owner, 1));
        assert!(!surface.clear_timeout(TimerHandle::from_raw(frame.raw())));
        assert_eq!(surface.pending_frames(), 1);
        assert!(surface.next_due(owner, surface.now()).is_some());
        assert_eq!(surface.pending_frames(), 0);
    }

    #[test]
    fn document_queries_and_connectedness() {
        let mut s = HeadlessSurface::new();
        let div = s.create_element("div");
        s.set_attribute(div, "id", "box");
        s.add_class(div, "toast");
        assert_eq!(s.element_by_id("box"), None);

        let body = s.body();
        s.append_child(body, div);
        assert_eq!(s.element_by_id("box"), Some(div));
        assert_eq!(s.query_class(body, "toast"), vec![div]);
        assert_eq!(s.query_tag(s.document_element(), "DIV"), vec![div]);

        s.detach(div);
        assert!(!s.is_attached(div));
        assert_eq!(s.element_by_id("box"), None);
    }

    #[test]
    fn listeners_register_and_unregister() {
        let mut s = HeadlessSurface::new();
        let div = s.create_element("div");
        let h = s.add_listener(div, DomEventKind::Click);
        assert!(s.has_listener(div, DomEventKind::Click));
        assert_eq!(s.listener_count(), 1);
        assert!(s.remove_listener(h));
        assert!(!s.remove_listener(h));
        assert_eq!(s.listener_count(), 0);
    }

    #[test]
    fn outer_html_lists_attributes_classes_and_styles() {
        let mut s = HeadlessSurface::new();
        let div = s.create_element("div");
        s.set_attribute(div, "role", "status");
        s.add_class(div, "toast");
        s.add_class(div, "toast-info");
        s.set_style(div, "--toast-opacity", "1");
        s.set_text(div, "a < b");
        assert_eq!(
            s.outer_html(div),
            r#"<div role="status" class="toast toast-info" style="--toast-opacity: 1;">a &lt; b</div>"#
        );
    }
}
