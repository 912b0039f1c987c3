#![forbid(unsafe_code)]

//! Stack manager and lifecycle controller.
//!
//! [`ToastManager`] owns the ordered collection of active toasts (front =
//! newest), draws them into the shared container, and drives every toast
//! through `created → visible → (paused ⇄ visible) → removing → detached`.
//!
//! Time only moves when the host says so. Deferred work is scheduled on the
//! surface as [`TaskKind`] values tagged with this manager's [`OwnerId`];
//! [`ToastManager::pump`] and [`ToastManager::advance`] drain and run them.
//! Pointer input arrives through [`ToastManager::handle_event`].
//!
//! # Invariants
//!
//! 1. A record holds at most one timer ([`TimerSlot`]) and one reveal frame.
//! 2. `is_removing` flips to true once and never back.
//! 3. The collection never exceeds `max_rendered_toasts`; overflow evicts
//!    from the back immediately.
//! 4. Stacking is recomputed synchronously after every insert, eviction,
//!    visibility flip, and deletion.
//! 5. Tasks for records that are gone or removing are no-ops.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Invalid options or patch | Caller input | `Err` before any mutation |
//! | Unknown or removing id | Stale handle | `dismiss` is a no-op |
//! | Listener panics | Host bug | Logged, counted, lifecycle continues |
//! | Use after `destroy` | Caller bug | `show` fails with `Destroyed`; everything else is a no-op |

use std::collections::VecDeque;
use std::rc::Rc;

use mtoast_core::{
    ConfigChanges, DomEventKind, EventBus, ListenerId, Millis, NodeId, OwnerId,
    ResolvedOptions, Result, ScheduledTask, SharedSurface, Surface, TaskKind, ToastConfig,
    ToastConfigPatch, ToastError, ToastEvent, ToastId, ToastOptions, ToastType,
    validate_toast_options,
};

use crate::builder::{AnimationFlags, ToastContent, build_toast};
use crate::container::{
    ToastContainer, inject_base_styles, set_custom_styles, set_document_duration, sweep_duration,
};
use crate::record::{PauseState, TimerPurpose, TimerSlot, ToastRecord, ToastSnapshot};
use crate::stack::{StackGeometry, apply_slot, compute_stack};
use crate::theme::{IconSet, class};

/// Delay between starting a dismissal and detaching the element.
pub const EXIT_DURATION_MS: Millis = 300;
/// Countdown granted on resume when the whole budget is already spent.
pub const RESUME_GRACE_MS: Millis = 1000;

/// Owns and animates every toast shown through it.
pub struct ToastManager<S: Surface> {
    owner: OwnerId,
    surface: SharedSurface<S>,
    config: ToastConfig,
    toasts: VecDeque<ToastRecord>,
    container: Option<ToastContainer>,
    events: EventBus<ToastSnapshot>,
    icons: IconSet,
    /// Toast under the pointer, if any.
    hovered: Option<ToastId>,
    destroyed: bool,
}

impl<S: Surface> std::fmt::Debug for ToastManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastManager")
            .field("owner", &self.owner)
            .field("toasts", &self.toasts.len())
            .field("container", &self.container)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl<S: Surface> ToastManager<S> {
    /// Attach to `surface` with the default configuration.
    pub fn new(surface: SharedSurface<S>) -> Self {
        Self::init(surface, ToastConfig::default())
    }

    /// Attach to `surface` with `patch` merged over the defaults.
    pub fn with_config(surface: SharedSurface<S>, patch: &ToastConfigPatch) -> Result<Self> {
        let config = ToastConfig::from_patch(patch)?;
        Ok(Self::init(surface, config))
    }

    fn init(surface: SharedSurface<S>, config: ToastConfig) -> Self {
        let container = {
            let mut s = surface.borrow_mut();
            inject_base_styles(&mut *s);
            if !config.custom_css.is_empty() {
                set_custom_styles(&mut *s, &config.custom_css);
            }
            let container = ToastContainer::attach_or_reuse(&mut *s, config.position);
            container.set_animation_duration(&mut *s, config.animation_duration);
            set_document_duration(&mut *s, config.default_duration);
            container
        };

        Self {
            owner: OwnerId::next(),
            surface,
            config,
            toasts: VecDeque::new(),
            container: Some(container),
            events: EventBus::new(),
            icons: IconSet::default(),
            hovered: None,
            destroyed: false,
        }
    }

    // ------------------------------------------------------------------
    // Public API
    // ------------------------------------------------------------------

    /// Show a toast and return its id.
    ///
    /// The toast is attached immediately but stays hidden until its reveal
    /// frame runs on the next [`pump`](Self::pump).
    pub fn show(&mut self, message: &str, ty: ToastType, options: ToastOptions) -> Result<ToastId> {
        if self.destroyed {
            return Err(ToastError::Destroyed);
        }
        validate_toast_options(&options)?;

        let id = ToastId::generate();
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("toast_show", toast = id.as_str(), ty = ty.as_str()).entered();

        let resolved = ResolvedOptions::resolve(&options, &self.config);
        let flags = AnimationFlags {
            border: self.config.enable_border_animation,
            fill: self.config.enable_fill_animation,
        };

        let surface = Rc::clone(&self.surface);
        let mut s = surface.borrow_mut();
        let element = build_toast(
            &mut *s,
            ToastContent {
                id: &id,
                message,
                ty,
                options: &resolved,
            },
            flags,
            self.icons,
        );

        let mut listeners = Vec::new();
        if let Some(button) = element.close_button {
            listeners.push(s.add_listener(button, DomEventKind::Click));
        }
        if resolved.pausable() {
            listeners.push(s.add_listener(element.root, DomEventKind::PointerEnter));
            listeners.push(s.add_listener(element.root, DomEventKind::PointerLeave));
        }

        let auto_dismiss = resolved.auto_dismiss;
        let root = element.root;
        self.toasts.push_front(ToastRecord {
            id: id.clone(),
            message: message.to_string(),
            ty,
            options: resolved,
            created_at: s.now(),
            is_removing: false,
            visible: false,
            element,
            timer: TimerSlot::default(),
            reveal: None,
            pause: None,
            listeners,
        });
        self.evict_overflow(&mut *s);

        if let Some(container) = self.container {
            s.append_child(container.inner(), root);
        }
        self.restack(&mut *s);
        s.set_style(root, "--duration", &sweep_duration(auto_dismiss));

        let frame = s.request_frame(self.task(TaskKind::Reveal(id.clone())));
        let task = self.task(TaskKind::AutoDismiss(id.clone()));
        if let Some(record) = self.toasts.front_mut() {
            record.reveal = Some(frame);
            if auto_dismiss > 0 {
                record
                    .timer
                    .arm(&mut *s, auto_dismiss, task, TimerPurpose::AutoDismiss);
            }
        }

        mtoast_core::debug!(toast = id.as_str(), ty = ty.as_str(), auto_dismiss, "toast shown");
        Ok(id)
    }

    /// Show a success toast.
    pub fn success(&mut self, message: &str, options: ToastOptions) -> Result<ToastId> {
        self.show(message, ToastType::Success, options)
    }

    /// Show an error toast.
    pub fn error(&mut self, message: &str, options: ToastOptions) -> Result<ToastId> {
        self.show(message, ToastType::Error, options)
    }

    /// Show an info toast.
    pub fn info(&mut self, message: &str, options: ToastOptions) -> Result<ToastId> {
        self.show(message, ToastType::Info, options)
    }

    /// Show a warning toast.
    pub fn warning(&mut self, message: &str, options: ToastOptions) -> Result<ToastId> {
        self.show(message, ToastType::Warning, options)
    }

    /// Start dismissing `id`. Unknown or already-removing ids are ignored.
    pub fn dismiss(&mut self, id: &ToastId) {
        let Some(index) = self.position_of(id) else {
            return;
        };
        if self.toasts[index].is_removing {
            return;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("toast_dismiss", toast = id.as_str()).entered();

        let surface = Rc::clone(&self.surface);
        let snapshot = {
            let mut s = surface.borrow_mut();
            let record = &mut self.toasts[index];
            record.is_removing = true;
            record.release(&mut *s);
            record.pause = None;
            s.remove_class(record.root(), class::TOAST_PAUSED);
            let snapshot = record.snapshot();
            // Its leave listener is gone, so nothing else would resume the rest.
            self.release_hover(&mut *s, id);
            snapshot
        };

        self.emit(ToastEvent::Dismiss, &snapshot);

        let mut s = surface.borrow_mut();
        let task = self.task(TaskKind::Detach(id.clone()));
        // A listener cannot reach the manager, so the record is still here.
        if let Some(index) = self.position_of(id) {
            self.toasts[index].visible = false;
            self.restack(&mut *s);
            self.toasts[index]
                .timer
                .arm(&mut *s, EXIT_DURATION_MS, task, TimerPurpose::Detach);
        }
        mtoast_core::debug!(toast = id.as_str(), "toast dismissed");
    }

    /// Dismiss every toast.
    pub fn dismiss_all(&mut self) {
        for id in self.ids() {
            self.dismiss(&id);
        }
    }

    /// Merge `patch` into the configuration and restyle what it touched.
    pub fn configure(&mut self, patch: &ToastConfigPatch) -> Result<ConfigChanges> {
        mtoast_core::validate_config(patch)?;
        if self.destroyed {
            return Ok(ConfigChanges::empty());
        }
        let changes = self.config.apply(patch);

        let surface = Rc::clone(&self.surface);
        let mut s = surface.borrow_mut();

        if let Some(container) = self.container {
            if changes.contains(ConfigChanges::POSITION) {
                container.set_position(&mut *s, self.config.position);
            }
            if changes.contains(ConfigChanges::DURATIONS) {
                container.set_animation_duration(&mut *s, self.config.animation_duration);
            }
        }
        set_document_duration(&mut *s, self.config.default_duration);

        if changes.affects_stack() {
            self.evict_overflow(&mut *s);
            self.restack(&mut *s);
        }
        if changes.contains(ConfigChanges::ANIMATION_FLAGS) {
            for record in &self.toasts {
                let root = record.root();
                s.remove_class(root, class::NO_BORDER_ANIMATION);
                s.remove_class(root, class::NO_FILL_ANIMATION);
                if !self.config.enable_border_animation {
                    s.add_class(root, class::NO_BORDER_ANIMATION);
                }
                if !self.config.enable_fill_animation {
                    s.add_class(root, class::NO_FILL_ANIMATION);
                }
            }
        }
        if changes.contains(ConfigChanges::CUSTOM_CSS) {
            set_custom_styles(&mut *s, &self.config.custom_css);
        }

        mtoast_core::debug!(changes = ?changes, "toast config updated");
        Ok(changes)
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    /// Subscribe to a lifecycle event.
    pub fn on(
        &mut self,
        event: ToastEvent,
        callback: impl FnMut(&ToastSnapshot) + 'static,
    ) -> ListenerId {
        self.events.on(event, callback)
    }

    /// Unsubscribe. Returns whether the subscription existed.
    pub fn off(&mut self, event: ToastEvent, id: ListenerId) -> bool {
        self.events.off(event, id)
    }

    /// Listener panics caught so far.
    #[must_use]
    pub fn listener_failures(&self) -> u64 {
        self.events.failure_count()
    }

    /// Cancel everything, remove the container and stylesheets, and drop all
    /// toasts and subscriptions. Later calls are no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        let surface = Rc::clone(&self.surface);
        let mut s = surface.borrow_mut();
        mtoast_core::info!(toasts = self.toasts.len(), "destroying toast manager");
        for record in &mut self.toasts {
            record.release(&mut *s);
        }
        if let Some(container) = self.container.take() {
            container.teardown(&mut *s);
        }
        self.toasts.clear();
        self.hovered = None;
        self.events.clear();
        self.destroyed = true;
    }

    // ------------------------------------------------------------------
    // Host entry points
    // ------------------------------------------------------------------

    /// Route a pointer or click event on `node`. Returns whether a toast
    /// reacted to it.
    pub fn handle_event(&mut self, node: NodeId, kind: DomEventKind) -> bool {
        if self.destroyed {
            return false;
        }
        match kind {
            DomEventKind::Click => {
                let target = self
                    .toasts
                    .iter()
                    .find(|t| !t.is_removing && t.element.close_button == Some(node))
                    .map(|t| t.id.clone());
                match target {
                    Some(id) => {
                        self.dismiss(&id);
                        true
                    }
                    None => false,
                }
            }
            DomEventKind::PointerEnter => self.hover(node, true),
            DomEventKind::PointerLeave => self.hover(node, false),
        }
    }

    /// Run every task of this manager already due.
    pub fn pump(&mut self) -> usize {
        let now = self.surface.borrow().now();
        self.run_until(now)
    }

    /// Move time forward by `dt` ms, running tasks in deadline order.
    pub fn advance(&mut self, dt: Millis) -> usize {
        let until = self.surface.borrow().now().saturating_add(dt);
        let ran = self.run_until(until);
        self.surface.borrow_mut().advance_to(until);
        ran
    }

    fn run_until(&mut self, until: Millis) -> usize {
        let mut ran = 0;
        loop {
            let next = self.surface.borrow_mut().next_due(self.owner, until);
            let Some(task) = next else {
                break;
            };
            self.run_task(task.kind);
            ran += 1;
        }
        ran
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Number of toasts held, including ones mid-exit.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Whether no toasts are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Ids from newest to oldest.
    #[must_use]
    pub fn ids(&self) -> Vec<ToastId> {
        self.toasts.iter().map(|t| t.id.clone()).collect()
    }

    /// State of one toast.
    #[must_use]
    pub fn snapshot(&self, id: &ToastId) -> Option<ToastSnapshot> {
        self.record(id).map(ToastRecord::snapshot)
    }

    /// Root element of one toast.
    #[must_use]
    pub fn element(&self, id: &ToastId) -> Option<NodeId> {
        self.record(id).map(ToastRecord::root)
    }

    /// Whether a toast's countdown is paused.
    #[must_use]
    pub fn is_paused(&self, id: &ToastId) -> bool {
        self.record(id).is_some_and(|t| t.pause.is_some())
    }

    /// Whether [`destroy`](Self::destroy) has run.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The shared container, until destroyed.
    #[must_use]
    pub const fn container(&self) -> Option<ToastContainer> {
        self.container
    }

    /// The surface this manager draws on.
    #[must_use]
    pub fn surface(&self) -> &SharedSurface<S> {
        &self.surface
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn task(&self, kind: TaskKind) -> ScheduledTask {
        ScheduledTask {
            owner: self.owner,
            kind,
        }
    }

    fn position_of(&self, id: &ToastId) -> Option<usize> {
        self.toasts.iter().position(|t| &t.id == id)
    }

    fn record(&self, id: &ToastId) -> Option<&ToastRecord> {
        self.toasts.iter().find(|t| &t.id == id)
    }

    fn emit(&mut self, event: ToastEvent, snapshot: &ToastSnapshot) {
        let _failures = self.events.emit(event, snapshot);
    }

    fn run_task(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::Reveal(id) => self.reveal(&id),
            TaskKind::AutoDismiss(id) => {
                let Some(index) = self.position_of(&id) else {
                    return;
                };
                if self.toasts[index].timer.purpose() == Some(TimerPurpose::AutoDismiss) {
                    self.toasts[index].timer.take();
                }
                self.dismiss(&id);
            }
            TaskKind::Detach(id) => self.detach(&id),
        }
    }

    fn reveal(&mut self, id: &ToastId) {
        let Some(index) = self.position_of(id) else {
            return;
        };
        let surface = Rc::clone(&self.surface);
        let snapshot = {
            let mut s = surface.borrow_mut();
            let record = &mut self.toasts[index];
            record.reveal = None;
            if record.is_removing {
                return;
            }
            record.visible = true;
            self.restack(&mut *s);
            self.toasts[index].snapshot()
        };
        self.emit(ToastEvent::Show, &snapshot);
    }

    fn detach(&mut self, id: &ToastId) {
        let Some(index) = self.position_of(id) else {
            return;
        };
        let surface = Rc::clone(&self.surface);
        let mut s = surface.borrow_mut();
        if let Some(mut record) = self.toasts.remove(index) {
            record.timer.take();
            record.release(&mut *s);
            s.detach(record.root());
        }
        self.restack(&mut *s);
    }

    /// Drop records beyond the rendered cap without an exit transition.
    fn evict_overflow(&mut self, s: &mut S) {
        while self.toasts.len() > self.config.max_rendered_toasts {
            let Some(mut record) = self.toasts.pop_back() else {
                break;
            };
            record.release(s);
            s.detach(record.root());
            self.release_hover(s, &record.id);
            mtoast_core::debug!(toast = record.id.as_str(), "toast evicted at rendered cap");
        }
    }

    /// Resume every paused toast if `gone` was the hovered one.
    fn release_hover(&mut self, s: &mut S, gone: &ToastId) {
        if self.hovered.as_ref() != Some(gone) {
            return;
        }
        self.hovered = None;
        let now = s.now();
        let owner = self.owner;
        for record in &mut self.toasts {
            resume(record, s, now, owner);
        }
    }

    fn restack(&self, s: &mut S) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("toast_restack", toasts = self.toasts.len()).entered();

        let geometry = StackGeometry::from(&self.config);
        let slots = compute_stack(&geometry, self.toasts.len());

        for record in self.toasts.iter().skip(slots.len()) {
            s.detach(record.root());
        }
        for (record, slot) in self.toasts.iter().zip(&slots) {
            let root = record.root();
            apply_slot(s, root, slot, record.visible);
            if let Some(container) = self.container
                && !container.holds(&*s, root)
            {
                s.append_child(container.inner(), root);
            }
        }
    }

    fn hover(&mut self, node: NodeId, entering: bool) -> bool {
        let Some(index) = self.toasts.iter().position(|t| t.root() == node) else {
            return false;
        };
        let record = &self.toasts[index];
        if record.is_removing || !record.options.pausable() {
            return false;
        }

        let surface = Rc::clone(&self.surface);
        let mut s = surface.borrow_mut();
        let now = s.now();
        let owner = self.owner;

        if entering {
            self.hovered = Some(self.toasts[index].id.clone());
            let mut changed = pause(&mut self.toasts[index], &mut *s, now);
            if self.config.pause_background_toasts_on_hover {
                for (i, record) in self.toasts.iter_mut().enumerate() {
                    if i != index {
                        changed |= pause(record, &mut *s, now);
                    }
                }
            }
            changed
        } else {
            // Only one toast is hovered at a time, so leaving resumes every
            // paused toast, including background ones paused before a
            // configuration change turned background pausing off.
            self.hovered = None;
            let mut changed = false;
            for record in &mut self.toasts {
                changed |= resume(record, &mut *s, now, owner);
            }
            changed
        }
    }
}

/// Freeze a toast's countdown. Shared by the hovered and background paths.
fn pause<S: Surface + ?Sized>(record: &mut ToastRecord, s: &mut S, now: Millis) -> bool {
    if record.is_removing || record.pause.is_some() || !record.options.pausable() {
        return false;
    }
    let elapsed = now.saturating_sub(record.created_at);
    let remaining = record
        .options
        .auto_dismiss
        .checked_sub(elapsed)
        .filter(|&ms| ms > 0)
        .unwrap_or(RESUME_GRACE_MS);

    record.timer.cancel(s);
    record.pause = Some(PauseState {
        remaining,
        paused_at: now,
    });
    s.add_class(record.root(), class::TOAST_PAUSED);
    mtoast_core::trace!(toast = record.id.as_str(), remaining, "toast paused");
    true
}

/// Restart a paused countdown with its remaining time.
fn resume<S: Surface + ?Sized>(
    record: &mut ToastRecord,
    s: &mut S,
    now: Millis,
    owner: OwnerId,
) -> bool {
    let Some(paused) = record.pause.take() else {
        return false;
    };
    s.remove_class(record.root(), class::TOAST_PAUSED);
    if record.is_removing {
        return false;
    }

    let task = ScheduledTask {
        owner,
        kind: TaskKind::AutoDismiss(record.id.clone()),
    };
    record
        .timer
        .arm(s, paused.remaining, task, TimerPurpose::AutoDismiss);
    let consumed = record.options.auto_dismiss.saturating_sub(paused.remaining);
    record.created_at = now.saturating_sub(consumed);
    mtoast_core::trace!(
        toast = record.id.as_str(),
        remaining = paused.remaining,
        paused_for = now.saturating_sub(paused.paused_at),
        "toast resumed"
    );
    true
}
