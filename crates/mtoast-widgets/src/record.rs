#![forbid(unsafe_code)]

//! Per-toast bookkeeping owned by the manager.

use mtoast_core::{
    Document, FrameHandle, ListenerHandle, Millis, NodeId, ResolvedOptions, ScheduledTask,
    Scheduler, TimerHandle, ToastId, ToastType,
};

use crate::builder::BuiltToast;

/// Why a toast's timer is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    /// Countdown to auto-dismiss.
    AutoDismiss,
    /// Exit transition before detaching.
    Detach,
}

/// The single timer a toast may hold.
///
/// Arming cancels whatever was armed before; the handle leaves the slot only
/// through [`TimerSlot::cancel`] or [`TimerSlot::take`].
#[derive(Debug, Default)]
pub(crate) struct TimerSlot {
    armed: Option<(TimerHandle, TimerPurpose)>,
}

impl TimerSlot {
    pub(crate) fn arm<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        delay: Millis,
        task: ScheduledTask,
        purpose: TimerPurpose,
    ) {
        self.cancel(scheduler);
        let handle = scheduler.set_timeout(delay, task);
        self.armed = Some((handle, purpose));
    }

    /// Clear the pending timeout. Returns whether one was armed.
    pub(crate) fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.armed.take() {
            Some((handle, _)) => {
                scheduler.clear_timeout(handle);
                true
            }
            None => false,
        }
    }

    /// Forget the handle of a timeout that just fired.
    pub(crate) fn take(&mut self) -> Option<TimerPurpose> {
        self.armed.take().map(|(_, purpose)| purpose)
    }

    pub(crate) fn purpose(&self) -> Option<TimerPurpose> {
        self.armed.map(|(_, purpose)| purpose)
    }
}

/// Countdown frozen by a hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PauseState {
    pub(crate) remaining: Millis,
    pub(crate) paused_at: Millis,
}

/// One active toast.
#[derive(Debug)]
pub(crate) struct ToastRecord {
    pub(crate) id: ToastId,
    pub(crate) message: String,
    pub(crate) ty: ToastType,
    pub(crate) options: ResolvedOptions,
    pub(crate) created_at: Millis,
    pub(crate) is_removing: bool,
    pub(crate) visible: bool,
    pub(crate) element: BuiltToast,
    pub(crate) timer: TimerSlot,
    pub(crate) reveal: Option<FrameHandle>,
    pub(crate) pause: Option<PauseState>,
    pub(crate) listeners: Vec<ListenerHandle>,
}

impl ToastRecord {
    pub(crate) fn root(&self) -> NodeId {
        self.element.root
    }

    /// Release every scheduled task and listener the record holds.
    pub(crate) fn release<S: Document + Scheduler + ?Sized>(&mut self, surface: &mut S) {
        self.timer.cancel(surface);
        if let Some(frame) = self.reveal.take() {
            surface.cancel_frame(frame);
        }
        self.detach_listeners(surface);
    }

    pub(crate) fn detach_listeners<D: Document + ?Sized>(&mut self, doc: &mut D) {
        for handle in self.listeners.drain(..) {
            doc.remove_listener(handle);
        }
    }

    pub(crate) fn snapshot(&self) -> ToastSnapshot {
        ToastSnapshot {
            id: self.id.clone(),
            message: self.message.clone(),
            ty: self.ty,
            options: self.options.clone(),
            created_at: self.created_at,
            is_removing: self.is_removing,
            visible: self.visible,
            paused_remaining: self.pause.map(|p| p.remaining),
            paused_at: self.pause.map(|p| p.paused_at),
            element: self.element.root,
        }
    }
}

/// Read-only copy of a toast's state, handed to event listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastSnapshot {
    /// Toast id.
    pub id: ToastId,
    /// Message as given (unescaped).
    pub message: String,
    /// Semantic type.
    pub ty: ToastType,
    /// Resolved options.
    pub options: ResolvedOptions,
    /// Creation time on the surface clock, shifted by pauses.
    pub created_at: Millis,
    /// Whether the exit transition has started.
    pub is_removing: bool,
    /// Whether the toast has been revealed and not yet dismissed.
    pub visible: bool,
    /// Remaining countdown while paused.
    pub paused_remaining: Option<Millis>,
    /// When the current pause began.
    pub paused_at: Option<Millis>,
    /// Root element on the surface.
    pub element: NodeId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtoast_core::{OwnerId, TaskKind};
    use mtoast_web::HeadlessSurface;

    fn task(id: &ToastId) -> ScheduledTask {
        ScheduledTask {
            owner: OwnerId::next(),
            kind: TaskKind::AutoDismiss(id.clone()),
        }
    }

    #[test]
    fn arming_twice_keeps_one_pending_timer() {
        let mut s = HeadlessSurface::new();
        let id = ToastId::from_parts(1, 1);
        let mut slot = TimerSlot::default();
        slot.arm(&mut s, 100, task(&id), TimerPurpose::AutoDismiss);
        slot.arm(&mut s, 300, task(&id), TimerPurpose::Detach);
        assert_eq!(s.pending_timers(), 1);
        assert_eq!(slot.purpose(), Some(TimerPurpose::Detach));
        assert_eq!(s.cleared_timeouts(), 1);
    }

    #[test]
    fn cancel_and_take_empty_the_slot() {
        let mut s = HeadlessSurface::new();
        let id = ToastId::from_parts(1, 1);
        let mut slot = TimerSlot::default();
        assert!(!slot.cancel(&mut s));
        slot.arm(&mut s, 100, task(&id), TimerPurpose::AutoDismiss);
        assert!(slot.cancel(&mut s));
        assert_eq!(s.pending_timers(), 0);

        slot.arm(&mut s, 100, task(&id), TimerPurpose::AutoDismiss);
        assert_eq!(slot.take(), Some(TimerPurpose::AutoDismiss));
        assert_eq!(slot.take(), None);
    }
}
