#![forbid(unsafe_code)]

//! Modern toasts public facade.
//!
//! Re-exports the types most callers need and offers a prelude plus
//! convenience constructors. A manager draws on any [`Surface`]; the
//! `headless` feature (on by default) brings the deterministic in-memory
//! surface used by tests and by hosts that mirror the tree into a page.
//!
//! ```ignore
//! use mtoast::prelude::*;
//!
//! let (surface, mut toasts) = mtoast::headless();
//! let id = toasts.success("Saved", ToastOptions::new())?;
//! toasts.pump();
//! ```

// --- Core re-exports -------------------------------------------------------

pub use mtoast_core::{
    AnimationDirection, ConfigChanges, ListenerError, ListenerId, ResolvedOptions, Result,
    SharedSurface, Surface, ToastConfig, ToastConfigPatch, ToastError, ToastEvent, ToastId,
    ToastOptions, ToastPosition, ToastType, share,
};

// --- Widget re-exports -----------------------------------------------------

pub use mtoast_widgets::{ToastManager, ToastSnapshot};

// --- Surface re-exports ----------------------------------------------------

#[cfg(feature = "headless")]
pub use mtoast_web::{DeterministicClock, HeadlessSurface};

/// Attach a manager with the default configuration.
pub fn create<S: Surface>(surface: SharedSurface<S>) -> ToastManager<S> {
    ToastManager::new(surface)
}

/// Attach a manager with `patch` merged over the defaults.
pub fn create_with<S: Surface>(
    surface: SharedSurface<S>,
    patch: &ToastConfigPatch,
) -> Result<ToastManager<S>> {
    ToastManager::with_config(surface, patch)
}

/// A fresh headless surface and a default manager attached to it.
#[cfg(feature = "headless")]
#[must_use]
pub fn headless() -> (SharedSurface<HeadlessSurface>, ToastManager<HeadlessSurface>) {
    let surface = share(HeadlessSurface::new());
    let manager = create(std::rc::Rc::clone(&surface));
    (surface, manager)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnimationDirection, Result, ToastConfigPatch, ToastError, ToastEvent, ToastId,
        ToastManager, ToastOptions, ToastPosition, ToastSnapshot, ToastType,
    };

    #[cfg(feature = "headless")]
    pub use crate::HeadlessSurface;

    pub use crate::{core, widgets};
    #[cfg(feature = "headless")]
    pub use crate::web;
}

pub use mtoast_core as core;
#[cfg(feature = "headless")]
pub use mtoast_web as web;
pub use mtoast_widgets as widgets;

#[cfg(all(test, feature = "headless"))]
mod tests {
    use super::*;
    use mtoast_core::Document;
    use pretty_assertions::assert_eq;

    #[test]
    fn headless_manager_runs_a_full_cycle() {
        let (surface, mut toasts) = headless();
        let id = toasts.info("hello", ToastOptions::new()).unwrap();
        assert!(id.as_str().starts_with("toast-"));
        assert_eq!(
            surface.borrow().element_by_id(id.as_str()),
            toasts.element(&id)
        );
        toasts.advance(3000 + 300);
        assert!(toasts.is_empty());
    }

    #[test]
    fn create_with_accepts_json_patches() {
        let patch = ToastConfigPatch::from_json(r#"{"position":"top-center","maxRenderedToasts":2}"#)
            .unwrap();
        let toasts = create_with(share(HeadlessSurface::new()), &patch).unwrap();
        assert_eq!(toasts.config().position, ToastPosition::TopCenter);
        assert_eq!(toasts.config().animation_direction, AnimationDirection::BottomToTop);
        assert_eq!(toasts.config().max_rendered_toasts, 2);
    }

    #[test]
    fn create_with_rejects_bad_patches() {
        let err = ToastConfigPatch::from_json(r#"{"position":"middle"}"#).unwrap_err();
        assert!(matches!(err, ToastError::InvalidConfig(_)));

        let patch = ToastConfigPatch::new().default_duration(-1);
        assert!(create_with(share(HeadlessSurface::new()), &patch).is_err());
    }
}
