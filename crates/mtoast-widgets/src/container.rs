#![forbid(unsafe_code)]

//! The shared toast container and injected stylesheets.
//!
//! One surface holds one container. Every manager looks it up with
//! [`ToastContainer::attach_or_reuse`]: the first creates it, the rest
//! adopt the existing nodes. The stylesheet is injected once per document
//! and found again by element id.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Container removed by the host | External DOM mutation | Toasts attach to a detached node; nothing fails |
//! | Reused container lacks an inner node | Foreign markup | An inner node is created and appended |

use mtoast_core::{Document, Millis, NodeId, ToastPosition};

use crate::theme::class;

/// Element id of the base stylesheet.
pub const STYLE_ID: &str = "modern-toasts-styles";
/// Element id of the custom stylesheet.
pub const CUSTOM_STYLE_ID: &str = "modern-toasts-custom-styles";
/// The base stylesheet text.
pub const BASE_CSS: &str = include_str!("../assets/base.css");

/// Extra time the auto-dismiss outlasts the decoration sweep.
pub const DURATION_BUFFER_MS: Millis = 1000;
/// Sweep length for toasts that never auto-dismiss.
pub const NO_DISMISS_SWEEP_MS: Millis = 3000;

/// Format milliseconds as CSS seconds (`1500` → `1.5s`).
#[must_use]
pub fn seconds(ms: Millis) -> String {
    format!("{}s", ms as f64 / 1000.0)
}

/// `--duration` value for a toast that auto-dismisses after `auto_dismiss` ms.
///
/// The sweep ends one buffer before removal; short durations use their
/// full length and `0` falls back to a fixed sweep.
#[must_use]
pub fn sweep_duration(auto_dismiss: Millis) -> String {
    let ms = if auto_dismiss > DURATION_BUFFER_MS {
        auto_dismiss - DURATION_BUFFER_MS
    } else if auto_dismiss > 0 {
        auto_dismiss
    } else {
        NO_DISMISS_SWEEP_MS
    };
    seconds(ms)
}

/// Handles to the shared container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastContainer {
    outer: NodeId,
    inner: NodeId,
}

impl ToastContainer {
    /// Find the document's container or create one anchored at `position`.
    ///
    /// A reused container keeps its current position class.
    pub fn attach_or_reuse<D: Document + ?Sized>(doc: &mut D, position: ToastPosition) -> Self {
        let body = doc.body();
        if let Some(outer) = doc.query_class(body, class::CONTAINER).into_iter().next() {
            let inner = match doc.query_class(outer, class::CONTAINER_INNER).into_iter().next() {
                Some(inner) => inner,
                None => {
                    let inner = doc.create_element("div");
                    doc.add_class(inner, class::CONTAINER_INNER);
                    doc.append_child(outer, inner);
                    inner
                }
            };
            mtoast_core::debug!(container = outer.raw(), "reusing toast container");
            return Self { outer, inner };
        }

        let outer = doc.create_element("div");
        doc.add_class(outer, class::CONTAINER);
        doc.set_attribute(outer, "aria-live", "polite");
        let inner = doc.create_element("div");
        doc.add_class(inner, class::CONTAINER_INNER);
        doc.append_child(outer, inner);
        doc.append_child(body, outer);

        let container = Self { outer, inner };
        container.set_position(doc, position);
        container
    }

    /// Outer node carrying the position class.
    #[must_use]
    pub const fn outer(&self) -> NodeId {
        self.outer
    }

    /// Node toasts are appended to.
    #[must_use]
    pub const fn inner(&self) -> NodeId {
        self.inner
    }

    /// Replace the position class.
    pub fn set_position<D: Document + ?Sized>(&self, doc: &mut D, position: ToastPosition) {
        for p in ToastPosition::ALL {
            doc.remove_class(self.outer, p.class_name());
        }
        doc.add_class(self.outer, position.class_name());
    }

    /// Set the enter/exit transition length on the container.
    pub fn set_animation_duration<D: Document + ?Sized>(&self, doc: &mut D, ms: Millis) {
        doc.set_style(self.outer, "--animation-duration", &format!("{ms}ms"));
    }

    /// Whether `node` is a direct child of the inner node.
    pub fn holds<D: Document + ?Sized>(&self, doc: &D, node: NodeId) -> bool {
        doc.parent(node) == Some(self.inner)
    }

    /// Remove the container and every injected stylesheet.
    pub fn teardown<D: Document + ?Sized>(&self, doc: &mut D) {
        doc.detach(self.outer);
        remove_styles(doc);
    }
}

/// Insert the base stylesheet unless the document already has it.
pub fn inject_base_styles<D: Document + ?Sized>(doc: &mut D) {
    if doc.element_by_id(STYLE_ID).is_some() {
        return;
    }
    let style = doc.create_element("style");
    doc.set_attribute(style, "id", STYLE_ID);
    doc.set_text(style, BASE_CSS);
    let head = doc.head();
    doc.append_child(head, style);
}

/// Replace the custom stylesheet; empty text removes it.
pub fn set_custom_styles<D: Document + ?Sized>(doc: &mut D, css: &str) {
    if let Some(existing) = doc.element_by_id(CUSTOM_STYLE_ID) {
        doc.detach(existing);
    }
    if css.is_empty() {
        return;
    }
    let style = doc.create_element("style");
    doc.set_attribute(style, "id", CUSTOM_STYLE_ID);
    doc.set_text(style, css);
    let head = doc.head();
    doc.append_child(head, style);
}

/// Set the document-wide `--duration` from the default auto-dismiss delay.
pub fn set_document_duration<D: Document + ?Sized>(doc: &mut D, default_duration: Millis) {
    let root = doc.document_element();
    doc.set_style(root, "--duration", &seconds(default_duration));
}

fn remove_styles<D: Document + ?Sized>(doc: &mut D) {
    for id in [STYLE_ID, CUSTOM_STYLE_ID] {
        if let Some(node) = doc.element_by_id(id) {
            doc.detach(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtoast_web::HeadlessSurface;

    #[test]
    fn sweep_duration_table() {
        assert_eq!(sweep_duration(3000), "2s");
        assert_eq!(sweep_duration(1500), "0.5s");
        assert_eq!(sweep_duration(1000), "1s");
        assert_eq!(sweep_duration(100), "0.1s");
        assert_eq!(sweep_duration(0), "3s");
    }

    #[test]
    fn second_attach_reuses_the_first_container() {
        let mut s = HeadlessSurface::new();
        let a = ToastContainer::attach_or_reuse(&mut s, ToastPosition::TopLeft);
        let b = ToastContainer::attach_or_reuse(&mut s, ToastPosition::BottomRight);
        assert_eq!(a, b);
        let body = s.body();
        assert_eq!(s.query_class(body, class::CONTAINER).len(), 1);
        assert!(s.has_class(a.outer(), "position-top-left"));
        assert_eq!(s.attribute(a.outer(), "aria-live").as_deref(), Some("polite"));
    }

    #[test]
    fn set_position_keeps_exactly_one_class() {
        let mut s = HeadlessSurface::new();
        let c = ToastContainer::attach_or_reuse(&mut s, ToastPosition::BottomRight);
        c.set_position(&mut s, ToastPosition::TopCenter);
        let positions: Vec<_> = s
            .classes(c.outer())
            .into_iter()
            .filter(|cls| cls.starts_with("position-"))
            .collect();
        assert_eq!(positions, vec!["position-top-center"]);
    }

    #[test]
    fn styles_are_injected_once_and_custom_styles_replaced() {
        let mut s = HeadlessSurface::new();
        inject_base_styles(&mut s);
        inject_base_styles(&mut s);
        let head = s.head();
        assert_eq!(s.query_tag(head, "style").len(), 1);

        set_custom_styles(&mut s, ".toast { color: red; }");
        set_custom_styles(&mut s, ".toast { color: blue; }");
        let custom = s.element_by_id(CUSTOM_STYLE_ID).expect("custom style");
        assert_eq!(s.text(custom), Some(".toast { color: blue; }"));
        assert_eq!(s.query_tag(head, "style").len(), 2);

        set_custom_styles(&mut s, "");
        assert_eq!(s.element_by_id(CUSTOM_STYLE_ID), None);
    }

    #[test]
    fn teardown_leaves_nothing_behind() {
        let mut s = HeadlessSurface::new();
        let c = ToastContainer::attach_or_reuse(&mut s, ToastPosition::BottomRight);
        inject_base_styles(&mut s);
        set_custom_styles(&mut s, "a{}");
        c.teardown(&mut s);
        let html = s.document_element();
        assert!(s.query_class(html, class::CONTAINER).is_empty());
        assert!(s.query_tag(html, "style").is_empty());
    }

    #[test]
    fn document_duration_is_in_seconds() {
        let mut s = HeadlessSurface::new();
        set_document_duration(&mut s, 4500);
        let root = s.document_element();
        assert_eq!(s.style(root, "--duration").as_deref(), Some("4.5s"));
    }
}
