#![forbid(unsafe_code)]

//! Class names, per-type styling, and the default icon set.
//!
//! The stylesheet (an external asset) keys every rule off these names, so
//! they are part of the public contract and must not drift.

use mtoast_core::ToastType;

/// Class names shared by the builder, the container, and the stylesheet.
pub mod class {
    /// Outer container.
    pub const CONTAINER: &str = "toast-container";
    /// Container element toasts are appended to.
    pub const CONTAINER_INNER: &str = "toast-container-inner";
    /// Toast root.
    pub const TOAST: &str = "toast";
    /// Present while a toast is not visible.
    pub const TOAST_ENTERING: &str = "toast-entering";
    /// Present while a toast is visible.
    pub const TOAST_VISIBLE: &str = "toast-visible";
    /// Present while a toast's countdown is paused.
    pub const TOAST_PAUSED: &str = "toast-paused";
    /// Icon, text, and close wrapper.
    pub const TOAST_CONTENT: &str = "toast-content";
    /// Icon wrapper.
    pub const TOAST_ICON: &str = "toast-icon";
    /// Title and message wrapper.
    pub const TOAST_TEXT: &str = "toast-text";
    /// Title paragraph.
    pub const TOAST_TITLE: &str = "toast-title";
    /// Message paragraph.
    pub const TOAST_MESSAGE: &str = "toast-message";
    /// Close button wrapper.
    pub const TOAST_CLOSE: &str = "toast-close";
    /// Close button.
    pub const TOAST_CLOSE_BUTTON: &str = "toast-close-button";
    /// Every border segment.
    pub const BORDER_ELEMENT: &str = "border-element";
    /// Fill bar.
    pub const FILL_PROGRESS: &str = "fill-progress";
    /// Disables border animation on a toast root.
    pub const NO_BORDER_ANIMATION: &str = "no-border-animation";
    /// Disables fill animation on a toast root.
    pub const NO_FILL_ANIMATION: &str = "no-fill-animation";
}

/// ARIA role announced for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaRole {
    /// Polite status update.
    Status,
    /// Assertive alert.
    Alert,
}

impl AriaRole {
    /// Attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Alert => "alert",
        }
    }
}

/// Visual configuration of one semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeStyle {
    /// Title text.
    pub title: &'static str,
    /// ARIA role.
    pub role: AriaRole,
    /// Class on the toast root.
    pub base_class: &'static str,
    /// Class on every border segment.
    pub border_class: &'static str,
    /// Class on the fill bar.
    pub fill_class: &'static str,
    /// Class on the icon wrapper.
    pub icon_class: &'static str,
}

impl TypeStyle {
    /// Style for `ty`.
    #[must_use]
    pub const fn of(ty: ToastType) -> Self {
        match ty {
            ToastType::Success => Self {
                title: "Success",
                role: AriaRole::Status,
                base_class: "toast-success",
                border_class: "border-success",
                fill_class: "fill-success",
                icon_class: "toast-icon-success",
            },
            ToastType::Error => Self {
                title: "Error",
                role: AriaRole::Alert,
                base_class: "toast-error",
                border_class: "border-error",
                fill_class: "fill-error",
                icon_class: "toast-icon-error",
            },
            ToastType::Info => Self {
                title: "Info",
                role: AriaRole::Status,
                base_class: "toast-info",
                border_class: "border-info",
                fill_class: "fill-info",
                icon_class: "toast-icon-info",
            },
            ToastType::Warning => Self {
                title: "Warning",
                role: AriaRole::Status,
                base_class: "toast-warning",
                border_class: "border-warning",
                fill_class: "fill-warning",
                icon_class: "toast-icon-warning",
            },
        }
    }
}

const SUCCESS_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" d="M9 12.75L11.25 15 15 9.75M21 12a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>"#;
const ERROR_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" d="M9.75 9.75l4.5 4.5m0-4.5l-4.5 4.5M21 12a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>"#;
const INFO_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" d="M11.25 11.25l.041-.02a.75.75 0 011.063.852l-.708 2.836a.75.75 0 001.063.853l.041-.021M21 12a9 9 0 11-18 0 9 9 0 0118 0zm-9-3.75h.008v.008H12V8.25z" /></svg>"#;
const WARNING_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" d="M12 9v3.75m-9.303 3.376c-.866 1.5.217 3.374 1.948 3.374h14.71c1.73 0 2.813-1.874 1.948-3.374L13.949 3.378c-.866-1.5-3.032-1.5-3.898 0L2.697 16.126zM12 15.75h.007v.008H12v-.008z" /></svg>"#;
const CLOSE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" d="M6 18L18 6M6 6l12 12" /></svg>"#;

/// Icon markup for each type plus the close button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSet {
    /// Success icon.
    pub success: &'static str,
    /// Error icon.
    pub error: &'static str,
    /// Info icon.
    pub info: &'static str,
    /// Warning icon.
    pub warning: &'static str,
    /// Close button icon.
    pub close: &'static str,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            success: SUCCESS_SVG,
            error: ERROR_SVG,
            info: INFO_SVG,
            warning: WARNING_SVG,
            close: CLOSE_SVG,
        }
    }
}

impl IconSet {
    /// Icon for `ty`.
    #[must_use]
    pub const fn for_type(&self, ty: ToastType) -> &'static str {
        match ty {
            ToastType::Success => self.success,
            ToastType::Error => self.error,
            ToastType::Info => self.info,
            ToastType::Warning => self.warning,
        }
    }
}
