#![forbid(unsafe_code)]

//! Element builder for one toast.
//!
//! The builder assembles the toast's subtree on a [`Document`] and hands
//! back the node handles the manager needs. It never attaches behavior;
//! listeners are the manager's job.
//!
//! Steps run in a fixed order, each relying on what the previous one left:
//!
//! 1. [`ToastBuilder::new`] creates the detached root with its id, classes,
//!    role, and data attributes.
//! 2. [`ToastBuilder::add_borders`] creates the direction's border segments.
//! 3. [`ToastBuilder::add_fill_progress`] creates the fill bar.
//! 4. [`ToastBuilder::add_content`] creates icon, title, message, and the
//!    optional close button.
//! 5. [`ToastBuilder::apply_custom_styles`] paints color overrides on the
//!    root and on the border segments from step 2.
//! 6. [`ToastBuilder::build`] appends everything to the root in creation
//!    order and returns the handles.
//!
//! # Invariants
//!
//! 1. The root is detached when `build` returns; attaching is the caller's
//!    decision.
//! 2. Message text is escaped and set as text, never as markup.
//! 3. Border segments match [`border_segments`] for the toast's direction.

use mtoast_core::{
    AnimationDirection, Document, NodeId, ResolvedOptions, ToastId, ToastType, escape_html,
};

use crate::theme::{IconSet, TypeStyle, class};

/// Accessible name of the close button.
pub const CLOSE_LABEL: &str = "Close notification";

/// One named border segment and its starting geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSegment {
    /// Segment class (`border-left-top`, ...).
    pub class: &'static str,
    /// Initial inline styles the keyframes animate away from.
    pub styles: &'static [(&'static str, &'static str)],
}

const fn seg(
    class: &'static str,
    styles: &'static [(&'static str, &'static str)],
) -> BorderSegment {
    BorderSegment { class, styles }
}

const HORIZONTAL: [BorderSegment; 6] = [
    seg("border-left-top", &[("height", "0%"), ("top", "50%")]),
    seg("border-left-bottom", &[("height", "0%"), ("bottom", "50%")]),
    seg("border-top", &[("width", "0%")]),
    seg("border-bottom", &[("width", "0%")]),
    seg("border-right-top", &[("height", "0%"), ("top", "0%")]),
    seg("border-right-bottom", &[("height", "0%"), ("bottom", "0%")]),
];

const TOP_TO_BOTTOM: [BorderSegment; 7] = [
    seg("border-left-top", &[("height", "0%"), ("top", "50%")]),
    seg("border-left-bottom", &[("height", "0%"), ("bottom", "50%")]),
    seg("border-top", &[("width", "0%")]),
    seg("border-right-top", &[("height", "0%"), ("top", "0%")]),
    seg("border-right-bottom", &[("height", "0%"), ("bottom", "0%")]),
    seg("border-bottom-left", &[("width", "0%")]),
    seg("border-bottom-right", &[("width", "0%")]),
];

const BOTTOM_TO_TOP: [BorderSegment; 5] = [
    seg("border-left-top", &[("height", "0%"), ("bottom", "0%")]),
    seg("border-bottom", &[("width", "0%")]),
    seg("border-right-top", &[("height", "0%"), ("bottom", "0%")]),
    seg("border-top-left", &[("width", "0%")]),
    seg("border-top-right", &[("width", "0%")]),
];

/// Border segments drawn for `direction`.
#[must_use]
pub const fn border_segments(direction: AnimationDirection) -> &'static [BorderSegment] {
    match direction {
        AnimationDirection::LeftToRight | AnimationDirection::RightToLeft => &HORIZONTAL,
        AnimationDirection::TopToBottom => &TOP_TO_BOTTOM,
        AnimationDirection::BottomToTop => &BOTTOM_TO_TOP,
    }
}

/// Global switches that affect how a toast is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFlags {
    /// Border segments animate.
    pub border: bool,
    /// Fill bar animates.
    pub fill: bool,
}

impl Default for AnimationFlags {
    fn default() -> Self {
        Self {
            border: true,
            fill: true,
        }
    }
}

/// Data a toast is built from.
#[derive(Debug, Clone, Copy)]
pub struct ToastContent<'a> {
    /// Toast id; becomes the root's `id`.
    pub id: &'a ToastId,
    /// Raw message text.
    pub message: &'a str,
    /// Semantic type.
    pub ty: ToastType,
    /// Fully resolved options.
    pub options: &'a ResolvedOptions,
}

/// Handles into a finished toast subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltToast {
    /// Toast root (detached).
    pub root: NodeId,
    /// Border segments in table order.
    pub borders: Vec<NodeId>,
    /// Fill bar, if that step ran.
    pub fill: Option<NodeId>,
    /// Close button, when the options asked for one.
    pub close_button: Option<NodeId>,
}

/// Stepwise constructor of a toast subtree.
pub struct ToastBuilder<'a, D: Document + ?Sized> {
    doc: &'a mut D,
    content: ToastContent<'a>,
    style: TypeStyle,
    icons: IconSet,
    direction: AnimationDirection,
    root: NodeId,
    parts: Vec<NodeId>,
    borders: Vec<NodeId>,
    fill: Option<NodeId>,
    close_button: Option<NodeId>,
}

impl<'a, D: Document + ?Sized> ToastBuilder<'a, D> {
    /// Create the root element.
    ///
    /// Postcondition: a detached `div` carrying `toast`, the type's base
    /// class, the animation-disable classes the flags call for, `role`,
    /// `data-toast-id`, and `data-animation-direction`.
    pub fn new(
        doc: &'a mut D,
        content: ToastContent<'a>,
        flags: AnimationFlags,
        icons: IconSet,
    ) -> Self {
        let style = TypeStyle::of(content.ty);
        let direction = content.options.animation_direction;
        let id = content.id.as_str();

        let root = doc.create_element("div");
        doc.set_attribute(root, "id", id);
        doc.add_class(root, class::TOAST);
        doc.add_class(root, style.base_class);
        if !flags.border {
            doc.add_class(root, class::NO_BORDER_ANIMATION);
        }
        if !flags.fill {
            doc.add_class(root, class::NO_FILL_ANIMATION);
        }
        doc.set_attribute(root, "role", style.role.as_str());
        doc.set_attribute(root, "data-toast-id", id);
        doc.set_attribute(root, "data-animation-direction", direction.as_str());

        Self {
            doc,
            content,
            style,
            icons,
            direction,
            root,
            parts: Vec::new(),
            borders: Vec::new(),
            fill: None,
            close_button: None,
        }
    }

    /// Create the border segments for the toast's direction.
    ///
    /// Postcondition: one element per [`border_segments`] entry, queued for
    /// the root and recorded for [`Self::apply_custom_styles`].
    #[must_use]
    pub fn add_borders(mut self) -> Self {
        let direction_class = format!("animation-{}", self.direction);
        for segment in border_segments(self.direction) {
            let el = self.doc.create_element("div");
            self.doc.add_class(el, class::BORDER_ELEMENT);
            self.doc.add_class(el, segment.class);
            self.doc.add_class(el, self.style.border_class);
            self.doc.add_class(el, &direction_class);
            for (property, value) in segment.styles {
                self.doc.set_style(el, property, value);
            }
            self.borders.push(el);
            self.parts.push(el);
        }
        self
    }

    /// Create the fill bar.
    ///
    /// Vertical sweeps start at zero height and full width; horizontal ones
    /// at zero width.
    #[must_use]
    pub fn add_fill_progress(mut self) -> Self {
        let el = self.doc.create_element("div");
        self.doc.add_class(el, class::FILL_PROGRESS);
        self.doc.add_class(el, self.style.fill_class);
        self.doc
            .add_class(el, &format!("animation-{}", self.direction));
        if self.direction.is_vertical() {
            self.doc.set_style(el, "height", "0%");
            self.doc.set_style(el, "width", "100%");
        } else {
            self.doc.set_style(el, "width", "0%");
        }
        self.fill = Some(el);
        self.parts.push(el);
        self
    }

    /// Create icon, title, message, and (optionally) the close button.
    ///
    /// Postcondition: the close button, when created, is recorded so the
    /// manager can attach and later remove its click listener.
    #[must_use]
    pub fn add_content(mut self) -> Self {
        let doc = &mut *self.doc;
        let options = self.content.options;

        let content = doc.create_element("div");
        doc.add_class(content, class::TOAST_CONTENT);

        let icon = doc.create_element("div");
        doc.add_class(icon, class::TOAST_ICON);
        doc.add_class(icon, self.style.icon_class);
        let markup = options
            .icon
            .as_deref()
            .unwrap_or_else(|| self.icons.for_type(self.content.ty));
        doc.set_markup(icon, markup);
        doc.append_child(content, icon);

        let text = doc.create_element("div");
        doc.add_class(text, class::TOAST_TEXT);
        let title = doc.create_element("p");
        doc.add_class(title, class::TOAST_TITLE);
        doc.set_text(title, self.style.title);
        let message = doc.create_element("p");
        doc.add_class(message, class::TOAST_MESSAGE);
        doc.set_text(message, &escape_html(self.content.message));
        doc.append_child(text, title);
        doc.append_child(text, message);
        doc.append_child(content, text);

        if options.show_close_button {
            let wrapper = doc.create_element("div");
            doc.add_class(wrapper, class::TOAST_CLOSE);
            let button = doc.create_element("button");
            doc.add_class(button, class::TOAST_CLOSE_BUTTON);
            doc.set_attribute(button, "aria-label", CLOSE_LABEL);
            doc.set_markup(button, self.icons.close);
            doc.append_child(wrapper, button);
            doc.append_child(content, wrapper);
            self.close_button = Some(button);
        }

        self.parts.push(content);
        self
    }

    /// Paint per-toast color overrides and append the extra class.
    ///
    /// A border color also becomes the background of every border segment
    /// created so far.
    #[must_use]
    pub fn apply_custom_styles(mut self) -> Self {
        let options = self.content.options;
        if let Some(color) = &options.background_color {
            self.doc.set_style(self.root, "background-color", color);
        }
        if let Some(color) = &options.text_color {
            self.doc.set_style(self.root, "color", color);
        }
        if let Some(color) = &options.border_color {
            self.doc.set_style(self.root, "border-color", color);
            for &border in &self.borders {
                self.doc.set_style(border, "background-color", color);
            }
        }
        if let Some(extra) = &options.class_name {
            for token in extra.split_whitespace() {
                self.doc.add_class(self.root, token);
            }
        }
        self
    }

    /// Append the queued parts to the root and return the handles.
    #[must_use]
    pub fn build(mut self) -> BuiltToast {
        for &part in &self.parts {
            self.doc.append_child(self.root, part);
        }
        BuiltToast {
            root: self.root,
            borders: self.borders,
            fill: self.fill,
            close_button: self.close_button,
        }
    }
}

/// Run every step in order.
pub fn build_toast<D: Document + ?Sized>(
    doc: &mut D,
    content: ToastContent<'_>,
    flags: AnimationFlags,
    icons: IconSet,
) -> BuiltToast {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "toast_build",
        toast = content.id.as_str(),
        ty = content.ty.as_str(),
        direction = content.options.animation_direction.as_str(),
    )
    .entered();

    ToastBuilder::new(doc, content, flags, icons)
        .add_borders()
        .add_fill_progress()
        .add_content()
        .apply_custom_styles()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtoast_core::{ToastConfig, ToastOptions};
    use mtoast_web::HeadlessSurface;
    use pretty_assertions::assert_eq;

    fn build_with(options: ToastOptions, message: &str, ty: ToastType) -> (HeadlessSurface, BuiltToast) {
        let mut surface = HeadlessSurface::new();
        let resolved = ResolvedOptions::resolve(&options, &ToastConfig::default());
        let id = ToastId::from_parts(1_700_000_000_000, 42);
        let content = ToastContent {
            id: &id,
            message,
            ty,
            options: &resolved,
        };
        let built = build_toast(&mut surface, content, AnimationFlags::default(), IconSet::default());
        (surface, built)
    }

    #[test]
    fn segment_counts_per_direction() {
        let counts: Vec<_> = AnimationDirection::ALL
            .into_iter()
            .map(|d| {
                let (s, built) = build_with(
                    ToastOptions::new().animation_direction(d),
                    "hi",
                    ToastType::Info,
                );
                assert_eq!(s.query_class(built.root, class::BORDER_ELEMENT).len(), built.borders.len());
                built.borders.len()
            })
            .collect();
        assert_eq!(counts, vec![6, 6, 7, 5]);
    }

    #[test]
    fn bottom_to_top_segments_start_from_the_bottom() {
        let (s, built) = build_with(
            ToastOptions::new().animation_direction(AnimationDirection::BottomToTop),
            "hi",
            ToastType::Success,
        );
        let first = built.borders[0];
        assert!(s.has_class(first, "border-left-top"));
        assert!(s.has_class(first, "border-success"));
        assert!(s.has_class(first, "animation-bottom-to-top"));
        assert_eq!(s.style(first, "height").as_deref(), Some("0%"));
        assert_eq!(s.style(first, "bottom").as_deref(), Some("0%"));
        assert_eq!(s.style(first, "top"), None);
    }

    #[test]
    fn fill_geometry_follows_axis() {
        let (s, built) = build_with(
            ToastOptions::new().animation_direction(AnimationDirection::TopToBottom),
            "hi",
            ToastType::Info,
        );
        let fill = built.fill.expect("fill step ran");
        assert_eq!(s.style(fill, "height").as_deref(), Some("0%"));
        assert_eq!(s.style(fill, "width").as_deref(), Some("100%"));
        assert!(s.has_class(fill, "animation-top-to-bottom"));

        let (s, built) = build_with(ToastOptions::new(), "hi", ToastType::Info);
        let fill = built.fill.expect("fill step ran");
        assert_eq!(s.style(fill, "width").as_deref(), Some("0%"));
        assert_eq!(s.style(fill, "height"), None);
    }

    #[test]
    fn root_attributes_and_classes() {
        let (s, built) = build_with(ToastOptions::new(), "hi", ToastType::Error);
        let root = built.root;
        assert_eq!(s.attribute(root, "role").as_deref(), Some("alert"));
        assert_eq!(s.attribute(root, "id"), s.attribute(root, "data-toast-id"));
        assert_eq!(
            s.attribute(root, "data-animation-direction").as_deref(),
            Some("left-to-right")
        );
        assert_eq!(s.classes(root), vec!["toast", "toast-error"]);
        assert!(!s.is_attached(root));
    }

    #[test]
    fn message_markup_is_escaped_text() {
        let (s, built) = build_with(
            ToastOptions::new(),
            "<script>alert('x')</script>",
            ToastType::Info,
        );
        let message = s.query_class(built.root, class::TOAST_MESSAGE)[0];
        assert_eq!(
            s.text(message),
            Some("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;")
        );
        assert!(s.query_tag(built.root, "script").is_empty());
        assert!(!s.outer_html(built.root).contains("<script>"));
    }

    #[test]
    fn title_comes_from_the_type() {
        let (s, built) = build_with(ToastOptions::new(), "hi", ToastType::Warning);
        let title = s.query_class(built.root, class::TOAST_TITLE)[0];
        assert_eq!(s.text(title), Some("Warning"));
    }

    #[test]
    fn close_button_is_optional_and_labelled() {
        let (s, built) = build_with(ToastOptions::new(), "hi", ToastType::Info);
        let button = built.close_button.expect("close button by default");
        assert_eq!(s.tag(button), Some("button"));
        assert_eq!(s.attribute(button, "aria-label").as_deref(), Some(CLOSE_LABEL));

        let (s, built) = build_with(ToastOptions::new().show_close_button(false), "hi", ToastType::Info);
        assert_eq!(built.close_button, None);
        assert!(s.query_class(built.root, class::TOAST_CLOSE).is_empty());
    }

    #[test]
    fn custom_icon_replaces_default() {
        let (s, built) = build_with(ToastOptions::new().icon("<i>★</i>"), "hi", ToastType::Info);
        let icon = s.query_class(built.root, class::TOAST_ICON)[0];
        assert_eq!(s.markup(icon), Some("<i>★</i>"));
        assert!(s.has_class(icon, "toast-icon-info"));
    }

    #[test]
    fn color_overrides_reach_border_segments() {
        let options = ToastOptions::new()
            .background_color("#111")
            .text_color("#eee")
            .border_color("red")
            .class_name("wide loud");
        let (s, built) = build_with(options, "hi", ToastType::Info);
        assert_eq!(s.style(built.root, "background-color").as_deref(), Some("#111"));
        assert_eq!(s.style(built.root, "color").as_deref(), Some("#eee"));
        assert_eq!(s.style(built.root, "border-color").as_deref(), Some("red"));
        for border in &built.borders {
            assert_eq!(s.style(*border, "background-color").as_deref(), Some("red"));
        }
        assert!(s.has_class(built.root, "wide"));
        assert!(s.has_class(built.root, "loud"));
    }

    #[test]
    fn disabled_animations_mark_the_root() {
        let mut surface = HeadlessSurface::new();
        let resolved = ResolvedOptions::resolve(&ToastOptions::new(), &ToastConfig::default());
        let id = ToastId::from_parts(5, 5);
        let built = build_toast(
            &mut surface,
            ToastContent {
                id: &id,
                message: "hi",
                ty: ToastType::Info,
                options: &resolved,
            },
            AnimationFlags {
                border: false,
                fill: false,
            },
            IconSet::default(),
        );
        assert!(surface.has_class(built.root, class::NO_BORDER_ANIMATION));
        assert!(surface.has_class(built.root, class::NO_FILL_ANIMATION));
    }

    #[test]
    fn parts_are_appended_in_step_order() {
        let (s, built) = build_with(ToastOptions::new(), "hi", ToastType::Info);
        let children = s.children(built.root);
        assert_eq!(children.len(), 6 + 2);
        assert!(s.has_class(children[6], class::FILL_PROGRESS));
        assert!(s.has_class(children[7], class::TOAST_CONTENT));
    }
}
