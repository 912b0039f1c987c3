#![forbid(unsafe_code)]

//! Toast vocabulary: semantic types, anchor positions, animation directions,
//! per-toast options, and the global configuration record.
//!
//! Every record here serializes with the camelCase field names hosts already
//! use (`autoDismiss`, `maxVisibleStackToasts`, ...), and every token type
//! parses from and formats to its kebab-case form (`bottom-right`,
//! `left-to-right`).
//!
//! # Invariants
//!
//! 1. [`ToastConfig`] always holds a complete, validated configuration.
//! 2. [`ToastConfigPatch`] and [`ToastOptions`] are partial; numeric fields are
//!    signed so that out-of-range input survives until validation rejects it.
//! 3. [`ToastConfig::apply`] reports which aspects a patch touched by field
//!    presence, not by value difference.

use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToastError};

/// Default auto-dismiss duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 3000;
/// Default enter/exit animation duration in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 350;
/// Default number of toasts drawn at distinct stack tiers.
pub const DEFAULT_MAX_VISIBLE: usize = 3;
/// Default number of toasts kept on the surface at all.
pub const DEFAULT_MAX_RENDERED: usize = 5;

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// A token string that is not one of the recognized values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken {
    /// What kind of token was expected (`position`, `animation direction`, ...).
    pub expected: &'static str,
    /// The rejected input.
    pub token: String,
}

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.expected, self.token)
    }
}

impl std::error::Error for UnknownToken {}

/// Semantic type of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Neutral information.
    Info,
    /// Something needs attention.
    Warning,
}

impl ToastType {
    /// All semantic types in declaration order.
    pub const ALL: [Self; 4] = [Self::Success, Self::Error, Self::Info, Self::Warning];

    /// Lowercase token (`success`, `error`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }

    /// Fixed title shown above the message.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Info => "Info",
            Self::Warning => "Warning",
        }
    }
}

impl fmt::Display for ToastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownToken {
                expected: "toast type",
                token: s.to_string(),
            })
    }
}

/// Horizontal anchor of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    /// Anchored to the left edge.
    Left,
    /// Centered.
    Center,
    /// Anchored to the right edge.
    Right,
}

/// Vertical anchor of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    /// Anchored to the top edge.
    Top,
    /// Anchored to the bottom edge.
    Bottom,
}

/// Where the shared toast container sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    /// Top-left corner.
    TopLeft,
    /// Top center.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom center.
    BottomCenter,
    /// Bottom-right corner.
    #[default]
    BottomRight,
}

impl ToastPosition {
    /// All positions in declaration order.
    pub const ALL: [Self; 6] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Kebab-case token (`top-left`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Container class for this position (`position-top-left`, ...).
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::TopLeft => "position-top-left",
            Self::TopCenter => "position-top-center",
            Self::TopRight => "position-top-right",
            Self::BottomLeft => "position-bottom-left",
            Self::BottomCenter => "position-bottom-center",
            Self::BottomRight => "position-bottom-right",
        }
    }

    /// Horizontal anchor.
    #[must_use]
    pub const fn horizontal(self) -> HorizontalAnchor {
        match self {
            Self::TopLeft | Self::BottomLeft => HorizontalAnchor::Left,
            Self::TopCenter | Self::BottomCenter => HorizontalAnchor::Center,
            Self::TopRight | Self::BottomRight => HorizontalAnchor::Right,
        }
    }

    /// Vertical anchor.
    #[must_use]
    pub const fn vertical(self) -> VerticalAnchor {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => VerticalAnchor::Top,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VerticalAnchor::Bottom,
        }
    }

    /// Animation direction that reads naturally from this anchor.
    ///
    /// Right-anchored stacks sweep left-to-right, left-anchored ones
    /// right-to-left; centered stacks fill vertically toward the page.
    #[must_use]
    pub const fn default_direction(self) -> AnimationDirection {
        match self {
            Self::TopLeft | Self::BottomLeft => AnimationDirection::RightToLeft,
            Self::TopRight | Self::BottomRight => AnimationDirection::LeftToRight,
            Self::TopCenter => AnimationDirection::BottomToTop,
            Self::BottomCenter => AnimationDirection::TopToBottom,
        }
    }
}

impl fmt::Display for ToastPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastPosition {
    type Err = UnknownToken;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownToken {
                expected: "position",
                token: s.to_string(),
            })
    }
}

/// Sweep direction of the border and fill decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationDirection {
    /// Sweep from the left edge to the right edge.
    #[default]
    LeftToRight,
    /// Sweep from the right edge to the left edge.
    RightToLeft,
    /// Sweep from the top edge downward.
    TopToBottom,
    /// Sweep from the bottom edge upward.
    BottomToTop,
}

impl AnimationDirection {
    /// All directions in declaration order.
    pub const ALL: [Self; 4] = [
        Self::LeftToRight,
        Self::RightToLeft,
        Self::TopToBottom,
        Self::BottomToTop,
    ];

    /// Kebab-case token (`left-to-right`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "left-to-right",
            Self::RightToLeft => "right-to-left",
            Self::TopToBottom => "top-to-bottom",
            Self::BottomToTop => "bottom-to-top",
        }
    }

    /// Whether the sweep runs along the vertical axis.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom | Self::BottomToTop)
    }
}

impl fmt::Display for AnimationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationDirection {
    type Err = UnknownToken;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownToken {
                expected: "animation direction",
                token: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Per-toast options
// ---------------------------------------------------------------------------

/// Per-toast options. Every field is optional; see [`ResolvedOptions`] for
/// the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ToastOptions {
    /// Auto-dismiss delay in ms; `0` disables auto-dismiss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_dismiss: Option<i64>,
    /// Recorded position; the shared container decides placement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<ToastPosition>,
    /// Background color override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Text color override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Border color override (also paints the border segments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Whether to render the close button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_close_button: Option<bool>,
    /// Whether hovering pauses the auto-dismiss countdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_on_hover: Option<bool>,
    /// Extra class appended to the toast root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Raw icon markup replacing the type's default icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Sweep direction; falls back to the global direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_direction: Option<AnimationDirection>,
}

impl ToastOptions {
    /// Create empty options (all defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object using the camelCase field names.
    ///
    /// Unknown position or direction tokens are reported as
    /// [`ToastError::InvalidOption`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| ToastError::InvalidOption(err.to_string()))
    }

    /// Set the auto-dismiss delay in milliseconds.
    #[must_use]
    pub fn auto_dismiss(mut self, ms: i64) -> Self {
        self.auto_dismiss = Some(ms);
        self
    }

    /// Set the recorded position.
    #[must_use]
    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set the text color.
    #[must_use]
    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    /// Set the border color.
    #[must_use]
    pub fn border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    /// Show or hide the close button.
    #[must_use]
    pub fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = Some(show);
        self
    }

    /// Enable or disable pause-on-hover.
    #[must_use]
    pub fn pause_on_hover(mut self, pause: bool) -> Self {
        self.pause_on_hover = Some(pause);
        self
    }

    /// Append a class to the toast root.
    #[must_use]
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Replace the default icon with raw markup.
    #[must_use]
    pub fn icon(mut self, markup: impl Into<String>) -> Self {
        self.icon = Some(markup.into());
        self
    }

    /// Set the sweep direction.
    #[must_use]
    pub fn animation_direction(mut self, direction: AnimationDirection) -> Self {
        self.animation_direction = Some(direction);
        self
    }
}

/// Fully populated per-toast options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOptions {
    /// Auto-dismiss delay in ms; `0` means the toast stays until dismissed.
    pub auto_dismiss: u64,
    /// Recorded position.
    pub position: ToastPosition,
    /// Background color override.
    pub background_color: Option<String>,
    /// Text color override.
    pub text_color: Option<String>,
    /// Border color override.
    pub border_color: Option<String>,
    /// Whether the close button is rendered.
    pub show_close_button: bool,
    /// Whether hovering pauses the countdown.
    pub pause_on_hover: bool,
    /// Extra root class.
    pub class_name: Option<String>,
    /// Raw icon markup override.
    pub icon: Option<String>,
    /// Effective sweep direction.
    pub animation_direction: AnimationDirection,
}

impl ResolvedOptions {
    /// Merge `options` over the defaults derived from `config`.
    ///
    /// Assumes `options` already passed validation. Empty strings are
    /// treated as "not set".
    #[must_use]
    pub fn resolve(options: &ToastOptions, config: &ToastConfig) -> Self {
        fn non_empty(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|s| !s.is_empty()).cloned()
        }

        Self {
            auto_dismiss: options
                .auto_dismiss
                .map_or(config.default_duration, |ms| u64::try_from(ms).unwrap_or(0)),
            position: options.position.unwrap_or(config.position),
            background_color: non_empty(&options.background_color),
            text_color: non_empty(&options.text_color),
            border_color: non_empty(&options.border_color),
            show_close_button: options.show_close_button.unwrap_or(true),
            pause_on_hover: options.pause_on_hover.unwrap_or(true),
            class_name: non_empty(&options.class_name),
            icon: non_empty(&options.icon),
            animation_direction: options
                .animation_direction
                .unwrap_or(config.animation_direction),
        }
    }

    /// Whether a hover may pause this toast's countdown.
    #[must_use]
    pub const fn pausable(&self) -> bool {
        self.pause_on_hover && self.auto_dismiss > 0
    }
}

// ---------------------------------------------------------------------------
// Global configuration
// ---------------------------------------------------------------------------

/// Global configuration shared by every toast of one manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastConfig {
    /// Container anchor.
    pub position: ToastPosition,
    /// Toasts drawn at distinct stack tiers before collapsing.
    pub max_visible_stack_toasts: usize,
    /// Vertical px offset per stack tier.
    pub stack_offset_y: f64,
    /// Horizontal px offset per stack tier.
    pub stack_offset_x: f64,
    /// Scale lost per stack tier.
    pub scale_decrement_per_level: f64,
    /// Opacity lost per stack tier.
    pub opacity_decrement_per_level: f64,
    /// Hard cap on toasts kept on the surface.
    pub max_rendered_toasts: usize,
    /// Auto-dismiss delay used when a toast does not set one (ms).
    pub default_duration: u64,
    /// Enter/exit transition length exposed to the stylesheet (ms).
    pub animation_duration: u64,
    /// Whether border segments animate.
    pub enable_border_animation: bool,
    /// Whether the fill bar animates.
    pub enable_fill_animation: bool,
    /// Default sweep direction.
    pub animation_direction: AnimationDirection,
    /// Raw stylesheet text injected verbatim.
    #[serde(rename = "customCSS")]
    pub custom_css: String,
    /// Whether hovering one toast pauses the others too.
    pub pause_background_toasts_on_hover: bool,
}

impl Default for ToastConfig {
    fn default() -> Self {
        let position = ToastPosition::default();
        Self {
            position,
            max_visible_stack_toasts: DEFAULT_MAX_VISIBLE,
            stack_offset_y: 10.0,
            stack_offset_x: 4.0,
            scale_decrement_per_level: 0.05,
            opacity_decrement_per_level: 0.2,
            max_rendered_toasts: DEFAULT_MAX_RENDERED,
            default_duration: DEFAULT_DURATION_MS,
            animation_duration: DEFAULT_ANIMATION_DURATION_MS,
            enable_border_animation: true,
            enable_fill_animation: true,
            animation_direction: position.default_direction(),
            custom_css: String::new(),
            pause_background_toasts_on_hover: true,
        }
    }
}

bitflags! {
    /// Aspects of the configuration touched by a patch.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConfigChanges: u8 {
        /// Container anchor.
        const POSITION = 1 << 0;
        /// Offsets, decrements, or caps.
        const GEOMETRY = 1 << 1;
        /// Border/fill animation switches.
        const ANIMATION_FLAGS = 1 << 2;
        /// Injected stylesheet text.
        const CUSTOM_CSS = 1 << 3;
        /// Default or animation durations.
        const DURATIONS = 1 << 4;
        /// Default sweep direction.
        const DIRECTION = 1 << 5;
        /// Background pause behavior.
        const HOVER = 1 << 6;
    }
}

impl ConfigChanges {
    /// Whether the stack must be restyled.
    #[must_use]
    pub const fn affects_stack(self) -> bool {
        self.intersects(Self::POSITION.union(Self::GEOMETRY))
    }
}

impl ToastConfig {
    /// Defaults merged with `patch`, after validating it.
    pub fn from_patch(patch: &ToastConfigPatch) -> Result<Self> {
        crate::validate::validate_config(patch)?;
        let mut config = Self::default();
        config.apply(patch);
        Ok(config)
    }

    /// Merge a validated patch in place.
    ///
    /// When the patch moves the container without naming a direction, the
    /// direction follows the new position's default.
    pub fn apply(&mut self, patch: &ToastConfigPatch) -> ConfigChanges {
        let mut changes = ConfigChanges::empty();

        if let Some(position) = patch.position {
            self.position = position;
            changes |= ConfigChanges::POSITION;
            if patch.animation_direction.is_none() {
                self.animation_direction = position.default_direction();
                changes |= ConfigChanges::DIRECTION;
            }
        }
        if let Some(direction) = patch.animation_direction {
            self.animation_direction = direction;
            changes |= ConfigChanges::DIRECTION;
        }
        if let Some(n) = patch.max_visible_stack_toasts {
            self.max_visible_stack_toasts = usize::try_from(n).unwrap_or(1).max(1);
            changes |= ConfigChanges::GEOMETRY;
        }
        if let Some(n) = patch.max_rendered_toasts {
            self.max_rendered_toasts = usize::try_from(n).unwrap_or(1).max(1);
            changes |= ConfigChanges::GEOMETRY;
        }
        if let Some(y) = patch.stack_offset_y {
            self.stack_offset_y = y;
            changes |= ConfigChanges::GEOMETRY;
        }
        if let Some(x) = patch.stack_offset_x {
            self.stack_offset_x = x;
            changes |= ConfigChanges::GEOMETRY;
        }
        if let Some(d) = patch.scale_decrement_per_level {
            self.scale_decrement_per_level = d;
            changes |= ConfigChanges::GEOMETRY;
        }
        if let Some(d) = patch.opacity_decrement_per_level {
            self.opacity_decrement_per_level = d;
            changes |= ConfigChanges::GEOMETRY;
        }
        if let Some(ms) = patch.default_duration {
            self.default_duration = u64::try_from(ms).unwrap_or(0);
            changes |= ConfigChanges::DURATIONS;
        }
        if let Some(ms) = patch.animation_duration {
            self.animation_duration = u64::try_from(ms).unwrap_or(0);
            changes |= ConfigChanges::DURATIONS;
        }
        if let Some(enabled) = patch.enable_border_animation {
            self.enable_border_animation = enabled;
            changes |= ConfigChanges::ANIMATION_FLAGS;
        }
        if let Some(enabled) = patch.enable_fill_animation {
            self.enable_fill_animation = enabled;
            changes |= ConfigChanges::ANIMATION_FLAGS;
        }
        if let Some(css) = &patch.custom_css {
            self.custom_css.clone_from(css);
            changes |= ConfigChanges::CUSTOM_CSS;
        }
        if let Some(enabled) = patch.pause_background_toasts_on_hover {
            self.pause_background_toasts_on_hover = enabled;
            changes |= ConfigChanges::HOVER;
        }

        changes
    }
}

/// Partial configuration accepted by `configure` and at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ToastConfigPatch {
    /// Container anchor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<ToastPosition>,
    /// Must be positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_visible_stack_toasts: Option<i64>,
    /// Vertical px offset per tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_offset_y: Option<f64>,
    /// Horizontal px offset per tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_offset_x: Option<f64>,
    /// Scale lost per tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_decrement_per_level: Option<f64>,
    /// Opacity lost per tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity_decrement_per_level: Option<f64>,
    /// Must be positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rendered_toasts: Option<i64>,
    /// Must be non-negative (ms).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_duration: Option<i64>,
    /// Must be non-negative (ms).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_duration: Option<i64>,
    /// Border animation switch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_border_animation: Option<bool>,
    /// Fill animation switch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_fill_animation: Option<bool>,
    /// Default sweep direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_direction: Option<AnimationDirection>,
    /// Replacement stylesheet text; empty removes it.
    #[serde(rename = "customCSS", skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    /// Background pause behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_background_toasts_on_hover: Option<bool>,
}

impl ToastConfigPatch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a patch from a JSON object using the camelCase field names.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| ToastError::InvalidConfig(err.to_string()))
    }

    /// Set the container anchor.
    #[must_use]
    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the number of distinct stack tiers.
    #[must_use]
    pub fn max_visible_stack_toasts(mut self, n: i64) -> Self {
        self.max_visible_stack_toasts = Some(n);
        self
    }

    /// Set the rendered cap.
    #[must_use]
    pub fn max_rendered_toasts(mut self, n: i64) -> Self {
        self.max_rendered_toasts = Some(n);
        self
    }

    /// Set both stack offsets (px).
    #[must_use]
    pub fn stack_offsets(mut self, x: f64, y: f64) -> Self {
        self.stack_offset_x = Some(x);
        self.stack_offset_y = Some(y);
        self
    }

    /// Set the scale decrement per tier.
    #[must_use]
    pub fn scale_decrement_per_level(mut self, d: f64) -> Self {
        self.scale_decrement_per_level = Some(d);
        self
    }

    /// Set the opacity decrement per tier.
    #[must_use]
    pub fn opacity_decrement_per_level(mut self, d: f64) -> Self {
        self.opacity_decrement_per_level = Some(d);
        self
    }

    /// Set the default auto-dismiss delay (ms).
    #[must_use]
    pub fn default_duration(mut self, ms: i64) -> Self {
        self.default_duration = Some(ms);
        self
    }

    /// Set the transition length (ms).
    #[must_use]
    pub fn animation_duration(mut self, ms: i64) -> Self {
        self.animation_duration = Some(ms);
        self
    }

    /// Toggle border animation.
    #[must_use]
    pub fn enable_border_animation(mut self, enabled: bool) -> Self {
        self.enable_border_animation = Some(enabled);
        self
    }

    /// Toggle fill animation.
    #[must_use]
    pub fn enable_fill_animation(mut self, enabled: bool) -> Self {
        self.enable_fill_animation = Some(enabled);
        self
    }

    /// Set the default sweep direction.
    #[must_use]
    pub fn animation_direction(mut self, direction: AnimationDirection) -> Self {
        self.animation_direction = Some(direction);
        self
    }

    /// Replace the injected stylesheet text.
    #[must_use]
    pub fn custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = Some(css.into());
        self
    }

    /// Toggle background pausing.
    #[must_use]
    pub fn pause_background_toasts_on_hover(mut self, enabled: bool) -> Self {
        self.pause_background_toasts_on_hover = Some(enabled);
        self
    }
}
