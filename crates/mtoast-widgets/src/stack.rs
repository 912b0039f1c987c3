#![forbid(unsafe_code)]

//! Stacking computation.
//!
//! Toasts fan out behind the newest one: each tier back is dimmer, smaller,
//! and nudged away from the anchor. Past the visible-stack cap they collapse
//! onto the last tier and only keep fading.
//!
//! [`compute_stack`] is a pure function of the geometry and the number of
//! toasts; [`apply_slot`] writes one slot onto an element as custom
//! properties the stylesheet reads.
//!
//! # Invariants
//!
//! 1. At most `max_rendered` slots are produced.
//! 2. `z_index` strictly decreases with index; the newest is on top.
//! 3. Tiers below the visible cap form arithmetic sequences in opacity and
//!    scale; hidden tiers never exceed the last visible tier.
//! 4. Offsets are never negative zero (`-0px` would leak into the styles).

use mtoast_core::{Document, HorizontalAnchor, NodeId, ToastConfig, ToastPosition, VerticalAnchor};

use crate::theme::class;

/// Opacity floor for a visible toast.
pub const MIN_OPACITY: f64 = 0.05;
/// Opacity lost per hidden tier.
pub const HIDDEN_OPACITY_DECREMENT: f64 = 0.15;
/// z-index step between adjacent toasts.
pub const Z_INDEX_MULTIPLIER: u32 = 10;

/// The configuration fields stacking depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackGeometry {
    /// Container anchor.
    pub position: ToastPosition,
    /// Distinct tiers before collapsing (at least 1).
    pub max_visible: usize,
    /// Slots produced at most.
    pub max_rendered: usize,
    /// Horizontal px per tier.
    pub offset_x: f64,
    /// Vertical px per tier.
    pub offset_y: f64,
    /// Scale lost per tier.
    pub scale_decrement: f64,
    /// Opacity lost per tier.
    pub opacity_decrement: f64,
}

impl Default for StackGeometry {
    fn default() -> Self {
        Self::from(&ToastConfig::default())
    }
}

impl From<&ToastConfig> for StackGeometry {
    fn from(config: &ToastConfig) -> Self {
        Self {
            position: config.position,
            max_visible: config.max_visible_stack_toasts.max(1),
            max_rendered: config.max_rendered_toasts,
            offset_x: config.stack_offset_x,
            offset_y: config.stack_offset_y,
            scale_decrement: config.scale_decrement_per_level,
            opacity_decrement: config.opacity_decrement_per_level,
        }
    }
}

impl StackGeometry {
    /// Offset of tier `tier`, reflected for the anchor.
    #[must_use]
    pub fn offsets(&self, tier: usize) -> (f64, f64) {
        let base_x = tier as f64 * self.offset_x;
        let base_y = tier as f64 * self.offset_y;
        let x = match self.position.horizontal() {
            HorizontalAnchor::Right => base_x,
            HorizontalAnchor::Left => -base_x,
            HorizontalAnchor::Center => 0.0,
        };
        let y = match self.position.vertical() {
            VerticalAnchor::Bottom => base_y,
            VerticalAnchor::Top => -base_y,
        };
        // Adding +0.0 turns -0.0 into 0.0.
        (x + 0.0, y + 0.0)
    }

    fn tier_opacity(&self, tier: usize) -> f64 {
        1.0 - tier as f64 * self.opacity_decrement
    }

    fn tier_scale(&self, tier: usize) -> f64 {
        1.0 - tier as f64 * self.scale_decrement
    }
}

/// Visual parameters of one stack position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackSlot {
    /// Position in the stack (0 = newest).
    pub index: usize,
    /// Opacity while visible, before the floor.
    pub opacity: f64,
    /// Scale factor.
    pub scale: f64,
    /// Horizontal offset in px.
    pub x_offset: f64,
    /// Vertical offset in px.
    pub y_offset: f64,
    /// Stacking order.
    pub z_index: u32,
}

impl StackSlot {
    /// Opacity actually painted: `0` while hidden, floored while visible.
    #[must_use]
    pub fn applied_opacity(&self, visible: bool) -> f64 {
        if visible {
            self.opacity.max(MIN_OPACITY)
        } else {
            0.0
        }
    }
}

/// Slots for the first `min(len, max_rendered)` toasts.
#[must_use]
pub fn compute_stack(geometry: &StackGeometry, len: usize) -> Vec<StackSlot> {
    let count = len.min(geometry.max_rendered);
    let last_tier = geometry.max_visible.saturating_sub(1);

    (0..count)
        .map(|index| {
            let tier = index.min(last_tier);
            let (x_offset, y_offset) = geometry.offsets(tier);
            let mut opacity = geometry.tier_opacity(tier);
            if index >= geometry.max_visible {
                let hidden_index = index - last_tier;
                opacity = (geometry.tier_opacity(last_tier)
                    - hidden_index as f64 * HIDDEN_OPACITY_DECREMENT)
                    .max(0.0);
            }
            StackSlot {
                index,
                opacity,
                scale: geometry.tier_scale(tier),
                x_offset,
                y_offset,
                z_index: (count - index) as u32 * Z_INDEX_MULTIPLIER,
            }
        })
        .collect()
}

/// Write `slot` onto a toast root and toggle its visibility classes.
pub fn apply_slot<D: Document + ?Sized>(doc: &mut D, node: NodeId, slot: &StackSlot, visible: bool) {
    doc.set_style(
        node,
        "--toast-opacity",
        &slot.applied_opacity(visible).to_string(),
    );
    doc.set_style(node, "--toast-scale", &slot.scale.to_string());
    doc.set_style(node, "--toast-x-offset", &format!("{}px", slot.x_offset));
    doc.set_style(node, "--toast-y-offset", &format!("{}px", slot.y_offset));
    doc.set_style(node, "--toast-z-index", &slot.z_index.to_string());
    if visible {
        doc.add_class(node, class::TOAST_VISIBLE);
        doc.remove_class(node, class::TOAST_ENTERING);
    } else {
        doc.remove_class(node, class::TOAST_VISIBLE);
        doc.add_class(node, class::TOAST_ENTERING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtoast_web::HeadlessSurface;
    use proptest::prelude::*;

    fn geometry(position: ToastPosition) -> StackGeometry {
        StackGeometry {
            position,
            ..StackGeometry::default()
        }
    }

    #[test]
    fn default_five_toast_stack() {
        let slots = compute_stack(&StackGeometry::default(), 5);
        let z: Vec<_> = slots.iter().map(|s| s.z_index).collect();
        assert_eq!(z, vec![50, 40, 30, 20, 10]);

        assert_eq!(slots[0].opacity, 1.0);
        assert_eq!(slots[1].opacity, 0.8);
        assert!((slots[2].opacity - 0.6).abs() < 1e-12);
        // Hidden tiers fade from the last visible opacity.
        assert!((slots[3].opacity - 0.45).abs() < 1e-12);
        assert!((slots[4].opacity - 0.3).abs() < 1e-12);

        assert_eq!(slots[3].scale, slots[2].scale);
        assert_eq!(slots[4].y_offset, slots[2].y_offset);
        assert_eq!(slots[2].x_offset, 8.0);
        assert_eq!(slots[2].y_offset, 20.0);
    }

    #[test]
    fn offsets_reflect_per_anchor() {
        let cases = [
            (ToastPosition::BottomRight, (4.0, 10.0)),
            (ToastPosition::BottomLeft, (-4.0, 10.0)),
            (ToastPosition::BottomCenter, (0.0, 10.0)),
            (ToastPosition::TopRight, (4.0, -10.0)),
            (ToastPosition::TopLeft, (-4.0, -10.0)),
            (ToastPosition::TopCenter, (0.0, -10.0)),
        ];
        for (position, expected) in cases {
            assert_eq!(geometry(position).offsets(1), expected, "{position}");
        }
    }

    #[test]
    fn tier_zero_has_no_negative_zero() {
        let (x, y) = geometry(ToastPosition::TopLeft).offsets(0);
        assert_eq!(format!("{x}px {y}px"), "0px 0px");
    }

    #[test]
    fn rendered_cap_limits_slots() {
        let g = StackGeometry {
            max_rendered: 2,
            ..StackGeometry::default()
        };
        assert_eq!(compute_stack(&g, 7).len(), 2);
        assert!(compute_stack(&g, 0).is_empty());
    }

    #[test]
    fn hidden_opacity_bottoms_out_at_zero() {
        let g = StackGeometry {
            max_visible: 1,
            max_rendered: 20,
            ..StackGeometry::default()
        };
        let slots = compute_stack(&g, 20);
        assert_eq!(slots[19].opacity, 0.0);
        assert_eq!(slots[19].applied_opacity(true), MIN_OPACITY);
        assert_eq!(slots[19].applied_opacity(false), 0.0);
    }

    #[test]
    fn apply_slot_writes_custom_properties() {
        let mut s = HeadlessSurface::new();
        let node = s.create_element("div");
        let slot = compute_stack(&geometry(ToastPosition::TopLeft), 2)[1];

        apply_slot(&mut s, node, &slot, false);
        assert_eq!(s.style(node, "--toast-opacity").as_deref(), Some("0"));
        assert!(s.has_class(node, class::TOAST_ENTERING));

        apply_slot(&mut s, node, &slot, true);
        assert_eq!(s.style(node, "--toast-opacity").as_deref(), Some("0.8"));
        assert_eq!(s.style(node, "--toast-scale").as_deref(), Some("0.95"));
        assert_eq!(s.style(node, "--toast-x-offset").as_deref(), Some("-4px"));
        assert_eq!(s.style(node, "--toast-y-offset").as_deref(), Some("-10px"));
        assert_eq!(s.style(node, "--toast-z-index").as_deref(), Some("10"));
        assert!(s.has_class(node, class::TOAST_VISIBLE));
        assert!(!s.has_class(node, class::TOAST_ENTERING));
    }

    fn arb_geometry() -> impl Strategy<Value = StackGeometry> {
        (
            0usize..6,
            1usize..8,
            1usize..12,
            0.0f64..20.0,
            0.0f64..20.0,
            0.001f64..0.1,
            0.001f64..0.3,
        )
            .prop_map(|(p, max_visible, max_rendered, ox, oy, sd, od)| StackGeometry {
                position: ToastPosition::ALL[p],
                max_visible,
                max_rendered,
                offset_x: ox,
                offset_y: oy,
                scale_decrement: sd,
                opacity_decrement: od,
            })
    }

    proptest! {
        #[test]
        fn z_index_strictly_decreases(g in arb_geometry(), len in 0usize..16) {
            let slots = compute_stack(&g, len);
            prop_assert!(slots.len() <= g.max_rendered);
            for pair in slots.windows(2) {
                prop_assert!(pair[0].z_index > pair[1].z_index);
            }
        }

        #[test]
        fn visible_tiers_form_arithmetic_sequences(g in arb_geometry(), len in 0usize..16) {
            let slots = compute_stack(&g, len);
            let visible = slots.len().min(g.max_visible);
            for i in 1..visible {
                let d_opacity = slots[i - 1].opacity - slots[i].opacity;
                let d_scale = slots[i - 1].scale - slots[i].scale;
                prop_assert!((d_opacity - g.opacity_decrement).abs() < 1e-9);
                prop_assert!((d_scale - g.scale_decrement).abs() < 1e-9);
            }
        }

        #[test]
        fn hidden_tiers_never_exceed_last_visible(g in arb_geometry(), len in 0usize..16) {
            let slots = compute_stack(&g, len);
            if slots.len() > g.max_visible {
                let last = slots[g.max_visible - 1];
                for slot in &slots[g.max_visible..] {
                    prop_assert!(slot.opacity <= last.opacity);
                    prop_assert!(slot.opacity >= 0.0);
                    prop_assert_eq!(slot.scale, last.scale);
                    prop_assert_eq!((slot.x_offset, slot.y_offset), (last.x_offset, last.y_offset));
                }
            }
        }
    }
}
