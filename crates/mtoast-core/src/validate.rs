#![forbid(unsafe_code)]

//! Range checks for options and configuration patches.
//!
//! Token validity (positions, directions) is already enforced by the types;
//! string input goes through [`parse_position`] and [`parse_direction`] or
//! the `from_json` constructors. What remains are the numeric ranges.
//!
//! Both checks are pure and run before any state is touched.

use crate::config::{AnimationDirection, ToastConfigPatch, ToastOptions, ToastPosition};
use crate::error::{Result, ToastError};

/// Check per-toast options.
///
/// Fails with [`ToastError::InvalidOption`] when `autoDismiss` is negative.
pub fn validate_toast_options(options: &ToastOptions) -> Result<()> {
    if let Some(ms) = options.auto_dismiss
        && ms < 0
    {
        return Err(ToastError::InvalidOption(format!(
            "autoDismiss must be a non-negative number, got {ms}"
        )));
    }
    Ok(())
}

/// Check a configuration patch.
///
/// Fails with [`ToastError::InvalidConfig`] when a count is not positive or
/// a duration is negative.
pub fn validate_config(patch: &ToastConfigPatch) -> Result<()> {
    let counts = [
        ("maxVisibleStackToasts", patch.max_visible_stack_toasts),
        ("maxRenderedToasts", patch.max_rendered_toasts),
    ];
    for (name, value) in counts {
        if let Some(n) = value
            && n < 1
        {
            return Err(ToastError::InvalidConfig(format!(
                "{name} must be a positive number, got {n}"
            )));
        }
    }

    let durations = [
        ("defaultDuration", patch.default_duration),
        ("animationDuration", patch.animation_duration),
    ];
    for (name, value) in durations {
        if let Some(ms) = value
            && ms < 0
        {
            return Err(ToastError::InvalidConfig(format!(
                "{name} must be a non-negative number, got {ms}"
            )));
        }
    }

    let geometry = [
        ("stackOffsetY", patch.stack_offset_y),
        ("stackOffsetX", patch.stack_offset_x),
        ("scaleDecrementPerLevel", patch.scale_decrement_per_level),
        ("opacityDecrementPerLevel", patch.opacity_decrement_per_level),
    ];
    for (name, value) in geometry {
        if let Some(v) = value
            && !v.is_finite()
        {
            return Err(ToastError::InvalidConfig(format!(
                "{name} must be a finite number"
            )));
        }
    }

    Ok(())
}

/// Parse a position token supplied as per-toast input.
pub fn parse_position(token: &str) -> Result<ToastPosition> {
    token
        .parse()
        .map_err(|err: crate::config::UnknownToken| ToastError::InvalidOption(err.to_string()))
}

/// Parse a direction token supplied as per-toast input.
pub fn parse_direction(token: &str) -> Result<AnimationDirection> {
    token
        .parse()
        .map_err(|err: crate::config::UnknownToken| ToastError::InvalidOption(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_auto_dismiss_is_rejected() {
        let err = validate_toast_options(&ToastOptions::new().auto_dismiss(-1)).unwrap_err();
        assert!(matches!(err, ToastError::InvalidOption(_)));
        assert!(validate_toast_options(&ToastOptions::new().auto_dismiss(0)).is_ok());
        assert!(validate_toast_options(&ToastOptions::new()).is_ok());
    }

    #[test]
    fn counts_must_be_positive() {
        for patch in [
            ToastConfigPatch::new().max_visible_stack_toasts(0),
            ToastConfigPatch::new().max_rendered_toasts(-3),
        ] {
            assert!(matches!(
                validate_config(&patch),
                Err(ToastError::InvalidConfig(_))
            ));
        }
        assert!(validate_config(&ToastConfigPatch::new().max_rendered_toasts(1)).is_ok());
    }

    #[test]
    fn durations_must_be_non_negative() {
        assert!(validate_config(&ToastConfigPatch::new().default_duration(-1)).is_err());
        assert!(validate_config(&ToastConfigPatch::new().animation_duration(-5)).is_err());
        assert!(validate_config(&ToastConfigPatch::new().default_duration(0)).is_ok());
    }

    #[test]
    fn geometry_must_be_finite() {
        let patch = ToastConfigPatch::new().stack_offsets(f64::NAN, 10.0);
        assert!(validate_config(&patch).is_err());
    }

    #[test]
    fn unknown_tokens_are_invalid_options() {
        assert_eq!(parse_position("top-left"), Ok(ToastPosition::TopLeft));
        assert_eq!(
            parse_position("upper-left"),
            Err(ToastError::InvalidOption("Invalid position: upper-left".into()))
        );
        assert_eq!(
            parse_direction("diagonal"),
            Err(ToastError::InvalidOption(
                "Invalid animation direction: diagonal".into()
            ))
        );
    }
}
