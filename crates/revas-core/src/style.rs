//! # Style Module
//!
//! The flattened, already-resolved visual record of one node.
//!
//! Every field is optional and absence means "no effect". Numeric fields
//! additionally treat `0` and `NaN` as unset wherever zero is the neutral
//! value, so `scale: 0` disables scaling instead of collapsing the node.

use crate::color::Color;
use crate::geometry::CornerRadii;
use serde::{Deserialize, Serialize};

/// Whether content overflowing the frame is clipped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    Hidden,
    /// Also absorbs `scroll`, `auto` and any other non-clipping value.
    #[default]
    #[serde(other)]
    Visible,
}

/// Drop shadow applied to a node's own background and border.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    pub opacity: Option<f32>,

    // Transform
    pub translate_x: Option<f32>,
    pub translate_y: Option<f32>,
    /// Rotation in radians about the frame center.
    pub rotate: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub scale: Option<f32>,

    pub overflow: Option<Overflow>,

    // Box
    pub background_color: Option<Color>,
    pub border_color: Option<Color>,
    pub border_width: Option<f32>,
    pub border_radius: Option<f32>,
    pub border_top_left_radius: Option<f32>,
    pub border_top_right_radius: Option<f32>,
    pub border_bottom_right_radius: Option<f32>,
    pub border_bottom_left_radius: Option<f32>,

    // Shadow
    pub shadow_color: Option<Color>,
    pub shadow_offset_x: Option<f32>,
    pub shadow_offset_y: Option<f32>,
    pub shadow_blur: Option<f32>,

    /// Forces path construction (and therefore `fill`/`stroke` on the path)
    /// even for square, unclipped boxes.
    pub path: Option<bool>,
}

/// Present, non-zero and not NaN.
pub(crate) fn set(value: Option<f32>) -> Option<f32> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

impl Style {
    /// Resolved opacity, `1.0` when unset.
    pub fn opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn has_translate(&self) -> bool {
        set(self.translate_x).is_some() || set(self.translate_y).is_some()
    }

    pub fn has_scale(&self) -> bool {
        set(self.scale_x).is_some() || set(self.scale_y).is_some() || set(self.scale).is_some()
    }

    pub fn has_rotate(&self) -> bool {
        set(self.rotate).is_some()
    }

    pub fn has_transform(&self) -> bool {
        self.has_translate() || self.has_rotate() || self.has_scale()
    }

    pub fn has_clip(&self) -> bool {
        self.overflow == Some(Overflow::Hidden)
    }

    pub fn has_background(&self) -> bool {
        self.background_color
            .is_some_and(|color| !color.is_transparent())
    }

    pub fn has_border(&self) -> bool {
        self.border_color.is_some() && self.border_width.is_some_and(|w| w > 0.0)
    }

    pub fn has_radius(&self) -> bool {
        [
            self.border_radius,
            self.border_top_left_radius,
            self.border_top_right_radius,
            self.border_bottom_right_radius,
            self.border_bottom_left_radius,
        ]
        .into_iter()
        .any(|r| set(r).is_some())
    }

    pub fn has_custom_path(&self) -> bool {
        self.path.unwrap_or(false)
    }

    /// Per-corner radius, falling back to the uniform radius, then to 0.
    pub fn radii(&self) -> CornerRadii {
        let corner = |r: Option<f32>| set(r).or(set(self.border_radius)).unwrap_or(0.0);
        CornerRadii {
            top_left: corner(self.border_top_left_radius),
            top_right: corner(self.border_top_right_radius),
            bottom_right: corner(self.border_bottom_right_radius),
            bottom_left: corner(self.border_bottom_left_radius),
        }
    }

    /// Scale factors, or `None` when no scale field is set.
    ///
    /// An axis without its own factor uses the uniform `scale`, then 1.0.
    pub fn scale_factors(&self) -> Option<(f32, f32)> {
        if !self.has_scale() {
            return None;
        }
        let uniform = set(self.scale);
        let sx = set(self.scale_x).or(uniform).unwrap_or(1.0);
        let sy = set(self.scale_y).or(uniform).unwrap_or(1.0);
        Some((sx, sy))
    }

    /// The shadow to apply to this node's box, if any.
    pub fn shadow(&self) -> Option<Shadow> {
        let color = self.shadow_color.filter(|c| !c.is_transparent())?;
        Some(Shadow {
            color,
            offset_x: set(self.shadow_offset_x).unwrap_or(0.0),
            offset_y: set(self.shadow_offset_y).unwrap_or(0.0),
            blur: set(self.shadow_blur).unwrap_or(0.0),
        })
    }

    /// Field-wise overlay: every field set in `over` replaces ours.
    pub fn merged(&self, over: &Style) -> Style {
        macro_rules! pick {
            ($($field:ident),* $(,)?) => {
                Style {
                    $($field: over.$field.or(self.$field),)*
                }
            };
        }
        pick!(
            opacity,
            translate_x,
            translate_y,
            rotate,
            scale_x,
            scale_y,
            scale,
            overflow,
            background_color,
            border_color,
            border_width,
            border_radius,
            border_top_left_radius,
            border_top_right_radius,
            border_bottom_right_radius,
            border_bottom_left_radius,
            shadow_color,
            shadow_offset_x,
            shadow_offset_y,
            shadow_blur,
            path,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_are_neutral() {
        let style = Style {
            translate_x: Some(0.0),
            scale: Some(0.0),
            rotate: Some(f32::NAN),
            ..Default::default()
        };
        assert!(!style.has_transform());
        assert_eq!(style.scale_factors(), None);
    }

    #[test]
    fn single_axis_scale_keeps_other_axis() {
        let style = Style {
            scale_x: Some(2.0),
            ..Default::default()
        };
        assert_eq!(style.scale_factors(), Some((2.0, 1.0)));

        let style = Style {
            scale_y: Some(3.0),
            scale: Some(0.5),
            ..Default::default()
        };
        assert_eq!(style.scale_factors(), Some((0.5, 3.0)));
    }

    #[test]
    fn corner_radius_falls_back_to_uniform() {
        let style = Style {
            border_radius: Some(8.0),
            border_top_left_radius: Some(2.0),
            border_bottom_right_radius: Some(0.0),
            ..Default::default()
        };
        let radii = style.radii();
        assert_eq!(radii.top_left, 2.0);
        assert_eq!(radii.top_right, 8.0);
        assert_eq!(radii.bottom_right, 8.0);
        assert_eq!(radii.bottom_left, 8.0);
    }

    #[test]
    fn transparent_background_is_absent() {
        let style = Style {
            background_color: Some(Color::TRANSPARENT),
            ..Default::default()
        };
        assert!(!style.has_background());
    }

    #[test]
    fn border_needs_color_and_positive_width() {
        let mut style = Style {
            border_width: Some(2.0),
            ..Default::default()
        };
        assert!(!style.has_border());
        style.border_color = Some(Color::BLACK);
        assert!(style.has_border());
        style.border_width = Some(0.0);
        assert!(!style.has_border());
    }

    #[test]
    fn shadow_requires_color() {
        let mut style = Style {
            shadow_offset_x: Some(4.0),
            shadow_blur: Some(6.0),
            ..Default::default()
        };
        assert_eq!(style.shadow(), None);
        style.shadow_color = Some(Color::BLACK);
        let shadow = style.shadow().unwrap();
        assert_eq!(shadow.offset_x, 4.0);
        assert_eq!(shadow.offset_y, 0.0);
        assert_eq!(shadow.blur, 6.0);
    }

    #[test]
    fn merged_prefers_overlay() {
        let base = Style {
            opacity: Some(0.5),
            background_color: Some(Color::WHITE),
            ..Default::default()
        };
        let over = Style {
            background_color: Some(Color::BLACK),
            ..Default::default()
        };
        let merged = base.merged(&over);
        assert_eq!(merged.opacity, Some(0.5));
        assert_eq!(merged.background_color, Some(Color::BLACK));
    }

    #[test]
    fn deserializes_camel_case() {
        let style: Style = serde_json::from_str(
            r##"{"backgroundColor": "#fff", "borderTopLeftRadius": 4, "overflow": "hidden"}"##,
        )
        .unwrap();
        assert_eq!(style.background_color, Some(Color::WHITE));
        assert_eq!(style.border_top_left_radius, Some(4.0));
        assert!(style.has_clip());
    }

    #[test]
    fn non_clipping_overflow_values_parse_as_visible() {
        for value in ["visible", "scroll", "auto", "clip-me-not"] {
            let style: Style =
                serde_json::from_str(&format!(r#"{{"overflow": "{}"}}"#, value)).unwrap();
            assert_eq!(style.overflow, Some(Overflow::Visible), "{}", value);
            assert!(!style.has_clip());
        }
    }
}
