use crate::ir::{LineColors, LineStyle};
use crate::theme::Rgb;
use serde::Serialize;

/// Dash pattern of the inner stroke of a dashed line.
pub const DASHED_PATTERN: &str = "10,10";
/// Dotted pattern of every stroke of a bridge over an administrative jump.
pub const DISCONTINUOUS_PATTERN: &str = "1,6";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
}

impl ColorRole {
    pub fn resolve(self, colors: &LineColors) -> Rgb {
        match self {
            ColorRole::Primary => colors.primary,
            ColorRole::Secondary => colors.secondary,
        }
    }
}

/// One `<use>` stroke over a segment's shared path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeLayer {
    pub role: ColorRole,
    pub color: Rgb,
    pub width: f32,
    pub round_caps: bool,
    pub dash: Option<&'static str>,
}

/// Stroke layers for one segment, outermost first. The dotted pattern of a
/// discontinuous segment replaces whatever dash the style would use.
pub fn resolve_layers(
    style: LineStyle,
    colors: &LineColors,
    discontinuous: bool,
) -> Vec<StrokeLayer> {
    let layer = |role: ColorRole, width: f32, round_caps: bool, dash: Option<&'static str>| {
        StrokeLayer {
            role,
            color: role.resolve(colors),
            width,
            round_caps,
            dash: if discontinuous {
                Some(DISCONTINUOUS_PATTERN)
            } else {
                dash
            },
        }
    };

    match style {
        LineStyle::Solid => vec![layer(ColorRole::Primary, 4.0, true, None)],
        LineStyle::Bordered => vec![
            layer(ColorRole::Secondary, 5.0, true, None),
            layer(ColorRole::Primary, 2.0, true, None),
        ],
        LineStyle::Dashed => vec![
            layer(ColorRole::Primary, 5.0, true, None),
            layer(ColorRole::Secondary, 2.0, false, Some(DASHED_PATTERN)),
        ],
    }
}
