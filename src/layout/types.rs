use super::geometry::PathData;
use super::style::StrokeLayer;
use crate::ir::LineStyle;
use crate::theme::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Club,
    Derby,
}

/// A chart ready to be serialized: document size, title and drawables in
/// paint order.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub kind: ChartKind,
    pub name: String,
    pub slug: String,
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<ChartNode>,
}

impl ChartLayout {
    pub fn bands(&self) -> impl Iterator<Item = &TierBand> {
        self.nodes.iter().filter_map(|node| match node {
            ChartNode::Band(band) => Some(band),
            _ => None,
        })
    }

    pub fn plot_segments(&self) -> impl Iterator<Item = &PlotSegment> {
        self.nodes.iter().filter_map(|node| match node {
            ChartNode::Plot(segment) => Some(segment),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum ChartNode {
    Background { width: f32, height: f32, fill: Rgb },
    Text(TextLabel),
    Band(TierBand),
    Scaffold(ScaffoldPath),
    Plot(PlotSegment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// `rotate(angle, cx, cy)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub angle: f32,
    pub cx: f32,
    pub cy: f32,
}

#[derive(Debug, Clone)]
pub struct TextLabel {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub rotation: Option<Rotation>,
    pub anchor: TextAnchor,
    pub font_size: f32,
    pub bold: bool,
    pub fill: Option<Rgb>,
    pub content: TextContent,
}

#[derive(Debug, Clone)]
pub enum TextContent {
    Plain(String),
    Spans(Vec<TextSpan>),
}

#[derive(Debug, Clone)]
pub struct TextSpan {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct TierBand {
    pub tier: usize,
    pub path: PathData,
    pub fill: Rgb,
}

/// Outline and tick marks. These use half-pixel offsets, so they are kept as
/// ready-made path strings instead of integer [`PathData`].
#[derive(Debug, Clone)]
pub struct ScaffoldPath {
    pub d: String,
    pub stroke: Rgb,
    pub width: f32,
}

/// One segment of a club line together with the strokes drawn over it.
#[derive(Debug, Clone)]
pub struct PlotSegment {
    pub id: String,
    pub club: String,
    pub style: LineStyle,
    pub path: PathData,
    pub discontinuous: bool,
    pub layers: Vec<StrokeLayer>,
}
