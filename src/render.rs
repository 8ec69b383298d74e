use crate::config::RenderConfig;
use crate::layout::{
    ChartKind, ChartLayout, ChartNode, PlotSegment, ScaffoldPath, TextAnchor, TextContent,
    TextLabel, TierBand,
};
use crate::theme::Theme;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const CLUB_DIR: &str = "graphs-clubs";
pub const DERBY_DIR: &str = "graphs-derbies";

pub fn render_svg(layout: &ChartLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str("<?xml version='1.0' encoding='utf-8' standalone='no'?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" width=\"{width}\" height=\"{height}\" style=\"font-family: {};\">",
        escape_xml(&theme.font_family)
    ));

    for node in &layout.nodes {
        match node {
            ChartNode::Background {
                width,
                height,
                fill,
            } => {
                svg.push_str(&format!(
                    "<rect width=\"{width}\" height=\"{height}\" style=\"fill: {fill};\"/>"
                ));
            }
            ChartNode::Text(label) => svg.push_str(&text_svg(label)),
            ChartNode::Band(band) => svg.push_str(&band_svg(band)),
            ChartNode::Scaffold(path) => svg.push_str(&scaffold_svg(path)),
            ChartNode::Plot(segment) => svg.push_str(&plot_segment_svg(segment)),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn text_svg(label: &TextLabel) -> String {
    let mut attrs = String::new();
    if let Some(x) = label.x {
        attrs.push_str(&format!(" x=\"{x}\""));
    }
    if let Some(y) = label.y {
        attrs.push_str(&format!(" y=\"{y}\""));
    }
    if let Some(rotation) = label.rotation {
        attrs.push_str(&format!(
            " transform=\"rotate({}, {}, {})\"",
            rotation.angle, rotation.cx, rotation.cy
        ));
    }
    if let Some(fill) = label.fill {
        attrs.push_str(&format!(" fill=\"{fill}\""));
    }
    if label.anchor == TextAnchor::Middle {
        attrs.push_str(" text-anchor=\"middle\"");
    }
    let weight = if label.bold { "font-weight: bold; " } else { "" };
    attrs.push_str(&format!(
        " style=\"{weight}font-size: {}px\"",
        label.font_size
    ));

    let mut text = format!("<text{attrs}>");
    match &label.content {
        TextContent::Plain(content) => text.push_str(&escape_xml(content)),
        TextContent::Spans(spans) => {
            for span in spans {
                text.push_str(&format!(
                    "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
                    span.x,
                    span.y,
                    escape_xml(&span.text)
                ));
            }
        }
    }
    text.push_str("</text>");
    text
}

fn band_svg(band: &TierBand) -> String {
    format!("<path d=\"{}\" fill=\"{}\"/>", band.path, band.fill)
}

fn scaffold_svg(path: &ScaffoldPath) -> String {
    format!(
        "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        path.d, path.stroke, path.width
    )
}

/// The path is written once with an id; each stroke layer is a `<use>` of it.
fn plot_segment_svg(segment: &PlotSegment) -> String {
    let id = escape_xml(&segment.id);
    let mut group = format!(
        "<g fill=\"none\" stroke-linejoin=\"round\"><path d=\"{}\" id=\"{id}\"/>",
        segment.path
    );
    for layer in &segment.layers {
        group.push_str(&format!("<use href=\"#{id}\" xlink:href=\"#{id}\""));
        if let Some(dash) = layer.dash {
            group.push_str(&format!(" stroke-dasharray=\"{dash}\""));
        }
        if layer.round_caps {
            group.push_str(" stroke-linecap=\"round\"");
        }
        group.push_str(&format!(
            " stroke-width=\"{}\" stroke=\"{}\"/>",
            layer.width, layer.color
        ));
    }
    group.push_str("</g>");
    group
}

/// `graphs-clubs/<slug>_League_Performance` or
/// `graphs-derbies/<slug>_League_Performances`, without extension.
pub fn chart_output_stem(out_dir: &Path, layout: &ChartLayout) -> PathBuf {
    match layout.kind {
        ChartKind::Club => out_dir
            .join(CLUB_DIR)
            .join(format!("{}_League_Performance", layout.slug)),
        ChartKind::Derby => out_dir
            .join(DERBY_DIR)
            .join(format!("{}_League_Performances", layout.slug)),
    }
}

#[cfg(feature = "png")]
pub fn render_png(svg: &str, render_cfg: &RenderConfig) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.font_family = render_cfg.font_family.clone();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("render size must be positive"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    Ok(pixmap.encode_png()?)
}

#[cfg(not(feature = "png"))]
pub fn render_png(_svg: &str, _render_cfg: &RenderConfig) -> Result<Vec<u8>> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
