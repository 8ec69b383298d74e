use crate::ir::LineStyle;
use crate::layout::geometry::PathData;
use crate::layout::style::StrokeLayer;
use crate::layout::{ChartKind, ChartLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub kind: String,
    pub name: String,
    pub slug: String,
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub bands: Vec<BandDump>,
    pub segments: Vec<SegmentDump>,
}

#[derive(Debug, Serialize)]
pub struct BandDump {
    pub tier: usize,
    pub fill: String,
    pub d: String,
}

#[derive(Debug, Serialize)]
pub struct SegmentDump {
    pub id: String,
    pub club: String,
    pub style: String,
    pub discontinuous: bool,
    pub d: String,
    pub commands: PathData,
    pub layers: Vec<StrokeLayer>,
}

impl LayoutDump {
    pub fn from_layout(layout: &ChartLayout) -> Self {
        let bands = layout
            .bands()
            .map(|band| BandDump {
                tier: band.tier,
                fill: band.fill.to_hex(),
                d: band.path.to_svg(),
            })
            .collect();

        let segments = layout
            .plot_segments()
            .map(|segment| SegmentDump {
                id: segment.id.clone(),
                club: segment.club.clone(),
                style: style_name(segment.style).to_string(),
                discontinuous: segment.discontinuous,
                d: segment.path.to_svg(),
                commands: segment.path.clone(),
                layers: segment.layers.clone(),
            })
            .collect();

        LayoutDump {
            kind: match layout.kind {
                ChartKind::Club => "club".to_string(),
                ChartKind::Derby => "derby".to_string(),
            },
            name: layout.name.clone(),
            slug: layout.slug.clone(),
            title: layout.title.clone(),
            width: layout.width,
            height: layout.height,
            bands,
            segments,
        }
    }
}

fn style_name(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "solid",
        LineStyle::Bordered => "bordered",
        LineStyle::Dashed => "dashed",
    }
}

pub fn write_layout_dump(path: &Path, layouts: &[ChartLayout]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump: Vec<LayoutDump> = layouts.iter().map(LayoutDump::from_layout).collect();
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
