//! Builds every chart of a league and writes them to disk.

use crate::config::Config;
use crate::ir::{ClubRecord, League};
use crate::layout::{ChartLayout, compute_club_layout, compute_derby_layout};
use crate::render::{CLUB_DIR, DERBY_DIR, chart_output_stem, render_png, render_svg};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Both,
}

impl OutputFormat {
    fn svg(self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Both)
    }

    fn png(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Both)
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    /// Only chart these clubs (by full name) and the derbies they all belong to.
    pub clubs: Option<BTreeSet<String>>,
    pub derbies: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            format: OutputFormat::Both,
            clubs: None,
            derbies: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub club_charts: usize,
    pub derby_charts: usize,
    pub files: Vec<PathBuf>,
}

/// Lays out every requested chart, club charts first then derbies, in input
/// order. Layouts are computed in parallel; the result order does not depend
/// on scheduling.
pub fn build_layouts(
    league: &League,
    config: &Config,
    options: &GenerateOptions,
) -> Result<Vec<ChartLayout>> {
    if let Some(selected) = &options.clubs {
        for name in selected {
            league.club(name)?;
        }
    }
    let wanted = |name: &str| {
        options
            .clubs
            .as_ref()
            .is_none_or(|selected| selected.contains(name))
    };

    let clubs: Vec<&ClubRecord> = league
        .clubs_in_order()
        .filter(|club| wanted(&club.full_name))
        .collect();
    let mut layouts: Vec<ChartLayout> = clubs
        .par_iter()
        .map(|club| compute_club_layout(league, club, config))
        .collect();

    if options.derbies {
        let derby_layouts = league
            .derbies
            .par_iter()
            .filter(|derby| derby.clubs.iter().all(|name| wanted(name)))
            .map(|derby| compute_derby_layout(league, derby, config))
            .collect::<crate::error::Result<Vec<_>>>()?;
        layouts.extend(derby_layouts);
    }
    Ok(layouts)
}

/// Rendered files of one chart, held in memory until all of them succeeded.
struct RenderedChart {
    outputs: Vec<(PathBuf, Vec<u8>)>,
}

fn render_chart(
    layout: &ChartLayout,
    config: &Config,
    options: &GenerateOptions,
) -> Result<RenderedChart> {
    let stem = chart_output_stem(&options.out_dir, layout);
    let svg = render_svg(layout, &config.theme);
    let mut outputs = Vec::with_capacity(2);
    if options.format.png() {
        let png = render_png(&svg, &config.render)
            .with_context(|| format!("failed to rasterize {}", layout.title))?;
        outputs.push((stem.with_extension("png"), png));
    }
    if options.format.svg() {
        outputs.push((stem.with_extension("svg"), svg.into_bytes()));
    }
    Ok(RenderedChart { outputs })
}

pub fn ensure_output_dirs(out_dir: &Path) -> Result<()> {
    for dir in [CLUB_DIR, DERBY_DIR] {
        let path = out_dir.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Writes already computed layouts. Each chart is emitted as a unit: see
/// [`write_chart_outputs`].
pub fn write_layouts(
    layouts: &[ChartLayout],
    config: &Config,
    options: &GenerateOptions,
) -> Result<Vec<PathBuf>> {
    ensure_output_dirs(&options.out_dir)?;
    let written = layouts
        .par_iter()
        .map(|layout| -> Result<Vec<PathBuf>> {
            let rendered = render_chart(layout, config, options)?;
            let paths = write_chart_outputs(rendered.outputs)
                .with_context(|| format!("failed to write chart {}", layout.title))?;
            debug!(chart = %layout.slug, files = paths.len(), "wrote chart");
            Ok(paths)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(written.into_iter().flatten().collect())
}

/// Writes every file of one chart or none of them. All outputs are staged as
/// temp files next to their targets first, then renamed into place; if any
/// rename fails the files already renamed are removed again.
pub fn write_chart_outputs(outputs: Vec<(PathBuf, Vec<u8>)>) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(outputs.len());
    for (path, bytes) in outputs {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to stage {}", path.display()))?;
        file.write_all(&bytes)
            .and_then(|()| file.as_file().sync_all())
            .with_context(|| format!("failed to stage {}", path.display()))?;
        staged.push((path, file));
    }

    let mut persisted: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (path, file) in staged {
        if let Err(err) = file.persist(&path) {
            for done in &persisted {
                if let Err(cleanup) = fs::remove_file(done) {
                    warn!(
                        path = %done.display(),
                        error = %cleanup,
                        "failed to roll back chart file"
                    );
                }
            }
            return Err(err.error)
                .with_context(|| format!("failed to write {}", path.display()));
        }
        persisted.push(path);
    }
    Ok(persisted)
}

pub fn generate_all(
    league: &League,
    config: &Config,
    options: &GenerateOptions,
) -> Result<GenerateReport> {
    let started = Instant::now();
    let layouts = build_layouts(league, config, options)?;
    let files = write_layouts(&layouts, config, options)?;

    let club_charts = layouts
        .iter()
        .filter(|layout| layout.kind == crate::layout::ChartKind::Club)
        .count();
    let report = GenerateReport {
        club_charts,
        derby_charts: layouts.len() - club_charts,
        files,
    };
    info!(
        clubs = report.club_charts,
        derbies = report.derby_charts,
        files = report.files.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generated charts"
    );
    Ok(report)
}
