use crate::theme::{Rgb, Theme};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed grid every chart is drawn on. Plot lines and tier bands share the
/// same steps but start from different origins: bands fill the plot area from
/// its top-left corner, line points sit in the middle of each season column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub x_inc: i32,
    pub y_inc: i32,
    pub area_x: i32,
    pub area_y: i32,
    pub line_origin_x: i32,
    pub line_origin_y: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            x_inc: 12,
            y_inc: 5,
            area_x: 39,
            area_y: 69,
            line_origin_x: 45,
            line_origin_y: 66,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Document width is `margin + seasons * x_inc`.
    pub margin: f32,
    pub height: f32,
    pub title_y: f32,
    pub title_font_size: f32,
    pub title_suffix: String,
    pub axis_label: String,
    pub axis_label_x: f32,
    pub axis_label_y: f32,
    pub axis_label_font_size: f32,
    pub year_label_x: f32,
    pub year_label_y: f32,
    pub year_label_pivot_y: f32,
    pub year_label_font_size: f32,
    pub year_label_every: usize,
    pub rank_mark_every: u32,
    pub five_season_every: usize,
    pub outline_width: f32,
    pub five_season_width: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            height: 500.0,
            title_y: 45.0,
            title_font_size: 30.0,
            title_suffix: "League Performance".to_string(),
            axis_label: "Position".to_string(),
            axis_label_x: 22.0,
            axis_label_y: 264.0,
            axis_label_font_size: 15.0,
            year_label_x: 51.0,
            year_label_y: 502.0,
            year_label_pivot_y: 492.0,
            year_label_font_size: 11.0,
            year_label_every: 2,
            rank_mark_every: 10,
            five_season_every: 5,
            outline_width: 1.0,
            five_season_width: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 500.0,
            font_family: "Arial".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub grid: GridConfig,
    pub chart: ChartConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<ThemeOverrides>,
    grid: Option<GridOverrides>,
    chart: Option<ChartOverrides>,
    render: Option<RenderOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeOverrides {
    font_family: Option<String>,
    background: Option<Rgb>,
    text_color: Option<Rgb>,
    outline_color: Option<Rgb>,
    five_season_color: Option<Rgb>,
    tier_colors: Option<Vec<Rgb>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridOverrides {
    x_inc: Option<i32>,
    y_inc: Option<i32>,
    area_x: Option<i32>,
    area_y: Option<i32>,
    line_origin_x: Option<i32>,
    line_origin_y: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartOverrides {
    margin: Option<f32>,
    height: Option<f32>,
    title_y: Option<f32>,
    title_font_size: Option<f32>,
    title_suffix: Option<String>,
    axis_label: Option<String>,
    year_label_every: Option<usize>,
    rank_mark_every: Option<u32>,
    five_season_every: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOverrides {
    width: Option<f32>,
    height: Option<f32>,
    font_family: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = theme.background {
            config.theme.background = v;
        }
        if let Some(v) = theme.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = theme.outline_color {
            config.theme.outline_color = v;
        }
        if let Some(v) = theme.five_season_color {
            config.theme.five_season_color = v;
        }
        if let Some(v) = theme.tier_colors {
            config.theme.tier_colors = v;
        }
    }

    if let Some(grid) = parsed.grid {
        if let Some(v) = grid.x_inc {
            config.grid.x_inc = v;
        }
        if let Some(v) = grid.y_inc {
            config.grid.y_inc = v;
        }
        if let Some(v) = grid.area_x {
            config.grid.area_x = v;
        }
        if let Some(v) = grid.area_y {
            config.grid.area_y = v;
        }
        if let Some(v) = grid.line_origin_x {
            config.grid.line_origin_x = v;
        }
        if let Some(v) = grid.line_origin_y {
            config.grid.line_origin_y = v;
        }
    }
    if config.grid.x_inc <= 0 || config.grid.y_inc <= 0 {
        return Err(anyhow::anyhow!(
            "grid steps must be positive (xInc = {}, yInc = {})",
            config.grid.x_inc,
            config.grid.y_inc
        ));
    }

    if let Some(chart) = parsed.chart {
        if let Some(v) = chart.margin {
            config.chart.margin = v;
        }
        if let Some(v) = chart.height {
            config.chart.height = v;
        }
        if let Some(v) = chart.title_y {
            config.chart.title_y = v;
        }
        if let Some(v) = chart.title_font_size {
            config.chart.title_font_size = v;
        }
        if let Some(v) = chart.title_suffix {
            config.chart.title_suffix = v;
        }
        if let Some(v) = chart.axis_label {
            config.chart.axis_label = v;
        }
        if let Some(v) = chart.year_label_every {
            config.chart.year_label_every = v.max(1);
        }
        if let Some(v) = chart.rank_mark_every {
            config.chart.rank_mark_every = v.max(1);
        }
        if let Some(v) = chart.five_season_every {
            config.chart.five_season_every = v.max(1);
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.font_family {
            config.render.font_family = v;
        }
    }

    Ok(config)
}
