use super::types::{
    ChartNode, Rotation, ScaffoldPath, TextAnchor, TextContent, TextLabel, TextSpan,
};
use crate::config::{ChartConfig, GridConfig};
use crate::ir::SeasonAxis;
use crate::theme::Theme;

/// Rotated "Position" label left of the plot area.
pub fn rank_axis_label(chart: &ChartConfig) -> ChartNode {
    ChartNode::Text(TextLabel {
        x: Some(chart.axis_label_x),
        y: Some(chart.axis_label_y),
        rotation: Some(Rotation {
            angle: -90.0,
            cx: chart.axis_label_x,
            cy: chart.axis_label_y,
        }),
        anchor: TextAnchor::Middle,
        font_size: chart.axis_label_font_size,
        bold: true,
        fill: None,
        content: TextContent::Plain(chart.axis_label.clone()),
    })
}

/// Calendar years under the plot, written vertically, one every
/// `year_label_every` seasons starting from the second season.
pub fn year_labels(axis: &SeasonAxis, grid: &GridConfig, chart: &ChartConfig) -> ChartNode {
    let spans = axis
        .seasons()
        .iter()
        .skip(1)
        .step_by(chart.year_label_every.max(1))
        .map(|season| TextSpan {
            x: chart.year_label_x,
            y: chart.year_label_y + ((season.index - 1) as i32 * grid.x_inc) as f32,
            text: season.year.to_string(),
        })
        .collect();
    ChartNode::Text(TextLabel {
        x: None,
        y: None,
        rotation: Some(Rotation {
            angle: -90.0,
            cx: chart.year_label_x,
            cy: chart.year_label_pivot_y,
        }),
        anchor: TextAnchor::Start,
        font_size: chart.year_label_font_size,
        bold: false,
        fill: None,
        content: TextContent::Spans(spans),
    })
}

/// Plot area outline with one tick per season along the bottom and one tick
/// every `rank_mark_every` ranks along the left edge.
pub fn outline(
    seasons: usize,
    max_depth: u32,
    grid: &GridConfig,
    chart: &ChartConfig,
    theme: &Theme,
) -> ChartNode {
    let x_max = grid.plot_width(seasons);
    let y_max = grid.plot_height(max_depth);
    let (area_x, area_y) = (grid.area_x, grid.area_y);

    let season_ticks = format!(
        "M{},{}v6{}",
        grid.line_origin_x,
        area_y as f32 + y_max as f32 + 0.5,
        format!("m{}-6v6", grid.x_inc).repeat(seasons.saturating_sub(1))
    );

    let every = chart.rank_mark_every.max(1);
    let rank_tick_count = (1 + every..max_depth).step_by(every as usize).count();
    let rank_ticks = format!(
        "M{},{}h6{}",
        area_x as f32 - 6.5,
        grid.line_origin_y + grid.y_inc,
        format!("m-6,{}h6", every as i32 * grid.y_inc).repeat(rank_tick_count)
    );

    ChartNode::Scaffold(ScaffoldPath {
        d: format!("M{area_x},{area_y}h{x_max}v{y_max}H{area_x}z{season_ticks}{rank_ticks}"),
        stroke: theme.outline_color,
        width: chart.outline_width,
    })
}

/// Thin vertical guides every `five_season_every` seasons.
pub fn five_season_marks(
    seasons: usize,
    max_depth: u32,
    grid: &GridConfig,
    chart: &ChartConfig,
    theme: &Theme,
) -> ChartNode {
    let every = chart.five_season_every.max(1);
    let height = (grid.plot_height(max_depth) - 1).max(0);
    let count = seasons.saturating_sub(2) / every;
    let step = every as i32 * grid.x_inc;
    ChartNode::Scaffold(ScaffoldPath {
        d: format!(
            "M{},{}v{height}{}",
            grid.line_origin_x + grid.x_inc,
            grid.area_y as f32 + 0.5,
            format!("m{step}-{height}v{height}").repeat(count)
        ),
        stroke: theme.five_season_color,
        width: chart.five_season_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaffold_d(node: ChartNode) -> String {
        match node {
            ChartNode::Scaffold(path) => path.d,
            other => panic!("expected scaffold, got {other:?}"),
        }
    }

    #[test]
    fn outline_has_a_tick_per_season_and_every_ten_ranks() {
        let d = scaffold_d(outline(
            4,
            32,
            &GridConfig::default(),
            &ChartConfig::default(),
            &Theme::greyscale(),
        ));
        assert_eq!(
            d,
            "M39,69h48v160H39zM45,229.5v6m12-6v6m12-6v6m12-6v6M32.5,71h6m-6,50h6m-6,50h6m-6,50h6"
        );
    }

    #[test]
    fn five_season_marks_skip_short_axes() {
        let grid = GridConfig::default();
        let chart = ChartConfig::default();
        let theme = Theme::greyscale();
        assert_eq!(
            scaffold_d(five_season_marks(6, 20, &grid, &chart, &theme)),
            "M57,69.5v99"
        );
        assert_eq!(
            scaffold_d(five_season_marks(12, 20, &grid, &chart, &theme)),
            "M57,69.5v99m60-99v99m60-99v99"
        );
    }

    #[test]
    fn year_labels_every_other_season() {
        let axis = SeasonAxis::from_years(1939..1945);
        let node = year_labels(&axis, &GridConfig::default(), &ChartConfig::default());
        let ChartNode::Text(label) = node else {
            panic!("expected text");
        };
        let TextContent::Spans(spans) = label.content else {
            panic!("expected spans");
        };
        let years: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(years, vec!["1940", "1942", "1944"]);
        assert_eq!(spans[0].y, 502.0);
        assert_eq!(spans[1].y, 526.0);
    }

    #[test]
    fn five_season_marks_stay_well_formed_for_empty_pyramids() {
        let d = scaffold_d(five_season_marks(
            7,
            0,
            &GridConfig::default(),
            &ChartConfig::default(),
            &Theme::greyscale(),
        ));
        assert_eq!(d, "M57,69.5v0m60-0v0");
        assert!(!d.contains("--"));
    }
}
