mod axes;
pub mod bands;
pub mod geometry;
pub mod segments;
pub mod style;
pub(crate) mod types;
pub use types::*;
use axes::*;
use bands::build_tier_bands;
use segments::segment_club;
use style::resolve_layers;

use crate::config::Config;
use crate::error::Result;
use crate::ir::{ClubRecord, DerbyGroup, League};
use crate::slug::derby_slug;
use tracing::{debug, warn};

/// Chart of a single club.
pub fn compute_club_layout(league: &League, club: &ClubRecord, config: &Config) -> ChartLayout {
    let mut layout = chart_frame(
        league,
        ChartKind::Club,
        &club.full_name,
        club.short_name.clone(),
        config,
    );
    layout.nodes.extend(plot_club(club, config).into_iter().map(ChartNode::Plot));
    debug!(
        club = %club.full_name,
        segments = layout.plot_segments().count(),
        "laid out club chart"
    );
    layout
}

/// Chart overlaying every member of a derby, later members drawn on top.
pub fn compute_derby_layout(
    league: &League,
    derby: &DerbyGroup,
    config: &Config,
) -> Result<ChartLayout> {
    let members = league.derby_members(derby)?;
    let name = derby.display_name();
    let mut layout = chart_frame(league, ChartKind::Derby, &name, derby_slug(&name), config);
    for club in members {
        layout.nodes.extend(plot_club(club, config).into_iter().map(ChartNode::Plot));
    }
    debug!(
        derby = %name,
        segments = layout.plot_segments().count(),
        "laid out derby chart"
    );
    Ok(layout)
}

/// Segments of one club's line with their stroke layers. Ids are the club
/// slug followed by the segment number, so they are stable across runs.
pub fn plot_club(club: &ClubRecord, config: &Config) -> Vec<PlotSegment> {
    let segments = segment_club(&club.seasons, &config.grid);
    if segments.is_empty() {
        warn!(club = %club.full_name, "club never appears in the tracked pyramid");
    }
    segments
        .into_iter()
        .map(|segment| PlotSegment {
            id: format!("{}{}", club.short_name, segment.number),
            club: club.full_name.clone(),
            style: club.line_style,
            layers: resolve_layers(club.line_style, &club.line_colors, segment.discontinuous),
            path: segment.path,
            discontinuous: segment.discontinuous,
        })
        .collect()
}

/// Everything but the plot lines: background, title, axes and tier bands.
fn chart_frame(
    league: &League,
    kind: ChartKind,
    name: &str,
    slug: String,
    config: &Config,
) -> ChartLayout {
    let grid = &config.grid;
    let chart = &config.chart;
    let theme = &config.theme;
    let seasons = league.axis.len();
    let max_depth = league.tiers.max_depth();

    let width = chart.margin + grid.plot_width(seasons) as f32;
    let height = chart.height;
    let title = chart_title(league, kind, name, config);

    let mut nodes = vec![
        ChartNode::Background {
            width,
            height,
            fill: theme.background,
        },
        ChartNode::Text(TextLabel {
            x: Some((grid.plot_width(seasons) + grid.area_x) as f32 / 2.0),
            y: Some(chart.title_y),
            rotation: None,
            anchor: TextAnchor::Middle,
            font_size: chart.title_font_size,
            bold: false,
            fill: Some(theme.text_color),
            content: TextContent::Plain(title.clone()),
        }),
        rank_axis_label(chart),
        year_labels(&league.axis, grid, chart),
    ];
    nodes.extend(
        build_tier_bands(&league.tiers, grid, theme)
            .into_iter()
            .map(ChartNode::Band),
    );
    nodes.push(outline(seasons, max_depth, grid, chart, theme));
    nodes.push(five_season_marks(seasons, max_depth, grid, chart, theme));

    ChartLayout {
        kind,
        name: name.to_string(),
        slug,
        title,
        width,
        height,
        nodes,
    }
}

/// `Name League Performance 1939 – 2023`; derby names are quoted and the
/// suffix pluralized.
pub fn chart_title(league: &League, kind: ChartKind, name: &str, config: &Config) -> String {
    let (quote, plural) = match kind {
        ChartKind::Club => ("", ""),
        ChartKind::Derby => ("\"", "s"),
    };
    let first = league.axis.first_year().unwrap_or_default();
    let last = league.axis.last_year().unwrap_or_default();
    format!(
        "{quote}{name}{quote} {}{plural} {first} – {last}",
        config.chart.title_suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{LineColors, LineStyle, SeasonAxis, SeasonSample, TierSizeTable};
    use crate::theme::Rgb;

    fn club(name: &str, slug: &str, style: LineStyle, seasons: Vec<SeasonSample>) -> ClubRecord {
        ClubRecord {
            full_name: name.to_string(),
            short_name: slug.to_string(),
            line_style: style,
            line_colors: LineColors {
                primary: Rgb::new(0xCC, 0x00, 0x00),
                secondary: Rgb::WHITE,
            },
            seasons,
        }
    }

    fn league() -> League {
        let axis = SeasonAxis::from_years(1939..1943);
        let tiers = TierSizeTable::new(&axis, vec![vec![8, 16, 24]; 4]).unwrap();
        let benfica = club(
            "SL Benfica",
            "SLBenfica",
            LineStyle::Solid,
            vec![
                SeasonSample::new(0, 1, 1),
                SeasonSample::new(0, 2, 2),
                SeasonSample::new(0, 1, 1),
                SeasonSample::new(0, 3, 3),
            ],
        );
        let boavista = club(
            "Boavista FC",
            "BoavistaFC",
            LineStyle::Dashed,
            vec![
                SeasonSample::new(0, 6, 6),
                SeasonSample::new(2, 4, 28),
                SeasonSample::ABSENT,
                SeasonSample::new(1, 5, 13),
            ],
        );
        let derby = DerbyGroup {
            label: None,
            clubs: vec!["Boavista FC".to_string(), "SL Benfica".to_string()],
        };
        League::new(axis, tiers, vec![benfica, boavista], vec![derby]).unwrap()
    }

    #[test]
    fn club_chart_has_frame_then_segments() {
        let league = league();
        let config = Config::default();
        let club = league.club("SL Benfica").unwrap();
        let layout = compute_club_layout(&league, club, &config);

        assert_eq!(layout.width, 50.0 + 4.0 * 12.0);
        assert_eq!(layout.height, 500.0);
        assert_eq!(layout.title, "SL Benfica League Performance 1939 – 1942");
        assert_eq!(layout.slug, "SLBenfica");

        let tiers: Vec<usize> = layout.bands().map(|band| band.tier).collect();
        assert_eq!(tiers, vec![2, 1, 0]);

        let ids: Vec<&str> = layout.plot_segments().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["SLBenfica1"]);
        assert!(matches!(layout.nodes.last(), Some(ChartNode::Plot(_))));
    }

    #[test]
    fn derby_chart_layers_members_in_declared_order() {
        let league = league();
        let config = Config::default();
        let layout = compute_derby_layout(&league, &league.derbies[0], &config).unwrap();

        assert_eq!(layout.kind, ChartKind::Derby);
        assert_eq!(layout.slug, "Boavista_FC_vs_SL_Benfica");
        assert_eq!(
            layout.title,
            "\"Boavista FC vs SL Benfica\" League Performances 1939 – 1942"
        );

        let ids: Vec<&str> = layout.plot_segments().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["BoavistaFC1", "BoavistaFC2", "BoavistaFC3", "BoavistaFC4", "SLBenfica1"]
        );
        let bridge = layout
            .plot_segments()
            .find(|s| s.id == "BoavistaFC2")
            .unwrap();
        assert!(bridge.discontinuous);
        assert!(bridge.layers.iter().all(|l| l.dash == Some(style::DISCONTINUOUS_PATTERN)));
    }

    #[test]
    fn identical_input_gives_identical_layouts() {
        let league = league();
        let config = Config::default();
        let render = |layout: &ChartLayout| -> Vec<String> {
            layout
                .plot_segments()
                .map(|s| format!("{}={}", s.id, s.path))
                .collect()
        };
        let a = compute_derby_layout(&league, &league.derbies[0], &config).unwrap();
        let b = compute_derby_layout(&league, &league.derbies[0], &config).unwrap();
        assert_eq!(render(&a), render(&b));
    }
}
