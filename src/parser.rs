use crate::error::LeagueError;
use crate::ir::{
    ClubRecord, DerbyGroup, League, LineColors, LineStyle, SeasonAxis, SeasonSample,
    TierSizeTable,
};
use crate::slug::club_slug;
use crate::theme::Rgb;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// `[tier, positionInTier, overallRank]`; `null` marks a whole absent season.
type RawSample = Option<[Option<i64>; 3]>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetFile {
    seasons: Vec<i32>,
    tier_sizes: BTreeMap<String, Vec<u32>>,
    #[serde(default)]
    clubs: Vec<ClubEntry>,
    #[serde(default)]
    derbies: Vec<DerbyEntry>,
}

#[derive(Debug, Deserialize)]
struct ClubEntry {
    name: String,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    colors: Vec<String>,
    seasons: Vec<RawSample>,
}

#[derive(Debug, Deserialize)]
struct DerbyEntry {
    #[serde(default)]
    name: Option<String>,
    clubs: Vec<String>,
}

pub fn load_dataset(path: &Path) -> Result<League> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    parse_dataset(&contents).with_context(|| format!("invalid dataset {}", path.display()))
}

/// Parses a JSON5 league dataset and checks its structure.
pub fn parse_dataset(input: &str) -> Result<League> {
    let file: DatasetFile = json5::from_str(input)?;
    let axis = SeasonAxis::from_years(file.seasons.iter().copied());

    let mut rows = Vec::with_capacity(axis.len());
    for season in axis.seasons() {
        let row = file
            .tier_sizes
            .get(&season.year.to_string())
            .ok_or(LeagueError::MissingTierSizes { year: season.year })?;
        rows.push(row.clone());
    }
    let tiers = TierSizeTable::new(&axis, rows)?;

    let clubs = file
        .clubs
        .into_iter()
        .map(|entry| club_record(entry, &axis))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let derbies = file
        .derbies
        .into_iter()
        .map(|entry| DerbyGroup {
            label: entry.name.filter(|name| !name.trim().is_empty()),
            clubs: entry.clubs,
        })
        .collect();

    let league = League::new(axis, tiers, clubs, derbies)?;
    debug!(
        seasons = league.axis.len(),
        tiers = league.tiers.pyramid_size(),
        clubs = league.clubs.len(),
        derbies = league.derbies.len(),
        "parsed dataset"
    );
    Ok(league)
}

fn club_record(
    entry: ClubEntry,
    axis: &SeasonAxis,
) -> std::result::Result<ClubRecord, LeagueError> {
    if entry.seasons.len() != axis.len() {
        return Err(LeagueError::RaggedSeasons {
            club: entry.name,
            expected: axis.len(),
            found: entry.seasons.len(),
        });
    }

    let style_token = entry.style.as_deref().unwrap_or("solid");
    let line_style =
        LineStyle::from_token(style_token).ok_or_else(|| LeagueError::UnknownLineStyle {
            club: entry.name.clone(),
            style: style_token.to_string(),
        })?;

    let mut colors = entry.colors.iter().map(|raw| raw.parse::<Rgb>());
    let primary = colors.next().transpose()?.unwrap_or(Rgb::BLACK);
    let secondary = colors.next().transpose()?.unwrap_or(primary);

    let seasons = entry
        .seasons
        .iter()
        .zip(axis.seasons())
        .map(|(raw, season)| season_sample(&entry.name, season.year, raw))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(ClubRecord {
        short_name: club_slug(&entry.name),
        full_name: entry.name,
        line_style,
        line_colors: LineColors { primary, secondary },
        seasons,
    })
}

fn season_sample(
    club: &str,
    year: i32,
    raw: &RawSample,
) -> std::result::Result<SeasonSample, LeagueError> {
    let Some([tier, position, overall]) = raw else {
        return Ok(SeasonSample::ABSENT);
    };
    let field = |name: &'static str, value: Option<i64>, zero_is_blank: bool| {
        match value {
            None | Some(-1) => Ok(None),
            Some(0) if zero_is_blank => Ok(None),
            Some(v) => u32::try_from(v).map(Some).map_err(|_| LeagueError::InvalidSample {
                club: club.to_string(),
                year,
                field: name,
                value: v,
            }),
        }
    };
    // Positions and ranks start at 1, so a 0 there is a blank cell; tier 0 is the top flight.
    Ok(SeasonSample {
        tier: field("tier", *tier, false)?,
        position_in_tier: field("position", *position, true)?,
        overall_rank: field("overall", *overall, true)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINHO: &str = r##"{
        // two clubs, four seasons
        seasons: [1939, 1940, 1941, 1942],
        tierSizes: {
            "1939": [8, 16], "1940": [8, 16], "1941": [10, 16], "1942": [10, 18],
        },
        clubs: [
            { name: "SC Braga", style: "border", colors: ["#D50A0A", "#FFFFFF"],
              seasons: [[1, 2, 10], [0, 7, 7], null, [0, 5, 5]] },
            { name: "Vitória SC", colors: ["#FFFFFF", "#000000"],
              seasons: [[0, 4, 4], [-1, -1, -1], [0, 9, 9], [0, 3, 3]] },
        ],
        derbies: [ { name: "Dérbi do Minho", clubs: ["SC Braga", "Vitória SC"] } ],
    }"##;

    fn structural(err: anyhow::Error) -> LeagueError {
        match err.downcast::<LeagueError>() {
            Ok(err) => err,
            Err(other) => panic!("expected a structural error, got {other:?}"),
        }
    }

    #[test]
    fn parses_clubs_and_derbies() {
        let league = parse_dataset(MINHO).unwrap();
        assert_eq!(league.axis.len(), 4);
        assert_eq!(league.tiers.pyramid_size(), 2);
        assert_eq!(league.tiers.max_depth(), 18);

        let braga = league.club("SC Braga").unwrap();
        assert_eq!(braga.short_name, "SCBraga");
        assert_eq!(braga.line_style, LineStyle::Bordered);
        assert_eq!(braga.line_colors.primary, Rgb::new(0xD5, 0x0A, 0x0A));
        assert_eq!(braga.seasons[0], SeasonSample::new(1, 2, 10));
        assert!(!braga.seasons[2].is_present());

        let vitoria = league.club("Vitória SC").unwrap();
        assert_eq!(vitoria.short_name, "VitoriaSC");
        assert_eq!(vitoria.line_style, LineStyle::Solid);
        assert_eq!(vitoria.seasons[1], SeasonSample::ABSENT);

        assert_eq!(league.derbies[0].display_name(), "Dérbi do Minho");
        let order: Vec<&str> = league.clubs_in_order().map(|c| c.full_name.as_str()).collect();
        assert_eq!(order, vec!["SC Braga", "Vitória SC"]);
    }

    #[test]
    fn zero_rank_is_a_blank_cell() {
        let input = r#"{ seasons: [2000], tierSizes: { "2000": [4] },
            clubs: [ { name: "A", seasons: [[0, 0, 0]] } ] }"#;
        let league = parse_dataset(input).unwrap();
        let sample = league.club("A").unwrap().seasons[0];
        assert_eq!(sample.tier, Some(0));
        assert!(!sample.is_present());
    }

    #[test]
    fn missing_tier_sizes_name_the_season() {
        let input = r#"{ seasons: [2000, 2001], tierSizes: { "2000": [4] } }"#;
        let err = structural(parse_dataset(input).unwrap_err());
        assert!(matches!(err, LeagueError::MissingTierSizes { year: 2001 }));
    }

    #[test]
    fn ragged_club_is_rejected() {
        let input = r#"{ seasons: [2000, 2001], tierSizes: { "2000": [4], "2001": [4] },
            clubs: [ { name: "A", seasons: [[0, 1, 1]] } ] }"#;
        let err = structural(parse_dataset(input).unwrap_err());
        assert!(matches!(
            err,
            LeagueError::RaggedSeasons {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn unknown_style_is_rejected() {
        let input = r#"{ seasons: [2000], tierSizes: { "2000": [4] },
            clubs: [ { name: "A", style: "wavy", seasons: [null] } ] }"#;
        let err = structural(parse_dataset(input).unwrap_err());
        assert!(matches!(err, LeagueError::UnknownLineStyle { .. }));
    }

    #[test]
    fn negative_values_other_than_sentinel_are_rejected() {
        let input = r#"{ seasons: [2000], tierSizes: { "2000": [4] },
            clubs: [ { name: "A", seasons: [[0, -3, 2]] } ] }"#;
        let err = structural(parse_dataset(input).unwrap_err());
        match err {
            LeagueError::InvalidSample {
                field, value, year, ..
            } => {
                assert_eq!(field, "position");
                assert_eq!(value, -3);
                assert_eq!(year, 2000);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn derby_with_unknown_member_is_rejected() {
        let input = r#"{ seasons: [2000], tierSizes: { "2000": [4] },
            clubs: [ { name: "A", seasons: [null] } ],
            derbies: [ { clubs: ["A", "Z"] } ] }"#;
        let err = structural(parse_dataset(input).unwrap_err());
        assert!(matches!(err, LeagueError::UnknownDerbyClub { .. }));
    }

    #[test]
    fn secondary_color_defaults_to_primary() {
        let input = r##"{ seasons: [2000], tierSizes: { "2000": [4] },
            clubs: [ { name: "A", colors: ["#123456"], seasons: [null] } ] }"##;
        let league = parse_dataset(input).unwrap();
        let colors = league.club("A").unwrap().line_colors;
        assert_eq!(colors.primary, colors.secondary);
    }

    #[test]
    fn clubs_slugging_alike_are_rejected() {
        let input = r#"{ seasons: [2000], tierSizes: { "2000": [4] },
            clubs: [ { name: "Vitória SC", seasons: [[0, 1, 1]] },
                     { name: "Vitoria SC", seasons: [[0, 2, 2]] } ] }"#;
        let err = structural(parse_dataset(input).unwrap_err());
        assert!(matches!(err, LeagueError::DuplicateSlug { ref slug, .. } if slug == "VitoriaSC"));
    }

    #[test]
    fn self_derby_is_rejected() {
        let input = r#"{ seasons: [2000], tierSizes: { "2000": [4] },
            clubs: [ { name: "Vitória SC", seasons: [[0, 1, 1]] } ],
            derbies: [ { name: "Self", clubs: ["Vitória SC", "Vitória SC"] } ] }"#;
        let err = structural(parse_dataset(input).unwrap_err());
        assert!(matches!(err, LeagueError::DuplicateDerbyMember { .. }));
    }
}
