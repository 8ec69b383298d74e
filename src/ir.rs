use crate::error::{LeagueError, Result};
use crate::slug::derby_slug;
use crate::theme::Rgb;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season {
    pub index: usize,
    pub year: i32,
}

/// Ordered seasons; index `i` is the `i`-th column of every chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonAxis {
    seasons: Vec<Season>,
}

impl SeasonAxis {
    pub fn from_years(years: impl IntoIterator<Item = i32>) -> Self {
        let seasons = years
            .into_iter()
            .enumerate()
            .map(|(index, year)| Season { index, year })
            .collect();
        Self { seasons }
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn year(&self, index: usize) -> Option<i32> {
        self.seasons.get(index).map(|season| season.year)
    }

    pub fn first_year(&self) -> Option<i32> {
        self.seasons.first().map(|season| season.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.seasons.last().map(|season| season.year)
    }
}

/// Number of clubs in each tier of each season, tier 0 being the top flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSizeTable {
    sizes: Vec<Vec<u32>>,
    pyramid_size: usize,
    max_depth: u32,
}

impl TierSizeTable {
    /// Builds the table from one row per season of the axis. Every row must
    /// have as many tiers as the first one.
    pub fn new(axis: &SeasonAxis, sizes: Vec<Vec<u32>>) -> Result<Self> {
        if axis.is_empty() {
            return Err(LeagueError::EmptySeasonAxis);
        }
        if let Some(season) = axis.seasons().get(sizes.len()) {
            return Err(LeagueError::MissingTierSizes { year: season.year });
        }
        if sizes.len() > axis.len() {
            return Err(LeagueError::ExtraTierSizes {
                expected: axis.len(),
                found: sizes.len(),
            });
        }
        let pyramid_size = sizes.first().map(Vec::len).unwrap_or(0);
        for (season, row) in axis.seasons().iter().zip(&sizes) {
            if row.len() != pyramid_size {
                return Err(LeagueError::TierCountMismatch {
                    year: season.year,
                    expected: pyramid_size,
                    found: row.len(),
                });
            }
        }
        let max_depth = sizes.iter().flatten().copied().max().unwrap_or(0);
        Ok(Self {
            sizes,
            pyramid_size,
            max_depth,
        })
    }

    pub fn season_count(&self) -> usize {
        self.sizes.len()
    }

    pub fn pyramid_size(&self) -> usize {
        self.pyramid_size
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Sizes of one tier across every season, in axis order.
    pub fn tier_series(&self, tier: usize) -> Vec<u32> {
        self.sizes.iter().map(|row| row[tier]).collect()
    }
}

/// One season of a club. Any field may be unknown; the club only counts as
/// present when both its in-tier position and its overall rank are known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonSample {
    pub tier: Option<u32>,
    pub position_in_tier: Option<u32>,
    pub overall_rank: Option<u32>,
}

impl SeasonSample {
    pub const ABSENT: SeasonSample = SeasonSample {
        tier: None,
        position_in_tier: None,
        overall_rank: None,
    };

    pub fn new(tier: u32, position_in_tier: u32, overall_rank: u32) -> Self {
        Self {
            tier: Some(tier),
            position_in_tier: Some(position_in_tier),
            overall_rank: Some(overall_rank),
        }
    }

    pub fn is_present(&self) -> bool {
        self.overall_rank.is_some() && self.position_in_tier.is_some()
    }

    /// Overall rank of a present sample.
    pub fn plotted_rank(&self) -> Option<u32> {
        if self.is_present() {
            self.overall_rank
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Bordered,
    Dashed,
}

impl LineStyle {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "" | "solid" => Some(Self::Solid),
            "border" | "bordered" => Some(Self::Bordered),
            "dashed" => Some(Self::Dashed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColors {
    pub primary: Rgb,
    pub secondary: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubRecord {
    pub full_name: String,
    pub short_name: String,
    pub line_style: LineStyle,
    pub line_colors: LineColors,
    pub seasons: Vec<SeasonSample>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerbyGroup {
    pub label: Option<String>,
    pub clubs: Vec<String>,
}

impl DerbyGroup {
    pub fn display_name(&self) -> String {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => self.clubs.join(" vs "),
        }
    }
}

/// Everything a run needs: axis, tier sizes, clubs keyed by full name, derbies.
#[derive(Debug, Clone)]
pub struct League {
    pub axis: SeasonAxis,
    pub tiers: TierSizeTable,
    pub clubs: BTreeMap<String, ClubRecord>,
    /// Clubs in input order, as full names.
    pub club_order: Vec<String>,
    pub derbies: Vec<DerbyGroup>,
}

impl League {
    /// Checks the cross-record invariants: every club spans the whole axis,
    /// names and slugs are unique, and every derby lists distinct known clubs.
    pub fn new(
        axis: SeasonAxis,
        tiers: TierSizeTable,
        clubs: Vec<ClubRecord>,
        derbies: Vec<DerbyGroup>,
    ) -> Result<Self> {
        if let Some(season) = axis.seasons().get(tiers.season_count()) {
            return Err(LeagueError::MissingTierSizes { year: season.year });
        }
        if tiers.season_count() > axis.len() {
            return Err(LeagueError::ExtraTierSizes {
                expected: axis.len(),
                found: tiers.season_count(),
            });
        }
        let mut by_name = BTreeMap::new();
        let mut by_slug: BTreeMap<String, String> = BTreeMap::new();
        let mut club_order = Vec::with_capacity(clubs.len());
        for club in clubs {
            if club.seasons.len() != axis.len() {
                return Err(LeagueError::RaggedSeasons {
                    club: club.full_name,
                    expected: axis.len(),
                    found: club.seasons.len(),
                });
            }
            if by_name.contains_key(&club.full_name) {
                return Err(LeagueError::DuplicateClub {
                    club: club.full_name,
                });
            }
            if let Some(first) = by_slug.get(&club.short_name) {
                return Err(LeagueError::DuplicateSlug {
                    slug: club.short_name,
                    first: first.clone(),
                    second: club.full_name,
                });
            }
            by_slug.insert(club.short_name.clone(), club.full_name.clone());
            club_order.push(club.full_name.clone());
            by_name.insert(club.full_name.clone(), club);
        }
        let mut derby_slugs: BTreeMap<String, String> = BTreeMap::new();
        for derby in &derbies {
            if derby.clubs.len() < 2 {
                return Err(LeagueError::DerbyTooSmall {
                    derby: derby.display_name(),
                    found: derby.clubs.len(),
                });
            }
            if let Some(missing) = derby.clubs.iter().find(|name| !by_name.contains_key(*name)) {
                return Err(LeagueError::UnknownDerbyClub {
                    derby: derby.display_name(),
                    club: missing.clone(),
                });
            }
            let mut seen = BTreeSet::new();
            if let Some(repeated) = derby.clubs.iter().find(|name| !seen.insert(name.as_str())) {
                return Err(LeagueError::DuplicateDerbyMember {
                    derby: derby.display_name(),
                    club: repeated.clone(),
                });
            }
            let name = derby.display_name();
            let slug = derby_slug(&name);
            if let Some(first) = derby_slugs.get(&slug) {
                return Err(LeagueError::DuplicateDerbySlug {
                    slug,
                    first: first.clone(),
                    second: name,
                });
            }
            derby_slugs.insert(slug, name);
        }
        Ok(Self {
            axis,
            tiers,
            clubs: by_name,
            club_order,
            derbies,
        })
    }

    pub fn club(&self, name: &str) -> Result<&ClubRecord> {
        self.clubs.get(name).ok_or_else(|| LeagueError::UnknownClub {
            club: name.to_string(),
        })
    }

    /// Clubs in input order.
    pub fn clubs_in_order(&self) -> impl Iterator<Item = &ClubRecord> {
        self.club_order.iter().filter_map(|name| self.clubs.get(name))
    }

    /// Members of a derby in declared order.
    pub fn derby_members(&self, derby: &DerbyGroup) -> Result<Vec<&ClubRecord>> {
        derby.clubs.iter().map(|name| self.club(name)).collect()
    }
}
