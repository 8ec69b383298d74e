/// Structural problems in league data. Absence of a club in a season is not
/// an error and never shows up here.
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("dataset has no seasons")]
    EmptySeasonAxis,
    #[error("tier size table has no entry for season {year}")]
    MissingTierSizes { year: i32 },
    #[error("season {year} lists {found} tiers, expected {expected}")]
    TierCountMismatch {
        year: i32,
        expected: usize,
        found: usize,
    },
    #[error("tier size table has {found} seasons, the axis only {expected}")]
    ExtraTierSizes { expected: usize, found: usize },
    #[error("club {club:?} has {found} seasons, expected {expected}")]
    RaggedSeasons {
        club: String,
        expected: usize,
        found: usize,
    },
    #[error("club {club:?} is listed more than once")]
    DuplicateClub { club: String },
    #[error("clubs {first:?} and {second:?} share the slug {slug:?}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
    #[error("club {club:?}: invalid {field} value {value} in season {year}")]
    InvalidSample {
        club: String,
        year: i32,
        field: &'static str,
        value: i64,
    },
    #[error("club {club:?}: unknown line style {style:?}")]
    UnknownLineStyle { club: String, style: String },
    #[error("invalid color {value:?} (expected #RRGGBB)")]
    InvalidColor { value: String },
    #[error("derby {derby:?} references unknown club {club:?}")]
    UnknownDerbyClub { derby: String, club: String },
    #[error("derby {derby:?} needs at least 2 clubs, got {found}")]
    DerbyTooSmall { derby: String, found: usize },
    #[error("derby {derby:?} lists club {club:?} more than once")]
    DuplicateDerbyMember { derby: String, club: String },
    #[error("derbies {first:?} and {second:?} share the slug {slug:?}")]
    DuplicateDerbySlug {
        slug: String,
        first: String,
        second: String,
    },
    #[error("club {club:?} is not in the league")]
    UnknownClub { club: String },
}

pub type Result<T> = std::result::Result<T, LeagueError>;
