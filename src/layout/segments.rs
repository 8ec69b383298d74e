use super::geometry::PathData;
use crate::config::GridConfig;
use crate::ir::SeasonSample;

/// One independently drawn piece of a club's rank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based, in emission order. Combined with the club slug it names the
    /// path that every stroke layer of the segment points at.
    pub number: usize,
    pub path: PathData,
    /// Bridges an administrative move of more than one tier.
    pub discontinuous: bool,
}

struct OpenSegment {
    path: PathData,
    last_rank: u32,
    last_tier: Option<u32>,
}

struct Emitter {
    segments: Vec<Segment>,
}

impl Emitter {
    fn emit(&mut self, path: PathData, discontinuous: bool) {
        self.segments.push(Segment {
            number: self.segments.len() + 1,
            path,
            discontinuous,
        });
    }
}

/// Splits a club's seasons into drawable segments.
///
/// A segment opens on the first present season and grows by one relative line
/// per following present season. It is emitted when the club disappears, when
/// the sequence ends, or when the club moves more than one tier in a single
/// season. In that last case a two-point dotted bridge is emitted between the
/// two seasons and a fresh segment starts at the new position. A segment whose
/// next season is absent is closed, so a lone season still draws as a dot.
pub fn segment_club(samples: &[SeasonSample], grid: &GridConfig) -> Vec<Segment> {
    let mut out = Emitter {
        segments: Vec::new(),
    };
    let mut open: Option<OpenSegment> = None;

    for (idx, sample) in samples.iter().enumerate() {
        let rank = sample.plotted_rank();
        open = match (open.take(), rank) {
            (None, None) => None,
            (None, Some(rank)) => Some(start_segment(samples, idx, rank, grid)),
            (Some(current), None) => {
                out.emit(current.path, false);
                None
            }
            (Some(mut current), Some(rank)) => {
                let dy = grid.rank_delta(current.last_rank, rank);
                if is_administrative_jump(current.last_tier, sample.tier) {
                    out.emit(current.path, false);
                    let mut bridge =
                        PathData::starting_at(grid.point(idx - 1, current.last_rank));
                    bridge.line_by(grid.x_inc, dy);
                    out.emit(bridge, true);
                    Some(start_segment(samples, idx, rank, grid))
                } else {
                    current.path.line_by(grid.x_inc, dy);
                    current.last_rank = rank;
                    current.last_tier = sample.tier;
                    Some(current)
                }
            }
        };
    }

    if let Some(current) = open {
        out.emit(current.path, false);
    }
    out.segments
}

/// More than one tier in one season can only be an administrative decision.
/// Seasons with an unknown tier never count as a jump.
pub fn is_administrative_jump(previous: Option<u32>, current: Option<u32>) -> bool {
    match (previous, current) {
        (Some(previous), Some(current)) => previous.abs_diff(current) > 1,
        _ => false,
    }
}

fn start_segment(
    samples: &[SeasonSample],
    idx: usize,
    rank: u32,
    grid: &GridConfig,
) -> OpenSegment {
    let mut path = PathData::starting_at(grid.point(idx, rank));
    // Past the last season counts as absent.
    if !samples.get(idx + 1).is_some_and(SeasonSample::is_present) {
        path.close();
    }
    OpenSegment {
        path,
        last_rank: rank,
        last_tier: samples[idx].tier,
    }
}
