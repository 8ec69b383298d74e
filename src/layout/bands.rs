use super::geometry::PathData;
use super::types::TierBand;
use crate::config::GridConfig;
use crate::ir::TierSizeTable;
use crate::theme::Theme;

/// One filled band per tier, bottom tier first so the narrower top tiers are
/// painted over the wider ones.
pub fn build_tier_bands(tiers: &TierSizeTable, grid: &GridConfig, theme: &Theme) -> Vec<TierBand> {
    (0..tiers.pyramid_size())
        .rev()
        .map(|tier| TierBand {
            tier,
            path: band_path(&tiers.tier_series(tier), grid),
            fill: theme.tier_color(tier),
        })
        .collect()
}

/// Outline of a tier whose size per season is `sizes`. Seasons with an
/// unchanged size are merged into one horizontal run.
pub fn band_path(sizes: &[u32], grid: &GridConfig) -> PathData {
    let mut path = PathData::starting_at(grid.area_origin());
    let Some((&first, rest)) = sizes.split_first() else {
        path.close();
        return path;
    };

    path.vertical_by(first as i32 * grid.y_inc);
    let mut run = grid.x_inc;
    let mut previous = first;
    for &size in rest {
        if size == previous {
            run += grid.x_inc;
            continue;
        }
        path.horizontal_by(run)
            .vertical_by((size as i32 - previous as i32) * grid.y_inc);
        run = grid.x_inc;
        previous = size;
    }
    path.horizontal_by(run)
        .vertical_by(-(previous as i32) * grid.y_inc)
        .close();
    path
}
