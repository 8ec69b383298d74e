use crate::config::GridConfig;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One SVG path command. Everything after the initial move is relative, so a
/// path never accumulates coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo { x: i32, y: i32 },
    LineBy { dx: i32, dy: i32 },
    HorizontalBy { dx: i32 },
    VerticalBy { dy: i32 },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn starting_at(point: Point) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo {
                x: point.x,
                y: point.y,
            }],
        }
    }

    pub fn line_by(&mut self, dx: i32, dy: i32) -> &mut Self {
        self.commands.push(PathCommand::LineBy { dx, dy });
        self
    }

    pub fn horizontal_by(&mut self, dx: i32) -> &mut Self {
        self.commands.push(PathCommand::HorizontalBy { dx });
        self
    }

    pub fn vertical_by(&mut self, dy: i32) -> &mut Self {
        self.commands.push(PathCommand::VerticalBy { dy });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn start(&self) -> Option<Point> {
        match self.commands.first() {
            Some(PathCommand::MoveTo { x, y }) => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Relative line deltas, in order.
    pub fn line_deltas(&self) -> Vec<(i32, i32)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                PathCommand::LineBy { dx, dy } => Some((*dx, *dy)),
                _ => None,
            })
            .collect()
    }

    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo { x, y } => write!(f, "M{x},{y}")?,
                PathCommand::LineBy { dx, dy } => write!(f, "l{dx},{dy}")?,
                PathCommand::HorizontalBy { dx } => write!(f, "h{dx}")?,
                PathCommand::VerticalBy { dy } => write!(f, "v{dy}")?,
                PathCommand::Close => f.write_str("z")?,
            }
        }
        Ok(())
    }
}

impl GridConfig {
    /// Where a club ranked `rank` in season `season` is plotted.
    pub fn point(&self, season: usize, rank: u32) -> Point {
        Point::new(
            self.line_origin_x + season as i32 * self.x_inc,
            self.line_origin_y + rank as i32 * self.y_inc,
        )
    }

    /// Vertical distance between two ranks in consecutive seasons.
    pub fn rank_delta(&self, from: u32, to: u32) -> i32 {
        (to as i32 - from as i32) * self.y_inc
    }

    pub fn area_origin(&self) -> Point {
        Point::new(self.area_x, self.area_y)
    }

    pub fn plot_width(&self, seasons: usize) -> i32 {
        seasons as i32 * self.x_inc
    }

    pub fn plot_height(&self, max_depth: u32) -> i32 {
        max_depth as i32 * self.y_inc
    }
}
