pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod slug;
pub mod theme;

pub use batch::{GenerateOptions, GenerateReport, OutputFormat, build_layouts, generate_all};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use error::LeagueError;
pub use layout::{ChartLayout, compute_club_layout, compute_derby_layout};
pub use parser::{load_dataset, parse_dataset};
pub use render::render_svg;
