pub mod chip_metrics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod render;
pub mod scene;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use layout::{Frame, TagWall, compute_frame};
pub use scene::{Scene, parse_scene};
pub use theme::Theme;
