//! Configuration and path management for chairside

pub mod paths;
pub mod settings;

pub use paths::ChairsidePaths;
pub use settings::Settings;
