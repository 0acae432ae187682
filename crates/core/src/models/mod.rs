pub mod chart;
pub mod palette;
pub mod settings;
pub mod theme;
