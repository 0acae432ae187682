pub mod chart_service;
pub mod theme_service;
