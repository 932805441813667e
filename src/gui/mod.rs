//! GUI module - User interface components

mod app;
pub mod pages;

pub use app::DashboardApp;
