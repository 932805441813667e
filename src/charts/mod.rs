//! Charts module - Chart and map rendering

mod map;
mod plotter;

pub use map::MapView;
pub use plotter::ChartPlotter;
