//! Map View Module
//! Circle markers for per-state enrollment totals over a plot centred on
//! Brasília, plus a companion state listing.

use crate::data::StateTotal;
use egui::{Color32, RichText};
use egui_plot::{Plot, Points};

/// Base-map centre used by the source dashboard (Brasília), as `[lon, lat]`.
const MAP_CENTER: [f64; 2] = [-47.9292, -15.7801];
/// Marker coordinate shared by every state.
// TODO: resolve real per-UF coordinates; until then every marker sits on this origin.
const MARKER_COORD: [f64; 2] = [0.0, 0.0];

const MARKER_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Renders the geographic distribution page visuals.
pub struct MapView;

impl MapView {
    /// Marker radius in screen points for a state's enrollment total.
    pub(crate) fn marker_radius(total: f64) -> f32 {
        if !total.is_finite() || total <= 0.0 {
            return 2.0;
        }
        ((total / 10.0).sqrt() as f32).clamp(2.0, 40.0)
    }

    /// Draw the marker map. Radius scales with enrollment; hovering a
    /// marker shows the state name and total.
    pub fn draw(ui: &mut egui::Ui, states: &[StateTotal]) {
        Plot::new("state_map")
            .height(420.0)
            .data_aspect(1.0)
            .allow_scroll(false)
            .include_x(MAP_CENTER[0])
            .include_y(MAP_CENTER[1])
            .include_x(MARKER_COORD[0] + 5.0)
            .include_y(MARKER_COORD[1] + 5.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .show(ui, |plot_ui| {
                for state in states {
                    plot_ui.points(
                        Points::new(vec![MARKER_COORD])
                            .radius(Self::marker_radius(state.total))
                            .color(MARKER_COLOR.gamma_multiply(0.45))
                            .name(format!("{}: {:.0} matrículas", state.state, state.total)),
                    );
                }
            });
    }

    /// Companion table so the page stays readable while markers overlap.
    pub fn draw_state_list(ui: &mut egui::Ui, states: &[StateTotal]) {
        egui::Grid::new("state_totals")
            .striped(true)
            .min_col_width(80.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("UF").strong().size(12.0));
                ui.label(RichText::new("Estado").strong().size(12.0));
                ui.label(RichText::new("Matrículas").strong().size(12.0));
                ui.end_row();

                for state in states {
                    ui.label(RichText::new(&state.uf).size(12.0));
                    ui.label(RichText::new(&state.state).size(12.0));
                    ui.label(RichText::new(format!("{:.0}", state.total)).size(12.0));
                    ui.end_row();
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_radius_scales_and_clamps() {
        assert_eq!(MapView::marker_radius(0.0), 2.0);
        assert_eq!(MapView::marker_radius(-5.0), 2.0);
        assert_eq!(MapView::marker_radius(1000.0), 10.0);
        assert_eq!(MapView::marker_radius(1_000_000_000.0), 40.0);
    }
}
