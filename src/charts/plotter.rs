//! Chart Plotter Module
//! Stateless mapping from summary tables to egui_plot widgets: bar, line,
//! pie and box charts.

use crate::data::Summary;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Line, Plot, PlotPoints, Points};

const CHART_HEIGHT: f32 = 280.0;
const PIE_DIAMETER: f32 = 240.0;

/// Primary series color
pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Creates chart widgets from summary tables.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the n-th category.
    pub fn slice_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a bar chart, one bar per summary row.
    /// X-axis: category labels, Y-axis: aggregated value.
    pub fn draw_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        summary: &Summary,
        x_label: &str,
        y_label: &str,
    ) {
        let labels = summary.labels.clone();
        let bars: Vec<Bar> = summary
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                Bar::new(i as f64, value)
                    .width(0.6)
                    .fill(Self::slice_color(i))
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label.to_string())
            .y_axis_label(y_label.to_string())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Draw a line chart over `(x, y)` pairs with point markers.
    pub fn draw_line_chart(
        ui: &mut egui::Ui,
        id: &str,
        points: &[[f64; 2]],
        x_label: &str,
        y_label: &str,
    ) {
        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label.to_string())
            .y_axis_label(y_label.to_string())
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(PRIMARY_COLOR)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(PRIMARY_COLOR),
                );
            });
    }

    /// Draw a pie chart with a color-square legend below it.
    /// Non-positive and non-finite slices are skipped.
    pub fn draw_pie_chart(ui: &mut egui::Ui, summary: &Summary) {
        let total: f64 = summary
            .values
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
            .sum();
        if total <= 0.0 {
            ui.label(RichText::new("No data").size(14.0).color(Color32::GRAY));
            return;
        }

        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(PIE_DIAMETER, PIE_DIAMETER), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = rect.width().min(rect.height()) / 2.0 - 4.0;

        let mut start = -std::f32::consts::FRAC_PI_2;
        for (i, &value) in summary.values.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                continue;
            }
            let sweep = (value / total) as f32 * std::f32::consts::TAU;
            Self::fill_sector(&painter, center, radius, start, sweep, Self::slice_color(i));
            start += sweep;
        }

        ui.add_space(6.0);
        for (i, (label, &value)) in summary.labels.iter().zip(summary.values.iter()).enumerate() {
            ui.horizontal(|ui| {
                let (swatch, _) =
                    ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 3.0, Self::slice_color(i));
                let share = if value.is_finite() && value > 0.0 {
                    value / total * 100.0
                } else {
                    0.0
                };
                ui.label(RichText::new(format!("{}: {:.1}%", label, share)).size(12.0));
            });
        }
    }

    /// Draw a box plot, one box per group.
    /// X-axis: groups, Y-axis: raw values.
    pub fn draw_box_chart(
        ui: &mut egui::Ui,
        id: &str,
        groups: &[(String, Vec<f64>)],
        x_label: &str,
        y_label: &str,
    ) {
        let labels: Vec<String> = groups.iter().map(|(g, _)| g.clone()).collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label.to_string())
            .y_axis_label(y_label.to_string())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, (group, values)) in groups.iter().enumerate() {
                    if values.is_empty() {
                        continue;
                    }
                    let color = Self::slice_color(i);

                    let mut sorted = values.clone();
                    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                    let (whisker_low, q1, median, q3, whisker_high) = Self::box_stats(&sorted);

                    let elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(whisker_low, q1, median, q3, whisker_high),
                    )
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));

                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(group));
                }
            });
    }

    /// Quartiles and Tukey 1.5*IQR whiskers over pre-sorted values.
    pub(crate) fn box_stats(sorted: &[f64]) -> (f64, f64, f64, f64, f64) {
        let n = sorted.len();
        let q1 = sorted.get(n / 4).copied().unwrap_or(0.0);
        let median = sorted.get(n / 2).copied().unwrap_or(0.0);
        let q3 = sorted.get(3 * n / 4).copied().unwrap_or(0.0);
        let iqr = q3 - q1;
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);
        (whisker_low, q1, median, q3, whisker_high)
    }

    fn fill_sector(
        painter: &egui::Painter,
        center: egui::Pos2,
        radius: f32,
        start: f32,
        sweep: f32,
        color: Color32,
    ) {
        let steps = ((sweep / 0.05).ceil() as usize).max(2);
        let mut mesh = egui::Mesh::default();
        mesh.colored_vertex(center, color);
        for step in 0..=steps {
            let angle = start + sweep * step as f32 / steps as f32;
            let point = center + radius * egui::vec2(angle.cos(), angle.sin());
            mesh.colored_vertex(point, color);
        }
        for step in 0..steps as u32 {
            mesh.add_triangle(0, step + 1, step + 2);
        }
        painter.add(mesh);
    }
}
