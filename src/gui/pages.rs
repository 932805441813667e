//! Dashboard Pages
//! The five presentation branches. Each page composes Aggregator calls and
//! chart widgets; a failed aggregation replaces only that chart with an
//! error label, the rest of the page still renders.

use crate::charts::{ChartPlotter, MapView};
use crate::data::{columns, AggregateError, Aggregator, Datasets};
use egui::{Color32, RichText};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Navigation pages, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Geographic,
    Sociodemographic,
    Indicators,
    Budget,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Overview,
        Page::Geographic,
        Page::Sociodemographic,
        Page::Indicators,
        Page::Budget,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Overview => "Visão Geral",
            Page::Geographic => "Distribuição Geográfica",
            Page::Sociodemographic => "Perfil Sociodemográfico",
            Page::Indicators => "Indicadores Educacionais",
            Page::Budget => "Análise Orçamentária",
        }
    }
}

/// Render the selected page.
pub fn render(ui: &mut egui::Ui, page: Page, datasets: &Datasets) {
    ui.heading(page.label());
    ui.add_space(8.0);

    match page {
        Page::Overview => overview(ui, datasets),
        Page::Geographic => geographic(ui, datasets),
        Page::Sociodemographic => sociodemographic(ui, datasets),
        Page::Indicators => indicators(ui, datasets),
        Page::Budget => budget(ui, datasets),
    }
}

fn overview(ui: &mut egui::Ui, datasets: &Datasets) {
    ui.columns(2, |cols| {
        {
            let ui = &mut cols[0];
            match Aggregator::unique_count(&datasets.enrollment, columns::INSTITUTION) {
                Ok(count) => metric(ui, "Total de Instituições", &count.to_string()),
                Err(err) => chart_error(ui, &err),
            }
            ui.add_space(10.0);
            chart_title(ui, "Matrículas por Região");
            match Aggregator::group_sum(&datasets.enrollment, columns::REGION, columns::ENROLLMENT)
            {
                Ok(summary) => ChartPlotter::draw_bar_chart(
                    ui,
                    "enrollment_by_region",
                    &summary,
                    "Região",
                    "Matrículas",
                ),
                Err(err) => chart_error(ui, &err),
            }
        }
        {
            let ui = &mut cols[1];
            match Aggregator::column_sum(&datasets.enrollment, columns::ENROLLMENT) {
                Ok(total) => metric(ui, "Total de Matrículas", &format_count(total)),
                Err(err) => chart_error(ui, &err),
            }
            ui.add_space(10.0);
            chart_title(ui, "Evolução da Taxa de Evasão");
            match Aggregator::group_mean_points(
                &datasets.dropout,
                columns::YEAR,
                columns::DROPOUT_RATE,
            ) {
                Ok(points) => ChartPlotter::draw_line_chart(
                    ui,
                    "dropout_by_year",
                    &points,
                    "Ano",
                    "Taxa de Evasão",
                ),
                Err(err) => chart_error(ui, &err),
            }
        }
    });
}

fn geographic(ui: &mut egui::Ui, datasets: &Datasets) {
    chart_title(ui, "Matrículas por Estado");
    match Aggregator::state_totals(
        &datasets.enrollment,
        columns::UF,
        columns::STATE,
        columns::ENROLLMENT,
    ) {
        Ok(states) => {
            MapView::draw(ui, &states);
            ui.add_space(12.0);
            MapView::draw_state_list(ui, &states);
        }
        Err(err) => chart_error(ui, &err),
    }
}

fn sociodemographic(ui: &mut egui::Ui, datasets: &Datasets) {
    ui.columns(2, |cols| {
        {
            let ui = &mut cols[0];
            chart_title(ui, "Distribuição por Raça/Cor");
            match Aggregator::group_sum(&datasets.enrollment, columns::RACE, columns::ENROLLMENT) {
                Ok(summary) => ChartPlotter::draw_pie_chart(ui, &summary),
                Err(err) => chart_error(ui, &err),
            }
        }
        {
            let ui = &mut cols[1];
            chart_title(ui, "Distribuição por Renda Familiar");
            match Aggregator::group_sum(&datasets.enrollment, columns::INCOME, columns::ENROLLMENT)
            {
                Ok(summary) => ChartPlotter::draw_pie_chart(ui, &summary),
                Err(err) => chart_error(ui, &err),
            }
        }
    });
}

fn indicators(ui: &mut egui::Ui, datasets: &Datasets) {
    chart_title(ui, "Relação Aluno-Professor ao Longo do Tempo");
    match Aggregator::xy_points(
        &datasets.ratio,
        columns::YEAR,
        columns::STUDENT_TEACHER_RATIO,
    ) {
        Ok(points) => ChartPlotter::draw_line_chart(ui, "rap_by_year", &points, "Ano", "RAP"),
        Err(err) => chart_error(ui, &err),
    }

    ui.add_space(15.0);
    chart_title(ui, "Taxa de Evasão por Região");
    match Aggregator::values_by_group(&datasets.dropout, columns::REGION, columns::DROPOUT_RATE) {
        Ok(groups) => ChartPlotter::draw_box_chart(
            ui,
            "dropout_by_region",
            &groups,
            "Região",
            "Taxa de Evasão",
        ),
        Err(err) => chart_error(ui, &err),
    }
}

fn budget(ui: &mut egui::Ui, datasets: &Datasets) {
    chart_title(ui, "Evolução do Orçamento ao Longo do Tempo");
    match Aggregator::xy_points(&datasets.budget, columns::YEAR, columns::BUDGET) {
        Ok(points) => {
            ChartPlotter::draw_line_chart(ui, "budget_by_year", &points, "Ano", "Orçamento")
        }
        Err(err) => chart_error(ui, &err),
    }

    ui.add_space(15.0);
    chart_title(ui, "Distribuição do Orçamento por Região");
    match Aggregator::group_sum(&datasets.budget, columns::REGION, columns::BUDGET) {
        Ok(summary) => ChartPlotter::draw_bar_chart(
            ui,
            "budget_by_region",
            &summary,
            "Região",
            "Orçamento",
        ),
        Err(err) => chart_error(ui, &err),
    }
}

fn chart_title(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).size(15.0).strong());
    ui.add_space(4.0);
}

fn chart_error(ui: &mut egui::Ui, err: &AggregateError) {
    ui.label(
        RichText::new(format!("Gráfico indisponível: {err}"))
            .size(13.0)
            .color(ERROR_COLOR),
    );
}

fn metric(ui: &mut egui::Ui, label: &str, value: &str) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(5.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
            ui.label(RichText::new(value).size(24.0).strong());
        });
}

/// Integer formatting with Brazilian thousands separators.
fn format_count(value: f64) -> String {
    let raw = format!("{:.0}", value.abs());
    let mut out = String::new();
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if value < 0.0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_labels_match_sidebar_options() {
        let labels: Vec<&str> = Page::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Visão Geral",
                "Distribuição Geográfica",
                "Perfil Sociodemográfico",
                "Indicadores Educacionais",
                "Análise Orçamentária",
            ]
        );
    }

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1234.0), "1.234");
        assert_eq!(format_count(1234567.0), "1.234.567");
        assert_eq!(format_count(-1234.0), "-1.234");
    }
}
