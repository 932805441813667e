//! Enfermagem Dashboard - Nursing-education data viewer

use eframe::egui;
use enfermagem_dashboard::gui::DashboardApp;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Init logging
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Análise da Formação Técnica em Enfermagem"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Enfermagem Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
