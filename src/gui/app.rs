//! Main Application Window
//! Sidebar navigation plus the central page area. The datasets load once in
//! a background thread at startup and are held immutably for the whole
//! session; a load failure halts every page with a single error message.

use crate::data::{DatasetLoader, Datasets, DATA_DIR};
use crate::gui::pages::{self, Page};
use egui::{Color32, RichText, SidePanel};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Dataset loading result from the background thread
enum LoadResult {
    Complete(Datasets),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    page: Page,
    datasets: Option<Arc<Datasets>>,
    load_error: Option<String>,
    load_rx: Option<Receiver<LoadResult>>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let (tx, rx) = channel();
        let base = PathBuf::from(DATA_DIR);

        // Load the five datasets in the background, once per session
        thread::spawn(move || match DatasetLoader::load_all(&base) {
            Ok(datasets) => {
                let _ = tx.send(LoadResult::Complete(datasets));
            }
            Err(err) => {
                let _ = tx.send(LoadResult::Error(err.to_string()));
            }
        });

        Self {
            page: Page::Overview,
            datasets: None,
            load_error: None,
            load_rx: Some(rx),
        }
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete(datasets) => {
                        info!("datasets ready, rendering enabled");
                        self.datasets = Some(Arc::new(datasets));
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(message) => {
                        error!(error = %message, "dataset load failed");
                        self.load_error = Some(message);
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Repaint while the background load is still running
        if self.load_rx.is_some() {
            ctx.request_repaint();
        }

        // Left panel - Navigation
        SidePanel::left("navigation")
            .min_width(220.0)
            .max_width(260.0)
            .show(ctx, |ui| {
                ui.add_space(5.0);
                ui.label(RichText::new("Navegação").size(18.0).strong());
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(5.0);

                ui.label(RichText::new("Selecione uma página:").size(12.0));
                ui.add_space(5.0);
                for page in Page::ALL {
                    ui.radio_value(&mut self.page, page, page.label());
                }
            });

        // Central panel - Selected page
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Análise da Formação Técnica em Enfermagem nas Universidades Federais");
            ui.add_space(10.0);
            ui.separator();
            ui.add_space(10.0);

            // Fail-fast: a load failure halts every page
            if let Some(err) = &self.load_error {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Erro ao carregar os dados: {err}"))
                            .size(16.0)
                            .color(ERROR_COLOR),
                    );
                });
                return;
            }

            match self.datasets.clone() {
                Some(datasets) => {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            pages::render(ui, self.page, &datasets);
                        });
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                            ui.add_space(8.0);
                            ui.label(RichText::new("Carregando dados...").size(14.0));
                        });
                    });
                }
            }
        });
    }
}
