//! Native window around [`HeatMapPanel`].
//!
//! [`run_heatmap`] is the primary entry point: it accepts a command channel
//! receiver and a configuration object and enters the eframe event loop.

use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use eframe::egui;
use egui_phosphor::regular::{EXPORT, FLOPPY_DISK, FOLDER_OPEN, PALETTE};

use crate::config::{ColorScheme, HeatMapConfig};
use crate::data::export::save_points_csv;
use crate::data::observation::Observation;
use crate::error::PersistenceError;
use crate::events::{EventKind, ExportMeta, HeatMapEvent};
use crate::panel::{legend_ui, HeatMapPanel};
use crate::persistence::{load_observations, load_settings, save_observations, save_settings};
use crate::sink::HeatMapCommand;

pub struct HeatMapApp {
    rx: Option<Receiver<HeatMapCommand>>,
    pub panel: HeatMapPanel,
    pub config: HeatMapConfig,
    applied_scheme: Option<ColorScheme>,
    status: Option<String>,
}

impl HeatMapApp {
    pub const OPEN_LABEL: &'static str = "Open...";
    pub const SAVE_DATA_LABEL: &'static str = "Save data...";
    pub const EXPORT_CSV_LABEL: &'static str = "Export CSV...";
    pub const SAVE_SETTINGS_LABEL: &'static str = "Save view settings...";
    pub const LOAD_SETTINGS_LABEL: &'static str = "Load view settings...";

    pub fn new(rx: Option<Receiver<HeatMapCommand>>, config: HeatMapConfig) -> Self {
        let panel = HeatMapPanel::new(config.controllers.event.clone());
        Self {
            rx,
            panel,
            config,
            applied_scheme: None,
            status: None,
        }
    }

    /// Drain pending commands from the sink, rebuilding the grid once.
    fn ingest(&mut self) {
        let Some(rx) = &self.rx else { return };
        let commands: Vec<HeatMapCommand> = rx.try_iter().collect();
        if !commands.is_empty() {
            self.panel.apply_commands(commands);
        }
    }

    fn emit(&self, evt: HeatMapEvent) {
        if let Some(ctrl) = &self.config.controllers.event {
            ctrl.emit(evt);
        }
    }

    fn apply_scheme_if_changed(&mut self, ctx: &egui::Context) {
        if self.applied_scheme.as_ref() == Some(&self.config.color_scheme) {
            return;
        }
        self.config.color_scheme.apply(ctx);
        if self.applied_scheme.is_some() {
            let mut evt = HeatMapEvent::new(EventKind::COLOR_SCHEME_CHANGED);
            evt.color_scheme = Some(self.config.color_scheme.label());
            self.emit(evt);
        }
        self.applied_scheme = Some(self.config.color_scheme.clone());
    }

    /// Replace the observations with the contents of `path`.
    pub fn open_observations(&mut self, path: &Path) -> Result<usize, PersistenceError> {
        let obs = load_observations(path)?;
        let count = obs.len();
        self.panel.set_observations(obs);
        Ok(count)
    }

    /// Write the current observation sequence to `path` (JSON or YAML).
    pub fn save_observations_to(&self, path: &Path) -> Result<(), PersistenceError> {
        save_observations(path, self.panel.observations())
    }

    pub fn save_settings_to(&self, path: &Path) -> Result<(), PersistenceError> {
        save_settings(path, &self.config)
    }

    /// Restore view settings; the colour scheme is re-applied on the next frame.
    pub fn load_settings_from(&mut self, path: &Path) -> Result<(), PersistenceError> {
        load_settings(path)?.apply_to(&mut self.config);
        Ok(())
    }

    /// Export the current grid as CSV. Returns `false` if there is no grid.
    pub fn export_csv_to(&mut self, path: &Path) -> std::io::Result<bool> {
        let Some(grid) = self.panel.grid() else {
            return Ok(false);
        };
        save_points_csv(path, grid)?;
        log::info!(
            "exported {} points to {}",
            grid.points().len(),
            path.display()
        );
        let mut evt = HeatMapEvent::new(EventKind::EXPORT);
        evt.export = Some(ExportMeta {
            format: "csv".to_string(),
            path: Some(path.display().to_string()),
        });
        self.emit(evt);
        Ok(true)
    }

    fn report<T, E: std::fmt::Display>(&mut self, what: &str, path: &Path, res: Result<T, E>) {
        match res {
            Ok(_) => self.status = Some(format!("{what}: {}", path.display())),
            Err(e) => {
                log::error!("{what} failed for {}: {e}", path.display());
                self.status = Some(format!("{what} failed: {e}"));
            }
        }
    }

    fn file_menu(&mut self, ui: &mut egui::Ui) {
        let open = format!("{FOLDER_OPEN} {}", Self::OPEN_LABEL);
        if ui.button(open).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Observations", &["json", "yaml", "yml"])
                .pick_file()
            {
                let res = self.open_observations(&path);
                self.report("Loaded", &path, res);
            }
        }
        let save_data = format!("{FLOPPY_DISK} {}", Self::SAVE_DATA_LABEL);
        if ui.button(save_data).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name("observations.json")
                .add_filter("Observations", &["json", "yaml", "yml"])
                .save_file()
            {
                let res = self.save_observations_to(&path);
                self.report("Saved data", &path, res);
            }
        }
        let has_grid = self.panel.grid().is_some();
        let export = egui::Button::new(format!("{EXPORT} {}", Self::EXPORT_CSV_LABEL));
        if ui.add_enabled(has_grid, export).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name("heatmap.csv")
                .add_filter("CSV", &["csv"])
                .save_file()
            {
                let res = self.export_csv_to(&path);
                self.report("Exported", &path, res);
            }
        }
        ui.separator();
        let save_view = format!("{FLOPPY_DISK} {}", Self::SAVE_SETTINGS_LABEL);
        if ui.button(save_view).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name("riskgrid_view.json")
                .add_filter("JSON", &["json"])
                .save_file()
            {
                let res = self.save_settings_to(&path);
                self.report("Saved settings", &path, res);
            }
        }
        let load_view = format!("{FOLDER_OPEN} {}", Self::LOAD_SETTINGS_LABEL);
        if ui.button(load_view).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                let res = self.load_settings_from(&path);
                self.report("Loaded settings", &path, res);
            }
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("riskgrid_top_bar").show(ctx, |ui| {
            if let Some(h) = &self.config.headline {
                ui.heading(h);
            }
            if let Some(s) = &self.config.subheadline {
                ui.label(s);
            }
            ui.horizontal(|ui| {
                ui.menu_button("File", |ui| self.file_menu(ui));
                ui.separator();
                let mut scheme = self.config.color_scheme.clone();
                egui::ComboBox::from_id_salt("riskgrid_color_scheme")
                    .selected_text(format!("{PALETTE} {}", scheme.label()))
                    .show_ui(ui, |ui| {
                        for s in ColorScheme::all() {
                            ui.selectable_value(&mut scheme, s.clone(), s.label());
                        }
                    });
                self.config.color_scheme = scheme;
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });
    }
}

impl eframe::App for HeatMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_scheme_if_changed(ctx);
        self.ingest();

        if self.config.features.top_bar {
            self.top_bar(ctx);
        }
        if self.config.features.legend {
            egui::TopBottomPanel::bottom("riskgrid_legend").show(ctx, |ui| {
                legend_ui(ui, self.panel.grid(), &self.config);
            });
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            self.panel.ui(ui, &self.config);
        });

        if self.rx.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Launch the heat map in a native window, fed by `rx`.
///
/// The call blocks until the window is closed.
pub fn run_heatmap(rx: Receiver<HeatMapCommand>, mut cfg: HeatMapConfig) -> eframe::Result<()> {
    let opts = native_options(&mut cfg);
    let title = cfg.title.clone();
    let app = HeatMapApp::new(Some(rx), cfg);
    launch(&title, opts, app)
}

/// Launch the heat map with a fixed observation sequence.
pub fn run_heatmap_with_observations(
    observations: Vec<Observation>,
    mut cfg: HeatMapConfig,
) -> eframe::Result<()> {
    let opts = native_options(&mut cfg);
    let title = cfg.title.clone();
    let mut app = HeatMapApp::new(None, cfg);
    app.panel.set_observations(observations);
    launch(&title, opts, app)
}

fn native_options(cfg: &mut HeatMapConfig) -> eframe::NativeOptions {
    let mut opts = cfg.native_options.take().unwrap_or_default();
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1100.0, 750.0));
    }
    opts
}

fn launch(title: &str, opts: eframe::NativeOptions, app: HeatMapApp) -> eframe::Result<()> {
    log::info!("starting heat map window `{title}`");
    eframe::run_native(
        title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
