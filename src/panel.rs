//! Heat map panel: owns the observation sequence, the derived grid and the
//! hover selection, and renders them with `egui_plot`.

use egui::{Color32, RichText};
use egui_plot::{MarkerShape, Plot, PlotPoint as EguiPlotPoint, Points};

use crate::config::HeatMapConfig;
use crate::data::grid::{format_percent, HeatGrid, PointId};
use crate::data::observation::Observation;
use crate::data::selection::{point_style, topmost_hit, PointerEvent, SelectionState};
use crate::data::severity::SeverityBand;
use crate::events::{
    DataUpdateMeta, EventController, EventKind, FaultMeta, HeatMapEvent, PointMeta,
};
use crate::sink::{apply_command, HeatMapCommand};

/// Result of mapping the current observations.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GridState {
    /// No observations; the panel shows its empty message.
    #[default]
    Empty,
    Ready(HeatGrid),
    /// The grid could not be built; nothing from this observation set is drawn.
    Fault(String),
}

/// Tick label for a categorical axis: only integral marks inside the index get a label.
pub fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Screen position of a drawn marker, in egui points.
pub type MarkerPosition = (PointId, [f32; 2]);

/// A filled circular marker. Markers carry no item name, so the plot's own
/// hover label stays empty and only the cell tooltip is shown.
fn marker<'a>(xy: [f64; 2], radius: f32, color: Color32) -> Points<'a> {
    Points::new("", vec![xy])
        .shape(MarkerShape::Circle)
        .radius(radius)
        .filled(true)
        .color(color)
}

#[derive(Default)]
pub struct HeatMapPanel {
    observations: Vec<Observation>,
    state: GridState,
    selection: SelectionState,
    markers: Vec<MarkerPosition>,
    events: Option<EventController>,
}

impl HeatMapPanel {
    pub fn new(events: Option<EventController>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn grid(&self) -> Option<&HeatGrid> {
        match &self.state {
            GridState::Ready(grid) => Some(grid),
            _ => None,
        }
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Marker positions from the last rendered frame, in draw order.
    pub fn marker_positions(&self) -> &[MarkerPosition] {
        &self.markers
    }

    /// Replace the observation sequence and rebuild the grid.
    pub fn set_observations(&mut self, observations: Vec<Observation>) {
        self.observations = observations;
        self.rebuild();
    }

    /// Apply a batch of sink commands, rebuilding at most once.
    pub fn apply_commands<I>(&mut self, commands: I) -> bool
    where
        I: IntoIterator<Item = HeatMapCommand>,
    {
        let mut changed = false;
        for cmd in commands {
            changed |= apply_command(&mut self.observations, cmd);
        }
        if changed {
            self.rebuild();
        }
        changed
    }

    /// Recompute the grid from scratch. Selection is reset since point ids
    /// refer to positions in the previous sequence.
    fn rebuild(&mut self) {
        self.selection = SelectionState::NoneActive;
        if self.observations.is_empty() {
            log::debug!("heat map cleared");
            self.state = GridState::Empty;
            self.emit(HeatMapEvent::new(EventKind::DATA_CLEARED));
            return;
        }
        match HeatGrid::build(&self.observations) {
            Ok(grid) => {
                let mut evt = HeatMapEvent::new(EventKind::DATA_UPDATED);
                evt.data_update = Some(DataUpdateMeta {
                    observation_count: grid.points().len(),
                    row_count: grid.rows().len(),
                    column_count: grid.columns().len(),
                });
                self.state = GridState::Ready(grid);
                self.emit(evt);
            }
            Err(e) => {
                log::error!("cannot build heat grid: {e}");
                let message = e.to_string();
                self.state = GridState::Fault(message.clone());
                let mut evt = HeatMapEvent::new(EventKind::GRID_FAULT);
                evt.fault = Some(FaultMeta { message });
                self.emit(evt);
            }
        }
    }

    /// Feed a pointer event through the selection state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.selection.apply(event);
        match event {
            PointerEvent::Enter(id) => {
                let mut evt = HeatMapEvent::new(EventKind::POINT_ENTER);
                evt.point = self.grid().and_then(|g| g.point(id)).map(PointMeta::from);
                self.emit(evt);
            }
            PointerEvent::Leave => self.emit(HeatMapEvent::new(EventKind::POINT_LEAVE)),
        }
    }

    fn emit(&self, evt: HeatMapEvent) {
        if let Some(ctrl) = &self.events {
            ctrl.emit(evt);
        }
    }

    /// Render into `ui`.
    ///
    /// Leaving the plotted collection, whether to empty plot space or out of
    /// the plot, emits a single `Leave`.
    pub fn ui(&mut self, ui: &mut egui::Ui, cfg: &HeatMapConfig) {
        let (markers, hit) = match &self.state {
            GridState::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(&cfg.empty_message).size(18.0).weak());
                });
                (Vec::new(), None)
            }
            GridState::Fault(msg) => {
                let color = ui.visuals().error_fg_color;
                let text = format!("Cannot render heat map: {msg}");
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(text).color(color));
                });
                (Vec::new(), None)
            }
            GridState::Ready(grid) => show_grid_plot(ui, grid, self.selection, cfg),
        };
        self.markers = markers;
        if let Some(event) = self.selection.event_for_hit(hit) {
            self.handle_pointer(event);
        }
    }
}

/// Draw the grid. Returns every marker's screen position and the point
/// currently under the pointer.
fn show_grid_plot(
    ui: &mut egui::Ui,
    grid: &HeatGrid,
    selection: SelectionState,
    cfg: &HeatMapConfig,
) -> (Vec<MarkerPosition>, Option<PointId>) {
    let palette = cfg.color_scheme.severity_palette();
    let highlight = cfg.color_scheme.highlight_color();
    let style_cfg = &cfg.point_style;

    let mut plot = Plot::new("riskgrid_heatmap")
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show_x(false)
        .show_y(false)
        .show_grid(cfg.features.grid);
    if let Some(r) = grid.column_domain().plot_range() {
        plot = plot.include_x(*r.start()).include_x(*r.end());
    }
    if let Some(r) = grid.row_domain().plot_range() {
        plot = plot.include_y(*r.start()).include_y(*r.end());
    }
    if cfg.features.axis_labels {
        let cols = grid.columns().labels().to_vec();
        let rows = grid.rows().labels().to_vec();
        plot = plot
            .x_axis_formatter(move |mark, _| category_label(&cols, mark.value))
            .y_axis_formatter(move |mark, _| category_label(&rows, mark.value));
    }
    if let Some(name) = &cfg.column_axis_name {
        plot = plot.x_axis_label(name.clone());
    }
    if let Some(name) = &cfg.row_axis_name {
        plot = plot.y_axis_label(name.clone());
    }

    let plot_response = plot.show(ui, |plot_ui| {
        // Input order is draw order, so later points sit on top of earlier ones.
        for p in grid.points() {
            let style = point_style(selection, p.id, style_cfg);
            if style.highlighted {
                let ring = style_cfg.radius + style_cfg.border_width;
                plot_ui.points(marker(p.xy(), ring, highlight));
            }
            let color = palette.color_for(p.severity()).gamma_multiply(style.opacity);
            plot_ui.points(marker(p.xy(), style_cfg.radius, color));
        }
    });

    let transform = plot_response.transform;
    let markers: Vec<MarkerPosition> = grid
        .points()
        .iter()
        .map(|p| {
            let [x, y] = p.xy();
            let pos = transform.position_from_point(&EguiPlotPoint::new(x, y));
            (p.id, [pos.x, pos.y])
        })
        .collect();
    let Some(pointer) = plot_response.response.hover_pos() else {
        return (markers, None);
    };
    let hit = topmost_hit(
        markers.iter().copied(),
        [pointer.x, pointer.y],
        style_cfg.hit_radius,
    );

    if cfg.features.tooltips {
        if let Some(p) = hit.and_then(|id| grid.point(id)) {
            let band_color = palette.color_for(p.severity());
            plot_response.response.on_hover_ui_at_pointer(|ui| {
                ui.label(RichText::new(&p.row_label).strong());
                ui.label(&p.column_label);
                ui.label(RichText::new(format_percent(p.value)).color(band_color));
            });
        }
    }
    (markers, hit)
}

/// Severity legend with per-band point counts.
pub fn legend_ui(ui: &mut egui::Ui, grid: Option<&HeatGrid>, cfg: &HeatMapConfig) {
    let palette = cfg.color_scheme.severity_palette();
    let counts = grid.map(|g| g.severity_counts()).unwrap_or_default();
    ui.horizontal(|ui| {
        for band in SeverityBand::all() {
            legend_entry(ui, palette.color_for(band), band, counts.get(band));
            ui.add_space(12.0);
        }
    });
}

fn legend_entry(ui: &mut egui::Ui, color: Color32, band: SeverityBand, count: usize) {
    ui.label(RichText::new("●").color(color).size(16.0));
    ui.label(format!("{} ({}): {}", band.label(), band.range_label(), count));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventFilter;
    use egui::{pos2, Event, RawInput};
    use egui_plot::PlotItem;

    /// Headless egui context driving the panel one frame at a time.
    struct Harness {
        ctx: egui::Context,
        cfg: HeatMapConfig,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                ctx: egui::Context::default(),
                cfg: HeatMapConfig::default(),
            }
        }

        fn frame(&self, panel: &mut HeatMapPanel, events: Vec<Event>) {
            let input = RawInput {
                events,
                ..Default::default()
            };
            let _ = self.ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    panel.ui(ui, &self.cfg);
                });
            });
        }

        /// Render without a pointer so widget rects and marker positions settle.
        fn settle(&self, panel: &mut HeatMapPanel) {
            self.frame(panel, Vec::new());
            self.frame(panel, Vec::new());
        }

        fn move_to(&self, panel: &mut HeatMapPanel, pos: [f32; 2]) {
            self.frame(panel, vec![Event::PointerMoved(pos2(pos[0], pos[1]))]);
        }
    }

    fn position_of(panel: &HeatMapPanel, id: PointId) -> [f32; 2] {
        let (_, pos) = panel
            .marker_positions()
            .iter()
            .find(|(m, _)| *m == id)
            .copied()
            .unwrap();
        pos
    }

    fn labels() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[test]
    fn category_labels_only_on_integral_marks() {
        assert_eq!(category_label(&labels(), 0.0), "A");
        assert_eq!(category_label(&labels(), 1.0), "B");
        assert_eq!(category_label(&labels(), 0.5), "");
        assert_eq!(category_label(&labels(), -1.0), "");
        assert_eq!(category_label(&labels(), 2.0), "");
    }

    #[test]
    fn empty_observations_show_empty_state() {
        let mut panel = HeatMapPanel::new(None);
        panel.set_observations(Vec::new());
        assert_eq!(panel.state(), &GridState::Empty);
        assert!(panel.grid().is_none());
    }

    #[test]
    fn invalid_observations_fault_without_panicking() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe(EventFilter::only(EventKind::GRID_FAULT));
        let mut panel = HeatMapPanel::new(Some(ctrl));
        panel.set_observations(vec![Observation::new("A", "X", f64::NAN)]);
        assert!(matches!(panel.state(), GridState::Fault(_)));
        let evt = rx.try_recv().unwrap();
        assert!(evt.fault.unwrap().message.contains("#0"));
    }

    #[test]
    fn rebuild_resets_selection() {
        let mut panel = HeatMapPanel::new(None);
        panel.set_observations(vec![Observation::new("A", "X", 10.0)]);
        panel.handle_pointer(PointerEvent::Enter(0));
        assert_eq!(panel.selection(), SelectionState::ActiveAt(0));
        let more = vec![Observation::new("B", "X", 20.0)];
        panel.apply_commands([HeatMapCommand::AppendObservations(more)]);
        assert_eq!(panel.selection(), SelectionState::NoneActive);
        assert_eq!(panel.grid().map(|g| g.points().len()), Some(2));
    }

    #[test]
    fn pointer_enter_emits_point_meta() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe(EventFilter::only(EventKind::POINT_ENTER));
        let mut panel = HeatMapPanel::new(Some(ctrl));
        panel.set_observations(vec![
            Observation::new("A", "X", 10.0),
            Observation::new("B", "Y", 80.0),
        ]);
        panel.handle_pointer(PointerEvent::Enter(1));
        let meta = rx.try_recv().unwrap().point.unwrap();
        assert_eq!(meta.id, 1);
        assert_eq!(meta.row_label, "B");
        assert_eq!(meta.severity, SeverityBand::Low);
    }

    #[test]
    fn markers_have_no_plot_label() {
        assert_eq!(PlotItem::name(&marker([0.0, 0.0], 14.0, Color32::RED)), "");
    }

    #[test]
    fn moving_onto_marker_activates_it() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe(EventFilter::only(EventKind::POINT_ENTER));
        let win = Harness::new();
        let mut panel = HeatMapPanel::new(Some(ctrl));
        panel.set_observations(vec![
            Observation::new("A", "X", 10.0),
            Observation::new("B", "Y", 80.0),
        ]);
        win.settle(&mut panel);
        assert_eq!(panel.marker_positions().len(), 2);

        let target = position_of(&panel, 1);
        win.move_to(&mut panel, target);
        assert_eq!(panel.selection(), SelectionState::ActiveAt(1));
        assert_eq!(rx.try_recv().unwrap().point.unwrap().id, 1);
    }

    #[test]
    fn moving_to_empty_plot_space_leaves() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe(EventFilter::only(EventKind::POINT_LEAVE));
        let win = Harness::new();
        let mut panel = HeatMapPanel::new(Some(ctrl));
        panel.set_observations(vec![
            Observation::new("A", "X", 10.0),
            Observation::new("B", "Y", 80.0),
        ]);
        win.settle(&mut panel);
        let a = position_of(&panel, 0);
        let b = position_of(&panel, 1);

        win.move_to(&mut panel, a);
        assert_eq!(panel.selection(), SelectionState::ActiveAt(0));

        let between = [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0];
        win.move_to(&mut panel, between);
        assert_eq!(panel.selection(), SelectionState::NoneActive);
        assert!(rx.try_recv().is_ok());

        // Staying in empty space does not leave twice.
        win.move_to(&mut panel, between);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn pointer_leaving_the_window_leaves() {
        let win = Harness::new();
        let mut panel = HeatMapPanel::new(None);
        panel.set_observations(vec![Observation::new("A", "X", 10.0)]);
        win.settle(&mut panel);
        let a = position_of(&panel, 0);
        win.move_to(&mut panel, a);
        assert_eq!(panel.selection(), SelectionState::ActiveAt(0));

        win.frame(&mut panel, vec![Event::PointerGone]);
        assert_eq!(panel.selection(), SelectionState::NoneActive);
    }

    #[test]
    fn later_of_coincident_markers_wins() {
        let win = Harness::new();
        let mut panel = HeatMapPanel::new(None);
        panel.set_observations(vec![
            Observation::new("A", "X", 10.0),
            Observation::new("A", "X", 90.0),
        ]);
        win.settle(&mut panel);
        assert_eq!(position_of(&panel, 0), position_of(&panel, 1));

        let target = position_of(&panel, 0);
        win.move_to(&mut panel, target);
        assert_eq!(panel.selection(), SelectionState::ActiveAt(1));
    }

    #[test]
    fn empty_and_fault_states_render_without_plot() {
        let win = Harness::new();
        let mut panel = HeatMapPanel::new(None);
        panel.set_observations(vec![Observation::new("A", "X", 10.0)]);
        win.settle(&mut panel);
        assert_eq!(panel.marker_positions().len(), 1);

        panel.set_observations(Vec::new());
        win.settle(&mut panel);
        win.move_to(&mut panel, [100.0, 100.0]);
        assert_eq!(panel.state(), &GridState::Empty);
        assert!(panel.marker_positions().is_empty());
        assert_eq!(panel.selection(), SelectionState::NoneActive);

        panel.set_observations(vec![Observation::new("", "X", 10.0)]);
        win.settle(&mut panel);
        win.move_to(&mut panel, [100.0, 100.0]);
        assert!(matches!(panel.state(), GridState::Fault(_)));
        assert!(panel.marker_positions().is_empty());
        assert_eq!(panel.selection(), SelectionState::NoneActive);
    }
}
