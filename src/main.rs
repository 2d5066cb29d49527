//! Demo binary: shows a compliance heat map.
//!
//! Usage: `riskgrid [observations.json|observations.yaml]`. Without an argument
//! a built-in sample of framework/control scores is displayed.

use riskgrid::events::{EventFilter, EventKind};
use riskgrid::persistence::load_observations;
use riskgrid::{channel, EventController, HeatMapConfig, Observation};

fn sample_observations() -> Vec<Observation> {
    let frameworks = ["SOC 2", "ISO 27001", "GDPR", "HIPAA", "PCI DSS"];
    let controls = [
        "Access Control",
        "Encryption",
        "Incident Response",
        "Vendor Management",
        "Data Retention",
        "Logging",
    ];
    let mut out = Vec::new();
    for (i, fw) in frameworks.iter().enumerate() {
        for (j, ctl) in controls.iter().enumerate() {
            let score = ((i * 37 + j * 23 + 11) % 100) as f64;
            out.push(Observation::new(*fw, *ctl, score));
        }
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let observations = match std::env::args().nth(1) {
        Some(path) => load_observations(&path)?,
        None => sample_observations(),
    };

    let events = EventController::new();
    let hover_rx = events.subscribe(EventFilter::only(
        EventKind::POINT_ENTER | EventKind::GRID_FAULT,
    ));
    std::thread::spawn(move || {
        while let Ok(evt) = hover_rx.recv() {
            if let Some(p) = evt.point {
                log::debug!("hover {} / {} = {}", p.row_label, p.column_label, p.value);
            }
            if let Some(f) = evt.fault {
                log::warn!("heat map fault: {}", f.message);
            }
        }
    });

    let (sink, rx) = channel();
    sink.set_observations(observations)?;

    let mut cfg = HeatMapConfig::default();
    cfg.title = "MetaWorks Compliance Heat Map".to_string();
    cfg.headline = Some("Compliance risk by framework and control".to_string());
    cfg.row_axis_name = Some("Framework".to_string());
    cfg.column_axis_name = Some("Control".to_string());
    cfg.controllers.event = Some(events);

    riskgrid::run_heatmap(rx, cfg)?;
    Ok(())
}
