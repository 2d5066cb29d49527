use riskgrid::sink::{apply_command, channel, HeatMapCommand};
use riskgrid::{GridState, HeatMapPanel, Observation};

#[test]
fn sink_commands_arrive_in_order() {
    let (sink, rx) = channel();
    let first = vec![Observation::new("A", "X", 1.0)];
    sink.set_observations(first).unwrap();
    sink.push(Observation::new("B", "X", 2.0)).unwrap();
    sink.clear().unwrap();
    let cmds: Vec<HeatMapCommand> = rx.try_iter().collect();
    assert_eq!(cmds.len(), 3);
    assert!(matches!(cmds[0], HeatMapCommand::SetObservations(_)));
    assert!(matches!(cmds[1], HeatMapCommand::AppendObservations(_)));
    assert_eq!(cmds[2], HeatMapCommand::Clear);
}

#[test]
fn apply_command_reports_changes() {
    let mut obs = Vec::new();
    assert!(!apply_command(&mut obs, HeatMapCommand::Clear));
    let nothing = HeatMapCommand::AppendObservations(Vec::new());
    assert!(!apply_command(&mut obs, nothing));
    assert!(apply_command(
        &mut obs,
        HeatMapCommand::AppendObservations(vec![Observation::new("A", "X", 1.0)])
    ));
    assert!(apply_command(&mut obs, HeatMapCommand::Clear));
    assert!(obs.is_empty());
}

#[test]
fn panel_rebuilds_from_sink() {
    let (sink, rx) = channel();
    let mut panel = HeatMapPanel::new(None);
    sink.set_observations(vec![
        Observation::new("A", "X", 10.0),
        Observation::new("B", "Y", 50.0),
    ])
    .unwrap();
    assert!(panel.apply_commands(rx.try_iter()));
    let grid = panel.grid().unwrap();
    assert_eq!(grid.rows().len(), 2);
    assert_eq!(grid.columns().len(), 2);

    sink.clear().unwrap();
    panel.apply_commands(rx.try_iter());
    assert_eq!(panel.state(), &GridState::Empty);
}
