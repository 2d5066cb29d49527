use riskgrid::config::PointStyleConfig;
use riskgrid::data::selection::{point_style, transition, PointerEvent, SelectionState};

#[test]
fn starts_with_nothing_active() {
    assert_eq!(SelectionState::default(), SelectionState::NoneActive);
}

#[test]
fn second_enter_replaces_first() {
    let s = transition(SelectionState::NoneActive, PointerEvent::Enter(3));
    let s = transition(s, PointerEvent::Enter(5));
    assert_eq!(s, SelectionState::ActiveAt(5));
    assert!(s.is_active(5));
    assert!(!s.is_active(3));
}

#[test]
fn leave_clears_from_any_state() {
    assert_eq!(
        transition(SelectionState::ActiveAt(7), PointerEvent::Leave),
        SelectionState::NoneActive
    );
    assert_eq!(
        transition(SelectionState::NoneActive, PointerEvent::Leave),
        SelectionState::NoneActive
    );
}

#[test]
fn only_active_point_is_opaque_and_bordered() {
    let cfg = PointStyleConfig::default();
    let state = SelectionState::ActiveAt(1);

    let active = point_style(state, 1, &cfg);
    assert_eq!(active.opacity, cfg.active_opacity);
    assert!(active.highlighted);

    let other = point_style(state, 0, &cfg);
    assert_eq!(other.opacity, cfg.inactive_opacity);
    assert!(!other.highlighted);
    assert!(other.opacity < active.opacity);

    let idle = point_style(SelectionState::NoneActive, 1, &cfg);
    assert!(!idle.highlighted);
}
