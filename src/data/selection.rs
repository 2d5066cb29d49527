// src/data/selection.rs
// Hover selection for heat map points.

use crate::config::PointStyleConfig;
use crate::data::grid::PointId;

/// At most one point is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    NoneActive,
    ActiveAt(PointId),
}

/// Pointer interaction with the plotted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// The pointer entered the hit area of a point.
    Enter(PointId),
    /// The pointer left the plotted collection.
    Leave,
}

/// Pure transition function for the selection state.
pub fn transition(_state: SelectionState, event: PointerEvent) -> SelectionState {
    match event {
        PointerEvent::Enter(id) => SelectionState::ActiveAt(id),
        PointerEvent::Leave => SelectionState::NoneActive,
    }
}

impl SelectionState {
    /// Apply `event` in place.
    pub fn apply(&mut self, event: PointerEvent) {
        *self = transition(*self, event);
    }

    pub fn active(&self) -> Option<PointId> {
        match self {
            SelectionState::NoneActive => None,
            SelectionState::ActiveAt(id) => Some(*id),
        }
    }

    pub fn is_active(&self, id: PointId) -> bool {
        self.active() == Some(id)
    }

    /// The event that moves this state to reflect `hit`, or `None` if it already does.
    pub fn event_for_hit(&self, hit: Option<PointId>) -> Option<PointerEvent> {
        match (self.active(), hit) {
            (Some(cur), Some(id)) if cur == id => None,
            (_, Some(id)) => Some(PointerEvent::Enter(id)),
            (Some(_), None) => Some(PointerEvent::Leave),
            (None, None) => None,
        }
    }
}

/// Visual treatment of one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub opacity: f32,
    pub highlighted: bool,
}

/// Style of point `id` under `state`: the active point is opaque and bordered,
/// every other point is dimmed.
pub fn point_style(state: SelectionState, id: PointId, cfg: &PointStyleConfig) -> PointStyle {
    if state.is_active(id) {
        PointStyle {
            opacity: cfg.active_opacity,
            highlighted: true,
        }
    } else {
        PointStyle {
            opacity: cfg.inactive_opacity,
            highlighted: false,
        }
    }
}

/// Point under `pointer` within `radius` (screen units).
///
/// Candidates are in input order; when several overlap the last one wins since
/// it is drawn on top.
pub fn topmost_hit<I>(candidates: I, pointer: [f32; 2], radius: f32) -> Option<PointId>
where
    I: IntoIterator<Item = (PointId, [f32; 2])>,
{
    let r2 = radius * radius;
    candidates
        .into_iter()
        .filter(|(_, pos)| {
            let dx = pos[0] - pointer[0];
            let dy = pos[1] - pointer[1];
            dx * dx + dy * dy <= r2
        })
        .map(|(id, _)| id)
        .last()
}
