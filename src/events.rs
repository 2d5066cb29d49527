//! Event system for the heat map.
//!
//! Callers subscribe through [`EventController`] with an [`EventFilter`]; an
//! event is delivered when `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::data::grid::{PlotPoint, PointId};
use crate::data::severity::SeverityBand;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u64);

impl EventKind {
    /// The pointer entered a point; it is now the active point.
    pub const POINT_ENTER: Self = Self(1 << 0);
    /// The pointer left the plotted collection; no point is active.
    pub const POINT_LEAVE: Self = Self(1 << 1);
    /// The observation sequence changed and the grid was rebuilt.
    pub const DATA_UPDATED: Self = Self(1 << 2);
    /// All observations were removed.
    pub const DATA_CLEARED: Self = Self(1 << 3);
    /// The grid could not be built from the current observations.
    pub const GRID_FAULT: Self = Self(1 << 4);
    /// Plot points were exported.
    pub const EXPORT: Self = Self(1 << 5);
    /// A different colour scheme was applied.
    pub const COLOR_SCHEME_CHANGED: Self = Self(1 << 6);

    pub const ALL: Self = Self(u64::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::POINT_ENTER, "POINT_ENTER"),
            (EventKind::POINT_LEAVE, "POINT_LEAVE"),
            (EventKind::DATA_UPDATED, "DATA_UPDATED"),
            (EventKind::DATA_CLEARED, "DATA_CLEARED"),
            (EventKind::GRID_FAULT, "GRID_FAULT"),
            (EventKind::EXPORT, "EXPORT"),
            (EventKind::COLOR_SCHEME_CHANGED, "COLOR_SCHEME_CHANGED"),
        ];

        let mut names = Vec::new();
        let mut known_bits: u64 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// The point involved in an enter event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMeta {
    pub id: PointId,
    pub row_label: String,
    pub column_label: String,
    pub value: f64,
    pub severity: SeverityBand,
}

impl From<&PlotPoint> for PointMeta {
    fn from(p: &PlotPoint) -> Self {
        Self {
            id: p.id,
            row_label: p.row_label.clone(),
            column_label: p.column_label.clone(),
            value: p.value,
            severity: p.severity(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUpdateMeta {
    pub observation_count: usize,
    pub row_count: usize,
    pub column_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaultMeta {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportMeta {
    /// Format of the export ("csv").
    pub format: String,
    pub path: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// HeatMapEvent
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct HeatMapEvent {
    pub kinds: EventKind,
    /// Seconds since the controller was created.
    pub timestamp: f64,

    pub point: Option<PointMeta>,
    pub data_update: Option<DataUpdateMeta>,
    pub fault: Option<FaultMeta>,
    pub export: Option<ExportMeta>,
    pub color_scheme: Option<String>,
}

impl HeatMapEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0, // set by controller
            point: None,
            data_update: None,
            fault: None,
            export: None,
            color_scheme: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &HeatMapEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<HeatMapEvent>,
}

/// Clonable handle for subscribing to and emitting heat map events.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    pub fn subscribe(&self, filter: EventFilter) -> Receiver<HeatMapEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<HeatMapEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Deliver `event` to every matching subscriber; subscribers whose
    /// receiver was dropped are removed on their next matching event.
    pub fn emit(&self, mut event: HeatMapEvent) {
        let mut inner = self.inner.lock().unwrap();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subscribers.len()
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_union_and_intersection() {
        let combined = EventKind::POINT_ENTER | EventKind::DATA_UPDATED;
        assert!(combined.contains(EventKind::POINT_ENTER));
        assert!(combined.intersects(EventKind::DATA_UPDATED));
        assert!(!EventKind::EXPORT.intersects(combined));
        assert!(EventKind::ALL.contains(EventKind::GRID_FAULT));
    }

    #[test]
    fn display_names() {
        assert_eq!(EventKind(0).to_string(), "EMPTY");
        assert_eq!(EventKind::ALL.to_string(), "ALL");
        assert_eq!(
            (EventKind::POINT_ENTER | EventKind::EXPORT).to_string(),
            "POINT_ENTER|EXPORT"
        );
        assert_eq!(EventKind(1 << 40).to_string(), "0x10000000000");
    }

    #[test]
    fn controller_routes_by_filter() {
        let ctrl = EventController::new();
        let rx_all = ctrl.subscribe_all();
        let rx_hover = ctrl.subscribe(EventFilter::only(
            EventKind::POINT_ENTER | EventKind::POINT_LEAVE,
        ));
        let rx_export = ctrl.subscribe(EventFilter::only(EventKind::EXPORT));

        ctrl.emit(HeatMapEvent::new(EventKind::POINT_LEAVE));

        assert!(rx_all.try_recv().is_ok());
        assert!(rx_hover.try_recv().is_ok());
        assert!(rx_export.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe_all();
        drop(rx);
        let _keep = ctrl.subscribe_all();
        ctrl.emit(HeatMapEvent::new(EventKind::DATA_CLEARED));
        assert_eq!(ctrl.subscriber_count(), 1);
    }
}
