//! Label-to-position mapping for one categorical axis.
//!
//! Positions are handed out in order of first appearance, starting at 0, so
//! the mapping is always a bijection onto `0..len()`.

use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Which grid axis an index or label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// First-occurrence ordered label index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisIndex {
    positions: HashMap<String, usize>,
    labels: Vec<String>,
}

impl AxisIndex {
    /// Scan `labels` once, assigning the next free position to each unseen label.
    pub fn build<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();
        for label in labels {
            index.insert(label);
        }
        index
    }

    /// Insert `label` if unseen; returns its position either way.
    fn insert(&mut self, label: &str) -> usize {
        if let Some(&pos) = self.positions.get(label) {
            return pos;
        }
        let pos = self.labels.len();
        self.positions.insert(label.to_string(), pos);
        self.labels.push(label.to_string());
        pos
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn label(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in position order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// `(label, position)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.labels.iter().enumerate().map(|(i, l)| (l.as_str(), i))
    }

    pub fn domain(&self) -> AxisDomain {
        AxisDomain {
            count: self.labels.len(),
        }
    }
}

/// Renderable extent of one axis.
///
/// An empty axis has no upper bound rather than a `-1` sentinel; callers must
/// take an explicit empty-state path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisDomain {
    pub count: usize,
}

impl AxisDomain {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Largest valid position, `count - 1`.
    pub fn upper_bound(&self) -> Option<usize> {
        self.count.checked_sub(1)
    }

    /// Plot-space range covering every cell, padded by half a cell on each side.
    pub fn plot_range(&self) -> Option<RangeInclusive<f64>> {
        self.upper_bound().map(|max| -0.5..=(max as f64 + 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_order_not_lexicographic() {
        let idx = AxisIndex::build(["B", "A", "B", "C", "A"]);
        assert_eq!(idx.position("B"), Some(0));
        assert_eq!(idx.position("A"), Some(1));
        assert_eq!(idx.position("C"), Some(2));
        assert_eq!(idx.labels(), &["B", "A", "C"]);
        assert_eq!(idx.label(1), Some("A"));
        assert_eq!(idx.label(3), None);
    }

    #[test]
    fn empty_input_gives_empty_domain() {
        let idx = AxisIndex::build(std::iter::empty());
        assert!(idx.is_empty());
        let dom = idx.domain();
        assert!(dom.is_empty());
        assert_eq!(dom.upper_bound(), None);
        assert_eq!(dom.plot_range(), None);
    }

    #[test]
    fn domain_spans_all_positions() {
        let idx = AxisIndex::build(["x", "y", "z"]);
        let dom = idx.domain();
        assert_eq!(dom.upper_bound(), Some(2));
        assert_eq!(dom.plot_range(), Some(-0.5..=2.5));
    }

    #[test]
    fn axis_display() {
        assert_eq!(Axis::Row.to_string(), "row");
        assert_eq!(Axis::Column.to_string(), "column");
    }
}
