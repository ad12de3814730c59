//! Temporal filter: visual state of the tree at a timeline cursor year.
//!
//! Visual state is recomputed on every cursor change from an existing
//! [`LayoutResult`]; the layout itself is never re-run.

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::consts::{DECEASED_RADIUS, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, MIN_PERIOD_BAR_WIDTH_PCT, NODE_RADIUS, NOT_YET_BORN_RADIUS};
use crate::layout::LayoutResult;
use crate::lifespan::{Lifespan, estimate_lifespan};
use crate::person::{Person, PersonId};

/// Year bounds of the timeline slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRange {
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for TimelineRange {
    fn default() -> Self {
        Self { min_year: DEFAULT_MIN_YEAR, max_year: DEFAULT_MAX_YEAR }
    }
}

impl TimelineRange {
    #[must_use]
    pub fn new(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }

    /// Clamp a year into the slider's bounds.
    #[must_use]
    pub fn clamp(&self, year: i32) -> i32 {
        year.max(self.min_year).min(self.max_year)
    }

    /// Whether filtering applies at `year`. At the rightmost position
    /// everything is shown.
    #[must_use]
    pub fn is_filtering(&self, year: i32) -> bool {
        year < self.max_year
    }

    /// Width of the range in years, never less than one. Widened so the
    /// full `i32` domain cannot overflow.
    #[must_use]
    pub fn span(&self) -> i64 {
        (i64::from(self.max_year) - i64::from(self.min_year)).max(1)
    }
}

/// Visual state of a person node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeState {
    Normal,
    NotYetBorn,
    Deceased,
    Unknown,
}

impl NodeState {
    /// Node circle radius for this state.
    #[must_use]
    pub fn radius(self) -> f64 {
        match self {
            Self::Normal | Self::Unknown => NODE_RADIUS,
            Self::NotYetBorn => NOT_YET_BORN_RADIUS,
            Self::Deceased => DECEASED_RADIUS,
        }
    }

    /// Stylesheet class toggled on the node's shapes and labels.
    #[must_use]
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::NotYetBorn => Some("dimmed"),
            Self::Deceased => Some("past"),
            Self::Unknown => Some("unknown-date"),
        }
    }
}

/// Visual state of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeState {
    Normal,
    Dimmed,
}

/// Output of [`derive_visual_state`].
///
/// Edge vectors are index-aligned with the layout's edge vectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualState {
    pub cursor_year: i32,
    pub filtering: bool,
    pub nodes: BTreeMap<PersonId, NodeState>,
    pub spouse_links: Vec<EdgeState>,
    pub parent_child_links: Vec<EdgeState>,
}

/// State of a node with the given lifespan at `year`, filtering assumed on.
///
/// Comparisons are strict: a person is normal in their start and end years.
#[must_use]
pub fn node_state(lifespan: Lifespan, year: i32) -> NodeState {
    match lifespan {
        Lifespan { start: None, .. } => NodeState::Unknown,
        Lifespan { start: Some(start), .. } if year < start => NodeState::NotYetBorn,
        Lifespan { end: Some(end), .. } if year > end => NodeState::Deceased,
        _ => NodeState::Normal,
    }
}

/// Derive per-node and per-edge visual state for a cursor year.
///
/// A parent-child edge is dimmed exactly when its child is not yet born.
/// Spouse edges are never dimmed.
#[must_use]
pub fn derive_visual_state(layout: &LayoutResult, cursor_year: i32, range: &TimelineRange) -> VisualState {
    let filtering = range.is_filtering(cursor_year);
    let lifespans: HashMap<&str, Lifespan> = layout
        .nodes
        .iter()
        .map(|n| (n.id(), estimate_lifespan(&n.person)))
        .collect();

    let nodes = lifespans
        .iter()
        .map(|(&id, &lifespan)| {
            let state = if filtering { node_state(lifespan, cursor_year) } else { NodeState::Normal };
            (id.to_owned(), state)
        })
        .collect();

    let parent_child_links = layout
        .parent_child_links
        .iter()
        .map(|edge| {
            let child_start = lifespans.get(edge.child_id.as_str()).and_then(|l| l.start);
            if filtering && child_start.is_some_and(|start| cursor_year < start) {
                EdgeState::Dimmed
            } else {
                EdgeState::Normal
            }
        })
        .collect();

    VisualState {
        cursor_year,
        filtering,
        nodes,
        spouse_links: vec![EdgeState::Normal; layout.spouse_links.len()],
        parent_child_links,
    }
}

/// One lifespan bar on the timeline track, in percent of the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBar {
    pub person_id: PersonId,
    pub left_pct: f64,
    pub width_pct: f64,
}

/// Lifespan bars for every person with a known lifespan, in dataset order.
///
/// Bars starting before the range are pinned to the left edge and every bar
/// keeps a minimum visible width.
#[must_use]
pub fn period_bars(persons: &[Person], range: &TimelineRange) -> Vec<PeriodBar> {
    #[allow(clippy::cast_precision_loss)]
    let span = range.span() as f64;
    persons
        .iter()
        .filter_map(|p| {
            let Lifespan { start: Some(start), end: Some(end) } = estimate_lifespan(p) else {
                return None;
            };
            let left = (f64::from(start) - f64::from(range.min_year)) / span * 100.0;
            let width = (f64::from(end) - f64::from(start)) / span * 100.0;
            Some(PeriodBar {
                person_id: p.id.clone(),
                left_pct: left.max(0.0),
                width_pct: width.max(MIN_PERIOD_BAR_WIDTH_PCT),
            })
        })
        .collect()
}
