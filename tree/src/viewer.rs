//! Viewer context: the dataset, its layout, and the timeline cursor.
//!
//! The host owns one [`ViewerCore`] per loaded dataset and passes it to every
//! call. Layout and map events are built once on construction; moving the
//! cursor only recomputes the tree and map visual state.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use serde::Serialize;

use crate::camera::{ViewTransform, Viewport};
use crate::consts::SEARCH_LIMIT;
use crate::date::{format_date, lifespan_text};
use crate::label::{avatar_color, initials};
use crate::layout::{LayoutResult, compute_layout};
use crate::lifespan::{Lifeline, Lifespan, estimate_lifespan, lifeline};
use crate::map::{
    MapEvent, MapLayer, MapLayers, MapState, MigrationLine, derive_map_state, focus_place, map_events,
    migration_lines,
};
use crate::person::{Dataset, DatasetError, PersonId, Relative};
use crate::search::{SearchHit, search_persons};
use crate::timeline::{NodeState, PeriodBar, TimelineRange, VisualState, derive_visual_state, period_bars};

/// A labelled line of the detail panel: a formatted date or a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

/// Everything the detail panel shows for one person.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub id: PersonId,
    pub name: String,
    pub initials: String,
    pub avatar_color: String,
    pub lifespan_text: String,
    pub dates: Vec<DetailLine>,
    pub places: Vec<DetailLine>,
    /// Whether the panel offers a jump to the map.
    pub has_places: bool,
    pub lifespan: Lifespan,
    pub lifeline: Option<Lifeline>,
    pub relatives: Vec<Relative>,
    pub notes: Option<String>,
    pub references: Option<String>,
    /// State at the current cursor; `None` when the person is not in the tree.
    pub state: Option<NodeState>,
}

/// Host-owned viewer state.
#[derive(Debug, Clone)]
pub struct ViewerCore {
    dataset: Dataset,
    layout: LayoutResult,
    range: TimelineRange,
    cursor_year: i32,
    visual: VisualState,
    map_events: Vec<MapEvent>,
    migration_lines: Vec<MigrationLine>,
    map_layers: MapLayers,
    map_state: MapState,
}

impl ViewerCore {
    /// Lay out the dataset. The cursor starts at the end of the range, where
    /// nothing is filtered.
    #[must_use]
    pub fn new(dataset: Dataset, range: TimelineRange) -> Self {
        let layout = compute_layout(dataset.persons());
        let cursor_year = range.max_year;
        let visual = derive_visual_state(&layout, cursor_year, &range);
        let map_events = map_events(&dataset);
        let migration_lines = migration_lines(&dataset);
        let map_layers = MapLayers::default();
        let map_state = derive_map_state(&map_events, &migration_lines, cursor_year, &map_layers);
        tracing::info!(
            persons = dataset.len(),
            nodes = layout.nodes.len(),
            map_events = map_events.len(),
            migration_lines = migration_lines.len(),
            "viewer ready"
        );
        Self {
            dataset,
            layout,
            range,
            cursor_year,
            visual,
            map_events,
            migration_lines,
            map_layers,
            map_state,
        }
    }

    /// Decode a dataset document and lay it out.
    pub fn from_json(raw: &str, range: TimelineRange) -> Result<Self, DatasetError> {
        Ok(Self::new(Dataset::from_json(raw)?, range))
    }

    // --- Timeline ---

    /// Move the cursor, clamped into the range, and refresh visual state.
    pub fn set_cursor_year(&mut self, year: i32) -> &VisualState {
        let year = self.range.clamp(year);
        if year != self.cursor_year {
            self.cursor_year = year;
            self.visual = derive_visual_state(&self.layout, year, &self.range);
            self.refresh_map();
        }
        &self.visual
    }

    // --- Map ---

    /// Switch a legend layer on or off and refresh the map state.
    pub fn set_map_layer(&mut self, layer: MapLayer, visible: bool) -> &MapState {
        self.map_layers.set(layer, visible);
        self.refresh_map();
        &self.map_state
    }

    fn refresh_map(&mut self) {
        self.map_state = derive_map_state(&self.map_events, &self.migration_lines, self.cursor_year, &self.map_layers);
    }

    #[must_use]
    pub fn map_events(&self) -> &[MapEvent] {
        &self.map_events
    }

    #[must_use]
    pub fn migration_lines(&self) -> &[MigrationLine] {
        &self.migration_lines
    }

    #[must_use]
    pub fn map_layers(&self) -> MapLayers {
        self.map_layers
    }

    #[must_use]
    pub fn map_state(&self) -> &MapState {
        &self.map_state
    }

    /// Place the map should centre on for a person, if it is located.
    #[must_use]
    pub fn map_focus(&self, id: &str) -> Option<&str> {
        focus_place(&self.dataset, self.dataset.person(id)?)
    }

    // --- Queries ---

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    #[must_use]
    pub fn range(&self) -> TimelineRange {
        self.range
    }

    #[must_use]
    pub fn cursor_year(&self) -> i32 {
        self.cursor_year
    }

    #[must_use]
    pub fn visual_state(&self) -> &VisualState {
        &self.visual
    }

    /// View transform that centres a person's node, if it was laid out.
    #[must_use]
    pub fn focus(&self, id: &str, viewport: Viewport) -> Option<ViewTransform> {
        self.layout.position(id).map(|pos| ViewTransform::focus(pos, viewport))
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        search_persons(self.dataset.persons(), query, SEARCH_LIMIT)
    }

    #[must_use]
    pub fn period_bars(&self) -> Vec<PeriodBar> {
        period_bars(self.dataset.persons(), &self.range)
    }

    /// Detail panel contents for a person.
    #[must_use]
    pub fn details(&self, id: &str) -> Option<PersonDetails> {
        let person = self.dataset.person(id)?;
        let dates = detail_lines([
            ("Nacimiento", person.birth_date.as_deref().map(format_date)),
            ("Defunción", person.death_date.as_deref().map(format_date)),
            ("Matrimonio", person.marriage_date.as_deref().map(format_date)),
        ]);
        let places = detail_lines([
            ("Nacimiento", person.birth_place.clone()),
            ("Defunción", person.death_place.clone()),
            ("Matrimonio", person.marriage_place.clone()),
        ]);

        Some(PersonDetails {
            id: person.id.clone(),
            name: person.name.clone(),
            initials: initials(&person.name),
            avatar_color: avatar_color(person.generation),
            lifespan_text: lifespan_text(person),
            dates,
            places,
            has_places: person.has_places(),
            lifespan: estimate_lifespan(person),
            lifeline: lifeline(person),
            relatives: self.dataset.relatives(person),
            notes: person.notes.clone(),
            references: person.references.clone(),
            state: self.visual.nodes.get(id).copied(),
        })
    }
}

fn detail_lines(lines: [(&'static str, Option<String>); 3]) -> Vec<DetailLine> {
    lines
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| DetailLine { label, value }))
        .collect()
}
