//! Map events and their visibility at a timeline cursor year.
//!
//! The map host owns geography: coordinates, projection, marker offsets and
//! drawing. This module decides *which* life events and migration lines
//! exist for the dataset and how each one should look at the cursor year.
//! Events are only built for places the dataset has coordinates for.
//!
//! Unlike the tree, the map has no "show everything" position: an event is
//! hidden whenever its year lies after the cursor.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use std::str::FromStr;

use serde::Serialize;

use crate::consts::{
    MARKER_FADED_OPACITY, MARKER_FADED_SCALE, MARKER_HIDDEN_SCALE, MIGRATION_FULL_OPACITY, MIGRATION_PARTIAL_OPACITY,
    MIGRATION_UNDATED_OPACITY,
};
use crate::date::extract_year;
use crate::person::{Dataset, Person, PersonId};

/// Kind of life event pinned on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapEventKind {
    Birth,
    Death,
    Marriage,
}

impl MapEventKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Birth => "Nacimiento",
            Self::Death => "Defunción",
            Self::Marriage => "Matrimonio",
        }
    }

    fn layer(self) -> MapLayer {
        match self {
            Self::Birth => MapLayer::Birth,
            Self::Death => MapLayer::Death,
            Self::Marriage => MapLayer::Marriage,
        }
    }
}

/// One located life event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapEvent {
    pub person_id: PersonId,
    pub person_name: String,
    pub kind: MapEventKind,
    pub label: &'static str,
    pub year: Option<i32>,
    pub place: String,
}

/// Path of places a person moved through, with the years it spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationLine {
    pub person_id: PersonId,
    pub places: Vec<String>,
    pub earliest_year: Option<i32>,
    pub latest_year: Option<i32>,
}

/// Legend toggles of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapLayer {
    Birth,
    Death,
    Marriage,
    Migration,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown map layer `{0}` (expected birth, death, marriage or migration)")]
pub struct UnknownMapLayer(pub String);

impl FromStr for MapLayer {
    type Err = UnknownMapLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "birth" => Ok(Self::Birth),
            "death" => Ok(Self::Death),
            "marriage" => Ok(Self::Marriage),
            "migration" => Ok(Self::Migration),
            other => Err(UnknownMapLayer(other.to_owned())),
        }
    }
}

/// Which legend layers are switched on. All are on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapLayers {
    pub birth: bool,
    pub death: bool,
    pub marriage: bool,
    pub migration: bool,
}

impl Default for MapLayers {
    fn default() -> Self {
        Self { birth: true, death: true, marriage: true, migration: true }
    }
}

impl MapLayers {
    #[must_use]
    pub fn is_visible(&self, layer: MapLayer) -> bool {
        match layer {
            MapLayer::Birth => self.birth,
            MapLayer::Death => self.death,
            MapLayer::Marriage => self.marriage,
            MapLayer::Migration => self.migration,
        }
    }

    pub fn set(&mut self, layer: MapLayer, visible: bool) {
        let slot = match layer {
            MapLayer::Birth => &mut self.birth,
            MapLayer::Death => &mut self.death,
            MapLayer::Marriage => &mut self.marriage,
            MapLayer::Migration => &mut self.migration,
        };
        *slot = visible;
    }
}

/// Visual state of an event marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerState {
    /// Dated at or before the cursor.
    Visible,
    /// Year unknown.
    Faded,
    /// Happens after the cursor.
    Hidden,
    /// Its legend layer is switched off.
    Off,
}

impl MarkerState {
    #[must_use]
    pub fn opacity(self) -> f64 {
        match self {
            Self::Visible => 1.0,
            Self::Faded => MARKER_FADED_OPACITY,
            Self::Hidden | Self::Off => 0.0,
        }
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::Visible => 1.0,
            Self::Faded => MARKER_FADED_SCALE,
            Self::Hidden => MARKER_HIDDEN_SCALE,
            Self::Off => 0.0,
        }
    }

    /// Whether the marker still takes clicks.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Visible | Self::Faded)
    }
}

/// Visual state of a migration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationState {
    /// The cursor has reached the line's latest year.
    Complete,
    /// The cursor is inside the line's year span.
    Partial,
    /// The cursor is before the line's earliest year.
    NotStarted,
    /// None of the line's events is dated.
    Undated,
    /// The migration layer is switched off.
    Off,
}

impl MigrationState {
    #[must_use]
    pub fn opacity(self) -> f64 {
        match self {
            Self::Complete => MIGRATION_FULL_OPACITY,
            Self::Partial => MIGRATION_PARTIAL_OPACITY,
            Self::Undated => MIGRATION_UNDATED_OPACITY,
            Self::NotStarted | Self::Off => 0.0,
        }
    }
}

/// Output of [`derive_map_state`], index-aligned with its inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapState {
    pub cursor_year: i32,
    pub markers: Vec<MarkerState>,
    pub migrations: Vec<MigrationState>,
}

/// Located birth, death and marriage events, per person in dataset order.
#[must_use]
pub fn map_events(dataset: &Dataset) -> Vec<MapEvent> {
    let mut events = Vec::new();
    for person in dataset.persons() {
        let candidates = [
            (MapEventKind::Birth, &person.birth_place, &person.birth_date),
            (MapEventKind::Death, &person.death_place, &person.death_date),
            (MapEventKind::Marriage, &person.marriage_place, &person.marriage_date),
        ];
        for (kind, place, date) in candidates {
            let Some(place) = place.as_deref().filter(|p| dataset.has_location(p)) else {
                continue;
            };
            events.push(MapEvent {
                person_id: person.id.clone(),
                person_name: person.name.clone(),
                kind,
                label: kind.label(),
                year: extract_year(date.as_deref()),
                place: place.to_owned(),
            });
        }
    }
    events
}

/// Migration lines for every person with at least two located places.
///
/// An explicit `migration` list of two or more places wins, spanning the
/// person's known event years. Otherwise the line runs through the distinct
/// located birth, marriage and death places.
#[must_use]
pub fn migration_lines(dataset: &Dataset) -> Vec<MigrationLine> {
    dataset
        .persons()
        .iter()
        .filter_map(|person| {
            let (places, years) = if person.migration.len() >= 2 {
                let places: Vec<String> =
                    person.migration.iter().filter(|p| dataset.has_location(p)).cloned().collect();
                let years: Vec<i32> = [&person.birth_date, &person.marriage_date, &person.death_date]
                    .into_iter()
                    .filter_map(|d| extract_year(d.as_deref()))
                    .collect();
                (places, years)
            } else {
                event_path(dataset, person)?
            };
            if places.len() < 2 {
                return None;
            }
            Some(MigrationLine {
                person_id: person.id.clone(),
                places,
                earliest_year: years.iter().min().copied(),
                latest_year: years.iter().max().copied(),
            })
        })
        .collect()
}

/// Birth, marriage and death places that differ from the ones before them.
fn event_path(dataset: &Dataset, person: &Person) -> Option<(Vec<String>, Vec<i32>)> {
    let birth = person.birth_place.as_deref();
    let marriage = person.marriage_place.as_deref();
    let death = person.death_place.as_deref();

    let stops = [
        (birth, &person.birth_date, true),
        (marriage, &person.marriage_date, marriage != birth),
        (death, &person.death_date, death != birth && death != marriage),
    ];
    let located: Vec<(&str, Option<i32>)> = stops
        .into_iter()
        .filter_map(|(place, date, distinct)| {
            let place = place.filter(|p| distinct && dataset.has_location(p))?;
            Some((place, extract_year(date.as_deref())))
        })
        .collect();
    if located.len() < 2 {
        return None;
    }
    Some((
        located.iter().map(|(place, _)| (*place).to_owned()).collect(),
        located.iter().filter_map(|(_, year)| *year).collect(),
    ))
}

/// Marker state for an event year at the cursor.
///
/// The comparison is strict: an event in the cursor year is visible.
#[must_use]
pub fn marker_state(event_year: Option<i32>, cursor_year: i32, layer_visible: bool) -> MarkerState {
    match event_year {
        _ if !layer_visible => MarkerState::Off,
        None => MarkerState::Faded,
        Some(year) if year > cursor_year => MarkerState::Hidden,
        Some(_) => MarkerState::Visible,
    }
}

#[must_use]
pub fn migration_state(line: &MigrationLine, cursor_year: i32, layer_visible: bool) -> MigrationState {
    if !layer_visible {
        return MigrationState::Off;
    }
    match (line.earliest_year, line.latest_year) {
        (None, _) | (_, None) => MigrationState::Undated,
        (_, Some(latest)) if cursor_year >= latest => MigrationState::Complete,
        (Some(earliest), _) if cursor_year >= earliest => MigrationState::Partial,
        _ => MigrationState::NotStarted,
    }
}

/// Derive marker and migration-line state for a cursor year.
#[must_use]
pub fn derive_map_state(
    events: &[MapEvent],
    lines: &[MigrationLine],
    cursor_year: i32,
    layers: &MapLayers,
) -> MapState {
    MapState {
        cursor_year,
        markers: events
            .iter()
            .map(|e| marker_state(e.year, cursor_year, layers.is_visible(e.kind.layer())))
            .collect(),
        migrations: lines
            .iter()
            .map(|l| migration_state(l, cursor_year, layers.is_visible(MapLayer::Migration)))
            .collect(),
    }
}

/// Place the map should fly to for a person: the first recorded of birth,
/// death and marriage place, provided it has coordinates.
#[must_use]
pub fn focus_place<'a>(dataset: &Dataset, person: &'a Person) -> Option<&'a str> {
    let place = person
        .birth_place
        .as_deref()
        .or(person.death_place.as_deref())
        .or(person.marriage_place.as_deref())?;
    dataset.has_location(place).then_some(place)
}
