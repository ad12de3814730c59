//! Person records and the dataset they are loaded from.
//!
//! The dataset is hand-curated JSON and is read once at startup. Decoding is
//! forgiving: a malformed entry costs only that entry, and a malformed field
//! costs only that field. Layout and filtering treat every
//! missing value as "unknown" rather than failing.

#[cfg(test)]
#[path = "person_test.rs"]
mod person_test;

use std::collections::{BTreeSet, HashMap};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Opaque person identifier as it appears in the dataset.
pub type PersonId = String;

/// Error returned by [`Dataset::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The document is not valid JSON.
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document parsed but has no top-level `persons` array.
    #[error("dataset has no `persons` array")]
    MissingPersons,
}

/// One person record. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(deserialize_with = "lenient_id")]
    pub id: PersonId,
    #[serde(default)]
    pub name: String,
    /// Generation band. `None` when missing or not a non-negative integer.
    #[serde(default, deserialize_with = "lenient_generation", skip_serializing_if = "Option::is_none")]
    pub generation: Option<u32>,
    #[serde(default, deserialize_with = "lenient_ref", skip_serializing_if = "Option::is_none")]
    pub father: Option<PersonId>,
    #[serde(default, deserialize_with = "lenient_ref", skip_serializing_if = "Option::is_none")]
    pub mother: Option<PersonId>,
    #[serde(default, deserialize_with = "lenient_ref", skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<PersonId>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PersonId>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub death_place: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub marriage_place: Option<String>,
    /// Ordered places the person lived in, when known beyond their events.
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub migration: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

impl Person {
    /// Shorthand for a person with only an id, a name and a generation band.
    #[must_use]
    pub fn new(id: &str, name: &str, generation: u32) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            generation: Some(generation),
            ..Self::default()
        }
    }

    /// Whether any birth, death or marriage place is recorded.
    #[must_use]
    pub fn has_places(&self) -> bool {
        self.birth_place.is_some() || self.death_place.is_some() || self.marriage_place.is_some()
    }
}

/// How a relative is related to the person being inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Father,
    Mother,
    Spouse,
    Child,
}

impl Relation {
    /// Display label used by the detail panel.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Father => "Padre",
            Self::Mother => "Madre",
            Self::Spouse => "Cónyuge",
            Self::Child => "Hijo/a",
        }
    }
}

/// A resolved relative of some person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relative {
    pub relation: Relation,
    pub id: PersonId,
    pub name: String,
}

/// The full person collection plus an id lookup built at load time.
///
/// `locations` holds the names of places the document has coordinates for.
/// The coordinates themselves belong to the map host and are not kept.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    persons: Vec<Person>,
    index: HashMap<PersonId, usize>,
    locations: BTreeSet<String>,
}

impl Dataset {
    /// Wrap an already-decoded person list. Later duplicates of an id shadow
    /// earlier ones in the lookup; all of them stay in `persons()`.
    #[must_use]
    pub fn new(persons: Vec<Person>) -> Self {
        let index = persons
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self { persons, index, locations: BTreeSet::new() }
    }

    /// Register the place names that have map coordinates.
    #[must_use]
    pub fn with_locations<I, S>(mut self, places: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations.extend(places.into_iter().map(Into::into));
        self
    }

    /// Decode a `{ "persons": [...], "locations": {...} }` document.
    ///
    /// Entries that are not objects or carry no usable `id` are skipped with a
    /// warning. Only a document-level problem is an error. `locations` is
    /// optional; only its keys are read.
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let root: Value = serde_json::from_str(raw)?;
        let Some(entries) = root.get("persons").and_then(Value::as_array) else {
            return Err(DatasetError::MissingPersons);
        };

        let mut persons = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match Person::deserialize(entry) {
                Ok(person) => persons.push(person),
                Err(e) => tracing::warn!(index, error = %e, "skipping malformed person entry"),
            }
        }

        let locations: Vec<String> = root
            .get("locations")
            .and_then(Value::as_object)
            .map(|places| places.keys().cloned().collect())
            .unwrap_or_default();

        tracing::debug!(
            loaded = persons.len(),
            total = entries.len(),
            locations = locations.len(),
            "dataset decoded"
        );
        Ok(Self::new(persons).with_locations(locations))
    }

    /// All persons in dataset order.
    #[must_use]
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    #[must_use]
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.index.get(id).map(|&i| &self.persons[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Whether `place` has map coordinates in the document.
    #[must_use]
    pub fn has_location(&self, place: &str) -> bool {
        self.locations.contains(place)
    }

    /// Resolve a person's father, mother, spouse and children to names.
    ///
    /// References that do not resolve are left out.
    #[must_use]
    pub fn relatives(&self, person: &Person) -> Vec<Relative> {
        let links = [
            (Relation::Father, person.father.as_deref()),
            (Relation::Mother, person.mother.as_deref()),
            (Relation::Spouse, person.spouse_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(relation, id)| id.map(|id| (relation, id)))
        .chain(person.children.iter().map(|id| (Relation::Child, id.as_str())));

        links
            .filter_map(|(relation, id)| {
                self.person(id).map(|p| Relative {
                    relation,
                    id: p.id.clone(),
                    name: p.name.clone(),
                })
            })
            .collect()
    }
}

// ---- lenient field decoders ----

/// Render a JSON scalar as text; non-scalars and blanks yield `None`.
fn scalar_text(value: Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if text.trim().is_empty() { None } else { Some(text) }
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<PersonId, D::Error> {
    scalar_text(Value::deserialize(d)?).ok_or_else(|| D::Error::custom("person id must be a non-empty string or number"))
}

/// JSON has one number type: `1` and `1.0` are the same generation.
fn lenient_generation<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let Value::Number(n) = Value::deserialize(d)? else {
        return Ok(None);
    };
    if let Some(whole) = n.as_u64() {
        return Ok(match u32::try_from(whole) {
            Ok(generation) => Some(generation),
            Err(_) => None,
        });
    }
    Ok(n.as_f64().and_then(integral_u32))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integral_u32(value: f64) -> Option<u32> {
    let in_range = value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX);
    (in_range && value.fract() == 0.0).then(|| value as u32)
}

fn lenient_ref<'de, D: Deserializer<'de>>(d: D) -> Result<Option<PersonId>, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?))
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?))
}

fn lenient_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    })
}
