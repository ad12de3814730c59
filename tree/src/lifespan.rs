//! Lifespan estimation.
//!
//! A lifespan is the interval during which a person counts as alive for
//! timeline filtering. When no death year is known the person is assumed to
//! live [`ASSUMED_LIFESPAN_YEARS`] years; that bound is a known approximation
//! and is not configurable.

#[cfg(test)]
#[path = "lifespan_test.rs"]
mod lifespan_test;

use serde::Serialize;

use crate::consts::ASSUMED_LIFESPAN_YEARS;
use crate::date::event_years;
use crate::person::Person;

/// Estimated `(start, end)` years. Both are `None` when no year is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Lifespan {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

/// Estimate a person's lifespan from their birth, death and marriage years.
///
/// - `start` is the birth year, else the earliest known year.
/// - `end` is the death year, else `start + 70`, else the latest known year.
#[must_use]
pub fn estimate_lifespan(person: &Person) -> Lifespan {
    let [birth, death, marriage] = event_years(person);
    let known = [birth, death, marriage].into_iter().flatten();

    let start = birth.or_else(|| known.clone().min());
    let end = death
        .or_else(|| start.map(|s| s + ASSUMED_LIFESPAN_YEARS))
        .or_else(|| known.max());
    Lifespan { start, end }
}

/// A dated event on a person's lifeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeEvent {
    Birth,
    Marriage,
    Death,
}

/// One marker on the lifeline, positioned as a percentage of the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifelineMark {
    pub event: LifeEvent,
    pub year: i32,
    pub offset_pct: f64,
}

/// Birth → marriage → death markers for the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifeline {
    pub marks: Vec<LifelineMark>,
    /// Offset of the last marker; the filled portion of the track.
    pub filled_pct: f64,
}

/// Build the lifeline for a person, or `None` with fewer than two dated events.
///
/// Marks keep birth, marriage, death order. The line spans from the first
/// mark's year to the last's; a zero-length span is treated as one year.
#[must_use]
pub fn lifeline(person: &Person) -> Option<Lifeline> {
    let [birth, death, marriage] = event_years(person);
    let events: Vec<(LifeEvent, i32)> = [
        (LifeEvent::Birth, birth),
        (LifeEvent::Marriage, marriage),
        (LifeEvent::Death, death),
    ]
    .into_iter()
    .filter_map(|(event, year)| year.map(|y| (event, y)))
    .collect();

    let (&(_, first), &(_, last)) = (events.first()?, events.last()?);
    if events.len() < 2 {
        return None;
    }

    let range = match last - first {
        0 => 1.0,
        span => f64::from(span),
    };
    let pct = |year: i32| f64::from(year - first) / range * 100.0;

    Some(Lifeline {
        marks: events
            .iter()
            .map(|&(event, year)| LifelineMark { event, year, offset_pct: pct(year) })
            .collect(),
        filled_pct: pct(last),
    })
}
