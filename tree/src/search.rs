//! Person search by name, insensitive to case and accents.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use std::iter;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::date::extract_year;
use crate::person::{Person, PersonId};

/// One search result, ready for the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: PersonId,
    pub name: String,
    /// `n. 1850 · Gen. 1`, or `fecha desconocida · Gen. 1`.
    pub meta: String,
    /// Byte range of the match within `name`.
    pub highlight: Option<(usize, usize)>,
}

/// Fold text for matching: decompose, drop combining marks, lowercase.
#[must_use]
pub fn normalize(text: &str) -> String {
    fold(text).text
}

/// Persons whose name contains `query`, in dataset order, at most `limit`.
///
/// A blank query matches nothing.
#[must_use]
pub fn search_persons(persons: &[Person], query: &str, limit: usize) -> Vec<SearchHit> {
    let needle = normalize(query.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    persons
        .iter()
        .filter_map(|p| {
            let folded = fold(&p.name);
            let at = folded.text.find(&needle)?;
            Some(SearchHit {
                id: p.id.clone(),
                name: p.name.clone(),
                meta: hit_meta(p),
                highlight: folded.original_range(at, at + needle.len(), p.name.len()),
            })
        })
        .take(limit)
        .collect()
}

fn hit_meta(person: &Person) -> String {
    let generation = u64::from(person.generation.unwrap_or(0)) + 1;
    match extract_year(person.birth_date.as_deref()) {
        Some(year) => format!("n. {year} · Gen. {generation}"),
        None => format!("fecha desconocida · Gen. {generation}"),
    }
}

/// Where one original character landed in the folded text.
struct CharSpan {
    folded_start: usize,
    folded_end: usize,
    original: usize,
}

struct Folded {
    text: String,
    spans: Vec<CharSpan>,
}

impl Folded {
    /// Map a folded byte range back onto the original string.
    ///
    /// Characters that fold away entirely (stray combining marks) attach to
    /// the match they follow.
    fn original_range(&self, start: usize, end: usize, original_len: usize) -> Option<(usize, usize)> {
        let first = self
            .spans
            .iter()
            .find(|s| s.folded_start <= start && start < s.folded_end)?;
        let stop = self
            .spans
            .iter()
            .find(|s| s.folded_start >= end && s.folded_end > s.folded_start)
            .map_or(original_len, |s| s.original);
        Some((first.original, stop))
    }
}

fn fold(text: &str) -> Folded {
    let mut folded = String::with_capacity(text.len());
    let mut spans = Vec::with_capacity(text.len());
    for (original, ch) in text.char_indices() {
        let folded_start = folded.len();
        for base in iter::once(ch).nfd().filter(|c| !is_combining_mark(*c)) {
            folded.extend(base.to_lowercase());
        }
        spans.push(CharSpan { folded_start, folded_end: folded.len(), original });
    }
    Folded { text: folded, spans }
}
