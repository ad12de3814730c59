//! Label text for tree nodes and the detail header.

#[cfg(test)]
#[path = "label_test.rs"]
mod label_test;

use crate::consts::NAME_LINE_MAX_CHARS;
use crate::date::extract_year;
use crate::person::Person;

/// Break a display name into at most two lines.
///
/// Short names stay on one line. Names of up to two words break after the
/// first word; longer ones break at the middle word, rounding up.
#[must_use]
pub fn split_name(name: &str) -> Vec<String> {
    if name.chars().count() <= NAME_LINE_MAX_CHARS {
        return vec![name.to_owned()];
    }
    let words: Vec<&str> = name.split_whitespace().collect();
    let mid = match words.len() {
        0 | 1 => return vec![name.trim().to_owned()],
        2 => 1,
        n => n.div_ceil(2),
    };
    vec![words[..mid].join(" "), words[mid..].join(" ")]
}

/// Years under a node: `1850 – 1910`, `1850 –`, `– 1910`, or empty.
#[must_use]
pub fn date_label(person: &Person) -> String {
    let birth = extract_year(person.birth_date.as_deref());
    let death = extract_year(person.death_date.as_deref());
    match (birth, death) {
        (Some(b), Some(d)) => format!("{b} – {d}"),
        (Some(b), None) => format!("{b} –"),
        (None, Some(d)) => format!("– {d}"),
        (None, None) => String::new(),
    }
}

/// Avatar initials: first two letters of a single-word name, otherwise the
/// first letters of the first and last words.
#[must_use]
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.as_slice() {
        [] => String::new(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

/// Pastel avatar background, hue rotated per generation.
#[must_use]
pub fn avatar_color(generation: Option<u32>) -> String {
    let hue = (u64::from(generation.unwrap_or(0)) * 37 + 200) % 360;
    format!("hsl({hue}, 22%, 88%)")
}
