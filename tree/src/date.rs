//! Year extraction and date display helpers.
//!
//! Every piece of temporal logic in the crate routes through [`extract_year`];
//! nothing else parses dates.

#[cfg(test)]
#[path = "date_test.rs"]
mod date_test;

use crate::person::Person;

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Return the year represented by a loosely formatted date.
///
/// The year is the first run of four consecutive ASCII digits; `None` when the
/// value is absent or has no such run.
#[must_use]
pub fn extract_year(date: Option<&str>) -> Option<i32> {
    date?
        .as_bytes()
        .windows(4)
        .find(|w| w.iter().all(u8::is_ascii_digit))
        .map(|w| w.iter().fold(0, |year, b| year * 10 + i32::from(b - b'0')))
}

/// Birth, death and marriage years, in that order.
#[must_use]
pub fn event_years(person: &Person) -> [Option<i32>; 3] {
    [
        extract_year(person.birth_date.as_deref()),
        extract_year(person.death_date.as_deref()),
        extract_year(person.marriage_date.as_deref()),
    ]
}

/// Earliest known event year for a person.
#[must_use]
pub fn earliest_year(person: &Person) -> Option<i32> {
    event_years(person).into_iter().flatten().min()
}

/// Latest known event year for a person.
#[must_use]
pub fn latest_year(person: &Person) -> Option<i32> {
    event_years(person).into_iter().flatten().max()
}

/// Render a `YYYY-MM-DD` date as long-form Spanish (`12 de marzo de 1850`).
///
/// Anything that is not a three-part dashed date with a valid month is
/// returned unchanged.
#[must_use]
pub fn format_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return date.to_owned();
    };
    let (Ok(month), Ok(day)) = (month.trim().parse::<usize>(), day.trim().parse::<u32>()) else {
        return date.to_owned();
    };
    match month.checked_sub(1).and_then(|m| MONTHS_ES.get(m)) {
        Some(name) => format!("{day} de {name} de {year}"),
        None => date.to_owned(),
    }
}

/// Short lifespan text for the detail header: `1850 – 1910`, `n. 1850`,
/// `† 1910`, or empty.
#[must_use]
pub fn lifespan_text(person: &Person) -> String {
    let birth = extract_year(person.birth_date.as_deref());
    let death = extract_year(person.death_date.as_deref());
    match (birth, death) {
        (Some(b), Some(d)) => format!("{b} – {d}"),
        (Some(b), None) => format!("n. {b}"),
        (None, Some(d)) => format!("† {d}"),
        (None, None) => String::new(),
    }
}
