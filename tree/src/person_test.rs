use super::*;

#[test]
fn from_json_decodes_camel_case_fields() {
    let raw = r#"{
        "persons": [
            {
                "id": "p1",
                "name": "José Burnes",
                "generation": 0,
                "spouseId": "p2",
                "children": ["p3"],
                "birthDate": "1850-03-12",
                "deathDate": "circa 1910",
                "marriageDate": "1875",
                "birthPlace": "Monterrey"
            }
        ]
    }"#;
    let dataset = Dataset::from_json(raw).unwrap();
    assert_eq!(dataset.len(), 1);
    let p = dataset.person("p1").unwrap();
    assert_eq!(p.name, "José Burnes");
    assert_eq!(p.generation, Some(0));
    assert_eq!(p.spouse_id.as_deref(), Some("p2"));
    assert_eq!(p.children, vec!["p3".to_owned()]);
    assert_eq!(p.birth_date.as_deref(), Some("1850-03-12"));
    assert_eq!(p.death_date.as_deref(), Some("circa 1910"));
    assert_eq!(p.marriage_date.as_deref(), Some("1875"));
    assert_eq!(p.birth_place.as_deref(), Some("Monterrey"));
    assert!(p.has_places());
}

#[test]
fn from_json_skips_entries_without_id() {
    let raw = r#"{ "persons": [ { "name": "nobody", "generation": 0 }, { "id": "a", "generation": 1 }, 42 ] }"#;
    let dataset = Dataset::from_json(raw).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.persons()[0].id, "a");
}

#[test]
fn from_json_accepts_numeric_ids_and_dates() {
    let raw = r#"{ "persons": [ { "id": 7, "name": "N", "generation": 2, "birthDate": 1822 } ] }"#;
    let dataset = Dataset::from_json(raw).unwrap();
    let p = dataset.person("7").unwrap();
    assert_eq!(p.birth_date.as_deref(), Some("1822"));
}

#[test]
fn invalid_generation_decodes_to_none() {
    for generation in [r#""2""#, "-1", "1.5", "null", "[]"] {
        let raw = format!(r#"{{ "persons": [ {{ "id": "x", "generation": {generation} }} ] }}"#);
        let dataset = Dataset::from_json(&raw).unwrap();
        assert_eq!(dataset.persons()[0].generation, None, "generation {generation}");
    }
}

#[test]
fn missing_generation_decodes_to_none() {
    let dataset = Dataset::from_json(r#"{ "persons": [ { "id": "x" } ] }"#).unwrap();
    assert_eq!(dataset.persons()[0].generation, None);
    assert_eq!(dataset.persons()[0].name, "");
}

#[test]
fn blank_references_are_absent() {
    let raw = r#"{ "persons": [ { "id": "x", "generation": 0, "father": "", "mother": null, "spouseId": "  " } ] }"#;
    let dataset = Dataset::from_json(raw).unwrap();
    let p = &dataset.persons()[0];
    assert_eq!(p.father, None);
    assert_eq!(p.mother, None);
    assert_eq!(p.spouse_id, None);
}

#[test]
fn from_json_rejects_missing_persons_array() {
    assert!(matches!(Dataset::from_json(r#"{ "people": [] }"#), Err(DatasetError::MissingPersons)));
    assert!(matches!(Dataset::from_json("not json"), Err(DatasetError::Json(_))));
}

#[test]
fn empty_persons_array_is_an_empty_dataset() {
    let dataset = Dataset::from_json(r#"{ "persons": [] }"#).unwrap();
    assert!(dataset.is_empty());
}

#[test]
fn duplicate_ids_resolve_to_the_last_entry() {
    let dataset = Dataset::new(vec![Person::new("a", "first", 0), Person::new("a", "second", 0)]);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.person("a").unwrap().name, "second");
}

#[test]
fn relatives_resolve_in_panel_order_and_skip_dangling() {
    let mut child = Person::new("c", "Child", 1);
    child.father = Some("f".into());
    child.mother = Some("missing".into());
    child.spouse_id = Some("s".into());
    child.children = vec!["g".into(), "ghost".into()];
    let dataset = Dataset::new(vec![
        Person::new("f", "Father", 0),
        Person::new("s", "Spouse", 1),
        Person::new("g", "Grandchild", 2),
        child.clone(),
    ]);

    let relatives = dataset.relatives(&child);
    let summary: Vec<(Relation, &str)> = relatives.iter().map(|r| (r.relation, r.name.as_str())).collect();
    assert_eq!(
        summary,
        vec![(Relation::Father, "Father"), (Relation::Spouse, "Spouse"), (Relation::Child, "Grandchild")]
    );
    assert_eq!(Relation::Spouse.label(), "Cónyuge");
}

#[test]
fn serialize_uses_camel_case_and_skips_absent_fields() {
    let mut p = Person::new("a", "A", 0);
    p.spouse_id = Some("b".into());
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["spouseId"], "b");
    assert!(json.get("birthDate").is_none());
    assert!(json.get("children").is_none());
}

#[test]
fn integral_float_generation_is_accepted() {
    for (generation, expected) in [("1.0", Some(1)), ("0.0", Some(0)), ("3e0", Some(3)), ("1.5", None), ("-2.0", None), ("1e20", None)] {
        let raw = format!(r#"{{ "persons": [ {{ "id": "x", "generation": {generation} }} ] }}"#);
        let dataset = Dataset::from_json(&raw).unwrap();
        assert_eq!(dataset.persons()[0].generation, expected, "generation {generation}");
    }
}

#[test]
fn generation_beyond_u32_is_none() {
    let dataset = Dataset::from_json(r#"{ "persons": [ { "id": "x", "generation": 4294967296 } ] }"#).unwrap();
    assert_eq!(dataset.persons()[0].generation, None);
}

#[test]
fn panel_fields_and_migration_decode() {
    let raw = r#"{ "persons": [ {
        "id": "x", "generation": 0,
        "deathPlace": "Saltillo", "marriagePlace": "",
        "migration": ["Bilbao", "", "Monterrey"],
        "notes": "Comerciante.", "references": "Acta 12"
    } ] }"#;
    let dataset = Dataset::from_json(raw).unwrap();
    let p = &dataset.persons()[0];
    assert_eq!(p.death_place.as_deref(), Some("Saltillo"));
    assert_eq!(p.marriage_place, None);
    assert_eq!(p.migration, vec!["Bilbao".to_owned(), "Monterrey".to_owned()]);
    assert_eq!(p.notes.as_deref(), Some("Comerciante."));
    assert_eq!(p.references.as_deref(), Some("Acta 12"));
    assert!(p.has_places());
    assert!(!Person::new("y", "Y", 0).has_places());
}

#[test]
fn location_names_are_read_from_the_document() {
    let raw = r#"{
        "persons": [ { "id": "x", "generation": 0 } ],
        "locations": { "Monterrey": { "lat": 25.67, "lng": -100.31 } }
    }"#;
    let dataset = Dataset::from_json(raw).unwrap();
    assert!(dataset.has_location("Monterrey"));
    assert!(!dataset.has_location("Saltillo"));

    let bare = Dataset::from_json(r#"{ "persons": [] }"#).unwrap();
    assert!(!bare.has_location("Monterrey"));
}
