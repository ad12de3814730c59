#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn person(id: &str, generation: u32) -> Person {
    Person::new(id, &id.to_uppercase(), generation)
}

fn spouse(id: &str, generation: u32, spouse_id: &str) -> Person {
    Person { spouse_id: Some(spouse_id.to_owned()), ..person(id, generation) }
}

fn child(id: &str, generation: u32, father: Option<&str>, mother: Option<&str>) -> Person {
    Person {
        father: father.map(str::to_owned),
        mother: mother.map(str::to_owned),
        ..person(id, generation)
    }
}

fn pos(layout: &LayoutResult, id: &str) -> (f64, f64) {
    let p = layout.position(id).unwrap();
    (p.x, p.y)
}

/// Couple `a`/`b` on band 0 with one child `c` on band 1.
fn two_generation_family() -> Vec<Person> {
    vec![spouse("a", 0, "b"), spouse("b", 0, "a"), child("c", 1, Some("a"), Some("b"))]
}

// =============================================================
// Banding and vertical placement
// =============================================================

#[test]
fn empty_input_yields_empty_layout() {
    let layout = compute_layout(&[]);
    assert!(layout.is_empty());
    assert!(layout.spouse_links.is_empty());
    assert!(layout.parent_child_links.is_empty());
    assert!(layout.positions.is_empty());
    assert!(layout.bounds().is_none());
}

#[test]
fn bands_stack_by_sorted_index_not_generation_value() {
    let persons = vec![person("late", 7), person("early", 2)];
    let layout = compute_layout(&persons);
    assert_eq!(pos(&layout, "early").1, 60.0);
    assert_eq!(pos(&layout, "late").1, 240.0);
}

#[test]
fn bands_sort_numerically() {
    let persons = vec![person("ten", 10), person("two", 2), person("one", 1)];
    let layout = compute_layout(&persons);
    assert_eq!(pos(&layout, "one").1, 60.0);
    assert_eq!(pos(&layout, "two").1, 240.0);
    assert_eq!(pos(&layout, "ten").1, 420.0);
}

#[test]
fn persons_without_generation_are_excluded() {
    let mut orphan = person("x", 0);
    orphan.generation = None;
    let persons = vec![person("a", 0), orphan, child("y", 1, Some("x"), None)];
    let layout = compute_layout(&persons);

    assert_eq!(layout.nodes.len(), 2);
    assert!(layout.position("x").is_none());
    assert!(layout.node("x").is_none());
    assert!(layout.parent_child_links.is_empty());
}

#[test]
fn node_count_matches_persons_with_generation() {
    let mut persons = two_generation_family();
    persons.push(Person { generation: None, ..person("z", 0) });
    persons.push(person("d", 3));
    let layout = compute_layout(&persons);
    let valid = persons.iter().filter(|p| p.generation.is_some()).count();
    assert_eq!(layout.nodes.len(), valid);
    assert_eq!(layout.positions.len(), valid);
}

#[test]
fn integral_float_generation_is_laid_out() {
    let raw = r#"{ "persons": [
        { "id": "a", "name": "A", "generation": 0 },
        { "id": "b", "name": "B", "generation": 1.0, "father": "a" }
    ] }"#;
    let dataset = crate::person::Dataset::from_json(raw).unwrap();
    let layout = compute_layout(dataset.persons());
    assert_eq!(layout.nodes.len(), 2);
    assert_eq!(pos(&layout, "b"), (0.0, 240.0));
    assert_eq!(layout.parent_child_links.len(), 1);
}

// =============================================================
// Horizontal placement
// =============================================================

#[test]
fn single_person_centres_on_origin() {
    let layout = compute_layout(&[person("a", 0)]);
    assert_eq!(pos(&layout, "a"), (0.0, 60.0));
}

#[test]
fn couple_uses_asymmetric_offsets() {
    let layout = compute_layout(&two_generation_family());
    assert_eq!(pos(&layout, "a"), (-52.5, 60.0));
    assert_eq!(pos(&layout, "b"), (52.5, 60.0));
    assert_eq!(pos(&layout, "c"), (0.0, 240.0));
}

#[test]
fn mixed_band_lays_groups_left_to_right() {
    let persons = vec![spouse("a", 0, "b"), spouse("b", 0, "a"), person("c", 0)];
    let layout = compute_layout(&persons);
    assert_eq!(pos(&layout, "a").0, -122.5);
    assert_eq!(pos(&layout, "b").0, -17.5);
    assert_eq!(pos(&layout, "c").0, 105.0);
}

#[test]
fn singletons_are_spaced_one_slot_apart() {
    let persons = vec![person("a", 0), person("b", 0), person("c", 0)];
    let layout = compute_layout(&persons);
    assert_eq!(pos(&layout, "a").0, -140.0);
    assert_eq!(pos(&layout, "b").0, 0.0);
    assert_eq!(pos(&layout, "c").0, 140.0);
}

#[test]
fn nodes_carry_person_fields() {
    let mut a = person("a", 0);
    a.birth_date = Some("1850".into());
    let layout = compute_layout(&[a]);
    let node = layout.node("a").unwrap();
    assert_eq!(node.person.name, "A");
    assert_eq!(node.person.birth_date.as_deref(), Some("1850"));
    assert_eq!(node.position(), Position { x: 0.0, y: 60.0 });
}

// =============================================================
// Pairing
// =============================================================

#[test]
fn spouse_on_another_band_is_not_paired() {
    let persons = vec![spouse("a", 0, "b"), spouse("b", 1, "a")];
    let layout = compute_layout(&persons);
    assert!(layout.spouse_links.is_empty());
    assert_eq!(pos(&layout, "a").0, 0.0);
    assert_eq!(pos(&layout, "b").0, 0.0);
}

#[test]
fn dangling_spouse_is_a_singleton() {
    let layout = compute_layout(&[spouse("a", 0, "ghost")]);
    assert!(layout.spouse_links.is_empty());
    assert_eq!(pos(&layout, "a").0, 0.0);
}

#[test]
fn one_sided_spouse_reference_still_pairs() {
    let persons = vec![person("b", 0), spouse("a", 0, "b")];
    let layout = compute_layout(&persons);
    // `b` is placed first as a singleton, so `a` finds its spouse taken.
    assert!(layout.spouse_links.is_empty());

    let persons = vec![spouse("a", 0, "b"), person("b", 0)];
    let layout = compute_layout(&persons);
    assert_eq!(layout.spouse_links.len(), 1);
    assert_eq!(layout.spouse_links[0].left_id, "a");
    assert_eq!(layout.spouse_links[0].right_id, "b");
}

#[test]
fn pairing_is_greedy_first_come() {
    // Three mutually referencing records: a→b, b→c, c→a.
    let persons = vec![spouse("a", 0, "b"), spouse("b", 0, "c"), spouse("c", 0, "a")];
    let layout = compute_layout(&persons);
    assert_eq!(layout.spouse_links.len(), 1);
    let link = &layout.spouse_links[0];
    assert_eq!((link.left_id.as_str(), link.right_id.as_str()), ("a", "b"));
    // c ends up alone after the couple.
    assert_eq!(pos(&layout, "c").0, 105.0);
}

#[test]
fn each_person_appears_in_exactly_one_group() {
    let persons = vec![
        spouse("a", 0, "b"),
        spouse("b", 0, "a"),
        spouse("c", 0, "a"),
        spouse("d", 0, "e"),
        spouse("e", 0, "d"),
    ];
    let layout = compute_layout(&persons);
    let mut seen: Vec<&str> = layout
        .spouse_links
        .iter()
        .flat_map(|l| [l.left_id.as_str(), l.right_id.as_str()])
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec!["a", "b", "d", "e"]);
    assert_eq!(layout.nodes.len(), 5);
}

#[test]
fn self_referencing_spouse_is_a_singleton() {
    let layout = compute_layout(&[spouse("a", 0, "a")]);
    assert!(layout.spouse_links.is_empty());
    assert_eq!(layout.nodes.len(), 1);
}

#[test]
fn repeated_id_on_one_band_is_placed_once() {
    let again = Person { name: "Again".into(), ..person("a", 0) };
    let layout = compute_layout(&[person("a", 0), again, person("b", 0)]);
    assert_eq!(layout.nodes.len(), 2);
    assert_eq!(layout.nodes[0].person.name, "A");
    assert_eq!(pos(&layout, "a"), (-70.0, 60.0));
    assert_eq!(pos(&layout, "b"), (70.0, 60.0));
}

#[test]
fn repeated_id_on_other_bands_keeps_last_position() {
    let layout = compute_layout(&[person("a", 0), person("a", 1)]);
    assert_eq!(layout.nodes.len(), 2);
    assert_eq!(pos(&layout, "a"), (0.0, 240.0));
}

#[test]
fn spouse_edge_spans_the_couple() {
    let layout = compute_layout(&two_generation_family());
    let link = &layout.spouse_links[0];
    assert_eq!((link.x1, link.y1, link.x2, link.y2), (-52.5, 60.0, 52.5, 60.0));
}

// =============================================================
// Parent-child edges
// =============================================================

#[test]
fn child_of_couple_anchors_at_parent_midpoint() {
    let layout = compute_layout(&two_generation_family());
    assert_eq!(layout.parent_child_links.len(), 1);
    let edge = &layout.parent_child_links[0];
    assert_eq!(edge.parent_x, 0.0);
    assert_eq!(edge.parent_y, 80.0);
    assert_eq!(edge.child_x, 0.0);
    assert_eq!(edge.child_y, 220.0);
    assert_eq!(edge.child_id, "c");
    assert_eq!(edge.father_id, "a");
    assert_eq!(edge.mother_id.as_deref(), Some("b"));
}

#[test]
fn father_only_anchors_below_father() {
    let persons = vec![spouse("a", 0, "b"), spouse("b", 0, "a"), child("c", 1, Some("a"), Some("ghost"))];
    let layout = compute_layout(&persons);
    let edge = &layout.parent_child_links[0];
    assert_eq!(edge.parent_x, -52.5);
    assert_eq!(edge.mother_id, None);
}

#[test]
fn mother_only_child_gets_no_edge() {
    let persons = vec![person("m", 0), child("c", 1, None, Some("m"))];
    let layout = compute_layout(&persons);
    assert!(layout.parent_child_links.is_empty());
}

#[test]
fn unpositioned_father_gets_no_edge() {
    let layout = compute_layout(&[child("c", 1, Some("ghost"), None)]);
    assert!(layout.parent_child_links.is_empty());
}

#[test]
fn repeated_anchor_tuples_are_emitted_once() {
    let persons = vec![
        spouse("a", 0, "b"),
        spouse("b", 0, "a"),
        child("c", 1, Some("a"), Some("b")),
        child("c", 1, Some("a"), Some("b")),
    ];
    let layout = compute_layout(&persons);
    assert_eq!(layout.parent_child_links.len(), 1);
}

#[test]
fn siblings_each_get_an_edge() {
    let persons = vec![
        spouse("a", 0, "b"),
        spouse("b", 0, "a"),
        child("c", 1, Some("a"), Some("b")),
        child("d", 1, Some("a"), Some("b")),
    ];
    let layout = compute_layout(&persons);
    let ids: Vec<&str> = layout.parent_child_links.iter().map(|e| e.child_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "d"]);
    assert!(layout.parent_child_links.iter().all(|e| e.parent_x == 0.0));
}

#[test]
fn edge_path_is_a_vertical_midpoint_cubic() {
    let layout = compute_layout(&two_generation_family());
    assert_eq!(layout.parent_child_links[0].path(), "M0,80 C0,150 0,150 0,220");
}

// =============================================================
// Determinism and lookups
// =============================================================

#[test]
fn layout_is_deterministic() {
    let persons = vec![
        spouse("a", 0, "b"),
        spouse("b", 0, "a"),
        person("x", 0),
        child("c", 1, Some("a"), Some("b")),
        child("d", 1, Some("a"), None),
        spouse("e", 1, "d"),
        child("f", 2, Some("d"), Some("e")),
    ];
    let first = compute_layout(&persons);
    let second = compute_layout(&persons);
    assert_eq!(first, second);
}

#[test]
fn bounds_cover_all_nodes() {
    let layout = compute_layout(&two_generation_family());
    let bounds = layout.bounds().unwrap();
    assert_eq!(bounds, Bounds { min_x: -52.5, min_y: 60.0, max_x: 52.5, max_y: 240.0 });
}

#[test]
fn serialized_layout_uses_camel_case_keys() {
    let layout = compute_layout(&two_generation_family());
    let json = serde_json::to_value(&layout).unwrap();
    assert!(json["spouseLinks"].is_array());
    assert_eq!(json["parentChildLinks"][0]["childId"], "c");
    assert_eq!(json["nodes"][0]["id"], "a");
    assert_eq!(json["nodes"][0]["spouseId"], "b");
    assert_eq!(json["positions"]["c"]["y"], 240.0);
}
