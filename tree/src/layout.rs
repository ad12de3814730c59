//! Layout engine: places persons on generation bands and routes family edges.
//!
//! The layout is a pure function of the person list. Persons are grouped into
//! horizontal bands by `generation` (ascending, band 0 on top), spouses in the
//! same band are paired greedily in dataset order, and each band is centred on
//! `x = 0`. Edges are emitted as anchor coordinates; drawing them is up to the
//! host.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::consts::{COUPLE_LEFT_OFFSET, COUPLE_RIGHT_OFFSET, COUPLE_WIDTH, GEN_SPACING, NODE_RADIUS, NODE_SPACING, TOP_MARGIN};
use crate::person::{Person, PersonId};

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A positioned person. Person fields are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    #[serde(flatten)]
    pub person: Person,
    pub x: f64,
    pub y: f64,
}

impl LayoutNode {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.person.id
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }
}

/// Horizontal segment between two spouses on the same band.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpouseEdge {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub left_id: PersonId,
    pub right_id: PersonId,
}

/// Connector from below a parent couple to above a child.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentChildEdge {
    pub parent_x: f64,
    pub parent_y: f64,
    pub child_x: f64,
    pub child_y: f64,
    pub child_id: PersonId,
    pub father_id: PersonId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<PersonId>,
}

impl ParentChildEdge {
    /// SVG path for the curved connector: a cubic whose control points sit on
    /// the vertical midpoint between the two anchors.
    #[must_use]
    pub fn path(&self) -> String {
        let mid_y = f64::midpoint(self.parent_y, self.child_y);
        format!(
            "M{px},{py} C{px},{mid_y} {cx},{mid_y} {cx},{cy}",
            px = self.parent_x,
            py = self.parent_y,
            cx = self.child_x,
            cy = self.child_y,
        )
    }
}

/// Axis-aligned extent of all node centres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Output of [`compute_layout`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub nodes: Vec<LayoutNode>,
    pub spouse_links: Vec<SpouseEdge>,
    pub parent_child_links: Vec<ParentChildEdge>,
    /// Id → position for every placed node.
    pub positions: BTreeMap<PersonId, Position>,
}

impl LayoutResult {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Extent of the node centres, or `None` for an empty layout.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.nodes.first()?;
        let init = Bounds { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        Some(self.nodes.iter().fold(init, |b, n| Bounds {
            min_x: b.min_x.min(n.x),
            min_y: b.min_y.min(n.y),
            max_x: b.max_x.max(n.x),
            max_y: b.max_y.max(n.y),
        }))
    }
}

/// A layout unit within a band.
#[derive(Debug, Clone, Copy)]
enum Group<'a> {
    Single(&'a Person),
    Couple(&'a Person, &'a Person),
}

impl Group<'_> {
    fn width(self) -> f64 {
        match self {
            Self::Single(_) => NODE_SPACING,
            Self::Couple(..) => NODE_SPACING * COUPLE_WIDTH,
        }
    }
}

/// Compute node positions and edge anchors for the whole person list.
///
/// Persons without a generation are left out of the layout entirely. Dangling
/// `father`/`mother`/`spouseId` references only cost the affected edge.
#[must_use]
pub fn compute_layout(persons: &[Person]) -> LayoutResult {
    let by_id: HashMap<&str, &Person> = persons.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut bands: BTreeMap<u32, Vec<&Person>> = BTreeMap::new();
    for person in persons {
        if let Some(generation) = person.generation {
            bands.entry(generation).or_default().push(person);
        }
    }

    let mut layout = LayoutResult::default();
    for (band_index, (&generation, members)) in bands.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let y = band_index as f64 * GEN_SPACING + TOP_MARGIN;
        let groups = pair_band(members, generation, &by_id);
        place_band(&groups, y, &mut layout);
    }

    route_parent_child(persons, &mut layout);

    tracing::debug!(
        persons = persons.len(),
        nodes = layout.nodes.len(),
        bands = bands.len(),
        spouse_links = layout.spouse_links.len(),
        parent_child_links = layout.parent_child_links.len(),
        "family layout computed"
    );
    layout
}

/// Split a band into groups, pairing spouses greedily in dataset order.
///
/// A spouse is taken only if it exists, sits on the same band, and has not
/// been placed yet; first come, first paired.
fn pair_band<'a>(members: &[&'a Person], generation: u32, by_id: &HashMap<&str, &'a Person>) -> Vec<Group<'a>> {
    let mut placed: HashSet<&str> = HashSet::new();
    let mut groups = Vec::new();

    for &person in members {
        if !placed.insert(person.id.as_str()) {
            continue;
        }
        let spouse = person
            .spouse_id
            .as_deref()
            .and_then(|id| by_id.get(id).copied())
            .filter(|s| s.generation == Some(generation) && !placed.contains(s.id.as_str()));

        match spouse {
            Some(spouse) => {
                placed.insert(spouse.id.as_str());
                groups.push(Group::Couple(person, spouse));
            }
            None => groups.push(Group::Single(person)),
        }
    }
    groups
}

/// Lay groups out left to right on one band, centred on `x = 0`.
fn place_band(groups: &[Group<'_>], y: f64, layout: &mut LayoutResult) {
    let total_width: f64 = groups.iter().map(|g| g.width()).sum();
    let mut cursor = -total_width / 2.0;

    for &group in groups {
        match group {
            Group::Couple(left, right) => {
                let x1 = cursor + NODE_SPACING * COUPLE_LEFT_OFFSET;
                let x2 = cursor + NODE_SPACING * COUPLE_RIGHT_OFFSET;
                push_node(layout, left, x1, y);
                push_node(layout, right, x2, y);
                layout.spouse_links.push(SpouseEdge {
                    x1,
                    y1: y,
                    x2,
                    y2: y,
                    left_id: left.id.clone(),
                    right_id: right.id.clone(),
                });
            }
            Group::Single(person) => {
                push_node(layout, person, cursor + NODE_SPACING * 0.5, y);
            }
        }
        cursor += group.width();
    }
}

fn push_node(layout: &mut LayoutResult, person: &Person, x: f64, y: f64) {
    layout.positions.insert(person.id.clone(), Position { x, y });
    layout.nodes.push(LayoutNode { person: person.clone(), x, y });
}

/// Emit one parent-child edge per child with a positioned father.
///
/// The parent anchor is the midpoint of father and mother when the mother is
/// positioned, else the father alone. Edges whose rounded anchors repeat are
/// dropped.
fn route_parent_child(persons: &[Person], layout: &mut LayoutResult) {
    let mut emitted: HashSet<[i64; 4]> = HashSet::new();

    for person in persons {
        let Some(father_id) = person.father.as_deref() else {
            continue;
        };
        let (Some(father), Some(child)) = (layout.position(father_id), layout.position(&person.id)) else {
            continue;
        };
        let mother = person
            .mother
            .as_deref()
            .and_then(|id| layout.position(id).map(|pos| (id, pos)));

        let parent_x = mother.map_or(father.x, |(_, m)| f64::midpoint(father.x, m.x));
        let parent_y = father.y + NODE_RADIUS;
        let child_y = child.y - NODE_RADIUS;

        let key = [anchor_key(parent_x), anchor_key(parent_y), anchor_key(child.x), anchor_key(child_y)];
        if !emitted.insert(key) {
            continue;
        }

        layout.parent_child_links.push(ParentChildEdge {
            parent_x,
            parent_y,
            child_x: child.x,
            child_y,
            child_id: person.id.clone(),
            father_id: father_id.to_owned(),
            mother_id: mother.map(|(id, _)| id.to_owned()),
        });
    }
}

#[allow(clippy::cast_possible_truncation)]
fn anchor_key(v: f64) -> i64 {
    v.round() as i64
}
