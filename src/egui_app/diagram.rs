//! Two-ring layout of the institution network.
//!
//! People sit on an outer ring, groups on an inner ring, and every membership
//! is an edge between the two. Coordinates live in a fixed 400x400 canvas; the
//! renderer scales them to whatever rect it is given.

use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{Color32, Pos2, pos2};

use crate::model::Graph;

pub const CANVAS_SIZE: f32 = 400.0;
pub const CENTER: Pos2 = pos2(200.0, 200.0);
pub const OUTER_RADIUS: f32 = 150.0;
pub const INNER_RADIUS: f32 = 40.0;
pub const PERSON_RADIUS: f32 = 4.0;
pub const GROUP_RADIUS: f32 = 5.0;

pub const PERSON_FILL: Color32 = Color32::from_rgb(0, 0, 255);
pub const GROUP_FILL: Color32 = Color32::from_rgb(0, 128, 0);
pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 0, 0);
pub const EDGE_COLOR: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);

/// Stroke of one membership edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub color: Color32,
    pub width: f32,
}

impl EdgeStyle {
    pub const NORMAL: Self = Self {
        color: EDGE_COLOR,
        width: 1.0,
    };
    pub const HIGHLIGHTED: Self = Self {
        color: HIGHLIGHT,
        width: 2.0,
    };
}

/// Membership edge, tagged with the person it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub person: String,
    pub from: Pos2,
    pub to: Pos2,
    pub style: EdgeStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PersonNode {
    pub id: String,
    pub pos: Pos2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupNode {
    pub id: String,
    pub pos: Pos2,
    pub fill: Color32,
}

/// Node under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRef {
    Person(usize),
    Group(usize),
}

/// Point `index` of `count` evenly spaced points on a circle around
/// [`CENTER`], starting straight below it.
pub fn ring_position(count: usize, radius: f32, index: usize) -> Pos2 {
    let angle = FRAC_PI_2 + TAU * index as f32 / count.max(1) as f32;
    pos2(
        CENTER.x + radius * angle.cos(),
        CENTER.y + radius * angle.sin(),
    )
}

/// Short name shown for a person id: the second-to-last `_` token.
pub fn person_display_name(id: &str) -> &str {
    let mut tokens = id.rsplit('_');
    let last = tokens.next().unwrap_or(id);
    tokens.next().unwrap_or(last)
}

/// Drawable network with its current highlight and hover label.
#[derive(Clone, Debug, Default)]
pub struct NetworkDiagram {
    edges: Vec<Edge>,
    people: Vec<PersonNode>,
    groups: Vec<GroupNode>,
    selected_name: Option<String>,
}

impl NetworkDiagram {
    /// Replace the whole drawing with a fresh layout.
    ///
    /// Memberships naming groups outside `group_list` have no anchor on the
    /// inner ring and are left out.
    pub fn render(&mut self, graph: &Graph, group_list: &[String]) {
        self.clear();
        let people_count = graph.len();
        let group_count = group_list.len();
        for (index, membership) in graph.members().iter().enumerate() {
            let from = ring_position(people_count, OUTER_RADIUS, index);
            for group in &membership.groups {
                let Some(group_index) = group_list.iter().position(|id| id == group) else {
                    tracing::warn!(
                        "Skipping membership of {} in unknown group {group}",
                        membership.person
                    );
                    continue;
                };
                self.edges.push(Edge {
                    person: membership.person.clone(),
                    from,
                    to: ring_position(group_count, INNER_RADIUS, group_index),
                    style: EdgeStyle::NORMAL,
                });
            }
            self.people.push(PersonNode {
                id: membership.person.clone(),
                pos: from,
            });
        }
        self.groups = group_list
            .iter()
            .enumerate()
            .map(|(index, id)| GroupNode {
                id: id.clone(),
                pos: ring_position(group_count, INNER_RADIUS, index),
                fill: GROUP_FILL,
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.people.clear();
        self.groups.clear();
        self.selected_name = None;
    }

    /// Reset every style, then mark the given people's edges and the given
    /// groups. Applying the same selection twice gives the same drawing.
    pub fn highlight(&mut self, people: &[String], groups: &[String]) {
        let people: HashSet<&str> = people.iter().map(String::as_str).collect();
        let groups: HashSet<&str> = groups.iter().map(String::as_str).collect();
        for edge in &mut self.edges {
            edge.style = if people.contains(edge.person.as_str()) {
                EdgeStyle::HIGHLIGHTED
            } else {
                EdgeStyle::NORMAL
            };
        }
        for group in &mut self.groups {
            group.fill = if groups.contains(group.id.as_str()) {
                HIGHLIGHT
            } else {
                GROUP_FILL
            };
        }
    }

    /// Node whose disc contains `pos` (canvas coordinates), groups first
    /// since they are drawn on top.
    pub fn node_at(&self, pos: Pos2, slack: f32) -> Option<NodeRef> {
        let hit = |center: Pos2, radius: f32| center.distance(pos) <= radius + slack;
        if let Some(index) = self.groups.iter().rposition(|g| hit(g.pos, GROUP_RADIUS)) {
            return Some(NodeRef::Group(index));
        }
        self.people
            .iter()
            .rposition(|p| hit(p.pos, PERSON_RADIUS))
            .map(NodeRef::Person)
    }

    /// Update the label for a hovered node. The label sticks until the next
    /// hover or re-render.
    pub fn hover(&mut self, node: NodeRef) {
        let label = match node {
            NodeRef::Person(index) => self
                .people
                .get(index)
                .map(|p| person_display_name(&p.id).to_string()),
            NodeRef::Group(index) => self.groups.get(index).map(|g| g.id.clone()),
        };
        if label.is_some() {
            self.selected_name = label;
        }
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected_name.as_deref()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn people(&self) -> &[PersonNode] {
        &self.people
    }

    pub fn groups(&self) -> &[GroupNode] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.groups.is_empty()
    }
}
