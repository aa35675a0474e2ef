use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// One person and the groups they belong to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Membership {
    pub person: String,
    pub groups: Vec<String>,
}

/// Person → groups membership, in the order the backend listed people.
///
/// Order matters: a person's position on the outer ring is its index here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    members: Vec<Membership>,
}

impl Graph {
    pub fn new(members: Vec<Membership>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Membership] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.members.iter().map(|m| m.groups.len()).sum()
    }
}

impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GraphVisitor;

        impl<'de> Visitor<'de> for GraphVisitor {
            type Value = Graph;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of person id to group ids")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Graph, A::Error> {
                let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((person, groups)) = map.next_entry::<String, Vec<String>>()? {
                    members.push(Membership { person, groups });
                }
                Ok(Graph { members })
            }
        }

        deserializer.deserialize_map(GraphVisitor)
    }
}

/// Weight series of one group, one value per budget of the last solve.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GroupWeights {
    pub group: String,
    #[serde(default)]
    pub weight: Vec<f64>,
}

/// Payload of the institution endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Institution {
    #[serde(default)]
    pub group: Vec<GroupWeights>,
    #[serde(default)]
    pub graph: Graph,
}

impl Institution {
    /// Distinct group ids in backend order; the inner ring layout order.
    pub fn group_ids(&self) -> Vec<String> {
        self.group.iter().map(|g| g.group.clone()).collect()
    }
}
