//! Nested attribute collections (RFC 3382).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::AttributeValue;

/// A single `member-attr-name` / value pair inside a [`Collection`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub name: String,
    pub value: AttributeValue,
}

/// An ordered set of members, as carried between a `begin-collection` and
/// matching `end-collection` marker.
///
/// Members are kept in a `Vec` rather than a map: IPP collections are
/// ordered on the wire and a round-trip decode/encode must preserve that
/// order byte-for-byte.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collection {
    members: Vec<Member>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.members.push(Member {
            name: name.into(),
            value,
        });
    }

    pub fn with_member(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.members.iter().find(|m| m.name == name).map(|m| &m.value)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

impl FromIterator<Member> for Collection {
    fn from_iter<T: IntoIterator<Item = Member>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}
