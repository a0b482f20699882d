//! An attribute group: a [`GroupTag`] plus the attributes collected under it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::tag::GroupTag;

/// One delimited run of attributes, e.g. everything between an
/// `operation-attributes-tag` and the next group delimiter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeGroup {
    tag: GroupTag,
    attributes: Vec<Attribute>,
}

impl AttributeGroup {
    pub fn new(tag: GroupTag) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
        }
    }

    pub fn tag(&self) -> GroupTag {
        self.tag
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.push(attribute);
        self
    }
}
