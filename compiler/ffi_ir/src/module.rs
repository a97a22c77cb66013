//! Per-file translation results.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::CType;

/// A named, typed item: a function, a global variable, a struct field or a
/// function parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: CType,
}

impl Entity {
    pub fn new(name: impl Into<String>, ty: CType) -> Self {
        Entity {
            name: name.into(),
            ty,
        }
    }
}

/// A struct with its fields in declaration order.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Structure {
    pub fields: Vec<Entity>,
}

/// One enumerator. Values are sign-extended to 64 bits.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Enumerator {
    pub name: String,
    pub value: i64,
}

/// An enum with its underlying integer type.
///
/// Enumerators keep declaration order, and duplicate values are kept.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Enumeration {
    pub underlying_type: CType,
    pub values: Vec<Enumerator>,
}

/// A struct or enum definition, keyed by tag name in [`ModuleContents`].
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum TagType {
    Structure(Structure),
    Enumeration(Enumeration),
}

/// Everything translated from one source file.
///
/// Created per file, filled by the declaration visitor, read once by the
/// code generator.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ModuleContents {
    pub entities: BTreeMap<String, CType>,
    pub tags: BTreeMap<String, TagType>,
    pub imports: Vec<String>,
}

impl ModuleContents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function or variable. The first declaration of a name wins;
    /// returns `false` if the name was already present.
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        match self.entities.entry(entity.name) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entity.ty);
                true
            }
        }
    }

    /// Add a struct or enum definition. As with entities the first
    /// definition wins; returns `false` if the tag was already present.
    pub fn add_tag(&mut self, name: impl Into<String>, tag: TagType) -> bool {
        match self.tags.entry(name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(tag);
                true
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.tags.is_empty()
    }
}
