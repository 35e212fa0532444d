use std::collections::HashMap;
use std::fmt;

use nova_core::{ClassName, Name};
use serde::Serialize;

/// An integer constant used as an annotation value, together with the
/// symbolic name it was written with when that could be recovered.
///
/// Code generators render named ids as field references (`R.styleable.Foo_bar`)
/// and anonymous ids as plain literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceId {
    value: i32,
    #[serde(flatten)]
    symbol: Option<ResourceSymbol>,
}

/// Where a constant lives: `container` is the group class
/// (`com.example.R.styleable`), `field` its member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceSymbol {
    container: ClassName,
    field: Name,
}

impl ResourceId {
    #[must_use]
    pub fn anonymous(value: i32) -> Self {
        Self {
            value,
            symbol: None,
        }
    }

    pub fn named(value: i32, container: ClassName, field: impl Into<Name>) -> Self {
        Self {
            value,
            symbol: Some(ResourceSymbol {
                container,
                field: field.into(),
            }),
        }
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.symbol.is_none()
    }

    #[must_use]
    pub fn container_name(&self) -> Option<&ClassName> {
        self.symbol.as_ref().map(|symbol| &symbol.container)
    }

    #[must_use]
    pub fn group_name(&self) -> Option<&Name> {
        self.container_name().map(ClassName::simple_name)
    }

    #[must_use]
    pub fn field_name(&self) -> Option<&Name> {
        self.symbol.as_ref().map(|symbol| &symbol.field)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{}.{}", symbol.container, symbol.field),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Resource ids recovered from one annotation instance, keyed by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceIdTable {
    ids: HashMap<i32, ResourceId>,
}

impl ResourceIdTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id`, replacing (and returning) any entry with the same value.
    pub fn insert(&mut self, id: ResourceId) -> Option<ResourceId> {
        self.ids.insert(id.value, id)
    }

    #[must_use]
    pub fn get(&self, value: i32) -> Option<&ResourceId> {
        self.ids.get(&value)
    }

    /// The recovered id for `value`, or an anonymous one.
    #[must_use]
    pub fn resolve(&self, value: i32) -> ResourceId {
        self.get(value)
            .cloned()
            .unwrap_or_else(|| ResourceId::anonymous(value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ResourceId> for ResourceIdTable {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut table, id| {
            table.insert(id);
            table
        })
    }
}
