use nova_core::{ClassName, Name};

use crate::db::{Database, TypeElementLookup};

/// Rebuilds the canonical class name of a resource group.
///
/// The same container may be spelled differently across compilation units
/// (local `R` vs. a library's `R` reached through inheritance), so the name
/// is always re-derived from the resolved element: its package, the
/// container's simple name and the group.
pub struct ContainerResolver<'a> {
    db: &'a dyn Database,
    container_name: Option<&'a str>,
}

impl<'a> ContainerResolver<'a> {
    #[must_use]
    pub fn new(db: &'a dyn Database) -> Self {
        Self {
            db,
            container_name: None,
        }
    }

    /// Use `name` as the container's simple name instead of the resolved
    /// element's own name.
    #[must_use]
    pub fn with_container_name(mut self, name: Option<&'a str>) -> Self {
        self.container_name = name;
        self
    }

    /// `container` is the qualified name of the container class, e.g. `com.example.R`.
    #[must_use]
    pub fn resolve(&self, container: &str, group: &Name) -> Option<ClassName> {
        self.resolve_lookup(self.db.type_element(container), group)
    }

    /// Like [`ContainerResolver::resolve`] for callers that already looked the
    /// container up, e.g. from a `Class<?>` annotation member.
    #[must_use]
    pub fn resolve_lookup(&self, lookup: TypeElementLookup, group: &Name) -> Option<ClassName> {
        let element = match lookup {
            TypeElementLookup::Direct(id) => id,
            TypeElementLookup::Deferred(mirror) => {
                let resolved = self.db.as_element(mirror);
                tracing::trace!(?mirror, ?resolved, "resolved deferred container type");
                resolved?
            }
            TypeElementLookup::NotFound => return None,
        };

        let package = self.db.package_of(element)?;
        let container = match self.container_name {
            Some(name) => Name::new(name),
            None => self.db.element(element)?.name.clone(),
        };
        Some(ClassName::new(package, container).nested(group.clone()))
    }
}
