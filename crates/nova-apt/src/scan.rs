use nova_core::Name;
use nova_hir::{AnnotationExpr, AnnotationTree, ElementId};
use thiserror::Error;

use crate::container::ContainerResolver;
use crate::db::Database;
use crate::resource_id::{ResourceId, ResourceIdTable};

/// Why a field selection did not yield a resource id. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum SkipReason {
    #[error("symbol {0:?} is unknown to the host")]
    UnknownSymbol(ElementId),
    #[error("`{0}` is not a field")]
    NotAField(Name),
    #[error("`{0}` is not a compile-time constant")]
    NotConstant(Name),
    #[error("`{name}` is a {kind} constant, not an int")]
    NotInteger { name: Name, kind: &'static str },
    #[error("`{0}` is not declared as container.group.field")]
    TooShallow(Name),
    #[error("container `{0}` could not be resolved")]
    UnresolvedContainer(String),
}

/// Collects every `Container.Group.field` int constant referenced from an
/// annotation tree.
pub struct AnnotationScanner<'a> {
    db: &'a dyn Database,
    containers: ContainerResolver<'a>,
}

impl<'a> AnnotationScanner<'a> {
    #[must_use]
    pub fn new(db: &'a dyn Database, containers: ContainerResolver<'a>) -> Self {
        Self { db, containers }
    }

    #[must_use]
    pub fn scan(&self, tree: &AnnotationTree) -> ResourceIdTable {
        tree.descendants()
            .filter_map(|(_, expr)| match expr {
                AnnotationExpr::Select { sym: Some(sym), .. } => Some(*sym),
                _ => None,
            })
            .filter_map(|sym| match self.resource_id(sym) {
                Ok(id) => Some(id),
                Err(reason) => {
                    tracing::trace!(symbol = ?sym, reason = %reason, "skipping field selection");
                    None
                }
            })
            .collect()
    }

    fn resource_id(&self, sym: ElementId) -> Result<ResourceId, SkipReason> {
        let field = self.db.element(sym).ok_or(SkipReason::UnknownSymbol(sym))?;
        if !field.is_field() {
            return Err(SkipReason::NotAField(field.name.clone()));
        }

        let value = match &field.constant {
            Some(constant) => constant.as_int().ok_or_else(|| SkipReason::NotInteger {
                name: field.name.clone(),
                kind: constant.kind_name(),
            })?,
            None => return Err(SkipReason::NotConstant(field.name.clone())),
        };

        // field -> group -> container, where the container must sit in a class.
        let too_shallow = || SkipReason::TooShallow(field.name.clone());
        let group = field
            .enclosing
            .and_then(|id| self.db.element(id))
            .ok_or_else(too_shallow)?;
        let container = group
            .enclosing
            .and_then(|id| self.db.enclosing_class(id))
            .ok_or_else(too_shallow)?;

        let container_name = self
            .db
            .qualified_name(container)
            .ok_or_else(|| SkipReason::UnresolvedContainer(format!("{container:?}")))?;
        let class_name = self
            .containers
            .resolve(&container_name, &group.name)
            .ok_or(SkipReason::UnresolvedContainer(container_name))?;

        Ok(ResourceId::named(value, class_name, field.name.clone()))
    }
}
