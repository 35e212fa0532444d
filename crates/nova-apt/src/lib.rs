//! Recovery of symbolic names for resource ids used as annotation values.
//!
//! By the time an annotation processor sees `@Attr(R.styleable.View_color)`,
//! the compiler has folded the argument into a bare `int`. For declarations
//! compiled from source, the typed tree of the annotation still records which
//! field was referenced; this crate walks that tree and pairs each folded
//! value with its `package.R.group.field` name so generated code can refer to
//! the constant instead of repeating an opaque number.
//!
//! Recovery is best-effort: declarations read from compiled dependencies have
//! no typed tree, and every miss degrades to an anonymous [`ResourceId`].

pub mod container;
pub mod db;
pub mod locate;
pub mod resource_id;
pub mod scan;

pub use container::ContainerResolver;
pub use db::{Database, MemoryDatabase, TypeElementLookup, TypedTrees};
pub use locate::locate_annotation_tree;
pub use resource_id::{ResourceId, ResourceIdTable, ResourceSymbol};
pub use scan::AnnotationScanner;

use nova_config::ResourceIdsConfig;
use nova_hir::ElementId;

/// Entry point for annotation processors.
///
/// Each call rescans the annotation; nothing is cached between calls.
pub struct ResourceIdResolver<'a> {
    db: &'a dyn Database,
    trees: Option<&'a dyn TypedTrees>,
    enabled: bool,
    container_name: Option<&'a str>,
}

impl<'a> ResourceIdResolver<'a> {
    /// A resolver without typed trees reports every id anonymously until
    /// [`ResourceIdResolver::with_trees`] is called.
    #[must_use]
    pub fn new(db: &'a dyn Database) -> Self {
        Self {
            db,
            trees: None,
            enabled: true,
            container_name: None,
        }
    }

    #[must_use]
    pub fn with_trees(mut self, trees: &'a dyn TypedTrees) -> Self {
        self.trees = Some(trees);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: &'a ResourceIdsConfig) -> Self {
        self.enabled = config.enabled;
        self.container_name = config.container_name.as_deref();
        self
    }

    /// All ids recovered from the `annotation_type` annotation on `element`.
    #[must_use]
    pub fn resource_ids(&self, annotation_type: &str, element: ElementId) -> ResourceIdTable {
        if !self.enabled {
            return ResourceIdTable::new();
        }
        let Some(tree) = locate_annotation_tree(self.db, self.trees, element, annotation_type)
        else {
            return ResourceIdTable::new();
        };

        let containers =
            ContainerResolver::new(self.db).with_container_name(self.container_name);
        AnnotationScanner::new(self.db, containers).scan(tree)
    }

    /// The id `value` was written as in the `annotation_type` annotation on
    /// `element`, or an anonymous id when no name can be recovered.
    #[must_use]
    pub fn resource_id(&self, annotation_type: &str, element: ElementId, value: i32) -> ResourceId {
        let id = self.resource_ids(annotation_type, element).resolve(value);
        if id.is_anonymous() {
            tracing::debug!(
                annotation = %annotation_type,
                ?element,
                value,
                "no symbolic name recovered for resource id"
            );
        }
        id
    }
}
