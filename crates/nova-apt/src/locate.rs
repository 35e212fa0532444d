use nova_hir::{AnnotationId, AnnotationTree, ElementId};

use crate::db::{Database, TypedTrees};

/// Finds the typed tree of the `annotation_type` annotation on `element`.
///
/// Returns `None` whenever no tree is obtainable: the host has no typed
/// trees, the element is unknown or not annotated with `annotation_type`, or
/// the element comes from a compiled dependency rather than source.
pub fn locate_annotation_tree<'t>(
    db: &dyn Database,
    trees: Option<&'t dyn TypedTrees>,
    element: ElementId,
    annotation_type: &str,
) -> Option<&'t AnnotationTree> {
    let annotation_type = annotation_type.trim();
    if annotation_type.is_empty() {
        tracing::debug!(?element, "empty annotation type");
        return None;
    }

    let Some(trees) = trees else {
        tracing::trace!(?element, annotation = %annotation_type, "typed trees unavailable");
        return None;
    };

    let Some(index) = db
        .element(element)
        .and_then(|data| data.find_annotation(annotation_type))
    else {
        tracing::trace!(?element, annotation = %annotation_type, "element is not annotated");
        return None;
    };

    let annotation = AnnotationId {
        owner: element,
        index: index as u32,
    };
    let tree = trees.annotation_tree(annotation);
    if tree.is_none() {
        // Expected for declarations read from class files.
        tracing::trace!(?element, annotation = %annotation_type, "no source tree for annotation");
    }
    tree
}

#[cfg(test)]
mod tests {
    use nova_hir::AnnotationTreeBuilder;

    use super::*;
    use crate::db::MemoryDatabase;

    const ATTR: &str = "com.airbnb.paris.annotations.Attr";

    fn annotated_method(with_tree: bool) -> (MemoryDatabase, ElementId) {
        let mut db = MemoryDatabase::new();
        let pkg = db.add_package("com.example");
        let view = db.add_class(pkg, "View");
        let method = db.add_method(view, "setColor");
        db.annotate(method, "java.lang.Deprecated");
        let annotation = db.annotate(method, ATTR);
        if with_tree {
            let mut b = AnnotationTreeBuilder::new();
            let root = b.annotation(Vec::new());
            db.set_annotation_tree(annotation, b.finish(root));
        }
        (db, method)
    }

    #[test]
    fn finds_tree_of_matching_annotation() {
        let (db, method) = annotated_method(true);
        assert!(locate_annotation_tree(&db, Some(&db), method, ATTR).is_some());
    }

    #[test]
    fn compiled_declarations_have_no_tree() {
        let (db, method) = annotated_method(false);
        assert!(locate_annotation_tree(&db, Some(&db), method, ATTR).is_none());
    }

    #[test]
    fn missing_tree_capability_yields_none() {
        let (db, method) = annotated_method(true);
        assert!(locate_annotation_tree(&db, None, method, ATTR).is_none());
    }

    #[test]
    fn kind_must_match_qualified_name() {
        let (db, method) = annotated_method(true);
        assert!(locate_annotation_tree(&db, Some(&db), method, "Attr").is_none());
        assert!(locate_annotation_tree(&db, Some(&db), method, "").is_none());
        assert!(
            locate_annotation_tree(&db, Some(&db), method, "com.example.Other").is_none()
        );
    }

    #[test]
    fn unknown_elements_yield_none() {
        let (db, _) = annotated_method(true);
        assert!(
            locate_annotation_tree(&db, Some(&db), ElementId::from_raw(500), ATTR).is_none()
        );
    }
}
