//! Read-only view of the host compiler's symbols and typed annotation trees.
//!
//! The annotation processor never owns these structures; a driver extracts
//! them from the compiler and hands them to `nova-apt` through its query
//! traits.

pub mod annotation_tree;
pub mod element;

pub use annotation_tree::{AnnotationExpr, AnnotationTree, AnnotationTreeBuilder, ExprId};
pub use element::{
    AnnotationId, AnnotationMirror, ConstValue, Element, ElementId, ElementKind, TypeMirrorId,
};

#[cfg(test)]
mod tests;
