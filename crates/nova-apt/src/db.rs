//! Query surfaces the processor needs from the host compiler.
//!
//! In a real build these are backed by the compiler's symbol table and its
//! typed trees. [`MemoryDatabase`] implements both in memory for tests and for
//! drivers that extract symbol information up front.

use std::collections::HashMap;

use nova_core::PackageName;
use nova_hir::{
    AnnotationId, AnnotationMirror, AnnotationTree, ConstValue, Element, ElementId, ElementKind,
    TypeMirrorId,
};

/// Upper bound on enclosing-chain walks. Real nesting is a handful of levels;
/// the bound only matters for malformed (cyclic) host data.
const MAX_ENCLOSING_DEPTH: usize = 1024;

/// Outcome of looking up a type element by qualified name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeElementLookup {
    Direct(ElementId),
    /// The host could only produce a mirror; resolve it with [`Database::as_element`].
    Deferred(TypeMirrorId),
    NotFound,
}

/// Symbol/type query surface of the host compiler.
pub trait Database {
    fn element(&self, id: ElementId) -> Option<&Element>;

    fn type_element(&self, qualified_name: &str) -> TypeElementLookup;

    fn as_element(&self, mirror: TypeMirrorId) -> Option<ElementId>;

    /// Package that owns `id`. Package elements are named by their fully
    /// qualified name.
    fn package_of(&self, id: ElementId) -> Option<PackageName> {
        let mut current = Some(id);
        for _ in 0..MAX_ENCLOSING_DEPTH {
            let element = self.element(current?)?;
            if element.kind == ElementKind::Package {
                return Some(PackageName::from_dotted(element.name.as_str()));
            }
            current = element.enclosing;
        }
        None
    }

    /// Closest class enclosing `id`, `id` itself when it is a class.
    fn enclosing_class(&self, id: ElementId) -> Option<ElementId> {
        let mut current = Some(id);
        for _ in 0..MAX_ENCLOSING_DEPTH {
            let candidate = current?;
            let element = self.element(candidate)?;
            match element.kind {
                ElementKind::Class => return Some(candidate),
                ElementKind::Package => return None,
                _ => current = element.enclosing,
            }
        }
        None
    }

    /// Qualified source name of a class (`com.example.R.styleable`) or package.
    ///
    /// `None` for members and for local classes, which have no qualified name.
    fn qualified_name(&self, id: ElementId) -> Option<String> {
        let mut simple_names = Vec::new();
        let mut current = Some(id);
        for _ in 0..MAX_ENCLOSING_DEPTH {
            let Some(candidate) = current else {
                // Top-level class in a host that does not model packages.
                return join_outermost_first(simple_names);
            };
            let element = self.element(candidate)?;
            match element.kind {
                ElementKind::Class => {
                    simple_names.push(element.name.as_str());
                    current = element.enclosing;
                }
                ElementKind::Package => {
                    if !element.name.as_str().is_empty() {
                        simple_names.push(element.name.as_str());
                    }
                    return join_outermost_first(simple_names);
                }
                _ => return None,
            }
        }
        None
    }
}

fn join_outermost_first(mut innermost_first: Vec<&str>) -> Option<String> {
    if innermost_first.is_empty() {
        return None;
    }
    innermost_first.reverse();
    Some(innermost_first.join("."))
}

/// Typed-tree query surface: only available for declarations compiled from
/// source in the current round.
pub trait TypedTrees {
    fn annotation_tree(&self, annotation: AnnotationId) -> Option<&AnnotationTree>;
}

/// Simple in-memory host for unit tests and examples.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    elements: Vec<Element>,
    types_by_name: HashMap<String, ElementId>,
    deferred: HashMap<String, TypeMirrorId>,
    mirrors: Vec<ElementId>,
    trees: HashMap<AnnotationId, AnnotationTree>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc(&mut self, element: Element) -> ElementId {
        let id = ElementId::from_raw(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    /// `name` is the fully qualified package name; `""` is the unnamed package.
    pub fn add_package(&mut self, name: &str) -> ElementId {
        self.alloc(Element::new(ElementKind::Package, name, None))
    }

    /// Adds a class inside a package or another class and registers it for
    /// lookup by qualified name.
    pub fn add_class(&mut self, enclosing: ElementId, name: &str) -> ElementId {
        let id = self.alloc(Element::new(ElementKind::Class, name, Some(enclosing)));
        if let Some(qualified) = self.qualified_name(id) {
            self.types_by_name.insert(qualified, id);
        }
        id
    }

    pub fn add_field(
        &mut self,
        owner: ElementId,
        name: &str,
        constant: Option<ConstValue>,
    ) -> ElementId {
        let mut element = Element::new(ElementKind::Field, name, Some(owner));
        element.constant = constant;
        self.alloc(element)
    }

    /// Shorthand for a `static final int` field.
    pub fn add_int_constant(&mut self, owner: ElementId, name: &str, value: i32) -> ElementId {
        self.add_field(owner, name, Some(ConstValue::Int(value)))
    }

    pub fn add_method(&mut self, owner: ElementId, name: &str) -> ElementId {
        self.alloc(Element::new(ElementKind::Method, name, Some(owner)))
    }

    pub fn add_parameter(&mut self, method: ElementId, name: &str) -> ElementId {
        self.alloc(Element::new(ElementKind::Parameter, name, Some(method)))
    }

    /// Attaches an annotation instance. Without a tree (see
    /// [`MemoryDatabase::set_annotation_tree`]) it behaves like an annotation
    /// read from a compiled class file.
    ///
    /// # Panics
    ///
    /// Panics if `element` was not allocated by this database.
    pub fn annotate(&mut self, element: ElementId, annotation_type: &str) -> AnnotationId {
        let annotations = &mut self.elements[element.idx()].annotations;
        annotations.push(AnnotationMirror::new(annotation_type));
        AnnotationId {
            owner: element,
            index: (annotations.len() - 1) as u32,
        }
    }

    pub fn set_annotation_tree(&mut self, annotation: AnnotationId, tree: AnnotationTree) {
        self.trees.insert(annotation, tree);
    }

    /// Makes `qualified_name` retrievable only through a type mirror, the way
    /// `Class<?>`-valued annotation members behave during processing.
    pub fn defer_type(&mut self, qualified_name: &str) -> Option<TypeMirrorId> {
        let element = *self.types_by_name.get(qualified_name)?;
        let mirror = TypeMirrorId::from_raw(self.mirrors.len() as u32);
        self.mirrors.push(element);
        self.deferred.insert(qualified_name.to_owned(), mirror);
        Some(mirror)
    }
}

impl Database for MemoryDatabase {
    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.idx())
    }

    fn type_element(&self, qualified_name: &str) -> TypeElementLookup {
        if let Some(mirror) = self.deferred.get(qualified_name) {
            return TypeElementLookup::Deferred(*mirror);
        }
        match self.types_by_name.get(qualified_name) {
            Some(id) => TypeElementLookup::Direct(*id),
            None => TypeElementLookup::NotFound,
        }
    }

    fn as_element(&self, mirror: TypeMirrorId) -> Option<ElementId> {
        self.mirrors.get(mirror.idx()).copied()
    }
}

impl TypedTrees for MemoryDatabase {
    fn annotation_tree(&self, annotation: AnnotationId) -> Option<&AnnotationTree> {
        self.trees.get(&annotation)
    }
}
