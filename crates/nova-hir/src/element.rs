use std::fmt;

use nova_core::Name;

/// Handle to a program element (package, class, member, parameter) owned by
/// the host compiler's symbol table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        ElementId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// Token for a type that the host could only hand out in mirrored form.
///
/// Reading a `Class<?>`-valued annotation member during processing yields a
/// type mirror instead of a loaded element; the token is turned back into an
/// element with a second lookup.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeMirrorId(u32);

impl TypeMirrorId {
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        TypeMirrorId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeMirrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeMirrorId({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Package,
    Class,
    Field,
    Method,
    Parameter,
}

/// Compile-time constant value of a `static final` field.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl ConstValue {
    /// Only `int` constants qualify; narrower integral types are boxed as
    /// their own wrapper types by the compiler and never appear as resource
    /// ids.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            ConstValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConstValue::Byte(_) => "byte",
            ConstValue::Char(_) => "char",
            ConstValue::Short(_) => "short",
            ConstValue::Int(_) => "int",
            ConstValue::Long(_) => "long",
            ConstValue::Float(_) => "float",
            ConstValue::Double(_) => "double",
            ConstValue::Boolean(_) => "boolean",
            ConstValue::String(_) => "String",
        }
    }
}

/// An annotation instance attached to an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationMirror {
    /// Fully qualified name of the annotation type, e.g. `com.airbnb.paris.annotations.Attr`.
    pub annotation_type: String,
}

impl AnnotationMirror {
    pub fn new(annotation_type: impl Into<String>) -> Self {
        Self {
            annotation_type: annotation_type.into(),
        }
    }
}

/// Identifies one annotation instance on one element: the `index`-th entry
/// of the owner's annotation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotationId {
    pub owner: ElementId,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub name: Name,
    /// Lexically enclosing element. `None` only for packages.
    pub enclosing: Option<ElementId>,
    /// Constant value for fields initialized with a compile-time constant.
    pub constant: Option<ConstValue>,
    pub annotations: Vec<AnnotationMirror>,
}

impl Element {
    pub fn new(kind: ElementKind, name: impl Into<Name>, enclosing: Option<ElementId>) -> Self {
        Self {
            kind,
            name: name.into(),
            enclosing,
            constant: None,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_field(&self) -> bool {
        self.kind == ElementKind::Field
    }

    /// Position of the first annotation whose type is exactly `annotation_type`.
    #[must_use]
    pub fn find_annotation(&self, annotation_type: &str) -> Option<usize> {
        self.annotations
            .iter()
            .position(|mirror| mirror.annotation_type == annotation_type)
    }
}
