use std::fmt;

use nova_core::Name;

use crate::element::{ConstValue, ElementId};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl ExprId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        ExprId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arena<T> {
    data: Vec<T>,
}

impl<T> Arena<T> {
    pub fn alloc(&mut self, value: T) -> u32 {
        let idx = self.data.len() as u32;
        self.data.push(value);
        idx
    }

    #[must_use]
    pub fn get(&self, id: ExprId) -> Option<&T> {
        self.data.get(id.idx())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena { data: Vec::new() }
    }
}

impl<T> std::ops::Index<ExprId> for Arena<T> {
    type Output = T;

    fn index(&self, index: ExprId) -> &Self::Output {
        &self.data[index.idx()]
    }
}

/// Typed expression node of an annotation argument.
///
/// `sym` fields carry the element the compiler attributed to the node, or
/// `None` when attribution failed.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationExpr {
    /// `@Attr(...)`: the annotation itself with its arguments.
    Annotation { args: Vec<ExprId> },
    /// `name = value` element-value pair.
    Assign { name: Name, value: ExprId },
    /// `receiver.name`
    Select {
        receiver: ExprId,
        name: Name,
        sym: Option<ElementId>,
    },
    Ident { name: Name, sym: Option<ElementId> },
    /// `{a, b, c}`
    Array { elements: Vec<ExprId> },
    /// `cond ? a : b`
    Conditional {
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    Literal { value: ConstValue },
    /// Any other composite expression (parentheses, casts, binary and unary
    /// operators). Only the operands matter here.
    Other { children: Vec<ExprId> },
}

impl AnnotationExpr {
    /// Direct sub-expressions in source order.
    #[must_use]
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            AnnotationExpr::Annotation { args } => args.clone(),
            AnnotationExpr::Assign { value, .. } => vec![*value],
            AnnotationExpr::Select { receiver, .. } => vec![*receiver],
            AnnotationExpr::Ident { .. } | AnnotationExpr::Literal { .. } => Vec::new(),
            AnnotationExpr::Array { elements } => elements.clone(),
            AnnotationExpr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => vec![*condition, *then_branch, *else_branch],
            AnnotationExpr::Other { children } => children.clone(),
        }
    }
}

/// The typed tree of one annotation instance.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationTree {
    pub root: ExprId,
    pub exprs: Arena<AnnotationExpr>,
}

impl AnnotationTree {
    #[must_use]
    pub fn expr(&self, id: ExprId) -> Option<&AnnotationExpr> {
        self.exprs.get(id)
    }

    /// Pre-order walk from the root, visiting each node once.
    ///
    /// The walk keeps its own stack, so nesting depth is bounded by memory
    /// rather than by the thread's stack. A node shared by several parents
    /// is yielded the first time it is reached only. Dangling ids are skipped.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![self.root],
            visited: vec![false; self.exprs.len()],
        }
    }
}

pub struct Descendants<'a> {
    tree: &'a AnnotationTree,
    stack: Vec<ExprId>,
    visited: Vec<bool>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (ExprId, &'a AnnotationExpr);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let Some(seen) = self.visited.get_mut(id.idx()) else {
                continue;
            };
            if std::mem::replace(seen, true) {
                continue;
            }
            let Some(expr) = self.tree.expr(id) else {
                continue;
            };
            // Reverse so children come out in source order.
            self.stack.extend(expr.children().into_iter().rev());
            return Some((id, expr));
        }
        None
    }
}

/// Builds an [`AnnotationTree`] bottom-up. Children must be allocated before
/// their parents, which keeps every tree acyclic. A child may be shared by
/// several parents; [`AnnotationTree::descendants`] still yields it once.
#[derive(Debug, Default)]
pub struct AnnotationTreeBuilder {
    exprs: Arena<AnnotationExpr>,
}

impl AnnotationTreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, expr: AnnotationExpr) -> ExprId {
        ExprId::from_raw(self.exprs.alloc(expr))
    }

    pub fn ident(&mut self, name: impl Into<Name>, sym: Option<ElementId>) -> ExprId {
        self.alloc(AnnotationExpr::Ident {
            name: name.into(),
            sym,
        })
    }

    pub fn select(
        &mut self,
        receiver: ExprId,
        name: impl Into<Name>,
        sym: Option<ElementId>,
    ) -> ExprId {
        self.alloc(AnnotationExpr::Select {
            receiver,
            name: name.into(),
            sym,
        })
    }

    pub fn literal(&mut self, value: ConstValue) -> ExprId {
        self.alloc(AnnotationExpr::Literal { value })
    }

    pub fn array(&mut self, elements: Vec<ExprId>) -> ExprId {
        self.alloc(AnnotationExpr::Array { elements })
    }

    pub fn conditional(
        &mut self,
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    ) -> ExprId {
        self.alloc(AnnotationExpr::Conditional {
            condition,
            then_branch,
            else_branch,
        })
    }

    pub fn assign(&mut self, name: impl Into<Name>, value: ExprId) -> ExprId {
        self.alloc(AnnotationExpr::Assign {
            name: name.into(),
            value,
        })
    }

    pub fn other(&mut self, children: Vec<ExprId>) -> ExprId {
        self.alloc(AnnotationExpr::Other { children })
    }

    pub fn annotation(&mut self, args: Vec<ExprId>) -> ExprId {
        self.alloc(AnnotationExpr::Annotation { args })
    }

    #[must_use]
    pub fn finish(self, root: ExprId) -> AnnotationTree {
        AnnotationTree {
            root,
            exprs: self.exprs,
        }
    }
}
