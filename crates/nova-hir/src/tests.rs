use crate::annotation_tree::{AnnotationExpr, AnnotationTreeBuilder, ExprId};
use crate::element::{AnnotationMirror, ConstValue, Element, ElementId, ElementKind};

fn names_in_order(tree: &crate::AnnotationTree) -> Vec<String> {
    tree.descendants()
        .filter_map(|(_, expr)| match expr {
            AnnotationExpr::Ident { name, .. } | AnnotationExpr::Select { name, .. } => {
                Some(name.to_string())
            }
            _ => None,
        })
        .collect()
}

#[test]
fn descendants_visit_in_source_order() {
    let mut b = AnnotationTreeBuilder::new();
    let r = b.ident("R", None);
    let styleable = b.select(r, "styleable", None);
    let first = b.select(styleable, "first", None);
    let r2 = b.ident("R2", None);
    let second = b.select(r2, "second", None);
    let array = b.array(vec![first, second]);
    let value = b.assign("value", array);
    let root = b.annotation(vec![value]);
    let tree = b.finish(root);

    assert_eq!(
        names_in_order(&tree),
        vec!["first", "styleable", "R", "second", "R2"]
    );
    assert_eq!(tree.descendants().count(), tree.exprs.len());
}

#[test]
fn conditional_children_include_all_branches() {
    let mut b = AnnotationTreeBuilder::new();
    let cond = b.literal(ConstValue::Boolean(true));
    let a = b.ident("a", None);
    let c = b.ident("c", None);
    let root = b.conditional(cond, a, c);
    let tree = b.finish(root);

    assert_eq!(tree.exprs[root].children(), vec![cond, a, c]);
    assert_eq!(names_in_order(&tree), vec!["a", "c"]);
}

#[test]
fn descendants_survive_deep_nesting() {
    let mut b = AnnotationTreeBuilder::new();
    let mut current = b.literal(ConstValue::Int(1));
    for _ in 0..100_000 {
        current = b.other(vec![current]);
    }
    let tree = b.finish(current);

    assert_eq!(tree.descendants().count(), 100_001);
}

#[test]
fn shared_children_are_visited_once() {
    let mut b = AnnotationTreeBuilder::new();
    let mut current = b.ident("R", None);
    for _ in 0..64 {
        current = b.other(vec![current, current]);
    }
    let tree = b.finish(current);

    assert_eq!(tree.exprs.len(), 65);
    assert_eq!(tree.descendants().count(), 65);
    assert_eq!(names_in_order(&tree), vec!["R"]);
}

#[test]
fn dangling_children_are_skipped() {
    let mut b = AnnotationTreeBuilder::new();
    let r = b.ident("R", None);
    let root = b.array(vec![ExprId::from_raw(99), r]);
    let tree = b.finish(root);

    assert_eq!(tree.descendants().count(), 2);
}

#[test]
fn const_value_only_treats_int_as_integer() {
    assert_eq!(ConstValue::Int(7).as_int(), Some(7));
    assert_eq!(ConstValue::Short(7).as_int(), None);
    assert_eq!(ConstValue::Long(7).as_int(), None);
    assert_eq!(ConstValue::String("7".into()).as_int(), None);
}

#[test]
fn find_annotation_matches_qualified_name_exactly() {
    let mut field = Element::new(ElementKind::Field, "color", Some(ElementId::from_raw(0)));
    field.annotations.push(AnnotationMirror::new("com.example.Other"));
    field.annotations.push(AnnotationMirror::new("com.example.Attr"));

    assert_eq!(field.find_annotation("com.example.Attr"), Some(1));
    assert_eq!(field.find_annotation("Attr"), None);
    assert_eq!(field.find_annotation(""), None);
}
