//! Unit tests for the scope chain.

use super::symbols::{Definition, DefinitionKind, SymbolArena};
use crate::Span;

fn variable(arena: &mut SymbolArena, name: &str, visible_from: u32) -> super::symbols::DefinitionId {
    arena.add_definition(Definition::new(
        name,
        DefinitionKind::LocalVariable,
        Span::null(),
        visible_from,
        false,
    ))
}

#[test]
fn test_define_and_find() {
    let mut arena = SymbolArena::new();
    let root = arena.create_table(None);
    let a = variable(&mut arena, "a", 0);
    arena.define(root, "a", a);

    assert!(arena.has_local(root, "a"));
    assert_eq!(arena.find(root, "a"), Some(a));
    assert_eq!(arena.find(root, "b"), None);
    assert_eq!(arena.definition(a).name, "a");
}

#[test]
fn test_find_walks_parents() {
    let mut arena = SymbolArena::new();
    let root = arena.create_table(None);
    let child = arena.create_table(Some(root));
    let grandchild = arena.create_table(Some(child));

    let a = variable(&mut arena, "a", 0);
    arena.define(root, "a", a);

    assert!(!arena.has_local(grandchild, "a"));
    assert_eq!(arena.find(grandchild, "a"), Some(a));
    assert_eq!(arena.parent(grandchild), Some(child));
    assert_eq!(arena.parent(root), None);
}

#[test]
fn test_inner_definition_shadows_outer() {
    let mut arena = SymbolArena::new();
    let root = arena.create_table(None);
    let child = arena.create_table(Some(root));

    let outer = variable(&mut arena, "a", 0);
    let inner = variable(&mut arena, "a", 10);
    arena.define(root, "a", outer);
    arena.define(child, "a", inner);

    assert_eq!(arena.find(child, "a"), Some(inner));
    assert_eq!(arena.find(root, "a"), Some(outer));
}

#[test]
fn test_find_visible_respects_definition_point() {
    let mut arena = SymbolArena::new();
    let root = arena.create_table(None);
    let child = arena.create_table(Some(root));

    let outer = variable(&mut arena, "a", 0);
    let inner = variable(&mut arena, "a", 20);
    arena.define(root, "a", outer);
    arena.define(child, "a", inner);

    // before the inner definition the outer one is still in effect
    assert_eq!(arena.find_visible(child, "a", 5), Some(outer));
    assert_eq!(arena.find_visible(child, "a", 20), Some(inner));
    assert_eq!(arena.find_visible(root, "a", 25), Some(outer));

    let late = variable(&mut arena, "late", 50);
    arena.define(root, "late", late);
    assert_eq!(arena.find_visible(child, "late", 30), None);
}

#[test]
#[should_panic]
fn test_define_twice_panics() {
    let mut arena = SymbolArena::new();
    let root = arena.create_table(None);
    let first = variable(&mut arena, "a", 0);
    let second = variable(&mut arena, "a", 5);

    arena.define(root, "a", first);
    arena.define(root, "a", second);
}

#[test]
fn test_same_name_in_sibling_scopes() {
    let mut arena = SymbolArena::new();
    let root = arena.create_table(None);
    let left = arena.create_table(Some(root));
    let right = arena.create_table(Some(root));

    let a = variable(&mut arena, "a", 0);
    let b = variable(&mut arena, "a", 0);
    arena.define(left, "a", a);
    arena.define(right, "a", b);

    assert_eq!(arena.find(left, "a"), Some(a));
    assert_eq!(arena.find(right, "a"), Some(b));
    assert_eq!(arena.table_count(), 3);
    assert_eq!(arena.table(left).len(), 1);
}
