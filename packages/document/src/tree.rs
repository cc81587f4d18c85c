//! # Tree Zipper
//!
//! Path-addressed operations on a component forest.
//!
//! A [`TreePath`] is the sequence of sibling indexes leading from the root list
//! to a node: `[2]` is the third root component, `[2, 0]` its first child.
//! Every structural edit is expressed as "find the path, transform at the
//! path", so lookup, removal, insertion and the descendant check all share the
//! traversal in [`find_path`].
//!
//! Indexes are array positions. Callers that accept user-facing indexes should
//! [`normalize_all`] first so that array position and `order` agree.

use crate::{ComponentInstance, IdGenerator};
use thiserror::Error;

/// Sibling indexes from the root list down to a node
pub type TreePath = Vec<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Component not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Component cannot have children: {0}")]
    NotAContainer(String),

    #[error("Would create cycle")]
    CycleDetected,
}

/// Depth-first search for the path to `id`
pub fn find_path(roots: &[ComponentInstance], id: &str) -> Option<TreePath> {
    let mut path = Vec::new();
    if search(roots, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn search(nodes: &[ComponentInstance], id: &str, path: &mut TreePath) -> bool {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        if node.id == id || search(node.children(), id, path) {
            return true;
        }
        path.pop();
    }
    false
}

pub fn get<'a>(roots: &'a [ComponentInstance], path: &[usize]) -> Option<&'a ComponentInstance> {
    let (first, rest) = path.split_first()?;
    let mut node = roots.get(*first)?;
    for index in rest {
        node = node.children().get(*index)?;
    }
    Some(node)
}

pub fn get_mut<'a>(
    roots: &'a mut [ComponentInstance],
    path: &[usize],
) -> Option<&'a mut ComponentInstance> {
    let (first, rest) = path.split_first()?;
    let mut node = roots.get_mut(*first)?;
    for index in rest {
        node = node.children.as_mut()?.get_mut(*index)?;
    }
    Some(node)
}

pub fn find<'a>(roots: &'a [ComponentInstance], id: &str) -> Option<&'a ComponentInstance> {
    let path = find_path(roots, id)?;
    get(roots, &path)
}

pub fn find_mut<'a>(
    roots: &'a mut [ComponentInstance],
    id: &str,
) -> Option<&'a mut ComponentInstance> {
    let path = find_path(roots, id)?;
    get_mut(roots, &path)
}

/// The sibling list a parent path points into.
///
/// An empty parent path is the root list. `None` when the path is invalid or
/// the parent does not accept children.
pub fn siblings_mut<'a>(
    roots: &'a mut Vec<ComponentInstance>,
    parent_path: &[usize],
) -> Option<&'a mut Vec<ComponentInstance>> {
    if parent_path.is_empty() {
        return Some(roots);
    }
    get_mut(roots, parent_path)?.children.as_mut()
}

/// Detach the node at `path` together with its subtree
pub fn remove_at(roots: &mut Vec<ComponentInstance>, path: &[usize]) -> Option<ComponentInstance> {
    let (index, parent_path) = path.split_last()?;
    let siblings = siblings_mut(roots, parent_path)?;
    if *index >= siblings.len() {
        return None;
    }
    let removed = siblings.remove(*index);
    renumber(siblings);
    Some(removed)
}

/// Detach the node with the given id together with its subtree
pub fn remove(roots: &mut Vec<ComponentInstance>, id: &str) -> Option<ComponentInstance> {
    let path = find_path(roots, id)?;
    remove_at(roots, &path)
}

/// Insert `node` into the sibling list under `parent_path`.
///
/// The index is clamped to the list length. Returns the final position.
pub fn insert_at(
    roots: &mut Vec<ComponentInstance>,
    parent_path: &[usize],
    index: usize,
    node: ComponentInstance,
) -> Result<usize, TreeError> {
    if !parent_path.is_empty() {
        match get(roots, parent_path) {
            Some(parent) if parent.is_container() => {}
            Some(parent) => return Err(TreeError::NotAContainer(parent.id.clone())),
            None => return Err(TreeError::ParentNotFound(format!("{:?}", parent_path))),
        }
    }
    let Some(siblings) = siblings_mut(roots, parent_path) else {
        return Err(TreeError::ParentNotFound(format!("{:?}", parent_path)));
    };
    let at = index.min(siblings.len());
    siblings.insert(at, node);
    renumber(siblings);
    Ok(at)
}

/// Insert `node` under the parent with `parent_id` (`None` = root list)
pub fn insert_into(
    roots: &mut Vec<ComponentInstance>,
    parent_id: Option<&str>,
    index: usize,
    node: ComponentInstance,
) -> Result<usize, TreeError> {
    let parent_path = match parent_id {
        Some(id) => find_path(roots, id).ok_or_else(|| TreeError::ParentNotFound(id.to_string()))?,
        None => Vec::new(),
    };
    insert_at(roots, &parent_path, index, node)
}

/// Whether `candidate_id` lies strictly inside the subtree rooted at `ancestor_id`
pub fn is_descendant(roots: &[ComponentInstance], ancestor_id: &str, candidate_id: &str) -> bool {
    match find(roots, ancestor_id) {
        Some(ancestor) => ancestor
            .children()
            .iter()
            .any(|child| subtree_contains(child, candidate_id)),
        None => false,
    }
}

pub fn subtree_contains(node: &ComponentInstance, id: &str) -> bool {
    node.id == id || node.children().iter().any(|c| subtree_contains(c, id))
}

/// Id of the parent of `id`: `Some(None)` for roots, `None` when not found
pub fn parent_id(roots: &[ComponentInstance], id: &str) -> Option<Option<String>> {
    let path = find_path(roots, id)?;
    let parent_path = &path[..path.len() - 1];
    if parent_path.is_empty() {
        Some(None)
    } else {
        get(roots, parent_path).map(|p| Some(p.id.clone()))
    }
}

/// Set `order` to match array position
pub fn renumber(siblings: &mut [ComponentInstance]) {
    for (index, node) in siblings.iter_mut().enumerate() {
        node.order = index as i64;
    }
}

/// Stable-sort siblings by `order`, then renumber 0..k-1
pub fn normalize(siblings: &mut [ComponentInstance]) {
    siblings.sort_by_key(|node| node.order);
    renumber(siblings);
}

/// [`normalize`] every sibling group in the forest
pub fn normalize_all(roots: &mut [ComponentInstance]) {
    normalize(roots);
    for node in roots.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            normalize_all(children);
        }
    }
}

/// Give every node in the subtree a fresh id
pub fn reassign_ids(node: &mut ComponentInstance, ids: &mut dyn IdGenerator) {
    node.id = ids.new_id();
    if let Some(children) = node.children.as_mut() {
        for child in children {
            reassign_ids(child, ids);
        }
    }
}

pub fn collect_ids(roots: &[ComponentInstance]) -> Vec<String> {
    let mut ids = Vec::new();
    collect_into(roots, &mut ids);
    ids
}

fn collect_into(nodes: &[ComponentInstance], ids: &mut Vec<String>) {
    for node in nodes {
        ids.push(node.id.clone());
        collect_into(node.children(), ids);
    }
}

pub fn count(roots: &[ComponentInstance]) -> usize {
    roots.iter().map(|node| 1 + count(node.children())).sum()
}
