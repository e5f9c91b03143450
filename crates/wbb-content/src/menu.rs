//! Navigation menu tree construction.
//!
//! Menu entries arrive either pre-nested or as a flat list with `parentId`
//! references. Both shapes are first flattened into one pre-order list, then
//! the tree is rebuilt in two passes:
//!
//! 1. Build an id-keyed lookup table over the flat list
//! 2. Attach every entry to its parent's child list in one pass
//!
//! Entries whose parent is unknown become roots. Entries that are part of a
//! parent cycle (and anything below them) cannot be reached from a root and
//! are dropped.

use std::collections::HashMap;

use wbb_api::types::{Id, MenuItem};
use wbb_lang::Localized;

/// A menu entry with resolved link target and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: Id,
    pub title: Localized<String>,
    /// Normalized slug of this entry alone.
    pub slug: String,
    /// External URL, if any.
    pub url: Option<String>,
    pub order: i64,
    pub parent_id: Option<Id>,
    /// Link target: the external URL, `/` for an empty slug, or
    /// `/pages/<ancestor slugs>/<slug>`.
    pub href: String,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Whether the entry links off-site.
    pub fn is_external(&self) -> bool {
        self.url.is_some()
    }
}

/// One flattened entry: the item without children plus its effective parent.
struct FlatEntry {
    item: MenuItem,
    parent: Option<Id>,
}

/// Flatten nested input in pre-order. Nesting wins over `parentId`.
fn flatten(items: Vec<MenuItem>, parent: Option<&Id>, out: &mut Vec<FlatEntry>) {
    for mut item in items {
        let children = std::mem::take(&mut item.children);
        let id = item.id.clone();
        let parent = parent.cloned().or_else(|| item.parent_id.clone());
        out.push(FlatEntry { item, parent });
        flatten(children, Some(&id), out);
    }
}

/// Build the menu tree from API entries, preserving input order.
pub fn build_menu_tree(items: Vec<MenuItem>) -> Vec<MenuNode> {
    let mut flat = Vec::new();
    flatten(items, None, &mut flat);

    // Pass 1: id-keyed lookup table. Later duplicates are dropped.
    let mut index: HashMap<Id, usize> = HashMap::with_capacity(flat.len());
    let mut entries: Vec<FlatEntry> = Vec::with_capacity(flat.len());
    for entry in flat {
        if index.contains_key(&entry.item.id) {
            tracing::warn!(id = %entry.item.id, "Duplicate menu id, dropping entry");
            continue;
        }
        index.insert(entry.item.id.clone(), entries.len());
        entries.push(entry);
    }

    // Pass 2: attach each entry to its parent.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
    let mut roots = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        let parent_idx = entry
            .parent
            .as_ref()
            .and_then(|parent| index.get(parent).copied())
            .filter(|&p| p != idx);
        match parent_idx {
            Some(p) => children[p].push(idx),
            None => {
                if let Some(parent) = &entry.parent {
                    tracing::warn!(id = %entry.item.id, parent = %parent, "Menu parent not found, promoting to root");
                }
                roots.push(idx);
            }
        }
    }

    let mut slots: Vec<Option<MenuItem>> = entries.into_iter().map(|e| Some(e.item)).collect();
    let tree: Vec<MenuNode> = roots
        .iter()
        .filter_map(|&idx| build_node(idx, "", &children, &mut slots))
        .collect();

    let dropped = slots.iter().filter(|s| s.is_some()).count();
    if dropped > 0 {
        tracing::warn!(dropped, "Menu entries form a parent cycle, dropping them");
    }

    tree
}

fn build_node(
    idx: usize,
    parent_path: &str,
    children: &[Vec<usize>],
    slots: &mut [Option<MenuItem>],
) -> Option<MenuNode> {
    let item = slots[idx].take()?;

    let full_path = if parent_path.is_empty() {
        item.slug.clone()
    } else {
        format!("{parent_path}/{}", item.slug)
    };
    let href = match &item.url {
        Some(url) => url.clone(),
        None if item.slug.is_empty() => "/".to_owned(),
        None => format!("/pages/{full_path}"),
    };

    let child_nodes = children[idx]
        .iter()
        .filter_map(|&child| build_node(child, &full_path, children, slots))
        .collect();

    Some(MenuNode {
        id: item.id,
        title: item.title,
        slug: item.slug,
        url: item.url,
        order: item.order,
        parent_id: item.parent_id,
        href,
        children: child_nodes,
    })
}

/// Stable-sort siblings by `order`, recursively.
pub fn sort_by_order(nodes: &mut [MenuNode]) {
    nodes.sort_by_key(|node| node.order);
    for node in nodes {
        sort_by_order(&mut node.children);
    }
}
