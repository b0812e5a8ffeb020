//! Depth-levelized ordering of the category forest.

use std::collections::HashMap;

use catalogsync_domain::{CatalogSyncError, Category, CategoryId, Result};

/// Order categories so every node comes after its ancestors: by depth, then
/// by id. A parent id that does not resolve to a known category counts as
/// depth zero; the synchronizer reports such nodes as errors.
///
/// # Errors
/// `InvalidInput` if following `parent_id` links does not terminate.
pub fn creation_order(categories: Vec<Category>) -> Result<Vec<Category>> {
    let parents: HashMap<CategoryId, Option<CategoryId>> =
        categories.iter().map(|category| (category.id, category.parent_id)).collect();

    let mut depths: HashMap<CategoryId, usize> = HashMap::with_capacity(categories.len());
    for category in &categories {
        depth_of(category.id, &parents, &mut depths)?;
    }

    let mut ordered = categories;
    ordered.sort_by_key(|category| (depths.get(&category.id).copied().unwrap_or(0), category.id));
    Ok(ordered)
}

fn depth_of(
    id: CategoryId,
    parents: &HashMap<CategoryId, Option<CategoryId>>,
    memo: &mut HashMap<CategoryId, usize>,
) -> Result<usize> {
    if let Some(known) = memo.get(&id) {
        return Ok(*known);
    }

    let mut chain = Vec::new();
    let mut cursor = id;

    let mut depth = loop {
        if let Some(ancestor_depth) = memo.get(&cursor) {
            break ancestor_depth + 1;
        }
        if chain.contains(&cursor) {
            return Err(CatalogSyncError::InvalidInput(format!(
                "category tree contains a cycle through category {cursor}"
            )));
        }
        chain.push(cursor);
        match parents.get(&cursor).copied().flatten() {
            Some(parent) if parents.contains_key(&parent) => cursor = parent,
            _ => break 0,
        }
    };

    // Walk back down from the topmost unresolved ancestor.
    for node in chain.iter().rev() {
        memo.insert(*node, depth);
        depth += 1;
    }

    Ok(depth - 1)
}
