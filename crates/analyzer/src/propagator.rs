//! Effective-access propagation over a built forest.
//!
//! Rules per folder:
//!   - Confidential: effective set = own direct cow list, nothing inherited.
//!   - Shared, no parent or Confidential parent: effective set = own list.
//!   - Shared with a Shared parent: effective set = own list plus the
//!     parent's *effective* set (inheritance chains through every Shared
//!     ancestor).
//!
//! Folders are resolved parent-first regardless of declaration order: each
//! folder's parent chain is walked up to the deepest unresolved ancestor,
//! then computed downward. The result map doubles as the visited guard, so
//! every folder is computed exactly once.

use corral_core::{AccessMap, CowId, Folder, FolderId, Forest};
use std::collections::HashSet;

/// Computes the effective access map: one entry per folder in the forest.
pub fn propagate_access(forest: &Forest) -> AccessMap {
    let mut resolved = AccessMap::with_capacity(forest.len());
    for &id in forest.ids() {
        resolve_chain(forest, id, &mut resolved);
    }

    tracing::debug!(folders = resolved.len(), "access propagated");
    resolved
}

fn resolve_chain(forest: &Forest, start: FolderId, resolved: &mut AccessMap) {
    // Walk up to the deepest ancestor that still needs computing. A parent
    // chain that loops back on itself stops at the first repeated id, so a
    // declared cycle cannot hang the walk.
    let mut chain: Vec<FolderId> = Vec::new();
    let mut on_chain: HashSet<FolderId> = HashSet::new();
    let mut cursor = Some(start);

    while let Some(id) = cursor {
        if resolved.contains_key(&id) || !on_chain.insert(id) {
            break;
        }
        chain.push(id);
        cursor = match forest.get(id) {
            // Only a Shared folder can inherit, so the chain ends at the
            // first Confidential ancestor.
            Some(folder) if folder.is_shared() => folder.parent,
            _ => None,
        };
    }

    // Compute downward, parents before children.
    while let Some(id) = chain.pop() {
        let Some(folder) = forest.get(id) else {
            continue;
        };
        let mut cows: HashSet<CowId> = folder.cows.iter().copied().collect();

        if folder.is_shared() {
            if let Some(parent_id) = folder.parent {
                if forest.get(parent_id).is_some_and(Folder::is_shared) {
                    if let Some(parent_cows) = resolved.get(&parent_id) {
                        cows.extend(parent_cows);
                    }
                }
            }
        }

        resolved.insert(id, cows);
    }
}
