//! Domain types for the Corral access auditor.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Folder identifier. Externally assigned; not necessarily contiguous
/// or starting at 0.
pub type FolderId = u64;

/// Cow identifier. Cows carry no attributes beyond their id, so they
/// are never materialized as a struct -- ids flow through folder access
/// lists and the final result set.
pub type CowId = u64;

/// Effective access per folder: folder id -> set of cow ids.
pub type AccessMap = HashMap<FolderId, HashSet<CowId>>;

// ---------------------------------------------------------------------------
// Access policy
// ---------------------------------------------------------------------------

/// A folder declared only through an edge line is Shared until an
/// access-list line says otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessPolicy {
    #[default]
    Shared,
    Confidential,
}

// ---------------------------------------------------------------------------
// Folder
// ---------------------------------------------------------------------------

/// One node of the forest.
///
/// `parent` is a foreign-key-style id back-reference into the owning
/// [`Forest`], never an owned edge. A folder has at most one parent; a
/// second incoming edge overwrites it (see [`Forest::add_edge`]).
///
/// `SmallVec<[CowId; 8]>` keeps typical access lists off the heap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub policy: AccessPolicy,
    /// Cow ids with direct access. Kept distinct by [`Folder::add_cow`].
    pub cows: SmallVec<[CowId; 8]>,
    pub parent: Option<FolderId>,
    pub children: Vec<FolderId>,
    pub in_degree: u32,
    pub out_degree: u32,
}

impl Folder {
    fn new(id: FolderId) -> Self {
        Self {
            id,
            policy: AccessPolicy::default(),
            cows: SmallVec::new(),
            parent: None,
            children: Vec::new(),
            in_degree: 0,
            out_degree: 0,
        }
    }

    /// Grants a cow direct access. Adding an id already present is a no-op.
    pub fn add_cow(&mut self, cow: CowId) {
        if !self.cows.contains(&cow) {
            self.cows.push(cow);
        }
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        self.policy == AccessPolicy::Shared
    }

    #[inline]
    pub fn is_confidential(&self) -> bool {
        self.policy == AccessPolicy::Confidential
    }

    /// A leaf has no outgoing child edges.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.out_degree == 0
    }
}

// ---------------------------------------------------------------------------
// Forest
// ---------------------------------------------------------------------------

/// Owns every [`Folder`], keyed by id, plus the total cow population.
///
/// Folders are created lazily on first reference from either an
/// access-list line or an edge line, and iteration follows that first
/// mention order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Forest {
    folders: HashMap<FolderId, Folder>,
    /// Ids in first-mention order.
    order: Vec<FolderId>,
    total_cows: u64,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_total_cows(&mut self, n: u64) {
        self.total_cows = n;
    }

    /// Total cow population; cow ids range over `0..total_cows`.
    pub fn total_cows(&self) -> u64 {
        self.total_cows
    }

    /// Returns the folder with `id`, creating a default-Shared one on
    /// first reference.
    pub fn get_or_create(&mut self, id: FolderId) -> &mut Folder {
        match self.folders.entry(id) {
            Entry::Vacant(e) => {
                self.order.push(id);
                e.insert(Folder::new(id))
            }
            Entry::Occupied(e) => e.into_mut(),
        }
    }

    pub fn get(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(&id)
    }

    /// Declares a parent -> child edge, creating either endpoint as
    /// needed.
    ///
    /// A repeated edge from the same parent is a complete no-op. An edge
    /// from a *different* parent silently overwrites the child's parent
    /// back-reference while still incrementing its in-degree, so the
    /// degree/parent pair can disagree on malformed forests. Cycles and
    /// self-loops are not rejected.
    pub fn add_edge(&mut self, parent: FolderId, child: FolderId) {
        self.get_or_create(parent);
        self.get_or_create(child);

        if let Some(p) = self.folders.get_mut(&parent) {
            if p.children.contains(&child) {
                return;
            }
            p.children.push(child);
            p.out_degree += 1;
        }
        if let Some(c) = self.folders.get_mut(&child) {
            c.parent = Some(parent);
            c.in_degree += 1;
        }
    }

    /// Folder ids in first-mention order.
    pub fn ids(&self) -> &[FolderId] {
        &self.order
    }

    /// Folders in first-mention order.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.order.iter().filter_map(|id| self.folders.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folders_default_to_shared() {
        let mut forest = Forest::new();
        assert!(forest.get_or_create(7).is_shared());
    }

    #[test]
    fn add_cow_dedupes() {
        let mut forest = Forest::new();
        let folder = forest.get_or_create(1);
        folder.add_cow(3);
        folder.add_cow(3);
        folder.add_cow(5);
        assert_eq!(folder.cows.as_slice(), &[3, 5]);
    }

    #[test]
    fn edge_sets_parent_and_degrees() {
        let mut forest = Forest::new();
        forest.add_edge(1, 2);

        let parent = forest.get(1).unwrap();
        assert_eq!(parent.out_degree, 1);
        assert_eq!(parent.children, vec![2]);
        assert!(!parent.is_leaf());

        let child = forest.get(2).unwrap();
        assert_eq!(child.parent, Some(1));
        assert_eq!(child.in_degree, 1);
        assert!(child.is_leaf());
    }

    #[test]
    fn repeated_edge_from_same_parent_is_noop() {
        let mut forest = Forest::new();
        forest.add_edge(1, 2);
        forest.add_edge(1, 2);

        assert_eq!(forest.get(1).unwrap().out_degree, 1);
        assert_eq!(forest.get(2).unwrap().in_degree, 1);
    }

    #[test]
    fn second_parent_overwrites_backreference() {
        let mut forest = Forest::new();
        forest.add_edge(1, 3);
        forest.add_edge(2, 3);

        let child = forest.get(3).unwrap();
        assert_eq!(child.parent, Some(2));
        // In-degree still counts both incoming edges.
        assert_eq!(child.in_degree, 2);
    }

    #[test]
    fn first_mention_order_is_preserved() {
        let mut forest = Forest::new();
        forest.get_or_create(10);
        forest.add_edge(5, 10);
        forest.get_or_create(1);
        assert_eq!(forest.ids(), &[10, 5, 1]);
    }
}
