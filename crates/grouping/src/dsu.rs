//! Disjoint-set forest over record ids.
//!
//! Union by rank plus full path compression. `find` is iterative: one pass
//! walks up to the root, a second pass points every visited node at it.

use crate::error::GroupError;

#[derive(Debug, Clone, Default)]
pub struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl DisjointSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
            sets: 0,
        }
    }

    /// Append a singleton set and return its id. Ids are sequential from 0.
    pub fn add_record(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        self.sets += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets currently in the forest.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    fn check(&self, id: usize) -> Result<(), GroupError> {
        if id < self.parent.len() {
            Ok(())
        } else {
            Err(GroupError::InvalidId { id, len: self.parent.len() })
        }
    }

    /// Canonical representative of `id`'s set. Compresses the walked path.
    pub fn find(&mut self, id: usize) -> Result<usize, GroupError> {
        self.check(id)?;

        let mut root = id;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = id;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        Ok(root)
    }

    /// Merge the sets holding `a` and `b`. Returns `false` if they were
    /// already one set.
    ///
    /// The lower-rank root goes under the higher-rank one. On a rank tie
    /// `a`'s root stays the root and its rank grows by one.
    pub fn union(&mut self, a: usize, b: usize) -> Result<bool, GroupError> {
        let mut ra = self.find(a)?;
        let mut rb = self.find(b)?;
        if ra == rb {
            return Ok(false);
        }

        if self.rank[ra] < self.rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] += 1;
        }
        self.sets -= 1;
        Ok(true)
    }

    #[cfg(test)]
    fn same_set(&mut self, a: usize, b: usize) -> Result<bool, GroupError> {
        Ok(self.find(a)? == self.find(b)?)
    }

    #[cfg(test)]
    fn parent_of(&self, id: usize) -> usize {
        self.parent[id]
    }

    #[cfg(test)]
    fn rank_of(&self, id: usize) -> u8 {
        self.rank[id]
    }
}
