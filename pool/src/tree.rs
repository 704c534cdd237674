use serde::{Deserialize, Serialize};

use crate::merkle::{self, Path, PathNode};

pub const EMPTY_ROOT: [u8; 32] = [0u8; 32];

/// Append-only incremental hash tree over commitment leaves.
///
/// Adjacent nodes are paired and hashed bottom-up; an odd trailing node
/// at any level propagates unchanged to the parent level instead of
/// being hashed against a zero pad. The root therefore depends only on
/// real leaves and the depth grows as `ceil(log2(leaf_count))`.
///
/// `levels[0]` is the leaf sequence; `levels[d]` holds the single root
/// once at least one leaf is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentTree {
    levels: Vec<Vec<[u8; 32]>>,
}

fn depth_for(leaf_count: usize) -> usize {
    if leaf_count <= 1 {
        0
    } else {
        leaf_count.next_power_of_two().ilog2() as usize
    }
}

impl CommitmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// The empty tree has no meaningful root and reports the zero
    /// sentinel; a one-leaf tree's root is the leaf itself.
    pub fn root(&self) -> [u8; 32] {
        match self.levels.last() {
            Some(top) => top[0],
            None => EMPTY_ROOT,
        }
    }

    pub fn leaves(&self) -> &[[u8; 32]] {
        self.levels.first().map_or(&[], Vec::as_slice)
    }

    /// Appends `leaf` at the next free index and recomputes the path
    /// above it. Returns the new root and the leaf's index.
    pub fn insert(&mut self, leaf: [u8; 32]) -> ([u8; 32], u64) {
        let index = self.leaf_count();

        if self.levels.is_empty() {
            self.levels.push(Vec::new());
        }
        self.levels[0].push(leaf);

        let depth = depth_for(index + 1);
        while self.levels.len() < depth + 1 {
            self.levels.push(Vec::new());
        }

        let mut i = index;
        for l in 0..depth {
            let below = &self.levels[l];
            let parent_i = i / 2;
            let parent = if 2 * parent_i + 1 < below.len() {
                merkle::node(below[2 * parent_i], below[2 * parent_i + 1])
            } else {
                // odd trailing node, propagated unchanged
                below[2 * parent_i]
            };

            let above = &mut self.levels[l + 1];
            if parent_i < above.len() {
                above[parent_i] = parent;
            } else {
                above.push(parent);
            }

            i = parent_i;
        }

        (self.root(), index as u64)
    }

    /// Appends all `leaves` in order and rebuilds the upper levels in
    /// one pass. Yields the same root as inserting them one at a time.
    pub fn insert_many(&mut self, leaves: impl IntoIterator<Item = [u8; 32]>) -> [u8; 32] {
        if self.levels.is_empty() {
            self.levels.push(Vec::new());
        }
        self.levels[0].extend(leaves);

        let n = self.leaf_count();
        if n == 0 {
            self.levels.clear();
            return EMPTY_ROOT;
        }

        self.levels.truncate(1);
        for l in 0..depth_for(n) {
            let above = self.levels[l]
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => merkle::node(a, b),
                    [a] => *a,
                    _ => unreachable!(),
                })
                .collect();
            self.levels.push(above);
        }

        self.root()
    }

    /// Sibling path for the leaf at `index`. Levels where the node has
    /// no sibling (it was propagated) contribute no path element, so a
    /// one-leaf tree yields an empty path.
    pub fn proof(&self, index: usize) -> Path {
        assert!(index < self.leaf_count());

        let mut path = Vec::new();
        let mut i = index;

        for level in &self.levels[..self.depth()] {
            let sibling = i ^ 1;
            if sibling < level.len() {
                if i % 2 == 0 {
                    path.push(PathNode::Right(level[sibling]));
                } else {
                    path.push(PathNode::Left(level[sibling]));
                }
            }
            i /= 2;
        }

        path
    }
}
