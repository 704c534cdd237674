use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::{Digest, Hash};

pub fn node(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> [u8; 32] {
    let mut hasher = Hash::new();
    hasher.update(b"POOL_MERKLE_NODE");
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}

pub type Path = Vec<PathNode>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathNode {
    Left([u8; 32]),
    Right([u8; 32]),
}

/// Recomputes the root implied by `leaf` and a sibling path. Levels
/// where the node had no sibling contribute no path element, so the
/// path may be shorter than the tree depth.
pub fn path_root(leaf: [u8; 32], path: impl IntoIterator<Item: Borrow<PathNode>>) -> [u8; 32] {
    let mut computed = leaf;

    for path_node in path.into_iter() {
        match path_node.borrow() {
            PathNode::Left(sibling) => {
                computed = node(sibling, computed);
            }
            PathNode::Right(sibling) => {
                computed = node(computed, sibling);
            }
        }
    }

    computed
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_node_order_matters() {
        let (a, b) = ([1u8; 32], [2u8; 32]);
        assert_ne!(node(a, b), node(b, a));
    }

    #[test]
    fn test_path_root_empty_path_is_leaf() {
        let leaf = [7u8; 32];
        assert_eq!(path_root(leaf, [] as [PathNode; 0]), leaf);
    }

    #[test]
    fn test_path_root_two_leaves() {
        let (a, b) = ([1u8; 32], [2u8; 32]);
        let root = node(a, b);

        assert_eq!(path_root(a, [PathNode::Right(b)]), root);
        assert_eq!(path_root(b, [PathNode::Left(a)]), root);
    }
}
