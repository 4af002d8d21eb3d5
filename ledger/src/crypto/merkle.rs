//! Binary Merkle tree over an ordered list of hashes.
//!
//! Transactions carry two of these: one over the blocks they spend from and
//! one over the transactions they spend from. The root is identity-critical,
//! so the construction is pinned down completely:
//!
//! ```text
//! leaf node     = BLAKE3(0x00 || leaf)
//! interior node = BLAKE3(0x01 || left || right)
//! odd level     = last node is promoted to the next level unchanged
//! empty list    = BLAKE3("")
//! ```
//!
//! Promoting instead of duplicating the odd node means `[a, b, c]` and
//! `[a, b, c, c]` have different roots. The leaf/node prefixes keep an
//! interior node from ever being replayed as a leaf.

use super::hash::{blake3_hash, blake3_hash_multi, Hash};
use crate::config::{MERKLE_LEAF_PREFIX, MERKLE_NODE_PREFIX};

/// Root of the empty sequence: the BLAKE3 hash of zero bytes.
pub fn empty_root() -> Hash {
    Hash::new(blake3_hash(&[]))
}

fn leaf_node(leaf: &Hash) -> Hash {
    Hash::new(blake3_hash_multi(&[&[MERKLE_LEAF_PREFIX], leaf.as_bytes()]))
}

fn interior_node(left: &Hash, right: &Hash) -> Hash {
    Hash::new(blake3_hash_multi(&[
        &[MERKLE_NODE_PREFIX],
        left.as_bytes(),
        right.as_bytes(),
    ]))
}

/// Compute the Merkle root of `leaves` without keeping the tree around.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return empty_root();
    }

    let mut level: Vec<Hash> = leaves.iter().map(leaf_node).collect();
    while level.len() > 1 {
        level = next_level(&level);
    }
    level[0]
}

fn next_level(level: &[Hash]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => interior_node(left, right),
            // Odd node out: promoted as-is.
            _ => pair[0],
        })
        .collect()
}

// ---------------------------------------------------------------------------
// MerkleTree
// ---------------------------------------------------------------------------

/// A fully materialized tree, kept for inclusion proofs.
///
/// `levels[0]` holds the hashed leaves and the last level holds the root.
/// An empty tree has no levels and reports [`empty_root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    leaves: Vec<Hash>,
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    pub fn new(leaves: Vec<Hash>) -> Self {
        let mut levels = Vec::new();
        if !leaves.is_empty() {
            let mut level: Vec<Hash> = leaves.iter().map(leaf_node).collect();
            while level.len() > 1 {
                let next = next_level(&level);
                levels.push(level);
                level = next;
            }
            levels.push(level);
        }
        Self { leaves, levels }
    }

    pub fn root(&self) -> Hash {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or_else(empty_root)
    }

    pub fn leaves(&self) -> &[Hash] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Number of levels including the leaf level and the root.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Inclusion proof for the leaf at `index`, or `None` if out of range.
    pub fn proof(&self, index: usize) -> Option<MerkleProof> {
        if index >= self.leaves.len() {
            return None;
        }

        let mut steps = Vec::with_capacity(self.levels.len());
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = position ^ 1;
            if let Some(hash) = level.get(sibling) {
                if position % 2 == 0 {
                    steps.push(ProofStep::Right(*hash));
                } else {
                    steps.push(ProofStep::Left(*hash));
                }
            }
            // No sibling: the node was promoted and the level adds no step.
            position /= 2;
        }

        Some(MerkleProof { index, steps })
    }
}

// ---------------------------------------------------------------------------
// MerkleProof
// ---------------------------------------------------------------------------

/// A sibling on the path from a leaf to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofStep {
    /// The sibling sits to the left of the running hash.
    Left(Hash),
    /// The sibling sits to the right of the running hash.
    Right(Hash),
}

/// Proof that a leaf sits at `index` in a tree with a given root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    pub index: usize,
    pub steps: Vec<ProofStep>,
}

impl MerkleProof {
    /// Recomputes the root from `leaf` and compares it to `root`.
    pub fn verify(&self, leaf: &Hash, root: &Hash) -> bool {
        let computed = self
            .steps
            .iter()
            .fold(leaf_node(leaf), |acc, step| match step {
                ProofStep::Left(sibling) => interior_node(sibling, &acc),
                ProofStep::Right(sibling) => interior_node(&acc, sibling),
            });
        computed == *root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(n: u8) -> Vec<Hash> {
        (0..n).map(|i| Hash::digest(&[i])).collect()
    }

    #[test]
    fn test_merkle_root_empty() {
        let root = merkle_root(&[]);
        assert_eq!(root, empty_root());
        assert_eq!(root, Hash::digest(b""));
        assert_eq!(MerkleTree::new(vec![]).root(), root);
    }

    #[test]
    fn test_merkle_root_single_leaf() {
        let leaf = Hash::digest(b"only child");
        let root = merkle_root(&[leaf]);
        let expected = Hash::new(blake3_hash_multi(&[&[0x00], leaf.as_bytes()]));
        assert_eq!(root, expected);
        assert_ne!(root, leaf, "a lone leaf is still hashed as a leaf");
    }

    #[test]
    fn test_merkle_root_two_leaves() {
        let a = Hash::digest(b"left");
        let b = Hash::digest(b"right");
        let expected = interior_node(&leaf_node(&a), &leaf_node(&b));
        assert_eq!(merkle_root(&[a, b]), expected);
    }

    #[test]
    fn test_merkle_root_odd_promotes_last() {
        let l = leaves(3);
        let expected = interior_node(
            &interior_node(&leaf_node(&l[0]), &leaf_node(&l[1])),
            &leaf_node(&l[2]),
        );
        assert_eq!(merkle_root(&l), expected);
    }

    #[test]
    fn test_odd_level_is_not_duplicated() {
        let l = leaves(3);
        let mut padded = l.clone();
        padded.push(l[2]);
        assert_ne!(merkle_root(&l), merkle_root(&padded));
    }

    #[test]
    fn test_merkle_root_order_matters() {
        let a = Hash::digest(b"first");
        let b = Hash::digest(b"second");
        assert_ne!(merkle_root(&[a, b]), merkle_root(&[b, a]));
    }

    #[test]
    fn test_merkle_root_deterministic() {
        let l = leaves(8);
        assert_eq!(merkle_root(&l), merkle_root(&l));
    }

    #[test]
    fn interior_node_cannot_pose_as_leaf() {
        let l = leaves(2);
        let inner = interior_node(&leaf_node(&l[0]), &leaf_node(&l[1]));
        assert_ne!(merkle_root(&[inner]), merkle_root(&l));
    }

    #[test]
    fn tree_root_matches_free_function() {
        for n in 0..=17 {
            let l = leaves(n);
            assert_eq!(MerkleTree::new(l.clone()).root(), merkle_root(&l), "n = {n}");
        }
    }

    #[test]
    fn tree_depth() {
        assert_eq!(MerkleTree::new(vec![]).depth(), 0);
        assert_eq!(MerkleTree::new(leaves(1)).depth(), 1);
        assert_eq!(MerkleTree::new(leaves(2)).depth(), 2);
        assert_eq!(MerkleTree::new(leaves(5)).depth(), 4);
    }

    #[test]
    fn proofs_verify_for_every_leaf() {
        for n in 1..=11 {
            let l = leaves(n);
            let tree = MerkleTree::new(l.clone());
            let root = tree.root();
            for (i, leaf) in l.iter().enumerate() {
                let proof = tree.proof(i).expect("index in range");
                assert!(proof.verify(leaf, &root), "n = {n}, i = {i}");
            }
        }
    }

    #[test]
    fn proof_rejects_wrong_leaf() {
        let l = leaves(6);
        let tree = MerkleTree::new(l.clone());
        let proof = tree.proof(4).unwrap();
        assert!(!proof.verify(&l[3], &tree.root()));
        assert!(!proof.verify(&l[4], &Hash::zero()));
    }

    #[test]
    fn proof_out_of_range() {
        assert!(MerkleTree::new(leaves(3)).proof(3).is_none());
        assert!(MerkleTree::new(vec![]).proof(0).is_none());
    }
}
