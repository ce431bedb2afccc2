//! Binary SHA-256 merkle trees over 32-byte leaves, as used by the deposit contract and the
//! batched block roots.

use alloy_primitives::B256;
use anyhow::ensure;

mod hash;
mod index;

use hash::hash_concat;
use index::{generalized_index_child, generalized_index_from_leaf_index, get_generalized_index_bit};

/// Build the full tree in generalized-index order, `tree[1]` is the root.
pub fn merkle_tree(leaves: &[B256], depth: u64) -> anyhow::Result<Vec<B256>> {
    ensure!(depth < 32, "Depth {depth} is too large to materialize");
    let num_of_leaves = leaves.len();
    let bottom_length = 1 << depth;
    ensure!(
        num_of_leaves <= bottom_length,
        "Number of leaves is greater than the bottom length (depth too small)"
    );

    let mut tree = vec![B256::ZERO; bottom_length];
    tree.extend(leaves);
    tree.extend(vec![B256::ZERO; bottom_length - num_of_leaves]);

    for i in (1..bottom_length).rev() {
        let left = tree[i * 2].as_slice();
        let right = tree[i * 2 + 1].as_slice();
        tree[i] = hash_concat(left, right);
    }

    Ok(tree)
}

/// Return the merkle root of ``leaves``, whose length must be a power of two.
pub fn merkle_root(leaves: &[B256]) -> anyhow::Result<B256> {
    ensure!(
        leaves.len().is_power_of_two(),
        "Number of leaves must be a power of two, got {}",
        leaves.len()
    );
    let depth = leaves.len().trailing_zeros() as u64;
    Ok(merkle_tree(leaves, depth)?[1])
}

pub fn generate_proof(tree: &[B256], index: u64, depth: u64) -> anyhow::Result<Vec<B256>> {
    // A tree of 2 << depth nodes must still be countable in a u64.
    ensure!(depth < 63, "Depth {depth} is too large");
    let bottom_length = 1u64 << depth;
    ensure!(index < bottom_length, "Index out of bounds");
    ensure!(
        tree.len() as u64 == 2 * bottom_length,
        "Tree does not have depth {depth}"
    );

    let mut proof = vec![];
    let mut current_index = 1;
    let mut current_depth = depth;

    while current_depth > 0 {
        let (left_child_index, right_child_index) = (
            generalized_index_child(current_index, false),
            generalized_index_child(current_index, true),
        );

        if get_generalized_index_bit(index, current_depth - 1) {
            proof.push(tree[left_child_index as usize]);
            current_index = right_child_index;
        } else {
            proof.push(tree[right_child_index as usize]);
            current_index = left_child_index;
        }

        current_depth -= 1;
    }

    debug_assert_eq!(current_index, generalized_index_from_leaf_index(index, depth));
    proof.reverse();

    Ok(proof)
}

/// Check that ``leaf`` at ``index`` of a tree of ``depth`` hashes up to ``root`` along
/// ``branch``. A branch shorter than ``depth`` is never valid.
pub fn is_valid_merkle_branch(
    leaf: B256,
    branch: &[B256],
    depth: u64,
    index: u64,
    root: B256,
) -> bool {
    if (branch.len() as u64) < depth {
        return false;
    }

    let mut value = leaf;
    for i in 0..depth {
        if get_generalized_index_bit(index, i) {
            value = hash_concat(branch[i as usize].as_slice(), value.as_slice());
        } else {
            value = hash_concat(value.as_slice(), branch[i as usize].as_slice());
        }
    }
    value == root
}
