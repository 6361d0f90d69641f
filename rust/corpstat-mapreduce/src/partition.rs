//! Hash partitioning of intermediate keys across reduce units.
//!
//! Partition functions must be pure and stable across processes, so they hash with
//! a fixed-seed xxh3 rather than `std`'s randomized hasher.

use xxhash_rust::xxh3::{Xxh3, xxh3_64};

/// Maps a byte string to a reduce unit in `0..partitions_count`.
pub fn hash_partition(bytes: &[u8], partitions_count: usize) -> usize {
    reduce_hash(xxh3_64(bytes), partitions_count)
}

/// Maps a composite key, given as its component byte strings, to a reduce unit.
///
/// Components are length-prefixed, so `("ab", "c")` and `("a", "bc")` hash differently.
pub fn hash_partition_parts(parts: &[&[u8]], partitions_count: usize) -> usize {
    let mut hasher = Xxh3::new();
    for part in parts {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    reduce_hash(hasher.digest(), partitions_count)
}

#[inline]
fn reduce_hash(hash: u64, partitions_count: usize) -> usize {
    debug_assert!(partitions_count > 0);
    (hash % partitions_count.max(1) as u64) as usize
}
