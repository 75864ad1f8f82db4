//! Deterministic seed derivation for replicate runs.

use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Upper bound (exclusive) on seeds handed to the MD engine.
pub const ENGINE_SEED_LIMIT: u64 = 100_000;

/// Derives the deterministic seed for a specific substream.
///
/// Substreams are derived by hashing `(master_seed, substream)` with
/// SipHash-1-3 under fixed zero keys, so the rule is stable across platforms.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}

/// Velocity seed written into the input template of replicate `copy`.
///
/// Never zero, since engines reject a zero seed.
pub fn replicate_seed(master_seed: u64, copy: usize) -> u64 {
    derive_substream_seed(master_seed, copy as u64) % (ENGINE_SEED_LIMIT - 1) + 1
}
