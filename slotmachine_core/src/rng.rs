use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Default session RNG. Seeded from OS entropy unless a seed is given.

pub type SessionRng = StdRng;

pub fn entropy_rng() -> SessionRng {
    StdRng::from_entropy()
}

pub fn seeded_rng(seed: u64) -> SessionRng {
    StdRng::seed_from_u64(seed)
}

/// Draws `n` items from `pool` without replacement, in draw order.
///
/// Partial Fisher-Yates: each step picks uniformly among the items not yet
/// drawn and swaps it to the front. `pool` is left permuted.
///
/// `n` must not exceed `pool.len()`; release builds draw the whole pool.
pub fn draw_without_replacement<T: Copy, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &mut [T],
    n: usize,
) -> Vec<T> {
    debug_assert!(
        n <= pool.len(),
        "cannot draw {n} items from a pool of {}",
        pool.len()
    );
    let n = n.min(pool.len());
    for i in 0..n {
        let pick = rng.gen_range(i..pool.len());
        pool.swap(i, pick);
    }
    pool[..n].to_vec()
}
