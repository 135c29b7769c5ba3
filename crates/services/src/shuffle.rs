use rand::Rng;

/// Returns a uniformly random permutation of `items`; the input is never
/// mutated.
#[must_use]
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, &mut rand::rng());
    out
}

/// Fisher–Yates over the whole slice: walk from the back, swapping each
/// element with a uniformly chosen one at or before it. O(n) and unbiased.
///
/// The generator is a parameter so tests can drive a seeded `StdRng`.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
