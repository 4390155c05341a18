//! In-place uniform permutation used by board generation and reshuffles.

use rand::Rng;

/// Shuffles `items` in place with the Fisher-Yates algorithm.
///
/// Walks from the back of the slice, swapping each element with a uniformly
/// chosen element at or before it, so every permutation is equally likely.
///
/// # Examples
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use tilelink::shuffle::shuffle_in_place;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let mut values = vec![1, 2, 3, 4, 5];
/// shuffle_in_place(&mut values, &mut rng);
/// values.sort_unstable();
/// assert_eq!(values, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle_in_place<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_shuffle_preserves_multiset() {
        let mut rng = SmallRng::seed_from_u64(42);
        let original: Vec<u16> = (0..64).map(|i| i % 7).collect();
        let mut shuffled = original.clone();
        shuffle_in_place(&mut shuffled, &mut rng);

        let mut a = original.clone();
        let mut b = shuffled.clone();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let mut first: Vec<u32> = (0..32).collect();
        let mut second = first.clone();
        shuffle_in_place(&mut first, &mut SmallRng::seed_from_u64(9));
        shuffle_in_place(&mut second, &mut SmallRng::seed_from_u64(9));
        assert_eq!(first, second);
        assert_ne!(first, (0..32).collect::<Vec<u32>>(), "32 items should not stay in order");
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        shuffle_in_place(&mut empty, &mut rng);
        let mut single = [5u8];
        shuffle_in_place(&mut single, &mut rng);
        assert_eq!(single, [5]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // The first element must be able to land anywhere.
        let mut rng = SmallRng::seed_from_u64(2024);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let mut values = [0u8, 1, 2, 3];
            shuffle_in_place(&mut values, &mut rng);
            let pos = values.iter().position(|&v| v == 0).unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
