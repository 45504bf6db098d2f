//! Uniform selection from a fixed set of values.

use rand::Rng;

/// Pick one value uniformly from `values`.
///
/// Returns `None` only for an empty slice. A single-element slice is returned
/// without touching the RNG.
pub fn generate_one_of<'a, R: Rng, T>(rng: &mut R, values: &'a [T]) -> Option<&'a T> {
    match values.len() {
        0 => None,
        1 => values.first(),
        len => values.get(rng.gen_range(0..len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_of_covers_all_values() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = ["AAPL", "GOOG", "MSFT", "TSLA"];
        let mut counts = [0usize; 4];

        for _ in 0..4000 {
            let picked = generate_one_of(&mut rng, &values).unwrap();
            let idx = values.iter().position(|v| v == picked).unwrap();
            counts[idx] += 1;
        }

        for count in counts {
            assert!(count > 800, "skewed distribution: {counts:?}");
        }
    }

    #[test]
    fn test_one_of_edge_cases() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: [u8; 0] = [];
        assert_eq!(generate_one_of(&mut rng, &empty), None);
        assert_eq!(generate_one_of(&mut rng, &["LIMIT"]), Some(&"LIMIT"));
    }
}
