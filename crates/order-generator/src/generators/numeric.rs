//! Numeric value generators.

use order_core::Price;
use rand::Rng;

/// Generate a price uniformly in `[min, max]`, rounded to the nearest cent.
///
/// The draw is continuous over the cent range and then rounded, so the result
/// always lands on the cent grid and inside the bounds.
pub fn generate_price<R: Rng>(rng: &mut R, min: Price, max: Price) -> Price {
    if min >= max {
        return min;
    }
    let raw = rng.gen_range(min.cents() as f64..=max.cents() as f64);
    let cents = (raw.round() as u64).clamp(min.cents(), max.cents());
    Price::from_cents(cents)
}

/// Generate a quantity in the given range (inclusive).
pub fn generate_quantity<R: Rng>(rng: &mut R, min: u32, max: u32) -> u32 {
    rng.gen_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_price_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let min = Price::from_cents(950);
        let max = Price::from_cents(1050);

        for _ in 0..1000 {
            let price = generate_price(&mut rng, min, max);
            assert!(price >= min && price <= max, "{price} out of range");
        }
    }

    #[test]
    fn test_generate_price_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let price = generate_price(&mut rng, Price::from_cents(1000), Price::from_cents(1000));
        assert_eq!(price.to_string(), "10.00");
    }

    #[test]
    fn test_generate_quantity() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen_min = false;
        let mut seen_max = false;

        for _ in 0..10_000 {
            let quantity = generate_quantity(&mut rng, 1, 100);
            assert!((1..=100).contains(&quantity));
            seen_min |= quantity == 1;
            seen_max |= quantity == 100;
        }

        // Both ends of the inclusive range are reachable
        assert!(seen_min && seen_max);
    }
}
