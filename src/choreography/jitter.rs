//! Bounded random relocation of the "No" button.
//!
//! Offsets are drawn per axis, independently and uniformly, within ±bound so
//! the button always stays reachable. The RNG is injected so tests can
//! assert bounds with a seeded generator.

use crate::script::TAUNT_LABELS;
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct ButtonJitter {
    bound_px: f32,
}

impl ButtonJitter {
    pub fn new(bound_px: f32) -> Self {
        Self { bound_px }
    }

    /// New on-screen offset, each axis uniform in `[-bound, +bound]`.
    pub fn offset<R: Rng>(&self, rng: &mut R) -> (f32, f32) {
        (
            rng.random_range(-self.bound_px..=self.bound_px),
            rng.random_range(-self.bound_px..=self.bound_px),
        )
    }

    /// Uniform pick from the taunt set. Repeats are fine.
    pub fn label<R: Rng>(&self, rng: &mut R) -> &'static str {
        TAUNT_LABELS[rng.random_range(0..TAUNT_LABELS.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn offsets_stay_within_bound() {
        let jitter = ButtonJitter::new(130.0);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let (x, y) = jitter.offset(&mut rng);
            assert!(x.abs() <= 130.0, "x out of bounds: {x}");
            assert!(y.abs() <= 130.0, "y out of bounds: {y}");
        }
    }

    #[test]
    fn labels_come_from_the_taunt_set() {
        let jitter = ButtonJitter::new(100.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let label = jitter.label(&mut rng);
            assert!(TAUNT_LABELS.contains(&label));
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let jitter = ButtonJitter::new(100.0);
        let a = jitter.offset(&mut StdRng::seed_from_u64(9));
        let b = jitter.offset(&mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
