//! Randomness used by turn control.
//!
//! The engine never owns an RNG; callers pass a [`Dice`] into the operations
//! that need one, which keeps every rule reproducible under test.

use rand::Rng;

pub trait Dice {
    /// Uniform draw in `[0, 1)`.
    fn roll_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Adapts any [`rand::Rng`] into [`Dice`].
#[derive(Clone, Debug)]
pub struct RngDice<R>(pub R);

impl<R: Rng> Dice for RngDice<R> {
    fn roll_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn seeded_dice_stay_in_range_and_repeat() {
        let mut first = RngDice(StdRng::seed_from_u64(11));
        let mut second = RngDice(StdRng::seed_from_u64(11));

        for len in 1..50 {
            let roll = first.roll_unit();
            assert!((0.0..1.0).contains(&roll));
            assert_eq!(roll, second.roll_unit());

            let pick = first.pick(len);
            assert!(pick < len);
            assert_eq!(pick, second.pick(len));
        }
    }
}
