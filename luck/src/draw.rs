use std::{collections::VecDeque, ops::RangeInclusive};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::error::DrawError;

/// Source of the integer a [`crate::LuckHandler`] compares against its reference.
pub trait Draw {
    fn draw(&mut self, range: &RangeInclusive<u32>) -> Result<u32, DrawError>;
}

/// Uniform draws from a pseudo-random generator.
pub struct RngDraw<R> {
    rng: R,
}

impl<R> RngDraw<R>
where
    R: Rng,
{
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDraw<ChaCha12Rng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha12Rng::seed_from_u64(seed))
    }
}

impl<R> Draw for RngDraw<R>
where
    R: Rng,
{
    fn draw(&mut self, range: &RangeInclusive<u32>) -> Result<u32, DrawError> {
        if range.is_empty() {
            return Err(DrawError::EmptyRange {
                start: *range.start(),
                end: *range.end(),
            });
        }
        Ok(self.rng.gen_range(range.clone()))
    }
}

/// Replays pre-chosen values in order.
#[derive(Debug, Default, Clone)]
pub struct ScriptedDraw {
    values: VecDeque<u32>,
}

impl ScriptedDraw {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Draw for ScriptedDraw {
    fn draw(&mut self, range: &RangeInclusive<u32>) -> Result<u32, DrawError> {
        if range.is_empty() {
            return Err(DrawError::EmptyRange {
                start: *range.start(),
                end: *range.end(),
            });
        }
        let value = self.values.pop_front().ok_or(DrawError::Exhausted)?;
        if !range.contains(&value) {
            return Err(DrawError::OutOfRange {
                value,
                start: *range.start(),
                end: *range.end(),
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_draw_stays_in_range() {
        let range = 3..=6;
        let mut draw = RngDraw::from_seed(0);
        for _ in 0..10_000 {
            let value = draw.draw(&range).unwrap();
            assert!(range.contains(&value), "{value} escaped {range:?}");
        }
    }

    #[test]
    fn test_rng_draw_is_reproducible() {
        let range = 3..=6;
        let mut a = RngDraw::from_seed(7);
        let mut b = RngDraw::from_seed(7);
        for _ in 0..100 {
            assert_eq!(a.draw(&range).unwrap(), b.draw(&range).unwrap());
        }
    }

    #[test]
    fn test_rng_draw_empty_range() {
        let mut draw = RngDraw::from_seed(0);
        #[allow(clippy::reversed_empty_ranges)]
        let range = 6..=3;
        assert!(matches!(
            draw.draw(&range),
            Err(DrawError::EmptyRange { start: 6, end: 3 })
        ));
        // The generator is still usable afterwards.
        assert!((3..=6).contains(&draw.draw(&(3..=6)).unwrap()));
    }

    #[test]
    fn test_scripted_draw_empty_range() {
        let mut draw = ScriptedDraw::new([4]);
        #[allow(clippy::reversed_empty_ranges)]
        let range = 6..=3;
        assert!(matches!(
            draw.draw(&range),
            Err(DrawError::EmptyRange { start: 6, end: 3 })
        ));
        // Nothing was consumed by the rejected draw.
        assert_eq!(draw.remaining(), 1);
    }

    #[test]
    fn test_scripted_draw() {
        let range = 3..=6;
        let mut draw = ScriptedDraw::new([4, 6]);
        assert_eq!(draw.draw(&range).unwrap(), 4);
        assert_eq!(draw.remaining(), 1);
        assert_eq!(draw.draw(&range).unwrap(), 6);
        assert!(matches!(draw.draw(&range), Err(DrawError::Exhausted)));
    }

    #[test]
    fn test_scripted_draw_out_of_range() {
        let mut draw = ScriptedDraw::new([2, 7]);
        for expected in [2, 7] {
            match draw.draw(&(3..=6)) {
                Err(DrawError::OutOfRange { value, start, end }) => {
                    assert_eq!((value, start, end), (expected, 3, 6));
                }
                other => panic!("unexpected draw: {other:?}"),
            }
        }
    }
}
