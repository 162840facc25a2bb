use rand::{Rng, thread_rng};

use crate::pool::POOL_SIZE;

pub const ROTATION_LEN: usize = 4;

/// The four pairwise-distinct pool indices currently assigned to one
/// client for one mode. Replaced wholesale, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation([u8; ROTATION_LEN]);

impl Rotation {
    /// Draw four distinct indices in [0, POOL_SIZE), redrawing on
    /// duplicates.
    pub fn draw() -> Self {
        let mut rng = thread_rng();

        let mut picks = [0u8; ROTATION_LEN];
        let mut filled = 0;

        while filled < ROTATION_LEN {
            let n = rng.gen_range(0..POOL_SIZE as u8);

            if !picks[..filled].contains(&n) {
                picks[filled] = n;
                filled += 1;
            }
        }

        Self(picks)
    }

    pub fn index(&self, position: usize) -> u8 {
        self.0[position]
    }

    pub fn indices(&self) -> [u8; ROTATION_LEN] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_are_distinct_and_in_range() {
        for _ in 0..10_000 {
            let rotation = Rotation::draw();
            let picks = rotation.indices();

            for (i, a) in picks.iter().enumerate() {
                assert!((*a as usize) < POOL_SIZE);
                for b in &picks[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }
}
