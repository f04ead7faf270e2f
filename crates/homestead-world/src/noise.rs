//! Seeded 2D simplex noise.
//!
//! The permutation table is a Fisher-Yates shuffle of `0..=255` drawn from
//! the caller's random source, duplicated to 512 entries so corner hashing
//! never wraps. Sampling is a pure function of the table.

use rand::Rng;

/// Skew factor `(sqrt(3) - 1) / 2`.
const F2: f64 = 0.366_025_403_784_438_6;

/// Unskew factor `(3 - sqrt(3)) / 6`.
const G2: f64 = 0.211_324_865_405_187_1;

/// Scales the summed corner contributions into roughly `[-1, 1]`.
const OUTPUT_SCALE: f64 = 70.0;

/// The twelve gradient directions (edges of a cube projected onto 2D).
const GRADIENTS: [(f64, f64); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

/// A deterministic 2D gradient noise field.
#[derive(Debug, Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl SimplexNoise {
    /// Build the permutation table from `rng`.
    ///
    /// The same random stream always yields the same field.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut p: [u8; 256] = core::array::from_fn(|i| u8::try_from(i).unwrap_or(u8::MAX));
        for i in (1..p.len()).rev() {
            let j = rng.random_range(0..=i);
            p.swap(i, j);
        }
        let perm = core::array::from_fn(|i| p.get(i & 0xFF).copied().unwrap_or(0));
        Self { perm }
    }

    fn perm_at(&self, idx: usize) -> usize {
        self.perm.get(idx).copied().map_or(0, usize::from)
    }

    fn gradient_index(&self, ii: usize, jj: usize) -> usize {
        self.perm_at(ii.saturating_add(self.perm_at(jj)))
            .checked_rem(GRADIENTS.len())
            .unwrap_or(0)
    }

    /// Sample the field at `(x, y)`. The result lies in `[-1, 1]`.
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Lower or upper triangle of the skewed cell.
        let (i1, j1): (u8, u8) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + G2;
        let y1 = y0 - f64::from(j1) + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = i.rem_euclid(256.0) as usize;
        let jj = j.rem_euclid(256.0) as usize;
        let (i1, j1) = (usize::from(i1), usize::from(j1));

        let gi0 = self.gradient_index(ii, jj);
        let gi1 = self.gradient_index(ii + i1, jj + j1);
        let gi2 = self.gradient_index(ii + 1, jj + 1);

        let n = corner(x0, y0, gi0) + corner(x1, y1, gi1) + corner(x2, y2, gi2);
        (OUTPUT_SCALE * n).clamp(-1.0, 1.0)
    }
}

#[allow(clippy::arithmetic_side_effects)]
fn corner(x: f64, y: f64, gi: usize) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let (gx, gy) = GRADIENTS.get(gi).copied().unwrap_or((0.0, 0.0));
    let t2 = t * t;
    t2 * t2 * (gx * x + gy * y)
}
