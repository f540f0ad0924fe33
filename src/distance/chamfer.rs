//! Two-pass 3-4 chamfer distance transform.
//!
//! Orthogonal steps cost 3 and diagonal steps cost 4, so one pixel of
//! orthogonal distance is worth [`NORMALIZER`] units. The forward pass
//! propagates from the top-left neighbours, the backward pass from the
//! bottom-right ones; together they give the classic chamfer approximation of
//! the Euclidean distance to the nearest foreground pixel.

/// Cost of a horizontal or vertical step.
pub const ORTHOGONAL_STEP: u32 = 3;
/// Cost of a diagonal step.
pub const DIAGONAL_STEP: u32 = 4;
/// Units per pixel of orthogonal distance.
pub const NORMALIZER: f32 = ORTHOGONAL_STEP as f32;

/// Value assigned to every pixel when the mask holds no foreground at all.
///
/// Strictly larger than any distance reachable inside a `w × h` grid.
pub fn unreachable_value(w: usize, h: usize) -> u32 {
    DIAGONAL_STEP * (w + h) as u32 + DIAGONAL_STEP
}

/// Chamfer distance of every pixel to the nearest `true` pixel of `mask`.
///
/// `mask` is row-major with `mask.len() == w * h` (checked by callers).
pub fn chamfer_distances(w: usize, h: usize, mask: &[bool]) -> Vec<u32> {
    debug_assert_eq!(mask.len(), w * h);
    let far = unreachable_value(w, h);
    let mut d: Vec<u32> = mask.iter().map(|&ink| if ink { 0 } else { far }).collect();

    // forward
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let mut v = d[i];
            if v == 0 {
                continue;
            }
            if x > 0 {
                v = v.min(d[i - 1] + ORTHOGONAL_STEP);
            }
            if y > 0 {
                v = v.min(d[i - w] + ORTHOGONAL_STEP);
                if x > 0 {
                    v = v.min(d[i - w - 1] + DIAGONAL_STEP);
                }
                if x + 1 < w {
                    v = v.min(d[i - w + 1] + DIAGONAL_STEP);
                }
            }
            d[i] = v.min(far);
        }
    }

    // backward
    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let i = y * w + x;
            let mut v = d[i];
            if v == 0 {
                continue;
            }
            if x + 1 < w {
                v = v.min(d[i + 1] + ORTHOGONAL_STEP);
            }
            if y + 1 < h {
                v = v.min(d[i + w] + ORTHOGONAL_STEP);
                if x + 1 < w {
                    v = v.min(d[i + w + 1] + DIAGONAL_STEP);
                }
                if x > 0 {
                    v = v.min(d[i + w - 1] + DIAGONAL_STEP);
                }
            }
            d[i] = v.min(far);
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_seed_gives_chamfer_rings() {
        let (w, h) = (5, 5);
        let mut mask = vec![false; w * h];
        mask[2 * w + 2] = true;
        let d = chamfer_distances(w, h, &mask);
        assert_eq!(d[2 * w + 2], 0);
        assert_eq!(d[2 * w + 3], 3);
        assert_eq!(d[w + 1], 4);
        assert_eq!(d[0], 8);
        assert_eq!(d[2 * w], 6);
        // knight move: one diagonal plus one orthogonal step
        assert_eq!(d[4 * w + 3], 7);
    }

    #[test]
    fn empty_mask_is_unreachable_everywhere() {
        let d = chamfer_distances(4, 3, &[false; 12]);
        assert!(d.iter().all(|&v| v == unreachable_value(4, 3)));
    }

    #[test]
    fn distances_are_symmetric_around_a_vertical_bar() {
        let (w, h) = (7, 3);
        let mask: Vec<bool> = (0..w * h).map(|i| i % w == 3).collect();
        let d = chamfer_distances(w, h, &mask);
        for y in 0..h {
            for k in 1..=3 {
                assert_eq!(d[y * w + 3 - k], d[y * w + 3 + k]);
                assert_eq!(d[y * w + 3 - k], 3 * k as u32);
            }
        }
    }
}
