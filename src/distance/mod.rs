//! Per-page distance field.
//!
//! A [`DistanceField`] stores, for every pixel, the chamfer distance to the
//! nearest ink pixel together with the normaliser that converts raw units to
//! pixels. It is built once per processed page and read-only afterwards; the
//! template matcher samples it at translated key-point positions.
pub mod chamfer;

use crate::image::{ImageF32, ImageU8};
use log::debug;
use std::time::Instant;
use thiserror::Error;

/// Errors raised while building a distance field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("distance field expects {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("negative or non-finite distance {value} at ({x}, {y})")]
    NegativeValue { x: usize, y: usize, value: f32 },

    #[error("normalizer must be finite and positive, got {0}")]
    InvalidNormalizer(f32),
}

/// Immutable map of distances to the nearest foreground pixel.
#[derive(Clone, Debug)]
pub struct DistanceField {
    values: ImageF32,
    normalizer: f32,
}

impl DistanceField {
    /// Wrap precomputed distances (row-major, `width * height` values).
    pub fn from_values(
        width: usize,
        height: usize,
        values: Vec<f32>,
        normalizer: f32,
    ) -> Result<Self, FieldError> {
        if !(normalizer.is_finite() && normalizer > 0.0) {
            return Err(FieldError::InvalidNormalizer(normalizer));
        }
        let actual = values.len();
        let values = ImageF32::from_vec(width, height, values).ok_or(
            FieldError::DimensionMismatch {
                expected: width * height,
                actual,
            },
        )?;
        if let Some(i) = values
            .data
            .iter()
            .position(|v| !(v.is_finite() && *v >= 0.0))
        {
            return Err(FieldError::NegativeValue {
                x: i % width.max(1),
                y: i / width.max(1),
                value: values.data[i],
            });
        }
        Ok(Self { values, normalizer })
    }

    /// Chamfer distances to the `true` pixels of a row-major foreground mask.
    pub fn from_foreground(width: usize, height: usize, mask: &[bool]) -> Result<Self, FieldError> {
        if mask.len() != width * height {
            return Err(FieldError::DimensionMismatch {
                expected: width * height,
                actual: mask.len(),
            });
        }
        let t0 = Instant::now();
        let data = chamfer::chamfer_distances(width, height, mask)
            .into_iter()
            .map(|d| d as f32)
            .collect();
        debug!(
            "DistanceField: chamfer transform {}x{} in {:.3} ms",
            width,
            height,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Self {
            values: ImageF32 {
                w: width,
                h: height,
                stride: width,
                data,
            },
            normalizer: chamfer::NORMALIZER,
        })
    }

    /// Distance field of a grayscale page; pixels darker than `ink_threshold` are ink.
    pub fn from_image(image: &ImageU8<'_>, ink_threshold: u8) -> Self {
        let mask = image.ink_mask(ink_threshold);
        let data = chamfer::chamfer_distances(image.w, image.h, &mask)
            .into_iter()
            .map(|d| d as f32)
            .collect();
        Self {
            values: ImageF32 {
                w: image.w,
                h: image.h,
                stride: image.w,
                data,
            },
            normalizer: chamfer::NORMALIZER,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.values.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.values.h
    }

    /// Raw units per pixel.
    #[inline]
    pub fn normalizer(&self) -> f32 {
        self.normalizer
    }

    /// `0 <= x < width && 0 <= y < height`.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.values.w && (y as usize) < self.values.h
    }

    /// Raw distance at `(x, y)`, `None` outside the field.
    #[inline]
    pub fn value(&self, x: i32, y: i32) -> Option<f32> {
        self.contains(x, y)
            .then(|| self.values.get(x as usize, y as usize))
    }

    /// Distance at `(x, y)` expressed in pixels.
    ///
    /// Divided in `f32`, the precision of template key points, so equal
    /// distances compare equal whatever the normalizer.
    pub fn normalized(&self, x: i32, y: i32) -> Option<f64> {
        self.value(x, y)
            .map(|v| f64::from(v / self.normalizer))
    }

    pub fn as_image(&self) -> &ImageF32 {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_predicate_matches_extent() {
        let field = DistanceField::from_values(4, 3, vec![0.0; 12], 3.0).expect("valid field");
        for y in -2..5 {
            for x in -2..6 {
                let inside = (0..4).contains(&x) && (0..3).contains(&y);
                assert_eq!(field.contains(x, y), inside, "({x}, {y})");
                assert_eq!(field.value(x, y).is_some(), inside);
            }
        }
    }

    #[test]
    fn from_values_validates_input() {
        assert_eq!(
            DistanceField::from_values(2, 2, vec![0.0; 3], 1.0).unwrap_err(),
            FieldError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert!(matches!(
            DistanceField::from_values(2, 2, vec![0.0, 1.0, -1.0, 0.0], 1.0),
            Err(FieldError::NegativeValue { x: 0, y: 1, .. })
        ));
        assert!(matches!(
            DistanceField::from_values(2, 2, vec![0.0; 4], 0.0),
            Err(FieldError::InvalidNormalizer(_))
        ));
    }

    #[test]
    fn image_field_is_zero_on_ink() {
        let (w, h) = (6, 4);
        let mut data = vec![255u8; w * h];
        data[w + 2] = 0;
        let img = ImageU8 {
            w,
            h,
            stride: w,
            data: &data,
        };
        let field = DistanceField::from_image(&img, 128);
        assert_eq!(field.value(2, 1), Some(0.0));
        assert_eq!(field.value(4, 1), Some(6.0));
        assert_eq!(field.normalized(4, 1), Some(2.0));
        assert_eq!(field.normalizer(), 3.0);
    }
}
