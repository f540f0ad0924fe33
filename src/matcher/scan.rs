//! Exhaustive search of the best template placement inside a region.
use super::{AnchoredTemplate, GradePolicy, TemplateMatcher};
use crate::distance::DistanceField;
use crate::geometry::{PixelPoint, Rect};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Best placement found by [`TemplateMatcher::best_in`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateMatch {
    /// Pixel the anchor sits on.
    pub location: PixelPoint,
    pub distance: f64,
    pub grade: f64,
    /// Template footprint at `location`.
    pub bounds: Rect,
}

/// Lower distance first; ties resolved in row-major order.
fn better(a: &(PixelPoint, f64), b: &(PixelPoint, f64)) -> Ordering {
    a.1.total_cmp(&b.1)
        .then(a.0.y.cmp(&b.0.y))
        .then(a.0.x.cmp(&b.0.x))
}

fn best_in_row(
    anchored: &AnchoredTemplate,
    field: &DistanceField,
    y: i32,
    x0: i32,
    x1: i32,
) -> Option<(PixelPoint, f64)> {
    (x0..x1)
        .filter_map(|x| {
            anchored
                .evaluate(x, y, field)
                .map(|d| (PixelPoint::new(x, y), d))
        })
        .min_by(better)
}

impl<P: GradePolicy> TemplateMatcher<P> {
    /// Evaluate every in-field location of `region` and keep the lowest distance.
    pub fn best_in(
        &self,
        anchored: &AnchoredTemplate,
        region: Rect,
        field: &DistanceField,
    ) -> Option<TemplateMatch> {
        let extent = Rect::new(0, 0, field.width() as i32, field.height() as i32);
        let clip = region.intersection(&extent)?;
        let (x0, x1) = (clip.x, clip.x + clip.width);
        let rows = clip.y..clip.y + clip.height;

        #[cfg(feature = "parallel")]
        let best = rows
            .into_par_iter()
            .filter_map(|y| best_in_row(anchored, field, y, x0, x1))
            .min_by(better);
        #[cfg(not(feature = "parallel"))]
        let best = rows
            .filter_map(|y| best_in_row(anchored, field, y, x0, x1))
            .min_by(better);

        let (location, distance) = best?;
        debug!(
            "TemplateMatcher::best_in {} {} region {:?} -> ({}, {}) dist={:.3}",
            anchored.shape(),
            anchored.anchor(),
            clip,
            location.x,
            location.y,
            distance
        );
        Some(TemplateMatch {
            location,
            distance,
            grade: self.dist2grade(distance),
            bounds: anchored.bounds_at(location.x, location.y),
        })
    }
}
