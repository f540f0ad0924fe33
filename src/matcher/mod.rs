//! Anchored template matching against a page distance field.
//!
//! An [`AnchoredTemplate`] pairs a catalog template with a validated anchor.
//! [`TemplateMatcher`] places it on a target pixel, aggregates the key-point
//! discrepancies into a distance and turns that distance into a grade through a
//! [`GradePolicy`]. Locations outside the field produce no result rather than
//! an error; callers render "no data" for them.

mod grade;
mod scan;

pub use grade::{GradePolicy, LinearGradePolicy};
pub use scan::TemplateMatch;

use crate::distance::DistanceField;
use crate::geometry::{Offset, PixelPoint, Rect};
use crate::shape::Shape;
use crate::template::{is_compatible, Anchor, KeyPoint, Template, TemplateError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Matching knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchParams {
    /// Distance (pixels) at which the linear grade policy reaches 0.
    pub max_distance: f64,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self { max_distance: 1.5 }
    }
}

/// Template plus the anchor used to align it.
#[derive(Clone, Debug)]
pub struct AnchoredTemplate {
    template: Arc<Template>,
    anchor: Anchor,
    offset: Offset,
}

impl AnchoredTemplate {
    /// Fails with `IncompatibleAnchor` when `anchor` is not valid for the template shape.
    pub fn new(template: Arc<Template>, anchor: Anchor) -> Result<Self, TemplateError> {
        let shape = template.shape();
        if !is_compatible(shape, anchor) {
            return Err(TemplateError::IncompatibleAnchor { shape, anchor });
        }
        let offset = template.anchor_offset(anchor)?;
        Ok(Self {
            template,
            anchor,
            offset,
        })
    }

    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn shape(&self) -> Shape {
        self.template.shape()
    }

    /// Anchor offset from the template origin.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Template footprint when the anchor lands on `(x, y)`.
    pub fn bounds_at(&self, x: i32, y: i32) -> Rect {
        Rect::new(
            x - self.offset.x,
            y - self.offset.y,
            self.template.width(),
            self.template.height(),
        )
    }

    /// Raw aggregate distance with the anchor on `(x, y)`, `None` outside the field.
    pub fn evaluate(&self, x: i32, y: i32, field: &DistanceField) -> Option<f64> {
        if !field.contains(x, y) {
            return None;
        }
        self.template
            .evaluate_at_origin(x - self.offset.x, y - self.offset.y, field)
    }

    /// Key point lying exactly under `query` when the anchor sits on `reference`.
    pub fn key_point_at(&self, reference: PixelPoint, query: PixelPoint) -> Option<&KeyPoint> {
        let origin = self.bounds_at(reference.x, reference.y).origin();
        self.template.key_point_at(query - origin)
    }
}

/// Evaluates anchored templates and grades the result.
#[derive(Clone, Debug)]
pub struct TemplateMatcher<P: GradePolicy = LinearGradePolicy> {
    policy: P,
}

impl TemplateMatcher<LinearGradePolicy> {
    pub fn new(params: &MatchParams) -> Self {
        Self {
            policy: LinearGradePolicy::new(params.max_distance),
        }
    }
}

impl Default for TemplateMatcher<LinearGradePolicy> {
    fn default() -> Self {
        Self::new(&MatchParams::default())
    }
}

impl<P: GradePolicy> TemplateMatcher<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[inline]
    pub fn dist2grade(&self, distance: f64) -> f64 {
        self.policy.dist2grade(distance)
    }

    pub fn bounds_at(&self, anchored: &AnchoredTemplate, x: i32, y: i32) -> Rect {
        anchored.bounds_at(x, y)
    }

    pub fn evaluate(
        &self,
        anchored: &AnchoredTemplate,
        x: i32,
        y: i32,
        field: &DistanceField,
    ) -> Option<f64> {
        anchored.evaluate(x, y, field)
    }

    /// Grade of the anchored template at `(x, y)`, `None` outside the field.
    pub fn grade_at(
        &self,
        anchored: &AnchoredTemplate,
        x: i32,
        y: i32,
        field: &DistanceField,
    ) -> Option<f64> {
        self.evaluate(anchored, x, y, field)
            .map(|d| self.dist2grade(d))
    }

    /// Expected distance (pixels) of the key point under `query`, the anchor
    /// sitting on `reference`. `None` when no key point matches exactly.
    pub fn key_point_value(
        &self,
        anchored: &AnchoredTemplate,
        reference: PixelPoint,
        query: PixelPoint,
    ) -> Option<f64> {
        anchored
            .key_point_at(reference, query)
            .map(|kp| f64::from(kp.d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateParams;

    fn anchored(shape: Shape, anchor: Anchor) -> Result<AnchoredTemplate, TemplateError> {
        let t = Template::build(shape, 12, &TemplateParams::default())?;
        AnchoredTemplate::new(Arc::new(t), anchor)
    }

    #[test]
    fn incompatible_anchor_is_refused() {
        assert_eq!(
            anchored(Shape::WholeNoteSmall, Anchor::RightStem).unwrap_err(),
            TemplateError::IncompatibleAnchor {
                shape: Shape::WholeNoteSmall,
                anchor: Anchor::RightStem
            }
        );
        assert!(anchored(Shape::WholeNoteSmall, Anchor::MiddleLeft).is_ok());
    }

    #[test]
    fn outside_field_yields_nothing() {
        let at = anchored(Shape::NoteheadBlack, Anchor::LeftStem).expect("anchored");
        let field = DistanceField::from_values(30, 20, vec![0.0; 600], 3.0).expect("field");
        let matcher = TemplateMatcher::default();
        assert!(matcher.evaluate(&at, 30, 5, &field).is_none());
        assert!(matcher.evaluate(&at, -1, 5, &field).is_none());
        assert!(matcher.grade_at(&at, 5, 20, &field).is_none());
        assert!(matcher.evaluate(&at, 29, 19, &field).is_some());
    }

    #[test]
    fn key_point_value_uses_bounds_origin() {
        let at = anchored(Shape::NoteheadVoid, Anchor::MiddleLeft).expect("anchored");
        let matcher = TemplateMatcher::default();
        let reference = PixelPoint::new(100, 100);
        let origin = at.bounds_at(100, 100).origin();
        // template corner lies in the margin ring, off ink
        let corner = matcher
            .key_point_value(&at, reference, origin)
            .expect("corner key point");
        assert!(corner > 0.0);
        let outside = PixelPoint::new(origin.x - 1, origin.y);
        assert!(matcher
            .key_point_value(&at, reference, outside)
            .is_none());
    }
}
