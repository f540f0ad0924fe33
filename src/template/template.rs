use super::anchor::{is_compatible, permitted_anchors, Anchor};
use super::params::TemplateParams;
use super::render::render_symbol;
use super::TemplateError;
use crate::distance::chamfer::{chamfer_distances, NORMALIZER};
use crate::distance::DistanceField;
use crate::geometry::{Offset, PixelPoint, Rect};
use crate::shape::Shape;
use log::trace;
use serde::Serialize;
use std::collections::BTreeMap;

/// Template sample: offset from the template origin and expected distance in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KeyPoint {
    pub x: i32,
    pub y: i32,
    pub d: f32,
}

impl KeyPoint {
    pub const fn new(x: i32, y: i32, d: f32) -> Self {
        Self { x, y, d }
    }

    /// Expected on ink.
    #[inline]
    pub fn is_foreground(&self) -> bool {
        self.d == 0.0
    }

    #[inline]
    pub fn offset(&self) -> Offset {
        Offset::new(self.x, self.y)
    }
}

/// Key-point constellation of one shape at one interline.
///
/// Key points and anchors are relative to the template box, whose origin is
/// its top-left corner; they never depend on a target location.
#[derive(Clone, Debug)]
pub struct Template {
    shape: Shape,
    interline: u32,
    width: i32,
    height: i32,
    symbol: Rect,
    key_points: Vec<KeyPoint>,
    anchors: BTreeMap<Anchor, Offset>,
    fore_weight: f64,
    back_weight: f64,
}

impl Template {
    /// Render `shape` at `interline` and sample every pixel of the template box.
    pub fn build(
        shape: Shape,
        interline: u32,
        params: &TemplateParams,
    ) -> Result<Self, TemplateError> {
        if interline == 0 {
            return Err(TemplateError::InvalidScale(interline));
        }
        let symbol =
            render_symbol(shape, interline, params).ok_or(TemplateError::UnknownShape(shape))?;
        let m = params.margin;
        let (w, h) = (symbol.width + 2 * m, symbol.height + 2 * m);

        let mut mask = vec![false; w * h];
        for sy in 0..symbol.height {
            for sx in 0..symbol.width {
                mask[(sy + m) * w + sx + m] = symbol.pixels[sy * symbol.width + sx];
            }
        }
        let distances = chamfer_distances(w, h, &mask);
        let key_points = distances
            .iter()
            .enumerate()
            .map(|(i, &d)| KeyPoint::new((i % w) as i32, (i / w) as i32, d as f32 / NORMALIZER))
            .collect();

        let (mi, sw, sh) = (m as i32, symbol.width as i32, symbol.height as i32);
        let stem_y = |ratio: f32| mi + ((sh as f32 * ratio).round() as i32).clamp(0, sh - 1);
        let anchors = permitted_anchors(shape)
            .iter()
            .map(|&anchor| {
                let offset = match anchor {
                    Anchor::MiddleLeft => Offset::new(mi, mi + sh / 2),
                    Anchor::LeftStem => Offset::new(mi, stem_y(params.left_stem_height)),
                    Anchor::RightStem => Offset::new(mi + sw - 1, stem_y(params.right_stem_height)),
                };
                (anchor, offset)
            })
            .collect();

        Ok(Self {
            shape,
            interline,
            width: w as i32,
            height: h as i32,
            symbol: Rect::new(mi, mi, sw, sh),
            key_points,
            anchors,
            fore_weight: f64::from(params.fore_weight),
            back_weight: f64::from(params.back_weight),
        })
    }

    /// Assemble a template from explicit key points and anchor offsets.
    ///
    /// Every key point and anchor must lie inside the `width × height` box and
    /// every anchor must be compatible with `shape`. Weights default to
    /// [`TemplateParams::default`].
    pub fn from_parts(
        shape: Shape,
        interline: u32,
        width: i32,
        height: i32,
        key_points: Vec<KeyPoint>,
        anchors: impl IntoIterator<Item = (Anchor, Offset)>,
    ) -> Result<Self, TemplateError> {
        if interline == 0 {
            return Err(TemplateError::InvalidScale(interline));
        }
        if !shape.is_template_note() {
            return Err(TemplateError::UnknownShape(shape));
        }
        let bounds = Rect::new(0, 0, width, height);
        if bounds.is_empty() {
            return Err(TemplateError::InvalidTemplate(format!(
                "empty box {width}x{height}"
            )));
        }
        if let Some(kp) = key_points
            .iter()
            .find(|kp| !bounds.contains(&PixelPoint::new(kp.x, kp.y)) || !(kp.d >= 0.0))
        {
            return Err(TemplateError::InvalidTemplate(format!(
                "key point ({}, {}, {}) outside box or negative",
                kp.x, kp.y, kp.d
            )));
        }
        let mut map = BTreeMap::new();
        for (anchor, offset) in anchors {
            if !is_compatible(shape, anchor) {
                return Err(TemplateError::IncompatibleAnchor { shape, anchor });
            }
            if !bounds.contains(&PixelPoint::from(offset)) {
                return Err(TemplateError::InvalidTemplate(format!(
                    "anchor {anchor} at ({}, {}) outside box",
                    offset.x, offset.y
                )));
            }
            map.insert(anchor, offset);
        }
        let params = TemplateParams::default();
        Ok(Self {
            shape,
            interline,
            width,
            height,
            symbol: bounds,
            key_points,
            anchors: map,
            fore_weight: f64::from(params.fore_weight),
            back_weight: f64::from(params.back_weight),
        })
    }

    /// Override the weights of foreground and background key points.
    pub fn with_weights(mut self, fore: f64, back: f64) -> Self {
        self.fore_weight = fore;
        self.back_weight = back;
        self
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn interline(&self) -> u32 {
        self.interline
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Template box in its own frame.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Symbol box (template box minus the margin ring) in the template frame.
    pub fn symbol_bounds(&self) -> Rect {
        self.symbol
    }

    pub fn key_points(&self) -> &[KeyPoint] {
        &self.key_points
    }

    pub fn anchors(&self) -> impl Iterator<Item = (Anchor, Offset)> + '_ {
        self.anchors.iter().map(|(a, o)| (*a, *o))
    }

    /// Offset of `anchor` from the template origin.
    pub fn anchor_offset(&self, anchor: Anchor) -> Result<Offset, TemplateError> {
        self.anchors
            .get(&anchor)
            .copied()
            .ok_or(TemplateError::IncompatibleAnchor {
                shape: self.shape,
                anchor,
            })
    }

    /// Template footprint in image coordinates when `anchor` lands on `(x, y)`.
    pub fn bounds_at(&self, x: i32, y: i32, anchor: Anchor) -> Result<Rect, TemplateError> {
        let offset = self.anchor_offset(anchor)?;
        Ok(Rect::new(x - offset.x, y - offset.y, self.width, self.height))
    }

    /// Key point located exactly at `local` (template frame), if any.
    pub fn key_point_at(&self, local: Offset) -> Option<&KeyPoint> {
        self.key_points
            .iter()
            .find(|kp| kp.x == local.x && kp.y == local.y)
    }

    /// Weighted mean discrepancy (pixels) between expected and actual distances
    /// with `anchor` placed on `(x, y)`.
    ///
    /// `Ok(None)` when `(x, y)` lies outside the field, or when no key point
    /// lands inside it. Key points falling off the field are skipped.
    pub fn evaluate(
        &self,
        x: i32,
        y: i32,
        anchor: Anchor,
        field: &DistanceField,
    ) -> Result<Option<f64>, TemplateError> {
        let offset = self.anchor_offset(anchor)?;
        if !field.contains(x, y) {
            return Ok(None);
        }
        let dist = self.evaluate_at_origin(x - offset.x, y - offset.y, field);
        trace!(
            "Template {} {} at ({}, {}) -> {:?}",
            self.shape,
            anchor,
            x,
            y,
            dist
        );
        Ok(dist)
    }

    pub(crate) fn evaluate_at_origin(
        &self,
        ox: i32,
        oy: i32,
        field: &DistanceField,
    ) -> Option<f64> {
        let mut total = 0.0f64;
        let mut weights = 0.0f64;
        for kp in &self.key_points {
            let Some(actual) = field.normalized(ox + kp.x, oy + kp.y) else {
                continue;
            };
            let w = if kp.is_foreground() {
                self.fore_weight
            } else {
                self.back_weight
            };
            total += w * (actual - f64::from(kp.d)).abs();
            weights += w;
        }
        (weights > 0.0).then(|| total / weights)
    }
}
