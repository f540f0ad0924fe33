//! Proportions used to synthesise note templates.
//!
//! Ratios are relative to the interline (distance between two staff lines).
//! Defaults follow the usual engraving proportions of common music fonts.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateParams {
    /// Width of a black or void head.
    pub head_width: f32,
    /// Height of every note symbol.
    pub head_height: f32,
    /// Width of a whole note.
    pub whole_width: f32,
    /// Scale applied to cue-size (small) variants.
    pub small_ratio: f32,
    /// Axes of the hole of void heads and whole notes, relative to the outer axes.
    pub hole_ratio: f32,
    /// Background ring (pixels) sampled around the symbol box.
    pub margin: usize,
    /// Weight of key points expected on ink.
    pub fore_weight: f32,
    /// Weight of key points expected off ink.
    pub back_weight: f32,
    /// Height of the left stem anchor, as a fraction of the symbol height from its top.
    pub left_stem_height: f32,
    /// Height of the right stem anchor, as a fraction of the symbol height from its top.
    pub right_stem_height: f32,
}

impl Default for TemplateParams {
    fn default() -> Self {
        Self {
            head_width: 1.25,
            head_height: 1.0,
            whole_width: 1.7,
            small_ratio: 0.67,
            hole_ratio: 0.5,
            margin: 2,
            fore_weight: 1.0,
            back_weight: 0.5,
            left_stem_height: 0.6,
            right_stem_height: 0.4,
        }
    }
}
