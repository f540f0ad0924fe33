use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named reference offset inside a template box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Anchor {
    /// Where a stem attaches on the left side of a head.
    LeftStem,
    /// Where a stem attaches on the right side of a head.
    RightStem,
    /// Left edge of the symbol, at mid height.
    MiddleLeft,
}

impl Anchor {
    pub const ALL: [Anchor; 3] = [Anchor::LeftStem, Anchor::RightStem, Anchor::MiddleLeft];

    pub fn name(self) -> &'static str {
        match self {
            Anchor::LeftStem => "LEFT_STEM",
            Anchor::RightStem => "RIGHT_STEM",
            Anchor::MiddleLeft => "MIDDLE_LEFT",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const HEAD_ANCHORS: [Anchor; 3] = Anchor::ALL;
const WHOLE_ANCHORS: [Anchor; 1] = [Anchor::MiddleLeft];

/// Anchors a template of `shape` exposes; empty for shapes without template.
pub fn permitted_anchors(shape: Shape) -> &'static [Anchor] {
    if !shape.is_template_note() {
        &[]
    } else if shape.is_whole() {
        &WHOLE_ANCHORS
    } else {
        &HEAD_ANCHORS
    }
}

/// Whether `anchor` may be used with the template of `shape`.
///
/// Whole notes go with `MiddleLeft` only, heads go with both stem anchors
/// plus `MiddleLeft`.
pub fn is_compatible(shape: Shape, anchor: Anchor) -> bool {
    permitted_anchors(shape).contains(&anchor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_notes_only_accept_middle_left() {
        for shape in [Shape::WholeNote, Shape::WholeNoteSmall] {
            assert!(is_compatible(shape, Anchor::MiddleLeft));
            assert!(!is_compatible(shape, Anchor::LeftStem));
            assert!(!is_compatible(shape, Anchor::RightStem));
        }
    }

    #[test]
    fn heads_accept_every_anchor() {
        for shape in Shape::TEMPLATE_NOTES.iter().filter(|s| !s.is_whole()) {
            for anchor in Anchor::ALL {
                assert!(is_compatible(*shape, anchor), "{shape} / {anchor}");
            }
        }
    }

    #[test]
    fn shapes_without_template_accept_nothing() {
        assert!(permitted_anchors(Shape::Sharp).is_empty());
        assert!(!is_compatible(Shape::Stem, Anchor::LeftStem));
    }
}
