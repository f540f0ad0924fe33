//! Shapes that inters may carry, and the subset eligible for template matching.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shape {
    NoteheadBlack,
    NoteheadBlackSmall,
    NoteheadVoid,
    NoteheadVoidSmall,
    WholeNote,
    WholeNoteSmall,
    Stem,
    Beam,
    Ledger,
    Sharp,
    Flat,
    Natural,
    AugmentationDot,
    Slur,
}

/// Family a template-note shape belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteFamily {
    /// Filled head, attached to a stem.
    Black,
    /// Hollow head, attached to a stem.
    Void,
    /// Hollow stemless note.
    Whole,
}

impl Shape {
    /// Shapes for which a matching template exists.
    pub const TEMPLATE_NOTES: [Shape; 6] = [
        Shape::NoteheadBlack,
        Shape::NoteheadBlackSmall,
        Shape::NoteheadVoid,
        Shape::NoteheadVoidSmall,
        Shape::WholeNote,
        Shape::WholeNoteSmall,
    ];

    pub fn note_family(self) -> Option<NoteFamily> {
        match self {
            Shape::NoteheadBlack | Shape::NoteheadBlackSmall => Some(NoteFamily::Black),
            Shape::NoteheadVoid | Shape::NoteheadVoidSmall => Some(NoteFamily::Void),
            Shape::WholeNote | Shape::WholeNoteSmall => Some(NoteFamily::Whole),
            _ => None,
        }
    }

    pub fn is_template_note(self) -> bool {
        self.note_family().is_some()
    }

    pub fn is_whole(self) -> bool {
        self.note_family() == Some(NoteFamily::Whole)
    }

    /// Cue-size variant of a note shape.
    pub fn is_small(self) -> bool {
        matches!(
            self,
            Shape::NoteheadBlackSmall | Shape::NoteheadVoidSmall | Shape::WholeNoteSmall
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::NoteheadBlack => "NOTEHEAD_BLACK",
            Shape::NoteheadBlackSmall => "NOTEHEAD_BLACK_SMALL",
            Shape::NoteheadVoid => "NOTEHEAD_VOID",
            Shape::NoteheadVoidSmall => "NOTEHEAD_VOID_SMALL",
            Shape::WholeNote => "WHOLE_NOTE",
            Shape::WholeNoteSmall => "WHOLE_NOTE_SMALL",
            Shape::Stem => "STEM",
            Shape::Beam => "BEAM",
            Shape::Ledger => "LEDGER",
            Shape::Sharp => "SHARP",
            Shape::Flat => "FLAT",
            Shape::Natural => "NATURAL",
            Shape::AugmentationDot => "AUGMENTATION_DOT",
            Shape::Slur => "SLUR",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_notes_cover_all_families() {
        let wholes: Vec<_> = Shape::TEMPLATE_NOTES
            .iter()
            .filter(|s| s.is_whole())
            .collect();
        assert_eq!(wholes, [&Shape::WholeNote, &Shape::WholeNoteSmall]);
        assert!(Shape::TEMPLATE_NOTES.iter().all(|s| s.is_template_note()));
        assert!(!Shape::Stem.is_template_note());
    }

    #[test]
    fn serde_uses_screaming_names() {
        let json = serde_json::to_string(&Shape::NoteheadVoidSmall).expect("serialize");
        assert_eq!(json, "\"NOTEHEAD_VOID_SMALL\"");
        let back: Shape = serde_json::from_str("\"WHOLE_NOTE\"").expect("deserialize");
        assert_eq!(back, Shape::WholeNote);
        assert_eq!(back.to_string(), "WHOLE_NOTE");
    }
}
