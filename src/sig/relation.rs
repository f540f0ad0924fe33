use super::inter::{InterId, SigId};
use petgraph::graph::EdgeIndex;
use std::fmt;

/// Whether a relation raises or lowers the contextual grade of its ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Support,
    Conflict,
}

/// Kinds of relation linking two inters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationKind {
    /// Head attached to a stem.
    HeadStem,
    /// Beam attached to a stem.
    BeamStem,
    /// Accidental applied to a head.
    AlterHead,
    /// Augmentation dot applied to a note.
    Augmentation,
    /// Slur end attached to a head.
    SlurHead,
    /// Two inters claim the same ink.
    Overlap,
    /// Two inters cannot coexist.
    Exclusion,
}

impl RelationKind {
    pub const ALL: [RelationKind; 7] = [
        RelationKind::HeadStem,
        RelationKind::BeamStem,
        RelationKind::AlterHead,
        RelationKind::Augmentation,
        RelationKind::SlurHead,
        RelationKind::Overlap,
        RelationKind::Exclusion,
    ];

    pub fn polarity(self) -> Polarity {
        match self {
            RelationKind::Overlap | RelationKind::Exclusion => Polarity::Conflict,
            _ => Polarity::Support,
        }
    }

    #[inline]
    pub fn is_support(self) -> bool {
        self.polarity() == Polarity::Support
    }

    #[inline]
    pub fn is_conflict(self) -> bool {
        self.polarity() == Polarity::Conflict
    }

    /// Whether several relations of this kind may link the same ordered pair.
    ///
    /// A dot may augment a note twice (double dot) and a slur may start and
    /// end on the same head; every other kind is exclusive.
    pub fn allows_duplicate(self) -> bool {
        matches!(self, RelationKind::Augmentation | RelationKind::SlurHead)
    }

    pub fn name(self) -> &'static str {
        match self {
            RelationKind::HeadStem => "HEAD_STEM",
            RelationKind::BeamStem => "BEAM_STEM",
            RelationKind::AlterHead => "ALTER_HEAD",
            RelationKind::Augmentation => "AUGMENTATION",
            RelationKind::SlurHead => "SLUR_HEAD",
            RelationKind::Overlap => "OVERLAP",
            RelationKind::Exclusion => "EXCLUSION",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Edge payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Relation {
    pub kind: RelationKind,
    /// Geometric quality of the relation in `[0, 1]`.
    pub grade: f64,
}

impl Relation {
    pub fn new(kind: RelationKind) -> Self {
        Self { kind, grade: 1.0 }
    }
}

/// Identity of a relation inside one graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId {
    pub(crate) sig: SigId,
    pub(crate) index: EdgeIndex<u32>,
}

impl RelationId {
    pub fn sig(&self) -> SigId {
        self.sig
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/r{}", self.sig, self.index.index())
    }
}

/// A relation seen from one of its ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelationRef {
    pub id: RelationId,
    pub source: InterId,
    pub target: InterId,
    pub relation: Relation,
}

impl RelationRef {
    /// The end opposite to `me`.
    pub fn partner_of(&self, me: InterId) -> InterId {
        if self.source == me {
            self.target
        } else {
            self.source
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_and_exclusivity() {
        let conflicts: Vec<_> = RelationKind::ALL
            .iter()
            .filter(|k| k.is_conflict())
            .collect();
        assert_eq!(conflicts, [&RelationKind::Overlap, &RelationKind::Exclusion]);
        assert!(RelationKind::SlurHead.allows_duplicate());
        assert!(!RelationKind::HeadStem.allows_duplicate());
        assert!(!RelationKind::Exclusion.allows_duplicate());
    }
}
