//! Symbol interpretation graph (SIG).
//!
//! Overview
//! - Nodes are [`Inter`]s: candidate interpretations carrying an intrinsic
//!   grade. Edges are typed [`Relation`]s, either supports or conflicts.
//! - Deassigning an inter soft-deletes it: the node and its relations stay in
//!   the graph, but every traversal used for grading skips deleted nodes.
//! - The contextual grade of an inter combines its intrinsic grade with the
//!   evidence of its active neighbours through a [`ContextualPolicy`]. It is
//!   computed on request and never refreshed by graph mutations; callers
//!   recompute it right before displaying or acting on it.
//! - One graph per processed page. A single writer mutates it at a time;
//!   shared reads are safe between mutations.
//!
//! Modules
//! - `inter` – [`Inter`], [`InterId`], [`NewInter`].
//! - `relation` – [`RelationKind`], [`Relation`], polarity and exclusivity.
//! - `graph` – the [`Sig`] container, membership checks and traversals.
//! - `grade` – contextual grade engine and the default [`RatioPolicy`].
//! - `conflicts` – iterative resolution of conflicting active inters.

mod conflicts;
mod grade;
mod graph;
mod inter;
mod relation;

pub use grade::{ContextualPolicy, Evidence, GradeImpacts, GradeParams, Impact, RatioPolicy};
pub use graph::Sig;
pub use inter::{Inter, InterId, InterState, NewInter, SigId};
pub use relation::{Polarity, Relation, RelationId, RelationKind, RelationRef};

use thiserror::Error;

/// Failures of graph queries and mutations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SigError {
    #[error("inter {0} is deleted")]
    Deleted(InterId),

    #[error("inter {inter} belongs to {owner}, not to {sig}")]
    ForeignInter {
        inter: InterId,
        owner: SigId,
        sig: SigId,
    },

    #[error("inter {0} is not part of this graph")]
    UnknownInter(InterId),

    #[error("grade {0} is outside [0, 1]")]
    InvalidGrade(f64),

    #[error("inter {0} cannot relate to itself")]
    SelfRelation(InterId),

    #[error("{kind} relation {from} -> {to} already exists")]
    DuplicateRelation {
        from: InterId,
        to: InterId,
        kind: RelationKind,
    },
}

impl SigError {
    /// Request made against a deleted or foreign inter.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            SigError::Deleted(_) | SigError::ForeignInter { .. } | SigError::UnknownInter(_)
        )
    }
}
