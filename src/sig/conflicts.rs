use super::graph::Sig;
use super::inter::InterId;
use super::relation::RelationKind;
use super::SigError;
use log::debug;

impl Sig {
    /// Conflict relations whose two ends are both active, as `(source, target, kind)`.
    pub fn active_conflicts(&self) -> Vec<(InterId, InterId, RelationKind)> {
        let mut out = Vec::new();
        for inter in self.active_inters() {
            let id = inter.id();
            let Ok(relations) = self.relations_of(id) else {
                continue;
            };
            for r in relations {
                // report each relation once, from its source
                if r.source != id || !r.relation.kind.is_conflict() {
                    continue;
                }
                let partner_active = self
                    .inter(r.target)
                    .map(|t| !t.is_deleted())
                    .unwrap_or(false);
                if partner_active {
                    out.push((r.source, r.target, r.relation.kind));
                }
            }
        }
        out
    }

    /// Deassign losers until no two active inters conflict.
    ///
    /// Each round force-recomputes the contextual grade of every inter involved
    /// in an active conflict and deassigns the weakest one (lowest contextual
    /// grade, then lowest id). Returns the deassigned inters in order.
    pub fn resolve_conflicts(&mut self) -> Result<Vec<InterId>, SigError> {
        let mut removed = Vec::new();
        loop {
            let conflicts = self.active_conflicts();
            if conflicts.is_empty() {
                break;
            }
            let mut involved: Vec<InterId> = conflicts
                .iter()
                .flat_map(|&(s, t, _)| [s, t])
                .collect();
            involved.sort_unstable();
            involved.dedup();

            let mut weakest: Option<(f64, InterId)> = None;
            for id in involved {
                let grade = self.compute_contextual_grade(id, true)?;
                let replace = match weakest {
                    None => true,
                    Some((g, _)) => grade < g,
                };
                if replace {
                    weakest = Some((grade, id));
                }
            }
            let Some((grade, loser)) = weakest else {
                break;
            };
            debug!(
                "Sig {}: {} active conflict(s), deassigning {} (contextual {:.3})",
                self.id(),
                conflicts.len(),
                loser,
                grade
            );
            self.deassign(loser)?;
            removed.push(loser);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::shape::Shape;
    use crate::sig::{NewInter, RelationKind, Sig};

    #[test]
    fn weaker_of_two_overlapping_heads_is_deassigned() {
        let mut sig = Sig::new();
        let black = sig
            .add_inter(NewInter::shaped(Shape::NoteheadBlack, 0.55))
            .expect("black");
        let void = sig
            .add_inter(NewInter::shaped(Shape::NoteheadVoid, 0.6))
            .expect("void");
        let stem = sig.add_inter(NewInter::shaped(Shape::Stem, 0.9)).expect("stem");
        sig.add_relation(black, void, RelationKind::Overlap)
            .expect("overlap");
        // the stem tips the balance towards the black head
        sig.add_relation(black, stem, RelationKind::HeadStem)
            .expect("support");

        let removed = sig.resolve_conflicts().expect("resolution");
        assert_eq!(removed, vec![void]);
        assert!(sig.active_conflicts().is_empty());
        assert!(!sig.inter(black).expect("black").is_deleted());
    }

    #[test]
    fn conflict_chain_is_resolved_step_by_step() {
        let mut sig = Sig::new();
        let a = sig.add_inter(NewInter::described("a", 0.9)).expect("a");
        let b = sig.add_inter(NewInter::described("b", 0.5)).expect("b");
        let c = sig.add_inter(NewInter::described("c", 0.8)).expect("c");
        sig.add_relation(a, b, RelationKind::Exclusion).expect("a-b");
        sig.add_relation(b, c, RelationKind::Exclusion).expect("b-c");

        let removed = sig.resolve_conflicts().expect("resolution");
        assert_eq!(removed, vec![b]);
        assert_eq!(sig.active_inters().count(), 2);
    }

    #[test]
    fn no_conflict_no_change() {
        let mut sig = Sig::new();
        let a = sig.add_inter(NewInter::described("a", 0.9)).expect("a");
        let b = sig.add_inter(NewInter::described("b", 0.5)).expect("b");
        sig.add_relation(a, b, RelationKind::AlterHead).expect("support");
        assert!(sig.resolve_conflicts().expect("resolution").is_empty());
    }
}
