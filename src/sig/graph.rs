use super::grade::{ContextualPolicy, Evidence, RatioPolicy};
use super::inter::{Inter, InterId, InterState, NewInter, SigId};
use super::relation::{Relation, RelationId, RelationKind, RelationRef};
use super::SigError;
use log::debug;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use std::sync::Arc;

/// Interpretation graph of one page.
#[derive(Debug)]
pub struct Sig {
    id: SigId,
    graph: StableGraph<Inter, Relation, Directed, u32>,
    pub(crate) policy: Arc<dyn ContextualPolicy>,
}

impl Default for Sig {
    fn default() -> Self {
        Self::new()
    }
}

impl Sig {
    /// Empty graph graded with the default [`RatioPolicy`].
    pub fn new() -> Self {
        Self::with_policy(RatioPolicy::default())
    }

    pub fn with_policy(policy: impl ContextualPolicy + 'static) -> Self {
        Self {
            id: SigId::next(),
            graph: StableGraph::default(),
            policy: Arc::new(policy),
        }
    }

    pub fn id(&self) -> SigId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn relation_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Insert a candidate; its grade must lie in `[0, 1]`.
    pub fn add_inter(&mut self, new: NewInter) -> Result<InterId, SigError> {
        let grade = new.grade();
        if !(0.0..=1.0).contains(&grade) {
            return Err(SigError::InvalidGrade(grade));
        }
        let index = self.graph.add_node(Inter::from_new(
            InterId {
                sig: self.id,
                index: NodeIndex::end(),
            },
            new,
        ));
        let id = InterId {
            sig: self.id,
            index,
        };
        self.graph[index].id = id;
        Ok(id)
    }

    pub fn contains(&self, id: InterId) -> bool {
        id.sig == self.id && self.graph.contains_node(id.index)
    }

    pub(crate) fn check_member(&self, id: InterId) -> Result<(), SigError> {
        if id.sig != self.id {
            return Err(SigError::ForeignInter {
                inter: id,
                owner: id.sig,
                sig: self.id,
            });
        }
        if !self.graph.contains_node(id.index) {
            return Err(SigError::UnknownInter(id));
        }
        Ok(())
    }

    pub(crate) fn check_active(&self, id: InterId) -> Result<&Inter, SigError> {
        let inter = self.inter(id)?;
        if inter.is_deleted() {
            return Err(SigError::Deleted(id));
        }
        Ok(inter)
    }

    pub fn inter(&self, id: InterId) -> Result<&Inter, SigError> {
        self.check_member(id)?;
        Ok(&self.graph[id.index])
    }

    pub(crate) fn inter_mut(&mut self, id: InterId) -> Result<&mut Inter, SigError> {
        self.check_member(id)?;
        Ok(&mut self.graph[id.index])
    }

    /// Mark an inter as very important: its grading is logged at info level.
    pub fn set_vip(&mut self, id: InterId, vip: bool) -> Result<(), SigError> {
        self.inter_mut(id)?.set_vip(vip);
        Ok(())
    }

    /// Every inter, deleted ones included, in insertion order.
    pub fn inters(&self) -> impl Iterator<Item = &Inter> + '_ {
        self.graph.node_indices().map(move |i| &self.graph[i])
    }

    pub fn active_inters(&self) -> impl Iterator<Item = &Inter> + '_ {
        self.inters().filter(|inter| !inter.is_deleted())
    }

    /// Whether several `kind` relations may link the same ordered pair.
    pub fn kind_allows_duplicate(&self, kind: RelationKind) -> bool {
        kind.allows_duplicate()
    }

    /// Link `source` to `target` with a relation of full quality.
    pub fn add_relation(
        &mut self,
        source: InterId,
        target: InterId,
        kind: RelationKind,
    ) -> Result<RelationId, SigError> {
        self.add_relation_with_grade(source, target, kind, 1.0)
    }

    /// Link `source` to `target`; `grade` is the relation quality in `[0, 1]`.
    ///
    /// Both ends must be active members of this graph. Exclusive kinds refuse a
    /// second relation between the same ordered pair.
    pub fn add_relation_with_grade(
        &mut self,
        source: InterId,
        target: InterId,
        kind: RelationKind,
        grade: f64,
    ) -> Result<RelationId, SigError> {
        self.check_active(source)?;
        self.check_active(target)?;
        if source == target {
            return Err(SigError::SelfRelation(source));
        }
        if !(0.0..=1.0).contains(&grade) {
            return Err(SigError::InvalidGrade(grade));
        }
        if !self.kind_allows_duplicate(kind) {
            let exists = self
                .graph
                .edges_directed(source.index, Direction::Outgoing)
                .any(|e| e.target() == target.index && e.weight().kind == kind);
            if exists {
                return Err(SigError::DuplicateRelation {
                    from: source,
                    to: target,
                    kind,
                });
            }
        }
        let index = self
            .graph
            .add_edge(source.index, target.index, Relation { kind, grade });
        Ok(RelationId {
            sig: self.id,
            index,
        })
    }

    /// Ends and payload of a relation.
    pub fn relation(&self, id: RelationId) -> Option<RelationRef> {
        if id.sig != self.id {
            return None;
        }
        let (s, t) = self.graph.edge_endpoints(id.index)?;
        let relation = *self.graph.edge_weight(id.index)?;
        Some(RelationRef {
            id,
            source: self.inter_id(s),
            target: self.inter_id(t),
            relation,
        })
    }

    fn inter_id(&self, index: NodeIndex<u32>) -> InterId {
        InterId {
            sig: self.id,
            index,
        }
    }

    /// Every relation touching `id`, whatever the state of either end.
    pub fn relations_of(&self, id: InterId) -> Result<Vec<RelationRef>, SigError> {
        self.check_member(id)?;
        let mut out: Vec<RelationRef> = [Direction::Outgoing, Direction::Incoming]
            .into_iter()
            .flat_map(|dir| self.graph.edges_directed(id.index, dir))
            .map(|e| RelationRef {
                id: RelationId {
                    sig: self.id,
                    index: e.id(),
                },
                source: self.inter_id(e.source()),
                target: self.inter_id(e.target()),
                relation: *e.weight(),
            })
            .collect();
        out.sort_by_key(|r| r.id);
        Ok(out)
    }

    /// Relations linking `id` to active partners, ordered by relation id.
    fn active_relations(&self, id: InterId) -> Result<Vec<RelationRef>, SigError> {
        Ok(self
            .relations_of(id)?
            .into_iter()
            .filter(|r| !self.graph[r.partner_of(id).index].is_deleted())
            .collect())
    }

    /// Active inters linked to `id` by a `kind` relation, in either direction.
    pub fn neighbors(&self, id: InterId, kind: RelationKind) -> Result<Vec<InterId>, SigError> {
        let mut out: Vec<InterId> = self
            .active_relations(id)?
            .into_iter()
            .filter(|r| r.relation.kind == kind)
            .map(|r| r.partner_of(id))
            .collect();
        out.sort_unstable();
        out.dedup();
        Ok(out)
    }

    /// Evidence brought by the active neighbours of `id`.
    pub fn evidence(&self, id: InterId) -> Result<Vec<Evidence>, SigError> {
        Ok(self
            .active_relations(id)?
            .into_iter()
            .map(|r| {
                let partner = r.partner_of(id);
                Evidence {
                    partner,
                    kind: r.relation.kind,
                    partner_grade: self.graph[partner.index].grade(),
                    relation_grade: r.relation.grade,
                }
            })
            .collect())
    }

    /// Soft-delete `id`.
    ///
    /// Relations are kept. Returns the active neighbours whose contextual
    /// grade no longer reflects the graph; recomputing them is up to the caller.
    pub fn deassign(&mut self, id: InterId) -> Result<Vec<InterId>, SigError> {
        self.check_active(id)?;
        let mut affected: Vec<InterId> = self
            .active_relations(id)?
            .into_iter()
            .map(|r| r.partner_of(id))
            .collect();
        affected.sort_unstable();
        affected.dedup();
        self.graph[id.index].state = InterState::Deleted;
        debug!(
            "Sig {}: deassigned {} ({}), {} neighbour(s) to regrade",
            self.id,
            id,
            self.graph[id.index].shape_string(),
            affected.len()
        );
        Ok(affected)
    }
}
