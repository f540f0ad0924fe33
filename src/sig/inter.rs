use super::grade::GradeImpacts;
use crate::geometry::Rect;
use crate::shape::Shape;
use petgraph::graph::NodeIndex;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_SIG_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one interpretation graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SigId(u32);

impl SigId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SIG_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sig{}", self.0)
    }
}

/// Identity of an inter; carries the graph it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterId {
    pub(crate) sig: SigId,
    pub(crate) index: NodeIndex<u32>,
}

impl InterId {
    pub fn sig(&self) -> SigId {
        self.sig
    }

    /// Position of the inter in its graph.
    pub fn index(&self) -> usize {
        self.index.index()
    }
}

impl fmt::Display for InterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index.index())
    }
}

/// Soft-delete state; deleted inters keep their relations for traceability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterState {
    Active,
    Deleted,
}

/// Candidate interpretation.
#[derive(Clone, Debug)]
pub struct Inter {
    pub(crate) id: InterId,
    shape: Option<Shape>,
    label: Option<String>,
    grade: f64,
    pub(crate) contextual_grade: Option<f64>,
    pub(crate) impacts: Option<GradeImpacts>,
    pub(crate) state: InterState,
    vip: bool,
    bounds: Option<Rect>,
}

impl Inter {
    pub(crate) fn from_new(id: InterId, new: NewInter) -> Self {
        Self {
            id,
            shape: new.shape,
            label: new.label,
            grade: new.grade,
            contextual_grade: None,
            impacts: None,
            state: InterState::Active,
            vip: new.vip,
            bounds: new.bounds,
        }
    }

    pub fn id(&self) -> InterId {
        self.id
    }

    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    /// Shape name, or the descriptive label of a shapeless inter.
    pub fn shape_string(&self) -> String {
        match (&self.shape, &self.label) {
            (Some(shape), _) => shape.to_string(),
            (None, Some(label)) => label.clone(),
            (None, None) => String::new(),
        }
    }

    /// Intrinsic grade.
    pub fn grade(&self) -> f64 {
        self.grade
    }

    /// Last computed contextual grade; not refreshed by graph mutations.
    pub fn contextual_grade(&self) -> Option<f64> {
        self.contextual_grade
    }

    pub fn impacts(&self) -> Option<&GradeImpacts> {
        self.impacts.as_ref()
    }

    pub fn state(&self) -> InterState {
        self.state
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.state == InterState::Deleted
    }

    pub fn is_vip(&self) -> bool {
        self.vip
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub(crate) fn set_vip(&mut self, vip: bool) {
        self.vip = vip;
    }
}

/// Inter proposal, not yet attached to a graph.
#[derive(Clone, Debug)]
pub struct NewInter {
    shape: Option<Shape>,
    label: Option<String>,
    grade: f64,
    vip: bool,
    bounds: Option<Rect>,
}

impl NewInter {
    pub fn shaped(shape: Shape, grade: f64) -> Self {
        Self {
            shape: Some(shape),
            label: None,
            grade,
            vip: false,
            bounds: None,
        }
    }

    /// Inter without resolved shape, described by `label`.
    pub fn described(label: impl Into<String>, grade: f64) -> Self {
        Self {
            shape: None,
            label: Some(label.into()),
            grade,
            vip: false,
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn vip(mut self) -> Self {
        self.vip = true;
        self
    }

    pub(crate) fn grade(&self) -> f64 {
        self.grade
    }
}
