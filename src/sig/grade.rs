//! Contextual grade engine.
//!
//! The engine gathers the evidence of the active neighbours of an inter, asks
//! the graph's [`ContextualPolicy`] for one multiplicative factor per piece of
//! evidence, combines the product with the intrinsic grade and stores the
//! result together with a [`GradeImpacts`] breakdown.
//!
//! With the default [`RatioPolicy`], a support of ratio `r` from a partner of
//! grade `g_p` through a relation of quality `g_r` contributes
//! `1 + g_p * g_r * (r - 1)`, a conflict contributes
//! `1 - g_p * g_r * conflict_weight`. The product `R` then maps the intrinsic
//! grade `g` to `R * g / (1 + (R - 1) * g)`, which stays in `[0, 1]` and
//! equals `g` when `R == 1`.
use super::graph::Sig;
use super::inter::InterId;
use super::relation::{Polarity, RelationKind};
use super::SigError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One active neighbour seen from the inter being graded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evidence {
    pub partner: InterId,
    pub kind: RelationKind,
    /// Intrinsic grade of the partner.
    pub partner_grade: f64,
    /// Quality of the relation.
    pub relation_grade: f64,
}

/// Combination function applied to an inter and its evidence.
pub trait ContextualPolicy: Send + Sync + fmt::Debug {
    /// Multiplicative factor brought by one piece of evidence; must be positive.
    fn factor(&self, evidence: &Evidence) -> f64;

    /// Contextual grade of an inter of intrinsic grade `intrinsic` given the
    /// product `ratio` of all factors.
    fn combine(&self, intrinsic: f64, ratio: f64) -> f64 {
        let denom = 1.0 + (ratio - 1.0) * intrinsic;
        if denom <= 0.0 {
            return 0.0;
        }
        (ratio * intrinsic / denom).clamp(0.0, 1.0)
    }
}

/// Support ratios per relation kind and the weight of conflicts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeParams {
    pub head_stem: f64,
    pub beam_stem: f64,
    pub alter_head: f64,
    pub augmentation: f64,
    pub slur_head: f64,
    /// Strength of a conflict, in `[0, 1)`.
    pub conflict_weight: f64,
}

impl Default for GradeParams {
    fn default() -> Self {
        Self {
            head_stem: 2.0,
            beam_stem: 2.0,
            alter_head: 1.5,
            augmentation: 1.3,
            slur_head: 1.2,
            conflict_weight: 0.5,
        }
    }
}

impl GradeParams {
    /// Support ratio of `kind`, `None` for conflict kinds.
    pub fn support_ratio(&self, kind: RelationKind) -> Option<f64> {
        match kind {
            RelationKind::HeadStem => Some(self.head_stem),
            RelationKind::BeamStem => Some(self.beam_stem),
            RelationKind::AlterHead => Some(self.alter_head),
            RelationKind::Augmentation => Some(self.augmentation),
            RelationKind::SlurHead => Some(self.slur_head),
            RelationKind::Overlap | RelationKind::Exclusion => None,
        }
    }
}

/// Default policy: supports raise the odds by their ratio, conflicts lower them.
#[derive(Clone, Debug, Default)]
pub struct RatioPolicy {
    params: GradeParams,
}

impl RatioPolicy {
    pub fn new(params: GradeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GradeParams {
        &self.params
    }
}

/// Largest conflict weight, keeps every factor strictly positive.
const MAX_CONFLICT_WEIGHT: f64 = 0.99;

impl ContextualPolicy for RatioPolicy {
    fn factor(&self, e: &Evidence) -> f64 {
        let strength = e.partner_grade * e.relation_grade;
        match e.kind.polarity() {
            Polarity::Support => {
                let ratio = self.params.support_ratio(e.kind).unwrap_or(1.0).max(1.0);
                1.0 + strength * (ratio - 1.0)
            }
            Polarity::Conflict => {
                let weight = self.params.conflict_weight.clamp(0.0, MAX_CONFLICT_WEIGHT);
                1.0 - strength * weight
            }
        }
    }
}

/// Contribution of one neighbour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    pub partner: InterId,
    pub kind: RelationKind,
    pub factor: f64,
}

/// How a contextual grade was derived.
#[derive(Clone, Debug, PartialEq)]
pub struct GradeImpacts {
    pub intrinsic: f64,
    /// Ordered by relation id.
    pub impacts: Vec<Impact>,
    /// Product of all factors.
    pub ratio: f64,
    pub contextual: f64,
}

impl fmt::Display for GradeImpacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "intrinsic:{:.2}", self.intrinsic)?;
        for i in &self.impacts {
            write!(f, " {}{}:x{:.2}", i.kind, i.partner, i.factor)?;
        }
        write!(f, " -> {:.2}", self.contextual)
    }
}

impl Sig {
    /// Contextual grade of `id`.
    ///
    /// With `force == false` an already computed value is returned as is, even
    /// if the graph changed since. Fails with `Deleted` on a deleted inter.
    pub fn compute_contextual_grade(&mut self, id: InterId, force: bool) -> Result<f64, SigError> {
        let inter = self.check_active(id)?;
        if !force {
            if let Some(cg) = inter.contextual_grade() {
                return Ok(cg);
            }
        }
        let intrinsic = inter.grade();
        let vip = inter.is_vip();

        let impacts: Vec<Impact> = self
            .evidence(id)?
            .iter()
            .map(|e| Impact {
                partner: e.partner,
                kind: e.kind,
                factor: self.policy.factor(e),
            })
            .collect();
        let ratio: f64 = impacts.iter().map(|i| i.factor).product();
        let contextual = self.policy.combine(intrinsic, ratio);
        let details = GradeImpacts {
            intrinsic,
            impacts,
            ratio,
            contextual,
        };
        if vip {
            info!("VIP {} contextual {}", id, details);
        } else {
            debug!("Sig {}: {} contextual {}", self.id(), id, details);
        }

        let inter = self.inter_mut(id)?;
        inter.contextual_grade = Some(contextual);
        inter.impacts = Some(details);
        Ok(contextual)
    }

    /// Force-recompute the contextual grade of every active inter.
    pub fn contextualize_all(&mut self) -> Vec<(InterId, f64)> {
        let ids: Vec<InterId> = self.active_inters().map(|i| i.id()).collect();
        ids.into_iter()
            .filter_map(|id| {
                self.compute_contextual_grade(id, true)
                    .ok()
                    .map(|g| (id, g))
            })
            .collect()
    }
}
