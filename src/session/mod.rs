//! Command/query surface consumed by the presentation layer.
//!
//! [`InspectorSession`] owns the per-page state (distance field, catalog
//! selection, interpretation graph) and exposes one method per user-side
//! event. Each method returns the values to display; dispatching events and
//! threading are left to the caller.
mod views;

pub use views::{DeassignReport, InterView, TemplateReadout};

use crate::config::EngineParams;
use crate::distance::DistanceField;
use crate::error::Result;
use crate::geometry::{PixelPoint, Rect};
use crate::matcher::{AnchoredTemplate, MatchParams, TemplateMatch, TemplateMatcher};
use crate::shape::Shape;
use crate::sig::{InterId, RatioPolicy, Sig};
use crate::template::{is_compatible, Anchor, Catalog, TemplateFactory};
use log::{debug, warn};
use std::sync::Arc;

/// Meaning of a selected pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationHint {
    /// New reference point: the current template is re-evaluated there.
    Reference,
    /// Pixel under inspection: report the key point found under it.
    Inspect,
}

/// Per-page inspection state.
#[derive(Debug)]
pub struct InspectorSession {
    factory: Arc<TemplateFactory>,
    field: Arc<DistanceField>,
    catalog: Arc<Catalog>,
    matcher: TemplateMatcher,
    sig: Sig,
    selection: Option<(Shape, Anchor)>,
    anchored: Option<AnchoredTemplate>,
    reference: Option<PixelPoint>,
    readout: TemplateReadout,
}

/// Anchored template of `shape` in `catalog`, `None` for an unsuitable anchor.
fn resolve(catalog: &Catalog, shape: Shape, anchor: Anchor) -> Result<Option<AnchoredTemplate>> {
    let template = Arc::clone(catalog.template(shape)?);
    if !is_compatible(shape, anchor) {
        debug!("InspectorSession: {anchor} does not suit {shape}, selection cleared");
        return Ok(None);
    }
    Ok(Some(AnchoredTemplate::new(template, anchor)?))
}

fn logged<T>(op: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        warn!("InspectorSession::{op} error: {e}");
    }
    result
}

impl InspectorSession {
    pub fn new(
        factory: Arc<TemplateFactory>,
        field: Arc<DistanceField>,
        interline: u32,
        matching: &MatchParams,
        sig: Sig,
    ) -> Result<Self> {
        let catalog = factory.catalog(interline)?;
        Ok(Self {
            factory,
            field,
            catalog,
            matcher: TemplateMatcher::new(matching),
            sig,
            selection: None,
            anchored: None,
            reference: None,
            readout: TemplateReadout::default(),
        })
    }

    /// Session with its own factory and an empty graph, all tuned by `params`.
    pub fn from_params(
        field: Arc<DistanceField>,
        interline: u32,
        params: &EngineParams,
    ) -> Result<Self> {
        let factory = Arc::new(TemplateFactory::new(params.template.clone()));
        let sig = Sig::with_policy(RatioPolicy::new(params.grading.clone()));
        Self::new(factory, field, interline, &params.matching, sig)
    }

    pub fn sig(&self) -> &Sig {
        &self.sig
    }

    pub fn sig_mut(&mut self) -> &mut Sig {
        &mut self.sig
    }

    pub fn field(&self) -> &DistanceField {
        &self.field
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn interline(&self) -> u32 {
        self.catalog.interline()
    }

    pub fn matcher(&self) -> &TemplateMatcher {
        &self.matcher
    }

    /// Current template selection, `None` when none or incompatible.
    pub fn anchored(&self) -> Option<&AnchoredTemplate> {
        self.anchored.as_ref()
    }

    pub fn reference(&self) -> Option<PixelPoint> {
        self.reference
    }

    pub fn readout(&self) -> TemplateReadout {
        self.readout
    }

    /// Switch to the catalog of `interline` and re-resolve the current selection.
    ///
    /// On failure the session keeps its previous catalog and selection.
    pub fn set_interline(&mut self, interline: u32) -> Result<()> {
        let result = self.switch_catalog(interline);
        logged("set_interline", result)
    }

    fn switch_catalog(&mut self, interline: u32) -> Result<()> {
        let catalog = self.factory.catalog(interline)?;
        let anchored = match self.selection {
            Some((shape, anchor)) => resolve(&catalog, shape, anchor)?,
            None => None,
        };
        self.catalog = catalog;
        self.anchored = anchored;
        self.evaluate_reference();
        Ok(())
    }

    /// New (shape, anchor) selection.
    ///
    /// Returns the anchored template now in use, `None` when the anchor does
    /// not suit the shape. A shape without template is an error and leaves
    /// the previous selection in place.
    pub fn on_template_selection_changed(
        &mut self,
        shape: Shape,
        anchor: Anchor,
    ) -> Result<Option<AnchoredTemplate>> {
        let result = resolve(&self.catalog, shape, anchor).map(|anchored| {
            self.selection = Some((shape, anchor));
            self.anchored = anchored;
            self.evaluate_reference();
            self.anchored.clone()
        });
        logged("on_template_selection_changed", result)
    }

    fn evaluate_reference(&mut self) {
        self.readout.grade = match (&self.anchored, self.reference) {
            (Some(anchored), Some(p)) => self.matcher.grade_at(anchored, p.x, p.y, &self.field),
            _ => None,
        };
    }

    /// A pixel was selected.
    pub fn on_location_selected(
        &mut self,
        point: PixelPoint,
        hint: LocationHint,
    ) -> TemplateReadout {
        match hint {
            LocationHint::Reference => {
                self.reference = Some(point);
                self.readout.key_point = None;
                self.evaluate_reference();
            }
            LocationHint::Inspect => {
                self.readout.key_point = match (&self.anchored, self.reference) {
                    (Some(anchored), Some(reference)) => {
                        self.matcher
                            .key_point_value(anchored, reference, point)
                    }
                    _ => None,
                };
            }
        }
        self.readout
    }

    /// Best placement of the current template inside `region`.
    pub fn best_match_in(&self, region: Rect) -> Option<TemplateMatch> {
        let anchored = self.anchored.as_ref()?;
        self.matcher.best_in(anchored, region, &self.field)
    }

    /// An inter was selected, or the selection was cleared.
    ///
    /// The contextual grade of an active inter is recomputed before the view is
    /// built, so the displayed value always reflects the current graph.
    pub fn on_inter_selected(&mut self, id: Option<InterId>) -> Result<InterView> {
        let Some(id) = id else {
            return Ok(InterView::empty());
        };
        let result = self.view_of(id);
        logged("on_inter_selected", result)
    }

    fn view_of(&mut self, id: InterId) -> Result<InterView> {
        if !self.sig.inter(id)?.is_deleted() {
            self.sig.compute_contextual_grade(id, true)?;
        }
        Ok(InterView::of(self.sig.inter(id)?))
    }

    /// Deassign an inter and regrade its former neighbours.
    pub fn on_deassign_requested(&mut self, id: InterId) -> Result<DeassignReport> {
        let result = self.deassign(id);
        logged("on_deassign_requested", result)
    }

    fn deassign(&mut self, id: InterId) -> Result<DeassignReport> {
        // must happen while the inter is still active
        let grade_before = self.sig.compute_contextual_grade(id, true)?;
        let affected = self.sig.deassign(id)?;
        let mut regraded = Vec::with_capacity(affected.len());
        for neighbour in affected {
            regraded.push((neighbour, self.sig.compute_contextual_grade(neighbour, true)?));
        }
        Ok(DeassignReport {
            deassigned: id,
            grade_before,
            regraded,
            view: InterView::of(self.sig.inter(id)?),
        })
    }
}
