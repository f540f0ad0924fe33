#![doc = include_str!("../README.md")]

// Building blocks
pub mod distance;
pub mod geometry;
pub mod image;
pub mod shape;

// Recognition core
pub mod matcher;
pub mod sig;
pub mod template;

// Surfaces
pub mod config;
pub mod error;
pub mod session;

// --- High-level re-exports -------------------------------------------------

pub use crate::distance::DistanceField;
pub use crate::error::{Error, Result};
pub use crate::matcher::{AnchoredTemplate, TemplateMatch, TemplateMatcher};
pub use crate::session::{InspectorSession, LocationHint};
pub use crate::shape::Shape;
pub use crate::sig::{Inter, InterId, RelationKind, Sig};
pub use crate::template::{Anchor, Catalog, Template, TemplateFactory};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use omr_core::prelude::*;
/// use std::sync::Arc;
///
/// # fn main() -> omr_core::Result<()> {
/// let (w, h) = (200usize, 120usize);
/// let gray = vec![255u8; w * h];
/// let page = ImageU8 { w, h, stride: w, data: &gray };
/// let field = Arc::new(DistanceField::from_image(&page, 128));
///
/// let mut session = InspectorSession::from_params(field, 20, &EngineParams::default())?;
/// session.on_template_selection_changed(Shape::NoteheadBlack, Anchor::LeftStem)?;
/// let readout = session.on_location_selected(PixelPoint::new(60, 40), LocationHint::Reference);
/// println!("grade={}", readout.grade_text());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::config::EngineParams;
    pub use crate::geometry::{PixelPoint, Rect};
    pub use crate::image::ImageU8;
    pub use crate::sig::NewInter;
    pub use crate::{
        Anchor, DistanceField, InspectorSession, LocationHint, RelationKind, Shape, Sig,
        TemplateFactory, TemplateMatcher,
    };
}
