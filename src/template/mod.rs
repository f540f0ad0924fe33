//! Note templates and their per-interline catalogs.
//!
//! Overview
//! - A [`Template`] is a fixed constellation of key points: every pixel of the
//!   template box carries the chamfer distance it should show in a page
//!   distance field when the symbol sits exactly there (0 on ink).
//! - Anchors are named offsets inside the template box used to align it on a
//!   target pixel. Heads expose the two stem anchors plus `MiddleLeft`; whole
//!   notes expose `MiddleLeft` only (see [`is_compatible`]).
//! - A [`Catalog`] holds one template per template-note shape for a given
//!   interline. [`TemplateFactory`] memoises catalogs per interline and is an
//!   explicitly owned object, typically one per recognition session.
//!
//! Modules
//! - [`anchor`] – anchor names and the shape/anchor compatibility predicate.
//! - [`params`] – symbol proportions and key-point weights.
//! - `render` – synthetic rendering of note symbols at a given interline.
//! - `template` – the [`Template`] type and its evaluation against a field.
//! - `catalog` – [`Catalog`] and the memoising [`TemplateFactory`].

pub mod anchor;
mod catalog;
pub mod params;
mod render;
#[allow(clippy::module_inception)]
mod template;

pub use anchor::{is_compatible, permitted_anchors, Anchor};
pub use catalog::{Catalog, TemplateFactory};
pub use params::TemplateParams;
pub use template::{KeyPoint, Template};

use crate::shape::Shape;
use thiserror::Error;

/// Failures of template lookup and template geometry requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no template for shape {0}")]
    UnknownShape(Shape),

    #[error("anchor {anchor} is not compatible with shape {shape}")]
    IncompatibleAnchor { shape: Shape, anchor: Anchor },

    #[error("interline must be positive, got {0}")]
    InvalidScale(u32),

    #[error("invalid template: {0}")]
    InvalidTemplate(String),
}
