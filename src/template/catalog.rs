use super::params::TemplateParams;
use super::template::Template;
use super::TemplateError;
use crate::shape::Shape;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Templates of every template-note shape at one interline.
#[derive(Debug)]
pub struct Catalog {
    interline: u32,
    templates: BTreeMap<Shape, Arc<Template>>,
}

impl Catalog {
    /// Build all templates for `interline`.
    pub fn build(interline: u32, params: &TemplateParams) -> Result<Self, TemplateError> {
        if interline == 0 {
            return Err(TemplateError::InvalidScale(interline));
        }
        let t0 = Instant::now();
        let templates = build_templates(interline, params)?;
        debug!(
            "Catalog: built {} templates for interline {} in {:.3} ms",
            templates.len(),
            interline,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Self {
            interline,
            templates,
        })
    }

    pub fn interline(&self) -> u32 {
        self.interline
    }

    /// Template of `shape`, or `UnknownShape` if the shape has none.
    pub fn template(&self, shape: Shape) -> Result<&Arc<Template>, TemplateError> {
        self.templates
            .get(&shape)
            .ok_or(TemplateError::UnknownShape(shape))
    }

    pub fn shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        self.templates.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn build_templates(
    interline: u32,
    params: &TemplateParams,
) -> Result<BTreeMap<Shape, Arc<Template>>, TemplateError> {
    #[cfg(feature = "parallel")]
    {
        Shape::TEMPLATE_NOTES
            .par_iter()
            .map(|&shape| Template::build(shape, interline, params).map(|t| (shape, Arc::new(t))))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        Shape::TEMPLATE_NOTES
            .iter()
            .map(|&shape| Template::build(shape, interline, params).map(|t| (shape, Arc::new(t))))
            .collect()
    }
}

/// Memoising source of catalogs, keyed by interline.
///
/// The first request for an interline builds its catalog while holding the
/// cache lock, so concurrent first requests never build the same catalog
/// twice. Later requests return the cached `Arc`.
#[derive(Debug, Default)]
pub struct TemplateFactory {
    params: TemplateParams,
    catalogs: Mutex<HashMap<u32, Arc<Catalog>>>,
}

impl TemplateFactory {
    pub fn new(params: TemplateParams) -> Self {
        Self {
            params,
            catalogs: Mutex::new(HashMap::new()),
        }
    }

    pub fn params(&self) -> &TemplateParams {
        &self.params
    }

    /// Catalog for `interline`, built on first request.
    pub fn catalog(&self, interline: u32) -> Result<Arc<Catalog>, TemplateError> {
        if interline == 0 {
            return Err(TemplateError::InvalidScale(interline));
        }
        // entries are inserted fully built, a poisoned map is still consistent
        let mut catalogs = self.catalogs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = catalogs.get(&interline) {
            return Ok(Arc::clone(catalog));
        }
        let catalog = Arc::new(Catalog::build(interline, &self.params)?);
        catalogs.insert(interline, Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Interlines whose catalog has been built, ascending.
    pub fn cached_interlines(&self) -> Vec<u32> {
        let catalogs = self.catalogs.lock().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<u32> = catalogs.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}
