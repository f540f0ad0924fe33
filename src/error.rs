//! Crate-level error aggregating the per-module failures.
use crate::distance::FieldError;
use crate::sig::SigError;
use crate::template::TemplateError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Sig(#[from] SigError),
}

impl Error {
    /// Request made against a deleted or foreign inter.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Error::Sig(e) if e.is_invalid_state())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
