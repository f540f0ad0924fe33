//! Engine parameters and tool configuration files.
//!
//! Every parameter block has sensible defaults and deserializes with
//! `#[serde(default)]`, so a JSON config only lists the knobs it changes.
pub mod probe;

use crate::matcher::MatchParams;
use crate::sig::GradeParams;
use crate::template::TemplateParams;
use serde::{Deserialize, Serialize};

/// All knobs of the recognition core.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    pub template: TemplateParams,
    pub matching: MatchParams,
    pub grading: GradeParams,
}
