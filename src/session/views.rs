//! Values handed to the presentation layer.
use crate::sig::{Inter, InterId};
use serde::Serialize;

/// Template evaluation at the current reference point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TemplateReadout {
    /// Matching grade at the reference point.
    pub grade: Option<f64>,
    /// Expected distance (pixels) of the key point under the inspected pixel.
    pub key_point: Option<f64>,
}

impl TemplateReadout {
    /// Grade with three decimals, empty when absent.
    pub fn grade_text(&self) -> String {
        self.grade.map(|g| format!("{g:.3}")).unwrap_or_default()
    }

    /// Key-point value with one decimal, empty when absent.
    pub fn key_point_text(&self) -> String {
        self.key_point
            .map(|d| format!("{d:.1}"))
            .unwrap_or_default()
    }
}

const DEASSIGN: &str = "Deassign";
const DELETED: &str = "deleted";

/// Snapshot of an inter for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InterView {
    /// Index of the inter in its graph.
    pub index: Option<usize>,
    pub shape_text: String,
    /// `"intrinsic"` or `"intrinsic/contextual"`, two decimals each.
    pub grade_text: String,
    pub details: String,
    pub deassign_label: &'static str,
    pub deassign_enabled: bool,
    pub vip: bool,
}

impl InterView {
    /// Nothing selected.
    pub fn empty() -> Self {
        Self {
            index: None,
            shape_text: String::new(),
            grade_text: String::new(),
            details: String::new(),
            deassign_label: " ",
            deassign_enabled: false,
            vip: false,
        }
    }

    pub fn of(inter: &Inter) -> Self {
        let grade_text = match inter.contextual_grade() {
            Some(cg) => format!("{:.2}/{:.2}", inter.grade(), cg),
            None => format!("{:.2}", inter.grade()),
        };
        Self {
            index: Some(inter.id().index()),
            shape_text: inter.shape_string(),
            grade_text,
            details: inter
                .impacts()
                .map(|i| i.to_string())
                .unwrap_or_default(),
            deassign_label: if inter.is_deleted() { DELETED } else { DEASSIGN },
            deassign_enabled: !inter.is_deleted(),
            vip: inter.is_vip(),
        }
    }
}

/// Outcome of a deassign request.
#[derive(Clone, Debug, PartialEq)]
pub struct DeassignReport {
    pub deassigned: InterId,
    /// Contextual grade computed right before deletion.
    pub grade_before: f64,
    /// Neighbours whose contextual grade was recomputed after deletion.
    pub regraded: Vec<(InterId, f64)>,
    pub view: InterView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_text_is_empty_without_data() {
        let r = TemplateReadout::default();
        assert_eq!(r.grade_text(), "");
        assert_eq!(r.key_point_text(), "");
        let r = TemplateReadout {
            grade: Some(0.81234),
            key_point: Some(1.3333),
        };
        assert_eq!(r.grade_text(), "0.812");
        assert_eq!(r.key_point_text(), "1.3");
    }
}
