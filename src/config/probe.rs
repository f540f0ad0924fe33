use super::EngineParams;
use crate::shape::Shape;
use crate::template::Anchor;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `template_probe` tool.
#[derive(Debug, Deserialize)]
pub struct ProbeConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    /// Pixels darker than this are ink.
    #[serde(default = "default_ink_threshold")]
    pub ink_threshold: u8,
    pub interline: u32,
    pub shape: Shape,
    pub anchor: Anchor,
    /// Pixel the anchor is placed on.
    pub location: [i32; 2],
    /// Optional half-size of a square searched around `location` for the best match.
    #[serde(default)]
    pub search_radius: Option<i32>,
    #[serde(default)]
    pub params: EngineParams,
    #[serde(default)]
    pub output: ProbeOutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProbeOutputConfig {
    pub report_json: Option<PathBuf>,
    pub distance_image: Option<PathBuf>,
}

fn default_ink_threshold() -> u8 {
    128
}

pub fn load_config(path: &Path) -> Result<ProbeConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses() {
        let cfg: ProbeConfig = serde_json::from_str(
            r#"{
                "input": "page.png",
                "interline": 20,
                "shape": "NOTEHEAD_VOID",
                "anchor": "LEFT_STEM",
                "location": [120, 64]
            }"#,
        )
        .expect("valid config");
        assert_eq!(cfg.ink_threshold, 128);
        assert_eq!(cfg.shape, Shape::NoteheadVoid);
        assert_eq!(cfg.anchor, Anchor::LeftStem);
        assert!(cfg.search_radius.is_none());
        assert!(cfg.output.report_json.is_none());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/probe.json")).unwrap_err();
        assert!(err.contains("/nonexistent/probe.json"));
    }
}
