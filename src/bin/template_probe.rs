use omr_core::config::probe::{self, ProbeConfig};
use omr_core::geometry::{PixelPoint, Rect};
use omr_core::image::io::{load_grayscale_image, save_grayscale_f32, write_json_file};
use omr_core::matcher::TemplateMatch;
use omr_core::{Anchor, DistanceField, InspectorSession, LocationHint, Shape};
use serde::Serialize;
use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Serialize)]
struct ProbeReport {
    input: String,
    interline: u32,
    shape: Shape,
    anchor: Anchor,
    location: PixelPoint,
    bounds: Rect,
    grade: Option<f64>,
    best: Option<TemplateMatch>,
    latency_ms: f64,
}

fn main() {
    let _ = env_logger::try_init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <config.json>")
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args
        .next()
        .unwrap_or_else(|| "template_probe".to_string());
    let config_path = args.next().ok_or_else(|| usage(&program))?;
    let config = probe::load_config(Path::new(&config_path))?;

    let start = Instant::now();
    let gray = load_grayscale_image(&config.input)?;
    let field = Arc::new(DistanceField::from_image(&gray.as_view(), config.ink_threshold));

    if let Some(path) = &config.output.distance_image {
        // saturate at two interlines, farther pixels are irrelevant to matching
        let max = 2.0 * config.interline as f32 * field.normalizer();
        save_grayscale_f32(field.as_image(), max, path)?;
        eprintln!("Distance image written to {}", path.display());
    }

    let report = run_probe(&config, field)?;
    let report = ProbeReport {
        latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        ..report
    };
    print_text_summary(&report);

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("\nJSON report written to {}", path.display());
    }
    Ok(())
}

fn run_probe(config: &ProbeConfig, field: Arc<DistanceField>) -> Result<ProbeReport, String> {
    let mut session = InspectorSession::from_params(field, config.interline, &config.params)
        .map_err(|e| format!("Failed to prepare templates: {e}"))?;
    let anchored = session
        .on_template_selection_changed(config.shape, config.anchor)
        .map_err(|e| format!("Failed to select template: {e}"))?
        .ok_or_else(|| {
            format!(
                "Anchor {} is not available for {}",
                config.anchor, config.shape
            )
        })?;

    let [x, y] = config.location;
    let location = PixelPoint::new(x, y);
    let readout = session.on_location_selected(location, LocationHint::Reference);

    let best = config.search_radius.and_then(|r| {
        let r = r.max(0);
        let side = 2 * r + 1;
        session.best_match_in(Rect::new(x - r, y - r, side, side))
    });

    Ok(ProbeReport {
        input: config.input.display().to_string(),
        interline: config.interline,
        shape: config.shape,
        anchor: config.anchor,
        location,
        bounds: anchored.bounds_at(x, y),
        grade: readout.grade,
        best,
        latency_ms: 0.0,
    })
}

fn print_text_summary(report: &ProbeReport) {
    println!("Template probe");
    println!("  input: {}", report.input);
    println!("  interline: {}", report.interline);
    println!("  template: {} @ {}", report.shape, report.anchor);
    println!(
        "  location: ({}, {})  bounds: {}x{} at ({}, {})",
        report.location.x,
        report.location.y,
        report.bounds.width,
        report.bounds.height,
        report.bounds.x,
        report.bounds.y
    );
    match report.grade {
        Some(g) => println!("  grade: {g:.3}"),
        None => println!("  grade: n/a (outside page)"),
    }
    if let Some(best) = &report.best {
        println!(
            "  best: ({}, {}) distance={:.3} grade={:.3}",
            best.location.x, best.location.y, best.distance, best.grade
        );
    }
    println!("  latency_ms: {:.3}", report.latency_ms);
}
