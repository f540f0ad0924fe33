mod common;

use common::synthetic::{blank_page, chord_graph, paint_template};
use common::{assert_close, init_logging};
use omr_core::config::EngineParams;
use omr_core::geometry::{PixelPoint, Rect};
use omr_core::image::ImageU8;
use omr_core::matcher::MatchParams;
use omr_core::session::InterView;
use omr_core::sig::SigError;
use omr_core::template::TemplateError;
use omr_core::{
    Anchor, DistanceField, Error, InspectorSession, LocationHint, Shape, TemplateFactory,
};
use std::sync::Arc;

fn painted_session(at: PixelPoint) -> InspectorSession {
    let factory = Arc::new(TemplateFactory::default());
    let catalog = factory.catalog(20).expect("catalog");
    let template = Arc::clone(catalog.template(Shape::NoteheadBlack).expect("template"));
    let anchored =
        omr_core::AnchoredTemplate::new(template, Anchor::RightStem).expect("anchored");
    let (w, h) = (100usize, 80usize);
    let mut page = blank_page(w, h);
    paint_template(&mut page, w, &anchored, at);
    let view = ImageU8 { w, h, stride: w, data: &page };
    let field = Arc::new(DistanceField::from_image(&view, 128));
    let sig = chord_graph().sig;
    InspectorSession::new(factory, field, 20, &MatchParams::default(), sig).expect("session")
}

#[test]
fn reference_location_reports_template_grade() {
    init_logging();
    let at = PixelPoint::new(50, 40);
    let mut session = painted_session(at);

    let anchored = session
        .on_template_selection_changed(Shape::NoteheadBlack, Anchor::RightStem)
        .expect("known shape")
        .expect("compatible anchor");
    assert_eq!(anchored.anchor(), Anchor::RightStem);

    let readout = session.on_location_selected(at, LocationHint::Reference);
    assert_eq!(readout.grade, Some(1.0));
    assert_eq!(readout.grade_text(), "1.000");
    assert_eq!(readout.key_point, None);
    assert_eq!(session.reference(), Some(at));

    // the key point under the anchor pixel
    let expected = anchored
        .template()
        .key_point_at(anchored.offset())
        .map(|kp| f64::from(kp.d));
    let readout = session.on_location_selected(at, LocationHint::Inspect);
    assert_eq!(readout.key_point, expected);
    assert_eq!(readout.grade, Some(1.0));
    assert_eq!(session.reference(), Some(at));

    let far = PixelPoint::new(at.x + 60, at.y);
    let readout = session.on_location_selected(far, LocationHint::Inspect);
    assert_eq!(readout.key_point, None);
    assert_eq!(readout.key_point_text(), "");

    let best = session
        .best_match_in(Rect::new(at.x - 4, at.y - 4, 9, 9))
        .expect("region on page");
    assert_eq!(best.location, at);
}

#[test]
fn incompatible_anchor_clears_the_selection() {
    let at = PixelPoint::new(50, 40);
    let mut session = painted_session(at);
    session
        .on_template_selection_changed(Shape::NoteheadBlack, Anchor::LeftStem)
        .expect("known shape");
    session.on_location_selected(at, LocationHint::Reference);

    let selected = session
        .on_template_selection_changed(Shape::WholeNote, Anchor::LeftStem)
        .expect("known shape");
    assert!(selected.is_none());
    assert!(session.anchored().is_none());
    assert_eq!(session.readout().grade, None);
    assert_eq!(session.readout().grade_text(), "");

    let err = session
        .on_template_selection_changed(Shape::Beam, Anchor::MiddleLeft)
        .unwrap_err();
    assert_eq!(err, Error::Template(TemplateError::UnknownShape(Shape::Beam)));
}

#[test]
fn rejected_shape_leaves_the_session_consistent() {
    init_logging();
    let at = PixelPoint::new(50, 40);
    let mut session = painted_session(at);
    session
        .on_template_selection_changed(Shape::NoteheadBlack, Anchor::RightStem)
        .expect("known shape");
    assert_eq!(
        session.on_location_selected(at, LocationHint::Reference).grade,
        Some(1.0)
    );

    let err = session
        .on_template_selection_changed(Shape::Beam, Anchor::MiddleLeft)
        .unwrap_err();
    assert_eq!(err, Error::Template(TemplateError::UnknownShape(Shape::Beam)));
    let anchored = session.anchored().expect("previous selection kept");
    assert_eq!(anchored.shape(), Shape::NoteheadBlack);
    assert_eq!(anchored.anchor(), Anchor::RightStem);
    assert_eq!(session.readout().grade, Some(1.0));

    session.set_interline(12).expect("selection resolves at any interline");
    assert_eq!(session.interline(), 12);
    let anchored = session.anchored().expect("selection survives");
    assert_eq!(anchored.template().interline(), 12);
    assert_eq!(anchored.shape(), Shape::NoteheadBlack);
    let grade = session.readout().grade.expect("reference inside the page");
    assert!(grade < 1.0);
}

#[test]
fn interline_change_keeps_the_selection() {
    let field = Arc::new(
        DistanceField::from_values(64, 64, vec![0.0; 64 * 64], 3.0).expect("field"),
    );
    let mut session =
        InspectorSession::from_params(field, 20, &EngineParams::default()).expect("session");
    session
        .on_template_selection_changed(Shape::NoteheadVoidSmall, Anchor::MiddleLeft)
        .expect("known shape");
    session.on_location_selected(PixelPoint::new(30, 30), LocationHint::Reference);

    session.set_interline(12).expect("valid interline");
    assert_eq!(session.interline(), 12);
    let anchored = session.anchored().expect("selection survives");
    assert_eq!(anchored.template().interline(), 12);
    assert_eq!(anchored.shape(), Shape::NoteheadVoidSmall);
    assert!(session.readout().grade.is_some());

    assert_eq!(
        session.set_interline(0),
        Err(Error::Template(TemplateError::InvalidScale(0)))
    );
    assert_eq!(session.interline(), 12);
}

#[test]
fn selecting_an_inter_shows_fresh_grades() {
    init_logging();
    let field = Arc::new(DistanceField::from_values(4, 4, vec![0.0; 16], 3.0).expect("field"));
    let g = chord_graph();
    let (strong, weak) = (g.strong_head, g.weak_head);
    let mut session = InspectorSession::new(
        Arc::new(TemplateFactory::default()),
        field,
        10,
        &MatchParams::default(),
        g.sig,
    )
    .expect("session");

    assert_eq!(session.on_inter_selected(None).expect("no selection"), InterView::empty());

    let view = session.on_inter_selected(Some(strong)).expect("strong head");
    assert_eq!(view.shape_text, "NOTEHEAD_BLACK");
    assert_eq!(view.grade_text, "0.70/0.80");
    assert_eq!(view.deassign_label, "Deassign");
    assert!(view.deassign_enabled);
    assert!(view.details.starts_with("intrinsic:0.70"));

    // deleting the competitor changes what the strong head sees
    session.sig_mut().deassign(weak).expect("deassign");
    let view = session.on_inter_selected(Some(strong)).expect("strong head");
    assert_eq!(view.grade_text, "0.70/0.83");
}

#[test]
fn deassign_request_regrades_neighbours() {
    init_logging();
    let field = Arc::new(DistanceField::from_values(4, 4, vec![0.0; 16], 3.0).expect("field"));
    let g = chord_graph();
    let (strong, weak, stem) = (g.strong_head, g.weak_head, g.stem);
    let mut session = InspectorSession::new(
        Arc::new(TemplateFactory::default()),
        field,
        10,
        &MatchParams::default(),
        g.sig,
    )
    .expect("session");

    let report = session.on_deassign_requested(weak).expect("active inter");
    assert_eq!(report.deassigned, weak);
    // head-stem 1 + 0.8, overlap 1 - 0.7 * 0.5
    let ratio = 1.8 * 0.65;
    assert_close(report.grade_before, ratio * 0.4 / (1.0 + (ratio - 1.0) * 0.4), 1e-12);
    let regraded: Vec<_> = report.regraded.iter().map(|&(id, _)| id).collect();
    assert_eq!(regraded, vec![strong, stem]);
    assert_close(report.regraded[1].1, 1.7 * 0.8 / (1.0 + 0.7 * 0.8), 1e-12);
    assert_eq!(report.view.deassign_label, "deleted");
    assert!(!report.view.deassign_enabled);
    assert_eq!(report.view.grade_text, "0.40/0.44");

    let view = session.on_inter_selected(Some(weak)).expect("deleted inters stay visible");
    assert_eq!(view.deassign_label, "deleted");

    let err = session.on_deassign_requested(weak).unwrap_err();
    assert_eq!(err, Error::Sig(SigError::Deleted(weak)));
    assert!(err.is_invalid_state());
}
