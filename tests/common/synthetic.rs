use omr_core::geometry::PixelPoint;
use omr_core::matcher::AnchoredTemplate;
use omr_core::shape::Shape;
use omr_core::sig::{InterId, NewInter, RelationKind, Sig};

/// Blank white page.
pub fn blank_page(width: usize, height: usize) -> Vec<u8> {
    vec![255u8; width * height]
}

/// Paint the ink of `anchored` with its anchor on `at`, in black.
pub fn paint_template(page: &mut [u8], width: usize, anchored: &AnchoredTemplate, at: PixelPoint) {
    let height = page.len() / width;
    let origin = anchored.bounds_at(at.x, at.y);
    for kp in anchored.template().key_points() {
        if !kp.is_foreground() {
            continue;
        }
        let (x, y) = (origin.x + kp.x, origin.y + kp.y);
        if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
            page[y as usize * width + x as usize] = 0;
        }
    }
}

/// Foreground mask of an 8-bit page (dark pixels are ink).
pub fn ink_mask(page: &[u8]) -> Vec<bool> {
    page.iter().map(|&v| v < 128).collect()
}

/// Two heads competing for one stem, the stronger one also dotted.
pub struct ChordGraph {
    pub sig: Sig,
    pub strong_head: InterId,
    pub weak_head: InterId,
    pub stem: InterId,
    pub dot: InterId,
}

pub fn chord_graph() -> ChordGraph {
    let mut sig = Sig::new();
    let strong_head = sig
        .add_inter(NewInter::shaped(Shape::NoteheadBlack, 0.7))
        .expect("strong head");
    let weak_head = sig
        .add_inter(NewInter::shaped(Shape::NoteheadVoid, 0.4))
        .expect("weak head");
    let stem = sig.add_inter(NewInter::shaped(Shape::Stem, 0.8)).expect("stem");
    let dot = sig
        .add_inter(NewInter::shaped(Shape::AugmentationDot, 0.6))
        .expect("dot");
    sig.add_relation(strong_head, stem, RelationKind::HeadStem)
        .expect("strong head-stem");
    sig.add_relation(weak_head, stem, RelationKind::HeadStem)
        .expect("weak head-stem");
    sig.add_relation(dot, strong_head, RelationKind::Augmentation)
        .expect("augmentation");
    sig.add_relation(strong_head, weak_head, RelationKind::Overlap)
        .expect("overlap");
    ChordGraph {
        sig,
        strong_head,
        weak_head,
        stem,
        dot,
    }
}
