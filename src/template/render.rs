//! Synthetic rendering of note symbols.
//!
//! Symbols are axis-aligned ellipses sized from the interline. Void heads and
//! whole notes get an elliptic hole with the same centre. Rendering samples
//! pixel centres, so the result is deterministic for a given interline.
use super::params::TemplateParams;
use crate::shape::{NoteFamily, Shape};

/// Binary rendering of a symbol, row-major, `true` on ink.
#[derive(Clone, Debug)]
pub(crate) struct SymbolMask {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<bool>,
}

impl SymbolMask {
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }
}

/// Symbol box size of a note family at `interline`.
pub(crate) fn symbol_size(
    family: NoteFamily,
    small: bool,
    interline: u32,
    params: &TemplateParams,
) -> (usize, usize) {
    let scale = interline as f32 * if small { params.small_ratio } else { 1.0 };
    let width_ratio = match family {
        NoteFamily::Whole => params.whole_width,
        NoteFamily::Black | NoteFamily::Void => params.head_width,
    };
    let w = (scale * width_ratio).round().max(1.0) as usize;
    let h = (scale * params.head_height).round().max(1.0) as usize;
    (w, h)
}

/// Render the symbol of a template-note `shape`; `None` for other shapes.
pub(crate) fn render_symbol(
    shape: Shape,
    interline: u32,
    params: &TemplateParams,
) -> Option<SymbolMask> {
    let family = shape.note_family()?;
    let (w, h) = symbol_size(family, shape.is_small(), interline, params);
    let a = w as f32 / 2.0;
    let b = h as f32 / 2.0;
    // a hole narrower than 3 pixels would swallow the whole symbol
    let hollow = family != NoteFamily::Black && w >= 3 && h >= 3;
    let (ha, hb) = (a * params.hole_ratio, b * params.hole_ratio);

    let mut pixels = Vec::with_capacity(w * h);
    for py in 0..h {
        for px in 0..w {
            let dx = px as f32 + 0.5 - a;
            let dy = py as f32 + 0.5 - b;
            let outer = (dx / a).powi(2) + (dy / b).powi(2) <= 1.0;
            let hole =
                hollow && ha > 0.0 && hb > 0.0 && (dx / ha).powi(2) + (dy / hb).powi(2) < 1.0;
            pixels.push(outer && !hole);
        }
    }
    Some(SymbolMask {
        width: w,
        height: h,
        pixels,
    })
}
