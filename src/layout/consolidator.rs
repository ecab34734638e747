//! Text fragment consolidation.
//!
//! Decoders report text one glyph at a time, grouped into runs by the
//! content-stream operator that drew them. Two passes turn that into usable
//! fragments:
//!
//! - **Glyph fusion** splits each run into visual lines and composes glyphs
//!   that were drawn as overlapping pairs (a base letter and a spacing accent,
//!   or an `o`/`a` over a short rule for the ordinal indicators).
//! - **Run merging** joins consecutive fragments on the same baseline that are
//!   only a couple of characters apart, unless a vertical rule separates them.

use phf::phf_map;

use crate::elements::{TextFragment, TextRun};
use crate::geometry::Rect;
use crate::layout::grid::Grid;
use crate::pipeline::config::LayoutConfig;

/// Compositions of a trailing character with the glyph drawn over it.
static FUSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    // Ordinal indicators (the rule may also come from an underline)
    "o-" => "º",
    "a-" => "ª",
    // Acute
    "a´" => "á", "e´" => "é", "i´" => "í", "o´" => "ó", "u´" => "ú",
    "A´" => "Á", "E´" => "É", "I´" => "Í", "O´" => "Ó", "U´" => "Ú",
    // Grave
    "a`" => "à", "A`" => "À",
    // Circumflex, ASCII and modifier letter
    "a^" => "â", "e^" => "ê", "o^" => "ô", "A^" => "Â", "E^" => "Ê", "O^" => "Ô",
    "aˆ" => "â", "eˆ" => "ê", "oˆ" => "ô", "Aˆ" => "Â", "Eˆ" => "Ê", "Oˆ" => "Ô",
    // Tilde, ASCII and small tilde
    "a~" => "ã", "o~" => "õ", "n~" => "ñ", "A~" => "Ã", "O~" => "Õ", "N~" => "Ñ",
    "a˜" => "ã", "o˜" => "õ", "n˜" => "ñ", "A˜" => "Ã", "O˜" => "Õ", "N˜" => "Ñ",
    // Cedilla
    "c¸" => "ç", "C¸" => "Ç",
    // Diaeresis
    "u¨" => "ü", "U¨" => "Ü",
};

/// Composition of `base` with the first character of `mark`, if any.
///
/// # Examples
///
/// ```
/// use page_oxide::layout::fusion;
///
/// assert_eq!(fusion('o', "-"), Some("º"));
/// assert_eq!(fusion('c', "¸"), Some("ç"));
/// assert_eq!(fusion('x', "-"), None);
/// ```
pub fn fusion(base: char, mark: &str) -> Option<&'static str> {
    let mark = mark.chars().next()?;
    let mut key = String::with_capacity(8);
    key.push(base);
    key.push(mark);
    FUSIONS.get(key.as_str()).copied()
}

/// Output of glyph fusion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consolidation {
    /// Fragments in extraction order
    pub fragments: Vec<TextFragment>,
    /// Underline bars composed into ordinal glyphs; no longer part of the grid
    pub consumed_underlines: Vec<Rect>,
}

/// Fragment under construction.
struct Partial {
    text: String,
    bbox: Option<Rect>,
}

impl Partial {
    fn new() -> Self {
        Self {
            text: String::new(),
            bbox: None,
        }
    }

    fn extend(&mut self, bbox: Rect) {
        self.bbox = Some(self.bbox.map_or(bbox, |b| b.union(&bbox)));
    }

    fn widen(&mut self, x1: f32) {
        if let Some(bbox) = self.bbox.as_mut() {
            bbox.x1 = bbox.x1.max(x1);
        }
    }

    /// Replace the trailing character with `composed` when the pair is fusible.
    fn try_compose(&mut self, mark: &str) -> bool {
        let Some(last) = self.text.chars().last() else {
            return false;
        };
        match fusion(last, mark) {
            Some(composed) => {
                self.text.truncate(self.text.len() - last.len_utf8());
                self.text.push_str(composed);
                true
            },
            None => false,
        }
    }

    fn finish(self, run: &TextRun) -> Option<TextFragment> {
        self.bbox
            .map(|bbox| TextFragment::new(self.text, bbox, run.font_name.clone(), run.font_size))
    }
}

/// Split runs into fragments and compose fused glyphs.
///
/// `underlines` are the candidate horizontal bars; each one composed into a
/// glyph is reported once in [`Consolidation::consumed_underlines`].
pub fn fuse_glyphs(runs: &[TextRun], underlines: &[Rect], config: &LayoutConfig) -> Consolidation {
    let mut out = Consolidation::default();
    for run in runs {
        let mut partial = Partial::new();
        let mut last_left = f32::NEG_INFINITY;
        let mut last_right = f32::NEG_INFINITY;

        for glyph in &run.glyphs {
            let mut character = glyph.text.clone();
            if config.fuse_glyphs {
                if let Some(composed) = underlined(&character, &glyph.bbox, underlines, &out, config) {
                    character = composed.0.to_string();
                    out.consumed_underlines.push(composed.1);
                }
            }

            let x = glyph.bbox.x0;
            if x < last_left {
                // The run wrapped back to the left: a new visual line
                let done = std::mem::replace(&mut partial, Partial::new());
                out.fragments.extend(done.finish(run));
                partial.text.push_str(&character);
                partial.extend(glyph.bbox);
            } else if config.fuse_glyphs && x < last_right && partial.try_compose(&character) {
                // A fused mark keeps the base glyph's vertical extent
                partial.widen(glyph.bbox.x1);
            } else {
                partial.text.push_str(&character);
                partial.extend(glyph.bbox);
            }
            last_left = x;
            last_right = glyph.bbox.x1;
        }
        out.fragments.extend(partial.finish(run));
    }
    log::debug!(
        "glyph fusion: {} runs -> {} fragments, {} underlines consumed",
        runs.len(),
        out.fragments.len(),
        out.consumed_underlines.len()
    );
    out
}

/// Composition of a glyph with a matching unused underline.
fn underlined(
    character: &str,
    bbox: &Rect,
    underlines: &[Rect],
    so_far: &Consolidation,
    config: &LayoutConfig,
) -> Option<(&'static str, Rect)> {
    let base = character.chars().next()?;
    let composed = fusion(base, "-")?;
    let reach = bbox.expand_vertically(config.underline_tolerance);
    underlines
        .iter()
        .find(|bar| {
            bar.intersects(&reach)
                && (bar.width() - bbox.width()).abs() < config.underline_width_tolerance
                && !so_far.consumed_underlines.contains(bar)
        })
        .map(|bar| (composed, *bar))
}

/// Join consecutive fragments on one line.
///
/// `separators` are vertical bars; a merge whose rectangle would be cut by
/// one of them (interior overlap without the bar enclosing the merge) is
/// rejected.
pub fn merge_consecutive(
    fragments: Vec<TextFragment>,
    separators: &[Rect],
    config: &LayoutConfig,
) -> Vec<TextFragment> {
    let before = fragments.len();
    let mut out = Vec::with_capacity(before);
    let mut iter = fragments.into_iter();
    let Some(mut acc) = iter.next() else {
        return out;
    };
    for next in iter {
        match merged_bbox(&acc, &next, separators, config) {
            Some(bbox) => {
                acc.text.push(' ');
                acc.text.push_str(&next.text);
                acc.bbox = bbox;
            },
            None => out.push(std::mem::replace(&mut acc, next)),
        }
    }
    out.push(acc);
    log::debug!("run merging: {} -> {} fragments", before, out.len());
    out
}

fn merged_bbox(
    acc: &TextFragment,
    next: &TextFragment,
    separators: &[Rect],
    config: &LayoutConfig,
) -> Option<Rect> {
    if acc.bbox.x0 >= next.bbox.x0 {
        return None;
    }
    if (acc.bbox.y1 - next.bbox.y1).abs() > config.baseline_tolerance {
        return None;
    }
    let distance = (next.bbox.x0 - acc.bbox.x1) / acc.avg_char_width();
    if distance.is_nan() || distance > config.join_char_distance {
        return None;
    }
    let merged = acc.bbox.union(&next.bbox);
    let cut = separators
        .iter()
        .any(|bar| bar.overlaps_interior(&merged) && !bar.encloses(&merged));
    (!cut).then_some(merged)
}

/// Run both passes against a page grid.
pub fn consolidate(runs: &[TextRun], grid: &Grid, config: &LayoutConfig) -> Consolidation {
    let mut fused = fuse_glyphs(runs, &grid.horizontal_rects(), config);
    if config.merge_runs {
        let separators = grid.vertical_rects();
        fused.fragments = merge_consecutive(fused.fragments, &separators, config);
    }
    fused
}
