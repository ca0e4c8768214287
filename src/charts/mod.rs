//! High-level chart types.
//!
//! Provides ready-to-use statistical charts with builder APIs: highlighted
//! scatter/line/histogram plots plus slope and dumbbell comparison charts.

mod dumbbell;
mod histogram;
mod line;
mod scatter;
mod slope;

pub use dumbbell::{BuiltDumbbellChart, DumbbellChart};
pub use histogram::{Bins, HistPlot};
pub use line::LinePlot;
pub use scatter::ScatterPlot;
pub use slope::{BuiltSlopeChart, SlopeChart};

use crate::color::{CategoryPalette, Rgba};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::table::{Table, Value};

/// Color layers a hue/highlight configuration expands to.
///
/// Rendering is front-to-back: the de-emphasized layer (if any) first, then
/// one colored layer per hue level.
#[derive(Debug, Clone)]
pub(crate) enum RenderLayers {
    /// No hue: one layer in the chart's base color.
    Plain,
    /// Hue without highlights: one colored layer per hue level.
    Hue(Vec<(Value, Rgba)>),
    /// Hue with highlights: full data in gray, then the highlighted levels.
    Highlight(Vec<(Value, Rgba)>),
}

/// Expand hue/highlight options into render layers.
///
/// Highlights without a hue column degrade to [`RenderLayers::Plain`]; the
/// caller is expected to have warned at build time. Highlight labels are
/// matched against the hue column's text values, in the column's sorted
/// level order.
pub(crate) fn resolve_layers(
    table: &Table,
    hue: Option<&str>,
    highlights: Option<&[String]>,
) -> Result<RenderLayers> {
    let Some(hue) = hue else {
        return Ok(RenderLayers::Plain);
    };
    table.require_column(hue)?;

    let levels = table.distinct_sorted(hue);
    let colored = |values: Vec<Value>| -> Vec<(Value, Rgba)> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (v, CategoryPalette::color(i)))
            .collect()
    };

    match highlights {
        None => Ok(RenderLayers::Hue(colored(levels))),
        Some(labels) => {
            if !levels.iter().any(|v| v.as_str().is_some()) {
                return Err(Error::HighlightType {
                    column: hue.to_string(),
                });
            }
            let kept: Vec<Value> = levels
                .into_iter()
                .filter(|v| v.as_str().is_some_and(|s| labels.iter().any(|l| l == s)))
                .collect();
            Ok(RenderLayers::Highlight(colored(kept)))
        }
    }
}

/// Emit the ignored-highlights warning when highlights come without a hue.
pub(crate) fn warn_highlights_without_hue(hue: Option<&str>, highlights: Option<&[String]>) {
    if hue.is_none() && highlights.is_some() {
        log::warn!("`highlights` is ignored, as `hue` is not specified");
    }
}

/// Row indices whose x and y cells are both numeric, with the values.
pub(crate) fn numeric_pairs(
    table: &Table,
    x_col: &str,
    y_col: &str,
) -> Result<Vec<(usize, f32, f32)>> {
    table.require_column(x_col)?;
    table.require_column(y_col)?;

    Ok((0..table.n_rows())
        .filter_map(|i| {
            let x = table.value(i, x_col).as_f32()?;
            let y = table.value(i, y_col).as_f32()?;
            Some((i, x, y))
        })
        .collect())
}

/// The drawable region of a canvas after subtracting the margin.
pub(crate) fn plot_area(width: u32, height: u32, margin: u32) -> Rect {
    Rect::new(
        margin as f32,
        margin as f32,
        width.saturating_sub(2 * margin) as f32,
        height.saturating_sub(2 * margin) as f32,
    )
}

/// Data extent, padded when degenerate so a linear scale can always be built.
pub(crate) fn padded_extent(values: impl Iterator<Item = f32>) -> Option<(f32, f32)> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut any = false;

    for v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
            any = true;
        }
    }

    if !any {
        return None;
    }
    if (max - min).abs() < f32::EPSILON {
        return Some((min - 1.0, max + 1.0));
    }
    Some((min, max))
}
