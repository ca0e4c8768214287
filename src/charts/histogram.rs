//! Histogram with hue grouping, highlighting, and aligned bin edges.

use crate::charts::{resolve_layers, RenderLayers};
use crate::color::{CategoryPalette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::SvgEncoder;
use crate::render::draw_rect;
use crate::scale::{LinearScale, LogScale, Scale};
use crate::table::{Table, Value};
use trueno::Vector;

/// Bin specification for a histogram.
#[derive(Debug, Clone, Copy, Default)]
pub enum Bins {
    /// Fall back to 10 bins, with a warning.
    #[default]
    Auto,
    /// Fixed number of bins.
    Count(usize),
    /// Fixed bin width (in log units when log binning is active).
    Width(f32),
}

/// Builder for histograms over a table.
///
/// All layers share one set of bin edges computed from the full data (or the
/// explicit range), so the gray background and the highlighted subset stay
/// comparable bar by bar.
#[derive(Debug, Clone)]
pub struct HistPlot {
    table: Table,
    x_col: String,
    hue: Option<String>,
    highlights: Option<Vec<String>>,
    bins: Bins,
    bin_range: Option<(f32, f32)>,
    log_scale: Option<f32>,
    width: u32,
    height: u32,
    margin: u32,
}

impl HistPlot {
    /// Create a new histogram over a table.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self {
            table,
            x_col: String::new(),
            hue: None,
            highlights: None,
            bins: Bins::Auto,
            bin_range: None,
            log_scale: None,
            width: 800,
            height: 600,
            margin: 40,
        }
    }

    /// Set the value column.
    #[must_use]
    pub fn x(mut self, column: &str) -> Self {
        self.x_col = column.to_string();
        self
    }

    /// Set the hue (grouping) column.
    #[must_use]
    pub fn hue(mut self, column: &str) -> Self {
        self.hue = Some(column.to_string());
        self
    }

    /// Restrict coloring to the named hue levels; the full distribution
    /// renders gray underneath.
    #[must_use]
    pub fn highlights(mut self, labels: &[&str]) -> Self {
        self.highlights = Some(labels.iter().map(|&s| s.to_string()).collect());
        self
    }

    /// Set the bin specification.
    #[must_use]
    pub fn bins(mut self, bins: Bins) -> Self {
        self.bins = bins;
        self
    }

    /// Override the bin range in data units.
    #[must_use]
    pub fn bin_range(mut self, min: f32, max: f32) -> Self {
        self.bin_range = Some((min, max));
        self
    }

    /// Bin on a logarithmic axis with the given base. Base 1 means 10.
    #[must_use]
    pub fn log_scale(mut self, base: f32) -> Self {
        self.log_scale = Some(base);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Build and validate the histogram.
    ///
    /// # Errors
    ///
    /// Fails when the value column is missing or empty, highlight labels
    /// cannot match the hue column, or log binning meets non-positive data.
    pub fn build(self) -> Result<Self> {
        super::warn_highlights_without_hue(self.hue.as_deref(), self.highlights.as_deref());

        if matches!(self.bins, Bins::Auto) {
            log::warn!(
                "Either a bin count or a bin width should be set to align bin edges. \
                 Falling back to 10 bins, but you will likely want to adjust."
            );
        }

        let values = self.numeric_values()?;
        if values.is_empty() {
            return Err(Error::EmptyData);
        }

        resolve_layers(
            &self.table,
            self.hue.as_deref(),
            self.highlights.as_deref(),
        )?;

        // Surfaces range and log-domain errors at build time
        let (min, max, count) = self.edges(&values)?;
        self.bin_scale(min, max, count)?;

        Ok(self)
    }

    /// Non-null values of the value column, row-aligned with `numeric_rows`.
    fn numeric_values(&self) -> Result<Vec<f32>> {
        let column = self.table.require_column(&self.x_col)?;
        Ok(column.iter().filter_map(Value::as_f32).collect())
    }

    /// Row indices carrying the values returned by `numeric_values`.
    fn numeric_rows(&self) -> Result<Vec<usize>> {
        let column = self.table.require_column(&self.x_col)?;
        Ok((0..column.len())
            .filter(|&i| column[i].as_f32().is_some())
            .collect())
    }

    /// Resolved logarithm base, if log binning is active.
    fn log_base(&self) -> Option<f32> {
        self.log_scale.map(|base| {
            if (base - 1.0).abs() < f32::EPSILON {
                10.0
            } else {
                base
            }
        })
    }

    /// Shared bin range and count for every layer.
    fn edges(&self, values: &[f32]) -> Result<(f32, f32, usize)> {
        let (min, max) = match self.bin_range {
            Some(range) => range,
            None => {
                // SIMD reduction over the full column; fold is the fallback
                let fold_min = values.iter().copied().fold(f32::INFINITY, f32::min);
                let fold_max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let vec = Vector::from_vec(values.to_vec());
                (vec.min().unwrap_or(fold_min), vec.max().unwrap_or(fold_max))
            }
        };

        let (min, max) = if (max - min).abs() < f32::EPSILON {
            match self.log_base() {
                // Keep the padded range positive in log mode
                Some(_) => (min / 2.0, max * 2.0),
                None => (min - 0.5, max + 0.5),
            }
        } else {
            (min, max)
        };

        let count = match self.bins {
            Bins::Auto => 10,
            Bins::Count(n) => n.max(1),
            Bins::Width(w) => {
                if w <= 0.0 {
                    return Err(Error::ScaleDomain(
                        "Bin width must be positive".to_string(),
                    ));
                }
                let span = match self.log_base() {
                    Some(base) => {
                        if min <= 0.0 {
                            return Err(Error::ScaleDomain(
                                "Log-binned histogram requires positive data".to_string(),
                            ));
                        }
                        (max.ln() - min.ln()) / base.ln()
                    }
                    None => max - min,
                };
                ((span / w).ceil() as usize).max(1)
            }
        };

        Ok((min, max, count))
    }

    /// Scale mapping a data value onto the bin index axis `0..count`.
    fn bin_scale(&self, min: f32, max: f32, count: usize) -> Result<Box<dyn Scale<f32, f32>>> {
        match self.log_base() {
            Some(base) => Ok(Box::new(LogScale::with_base(
                (min, max),
                (0.0, count as f32),
                base,
            )?)),
            None => Ok(Box::new(LinearScale::new((min, max), (0.0, count as f32))?)),
        }
    }

    /// Count one layer's values into the shared bins.
    fn counts(
        &self,
        values: &[f32],
        rows: &[usize],
        level: Option<&Value>,
        scale: &dyn Scale<f32, f32>,
        count: usize,
    ) -> Vec<usize> {
        let hue = self.hue.as_deref();
        let mut bins = vec![0usize; count];

        for (&row, &v) in rows.iter().zip(values.iter()) {
            if let (Some(level), Some(hue)) = (level, hue) {
                if self.table.value(row, hue) != *level {
                    continue;
                }
            }

            let t = scale.scale(v);
            if !(0.0..=count as f32).contains(&t) {
                continue;
            }
            let bin = (t.floor() as usize).min(count - 1);
            bins[bin] += 1;
        }

        bins
    }

    /// Render the histogram onto a framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram fails validation.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let values = self.numeric_values()?;
        let rows = self.numeric_rows()?;
        if values.is_empty() {
            return Err(Error::EmptyData);
        }

        let (min, max, count) = self.edges(&values)?;
        let scale = self.bin_scale(min, max, count)?;

        let layers = resolve_layers(
            &self.table,
            self.hue.as_deref(),
            self.highlights.as_deref(),
        )?;

        // (counts, color) per layer, front-to-back
        let mut layer_counts: Vec<(Vec<usize>, Rgba)> = Vec::new();
        match &layers {
            RenderLayers::Plain => {
                layer_counts.push((
                    self.counts(&values, &rows, None, scale.as_ref(), count),
                    CategoryPalette::color(0),
                ));
            }
            RenderLayers::Hue(groups) => {
                for (level, color) in groups {
                    layer_counts.push((
                        self.counts(&values, &rows, Some(level), scale.as_ref(), count),
                        *color,
                    ));
                }
            }
            RenderLayers::Highlight(groups) => {
                layer_counts.push((
                    self.counts(&values, &rows, None, scale.as_ref(), count),
                    Rgba::HIGHLIGHT_GRAY,
                ));
                for (level, color) in groups {
                    layer_counts.push((
                        self.counts(&values, &rows, Some(level), scale.as_ref(), count),
                        *color,
                    ));
                }
            }
        }

        let max_count = layer_counts
            .iter()
            .flat_map(|(counts, _)| counts.iter().copied())
            .max()
            .unwrap_or(1)
            .max(1);

        let area = super::plot_area(self.width, self.height, self.margin);
        let bar_width = ((area.width as u32) / count as u32).max(1);

        for (counts, color) in &layer_counts {
            for (i, &n) in counts.iter().enumerate() {
                let bar_height = ((n as f32 / max_count as f32) * area.height) as u32;
                if bar_height == 0 {
                    continue;
                }
                let x_start = area.x as i32 + i as i32 * bar_width as i32;
                let y_start = area.bottom() as i32 - bar_height as i32;
                draw_rect(
                    fb,
                    x_start,
                    y_start.max(0),
                    bar_width.saturating_sub(1).max(1),
                    bar_height,
                    *color,
                );
            }
        }

        Ok(())
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);
        self.render(&mut fb)?;
        Ok(fb)
    }

    /// Render to an SVG canvas with the raster embedded.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or PNG encoding fails.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        SvgEncoder::from_framebuffer(&self.to_framebuffer()?)
    }

    /// Number of bins the current configuration produces.
    ///
    /// # Errors
    ///
    /// Returns an error if the data or configuration is invalid.
    pub fn bin_count(&self) -> Result<usize> {
        let values = self.numeric_values()?;
        if values.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(self.edges(&values)?.2)
    }
}

impl batuta_common::display::WithDimensions for HistPlot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut t = Table::new();
        let data: Vec<f32> = (1..=40).map(|i| i as f32).collect();
        t.add_column_f32("value", &data);
        let kinds: Vec<&str> = (1..=40)
            .map(|i| if i % 2 == 0 { "even" } else { "odd" })
            .collect();
        t.add_column_str("kind", &kinds);
        t
    }

    #[test]
    fn test_auto_bins_fall_back_to_ten() {
        let hist = HistPlot::new(table()).x("value").build().unwrap();
        assert_eq!(hist.bin_count().unwrap(), 10);
    }

    #[test]
    fn test_fixed_bin_count() {
        let hist = HistPlot::new(table())
            .x("value")
            .bins(Bins::Count(5))
            .build()
            .unwrap();
        assert_eq!(hist.bin_count().unwrap(), 5);
    }

    #[test]
    fn test_bin_width() {
        let hist = HistPlot::new(table())
            .x("value")
            .bins(Bins::Width(10.0))
            .build()
            .unwrap();
        // Range 1..40 at width 10 → 4 bins
        assert_eq!(hist.bin_count().unwrap(), 4);
    }

    #[test]
    fn test_bin_width_must_be_positive() {
        let result = HistPlot::new(table())
            .x("value")
            .bins(Bins::Width(0.0))
            .build();
        assert!(matches!(result, Err(Error::ScaleDomain(_))));
    }

    #[test]
    fn test_explicit_bin_range() {
        let hist = HistPlot::new(table())
            .x("value")
            .bins(Bins::Width(5.0))
            .bin_range(0.0, 20.0)
            .build()
            .unwrap();
        assert_eq!(hist.bin_count().unwrap(), 4);
    }

    #[test]
    fn test_log_scale_rejects_non_positive() {
        let mut t = Table::new();
        t.add_column_f32("v", &[0.0, 1.0, 10.0]);
        let result = HistPlot::new(t)
            .x("v")
            .bins(Bins::Count(4))
            .log_scale(10.0)
            .build();
        assert!(matches!(result, Err(Error::ScaleDomain(_))));
    }

    #[test]
    fn test_log_scale_base_one_means_ten() {
        let mut t = Table::new();
        t.add_column_f32("v", &[1.0, 10.0, 100.0, 1000.0]);
        let hist = HistPlot::new(t)
            .x("v")
            .bins(Bins::Width(1.0))
            .log_scale(1.0)
            .build()
            .unwrap();
        // log10 range 0..3 at width 1 → 3 bins
        assert_eq!(hist.bin_count().unwrap(), 3);
    }

    #[test]
    fn test_log_scale_render() {
        let mut t = Table::new();
        t.add_column_f32("v", &[1.0, 2.0, 10.0, 50.0, 100.0, 500.0]);
        let hist = HistPlot::new(t)
            .x("v")
            .bins(Bins::Count(6))
            .log_scale(10.0)
            .dimensions(100, 80)
            .build()
            .unwrap();
        assert!(hist.to_framebuffer().is_ok());
    }

    #[test]
    fn test_render_plain() {
        let hist = HistPlot::new(table())
            .x("value")
            .bins(Bins::Count(8))
            .dimensions(120, 100)
            .build()
            .unwrap();
        let fb = hist.to_framebuffer().unwrap();

        let mut non_white = 0;
        for y in 0..100 {
            for x in 0..120 {
                if fb.get_pixel(x, y) != Some(Rgba::WHITE) {
                    non_white += 1;
                }
            }
        }
        assert!(non_white > 0);
    }

    #[test]
    fn test_render_highlight_layers_share_edges() {
        let hist = HistPlot::new(table())
            .x("value")
            .hue("kind")
            .highlights(&["even"])
            .bins(Bins::Count(8))
            .dimensions(160, 120)
            .build()
            .unwrap();
        let fb = hist.to_framebuffer().unwrap();

        let mut saw_gray = false;
        for y in 0..120 {
            for x in 0..160 {
                if fb.get_pixel(x, y) == Some(Rgba::HIGHLIGHT_GRAY) {
                    saw_gray = true;
                }
            }
        }
        assert!(saw_gray);
    }

    #[test]
    fn test_missing_column() {
        let result = HistPlot::new(table()).x("nope").build();
        assert!(matches!(result, Err(Error::ColumnNotFound(_))));
    }

    #[test]
    fn test_empty_data() {
        let mut t = Table::new();
        t.add_column_opt_f32("v", &[None, None]);
        let result = HistPlot::new(t).x("v").build();
        assert!(matches!(result, Err(Error::EmptyData)));
    }

    #[test]
    fn test_degenerate_range_padded() {
        let mut t = Table::new();
        t.add_column_f32("v", &[5.0, 5.0, 5.0]);
        let hist = HistPlot::new(t)
            .x("v")
            .bins(Bins::Count(4))
            .dimensions(80, 80)
            .build()
            .unwrap();
        assert!(hist.to_framebuffer().is_ok());
    }
}
