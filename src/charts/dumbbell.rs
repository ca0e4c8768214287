//! Dumbbell chart: before/after value pairs per row label.
//!
//! Rows are pivoted into aligned before/after pairs, ordered ascending by
//! the after value; each connector is colored by the same larger/smaller/
//! within-margin comparison the slope chart uses.

use crate::charts::padded_extent;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::{SvgEncoder, TextAnchor};
use crate::render::{draw_circle, draw_circle_outline, draw_line};
use crate::scale::{LinearScale, Scale};
use crate::table::{Table, Value};
use crate::transform::{align_pairs, classify_series, PairedSeries, Trend, TrendPalette};

/// Builder for dumbbell charts.
#[derive(Debug, Clone)]
pub struct DumbbellChart {
    table: Table,
    value_col: String,
    label_col: String,
    marker_col: String,
    markers: Option<(Value, Value)>,
    palette: TrendPalette,
    tolerance: f32,
    decimals: usize,
    title: Option<String>,
    width: u32,
    height: u32,
    margin: u32,
}

impl DumbbellChart {
    /// Create a new dumbbell chart over a table.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self {
            table,
            value_col: String::new(),
            label_col: String::new(),
            marker_col: String::new(),
            markers: None,
            palette: TrendPalette::default(),
            tolerance: 0.0,
            decimals: 0,
            title: None,
            width: 800,
            height: 600,
            margin: 90,
        }
    }

    /// Set the numeric value column.
    #[must_use]
    pub fn value(mut self, column: &str) -> Self {
        self.value_col = column.to_string();
        self
    }

    /// Set the categorical row-label column.
    #[must_use]
    pub fn label(mut self, column: &str) -> Self {
        self.label_col = column.to_string();
        self
    }

    /// Set the grouping column holding the two marker values.
    #[must_use]
    pub fn marker(mut self, column: &str) -> Self {
        self.marker_col = column.to_string();
        self
    }

    /// Fix the (before, after) marker values explicitly.
    ///
    /// Defaults to the sorted distinct values of the marker column, which
    /// must then number exactly two.
    #[must_use]
    pub fn markers(mut self, before: impl Into<Value>, after: impl Into<Value>) -> Self {
        self.markers = Some((before.into(), after.into()));
        self
    }

    /// Set the trend color mapping for the connectors.
    #[must_use]
    pub fn palette(mut self, palette: TrendPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Margin within which a before/after change counts as even.
    ///
    /// Negative input behaves as zero.
    #[must_use]
    pub fn tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Decimal places in value annotations.
    #[must_use]
    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Set the chart title. Defaults to the value column name.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Pivot, order, and classify the rows.
    ///
    /// # Errors
    ///
    /// Fails when a named column is missing, the defaulted marker column
    /// does not hold exactly two distinct values, or no row survives the
    /// missing-value drop.
    pub fn build(self) -> Result<BuiltDumbbellChart> {
        let pairs = align_pairs(
            &self.table,
            &self.value_col,
            &self.label_col,
            &self.marker_col,
            self.markers,
        )?;
        if pairs.is_empty() {
            return Err(Error::EmptyData);
        }

        let trends = classify_series(&pairs.before, &pairs.after, self.tolerance)?;
        let colors: Vec<Rgba> = trends.iter().map(|&t| self.palette.color(t)).collect();
        let title = self.title.unwrap_or_else(|| self.value_col.clone());

        Ok(BuiltDumbbellChart {
            pairs,
            trends,
            colors,
            decimals: self.decimals,
            title,
            width: self.width,
            height: self.height,
            margin: self.margin,
        })
    }
}

impl batuta_common::display::WithDimensions for DumbbellChart {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// A validated dumbbell chart with all geometry resolved.
#[derive(Debug, Clone)]
pub struct BuiltDumbbellChart {
    pairs: PairedSeries,
    trends: Vec<Trend>,
    colors: Vec<Rgba>,
    decimals: usize,
    title: String,
    width: u32,
    height: u32,
    margin: u32,
}

impl BuiltDumbbellChart {
    /// The aligned, ordered before/after pairs.
    #[must_use]
    pub fn pairs(&self) -> &PairedSeries {
        &self.pairs
    }

    /// Per-row trend classifications, aligned with the pair order.
    #[must_use]
    pub fn trends(&self) -> &[Trend] {
        &self.trends
    }

    /// Per-row connector colors, aligned with the pair order.
    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Horizontal pixel scale over the value extent of both markers.
    fn x_scale(&self) -> Result<LinearScale> {
        let extent = padded_extent(
            self.pairs
                .before
                .iter()
                .chain(self.pairs.after.iter())
                .copied(),
        )
        .ok_or(Error::EmptyData)?;
        let area = super::plot_area(self.width, self.height, self.margin);
        LinearScale::new(extent, (area.x, area.right()))
    }

    /// Vertical center of row `i`, rows stacked bottom-up in pair order.
    fn row_y(&self, i: usize) -> f32 {
        let area = super::plot_area(self.width, self.height, self.margin);
        let row_height = area.height / self.pairs.len() as f32;
        area.bottom() - (i as f32 + 0.5) * row_height
    }

    /// Render the dumbbell chart onto a framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if a pixel scale cannot be built.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let x_scale = self.x_scale()?;

        for i in 0..self.pairs.len() {
            let y = self.row_y(i);
            let x0 = x_scale.scale(self.pairs.before[i]);
            let x1 = x_scale.scale(self.pairs.after[i]);

            // Connectors are horizontal, so plain Bresenham is exact
            draw_line(fb, x0 as i32, y as i32, x1 as i32, y as i32, self.colors[i]);
            draw_circle(fb, x0 as i32, y as i32, 4, Rgba::WHITE);
            draw_circle_outline(fb, x0 as i32, y as i32, 4, Rgba::HIGHLIGHT_GRAY);
            draw_circle(fb, x1 as i32, y as i32, 5, self.colors[i]);
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

    /// Render to a vector SVG canvas with row labels and annotations.
    ///
    /// # Errors
    ///
    /// Returns an error if a pixel scale cannot be built.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        let x_scale = self.x_scale()?;
        let area = super::plot_area(self.width, self.height, self.margin);

        let legend = format!("{} → {}", self.pairs.markers.0, self.pairs.markers.1);
        let mut svg = SvgEncoder::new(self.width, self.height)
            .text_anchored(
                self.width as f32 / 2.0,
                self.margin as f32 / 2.0,
                &self.title,
                22.0,
                Rgba::BLACK,
                TextAnchor::Middle,
            )
            .text_anchored(
                area.right(),
                self.margin as f32 / 2.0,
                &legend,
                12.0,
                Rgba::HIGHLIGHT_GRAY,
                TextAnchor::End,
            );

        for i in 0..self.pairs.len() {
            let y = self.row_y(i);
            let x0 = x_scale.scale(self.pairs.before[i]);
            let x1 = x_scale.scale(self.pairs.after[i]);

            svg = svg
                .line(x0, y, x1, y, self.colors[i], 2.0)
                .circle_outlined(x0, y, 4.0, Rgba::WHITE, Rgba::HIGHLIGHT_GRAY, 1.5)
                .circle(x1, y, 5.0, self.colors[i])
                .text_anchored(
                    area.x - 10.0,
                    y + 5.0,
                    &self.pairs.labels[i].to_string(),
                    14.0,
                    Rgba::BLACK,
                    TextAnchor::End,
                )
                .text_anchored(
                    x0,
                    y - 10.0,
                    &format!("{:.*}", self.decimals, self.pairs.before[i]),
                    10.0,
                    Rgba::HIGHLIGHT_GRAY,
                    TextAnchor::Middle,
                )
                .text_anchored(
                    x1,
                    y - 10.0,
                    &format!("{:.*}", self.decimals, self.pairs.after[i]),
                    10.0,
                    self.colors[i],
                    TextAnchor::Middle,
                );
        }

        Ok(svg)
    }
}
