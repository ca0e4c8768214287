//! Slope chart: per-group change between ordered categories.
//!
//! Each surviving group contributes one point per category; adjacent points
//! are connected by a segment colored by the group's first-to-last trend.

use crate::charts::padded_extent;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::{SvgEncoder, TextAnchor};
use crate::render::{draw_line_aa, draw_point, draw_vline_dotted};
use crate::scale::{LinearScale, Scale};
use crate::table::{Table, Value};
use crate::transform::{classify_series, CategoryAxis, Trend, TrendPalette};

/// Builder for slope charts.
#[derive(Debug, Clone)]
pub struct SlopeChart {
    table: Table,
    x_col: String,
    y_col: String,
    group_col: String,
    categories: Option<Vec<Value>>,
    palette: TrendPalette,
    tolerance: f32,
    decimals: usize,
    title: Option<String>,
    width: u32,
    height: u32,
    margin: u32,
}

impl SlopeChart {
    /// Create a new slope chart over a table.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self {
            table,
            x_col: String::new(),
            y_col: String::new(),
            group_col: String::new(),
            categories: None,
            palette: TrendPalette::default(),
            tolerance: 0.0,
            decimals: 0,
            title: None,
            width: 800,
            height: 600,
            margin: 70,
        }
    }

    /// Set the category (x) column.
    #[must_use]
    pub fn x(mut self, column: &str) -> Self {
        self.x_col = column.to_string();
        self
    }

    /// Set the value (y) column.
    #[must_use]
    pub fn y(mut self, column: &str) -> Self {
        self.y_col = column.to_string();
        self
    }

    /// Set the grouping column producing one slope per group.
    #[must_use]
    pub fn group(mut self, column: &str) -> Self {
        self.group_col = column.to_string();
        self
    }

    /// Fix the category values and their plotting order.
    ///
    /// Defaults to the sorted distinct non-null values of the x column.
    #[must_use]
    pub fn categories(mut self, categories: Vec<Value>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Set the trend color mapping.
    #[must_use]
    pub fn palette(mut self, palette: TrendPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Margin within which a first/last change counts as even.
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

    /// Set the chart title. Defaults to the y column name.
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

    /// Resolve groups, series, and trend colors.
    ///
    /// # Errors
    ///
    /// Fails when a named column is missing, fewer than two categories are
    /// supplied or derived, or no group covers every category.
    pub fn build(self) -> Result<BuiltSlopeChart> {
        let axis = match self.categories {
            Some(values) => CategoryAxis::new(values),
            None => CategoryAxis::from_column(&self.table, &self.x_col),
        };
        if axis.len() < 2 {
            // A first/last comparison (and the position divisor) needs two
            return Err(Error::TooFewCategories { count: axis.len() });
        }

        // Rows outside the category list never count toward completeness
        let table = self.table.retain_in(&self.x_col, axis.categories());

        let groups = axis.complete_groups(&table, &self.x_col, &self.y_col, &self.group_col)?;
        if groups.is_empty() {
            return Err(Error::EmptyData);
        }

        let series =
            axis.extract_series(&table, &self.x_col, &self.y_col, &self.group_col, &groups)?;

        let first = &series[0];
        let last = &series[series.len() - 1];
        let trends = classify_series(first, last, self.tolerance)?;
        let colors: Vec<Rgba> = trends.iter().map(|&t| self.palette.color(t)).collect();

        let positions = axis.positions();
        let title = self.title.unwrap_or_else(|| self.y_col.clone());

        Ok(BuiltSlopeChart {
            categories: axis.categories().to_vec(),
            positions,
            groups,
            series,
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

impl batuta_common::display::WithDimensions for SlopeChart {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// A validated slope chart with all geometry resolved.
#[derive(Debug, Clone)]
pub struct BuiltSlopeChart {
    categories: Vec<Value>,
    positions: Vec<f32>,
    groups: Vec<Value>,
    series: Vec<Vec<f32>>,
    trends: Vec<Trend>,
    colors: Vec<Rgba>,
    decimals: usize,
    title: String,
    width: u32,
    height: u32,
    margin: u32,
}

impl BuiltSlopeChart {
    /// Surviving group labels, in their fixed plot order.
    #[must_use]
    pub fn groups(&self) -> &[Value] {
        &self.groups
    }

    /// Per-group trend classifications, aligned with [`groups`](Self::groups).
    #[must_use]
    pub fn trends(&self) -> &[Trend] {
        &self.trends
    }

    /// Per-group display colors, aligned with [`groups`](Self::groups).
    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Number of category positions.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Horizontal pixel scale over the padded category positions.
    fn x_scale(&self) -> Result<LinearScale> {
        let first = self.positions[0];
        let last = self.positions[self.positions.len() - 1];
        let area = super::plot_area(self.width, self.height, self.margin);
        LinearScale::new((first - 1.0, last + 1.0), (area.x, area.right()))
    }

    /// Vertical pixel scale over the value extent.
    fn y_scale(&self) -> Result<LinearScale> {
        let (y_min, y_max) = padded_extent(self.series.iter().flatten().copied())
            .ok_or(Error::EmptyData)?;
        let area = super::plot_area(self.width, self.height, self.margin);
        LinearScale::new((y_min, y_max), (area.bottom(), area.y))
    }

    /// Render the slope chart onto a framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if a pixel scale cannot be built.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let x_scale = self.x_scale()?;
        let y_scale = self.y_scale()?;

        let guide = Rgba::BLACK.with_alpha(178);
        let area = super::plot_area(self.width, self.height, self.margin);
        let top = area.y as i32;
        let bottom = area.bottom() as i32;

        // Vertical category guides
        for &pos in &self.positions {
            let x = x_scale.scale(pos) as i32;
            draw_vline_dotted(fb, x, top, bottom, 2, 4, guide);
        }

        // Point columns
        for (k, values) in self.series.iter().enumerate() {
            let px = x_scale.scale(self.positions[k]);
            for &v in values {
                draw_point(fb, px, y_scale.scale(v), 4.0, Rgba::BLACK.with_alpha(178));
            }
        }

        // Trend-colored segments between adjacent categories
        for k in 0..self.positions.len() - 1 {
            let x0 = x_scale.scale(self.positions[k]);
            let x1 = x_scale.scale(self.positions[k + 1]);
            for (j, &color) in self.colors.iter().enumerate() {
                draw_line_aa(
                    fb,
                    x0,
                    y_scale.scale(self.series[k][j]),
                    x1,
                    y_scale.scale(self.series[k + 1][j]),
                    color,
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

    /// Render to a vector SVG canvas with annotations and axis decoration.
    ///
    /// # Errors
    ///
    /// Returns an error if a pixel scale cannot be built.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        let x_scale = self.x_scale()?;
        let y_scale = self.y_scale()?;

        let guide = Rgba::BLACK.with_alpha(178);
        let area = super::plot_area(self.width, self.height, self.margin);
        let n = self.positions.len();

        let mut svg = SvgEncoder::new(self.width, self.height).text_anchored(
            self.width as f32 / 2.0,
            self.margin as f32 / 2.0,
            &self.title,
            22.0,
            Rgba::BLACK,
            TextAnchor::Middle,
        );

        // Vertical category guides and tick labels
        for (k, &pos) in self.positions.iter().enumerate() {
            let x = x_scale.scale(pos);
            svg = svg
                .line_dashed(x, area.y, x, area.bottom(), guide, 1.0, (2.0, 4.0))
                .text_anchored(
                    x,
                    area.bottom() + 18.0,
                    &self.categories[k].to_string(),
                    14.0,
                    Rgba::BLACK,
                    TextAnchor::Middle,
                );
        }

        // Trend-colored segments
        for k in 0..n - 1 {
            let x0 = x_scale.scale(self.positions[k]);
            let x1 = x_scale.scale(self.positions[k + 1]);
            for (j, &color) in self.colors.iter().enumerate() {
                svg = svg.line(
                    x0,
                    y_scale.scale(self.series[k][j]),
                    x1,
                    y_scale.scale(self.series[k + 1][j]),
                    color,
                    2.0,
                );
            }
        }

        // Point markers, colored per group
        for (k, values) in self.series.iter().enumerate() {
            let x = x_scale.scale(self.positions[k]);
            for (j, &v) in values.iter().enumerate() {
                svg = svg.circle(x, y_scale.scale(v), 3.0, self.colors[j]);
            }
        }

        // Left and right `label, value` annotations
        let x_left = x_scale.scale(self.positions[0] - 0.05);
        let x_right = x_scale.scale(self.positions[n - 1] + 0.05);
        let first = &self.series[0];
        let last = &self.series[n - 1];
        for (j, group) in self.groups.iter().enumerate() {
            let left = format!("{}, {:.*}", group, self.decimals, first[j]);
            let right = format!("{}, {:.*}", group, self.decimals, last[j]);
            svg = svg
                .text_anchored(
                    x_left,
                    y_scale.scale(first[j]) + 5.0,
                    &left,
                    14.0,
                    Rgba::BLACK,
                    TextAnchor::End,
                )
                .text_anchored(
                    x_right,
                    y_scale.scale(last[j]) + 5.0,
                    &right,
                    14.0,
                    Rgba::BLACK,
                    TextAnchor::Start,
                );
        }

        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gdp_table() -> Table {
        let mut t = Table::new();
        t.add_column_str("country", &["A", "B", "C", "A", "B", "C", "D"]);
        t.add_column_f32(
            "year",
            &[2020.0, 2020.0, 2020.0, 2021.0, 2021.0, 2021.0, 2020.0],
        );
        t.add_column_f32("gdp", &[10.0, 20.0, 30.0, 20.0, 20.0, 25.0, 7.0]);
        t
    }

    fn chart() -> SlopeChart {
        SlopeChart::new(gdp_table()).x("year").y("gdp").group("country")
    }

    #[test]
    fn test_build_classifies_groups() {
        let built = chart().build().unwrap();

        assert_eq!(
            built.groups(),
            &[
                Value::Text("A".to_string()),
                Value::Text("B".to_string()),
                Value::Text("C".to_string())
            ]
        );
        assert_eq!(
            built.trends(),
            &[Trend::Increasing, Trend::Even, Trend::Decreasing]
        );
    }

    #[test]
    fn test_build_maps_trend_colors() {
        let palette = TrendPalette::default();
        let built = chart().build().unwrap();
        assert_eq!(
            built.colors(),
            &[palette.increasing, palette.even, palette.decreasing]
        );
    }

    #[test]
    fn test_single_category_rejected() {
        let result = chart()
            .categories(vec![Value::Text("only".to_string())])
            .build();
        assert!(matches!(result, Err(Error::TooFewCategories { count: 1 })));
    }

    #[test]
    fn test_no_complete_groups() {
        let mut t = Table::new();
        t.add_column_str("g", &["A", "B"]);
        t.add_column_f32("x", &[1.0, 2.0]);
        t.add_column_f32("y", &[1.0, 2.0]);

        let result = SlopeChart::new(t).x("x").y("y").group("g").build();
        assert!(matches!(result, Err(Error::EmptyData)));
    }

    #[test]
    fn test_explicit_category_order() {
        // Reversed categories flip first and last, and with it the trends
        let built = chart()
            .categories(vec![Value::Number(2021.0), Value::Number(2020.0)])
            .build()
            .unwrap();
        assert_eq!(
            built.trends(),
            &[Trend::Decreasing, Trend::Even, Trend::Increasing]
        );
    }

    #[test]
    fn test_tolerance_evens_out_small_moves() {
        let built = chart().tolerance(10.0).build().unwrap();
        assert_eq!(built.trends(), &[Trend::Even, Trend::Even, Trend::Even]);
    }

    #[test]
    fn test_render_raster() {
        let built = chart().build().unwrap();
        let fb = built.to_framebuffer().unwrap();

        let mut non_white = 0;
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get_pixel(x, y) != Some(Rgba::WHITE) {
                    non_white += 1;
                }
            }
        }
        assert!(non_white > 0);
    }

    #[test]
    fn test_svg_annotations_present() {
        let svg = chart().build().unwrap().to_svg().unwrap().render();

        assert!(svg.contains("A, 10"));
        assert!(svg.contains("A, 20"));
        assert!(svg.contains("C, 25"));
        // Category tick labels and dashed guides
        assert!(svg.contains(">2020<"));
        assert!(svg.contains(">2021<"));
        assert!(svg.contains("stroke-dasharray"));
        // Default title is the y column
        assert!(svg.contains(">gdp<"));
    }

    #[test]
    fn test_svg_decimals() {
        let svg = chart()
            .decimals(1)
            .build()
            .unwrap()
            .to_svg()
            .unwrap()
            .render();
        assert!(svg.contains("A, 10.0"));
    }

    #[test]
    fn test_three_categories() {
        let mut t = Table::new();
        t.add_column_str("g", &["A", "A", "A", "B", "B", "B"]);
        t.add_column_f32("q", &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
        t.add_column_f32("v", &[5.0, 9.0, 7.0, 2.0, 2.0, 2.0]);

        let built = SlopeChart::new(t).x("q").y("v").group("g").build().unwrap();
        assert_eq!(built.category_count(), 3);
        assert_eq!(built.trends(), &[Trend::Increasing, Trend::Even]);
        assert!(built.to_framebuffer().is_ok());
    }
}
