//! Scatter plot with hue grouping and highlighting.

use crate::charts::{numeric_pairs, padded_extent, resolve_layers, RenderLayers};
use crate::color::{CategoryPalette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::SvgEncoder;
use crate::render::draw_point;
use crate::scale::{LinearScale, Scale};
use crate::table::{Table, Value};

/// Builder for scatter plots over a table.
///
/// With a `hue` column each level gets a palette color; adding `highlights`
/// renders the full data in gray first and only the named levels in color.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    table: Table,
    x_col: String,
    y_col: String,
    hue: Option<String>,
    highlights: Option<Vec<String>>,
    point_size: f32,
    alpha: f32,
    width: u32,
    height: u32,
    margin: u32,
}

impl ScatterPlot {
    /// Create a new scatter plot over a table.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self {
            table,
            x_col: String::new(),
            y_col: String::new(),
            hue: None,
            highlights: None,
            point_size: 6.0,
            alpha: 1.0,
            width: 800,
            height: 600,
            margin: 40,
        }
    }

    /// Set the x column.
    #[must_use]
    pub fn x(mut self, column: &str) -> Self {
        self.x_col = column.to_string();
        self
    }

    /// Set the y column.
    #[must_use]
    pub fn y(mut self, column: &str) -> Self {
        self.y_col = column.to_string();
        self
    }

    /// Set the hue (grouping) column.
    #[must_use]
    pub fn hue(mut self, column: &str) -> Self {
        self.hue = Some(column.to_string());
        self
    }

    /// Restrict coloring to the named hue levels; everything else renders
    /// gray.
    #[must_use]
    pub fn highlights(mut self, labels: &[&str]) -> Self {
        self.highlights = Some(labels.iter().map(|&s| s.to_string()).collect());
        self
    }

    /// Set the point diameter in pixels.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.point_size = size.max(1.0);
        self
    }

    /// Set the alpha transparency (0.0 - 1.0).
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Build and validate the scatter plot.
    ///
    /// # Errors
    ///
    /// Fails when a named column is missing, no row has numeric x and y, or
    /// highlight labels cannot match the hue column.
    pub fn build(self) -> Result<Self> {
        super::warn_highlights_without_hue(self.hue.as_deref(), self.highlights.as_deref());

        let points = numeric_pairs(&self.table, &self.x_col, &self.y_col)?;
        if points.is_empty() {
            return Err(Error::EmptyData);
        }

        // Validates hue column presence and highlight typing
        resolve_layers(
            &self.table,
            self.hue.as_deref(),
            self.highlights.as_deref(),
        )?;

        Ok(self)
    }

    /// Render the scatter plot onto a framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot fails validation.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let points = numeric_pairs(&self.table, &self.x_col, &self.y_col)?;
        let (x_min, x_max) =
            padded_extent(points.iter().map(|&(_, x, _)| x)).ok_or(Error::EmptyData)?;
        let (y_min, y_max) =
            padded_extent(points.iter().map(|&(_, _, y)| y)).ok_or(Error::EmptyData)?;

        let area = super::plot_area(self.width, self.height, self.margin);
        let x_scale = LinearScale::new((x_min, x_max), (area.x, area.right()))?;
        let y_scale = LinearScale::new((y_min, y_max), (area.bottom(), area.y))?;

        let layers = resolve_layers(
            &self.table,
            self.hue.as_deref(),
            self.highlights.as_deref(),
        )?;

        match &layers {
            RenderLayers::Plain => {
                self.draw_subset(fb, &points, None, CategoryPalette::color(0), &x_scale, &y_scale);
            }
            RenderLayers::Hue(groups) => {
                for (level, color) in groups {
                    self.draw_subset(fb, &points, Some(level), *color, &x_scale, &y_scale);
                }
            }
            RenderLayers::Highlight(groups) => {
                self.draw_subset(
                    fb,
                    &points,
                    None,
                    Rgba::HIGHLIGHT_GRAY,
                    &x_scale,
                    &y_scale,
                );
                for (level, color) in groups {
                    self.draw_subset(fb, &points, Some(level), *color, &x_scale, &y_scale);
                }
            }
        }

        Ok(())
    }

    /// Draw the points of one layer; `level` of None means every row.
    fn draw_subset(
        &self,
        fb: &mut Framebuffer,
        points: &[(usize, f32, f32)],
        level: Option<&Value>,
        color: Rgba,
        x_scale: &LinearScale,
        y_scale: &LinearScale,
    ) {
        let color = color.with_alpha((self.alpha * 255.0) as u8);
        let hue = self.hue.as_deref();

        for &(row, x, y) in points {
            if let (Some(level), Some(hue)) = (level, hue) {
                if self.table.value(row, hue) != *level {
                    continue;
                }
            }
            let px = x_scale.scale(x);
            let py = y_scale.scale(y);
            draw_point(fb, px, py, self.point_size, color);
        }
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
}

impl batuta_common::display::WithDimensions for ScatterPlot {
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
        t.add_column_f32("x", &[1.0, 2.0, 3.0, 4.0]);
        t.add_column_f32("y", &[4.0, 5.0, 6.0, 7.0]);
        t.add_column_str("kind", &["a", "b", "a", "b"]);
        t
    }

    #[test]
    fn test_builder_valid() {
        let plot = ScatterPlot::new(table()).x("x").y("y").build();
        assert!(plot.is_ok());
    }

    #[test]
    fn test_builder_missing_column() {
        let result = ScatterPlot::new(table()).x("x").y("nope").build();
        assert!(matches!(result, Err(Error::ColumnNotFound(_))));
    }

    #[test]
    fn test_builder_empty_data() {
        let mut t = Table::new();
        t.add_column_opt_f32("x", &[None, None]);
        t.add_column_f32("y", &[1.0, 2.0]);

        let result = ScatterPlot::new(t).x("x").y("y").build();
        assert!(matches!(result, Err(Error::EmptyData)));
    }

    #[test]
    fn test_render_plain() {
        let plot = ScatterPlot::new(table())
            .x("x")
            .y("y")
            .dimensions(100, 100)
            .build()
            .unwrap();
        let fb = plot.to_framebuffer().unwrap();

        // Some non-background pixels were drawn
        let drawn = (0..100)
            .flat_map(|y| (0..100).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get_pixel(x, y) != Some(Rgba::WHITE))
            .count();
        assert!(drawn > 0);
    }

    #[test]
    fn test_render_with_hue_and_highlights() {
        let plot = ScatterPlot::new(table())
            .x("x")
            .y("y")
            .hue("kind")
            .highlights(&["a"])
            .dimensions(120, 120)
            .build()
            .unwrap();
        let fb = plot.to_framebuffer().unwrap();

        // Both the gray layer and the colored layer must appear
        let mut saw_gray = false;
        let mut saw_color = false;
        for y in 0..120 {
            for x in 0..120 {
                match fb.get_pixel(x, y) {
                    Some(p) if p == Rgba::HIGHLIGHT_GRAY => saw_gray = true,
                    Some(p) if p != Rgba::WHITE && p != Rgba::HIGHLIGHT_GRAY => saw_color = true,
                    _ => {}
                }
            }
        }
        assert!(saw_gray);
        assert!(saw_color);
    }

    #[test]
    fn test_highlight_against_numeric_hue_fails() {
        let result = ScatterPlot::new(table())
            .x("x")
            .y("y")
            .hue("x")
            .highlights(&["a"])
            .build();
        assert!(matches!(result, Err(Error::HighlightType { .. })));
    }

    #[test]
    fn test_highlights_without_hue_ignored() {
        // Degrades to a plain render rather than failing
        let plot = ScatterPlot::new(table())
            .x("x")
            .y("y")
            .highlights(&["a"])
            .dimensions(80, 80)
            .build()
            .unwrap();
        assert!(plot.to_framebuffer().is_ok());
    }

    #[test]
    fn test_to_svg_embeds_raster() {
        let plot = ScatterPlot::new(table())
            .x("x")
            .y("y")
            .dimensions(64, 64)
            .build()
            .unwrap();
        let svg = plot.to_svg().unwrap().render();
        assert!(svg.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_with_dimensions_trait() {
        use batuta_common::display::WithDimensions;

        let mut plot = ScatterPlot::new(table()).x("x").y("y");
        plot.set_dimensions(320, 240);
        let fb = plot.build().unwrap().to_framebuffer().unwrap();
        assert_eq!(fb.width(), 320);
        assert_eq!(fb.height(), 240);
    }
}
