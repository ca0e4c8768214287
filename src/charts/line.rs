//! Line plot with hue grouping and highlighting.

use crate::charts::{numeric_pairs, padded_extent, resolve_layers, RenderLayers};
use crate::color::{CategoryPalette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::output::SvgEncoder;
use crate::render::{draw_line_aa, draw_point};
use crate::scale::{LinearScale, Scale};
use crate::table::{Table, Value};

/// Builder for line plots over a table.
///
/// Rows are sorted by x within each hue level and connected with
/// anti-aliased segments. Hue and highlight semantics match
/// [`ScatterPlot`](crate::charts::ScatterPlot).
#[derive(Debug, Clone)]
pub struct LinePlot {
    table: Table,
    x_col: String,
    y_col: String,
    hue: Option<String>,
    highlights: Option<Vec<String>>,
    thickness: f32,
    show_markers: bool,
    marker_size: f32,
    width: u32,
    height: u32,
    margin: u32,
}

impl LinePlot {
    /// Create a new line plot over a table.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self {
            table,
            x_col: String::new(),
            y_col: String::new(),
            hue: None,
            highlights: None,
            thickness: 1.0,
            show_markers: false,
            marker_size: 4.0,
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

    /// Set the hue (grouping) column producing one line per level.
    #[must_use]
    pub fn hue(mut self, column: &str) -> Self {
        self.hue = Some(column.to_string());
        self
    }

    /// Restrict coloring to the named hue levels; other lines render gray.
    #[must_use]
    pub fn highlights(mut self, labels: &[&str]) -> Self {
        self.highlights = Some(labels.iter().map(|&s| s.to_string()).collect());
        self
    }

    /// Set the line thickness.
    #[must_use]
    pub fn thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness.max(0.5);
        self
    }

    /// Enable or disable data point markers.
    #[must_use]
    pub fn markers(mut self, show: bool) -> Self {
        self.show_markers = show;
        self
    }

    /// Set the marker size.
    #[must_use]
    pub fn marker_size(mut self, size: f32) -> Self {
        self.marker_size = size.max(1.0);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Build and validate the line plot.
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

        resolve_layers(
            &self.table,
            self.hue.as_deref(),
            self.highlights.as_deref(),
        )?;

        Ok(self)
    }

    /// Render the line plot onto a framebuffer.
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
                self.draw_polyline(fb, &points, None, CategoryPalette::color(0), &x_scale, &y_scale);
            }
            RenderLayers::Hue(groups) => {
                for (level, color) in groups {
                    self.draw_polyline(fb, &points, Some(level), *color, &x_scale, &y_scale);
                }
            }
            RenderLayers::Highlight(groups) => {
                // The gray pass keeps the hue split so lines stay lines
                let all_levels = self.table.distinct_sorted(
                    self.hue.as_deref().unwrap_or_default(),
                );
                for level in &all_levels {
                    self.draw_polyline(
                        fb,
                        &points,
                        Some(level),
                        Rgba::HIGHLIGHT_GRAY,
                        &x_scale,
                        &y_scale,
                    );
                }
                for (level, color) in groups {
                    self.draw_polyline(fb, &points, Some(level), *color, &x_scale, &y_scale);
                }
            }
        }

        Ok(())
    }

    /// Draw one layer's polyline; `level` of None means every row.
    fn draw_polyline(
        &self,
        fb: &mut Framebuffer,
        points: &[(usize, f32, f32)],
        level: Option<&Value>,
        color: Rgba,
        x_scale: &LinearScale,
        y_scale: &LinearScale,
    ) {
        let hue = self.hue.as_deref();
        let mut subset: Vec<Point> = points
            .iter()
            .filter(|&&(row, _, _)| match (level, hue) {
                (Some(level), Some(hue)) => self.table.value(row, hue) == *level,
                _ => true,
            })
            .map(|&(_, x, y)| Point::new(x, y))
            .collect();

        subset.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        for pair in subset.windows(2) {
            draw_line_aa(
                fb,
                x_scale.scale(pair[0].x),
                y_scale.scale(pair[0].y),
                x_scale.scale(pair[1].x),
                y_scale.scale(pair[1].y),
                color,
            );
        }

        if self.show_markers {
            for p in &subset {
                draw_point(fb, x_scale.scale(p.x), y_scale.scale(p.y), self.marker_size, color);
            }
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

impl batuta_common::display::WithDimensions for LinePlot {
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
        t.add_column_f32("day", &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        t.add_column_f32("value", &[1.0, 2.0, 3.0, 3.0, 2.0, 1.0]);
        t.add_column_str("series", &["up", "up", "up", "down", "down", "down"]);
        t
    }

    #[test]
    fn test_builder_valid() {
        assert!(LinePlot::new(table()).x("day").y("value").build().is_ok());
    }

    #[test]
    fn test_builder_missing_column() {
        let result = LinePlot::new(table()).x("nope").y("value").build();
        assert!(matches!(result, Err(Error::ColumnNotFound(_))));
    }

    #[test]
    fn test_render_hue_lines() {
        let plot = LinePlot::new(table())
            .x("day")
            .y("value")
            .hue("series")
            .dimensions(100, 100)
            .build()
            .unwrap();
        assert!(plot.to_framebuffer().is_ok());
    }

    #[test]
    fn test_render_highlight_layers() {
        let plot = LinePlot::new(table())
            .x("day")
            .y("value")
            .hue("series")
            .highlights(&["up"])
            .dimensions(120, 120)
            .build()
            .unwrap();
        let fb = plot.to_framebuffer().unwrap();

        let mut non_white = 0;
        for y in 0..120 {
            for x in 0..120 {
                if fb.get_pixel(x, y) != Some(Rgba::WHITE) {
                    non_white += 1;
                }
            }
        }
        assert!(non_white > 0);
    }

    #[test]
    fn test_markers() {
        let plot = LinePlot::new(table())
            .x("day")
            .y("value")
            .markers(true)
            .marker_size(6.0)
            .dimensions(100, 100)
            .build()
            .unwrap();
        assert!(plot.to_framebuffer().is_ok());
    }

    #[test]
    fn test_empty_after_null_filter() {
        let mut t = Table::new();
        t.add_column_opt_f32("x", &[None]);
        t.add_column_opt_f32("y", &[None]);
        let result = LinePlot::new(t).x("x").y("y").build();
        assert!(matches!(result, Err(Error::EmptyData)));
    }
}
