//! Basic Slope Chart Example
//!
//! Demonstrates the fundamental workflow: table → chart → render.
//!
//! Run with: `cargo run --example slope_basic`

use trend_viz::output::PngEncoder;
use trend_viz::prelude::*;

fn main() {
    println!("Basic Slope Chart Example");
    println!("=========================\n");

    // Step 1: Assemble a long-form table
    println!("Step 1: Assembling input table...");
    let table = sales_table();
    println!("  {} rows, {} columns", table.n_rows(), table.n_cols());

    // Step 2: Build the chart (filters incomplete groups, classifies trends)
    println!("\nStep 2: Building slope chart...");
    let chart = SlopeChart::new(table)
        .x("quarter")
        .y("revenue")
        .group("product")
        .tolerance(0.5)
        .decimals(1)
        .title("Revenue by product")
        .dimensions(800, 600)
        .build()
        .expect("Failed to build slope chart");

    println!("  Surviving groups: {}", chart.groups().len());
    for (group, trend) in chart.groups().iter().zip(chart.trends()) {
        println!("  {group}: {trend:?}");
    }

    // Step 3: Render to a raster canvas and save as PNG
    println!("\nStep 3: Rendering raster output...");
    let fb = chart.to_framebuffer().expect("Failed to render");
    println!("  Framebuffer size: {}x{}", fb.width(), fb.height());
    println!("  SIMD backend: {:?}", Framebuffer::backend());

    PngEncoder::write_to_file(&fb, "slope_basic.png").expect("Failed to write PNG");
    println!("  Saved: slope_basic.png");

    // Step 4: Render the annotated vector version
    println!("\nStep 4: Rendering vector output...");
    let svg = chart.to_svg().expect("Failed to render SVG");
    svg.write_to_file("slope_basic.svg").expect("Failed to write SVG");
    println!("  Saved: slope_basic.svg ({} bytes)", svg.render().len());

    println!("\nSlope chart successfully generated!");
}

/// Quarterly revenue for a handful of products; one product is incomplete
/// and gets filtered out of the chart.
fn sales_table() -> Table {
    let mut table = Table::new();
    table.add_column_str(
        "product",
        &[
            "alpha", "beta", "gamma", "delta", // Q1
            "alpha", "beta", "gamma", // Q2 (delta missing)
        ],
    );
    table.add_column_str(
        "quarter",
        &["Q1", "Q1", "Q1", "Q1", "Q2", "Q2", "Q2"],
    );
    table.add_column_f32(
        "revenue",
        &[12.0, 30.5, 18.0, 7.0, 19.5, 30.2, 11.0],
    );
    table
}
