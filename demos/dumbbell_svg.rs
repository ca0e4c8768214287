//! Dumbbell Chart SVG Example
//!
//! Demonstrates before/after pair alignment and the annotated vector
//! output, plus a highlighted scatter over the same data.
//!
//! Run with: `cargo run --example dumbbell_svg`

use trend_viz::prelude::*;

fn main() {
    println!("Dumbbell Chart SVG Example");
    println!("==========================\n");

    // Example 1: before/after dumbbell
    println!("Example 1: Dumbbell chart");
    println!("-------------------------");

    let chart = DumbbellChart::new(survey_table())
        .value("satisfaction")
        .label("branch")
        .marker("wave")
        .markers("2023", "2024")
        .decimals(1)
        .title("Satisfaction by branch")
        .dimensions(700, 400)
        .build()
        .expect("Failed to build dumbbell chart");

    let pairs = chart.pairs();
    println!("  Rows plotted: {} (missing values dropped)", pairs.len());
    for (label, trend) in pairs.labels.iter().zip(chart.trends()) {
        println!("  {label}: {trend:?}");
    }

    chart
        .to_svg()
        .expect("Failed to render SVG")
        .write_to_file("dumbbell.svg")
        .expect("Failed to write SVG");
    println!("  Saved: dumbbell.svg\n");

    // Example 2: highlighted scatter over the same table
    println!("Example 2: Highlighted scatter");
    println!("------------------------------");

    let scatter = ScatterPlot::new(survey_table())
        .x("headcount")
        .y("satisfaction")
        .hue("branch")
        .highlights(&["north"])
        .size(8.0)
        .dimensions(500, 400)
        .build()
        .expect("Failed to build scatter plot");

    scatter
        .to_svg()
        .expect("Failed to render SVG")
        .write_to_file("scatter_highlight.svg")
        .expect("Failed to write SVG");
    println!("  Saved: scatter_highlight.svg");

    println!("\nAll outputs written.");
}

/// Two survey waves per branch; one branch is missing its second wave.
fn survey_table() -> Table {
    let mut table = Table::new();
    table.add_column_str(
        "branch",
        &["north", "south", "east", "west", "north", "south", "east", "west"],
    );
    table.add_column_str(
        "wave",
        &["2023", "2023", "2023", "2023", "2024", "2024", "2024", "2024"],
    );
    table.add_column_opt_f32(
        "satisfaction",
        &[
            Some(6.4),
            Some(7.9),
            Some(5.5),
            Some(8.1),
            Some(7.6),
            Some(7.2),
            Some(6.9),
            None,
        ],
    );
    table.add_column_f32(
        "headcount",
        &[42.0, 77.0, 23.0, 61.0, 45.0, 80.0, 25.0, 60.0],
    );
    table
}
