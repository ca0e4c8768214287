//! Property tests for the data-to-geometry transforms.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use trend_viz::prelude::*;
use trend_viz::transform::classify_series;

proptest! {
    /// Every index gets exactly one classification, consistent with the
    /// tolerance comparison.
    #[test]
    fn classification_is_total_and_consistent(
        pairs in prop::collection::vec((-1.0e6f32..1.0e6, -1.0e6f32..1.0e6), 0..64),
        tolerance in 0.0f32..1.0e5,
    ) {
        let first: Vec<f32> = pairs.iter().map(|p| p.0).collect();
        let last: Vec<f32> = pairs.iter().map(|p| p.1).collect();

        let trends = classify_series(&first, &last, tolerance).unwrap();
        prop_assert_eq!(trends.len(), pairs.len());

        for (i, trend) in trends.iter().enumerate() {
            let expected = if last[i] > first[i] + tolerance {
                Trend::Increasing
            } else if last[i] < first[i] - tolerance {
                Trend::Decreasing
            } else {
                Trend::Even
            };
            prop_assert_eq!(*trend, expected);
        }
    }

    /// A negative tolerance classifies identically to zero.
    #[test]
    fn negative_tolerance_behaves_as_zero(
        first in -1.0e6f32..1.0e6,
        last in -1.0e6f32..1.0e6,
        tolerance in -1.0e5f32..0.0,
    ) {
        prop_assert_eq!(
            Trend::classify(first, last, tolerance),
            Trend::classify(first, last, 0.0)
        );
    }

    /// Pair alignment drops rows with a missing value under either marker
    /// and orders the survivors ascending by the after value.
    #[test]
    fn pair_alignment_is_sorted_and_complete(
        rows in prop::collection::vec(
            (0usize..12, prop::option::of(-1000.0f32..1000.0), prop::option::of(-1000.0f32..1000.0)),
            1..12,
        ),
    ) {
        let mut labels = Vec::new();
        let mut waves = Vec::new();
        let mut scores = Vec::new();
        let mut names = Vec::new();

        for &(id, before, after) in &rows {
            let name = format!("row{id}");
            names.push(name.clone());
            labels.push(name.clone());
            waves.push("before");
            scores.push(before);

            labels.push(name);
            waves.push("after");
            scores.push(after);
        }

        let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut table = Table::new();
        table.add_column_str("label", &label_refs);
        table.add_column_str("wave", &waves);
        table.add_column_opt_f32("score", &scores);

        let chart = DumbbellChart::new(table)
            .value("score")
            .label("label")
            .marker("wave")
            .markers("before", "after")
            .build();

        match chart {
            Ok(built) => {
                let pairs = built.pairs();

                // Non-decreasing in the after value
                prop_assert!(pairs.after.windows(2).all(|w| w[0] <= w[1]));

                // No surviving label had a missing value under either marker.
                // Duplicate ids collapse to their first row, so resolve each
                // label against its first occurrence.
                for label in &pairs.labels {
                    let name = label.as_str().unwrap();
                    let first_idx = names.iter().position(|n| n == name).unwrap();
                    let (_, before, after) = rows[first_idx];
                    prop_assert!(before.is_some());
                    prop_assert!(after.is_some());
                }

                // One trend per surviving row
                prop_assert_eq!(built.trends().len(), pairs.len());
            }
            Err(Error::EmptyData) => {
                // Legal outcome: every row had a missing value
                let all_first_rows_missing = rows.iter().all(|&(id, b, a)| {
                    // Only the first row of a duplicated id matters
                    let first_idx = rows
                        .iter()
                        .position(|&(other, _, _)| other == id)
                        .unwrap();
                    let (_, fb, fa) = rows[first_idx];
                    let _ = (b, a);
                    fb.is_none() || fa.is_none()
                });
                prop_assert!(all_first_rows_missing);
            }
            Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
        }
    }

    /// Complete-group filtering keeps exactly the groups with one numeric
    /// row per category.
    #[test]
    fn complete_groups_cover_every_category_once(
        cells in prop::collection::vec(
            (0usize..6, 0usize..3, prop::option::of(-100.0f32..100.0)),
            1..40,
        ),
    ) {
        let group_names = ["g0", "g1", "g2", "g3", "g4", "g5"];
        let groups: Vec<&str> = cells.iter().map(|&(g, _, _)| group_names[g]).collect();
        let categories: Vec<f32> = cells.iter().map(|&(_, c, _)| c as f32).collect();
        let values: Vec<Option<f32>> = cells.iter().map(|&(_, _, v)| v).collect();

        let mut table = Table::new();
        table.add_column_str("group", &groups);
        table.add_column_f32("cat", &categories);
        table.add_column_opt_f32("val", &values);

        let axis = CategoryAxis::new(vec![
            Value::Number(0.0),
            Value::Number(1.0),
            Value::Number(2.0),
        ]);
        let complete = axis
            .complete_groups(&table, "cat", "val", "group")
            .unwrap();

        for name in group_names {
            let is_complete = (0..3).all(|cat| {
                cells
                    .iter()
                    .filter(|&&(g, c, v)| group_names[g] == name && c == cat && v.is_some())
                    .count()
                    == 1
            });
            let was_kept = complete.contains(&Value::Text(name.to_string()));
            prop_assert_eq!(was_kept, is_complete);
        }

        // Extraction over the surviving groups always aligns
        if !complete.is_empty() {
            let series = axis
                .extract_series(&table, "cat", "val", "group", &complete)
                .unwrap();
            prop_assert_eq!(series.len(), 3);
            for s in &series {
                prop_assert_eq!(s.len(), complete.len());
            }
        }
    }
}
