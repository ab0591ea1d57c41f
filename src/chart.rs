//! Chart Data
//!
//! Turns feature values into the label/value rows the dashboard's bar charts
//! draw. Two datasets are produced per render pass: the actual inputs, and a
//! cosmetic "impact" series of random integers that carries no meaning.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the impact mockup values
pub const IMPACT_MIN: u32 = 10;
/// Upper bound (exclusive) of the impact mockup values
pub const IMPACT_MAX: u32 = 100;

/// One bar in a bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    /// Synthetic label, "F1".."Fn"
    pub label: String,
    pub value: f64,
}

impl ChartRow {
    fn at(index: usize, value: f64) -> Self {
        Self {
            label: format!("F{}", index + 1),
            value,
        }
    }
}

/// Both chart datasets for a single render pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub inputs: Vec<ChartRow>,
    pub impact: Vec<ChartRow>,
}

impl ChartSet {
    /// Derive the input chart and a fresh impact chart of the same length
    pub fn derive(values: &[f64]) -> Self {
        Self {
            inputs: derive_input_chart(values),
            impact: derive_impact_chart(values.len()),
        }
    }
}

/// Pair each value with the label `F<i+1>`, preserving order
pub fn derive_input_chart(values: &[f64]) -> Vec<ChartRow> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| ChartRow::at(i, *v))
        .collect()
}

/// `n` rows of random integers in `[10, 100)`
///
/// Unseeded and regenerated on every call.
pub fn derive_impact_chart(n: usize) -> Vec<ChartRow> {
    let mut rng = rand::rng();
    (0..n)
        .map(|i| ChartRow::at(i, rng.random_range(IMPACT_MIN..IMPACT_MAX) as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSet;

    #[test]
    fn test_input_chart_from_defaults() {
        let rows = derive_input_chart(&[14.0, 8.0, 350.0, 165.0, 4209.0, 12.0, 1972.0]);

        let expected = [
            ("F1", 14.0),
            ("F2", 8.0),
            ("F3", 350.0),
            ("F4", 165.0),
            ("F5", 4209.0),
            ("F6", 12.0),
            ("F7", 1972.0),
        ];
        assert_eq!(rows.len(), expected.len());
        for (row, (label, value)) in rows.iter().zip(expected) {
            assert_eq!(row.label, label);
            assert_eq!(row.value, value);
        }
    }

    #[test]
    fn test_input_chart_empty() {
        assert!(derive_input_chart(&[]).is_empty());
    }

    #[test]
    fn test_impact_chart_shape() {
        for _ in 0..50 {
            let rows = derive_impact_chart(7);
            assert_eq!(rows.len(), 7);
            for (i, row) in rows.iter().enumerate() {
                assert_eq!(row.label, format!("F{}", i + 1));
                assert_eq!(row.value.fract(), 0.0);
                assert!(row.value >= 10.0 && row.value < 100.0, "value {}", row.value);
            }
        }
    }

    #[test]
    fn test_chart_set_lengths_match_fields() {
        let set = FeatureSet::with_defaults();
        let charts = ChartSet::derive(&set.values());
        assert_eq!(charts.inputs.len(), set.len());
        assert_eq!(charts.impact.len(), set.len());
        assert_eq!(charts.inputs[4].value, 4209.0);
    }
}
