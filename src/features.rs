//! Feature Inputs
//!
//! Holds the seven named numeric inputs that make up a prediction request.
//! Field identity is positional: index 0 is always "Feature 1 (Age)", and the
//! order here is the order sent to the endpoint and drawn in the charts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display names, startup defaults and display styles, in request order
pub const FEATURE_DEFAULTS: [(&str, f64, NumberStyle); FEATURE_COUNT] = [
    ("Feature 1 (Age)", 14.0, NumberStyle::Decimal),
    ("Feature 2 (Hours)", 8.0, NumberStyle::Whole),
    ("Feature 3 (Distance)", 350.0, NumberStyle::Whole),
    ("Feature 4 (Weight)", 165.0, NumberStyle::Whole),
    ("Feature 5 (Volume)", 4209.0, NumberStyle::Whole),
    ("Feature 6 (Count)", 12.0, NumberStyle::Whole),
    ("Feature 7 (Year)", 1972.0, NumberStyle::Whole),
];

/// Number of features the endpoint expects
pub const FEATURE_COUNT: usize = 7;

/// How a value is echoed back in the metric row
///
/// `Decimal` always keeps a fractional digit (`14.0`); `Whole` drops it for
/// integral values (`8`). Neither restricts what the field accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStyle {
    #[default]
    Whole,
    Decimal,
}

impl NumberStyle {
    pub fn format(self, value: f64) -> String {
        match self {
            NumberStyle::Decimal if value.fract() == 0.0 && value.is_finite() => {
                format!("{:.1}", value)
            }
            _ => value.to_string(),
        }
    }
}

/// A single named input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureField {
    /// Display label (e.g. "Feature 1 (Age)")
    pub name: String,
    /// Current value
    pub value: f64,
    /// Value the field starts with
    pub default_value: f64,
    #[serde(default)]
    pub style: NumberStyle,
}

impl FeatureField {
    fn new(name: &str, default_value: f64, style: NumberStyle) -> Self {
        Self {
            name: name.to_string(),
            value: default_value,
            default_value,
            style,
        }
    }

    /// Label without the parenthesised unit, used for the metric row
    ///
    /// `"Feature 1 (Age)"` becomes `"Feature 1"`.
    pub fn short_label(&self) -> &str {
        self.name
            .split('(')
            .next()
            .unwrap_or(&self.name)
            .trim()
    }
}

/// The ordered set of feature inputs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    fields: Vec<FeatureField>,
}

impl FeatureSet {
    /// Create the seven fields with their startup defaults
    pub fn with_defaults() -> Self {
        Self {
            fields: FEATURE_DEFAULTS
                .iter()
                .map(|(name, default, style)| FeatureField::new(name, *default, *style))
                .collect(),
        }
    }

    /// Current values in field order
    pub fn values(&self) -> Vec<f64> {
        self.fields.iter().map(|f| f.value).collect()
    }

    /// All fields in order
    pub fn fields(&self) -> &[FeatureField] {
        &self.fields
    }

    /// Get a field by position
    pub fn get(&self, index: usize) -> Option<&FeatureField> {
        self.fields.get(index)
    }

    /// Update exactly one field
    ///
    /// Any finite number is accepted; there is no range validation.
    pub fn set_value(&mut self, index: usize, value: f64) -> Result<(), FeatureError> {
        if !value.is_finite() {
            return Err(FeatureError::NotFinite { index, value });
        }

        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(FeatureError::IndexOutOfRange { index, len })?;
        field.value = value;
        Ok(())
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default_value;
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Errors from updating a feature
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Feature index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Feature {index} must be a finite number, got {value}")]
    NotFinite { index: usize, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let set = FeatureSet::with_defaults();
        assert_eq!(set.len(), FEATURE_COUNT);
        assert_eq!(
            set.values(),
            vec![14.0, 8.0, 350.0, 165.0, 4209.0, 12.0, 1972.0]
        );
        assert_eq!(set.get(0).unwrap().name, "Feature 1 (Age)");
        assert_eq!(set.get(6).unwrap().name, "Feature 7 (Year)");
    }

    #[test]
    fn test_set_value_round_trip() {
        let mut set = FeatureSet::with_defaults();
        let before = set.values();

        set.set_value(3, 170.5).unwrap();

        let after = set.values();
        assert_eq!(after[3], 170.5);
        for i in (0..FEATURE_COUNT).filter(|i| *i != 3) {
            assert_eq!(after[i], before[i], "index {} changed", i);
        }
        assert_eq!(set.get(3).unwrap().default_value, 165.0);
    }

    #[test]
    fn test_set_value_accepts_any_finite() {
        let mut set = FeatureSet::with_defaults();
        set.set_value(0, -1.0e9).unwrap();
        set.set_value(6, 0.0).unwrap();
        assert_eq!(set.values()[0], -1.0e9);
        assert_eq!(set.values()[6], 0.0);
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut set = FeatureSet::with_defaults();

        assert_eq!(
            set.set_value(7, 1.0),
            Err(FeatureError::IndexOutOfRange { index: 7, len: 7 })
        );
        assert!(matches!(
            set.set_value(2, f64::NAN),
            Err(FeatureError::NotFinite { index: 2, .. })
        ));
        assert!(set.set_value(2, f64::INFINITY).is_err());
        assert_eq!(set, FeatureSet::with_defaults());
    }

    #[test]
    fn test_reset() {
        let mut set = FeatureSet::with_defaults();
        set.set_value(1, 99.0).unwrap();
        set.set_value(4, 1.0).unwrap();
        set.reset();
        assert_eq!(set, FeatureSet::with_defaults());
    }

    #[test]
    fn test_short_label() {
        let set = FeatureSet::with_defaults();
        let labels: Vec<_> = set.fields().iter().map(|f| f.short_label()).collect();
        assert_eq!(labels[0], "Feature 1");
        assert_eq!(labels[4], "Feature 5");

        let plain = FeatureField::new("Plain", 1.0, NumberStyle::Whole);
        assert_eq!(plain.short_label(), "Plain");
    }

    #[test]
    fn test_number_style_echoes_defaults() {
        let set = FeatureSet::with_defaults();
        let shown: Vec<_> = set.fields().iter().map(|f| f.style.format(f.value)).collect();
        assert_eq!(shown, ["14.0", "8", "350", "165", "4209", "12", "1972"]);

        assert_eq!(NumberStyle::Decimal.format(14.25), "14.25");
        assert_eq!(NumberStyle::Whole.format(8.5), "8.5");
        assert_eq!(NumberStyle::Decimal.format(-3.0), "-3.0");
    }
}
