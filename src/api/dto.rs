//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::chart::ChartRow;
use crate::features::{FeatureField, FeatureSet, NumberStyle};
use crate::prediction::{PredictionStatus, StatusSnapshot};

// ============================================
// FEATURE DTOs
// ============================================

/// A feature as shown in the input panel and metric row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDto {
    /// Zero-based position
    pub index: usize,
    /// Full label, e.g. "Feature 1 (Age)"
    pub name: String,
    /// Label without the unit, e.g. "Feature 1"
    pub short_label: String,
    pub value: f64,
    pub default_value: f64,
    /// How the metric row echoes the value
    pub style: NumberStyle,
}

impl FeatureDto {
    fn from_field(index: usize, field: &FeatureField) -> Self {
        Self {
            index,
            name: field.name.clone(),
            short_label: field.short_label().to_string(),
            value: field.value,
            default_value: field.default_value,
            style: field.style,
        }
    }
}

/// All features, in order
#[derive(Debug, Serialize, Deserialize)]
pub struct FeaturesResponse {
    pub features: Vec<FeatureDto>,
}

impl From<&FeatureSet> for FeaturesResponse {
    fn from(set: &FeatureSet) -> Self {
        Self {
            features: set
                .fields()
                .iter()
                .enumerate()
                .map(|(i, f)| FeatureDto::from_field(i, f))
                .collect(),
        }
    }
}

/// Update request for one feature
#[derive(Debug, Deserialize)]
pub struct UpdateFeatureRequest {
    pub value: f64,
}

// ============================================
// PREDICTION DTOs
// ============================================

/// Query parameters for `POST /predict`
#[derive(Debug, Default, Deserialize)]
pub struct PredictParams {
    /// Hold the response until this submission resolves
    #[serde(default)]
    pub wait: bool,
}

/// Current prediction status
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub submission: u64,
    #[serde(flatten)]
    pub status: PredictionStatus,
    pub updated_at: i64,
}

impl From<StatusSnapshot> for PredictionResponse {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self {
            submission: snapshot.submission,
            status: snapshot.status,
            updated_at: snapshot.updated_at,
        }
    }
}

// ============================================
// CHART DTOs
// ============================================

/// Bar chart data for one render pass
#[derive(Debug, Serialize, Deserialize)]
pub struct ChartsResponse {
    /// Actual input values
    pub inputs: Vec<ChartRow>,
    /// Random mockup values, regenerated per request
    pub impact: Vec<ChartRow>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub endpoint: String,
    pub ws_connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::PredictionValue;
    use serde_json::json;

    #[test]
    fn test_features_response_order() {
        let response = FeaturesResponse::from(&FeatureSet::with_defaults());
        assert_eq!(response.features.len(), 7);
        assert_eq!(response.features[2].index, 2);
        assert_eq!(response.features[2].name, "Feature 3 (Distance)");
        assert_eq!(response.features[2].short_label, "Feature 3");
        assert_eq!(response.features[2].value, 350.0);
        assert_eq!(response.features[0].style, NumberStyle::Decimal);
        assert_eq!(response.features[2].style, NumberStyle::Whole);
    }

    #[test]
    fn test_prediction_response_flattens_status() {
        let response = PredictionResponse {
            submission: 3,
            status: PredictionStatus::Success {
                prediction: PredictionValue::from(json!(42)),
            },
            updated_at: 1_700_000_000_000,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["state"], "success");
        assert_eq!(value["prediction"], json!(42));
        assert_eq!(value["submission"], 3);
    }

    #[test]
    fn test_predict_params_default() {
        let params: PredictParams = serde_json::from_str("{}").unwrap();
        assert!(!params.wait);
    }
}
