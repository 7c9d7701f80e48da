//! Stage 1 – structural deserialization of the model file.
//!
//! Only schema conformance is checked here: unknown fields, wrong types and
//! truncated input all surface as `MalformedModelError`. Whether the model
//! *makes sense* (baseline present, tables sorted, …) is the normalizer's
//! job.

use thiserror::Error;

use crate::model::CostModel;

/// The input bytes do not conform to the cost-model schema.
#[derive(Debug, Error)]
#[error("malformed model: {0}")]
pub struct MalformedModelError(#[from] serde_json::Error);

/// Parse the whole input JSON string into a `CostModel`.
pub fn load_from_json(json: &str) -> Result<CostModel, MalformedModelError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EstimationRule;

    #[test]
    fn test_load_minimal_model() {
        let json = r#"{
            "op_models": [
                { "op": "kRegister", "estimator": { "kind": "fixed", "area": 5.0 } }
            ]
        }"#;
        let model = load_from_json(json).expect("valid model");
        assert_eq!(model.metric, "area"); // defaulted
        assert_eq!(model.op_models.len(), 1);
        assert_eq!(model.op_models[0].op, "kRegister");
        assert!(matches!(
            model.op_models[0].estimator,
            EstimationRule::Fixed(_)
        ));
    }

    #[test]
    fn test_load_rejects_unknown_rule_kind() {
        let json = r#"{
            "op_models": [
                { "op": "kAdd", "estimator": { "kind": "quadratic", "area": 1.0 } }
            ]
        }"#;
        assert!(load_from_json(json).is_err());
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let json = r#"{
            "op_models": [],
            "fitted_on": "2024-01-01"
        }"#;
        assert!(load_from_json(json).is_err());

        let json = r#"{
            "op_models": [
                { "op": "kAdd", "estimator": { "kind": "fixed", "area": 1.0, "units": "um2" } }
            ]
        }"#;
        assert!(load_from_json(json).is_err());
    }

    #[test]
    fn test_load_rejects_truncated_input() {
        let json = r#"{ "op_models": [ { "op": "kAdd","#;
        assert!(load_from_json(json).is_err());
    }

    #[test]
    fn test_load_rejects_wrong_types() {
        let json = r#"{
            "op_models": [
                { "op": "kAdd", "estimator": { "kind": "fixed", "area": "five" } }
            ]
        }"#;
        assert!(load_from_json(json).is_err());
    }
}
