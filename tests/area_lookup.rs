use std::fs;
use std::path::Path;

use area_lookup_gen::model::ModelIdentifier;
use area_lookup_gen::normalizer;
use area_lookup_gen::parser::load_from_json;
use area_lookup_gen::writer;

/// Full pipeline over the checked-in sample model, stopping short of stdout.
fn generate(input: &Path, name: &str) -> Vec<u8> {
    let json = fs::read_to_string(input).expect("fixture readable");
    let model = load_from_json(&json).expect("valid model json");
    let normalized = normalizer::run(model).expect("valid model");
    let name = ModelIdentifier::new(name).expect("valid name");
    let body = writer::rust::render(&normalized, &name).expect("render ok");

    let mut out = Vec::new();
    writer::emit(&mut out, input, &body).expect("write to Vec");
    out
}

#[test]
fn generates_estimator_from_sample_model() {
    let input = Path::new("tests/asap7_hd.json");
    let json = fs::read_to_string(input).expect("fixture readable");
    let model = load_from_json(&json).expect("valid model json");
    assert_eq!(model.op_models.len(), 5);

    let normalized = normalizer::run(model).expect("valid model");

    // one-bit register baseline comes straight from the kRegister rule
    assert_eq!(normalized.constants.one_bit_register_area, 5.0);

    // 2 * 8 + 1, and the alias follows kAdd
    assert_eq!(normalized.estimate("kAdd", &[8]), Some(17.0));
    assert_eq!(normalized.estimate("kSub", &[8]), Some(17.0));

    // table rule: clamp below, interpolate inside, clamp above
    assert_eq!(normalized.estimate("kUMul", &[0]), Some(10.0));
    assert_eq!(normalized.estimate("kUMul", &[2]), Some(20.0));
    assert_eq!(normalized.estimate("kUMul", &[10]), Some(40.0));
}

#[test]
fn emitted_artifact_has_banner_and_lookup() {
    let input = Path::new("tests/asap7_hd.json");
    let text = String::from_utf8(generate(input, "asap7_hd")).expect("utf8");

    // banner first, naming the exact input path passed in
    let banner = text.lines().next().expect("banner line");
    assert!(banner.starts_with("// DO NOT EDIT:"));
    assert!(banner.contains("tests/asap7_hd.json"));

    assert!(text.contains("pub struct Asap7HdAreaEstimator;"));
    assert!(text.contains("pub const ONE_BIT_REGISTER_AREA: f64 = 5.0;"));
    assert!(text.contains(r#""kAdd" => linear(&[2.0], 1.0, widths),"#));
    assert!(text.contains(r#"crate::register_area_estimator!("asap7_hd", Asap7HdAreaEstimator);"#));
}

#[test]
fn repeated_generation_is_byte_identical() {
    let input = Path::new("tests/asap7_hd.json");
    assert_eq!(generate(input, "asap7_hd"), generate(input, "asap7_hd"));
}

#[test]
fn model_without_register_rule_is_rejected() {
    let json = r#"{
        "op_models": [
            { "op": "kAdd", "estimator": { "kind": "linear", "coefficients": [2.0], "intercept": 1.0 } }
        ]
    }"#;
    let model = load_from_json(json).expect("valid model json");
    let err = normalizer::run(model).unwrap_err();
    assert_eq!(err, normalizer::ModelValidationError::MissingBaseline);
}
