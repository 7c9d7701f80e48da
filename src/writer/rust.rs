//! Stage 3 – render the normalized model into Rust source text.
//!
//! The output is a fixed template with a handful of `{{placeholder}}` slots.
//! Substitution is strict both ways: a placeholder with no context value and
//! a context value no placeholder consumed each abort the render. Silently
//! blank generated source would corrupt the downstream cost tables, so a
//! loud failure is the only acceptable outcome.
//!
//! Rendering is a pure function; identical inputs give byte-identical
//! output. Op arms follow the normalized map's sort order and floats use
//! Rust's shortest-roundtrip formatting, so nothing depends on ambient
//! state.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::model::{EstimationRule, ModelIdentifier};
use crate::normalizer::NormalizedModel;

/// A value referenced during rendering was absent, or vice versa. Either
/// way the normalizer/renderer contract is broken; this is not a user
/// input problem.
#[derive(Debug, Error, PartialEq)]
pub enum TemplateRenderError {
    #[error("template references undefined value `{0}`")]
    Undefined(String),
    #[error("template has an unclosed `{{{{` placeholder")]
    Unclosed,
    #[error("render context value `{0}` was never consumed by the template")]
    Unconsumed(String),
}

const ESTIMATOR_TEMPLATE: &str = r#"/// Area estimator for the `{{name}}` process model.
///
/// Widths are operand bit widths, in the operation's operand order.
pub struct {{camel}}AreaEstimator;

impl {{camel}}AreaEstimator {
    /// Area of a single one-bit register, in the model's area units.
    pub const ONE_BIT_REGISTER_AREA: f64 = {{one_bit_register_area}};

    /// Estimated area of `op`, or `None` for an operation the `{{name}}`
    /// model does not cover.
    pub fn operation_area(&self, op: &str, widths: &[u64]) -> Option<f64> {
        match op {
{{op_arms}}            _ => None,
        }
    }
}

fn linear(coefficients: &[f64], intercept: f64, widths: &[u64]) -> Option<f64> {
    if coefficients.len() != widths.len() {
        return None;
    }
    let slope: f64 = coefficients.iter().zip(widths).map(|(c, w)| c * *w as f64).sum();
    Some(slope + intercept)
}

fn interpolate(points: &[(u64, f64)], widths: &[u64]) -> Option<f64> {
    let width = *widths.first()?;
    let (first, last) = (points.first()?, points.last()?);
    if width <= first.0 {
        return Some(first.1);
    }
    if width >= last.0 {
        return Some(last.1);
    }
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if width <= x1 {
            return Some(y0 + (y1 - y0) * (width - x0) as f64 / (x1 - x0) as f64);
        }
    }
    None
}

crate::register_area_estimator!("{{name}}", {{camel}}AreaEstimator);
"#;

/// Bind the normalized model and identifier into the estimator template.
pub fn render(
    model: &NormalizedModel,
    name: &ModelIdentifier,
) -> Result<String, TemplateRenderError> {
    let mut context = BTreeMap::new();
    context.insert("name", name.as_str().to_string());
    context.insert("camel", name.camel_case());
    context.insert(
        "one_bit_register_area",
        float(model.constants.one_bit_register_area),
    );
    context.insert("op_arms", op_arms(&model.ops));
    substitute(ESTIMATOR_TEMPLATE, &context)
}

/// One `match` arm per op, in map (= lexicographic) order.
fn op_arms(ops: &BTreeMap<String, EstimationRule>) -> String {
    let mut arms = String::new();
    for (op, rule) in ops {
        let expr = match rule {
            EstimationRule::Fixed(fixed) => format!("Some({})", float(fixed.area)),
            EstimationRule::Linear(linear) => format!(
                "linear(&[{}], {}, widths)",
                float_list(&linear.coefficients),
                float(linear.intercept)
            ),
            EstimationRule::Table(table) => {
                let points: Vec<String> = table
                    .points
                    .iter()
                    .map(|(width, area)| format!("({width}, {})", float(*area)))
                    .collect();
                format!("interpolate(&[{}], widths)", points.join(", "))
            }
            EstimationRule::Alias(alias) => {
                format!("self.operation_area({:?}, widths)", alias.like)
            }
        };
        arms.push_str(&format!("            {op:?} => {expr},\n"));
    }
    arms
}

/// Shortest-roundtrip float literal. `5` would not read back as an `f64`
/// literal; `{:?}` prints `5.0`.
fn float(value: f64) -> String {
    format!("{value:?}")
}

fn float_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| float(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Replace every `{{key}}` in `template` from `context`.
fn substitute(
    template: &str,
    context: &BTreeMap<&str, String>,
) -> Result<String, TemplateRenderError> {
    let mut out = String::with_capacity(template.len() * 2);
    let mut consumed = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or(TemplateRenderError::Unclosed)?;
        let key = &after[..end];
        let value = context
            .get(key)
            .ok_or_else(|| TemplateRenderError::Undefined(key.to_string()))?;
        out.push_str(value);
        consumed.insert(key.to_string());
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    for key in context.keys() {
        if !consumed.contains(*key) {
            return Err(TemplateRenderError::Unconsumed(key.to_string()));
        }
    }
    Ok(out)
}
