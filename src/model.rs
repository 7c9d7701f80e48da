//! In-memory shape of an area cost model, 1-to-1 with the input JSON.
//!
//! We keep the loaded form very "raw" (a plain list of per-op rules) so the
//! normalizer can decide what is usable; named fields make schema mismatches
//! fail at deserialization time rather than downstream.

use anyhow::bail;
use serde::Deserialize;

/// Entire model as it comes out of the JSON loader.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostModel {
    /// What the rules measure. Only `"area"` models are accepted here;
    /// the field exists so delay models fail loudly instead of producing
    /// nonsense lookups.
    #[serde(default = "default_metric")]
    pub metric: String,
    pub op_models: Vec<OpModel>,
}

fn default_metric() -> String {
    "area".to_string()
}

/// One `(operation kind, estimation rule)` pair from the model file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpModel {
    pub op: String,
    pub estimator: EstimationRule,
}

/// The supported rule kinds, tagged by `"kind"` in the JSON.
///
/// Newtype variants keep `deny_unknown_fields` effective on each rule body
/// (serde ignores the attribute on internally-tagged struct variants).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimationRule {
    /// Constant area regardless of operand widths.
    Fixed(FixedRule),
    /// `Σ coefficients[i] * widths[i] + intercept`.
    Linear(LinearRule),
    /// Sampled `(width, area)` points; clamp outside the sampled range,
    /// linearly interpolate inside it.
    Table(TableRule),
    /// Same cost as another operation's rule.
    Alias(AliasRule),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixedRule {
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearRule {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableRule {
    pub points: Vec<(u64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasRule {
    pub like: String,
}

impl EstimationRule {
    /// Evaluate the rule for the given operand widths.
    ///
    /// Returns `None` when the widths do not fit the rule (wrong arity) and
    /// for `Alias` rules, which carry no numbers of their own – resolve those
    /// through `NormalizedModel::estimate`, which knows the full op map.
    pub fn estimate(&self, widths: &[u64]) -> Option<f64> {
        match self {
            EstimationRule::Fixed(rule) => Some(rule.area),
            EstimationRule::Linear(rule) => {
                if rule.coefficients.len() != widths.len() {
                    return None;
                }
                let slope: f64 = rule
                    .coefficients
                    .iter()
                    .zip(widths)
                    .map(|(c, w)| c * *w as f64)
                    .sum();
                Some(slope + rule.intercept)
            }
            EstimationRule::Table(rule) => interpolate(&rule.points, *widths.first()?),
            EstimationRule::Alias(_) => None,
        }
    }
}

/// Clamp-and-interpolate over a table of `(width, area)` samples.
///
/// Keys must already be strictly increasing (the normalizer rejects anything
/// else). Queries at or below the first key return the first area, at or
/// above the last key the last area; in between, the two bounding samples
/// are interpolated linearly.
pub fn interpolate(points: &[(u64, f64)], width: u64) -> Option<f64> {
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

/// The `--model-name` argument plus its derived casing variants.
///
/// The camel-case form names the generated estimator type, so its exact
/// spelling matters: other generated code refers to the symbol by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelIdentifier {
    raw: String,
}

impl ModelIdentifier {
    /// Accepts short, identifier-safe names only: `[a-z0-9_]`, not starting
    /// with a digit. Everything else would produce an unusable symbol.
    pub fn new(raw: &str) -> anyhow::Result<Self> {
        if raw.is_empty() {
            bail!("model name must not be empty");
        }
        if raw.starts_with(|c: char| c.is_ascii_digit()) {
            bail!("model name `{raw}` must not start with a digit");
        }
        if let Some(c) = raw
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            bail!("model name `{raw}` contains `{c}`; only [a-z0-9_] are allowed");
        }
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `asap7_hd` → `Asap7Hd`: split on `_`, capitalize each segment, concat.
    pub fn camel_case(&self) -> String {
        self.raw
            .split('_')
            .map(|segment| {
                let mut chars = segment.chars();
                match chars.next() {
                    Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect()
    }
}
