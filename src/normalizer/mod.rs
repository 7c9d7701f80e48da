//! Stage 2 – semantic validation and derived constants.
//!
//! Takes the raw `CostModel` apart, checks every rule, folds the op list
//! into a deterministically ordered map and derives the one-bit register
//! baseline the renderer bakes into the generated lookup. Pure function of
//! its input; nothing here touches the outside world.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{CostModel, EstimationRule};

/// Operation kind whose rule defines the one-bit storage baseline.
pub const ONE_BIT_REGISTER_OP: &str = "kRegister";

/// The model is structurally valid JSON but semantically unusable.
#[derive(Debug, Error, PartialEq)]
pub enum ModelValidationError {
    #[error("model defines no op rules")]
    Empty,
    #[error("model metric is `{0}`, expected `area`")]
    WrongMetric(String),
    #[error("duplicate rule for op `{0}`")]
    DuplicateOp(String),
    #[error("linear rule for `{0}` has no coefficients")]
    NoCoefficients(String),
    #[error("table rule for `{0}` has no sample points")]
    EmptyTable(String),
    #[error("table rule for `{0}` has non-increasing sample keys")]
    UnsortedTable(String),
    #[error("`{0}` aliases unknown op `{1}`")]
    DanglingAlias(String, String),
    #[error("`{0}` aliases `{1}`, which is itself an alias")]
    AliasChain(String, String),
    #[error("model defines no `{ONE_BIT_REGISTER_OP}` rule, cannot derive the one-bit register baseline")]
    MissingBaseline,
}

/// Scalars derived from the model, handed read-only to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedConstants {
    pub one_bit_register_area: f64,
}

/// A validated model: rules keyed by op in deterministic order, plus the
/// derived constants. This is the only shape the renderer accepts.
#[derive(Debug)]
pub struct NormalizedModel {
    pub ops: BTreeMap<String, EstimationRule>,
    pub constants: DerivedConstants,
}

impl NormalizedModel {
    /// Evaluate an op's rule for the given operand widths, resolving
    /// aliases through the op map.
    pub fn estimate(&self, op: &str, widths: &[u64]) -> Option<f64> {
        match self.ops.get(op)? {
            EstimationRule::Alias(alias) => self.ops.get(&alias.like)?.estimate(widths),
            rule => rule.estimate(widths),
        }
    }
}

/// Runs every validation pass and returns the read-only normalized model.
pub fn run(model: CostModel) -> Result<NormalizedModel, ModelValidationError> {
    if model.metric != "area" {
        return Err(ModelValidationError::WrongMetric(model.metric));
    }
    if model.op_models.is_empty() {
        return Err(ModelValidationError::Empty);
    }

    let mut ops = BTreeMap::new();
    for op_model in model.op_models {
        check_rule(&op_model.op, &op_model.estimator)?;
        if ops.insert(op_model.op.clone(), op_model.estimator).is_some() {
            return Err(ModelValidationError::DuplicateOp(op_model.op));
        }
    }

    // Alias targets can only be checked once the whole map exists.
    for (op, rule) in &ops {
        if let EstimationRule::Alias(alias) = rule {
            match ops.get(&alias.like) {
                None => {
                    return Err(ModelValidationError::DanglingAlias(
                        op.clone(),
                        alias.like.clone(),
                    ));
                }
                Some(EstimationRule::Alias(_)) => {
                    return Err(ModelValidationError::AliasChain(
                        op.clone(),
                        alias.like.clone(),
                    ));
                }
                Some(_) => {}
            }
        }
    }

    let constants = DerivedConstants {
        one_bit_register_area: one_bit_register_area(&ops)?,
    };

    Ok(NormalizedModel { ops, constants })
}

/// Per-rule checks that need no other rule to decide.
fn check_rule(op: &str, rule: &EstimationRule) -> Result<(), ModelValidationError> {
    match rule {
        EstimationRule::Fixed(_) => Ok(()),
        EstimationRule::Linear(linear) => {
            if linear.coefficients.is_empty() {
                return Err(ModelValidationError::NoCoefficients(op.to_string()));
            }
            Ok(())
        }
        EstimationRule::Table(table) => {
            if table.points.is_empty() {
                return Err(ModelValidationError::EmptyTable(op.to_string()));
            }
            // strict `<` also rejects duplicate keys
            if !table.points.windows(2).all(|pair| pair[0].0 < pair[1].0) {
                return Err(ModelValidationError::UnsortedTable(op.to_string()));
            }
            Ok(())
        }
        EstimationRule::Alias(_) => Ok(()),
    }
}

/// Locate the canonical one-bit storage rule and evaluate it at width 1.
fn one_bit_register_area(
    ops: &BTreeMap<String, EstimationRule>,
) -> Result<f64, ModelValidationError> {
    let mut rule = ops
        .get(ONE_BIT_REGISTER_OP)
        .ok_or(ModelValidationError::MissingBaseline)?;
    if let EstimationRule::Alias(alias) = rule {
        rule = ops.get(&alias.like).ok_or_else(|| {
            ModelValidationError::DanglingAlias(ONE_BIT_REGISTER_OP.to_string(), alias.like.clone())
        })?;
    }
    let area = match rule {
        EstimationRule::Fixed(fixed) => Some(fixed.area),
        // "width 1" for a multi-operand formula means every operand is 1 bit
        EstimationRule::Linear(linear) => rule.estimate(&vec![1u64; linear.coefficients.len()]),
        EstimationRule::Table(_) => rule.estimate(&[1]),
        EstimationRule::Alias(alias) => {
            return Err(ModelValidationError::AliasChain(
                ONE_BIT_REGISTER_OP.to_string(),
                alias.like.clone(),
            ));
        }
    };
    area.ok_or(ModelValidationError::MissingBaseline)
}
