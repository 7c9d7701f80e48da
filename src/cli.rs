use clap::Parser;
use std::path::PathBuf;

use crate::model::ModelIdentifier;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input .json area cost-model description
    pub input: PathBuf,
    /// Short model identifier (e.g. "asap7"), used to name the generated
    /// estimator and its registry entry
    #[arg(long, value_parser = parse_model_name)]
    pub model_name: ModelIdentifier,
}

/// Identifier-safety is a usage concern, so let clap report violations.
fn parse_model_name(raw: &str) -> Result<ModelIdentifier, String> {
    ModelIdentifier::new(raw).map_err(|e| e.to_string())
}
