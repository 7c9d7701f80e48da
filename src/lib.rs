pub mod cli;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod writer;

use anyhow::Context;
use clap::Parser;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // 1. ── Load ───────────────────────────────────────────────────────
    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    let cost_model = parser::load_from_json(&json)
        .with_context(|| format!("Parsing model {}", args.input.display()))?;
    // stdout belongs to the artifact; progress notes go to stderr
    eprintln!("Model loaded: {} op rules", cost_model.op_models.len());

    // 2. ── Normalize ──────────────────────────────────────────────────
    let normalized = normalizer::run(cost_model)
        .with_context(|| format!("Validating model {}", args.input.display()))?;

    // 3. ── Render ─────────────────────────────────────────────────────
    let body = writer::rust::render(&normalized, &args.model_name)
        .with_context(|| format!("Rendering `{}` area lookup", args.model_name.as_str()))?;

    // 4. ── Emit ───────────────────────────────────────────────────────
    let stdout = std::io::stdout();
    writer::emit(&mut stdout.lock(), &args.input, &body)
        .with_context(|| "Writing generated source")?;

    Ok(())
}
