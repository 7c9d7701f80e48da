//! Stage 4 – final artifact emission.
//!
//! The emitter only ever sees a fully rendered body: `run()` orders the
//! pipeline so that every byte of validation and rendering happens before
//! the first byte of output. A failing run therefore never leaves partial
//! generated source on the stream; callers may pipe stdout straight into
//! their atomic-placement machinery.

pub mod rust;

use std::io::{self, Write};
use std::path::Path;

/// Name the banner advertises as the generating tool.
pub const TOOL_NAME: &str = "area-lookup-gen";

/// Write the generation banner plus the rendered body.
pub fn emit(out: &mut impl Write, input: &Path, body: &str) -> io::Result<()> {
    writeln!(
        out,
        "// DO NOT EDIT: this file is AUTOMATICALLY GENERATED by {TOOL_NAME} from {} and should not be changed.",
        input.display()
    )?;
    write!(out, "{body}")?;
    Ok(())
}
