//! Command: print the generated config without touching any file.
use std::io::Write;

use anyhow::Result;

use super::{Context, generate};
use crate::source::PathSource;

/// Run the pipeline and write the rendered config to `out`.
///
/// # Errors
///
/// Returns an error if generation fails or `out` cannot be written.
pub fn run(ctx: &Context, source: &dyn PathSource, out: &mut dyn Write) -> Result<()> {
    let generated = generate(ctx, source)?;
    out.write_all(generated.text.as_bytes())?;
    out.flush()?;
    Ok(())
}
