//! config command - Print the effective configuration

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::ui::output;

/// Print the effective configuration as TOML.
///
/// The source file, if any, is shown as a leading comment.
pub fn config(ctx: &Context) -> Result<()> {
    let rendered = ctx
        .config
        .to_toml()
        .context("Failed to render configuration")?;

    match ctx.config.path() {
        Some(path) => println!("# loaded from {}", path.display()),
        None => output::print("# defaults (no config file found)", ctx.verbosity),
    }
    print!("{rendered}");
    Ok(())
}
