//! eval command - Process batches given on the command line
//!
//! Each positional argument is one batch. After all batches are processed,
//! `--undo N` reverts up to N of them, then the store is printed either as
//! `key=value` lines or, with `--json`, as a [`Snapshot`].
//!
//! Batch errors are reported on stderr as they happen and never change the
//! exit status.

use std::io::Write;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::cli::Context;
use crate::engine::{KeyTally, Notifier, Snapshot};
use crate::ui::output::StderrNotifier;

/// Process `batches`, undo `undo` times, and print the result.
pub fn eval(ctx: &Context, batches: &[String], undo: usize, json: bool) -> Result<()> {
    let mut kv = KeyTally::from_config(StderrNotifier, &ctx.config);
    let rendered = run(&mut kv, batches, undo, json)?;

    let mut stdout = std::io::stdout().lock();
    if !rendered.is_empty() {
        writeln!(stdout, "{rendered}").context("Failed to write output")?;
    }
    Ok(())
}

/// Drive `kv` and return what `eval` would print.
pub(crate) fn run<N: Notifier>(
    kv: &mut KeyTally<N>,
    batches: &[String],
    undo: usize,
    json: bool,
) -> Result<String> {
    for batch in batches {
        kv.process(batch);
    }

    let undone = (0..undo).take_while(|_| kv.undo()).count();
    debug!(requested = undo, undone, "eval undo");

    if json {
        let snapshot: Snapshot = kv.snapshot();
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")
    } else {
        Ok(kv.render())
    }
}
