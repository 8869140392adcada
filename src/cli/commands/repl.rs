//! repl command - Read batches and commands from stdin
//!
//! Line protocol:
//!
//! | Line              | Effect                          |
//! |-------------------|---------------------------------|
//! | `undo`            | revert the most recent batch    |
//! | `display`         | print the store                 |
//! | `quit` / `exit`   | stop reading                    |
//! | blank             | ignored                         |
//! | anything else     | processed as one batch          |
//!
//! Commands are matched after trimming; batches are passed through as read.

use std::io::{BufRead, Write};

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::engine::{KeyTally, Notifier};
use crate::ui::output::{StderrNotifier, Verbosity};

/// Run the interactive loop over stdin.
pub fn repl(ctx: &Context) -> Result<()> {
    let mut kv = KeyTally::from_config(StderrNotifier, &ctx.config);
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    session(&mut kv, stdin, stdout, ctx.verbosity)
}

/// Drive `kv` from `input`, writing displays to `out`.
pub(crate) fn session<N: Notifier, R: BufRead, W: Write>(
    kv: &mut KeyTally<N>,
    input: R,
    mut out: W,
    verbosity: Verbosity,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let line = line.trim_end_matches('\r');

        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "undo" => {
                if !kv.undo() && verbosity != Verbosity::Quiet {
                    writeln!(out, "nothing to undo")?;
                }
            }
            "display" => {
                let rendered = kv.render();
                if !rendered.is_empty() {
                    writeln!(out, "{rendered}")?;
                }
            }
            _ => kv.process(line),
        }
    }
    out.flush().context("Failed to flush output")
}
