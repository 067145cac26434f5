//! Interactive purchase order builder.
//!
//! Each input line is parsed into an [`shell::Input`], interpreted by the
//! [`dispatcher::Dispatcher`] against the one session it owns, and answered
//! with a message plus a fresh rendering of the order.

pub mod config;
pub mod dispatcher;
pub mod render;
pub mod shell;

use std::io::{BufRead, Write};

use anyhow::Context;

use crate::dispatcher::{Dispatcher, Outcome};

/// Drive the dispatcher from `input` until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    dispatcher: &mut Dispatcher,
) -> anyhow::Result<()> {
    let write_err = "failed to write to output";

    writeln!(output, "{}", render::banner()).context(write_err)?;
    write!(output, "{}", render::order(&dispatcher.view())).context(write_err)?;

    let mut line = String::new();
    loop {
        write!(output, "> ").context(write_err)?;
        output.flush().context(write_err)?;

        line.clear();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            break;
        }

        let response = dispatcher.handle_line(&line);
        write!(output, "{}", render::response(&response)).context(write_err)?;

        if matches!(response.outcome, Outcome::Quit) {
            break;
        }
    }

    output.flush().context(write_err)?;
    Ok(())
}
