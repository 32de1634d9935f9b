//! Interactive per-page loop. A mounted page renders once, then each
//! input line runs through the same action grammar as a one-shot
//! invocation until `quit`. All state lives in the page value and is
//! gone when the loop returns.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::page::PageView;
use crate::render::Renderer;

#[instrument(skip_all)]
pub fn run<P: PageView, R: BufRead, W: Write>(
    page: &mut P,
    input: R,
    out: &mut W,
    renderer: &Renderer,
    cfg: &Config,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    page.render(&mut *out, renderer, cfg, now)?;
    writeln!(out)?;
    writeln!(
        out,
        "Session open on {} (quit to leave).",
        page.route().path()
    )?;

    for line in input.lines() {
        let line = line?;
        let tokens: Vec<String> = line.split_whitespace().map(ToString::to_string).collect();
        let Some((action, args)) = tokens.split_first() else {
            continue;
        };

        match action.as_str() {
            "quit" | "exit" | "q" => break,
            "help" => {
                page.write_help(&mut *out)?;
                continue;
            }
            "export" => {
                page.export(&mut *out)?;
                continue;
            }
            _ => {}
        }

        match page.apply(action, args, now) {
            Ok(feedback) => {
                debug!(action = action.as_str(), "session action applied");
                page.render(&mut *out, renderer, cfg, now)?;
                writeln!(out)?;
                writeln!(out, "{feedback}")?;
            }
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
            }
        }
    }

    info!("session closed");
    writeln!(out, "Session closed.")?;
    Ok(())
}
