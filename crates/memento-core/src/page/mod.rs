use std::io::{self, Write};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::cli::Invocation;
use crate::config::Config;
use crate::render::{self, Renderer};
use crate::route::Route;
use crate::session;
use crate::task::RecordId;

pub mod dashboard;
pub mod diary;
pub mod landing;
pub mod todos;

pub use dashboard::DashboardPage;
pub use diary::DiaryPage;
pub use todos::TodoPage;

/// What every stateful page exposes to the shell: apply one action
/// against the page state, render the current view, dump the backing
/// collection as JSON.
pub trait PageView {
    fn route(&self) -> Route;

    /// Handles one action and returns the feedback line printed under
    /// the re-rendered page. Unknown actions and malformed arguments
    /// are errors; mutations that find no matching record stay quiet
    /// no-ops and say so in the feedback.
    fn apply(
        &mut self,
        action: &str,
        args: &[String],
        now: DateTime<Utc>,
    ) -> anyhow::Result<String>;

    fn render<W: Write>(
        &self,
        out: &mut W,
        renderer: &Renderer,
        cfg: &Config,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()>;

    fn export<W: Write>(&self, out: &mut W) -> anyhow::Result<()>;

    fn help_lines(&self) -> &'static [&'static str];

    fn write_help<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "Actions on {}:", self.route().path())?;
        for line in self.help_lines() {
            writeln!(out, "  {line}")?;
        }
        writeln!(out, "  export")?;
        writeln!(out, "  session")?;
        writeln!(out, "  help")?;
        Ok(())
    }
}

#[instrument(skip(cfg, renderer, inv))]
pub fn dispatch(cfg: &Config, renderer: &Renderer, inv: Invocation) -> anyhow::Result<()> {
    let now = Utc::now();
    let mut out = io::stdout().lock();

    debug!(route = %inv.route.path(), actions = ?inv.actions, "dispatching route");

    match &inv.route {
        Route::Landing => {
            reject_actions(&inv.actions, "/")?;
            landing::render(&mut out, renderer)
        }
        Route::NotFound(path) => {
            info!(path = %path, "no page matches path");
            render_not_found(&mut out, renderer, path)
        }
        Route::Dashboard => run_page(
            DashboardPage::mount(),
            cfg,
            renderer,
            &inv.actions,
            now,
            &mut out,
        ),
        Route::Todos => run_page(
            TodoPage::mount(),
            cfg,
            renderer,
            &inv.actions,
            now,
            &mut out,
        ),
        Route::Diary => run_page(
            DiaryPage::mount(),
            cfg,
            renderer,
            &inv.actions,
            now,
            &mut out,
        ),
    }
}

/// One-shot page driver: render, or apply a single action and render
/// the result, or hand the page to the interactive session loop. The
/// page is dropped afterwards either way; nothing survives the process.
fn run_page<P: PageView, W: Write>(
    mut page: P,
    cfg: &Config,
    renderer: &Renderer,
    actions: &[String],
    now: DateTime<Utc>,
    out: &mut W,
) -> anyhow::Result<()> {
    match actions.split_first() {
        None => page.render(out, renderer, cfg, now),
        Some((action, _)) if action == "session" => {
            let stdin = io::stdin().lock();
            session::run(&mut page, stdin, out, renderer, cfg, now)
        }
        Some((action, _)) if action == "help" => page.write_help(out),
        Some((action, _)) if action == "export" => page.export(out),
        Some((action, args)) => {
            let feedback = page.apply(action, args, now)?;
            page.render(out, renderer, cfg, now)?;
            writeln!(out)?;
            writeln!(out, "{feedback}")?;
            Ok(())
        }
    }
}

fn reject_actions(actions: &[String], path: &str) -> anyhow::Result<()> {
    match actions.first() {
        None => Ok(()),
        Some(action) => Err(anyhow!(
            "no actions on {path} (got {action:?}); try /dashboard, /todos, or /diary"
        )),
    }
}

pub(crate) fn parse_id(token: Option<&String>, action: &str) -> anyhow::Result<RecordId> {
    let token = token.ok_or_else(|| anyhow!("{action} requires an id"))?;
    let value: u64 = token.parse().map_err(|_| anyhow!("invalid id: {token}"))?;
    Ok(RecordId(value))
}

fn render_not_found<W: Write>(out: &mut W, renderer: &Renderer, path: &str) -> anyhow::Result<()> {
    render::write_navbar(&mut *out, renderer, &Route::NotFound(path.to_string()))?;
    writeln!(out)?;
    writeln!(out, "{}", renderer.paint("404", "1"))?;
    writeln!(out, "Page Not Found")?;
    writeln!(out)?;
    writeln!(
        out,
        "Oops! The page you're looking for doesn't exist or has been moved."
    )?;
    writeln!(out, "Nothing lives at {path}.")?;
    writeln!(out)?;
    writeln!(out, "Go Home: memento /")?;
    writeln!(out)?;
    render::write_footer(&mut *out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_plain_numbers() {
        let token = "42".to_string();
        assert_eq!(parse_id(Some(&token), "toggle").unwrap(), RecordId(42));
    }

    #[test]
    fn parse_id_rejects_missing_and_malformed_tokens() {
        assert!(parse_id(None, "toggle").is_err());
        let token = "abc".to_string();
        assert!(parse_id(Some(&token), "toggle").is_err());
    }

    #[test]
    fn not_found_view_names_the_path() {
        let mut out = Vec::new();
        render_not_found(&mut out, &Renderer::plain(), "/missing").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("404"));
        assert!(text.contains("Page Not Found"));
        assert!(text.contains("/missing"));
    }

    #[test]
    fn landing_page_rejects_actions() {
        assert!(reject_actions(&[], "/").is_ok());
        assert!(reject_actions(&["add".to_string()], "/").is_err());
    }
}
