use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::route::Route;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "memento",
    version,
    about = "Memento: tasks and diary in your terminal",
    disable_help_subcommand = true,
    arg_required_else_help = false
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<OsString>,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// A parsed command line: which page to open and what to do there.
/// The first trailing token selects the route when it starts with `/`;
/// otherwise the configured default route gets every token as actions.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub route: Route,
    pub actions: Vec<String>,
}

impl Invocation {
    #[tracing::instrument(skip(cfg, rest))]
    pub fn parse(cfg: &Config, rest: Vec<OsString>) -> Self {
        let tokens: Vec<String> = rest
            .into_iter()
            .map(|arg| arg.to_string_lossy().to_string())
            .collect();

        let (route, actions) = match tokens.split_first() {
            Some((first, remainder)) if first.starts_with('/') => {
                (Route::parse(first), remainder.to_vec())
            }
            Some(_) => {
                debug!(route = %cfg.default_route, "no explicit route, using default");
                (Route::parse(&cfg.default_route), tokens)
            }
            None => (Route::parse(&cfg.default_route), vec![]),
        };

        debug!(route = %route.path(), action_count = actions.len(), "parsed invocation");
        Self { route, actions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_os(tokens: &[&str]) -> Vec<OsString> {
        tokens.iter().map(OsString::from).collect()
    }

    #[test]
    fn leading_slash_token_selects_the_route() {
        let cfg = Config::default();
        let inv = Invocation::parse(&cfg, to_os(&["/todos", "toggle", "3"]));
        assert_eq!(inv.route, Route::Todos);
        assert_eq!(inv.actions, vec!["toggle", "3"]);
    }

    #[test]
    fn bare_actions_go_to_the_default_route() {
        let mut cfg = Config::default();
        cfg.default_route = "/dashboard".to_string();
        let inv = Invocation::parse(&cfg, to_os(&["add", "Buy", "milk"]));
        assert_eq!(inv.route, Route::Dashboard);
        assert_eq!(inv.actions, vec!["add", "Buy", "milk"]);
    }

    #[test]
    fn empty_invocation_opens_the_default_route() {
        let cfg = Config::default();
        let inv = Invocation::parse(&cfg, vec![]);
        assert_eq!(inv.route, Route::Landing);
        assert!(inv.actions.is_empty());
    }

    #[test]
    fn unknown_routes_pass_through_as_not_found() {
        let cfg = Config::default();
        let inv = Invocation::parse(&cfg, to_os(&["/missing-page"]));
        assert_eq!(inv.route, Route::NotFound("/missing-page".to_string()));
    }
}
