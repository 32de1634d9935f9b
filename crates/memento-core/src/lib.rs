pub mod cli;
pub mod config;
pub mod datetime;
pub mod diary;
pub mod filter;
pub mod page;
pub mod render;
pub mod route;
pub mod samples;
pub mod session;
pub mod store;
pub mod task;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::info;

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting memento CLI"
    );

    let cfg = config::Config::load(cli.config.as_deref())
        .context("failed to load configuration")?;
    let renderer = render::Renderer::new(&cfg)?;
    let inv = cli::Invocation::parse(&cfg, cli.rest);

    page::dispatch(&cfg, &renderer, inv)?;

    info!("done");
    Ok(())
}
