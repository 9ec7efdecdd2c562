use anyhow::Result;

use super::args::Cli;
use super::handlers;
use crate::config::Config;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let ctx = handlers::load::handle(cli.workbook(), cli.any_name, &config)?;

    if cli.export_only {
        handlers::export::handle(&ctx, cli.format, cli.output.as_deref())
    } else {
        handlers::interactive::handle(&ctx, &config, cli.output.as_deref())
    }
}
