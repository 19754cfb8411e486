use clap::Parser;

use pay_cli::app;
use pay_cli::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    app::run(cli)
}
