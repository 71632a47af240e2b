use clap::Parser;
use ebsctl::cli::Cli;
use ebsctl_hal::LinuxHal;
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ebsctl::logging::init(cli.verbose);

    let hal = LinuxHal::new();
    let stdout = io::stdout();
    ebsctl::run::run(&hal, &cli, &mut stdout.lock())
}
