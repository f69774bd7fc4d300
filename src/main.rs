mod cli;
mod converter;
mod db;
mod error;
mod fmt;
mod mapper;
mod mapping;
mod models;
mod settings;
mod writer;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::convert::run(cli.convert),
        Some(Commands::Convert(args)) => cli::convert::run(args),
        Some(Commands::Check { source, mapping }) => cli::check::run(source, mapping),
        Some(Commands::Tables { mapping, export }) => cli::tables::run(mapping, export),
        Some(Commands::Init {
            source,
            output,
            mapping,
        }) => cli::init::run(source, output, mapping),
        Some(Commands::Status(args)) => cli::status::run(args),
    };

    if let Err(e) = result {
        log::debug!("run failed: {e:?}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
