pub mod certbot;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod host;
pub mod log;
pub mod nginx;
pub mod output;
pub mod process;
pub mod template;
pub mod time;
pub mod validator;
pub mod workflow;

use clap::Parser;
use cli::{Cli, Command};
use config::Settings;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = log::init_logger(&cli) {
        eprintln!("Failed to initialize logger: {:#}", e);
    }
    let settings = Settings::from_cli(&cli);
    tracing::debug!("{:?}", settings);

    let result = match cli.command {
        Command::Add(args) => cmd::add::run(&settings, args),
        Command::Remove(args) => cmd::remove::run(&settings, args),
        Command::List(args) => cmd::list::run(&settings, args),
        Command::Status(args) => cmd::status::run(&settings, args),
        Command::Cert(command) => cmd::cert::run(&settings, command),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
