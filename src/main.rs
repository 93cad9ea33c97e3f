mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();
    let config_dir = args.config_dir.as_deref();

    let result = match &args.command {
        Commands::Create {
            name,
            email,
            comment,
            expire,
        } => cli::commands::create::execute(
            config_dir,
            name.as_deref(),
            email.as_deref(),
            comment.as_deref(),
            expire.as_deref(),
        ),
        Commands::List => cli::commands::list::execute(),
        Commands::Export { key_id } => cli::commands::export::execute(key_id.as_deref()),
        Commands::Delete { key_id } => {
            cli::commands::delete::execute(config_dir, key_id.as_deref())
        }
        Commands::Git { key_id } => cli::commands::git::execute(config_dir, key_id.as_deref()),
        Commands::Github { key_id } => {
            cli::commands::github::execute(config_dir, key_id.as_deref())
        }
        Commands::Status => cli::commands::status::execute(config_dir, args.verbose),
        Commands::Clear => cli::commands::clear::execute(config_dir),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
