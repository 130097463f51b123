//! colmap CLI - column-to-placeholder mapping for templated messages.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Suggest {
            file,
            template,
            threshold,
            confidence,
            strict_types,
            json,
        } => commands::suggest::run(
            commands::suggest::SuggestArgs {
                file,
                template,
                threshold,
                confidence,
                strict_types,
                json,
            },
            cli.verbose,
        )
        .map(|()| 0),

        Commands::Validate {
            file,
            template,
            mapping,
            confidence,
            phone_column,
            strict_types,
            json,
        } => commands::validate::run(commands::validate::ValidateArgs {
            file,
            template,
            mapping,
            confidence,
            phone_column,
            strict_types,
            json,
        })
        // Exit status 2 marks an invalid mapping, distinct from failures.
        .map(|valid| if valid { 0 } else { 2 }),

        Commands::Render {
            text,
            values,
            samples,
            mappings,
        } => commands::render::run(text, values, samples, mappings).map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
