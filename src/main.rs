use clap::Parser;
use entitykit::cli::{handle_generate, handle_migrate, handle_validate, Cli, Commands};
use entitykit::logging::{init_tracing, Verbosity};

fn main() {
    let cli = Cli::parse();
    init_tracing(Verbosity::from_flags(cli.verbose, cli.quiet));

    let result = match cli.command {
        Commands::Validate {
            input,
            output,
            no_output,
            config,
            json,
        } => handle_validate(input, output, no_output, config, json),
        Commands::Migrate { input, output } => handle_migrate(input, output),
        Commands::Generate {
            count,
            owner,
            created,
            history,
            output,
        } => handle_generate(count, owner, created, history, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
