use clap::Parser;
use jotter::cli::commands::Cli;
use jotter::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let dir = cli.dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch the search screen
            if let Err(e) = jotter::tui::run(dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(command) => {
            if let Err(e) = handlers::dispatch(command, dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
