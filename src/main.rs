use clap::Parser;
use tailwind_styled::{handle_compose_command, handle_render_command, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Verbose raises the default level, RUST_LOG still wins when set
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Handle commands
    match cli.command {
        Commands::Compose(args) => match handle_compose_command(&args) {
            Ok(composed) => {
                println!("{}", composed);
                Ok(())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Render(args) => {
            let output = handle_render_command(&args)?;
            println!("{}", output);
            Ok(())
        }
    }
}
