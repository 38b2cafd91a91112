use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mindgarden-cli", version, about = "Mindgarden CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Activity streak
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Villain progress
    Villain {
        #[command(subcommand)]
        action: commands::villain::VillainAction,
    },
    /// Once-per-day gates
    Gate {
        #[command(subcommand)]
        action: commands::gate::GateAction,
    },
    /// Session recording
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Session statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Remote mirror queue
    Mirror {
        #[command(subcommand)]
        action: commands::mirror::MirrorAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Villain { action } => commands::villain::run(action),
        Commands::Gate { action } => commands::gate::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Mirror { action } => commands::mirror::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
