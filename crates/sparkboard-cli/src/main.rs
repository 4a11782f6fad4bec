use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sparkboard", version, about = "Sparkboard personal dashboard")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily gratitude prompt
    Gratitude {
        #[command(subcommand)]
        action: commands::gratitude::GratitudeAction,
    },
    /// Budget buckets and daily income
    Budget {
        #[command(subcommand)]
        action: commands::budget::BudgetAction,
    },
    /// Savings goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Credit builder checklist
    Checklist {
        #[command(subcommand)]
        action: commands::checklist::ChecklistAction,
    },
    /// Prayer wall
    Prayer {
        #[command(subcommand)]
        action: commands::prayer::PrayerAction,
    },
    /// What to wear for today's weather
    Outfit(commands::outfit::OutfitArgs),
    /// Money Buddy coach chat
    Coach {
        #[command(subcommand)]
        action: commands::coach::CoachAction,
    },
    /// AI Buddy chat
    Buddy {
        #[command(subcommand)]
        action: commands::buddy::BuddyAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Credential management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPARKBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json = cli.json;
    let result = match cli.command {
        Commands::Gratitude { action } => commands::gratitude::run(action, json).await,
        Commands::Budget { action } => commands::budget::run(action, json),
        Commands::Goal { action } => commands::goal::run(action, json),
        Commands::Checklist { action } => commands::checklist::run(action, json),
        Commands::Prayer { action } => commands::prayer::run(action, json),
        Commands::Outfit(args) => commands::outfit::run(args, json).await,
        Commands::Coach { action } => commands::coach::run(action, json).await,
        Commands::Buddy { action } => commands::buddy::run(action, json).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
