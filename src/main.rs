use clap::Parser;
use faceid::cli::commands::{Cli, Commands};
use faceid::config::FaceIdConfig;
use faceid::domain::values::outcome::{Outcome, OutcomeStatus};
use faceid::FaceId;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let engine = match FaceId::new(FaceIdConfig::from_env()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error initializing faceid: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(engine, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(engine: FaceId, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Enroll { name, employee_id, photo } => {
            let bytes = std::fs::read(&photo)?;
            let outcome = engine.enroll(&name, &employee_id, &bytes).await?;
            print_outcome(&outcome)?;
        }
        Commands::Remove { employee_id } => {
            let outcome = engine.remove(&employee_id).await?;
            print_outcome(&outcome)?;
        }
        Commands::Rebuild => {
            let outcome = engine.rebuild().await?;
            print_outcome(&outcome)?;
        }
        Commands::Match { image } => {
            let bytes = std::fs::read(&image)?;
            let found = engine.match_face(&bytes).await?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Commands::List => {
            let records = engine.list().await;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Stats => {
            let stats = engine.stats().await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Health => {
            print_outcome(&engine.health())?;
        }
    }
    Ok(())
}

/// Error outcomes still print as JSON but make the process fail.
fn print_outcome(outcome: &Outcome) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    if outcome.status == OutcomeStatus::Error {
        return Err(outcome.message.clone().into());
    }
    Ok(())
}
