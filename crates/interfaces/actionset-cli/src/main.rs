use actionset_cli::{commands, FormArgs};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an action set form and print its view as JSON
    Check {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Print the body a save would submit (fails when the form is invalid)
    Payload {
        #[command(flatten)]
        form: FormArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Check { form } => {
            if !commands::cmd_check(&form)? {
                std::process::exit(1);
            }
        }
        Commands::Payload { form } => commands::cmd_payload(&form)?,
    }

    Ok(())
}
