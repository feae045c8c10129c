use clap::{Parser, Subcommand};
use ipcidr::{Pipeline, PipelineConfig, RegistryCatalog};
use tracing::info;

/// Per-country IP CIDR list generator fed by RIR delegation statistics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the latest delegation data and regenerate data/
    Update,
    /// Look up a country code, or list all with `all`
    Lookup {
        /// Two-letter country code, or `all`
        code: String,
        /// Codes per line when listing all
        #[arg(long, default_value_t = 5)]
        per_line: usize,
    },
}

#[tokio::main]
async fn main() -> ipcidr::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let catalog = RegistryCatalog::builtin();

    match args.command {
        Command::Update => {
            let pipeline = Pipeline::new(PipelineConfig::default(), catalog);
            let summary = pipeline.run().await?;
            info!("pipeline finished");
            println!("{summary}");
        }
        Command::Lookup { code, per_line } => {
            if code.eq_ignore_ascii_case("all") {
                print!("{}", catalog.format_all(per_line));
            } else {
                println!("{}", catalog.format_lookup(&code));
            }
        }
    }

    Ok(())
}
