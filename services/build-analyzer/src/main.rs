//! Build Analyzer
//!
//! Command-line front end for the PC build compatibility engine. Analyzes a
//! components map from a JSON file, an ad-hoc list of stored products, or a
//! saved quote (persisting the result onto the quote).
//!
//! Exit status: 0 valid, 1 warning, 2 incompatible, 3 the analysis could not run.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use buildcheck_database::{initialize_database, ProductRepository, QuoteRepository};
use buildcheck_models::{BuildAnalysis, BuildStatus};
use buildcheck_utils::{
    init_logging, validate_product_ids, validate_uuid, AppConfig, BuildCheckError,
    CompatibilityEngine, ErrorResponse,
};

mod service;

use service::AnalyzerService;

#[derive(Parser)]
#[command(name = "build-analyzer")]
#[command(author, version, about = "PC build compatibility analyzer")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file layered over config/ and the environment
    #[arg(short, long, env = "BUILDCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a components map read from a JSON file
    Check {
        /// Path to a JSON object keyed by category (cpu, gpu, motherboard, ...)
        file: PathBuf,
    },

    /// Analyze stored products by id without saving the result
    Products {
        /// Product ids, at most one per category
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Re-analyze a saved quote and store the result on it
    Quote {
        /// Quote id
        id: String,

        /// Print the analysis without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// List active compatibility rules in execution order
    Rules,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            report_error(&error);
            ExitCode::from(3)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let Cli {
        config,
        verbose,
        compact,
        command,
    } = cli;

    let mut config = AppConfig::load_with(config.as_deref()).map_err(BuildCheckError::from)?;
    if verbose {
        config.logging.level = "debug".to_string();
    }
    init_logging(&config.logging)?;

    let service = AnalyzerService::new(CompatibilityEngine::from_config(&config.engine));

    let analysis = match command {
        Commands::Rules => {
            for name in service.active_rules() {
                println!("{}", name);
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Check { file } => service.analyze_file(&file)?,
        Commands::Products { ids } => {
            let ids = validate_product_ids(&ids)?;
            let pool = initialize_database(&config.database).await?;
            service
                .analyze_products(&ProductRepository::new(pool), &ids)
                .await?
        }
        Commands::Quote { id, dry_run } => {
            let quote_id = validate_uuid(&id)?;
            let pool = initialize_database(&config.database).await?;
            let products = ProductRepository::new(pool.clone());
            let quotes = QuoteRepository::new(pool);
            let analysis = service
                .analyze_quote(&products, &quotes, quote_id, dry_run)
                .await?;
            info!(quote_id = %quote_id, status = %analysis.status, "Quote analyzed");
            analysis
        }
    };

    info!(
        status = %analysis.status,
        errors = analysis.error_count(),
        warnings = analysis.warning_count(),
        estimated_wattage = analysis.estimated_wattage,
        "Analysis complete"
    );
    print_analysis(&analysis, compact)?;
    Ok(exit_code(&analysis))
}

fn print_analysis(analysis: &BuildAnalysis, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(analysis)?
    } else {
        serde_json::to_string_pretty(analysis)?
    };
    println!("{}", json);
    Ok(())
}

fn exit_code(analysis: &BuildAnalysis) -> ExitCode {
    match analysis.status {
        BuildStatus::Valid => ExitCode::SUCCESS,
        BuildStatus::Warning => ExitCode::from(1),
        BuildStatus::Incompatible => ExitCode::from(2),
    }
}

fn report_error(error: &anyhow::Error) {
    let error = match error.downcast_ref::<BuildCheckError>() {
        Some(known) => known.clone(),
        None => BuildCheckError::internal(format!("{:#}", error)),
    };
    let response = ErrorResponse::from(error);

    match serde_json::to_string(&response) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{}", response.message),
    }
}
