// src/main.rs

// Modules defined in the crate
mod api;
mod config;
mod constants;
mod error;
mod error_recovery;
mod parsing;
mod pipeline;
mod prompts;
mod runner;
mod table;
mod types;

// Specific imports
use crate::api::OpenAiHttpClient;
use crate::config::{Command, CommandLineInput, RunConfig, RunMode};
use crate::error::AppError;
use crate::pipeline::RowProcessor;
use crate::prompts::PromptTemplate;
use crate::runner::{BatchRunner, FixedCooldown, RunSummary};
use crate::table::{segment::segment_by_country, LeadTable};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("coldpress.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes one batch run: load → process rows → final table.
async fn execute_batch(config: &RunConfig) -> Result<(), AppError> {
    let template = PromptTemplate::load(&config.prompt_path)?;

    let mut table = LeadTable::from_csv_path(&config.input_path)?;
    table.ensure_columns(config.mode.result_columns());

    let client = OpenAiHttpClient::new(&config.api_key)?;
    let processor = RowProcessor::new(&client, &template, config);
    let cooldown = FixedCooldown::new(config.cooldown);
    let runner = BatchRunner::new(processor, Box::new(cooldown), config);

    let summary = runner.run(&mut table).await?;
    report_completion(config, &summary);

    Ok(())
}

/// Reports completion to the user with per-outcome counts.
fn report_completion(config: &RunConfig, summary: &RunSummary) {
    println!(
        "📄 Processed {} rows: {} succeeded, {} skipped, {} failed{}",
        summary.total,
        summary.succeeded,
        summary.skipped,
        summary.failed,
        if summary.already_complete > 0 {
            format!(", {} already complete", summary.already_complete)
        } else {
            String::new()
        }
    );

    if summary.failed > 0 {
        eprintln!(
            "⚠️  {} row(s) failed; their result columns are blank. Re-run with --resume to retry only those.",
            summary.failed
        );
    }

    println!("✓ Results saved to {}", config.output_path.display());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A .env file is a convenience, not a requirement; the process
    // environment proper always wins.
    dotenvy::dotenv().ok();

    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    match cli.command {
        Command::Copy(args) => {
            let config = RunConfig::resolve(RunMode::Copy, args, None)?;
            execute_batch(&config).await?;
        }
        Command::Research(args) => {
            let config =
                RunConfig::resolve(RunMode::Research, args.batch, Some(args.search_context))?;
            execute_batch(&config).await?;
        }
        Command::Segment { input } => {
            let outcome = segment_by_country(&input)?;
            println!(
                "✓ {} USA leads saved to {}",
                outcome.usa_rows,
                outcome.usa_path.display()
            );
            println!(
                "✓ {} international leads saved to {}",
                outcome.international_rows,
                outcome.international_path.display()
            );
        }
    }

    Ok(())
}
