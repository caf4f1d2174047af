// src/config.rs
use crate::constants::{DEFAULT_COOLDOWN_SECS, SUBJECT_SLOTS};
use crate::error::AppError;
use crate::types::{ApiKey, ModelName, SearchContextSize};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate outreach copy (subject options + email body) for every lead
    Copy(BatchArgs),

    /// Research every lead company into a free-text brief
    Research(ResearchArgs),

    /// Split a lead list into USA and international (minus India & China) segments
    Segment {
        /// Input CSV of leads with a `Country` column
        input: PathBuf,
    },
}

/// Flags shared by the two batch modes.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input CSV of leads (URL, CEO Name, CEO Email, plus passthrough columns)
    pub input: PathBuf,

    /// Output CSV for the final table (defaults to `<input stem>_<mode>.csv`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prompt template file (defaults to the mode's standard template)
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Hosted model to call
    #[arg(long, default_value = "gpt-4o")]
    pub model: String,

    /// Seconds to pause between provider calls
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_SECS)]
    pub cooldown_secs: u64,

    /// Directory for per-row checkpoint files
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: PathBuf,

    /// Leave rows whose endpoint column is already populated untouched
    #[arg(long, default_value_t = false)]
    pub resume: bool,
}

#[derive(Args, Debug)]
pub struct ResearchArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Web-search context size for the research pass
    #[arg(long, value_enum, default_value_t = SearchContextSize::High)]
    pub search_context: SearchContextSize,
}

/// Which batch pipeline a run drives. The mode decides the result columns,
/// the parser, and the defaults; everything downstream switches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Copy,
    Research,
}

impl RunMode {
    /// Column recording which model produced a row's results. Doubles as the
    /// marker `--resume` checks for already-completed rows.
    pub fn endpoint_column(&self) -> &'static str {
        match self {
            Self::Copy => "AI Copy Generation Endpoint",
            Self::Research => "AI Research Endpoint",
        }
    }

    /// Every result column this mode appends to the input table, endpoint
    /// column first.
    pub fn result_columns(&self) -> &'static [&'static str] {
        const COPY_COLUMNS: [&str; 2 + SUBJECT_SLOTS] = [
            "AI Copy Generation Endpoint",
            "Subject 1",
            "Subject 2",
            "Subject 3",
            "Subject 4",
            "Body",
        ];
        const RESEARCH_COLUMNS: [&str; 2] = ["AI Research Endpoint", "Research Data"];
        match self {
            Self::Copy => &COPY_COLUMNS,
            Self::Research => &RESEARCH_COLUMNS,
        }
    }

    /// Short name used in checkpoint file names and output suffixes.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Research => "research",
        }
    }

    pub fn default_prompt_file(&self) -> &'static str {
        match self {
            Self::Copy => "CombinedPrompt.txt",
            Self::Research => "target_brief_prompt.txt",
        }
    }
}

/// Resolved batch configuration — validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    pub api_key: ApiKey,
    pub model: ModelName,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub prompt_path: PathBuf,
    pub checkpoint_dir: PathBuf,
    pub cooldown: Duration,
    pub resume: bool,
    /// Explicit web-search context size; `None` leaves the provider default.
    pub search_context: Option<SearchContextSize>,
}

impl RunConfig {
    /// Resolves a complete batch configuration from CLI input and environment.
    pub fn resolve(
        mode: RunMode,
        args: BatchArgs,
        search_context: Option<SearchContextSize>,
    ) -> Result<Self, AppError> {
        let api_key_str = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AppError::MissingConfiguration(
                "OPENAI_API_KEY environment variable not set".to_string(),
            )
        })?;
        let api_key = ApiKey::new(api_key_str)?;

        let model = ModelName::new(args.model)?;

        let output_path = args
            .output
            .unwrap_or_else(|| default_output_path(&args.input, mode));

        let prompt_path = args
            .prompt_file
            .unwrap_or_else(|| PathBuf::from(mode.default_prompt_file()));

        Ok(Self {
            mode,
            api_key,
            model,
            input_path: args.input,
            output_path,
            prompt_path,
            checkpoint_dir: args.checkpoint_dir,
            cooldown: Duration::from_secs(args.cooldown_secs),
            resume: args.resume,
            search_context,
        })
    }

    /// Checkpoint file for the given 1-based row position.
    pub fn checkpoint_path(&self, row_position: usize) -> PathBuf {
        self.checkpoint_dir
            .join(format!("{}_row_{}.csv", self.mode.slug(), row_position))
    }
}

/// `leads.csv` in copy mode → `leads_copy.csv`, preserving the directory.
fn default_output_path(input: &Path, mode: RunMode) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_{}.csv", stem, mode.slug()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_output_carries_mode_slug() {
        assert_eq!(
            default_output_path(Path::new("data/leads.csv"), RunMode::Copy),
            PathBuf::from("data/leads_copy.csv")
        );
        assert_eq!(
            default_output_path(Path::new("leads.csv"), RunMode::Research),
            PathBuf::from("leads_research.csv")
        );
    }

    #[test]
    fn result_columns_lead_with_endpoint_column() {
        for mode in [RunMode::Copy, RunMode::Research] {
            assert_eq!(mode.result_columns()[0], mode.endpoint_column());
        }
        assert_eq!(RunMode::Copy.result_columns().len(), 2 + SUBJECT_SLOTS);
    }
}
