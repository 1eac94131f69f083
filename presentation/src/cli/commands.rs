//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use council_domain::{ActivationMode, BriefingFields};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every analysis plus the synthesis
    Full,
    /// Only the verdict (or the single analysis in Flow and Doubt)
    Verdict,
    /// JSON output
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Verdict => Self::Verdict,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for editorial-council
#[derive(Parser, Debug)]
#[command(name = "editorial-council")]
#[command(author, version, about = "Editorial Council - three models critique your manuscript")]
#[command(long_about = r#"
Editorial Council consults three language models, each bound to a fixed
editorial role, about a piece of fiction in progress.

Roles:
  Style       prose density, syntax, authorial voice   (default: Claude)
  Coherence   continuity and fact-checking             (default: Gemini)
  Structure   causality, subtext, tension              (default: GPT)

Modes:
  flow     Coherence checks the text you are writing and only speaks up on a problem
  doubt    Structure answers a question you have about the text
  polish   all three roles critique in parallel, then a synthesis reconciles them

Text is read from --text, --text-file, or standard input.

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/editorial-council/config.toml   Global config

Example:
  editorial-council flow --text-file draft.md --context-file chapter1.md
  editorial-council doubt "Is the ending earned?" --text-file draft.md
  editorial-council polish --text-file scene.md --chapter 3 --emotion Anxious
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (default: from config, else full)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the text being written for continuity errors
    Flow(FlowArgs),
    /// Ask the Structure role a specific question about the text
    Doubt(DoubtArgs),
    /// Full three-role critique followed by a synthesis
    Polish(PolishArgs),
}

impl Command {
    pub fn mode(&self) -> ActivationMode {
        match self {
            Command::Flow(_) => ActivationMode::Flow,
            Command::Doubt(_) => ActivationMode::Doubt,
            Command::Polish(_) => ActivationMode::Polish,
        }
    }
}

/// Where the text under review and its surrounding manuscript come from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Text under review
    #[arg(long, value_name = "TEXT", conflicts_with = "text_file")]
    pub text: Option<String>,

    /// Read the text under review from a file ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub text_file: Option<PathBuf>,

    /// Manuscript context
    #[arg(long, value_name = "TEXT", conflicts_with = "context_file")]
    pub context: Option<String>,

    /// Read the manuscript context from a file
    #[arg(long, value_name = "PATH")]
    pub context_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FlowArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct DoubtArgs {
    /// The question for the council
    pub question: String,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PolishArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Project name used in the briefing
    #[arg(long, value_name = "NAME", default_value = "Untitled Project")]
    pub project: String,

    /// Reference style named in the briefing
    #[arg(long, value_name = "STYLE", default_value = "Metamodernism")]
    pub style_ref: String,

    #[arg(long, default_value = "1")]
    pub chapter: String,

    #[arg(long, default_value = "1")]
    pub scene: String,

    /// Protagonist's emotional state
    #[arg(long, value_name = "STATE", default_value = "Neutral")]
    pub emotion: String,
}

impl PolishArgs {
    pub fn briefing(&self) -> BriefingFields {
        BriefingFields {
            project_name: self.project.clone(),
            style_ref: self.style_ref.clone(),
            chapter: self.chapter.clone(),
            scene: self.scene.clone(),
            emotional_state: self.emotion.clone(),
        }
    }
}
