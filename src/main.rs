use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use llm_testsmith::llm::{ollama, ModelId};
use llm_testsmith::pipeline::{self, Outcome, PipelineInputs};
use llm_testsmith::settings::Settings;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "testsmith")]
#[command(about = "Generate unit tests for a source file with an LLM backend", long_about = None)]
struct Cli {
    /// Path to the source file to generate tests for
    input: PathBuf,

    /// Output file path (default: clipboard)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// LLM model to use
    #[arg(short, long, value_enum, default_value_t = ModelId::Sonnet)]
    model: ModelId,

    /// Path to an example test file
    #[arg(short, long)]
    example: Option<PathBuf>,

    /// Additional context file (repeatable)
    #[arg(short, long)]
    context: Vec<PathBuf>,

    /// Free-text instruction for the model (repeatable)
    #[arg(short, long)]
    instruction: Vec<String>,

    /// Model name for the local Ollama backend
    #[arg(long, default_value = ollama::DEFAULT_MODEL)]
    local_model: String,
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // The only nonzero exit path: the required input file must exist before
    // anything else happens.
    if !cli.input.exists() {
        eprintln!(
            "{} input file '{}' does not exist",
            "error:".red().bold(),
            cli.input.display()
        );
        std::process::exit(1);
    }

    println!("Processing file: {}", cli.input.display().to_string().bold());
    println!("Model: {}", cli.model.to_string().bold());
    println!(
        "Output: {}",
        cli.output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "clipboard".to_string())
            .bold()
    );

    let settings = Settings::from_env();
    let generator = cli.model.generator(&settings, &cli.local_model)?;

    let inputs = PipelineInputs {
        input: cli.input,
        example: cli.example,
        context: cli.context,
        instructions: cli.instruction,
        output: cli.output,
    };

    let pb = spinner(format!("Generating tests with {}...", cli.model));
    let result = pipeline::run(&inputs, generator.as_ref()).await;
    pb.finish_and_clear();

    // Generation and delivery failures are reported but do not change the
    // exit code once the input-existence check has passed.
    match result {
        Ok(Outcome::File(path)) => {
            println!("{}", format!("Result written to {}", path.display()).green());
        }
        Ok(Outcome::Clipboard) => {
            println!("{}", "Result copied to clipboard".green());
        }
        Ok(Outcome::Console) => {}
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
        }
    }

    println!("{}", "Processing complete!".green().bold());
    Ok(())
}
