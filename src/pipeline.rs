//! File pipeline: read inputs, drive generation, deliver the result.
//!
//! Runs strictly in order per invocation: read the subject file (required),
//! read the optional example and context files (missing ones degrade to
//! nothing with a warning), render the prompt, call the backend, then hand
//! the generated text to the output fallback chain. The chain tries the
//! output file first, then the system clipboard, then a plain console dump,
//! so the generated content is never silently lost.

use crate::error::{Error, IoError, Result};
use crate::llm::TestGenerator;
use crate::prompt::{build_prompt, GenerationRequest};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Paths and free-text arguments for one invocation
#[derive(Debug, Clone, Default)]
pub struct PipelineInputs {
    /// Subject source file (required)
    pub input: PathBuf,
    /// Example test file
    pub example: Option<PathBuf>,
    /// Context files, in the order they were supplied
    pub context: Vec<PathBuf>,
    /// Free-text instruction fragments
    pub instructions: Vec<String>,
    /// Output file; clipboard when absent
    pub output: Option<PathBuf>,
}

/// Where the generated content ended up
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Written to the given file
    File(PathBuf),
    /// Copied to the system clipboard
    Clipboard,
    /// Dumped to stdout as a last resort
    Console,
}

/// Read the required subject file.
///
/// A missing or empty subject is fatal and must be reported before any
/// backend call is attempted.
pub fn read_subject(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Io(IoError::FileReadFailed {
            path: path.display().to_string(),
            source: e,
        })
    })?;
    if content.trim().is_empty() {
        return Err(Error::Io(IoError::EmptyFile(path.display().to_string())));
    }
    Ok(content)
}

/// Read an optional input file, degrading to None with a warning.
pub fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) if !content.is_empty() => Some(content),
        Ok(_) => {
            warn!("Optional file is empty: {}", path.display());
            None
        }
        Err(e) => {
            warn!("Could not read optional file {}: {}", path.display(), e);
            eprintln!(
                "{} could not read {}, continuing without it",
                "warning:".yellow().bold(),
                path.display()
            );
            None
        }
    }
}

/// Assemble the generation request from the input files.
///
/// Fails only when the subject is missing or empty; absent example and
/// context files are tolerated.
pub fn gather_request(inputs: &PipelineInputs) -> Result<GenerationRequest> {
    let subject = read_subject(&inputs.input)?;

    let example = inputs.example.as_deref().and_then(read_optional);
    let context: Vec<String> = inputs
        .context
        .iter()
        .filter_map(|path| read_optional(path))
        .collect();

    Ok(GenerationRequest {
        subject,
        example,
        context,
        instructions: inputs.instructions.clone(),
    })
}

/// Run the whole pipeline with the given backend.
///
/// The backend is only invoked once all inputs have been read successfully.
pub async fn run(inputs: &PipelineInputs, generator: &dyn TestGenerator) -> Result<Outcome> {
    let request = gather_request(inputs)?;
    let prompt = build_prompt(&request);
    debug!("Rendered prompt: {} chars", prompt.len());

    let generated = generator.generate(&prompt).await?;

    Ok(deliver(&generated, inputs.output.as_deref()))
}

/// Deliver the generated content: file, then clipboard, then console.
///
/// Infallible by construction. A failed file write falls back to the
/// clipboard; a failed clipboard write dumps the content to stdout.
pub fn deliver(content: &str, output: Option<&Path>) -> Outcome {
    if let Some(path) = output {
        match fs::write(path, content) {
            Ok(()) => return Outcome::File(path.to_path_buf()),
            Err(e) => {
                warn!("Could not write {}: {}", path.display(), e);
                eprintln!(
                    "{} could not write {}, falling back to clipboard",
                    "warning:".yellow().bold(),
                    path.display()
                );
            }
        }
    }

    match copy_to_clipboard(content) {
        Ok(()) => Outcome::Clipboard,
        Err(e) => {
            warn!("Clipboard unavailable: {}", e);
            eprintln!(
                "{} clipboard unavailable ({}), printing result",
                "warning:".yellow().bold(),
                e
            );
            println!("{}", content);
            Outcome::Console
        }
    }
}

fn copy_to_clipboard(content: &str) -> std::result::Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;

    // X11 and Wayland only serve the copied text while this clipboard
    // instance is alive, so block until the selection has been handed off
    // (to a clipboard manager or a paste) before dropping it.
    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        clipboard.set().wait().text(content.to_string())
    }

    #[cfg(not(target_os = "linux"))]
    {
        clipboard.set_text(content.to_string())
    }
}
