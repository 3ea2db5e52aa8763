use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::DestinationArg;
use crate::config::Config;
use crate::credentials::{KeyStore, Service};
use crate::deliver::{self, Destination};
use crate::error::Error;
use crate::summarize::client::GeminiClient;
use crate::summarize::preset::{self, Preset, PRESETS};
use crate::transcribe::client::TranscriptionClient;
use crate::transcribe::job::TranscriptionOptions;
use crate::transcribe::poller::JobPoller;
use crate::ui;

pub struct TranscribeArgs {
    pub file: PathBuf,
    pub diarize: bool,
    pub speakers: Option<u32>,
    pub to: Option<DestinationArg>,
    pub preset: Option<String>,
    pub output: Option<PathBuf>,
    pub yes: bool,
}

/// What the user wants done with a finished transcript.
enum NextStep {
    Summarize,
    Deliver(Destination),
}

/// Main entry point for the transcribe command.
pub fn run_transcribe(config: &Config, args: TranscribeArgs) -> Result<()> {
    let mut store = KeyStore::open()?;

    // 1. Credentials and options, before any network traffic
    let Some(api_key) = resolve_key(&mut store, Service::Assemblyai, !args.yes)? else {
        println!("Cancelled.");
        return Ok(());
    };
    let Some(options) = resolve_options(args.diarize, args.speakers, args.yes)? else {
        println!("Cancelled.");
        return Ok(());
    };

    // 2. Read the audio file
    let audio_bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    if audio_bytes.is_empty() {
        anyhow::bail!("Audio file is empty: {}", args.file.display());
    }
    tracing::info!("Read {} bytes from {}", audio_bytes.len(), args.file.display());

    // 3. Upload, submit, poll
    let client = TranscriptionClient::new(&config.transcription, api_key)?;
    let audio_url = client.upload(audio_bytes)?;
    tracing::info!("File uploaded, URL obtained");

    let job_id = client.submit(&audio_url, &options)?;
    tracing::info!("Transcription requested, ID: {}", job_id);
    println!("Transcribing (job {})...", job_id);

    let poller = JobPoller::from_config(&config.polling);
    let snapshot = poller.wait_for_completion(&client, &job_id)?;
    let transcript = snapshot.formatted_text();

    // 4. Decide what to do with the result
    let step = if args.preset.is_some() {
        NextStep::Summarize
    } else {
        match resolve_next_step(args.to, args.output.clone(), args.yes)? {
            Some(step) => step,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        }
    };

    match step {
        NextStep::Deliver(destination) => {
            deliver::deliver(&transcript, None, &destination, &config.delivery)
        }
        NextStep::Summarize => {
            summarize_and_deliver(
                config,
                &mut store,
                &transcript,
                args.preset.as_deref(),
                args.to,
                args.output,
                args.yes,
            )
        }
    }
}

/// Summarize a transcript and deliver the processed text, pairing it with the
/// original for note delivery.
fn summarize_and_deliver(
    config: &Config,
    store: &mut KeyStore,
    transcript: &str,
    preset_name: Option<&str>,
    to: Option<DestinationArg>,
    output: Option<PathBuf>,
    yes: bool,
) -> Result<()> {
    let Some(api_key) = resolve_key(store, Service::Gemini, !yes)? else {
        println!("Cancelled.");
        return Ok(());
    };
    let Some(preset) = resolve_preset(preset_name, yes)? else {
        println!("Cancelled.");
        return Ok(());
    };

    let gemini = GeminiClient::new(&config.summarization, api_key)?;
    let summary = gemini.summarize(transcript, preset)?;
    tracing::info!("Received {} chars of processed text", summary.len());

    let destination = match to {
        Some(arg) => destination_from_arg(arg, output)?,
        None if yes => Destination::Stdout,
        None => {
            let choice = ui::prompt_choice(
                "What would you like to do with the processed text?",
                &["Copy to clipboard", "Save to note", "Print to stdout"],
            );
            match choice {
                Some(0) => Destination::Clipboard,
                Some(1) => Destination::Note,
                Some(2) => Destination::Stdout,
                _ => {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
        }
    };

    deliver::deliver(&summary, Some(transcript), &destination, &config.delivery)
}

/// Single status check of a previously submitted job.
pub fn run_check(config: &Config, job_id: &str) -> Result<()> {
    let mut store = KeyStore::open()?;
    let Some(api_key) = resolve_key(&mut store, Service::Assemblyai, true)? else {
        println!("Cancelled.");
        return Ok(());
    };

    let client = TranscriptionClient::new(&config.transcription, api_key)?;
    let snapshot = client.check_status(job_id)?;

    println!("Job {}: {}", snapshot.id, snapshot.status);
    if let Some(error) = &snapshot.error {
        println!("  error: {}", error);
    }
    let text = snapshot.formatted_text();
    if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}

/// List the preset catalog.
pub fn run_presets() -> Result<()> {
    println!("Available presets:");
    for preset in PRESETS {
        println!(
            "  {:<18} {} (temperature {})",
            preset.name, preset.description, preset.temperature
        );
    }
    Ok(())
}

/// Store an API key, reading the secret from stdin.
pub fn run_set_key(service: Service) -> Result<()> {
    let secret = match ui::prompt_input(&format!("Enter {} API key", service.name())) {
        Some(s) if !s.is_empty() => s,
        _ => {
            println!("No key entered.");
            return Ok(());
        }
    };

    let mut store = KeyStore::open()?;
    store.set(service, secret)?;
    println!("API key for {} saved.", service.name());
    Ok(())
}

/// Summarize an existing transcript file.
pub fn run_summarize(
    config: &Config,
    file: &Path,
    preset_name: Option<&str>,
    to: Option<DestinationArg>,
    output: Option<PathBuf>,
    yes: bool,
) -> Result<()> {
    let transcript = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    if transcript.trim().is_empty() {
        anyhow::bail!("Transcript file is empty: {}", file.display());
    }

    let mut store = KeyStore::open()?;
    summarize_and_deliver(config, &mut store, &transcript, preset_name, to, output, yes)
}

// ---------------------------------------------------------------------------
// Resolution helpers: flags first, prompts second, `None` means cancelled
// ---------------------------------------------------------------------------

fn resolve_key(
    store: &mut KeyStore,
    service: Service,
    interactive: bool,
) -> Result<Option<String>> {
    if let Some(key) = store.get(service) {
        return Ok(Some(key));
    }
    if !interactive {
        return Err(Error::CredentialMissing(service.name()).into());
    }

    match ui::prompt_input(&format!("Enter {} API key", service.name())) {
        Some(key) if !key.is_empty() => {
            store.set(service, key.clone())?;
            tracing::info!("API key for {} saved", service.name());
            Ok(Some(key))
        }
        _ => Ok(None),
    }
}

fn resolve_options(
    diarize: bool,
    speakers: Option<u32>,
    yes: bool,
) -> Result<Option<TranscriptionOptions>> {
    if let Some(count) = speakers {
        return Ok(Some(TranscriptionOptions::new(true, Some(count))?));
    }

    let diarize = if diarize {
        true
    } else if yes {
        false
    } else {
        ui::prompt_yn("Identify different speakers in the audio?", false)
    };

    if !diarize {
        return Ok(Some(TranscriptionOptions::plain()));
    }
    if yes {
        return Ok(Some(TranscriptionOptions::new(true, None)?));
    }

    let Some(input) = ui::prompt_input("How many speakers? (1-10, default 2)") else {
        return Ok(None);
    };
    let count = if input.is_empty() {
        2
    } else {
        // Unparsable input falls out of range and is rejected by validation
        input.parse::<u32>().unwrap_or(0)
    };
    Ok(Some(TranscriptionOptions::new(true, Some(count))?))
}

fn resolve_next_step(
    to: Option<DestinationArg>,
    output: Option<PathBuf>,
    yes: bool,
) -> Result<Option<NextStep>> {
    if let Some(arg) = to {
        return Ok(Some(NextStep::Deliver(destination_from_arg(arg, output)?)));
    }
    if yes {
        return Ok(Some(NextStep::Deliver(Destination::Stdout)));
    }

    let choice = ui::prompt_choice(
        "Transcription complete. What would you like to do with it?",
        &[
            "Process with Gemini AI",
            "Copy to clipboard",
            "Save to note",
            "Print to stdout",
        ],
    );
    Ok(match choice {
        Some(0) => Some(NextStep::Summarize),
        Some(1) => Some(NextStep::Deliver(Destination::Clipboard)),
        Some(2) => Some(NextStep::Deliver(Destination::Note)),
        Some(3) => Some(NextStep::Deliver(Destination::Stdout)),
        _ => None,
    })
}

fn destination_from_arg(arg: DestinationArg, output: Option<PathBuf>) -> Result<Destination> {
    Ok(match arg {
        DestinationArg::Clipboard => Destination::Clipboard,
        DestinationArg::Note => Destination::Note,
        DestinationArg::Stdout => Destination::Stdout,
        DestinationArg::File => {
            let path = output
                .ok_or_else(|| anyhow::anyhow!("--output is required with --to file"))?;
            Destination::File(path)
        }
    })
}

fn resolve_preset(name: Option<&str>, yes: bool) -> Result<Option<&'static Preset>> {
    if let Some(name) = name {
        return Ok(Some(preset::find(name)?));
    }
    if yes {
        // Non-interactive default: the plain summary preset
        return Ok(Some(&PRESETS[0]));
    }

    let labels: Vec<String> = PRESETS
        .iter()
        .map(|p| format!("{}: {}", p.name, p.description))
        .collect();
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();

    match ui::prompt_choice("Choose how to process the transcript:", &labels) {
        Some(index) => Ok(Some(&PRESETS[index])),
        None => Ok(None),
    }
}
