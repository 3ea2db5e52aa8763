use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::credentials::Service;

#[derive(Parser, Debug)]
#[command(
    name = "memoscribe",
    version,
    about = "Transcribe voice memos via AssemblyAI, with Gemini summarization presets"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe an audio file and deliver the result
    Transcribe {
        /// Audio file to transcribe
        file: PathBuf,

        /// Identify different speakers in the audio
        #[arg(long)]
        diarize: bool,

        /// Expected number of speakers, 1-10 (implies --diarize)
        #[arg(long)]
        speakers: Option<u32>,

        /// Destination for the result (skips the interactive prompt)
        #[arg(long, value_enum)]
        to: Option<DestinationArg>,

        /// Summarize with this preset before delivery
        #[arg(long)]
        preset: Option<String>,

        /// Output path for --to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Non-interactive: take defaults instead of prompting
        #[arg(long)]
        yes: bool,
    },

    /// Check the status of a submitted transcription job once
    Check {
        /// Job ID returned at submission
        job_id: String,
    },

    /// List the summarization presets
    Presets,

    /// Store an API key in the keystore (secret read from stdin)
    SetKey {
        /// Which service the key belongs to
        #[arg(value_enum)]
        service: Service,
    },

    /// Summarize an existing transcript text file
    Summarize {
        /// Transcript file to summarize
        file: PathBuf,

        /// Preset to apply (prompted when omitted)
        #[arg(long)]
        preset: Option<String>,

        /// Destination for the result
        #[arg(long, value_enum)]
        to: Option<DestinationArg>,

        /// Output path for --to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Non-interactive: take defaults instead of prompting
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DestinationArg {
    Clipboard,
    Note,
    Stdout,
    File,
}
