use clap::Parser;

use memoscribe::cli::{Cli, Commands};
use memoscribe::config::Config;
use memoscribe::run;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("memoscribe=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Transcribe {
            file,
            diarize,
            speakers,
            to,
            preset,
            output,
            yes,
        } => run::run_transcribe(
            &config,
            run::TranscribeArgs {
                file,
                diarize,
                speakers,
                to,
                preset,
                output,
                yes,
            },
        ),
        Commands::Check { job_id } => run::run_check(&config, &job_id),
        Commands::Presets => run::run_presets(),
        Commands::SetKey { service } => run::run_set_key(service),
        Commands::Summarize {
            file,
            preset,
            to,
            output,
            yes,
        } => run::run_summarize(&config, &file, preset.as_deref(), to, output, yes),
    }
}
