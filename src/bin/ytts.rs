//! ytts: synthesize a phrase with SpeechKit and save it as Ogg.
//!
//! Credentials come from `YANDEX_TOKEN` and `YANDEX_FOLDER_ID`.
//!
//! Usage:
//!   ytts [--text <text>] [--lang ru-RU] [--voice omazh] [--emotion neutral]
//!        [--speed <0.1..3.0>] [--out <file>] [--timeout <secs>]

use anyhow::{Context, Result};
use clap::Parser;
use speechkit::{ClientBuilder, Speed, SynthesisOptions};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Synthesize speech with Yandex SpeechKit")]
struct Cli {
    /// Text to synthesize
    #[arg(long, default_value = "Привет, мир!")]
    text: String,
    #[arg(long, default_value = "ru-RU")]
    lang: String,
    #[arg(long, default_value = "omazh")]
    voice: String,
    #[arg(long, default_value = "neutral")]
    emotion: String,
    /// Speech rate, 0.1..=3.0; negative leaves the service default
    #[arg(long, allow_negative_numbers = true)]
    speed: Option<f64>,
    /// Output file (derived from voice, emotion and text when not set)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Deadline for the whole call, including the download
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

impl Cli {
    fn options(&self) -> Result<SynthesisOptions> {
        let mut options = SynthesisOptions::new(self.text.as_str())
            .with_language(self.lang.as_str())
            .with_voice(self.voice.as_str())
            .with_emotion(self.emotion.as_str());
        if let Some(speed) = self.speed.filter(|s| *s >= 0.0) {
            options = options.with_speed(Speed::new(speed)?);
        }
        Ok(options)
    }

    fn output_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_file_name(&self.voice, &self.emotion, &self.text)))
    }
}

/// `<voice>-<emotion>-<first 4 bytes of md5(text) in hex>.ogg`
fn default_file_name(voice: &str, emotion: &str, text: &str) -> String {
    let digest = md5::compute(text.as_bytes());
    let short: String = digest[..4].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}-{}-{}.ogg", voice, emotion, short)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    let options = cli.options()?;
    let out = cli.output_path();

    let client = ClientBuilder::from_env()?.build()?;

    let cancel = CancellationToken::new();
    let deadline = tokio::spawn({
        let cancel = cancel.clone();
        let timeout = Duration::from_secs(cli.timeout);
        async move {
            tokio::time::sleep(timeout).await;
            cancel.cancel();
        }
    });

    let audio = client
        .synthesize(&cancel, &options)
        .await
        .context("synthesis failed")?;

    let mut file = tokio::fs::File::create(&out)
        .await
        .with_context(|| format!("failed to create {}", out.display()))?;
    let written = audio
        .copy_to(&mut file)
        .await
        .with_context(|| format!("failed to write {}", out.display()))?;
    file.flush().await?;
    deadline.abort();

    info!(bytes = written, path = %out.display(), "audio saved");
    println!("Saved to {}", out.display());
    Ok(())
}
