//! One-shot translation of stdin.
//!
//! Usage: `verso [html|text] [target_lang]`. Output is sanitized HTML on stdout.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use verso::{
    config::Config,
    languages,
    pipeline::Pipeline,
    sanitizer::SanitizationPolicy,
    translator::{GeminiClient, TranslationSettings, Translator},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Keep the structure of an HTML fragment
    Html,
    /// Translate a passage and render the answer as Markdown
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "verso", version, about = "Translate HTML or plain text read from stdin")]
struct Cli {
    /// How stdin is interpreted
    #[arg(value_enum, default_value_t = Mode::Html)]
    mode: Mode,

    /// Target language code (defaults to TARGET_LANG)
    target_lang: Option<String>,

    /// Source language code, or `auto` (defaults to SOURCE_LANG)
    #[arg(short, long)]
    source: Option<String>,

    /// Model id (defaults to GEMINI_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Exchange source and target before translating
    #[arg(long)]
    swap: bool,
}

impl Cli {
    fn settings(&self, defaults: &TranslationSettings) -> Result<TranslationSettings> {
        let source = self
            .source
            .clone()
            .unwrap_or_else(|| defaults.source_lang.clone());
        let target = self
            .target_lang
            .clone()
            .unwrap_or_else(|| defaults.target_lang.clone());
        let (source, target) = if self.swap {
            languages::swap_languages(&source, &target)
        } else {
            (source, target)
        };

        if !languages::is_known_language(&source) {
            bail!("unsupported source language '{source}'");
        }
        if !languages::is_valid_target(&target) {
            bail!("unsupported target language '{target}'");
        }
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| defaults.model_id.clone());
        Ok(TranslationSettings::new(source, target, model))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let settings = cli.settings(config.defaults())?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    if input.trim().is_empty() {
        bail!("no input on stdin");
    }

    info!(
        mode = ?cli.mode,
        source = languages::language_name(&settings.source_lang),
        target = languages::language_name(&settings.target_lang),
        model = %settings.model_id,
        "Translating stdin"
    );

    let client = GeminiClient::new(config.endpoint().clone());
    let translator = Translator::new(Arc::new(client), config.credential().cloned());
    let pipeline = Pipeline::new(translator, Arc::new(SanitizationPolicy::standard()));

    let outcome = match cli.mode {
        Mode::Html => pipeline.translate_html(&input, &settings).await?,
        Mode::Text => pipeline.translate_text(input.trim(), &settings).await?,
    };
    println!("{}", outcome.html);
    Ok(())
}
