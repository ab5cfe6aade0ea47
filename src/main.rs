use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use leaflet_channels::CliChannel;
use leaflet_core::config::{Config, ProviderKind};
use leaflet_core::{AnswerBuilder, AnswerRewriter, Channel, ChatSession, format_sources};
use leaflet_index::{
    BrochureIndexer, ChunkStore, RetrievalConfig, Retriever, SplitterConfig, scan_brochures,
};
use leaflet_llm::{AnyProvider, LlmProvider, OllamaProvider};

#[cfg(feature = "candle")]
use leaflet_llm::CandleProvider;

#[derive(Parser)]
#[command(name = "leaflet", version, about = "Brochure QA chatbot with cited answers")]
struct Cli {
    /// Config file (also `LEAFLET_CONFIG`; default config/default.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat on stdin/stdout (the default)
    Chat,
    /// Build the vector store from the brochures directory
    Index,
    /// One-shot question: retrieve, answer, print citations
    Ask {
        /// Question text; remaining arguments are joined with spaces
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// List the brochure files an index run would pick up
    Documents,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config);
    let config = Config::load(&config_path)?;
    config.validate()?;

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => run_chat(&config).await,
        Command::Index => run_index(&config).await,
        Command::Ask { question } => run_ask(&config, &question.join(" ")).await,
        Command::Documents => run_documents(&config),
    }
}

async fn run_chat(config: &Config) -> anyhow::Result<()> {
    let provider = Arc::new(create_provider(config)?);
    health_check(&provider).await;

    let store = load_store(config)?;
    println!("leaflet v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "{} chunk(s) from {} brochure(s) loaded. Ask a question, `/sources` for citations, `exit` to quit.",
        store.len(),
        store.file_count()
    );

    let mut session = build_session(config, provider, store, CliChannel::new());
    session.run().await?;
    Ok(())
}

async fn run_index(config: &Config) -> anyhow::Result<()> {
    let provider = Arc::new(create_provider(config)?);
    health_check(&provider).await;

    let brochures_dir = Path::new(&config.documents.brochures_dir);
    let indexer = BrochureIndexer::new(
        provider,
        SplitterConfig {
            chunk_size: config.index.chunk_size,
            chunk_overlap: config.index.chunk_overlap,
        },
        config.documents.max_file_size,
    );
    let (store, report) = indexer.index_dir(brochures_dir).await?;

    let store_dir = Path::new(&config.index.store_dir);
    store.save(store_dir)?;

    println!(
        "Indexed {}/{} file(s): {} chunk(s) embedded, {} skipped in {} ms.",
        report.files_indexed,
        report.files_scanned,
        report.chunks_embedded,
        report.chunks_skipped,
        report.duration_ms
    );
    for error in &report.errors {
        println!("  failed: {error}");
    }
    println!("Store written to {}.", store_dir.display());
    Ok(())
}

async fn run_ask(config: &Config, question: &str) -> anyhow::Result<()> {
    if question.trim().is_empty() {
        bail!("question is empty");
    }

    let provider = Arc::new(create_provider(config)?);
    let store = load_store(config)?;
    let session = build_session(config, provider, store, CliChannel::new());

    let turn = session.answer(question).await?;
    println!("{}", turn.answer);
    println!();
    println!("{}", format_sources(&turn.sources));
    Ok(())
}

fn run_documents(config: &Config) -> anyhow::Result<()> {
    let dir = Path::new(&config.documents.brochures_dir);
    let files = scan_brochures(dir)?;
    if files.is_empty() {
        println!("No brochure files found in {}.", dir.display());
        return Ok(());
    }
    for path in &files {
        println!("{}", path.display());
    }
    println!("{} file(s).", files.len());
    Ok(())
}

fn load_store(config: &Config) -> anyhow::Result<ChunkStore> {
    let store_dir = Path::new(&config.index.store_dir);
    ChunkStore::load(store_dir).context("cannot load the vector store; run `leaflet index` first")
}

fn build_session<C: Channel>(
    config: &Config,
    provider: Arc<AnyProvider>,
    store: ChunkStore,
    channel: C,
) -> ChatSession<AnyProvider, C> {
    let retriever = Retriever::new(
        store,
        provider.clone(),
        RetrievalConfig {
            top_k: config.retrieval.top_k,
            score_threshold: config.retrieval.score_threshold,
        },
    );
    let builder = AnswerBuilder::new(config.answer.max_chunk_chars, config.answer.max_sentences);
    let session = ChatSession::new(retriever, builder, channel);

    if !config.rewrite.enabled {
        return session;
    }
    if provider.supports_chat() {
        session.with_rewriter(AnswerRewriter::new(provider))
    } else {
        tracing::warn!("rewrite enabled but the provider has no chat support, keeping extractive answers");
        session
    }
}

fn create_provider(config: &Config) -> anyhow::Result<AnyProvider> {
    match config.llm.provider {
        ProviderKind::Ollama => {
            let provider = OllamaProvider::new(
                &config.llm.base_url,
                config.llm.model.clone(),
                config.llm.embedding_model.clone(),
            );
            Ok(AnyProvider::Ollama(provider))
        }
        #[cfg(feature = "candle")]
        ProviderKind::Candle => {
            let repo = config.llm.candle.clone().unwrap_or_default().embedding_repo;
            Ok(AnyProvider::Candle(CandleProvider::new(&repo)?))
        }
        #[cfg(not(feature = "candle"))]
        ProviderKind::Candle => bail!("candle provider not available (feature not enabled)"),
    }
}

async fn health_check(provider: &AnyProvider) {
    match provider.health_check().await {
        Ok(()) => tracing::info!(provider = provider.name(), "health check passed"),
        Err(e) => tracing::warn!("health check failed: {e:#}"),
    }
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Priority: CLI --config > `LEAFLET_CONFIG` env > config/default.toml
fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(path) = std::env::var("LEAFLET_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn cli_defaults_to_chat() {
        let cli = Cli::try_parse_from(["leaflet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parses_index_subcommand() {
        let cli = Cli::try_parse_from(["leaflet", "index"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Index)));
    }

    #[test]
    fn cli_parses_ask_with_words() {
        let cli =
            Cli::try_parse_from(["leaflet", "ask", "what", "helps", "against", "pollen"]).unwrap();
        let Some(Command::Ask { question }) = cli.command else {
            panic!("expected ask subcommand");
        };
        assert_eq!(question.join(" "), "what helps against pollen");
    }

    #[test]
    fn cli_rejects_ask_without_question() {
        assert!(Cli::try_parse_from(["leaflet", "ask"]).is_err());
    }

    #[test]
    fn cli_parses_global_config_flag() {
        let cli =
            Cli::try_parse_from(["leaflet", "documents", "--config", "/tmp/leaflet.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/leaflet.toml")));
        assert!(matches!(cli.command, Some(Command::Documents)));
    }

    #[test]
    #[serial]
    fn config_path_prefers_flag() {
        unsafe { std::env::set_var("LEAFLET_CONFIG", "/env/config.toml") };
        let path = resolve_config_path(Some(PathBuf::from("/flag/config.toml")));
        unsafe { std::env::remove_var("LEAFLET_CONFIG") };
        assert_eq!(path, PathBuf::from("/flag/config.toml"));
    }

    #[test]
    #[serial]
    fn config_path_falls_back_to_env() {
        unsafe { std::env::set_var("LEAFLET_CONFIG", "/env/config.toml") };
        let path = resolve_config_path(None);
        unsafe { std::env::remove_var("LEAFLET_CONFIG") };
        assert_eq!(path, PathBuf::from("/env/config.toml"));
    }

    #[test]
    #[serial]
    fn config_path_default() {
        unsafe { std::env::remove_var("LEAFLET_CONFIG") };
        let path = resolve_config_path(None);
        assert_eq!(path, PathBuf::from("config/default.toml"));
    }

    #[test]
    fn default_config_file_parses_and_validates() {
        let config = Config::load(Path::new("config/default.toml")).unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn create_provider_ollama() {
        let config = Config::default();
        let provider = create_provider(&config).unwrap();
        assert!(matches!(provider, AnyProvider::Ollama(_)));
        assert_eq!(provider.name(), "ollama");
    }

    #[cfg(not(feature = "candle"))]
    #[test]
    fn create_provider_candle_without_feature_errors() {
        let mut config = Config::default();
        config.llm.provider = ProviderKind::Candle;
        let result = create_provider(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("candle"));
    }

    #[tokio::test]
    async fn health_check_ollama_unreachable() {
        let provider = AnyProvider::Ollama(OllamaProvider::new(
            "http://127.0.0.1:1",
            "test".into(),
            "embed".into(),
        ));
        health_check(&provider).await;
    }

    #[test]
    fn load_store_missing_mentions_index_command() {
        let mut config = Config::default();
        config.index.store_dir = "/nonexistent/vector_store".into();
        let err = load_store(&config).unwrap_err();
        assert!(format!("{err:#}").contains("leaflet index"));
    }
}
