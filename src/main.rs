use clap::Parser;
use playfinder::app::render::{render_report, render_stories, OutputFormat};
use playfinder::config::{Command, KeyAction};
use playfinder::core::chatbot::{ChatSession, WELCOME_MESSAGE};
use playfinder::domain::catalog::bedtime_stories;
use playfinder::utils::error::ErrorSeverity;
use playfinder::utils::{logger, validation::Validate};
use playfinder::{
    AiStatus, AppConfig, Catalog, CliConfig, FileKeyStore, FinderEngine, GeminiRecommender,
    KeyStore, PlayError, Query,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("Starting playfinder CLI");

    // 載入並驗證配置
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli, config).await {
        tracing::error!(
            "❌ playfinder failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 依錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: CliConfig, config: AppConfig) -> playfinder::Result<()> {
    let key_path = match cli.key_file.clone() {
        Some(path) => path,
        None => config.key_file_path()?,
    };
    let key_store = FileKeyStore::new(key_path);

    match cli.command {
        Command::Find(args) => {
            let query = args.to_query(&config.search)?;
            search(&config, &key_store, cli.api_key, query, args.ai, args.format).await
        }
        Command::Featured { ai, format } => {
            let query = config.search.featured_query();
            search(&config, &key_store, cli.api_key, query, ai, format).await
        }
        Command::Key { action } => manage_key(&key_store, action),
        Command::Chat { message } => chat(message).await,
        Command::Stories { format } => {
            println!("{}", render_stories(&bedtime_stories(), format)?);
            Ok(())
        }
    }
}

async fn search(
    config: &AppConfig,
    key_store: &FileKeyStore,
    api_key_override: Option<String>,
    query: Query,
    use_ai: bool,
    format: OutputFormat,
) -> playfinder::Result<()> {
    // 命令列/環境變數的金鑰優先於已儲存的金鑰
    let api_key = match api_key_override {
        Some(key) => Some(key),
        None if use_ai => key_store.get()?,
        None => None,
    };

    let recommender = GeminiRecommender::new(config.recommender.clone(), api_key);
    if use_ai && !recommender.has_credential() {
        tracing::warn!("⚠️ AI ranking requested but no API key is configured");
        eprintln!("💡 Please add your Gemini API key first: playfinder key set <KEY>");
    }

    let engine = FinderEngine::new(Catalog::builtin(), recommender);
    let report = engine.search(&query, use_ai).await;

    if let AiStatus::Fallback(reason) = &report.ai {
        eprintln!(
            "⚠️ Failed to get AI recommendations ({}), showing games in the usual order",
            reason
        );
    }

    println!("{}", render_report(&report, format)?);
    Ok(())
}

fn manage_key(key_store: &FileKeyStore, action: KeyAction) -> playfinder::Result<()> {
    match action {
        KeyAction::Set { value } => {
            if value.trim().is_empty() {
                return Err(PlayError::ValidationError {
                    message: "Please enter a valid API key".to_string(),
                });
            }
            key_store.set(value.trim())?;
            tracing::info!("🔑 API key saved to {}", key_store.path().display());
            println!("✅ Gemini API key saved!");
        }
        KeyAction::Show => match key_store.saved_at()? {
            Some(saved_at) => println!(
                "🔑 API key configured (saved {})",
                saved_at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => println!("No API key saved. Add one with: playfinder key set <KEY>"),
        },
        KeyAction::Clear => {
            key_store.clear()?;
            println!("✅ Gemini API key removed");
        }
    }
    Ok(())
}

async fn chat(message: Option<String>) -> playfinder::Result<()> {
    let mut session = ChatSession::new();

    if let Some(message) = message {
        if let Some(reply) = session.send(&message) {
            println!("{}", reply);
        }
        return Ok(());
    }

    println!("Pi: {}", WELCOME_MESSAGE);
    println!("(type 'exit' to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if let Some(reply) = session.send(line) {
            println!("Pi: {}", reply);
        }
    }

    tracing::debug!("Chat ended after {} messages", session.messages().len());
    Ok(())
}
