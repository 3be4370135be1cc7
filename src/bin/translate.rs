use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use translator_relay::client::{BackendClient, LocalStorage, TranslatorSession};

const HELP: &str = "Type text to translate. Commands: :from <lang>  :to <lang>  :swap  :history  :clear  :quit";

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    translator_relay::init_tracing();

    let backend_url = std::env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:8787".to_string());
    let history_dir = std::env::var("HISTORY_DIR").unwrap_or_else(|_| ".".to_string());
    info!("Using backend {} (history in {})", backend_url, history_dir);

    let mut session = TranslatorSession::new(BackendClient::new(backend_url), LocalStorage::new(history_dir));
    match session.provider().await {
        Some(provider) => println!("Provider: {}", provider),
        None => println!("Provider: offline"),
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        let mut parts = line.splitn(2, ' ');
        match (parts.next(), parts.next().map(str::trim)) {
            (Some(":quit"), _) => break,
            (Some(":from"), Some(lang)) if !lang.is_empty() => {
                let target = session.target_lang().to_string();
                session.set_languages(lang, &target);
            }
            (Some(":to"), Some(lang)) if !lang.is_empty() => {
                let source = session.source_lang().to_string();
                session.set_languages(&source, lang);
            }
            (Some(":swap"), _) => session.swap_languages(),
            (Some(":history"), _) => {
                if session.history().is_empty() {
                    println!("No translations yet.");
                }
                for entry in session.history().entries() {
                    println!(
                        "{} -> {}  {}  =>  {}",
                        entry.source_lang, entry.target_lang, entry.source_text, entry.translated_text
                    );
                }
                continue;
            }
            (Some(":clear"), _) => {
                session.clear_history();
                println!("History cleared.");
                continue;
            }
            (Some(cmd), _) if cmd.starts_with(':') => {
                println!("{}", HELP);
                continue;
            }
            _ => session.input(line),
        }

        // Input and language changes both leave a debounced request pending.
        match session.next_outcome().await {
            Some(outcome) => println!("[{} -> {}] {}", session.source_lang(), session.target_lang(), outcome.display()),
            None if line.starts_with(':') => {
                println!("Languages: {} -> {}", session.source_lang(), session.target_lang())
            }
            None => {}
        }
    }

    Ok(())
}
