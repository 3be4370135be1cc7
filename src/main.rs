use anyhow::Result;
use tracing::{info, warn};

use translator_relay::config::Settings;
use translator_relay::routes;
use translator_relay::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; variables may come from the real environment.
    let dotenv = dotenvy::dotenv();
    translator_relay::init_tracing();
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let settings = Settings::load()?;
    match settings.provider() {
        Some(provider) => info!("Translation provider: {}", provider),
        None => warn!("No provider configured. Set OPENAI_API_KEY or ANTHROPIC_API_KEY."),
    }

    let listener = routes::bind(&settings.host, settings.port).await?;
    let app_state = AppState::new(settings)?;
    let app = routes::app(app_state);

    info!("Translation server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
