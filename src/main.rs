use iposim::{api, Config, IpoDesk, StaticCatalog, SystemClock};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let clock = Arc::new(SystemClock::from_offset_minutes(
        config.market_utc_offset_minutes,
    ));
    let catalog = Arc::new(StaticCatalog::builtin());
    let desk = Arc::new(IpoDesk::new(catalog, clock, &config));

    let app = api::create_router(api::AppState::new(desk));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        seeded = config.rng_seed.is_some(),
        utc_offset_minutes = config.market_utc_offset_minutes,
        "Server listening on {}",
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}
