//! Marea server bootstrap.

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use marea::adapters::events::TracingEventPublisher;
use marea::adapters::http::reservations::{api_router, ReservationsAppState};
use marea::adapters::postgres::{
    connect, PostgresProductCatalog, PostgresReservationRepository, PostgresSlotLedger,
};
use marea::application::handlers::scheduling::{
    GenerateTimeSlotsCommand, GenerateTimeSlotsHandler,
};
use marea::config::AppConfig;
use marea::domain::foundation::Timestamp;
use marea::domain::scheduling::SlotWindow;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = connect(&config.database).await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let state = ReservationsAppState {
        catalog: Arc::new(PostgresProductCatalog::new(pool.clone())),
        ledger: Arc::new(PostgresSlotLedger::new(pool.clone())),
        repository: Arc::new(PostgresReservationRepository::new(pool.clone())),
        event_publisher: Arc::new(TracingEventPublisher::new()),
    };

    // Top up the rolling slot window; existing slots are left untouched.
    let seeder = GenerateTimeSlotsHandler::new(state.ledger.clone());
    let today = Timestamp::now().as_datetime().date_naive();
    let inserted = seeder
        .handle(GenerateTimeSlotsCommand {
            window: SlotWindow::default(),
            from: today,
        })
        .await?;
    tracing::info!(inserted, "slot window topped up");

    let app = api_router()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state);

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(env_filter)
        .init();
}
