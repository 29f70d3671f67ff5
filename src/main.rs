//! Account service entry point.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use account_service::adapters::auth::{
    Argon2CredentialVerifier, GoogleOAuthProvider, JwtTokenIssuer,
};
use account_service::adapters::http::{app_router, with_http_layers, AppState, BillingSettings};
use account_service::adapters::memory::InMemoryUserRepository;
use account_service::adapters::postgres::{PostgresUserRepository, MIGRATOR};
use account_service::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use account_service::config::{AppConfig, DatabaseConfig};
use account_service::domain::billing::StripeWebhookVerifier;
use account_service::domain::kyc::PayloadDigestVerifier;
use account_service::ports::UserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("invalid configuration")?;

    info!(
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        "starting account service"
    );

    let users = user_repository(config.database.as_ref()).await?;

    let mut tokens = JwtTokenIssuer::new(config.auth.jwt_secret.clone());
    if let Some(ttl) = config.auth.token_ttl() {
        tokens = tokens.with_ttl(ttl);
    }

    let payments = StripePaymentAdapter::new(StripeConfig::new(
        config.payment.stripe_api_key.clone(),
    ));

    let billing = BillingSettings {
        catalog: config.payment.catalog()?,
        micro_payment_amount: config.payment.micro_payment_amount,
        currency: config.payment.currency.clone(),
    };

    let mut state = AppState::new(
        users,
        Arc::new(Argon2CredentialVerifier::new()),
        Arc::new(tokens),
        Arc::new(payments),
        config.auth.frontend_url.clone(),
    )
    .with_billing(billing);

    match &config.auth.google {
        Some(google) => {
            let provider = GoogleOAuthProvider::new(
                google.client_id.clone(),
                google.client_secret.clone(),
                google.callback_url.clone(),
            )
            .context("failed to configure Google login")?;
            state = state.with_identity_provider(Arc::new(provider));
            info!("google login enabled");
        }
        None => info!("google login disabled"),
    }

    match &config.payment.stripe_webhook_secret {
        Some(secret) => state = state.with_stripe_verifier(StripeWebhookVerifier::new(secret.clone())),
        None => warn!("stripe webhook signatures are not verified"),
    }
    match &config.kyc.webhook_secret {
        Some(secret) => state = state.with_kyc_verifier(PayloadDigestVerifier::new(secret.clone())),
        None => warn!("kyc webhook digests are not verified"),
    }

    let app = with_http_layers(
        app_router(state),
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("account service shut down");
    Ok(())
}

/// JSON logs in production, human-readable output elsewhere.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

async fn user_repository(
    database: Option<&DatabaseConfig>,
) -> anyhow::Result<Arc<dyn UserRepository>> {
    let Some(database) = database else {
        warn!("no database configured, users are kept in memory");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(&database.url)
        .await
        .with_context(|| format!("failed to connect to database {}", database.redacted_url()))?;

    if database.run_migrations {
        MIGRATOR
            .run(&pool)
            .await
            .context("database migrations failed")?;
        info!("database migrations applied");
    }

    Ok(Arc::new(PostgresUserRepository::new(pool)))
}

async fn shutdown_signal() {
    if let Err(error) = signal::ctrl_c().await {
        error!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
