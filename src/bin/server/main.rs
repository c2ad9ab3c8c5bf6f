use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tokio::{net::TcpListener, sync::broadcast::error::RecvError};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tractor_catalog::{
    adapters::inbound::http::router::create_router,
    app::{AppBuilder, AppConfig, AuthBackend, RepositoryBackend, StorageBackend},
    domain::models::SessionEvent,
    services::AuthGateway,
};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "tractor-catalog-server")]
#[command(about = "Tractor dealership catalog and admin panel", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Image storage backend: memory, local or s3
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// Directory for the local storage backend
    #[arg(long, env = "STORAGE_ROOT", default_value = "./data/images")]
    storage_root: String,

    /// S3 endpoint URL, for S3-compatible services
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 bucket name
    #[arg(long, env = "S3_BUCKET")]
    s3_bucket: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Repository backend: memory or database
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// Database URL for repository backend (PostgreSQL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Identity provider: memory or gotrue
    #[arg(long, env = "AUTH_BACKEND", default_value = "memory")]
    auth_backend: String,

    /// Admin account for the memory identity provider
    #[arg(long, env = "ADMIN_EMAIL", default_value = "admin@localhost")]
    admin_email: String,

    /// Admin password for the memory identity provider. Random if unset
    #[arg(long, env = "ADMIN_PASSWORD")]
    admin_password: Option<String>,

    /// GoTrue-compatible auth endpoint
    #[arg(long, env = "GOTRUE_URL")]
    gotrue_url: Option<String>,

    /// API key sent to the auth endpoint
    #[arg(long, env = "GOTRUE_API_KEY")]
    gotrue_api_key: Option<String>,

    /// Prefix for public image URLs
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = "/images")]
    public_base_url: String,

    /// WhatsApp contact number stored on every listing
    #[arg(long, env = "CONTACT_PHONE", default_value = "553597400527")]
    contact_phone: String,

    /// Largest accepted image upload in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value = "10485760")]
    max_upload_bytes: usize,

    /// Log level or filter directive
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "local" => StorageBackend::Local {
                root: self.storage_root.clone(),
            },
            "s3" => {
                let bucket = self
                    .s3_bucket
                    .clone()
                    .context("S3_BUCKET is required for S3 backend")?;

                StorageBackend::S3 {
                    bucket,
                    region: self.s3_region.clone(),
                    endpoint: self.s3_endpoint.clone(),
                    access_key: self.s3_access_key.clone(),
                    secret_key: self.s3_secret_key.clone(),
                }
            }
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => {
                let connection_string = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for database backend")?;
                RepositoryBackend::Database { connection_string }
            }
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        let auth_backend = match self.auth_backend.as_str() {
            "memory" => AuthBackend::InMemory {
                admin_email: self.admin_email.clone(),
                admin_password: self.admin_password.clone().unwrap_or_else(|| {
                    let password = Uuid::new_v4().simple().to_string();
                    warn!(
                        email = %self.admin_email,
                        password = %password,
                        "ADMIN_PASSWORD not set, generated a one-off password"
                    );
                    password
                }),
            },
            "gotrue" => AuthBackend::GoTrue {
                url: self
                    .gotrue_url
                    .clone()
                    .context("GOTRUE_URL is required for gotrue backend")?,
                api_key: self
                    .gotrue_api_key
                    .clone()
                    .context("GOTRUE_API_KEY is required for gotrue backend")?,
            },
            _ => anyhow::bail!("Unknown auth backend: {}", self.auth_backend),
        };

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            auth_backend,
            public_base_url: self.public_base_url.clone(),
            contact_phone: self.contact_phone.clone(),
            max_upload_bytes: self.max_upload_bytes,
        })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("Invalid log level: {}", self.log_level))?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to install tracing subscriber")?;

        Ok(())
    }
}

/// Log every sign-in and sign-out for the lifetime of the server
fn spawn_session_logger(auth: &AuthGateway) {
    let mut events = auth.subscribe();

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::SignedIn { email }) => info!(email = %email, "Session started"),
                Ok(SessionEvent::SignedOut) => info!("Session ended"),
                Err(RecvError::Lagged(missed)) => warn!(missed, "Session event log lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting tractor catalog server");
    info!("Storage backend: {}", cli.storage_backend);
    info!("Repository backend: {}", cli.repository_backend);
    info!("Auth backend: {}", cli.auth_backend);

    let config = cli.to_app_config()?;

    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    spawn_session_logger(&app_services.auth_gateway);

    let router = create_router(app_services.into_state());

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
