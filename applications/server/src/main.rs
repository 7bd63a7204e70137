/// Sociaty Server - campus marketplace backend
use clap::{Parser, Subcommand};
use sociaty_core::{MarketStore, NewUser, StudentId};
use sociaty_server::{
    config::ServerConfig,
    create_router,
    services::{PasswordService, UploadStore},
    state::AppState,
};
use sociaty_storage::JsonStore;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sociaty-server")]
#[command(about = "Sociaty campus marketplace server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Listening port, overrides the configured one
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    /// Register a user directly in the data file
    AddUser {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Student ID
        #[arg(short, long)]
        student_id: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sociaty_server=info,sociaty_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await?;
        }
        Commands::AddUser {
            name,
            student_id,
            password,
        } => {
            add_user(&config, name, student_id, &password).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Sociaty Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize data file
    let store = Arc::new(JsonStore::open(&config.storage.database_path).await?);
    tracing::info!("Data file ready at {}", store.path().display());

    // Initialize upload storage
    let uploads = UploadStore::new(config.storage.upload_dir.clone(), config.uploads.max_files);
    uploads.initialize().await?;
    let uploads = Arc::new(uploads);
    tracing::info!("Upload directory: {}", uploads.base_path().display());

    let passwords = Arc::new(PasswordService::new(
        config.auth.password_storage,
        config.auth.bcrypt_cost,
    ));
    tracing::info!("Password storage: {:?}", config.auth.password_storage);

    let app_state = AppState::new(store, passwords, uploads);
    let app = create_router(app_state, &config);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: &ServerConfig,
    name: String,
    student_id: String,
    password: &str,
) -> anyhow::Result<()> {
    config.validate()?;
    let store = JsonStore::open(&config.storage.database_path).await?;
    let passwords = PasswordService::new(config.auth.password_storage, config.auth.bcrypt_cost);

    let user = store
        .create_user(NewUser {
            name,
            student_id: StudentId::new(student_id),
            password: passwords.hash_password(password)?,
        })
        .await?;

    println!("Created user {} ({})", user.student_id, user.name);

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let store = JsonStore::open(&config.storage.database_path).await?;
    let users = store.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.student_id, user.name);
    }

    Ok(())
}
