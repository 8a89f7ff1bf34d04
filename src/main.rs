use clap::{Parser, Subcommand};
use intel_platform::domain::DEFAULT_ROLE;
use intel_platform::import::{load_all_csv, migrate_legacy_users};
use intel_platform::{
    config::Config, db::init_db, Assistant, AuthService, OllamaAssistant, Repository, Session,
};
use serde::Serialize;
use std::sync::Arc;

const PREVIEW_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "intel-platform")]
#[command(about = "Cyber incident, dataset and IT ticket store")]
#[command(version)]
struct Args {
    /// Defaults to `setup` when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create tables, run one-time imports and print a preview of each table
    Setup,

    /// Register a user with the configured password scheme
    Register {
        username: String,
        password: String,
        #[arg(long, default_value = DEFAULT_ROLE)]
        role: String,
    },

    /// Check credentials and print the authenticated user
    Login { username: String, password: String },

    /// Send a prompt to the configured language model endpoint
    Ask { prompt: String },
}

fn print_section<T: Serialize>(title: &str, rows: &[T]) {
    let preview = &rows[..rows.len().min(PREVIEW_ROWS)];
    match serde_json::to_string_pretty(preview) {
        Ok(json) => println!("\n--- {} ({} total) ---\n{}", title, rows.len(), json),
        Err(e) => eprintln!("Failed to render {}: {}", title, e),
    }
}

async fn open_repository(config: &Config) -> Arc<Repository> {
    match init_db(&config.database_path).await {
        Ok(db) => Arc::new(Repository::new(db)),
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    }
}

async fn cmd_setup(config: &Config) {
    let repo = open_repository(config).await;

    // One-time imports
    match migrate_legacy_users(&repo, &config.legacy_users_file).await {
        Ok(report) => tracing::info!(?report, "Legacy user migration finished"),
        Err(e) => {
            eprintln!("Legacy user migration failed: {}", e);
            std::process::exit(1);
        }
    }

    // CSV rows carry their own ids, so only load into empty tables
    let already_loaded = async {
        Ok::<bool, sqlx::Error>(
            !repo.get_all_incidents().await?.is_empty()
                || !repo.get_all_datasets().await?.is_empty()
                || !repo.get_all_tickets().await?.is_empty(),
        )
    };
    match already_loaded.await {
        Ok(true) => tracing::info!("Tables already populated, skipping CSV load"),
        Ok(false) => match load_all_csv(&repo, &config.csv_dir).await {
            Ok(report) => tracing::info!(?report, "CSV load finished"),
            Err(e) => {
                eprintln!("CSV load failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Failed to read tables: {}", e);
            std::process::exit(1);
        }
    }

    // Read back
    let summary = async {
        print_section("Users", &repo.get_all_users().await?);
        print_section("Incidents", &repo.get_all_incidents().await?);
        print_section("Datasets", &repo.get_all_datasets().await?);
        print_section("Tickets", &repo.get_all_tickets().await?);
        Ok::<(), sqlx::Error>(())
    };
    if let Err(e) = summary.await {
        eprintln!("Failed to read tables: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_register(config: &Config, username: &str, password: &str, role: &str) {
    let auth = AuthService::new(open_repository(config).await, config.password_scheme);
    match auth.register_with_role(username, password, role).await {
        Ok(true) => println!("Registered {}", username),
        Ok(false) => {
            eprintln!("Username {} already exists", username);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Registration failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn cmd_login(config: &Config, username: &str, password: &str) {
    let auth = AuthService::new(open_repository(config).await, config.password_scheme);
    let mut session = Session::new();
    match session.login(&auth, username, password).await {
        Ok(true) => {
            if let Some(user) = session.current_user() {
                print_section("Authenticated user", std::slice::from_ref(user));
            }
        }
        Ok(false) => {
            eprintln!("Invalid username or password");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Login failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn cmd_ask(config: &Config, prompt: &str) {
    let assistant = OllamaAssistant::new(config.llm_api_url.clone(), config.llm_model.clone());
    match assistant.ask(prompt).await {
        Ok(reply) => println!("{}", reply),
        Err(e) => {
            eprintln!("Assistant request failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    match args.command.unwrap_or(Command::Setup) {
        Command::Setup => cmd_setup(&config).await,
        Command::Register {
            username,
            password,
            role,
        } => cmd_register(&config, &username, &password, &role).await,
        Command::Login { username, password } => cmd_login(&config, &username, &password).await,
        Command::Ask { prompt } => cmd_ask(&config, &prompt).await,
    }
}
