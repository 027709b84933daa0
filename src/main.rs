//! Clinic CMS - content API for a clinic website.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_cms::{
    auth::{hash_password, CredentialVerifier, SessionTokens},
    config::{CheckConfig, Cli, Command, HashPasswordConfig, ServeConfig},
    content::{Collection, Document},
    server::{create_router, AppState, RouterConfig},
    store::{ContentRepository, ContentStore, JsonFileRepository, PersistencePolicy},
    upload::UploadSink,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::HashPassword(config) => run_hash_password(config),
        Command::Check(config) => run_check(config).await,
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    print_banner();

    info!("Configuration:");
    info!("  Data file: {}", config.data_path.display());
    info!(
        "  Uploads: {} (served at {})",
        config.uploads_dir.display(),
        config.uploads_prefix
    );
    info!("  Max upload: {} KiB", config.max_upload_bytes / 1024);
    info!("  bcrypt cost: {}", config.bcrypt_cost);


    // Hash for the seeded admin account (used only if the document is new)
    let admin_hash = match hash_password(&config.admin_password, config.bcrypt_cost) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let credentials = match CredentialVerifier::new(config.bcrypt_cost) {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("Failed to prepare credential verifier: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Create the content store and seed it if needed
    let repository = JsonFileRepository::new(&config.data_path);
    let store = ContentStore::new(repository, Document::seeded(admin_hash))
        .with_policy(config.persistence_policy());

    match store.policy() {
        PersistencePolicy::Lenient => {
            info!("  Persistence: lenient (failed saves are logged, requests still succeed)")
        }
        PersistencePolicy::Strict => info!("  Persistence: strict (failed saves return 500)"),
    }

    match store.initialize().await {
        Ok(true) => {
            info!("  Seeded new content document");
            if config.admin_password == clinic_cms::content::defaults::DEFAULT_ADMIN_PASSWORD {
                warn!("  Admin password is the default - change it with --admin-password");
            }
        }
        Ok(false) => info!("  Using existing content document"),
        Err(e) => {
            error!("Failed to seed {}: {}", config.data_path.display(), e);
            if store.policy() == PersistencePolicy::Strict {
                return ExitCode::FAILURE;
            }
            warn!("  Continuing with in-memory defaults");
        }
    }

    let uploads = UploadSink::new(&config.uploads_dir, &config.uploads_prefix)
        .with_max_bytes(config.max_upload_bytes);

    let state = AppState::new(
        store,
        SessionTokens::new(&config.jwt_secret),
        credentials,
        uploads,
    );

    // Build router configuration
    let router_config = build_router_config(&config);

    // Create router
    let router = create_router(state, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/api/content", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Print the startup banner.
fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    info!("");
    info!("  ┌─────────────────────────────┐");
    info!("  │         clinic-cms          │");
    info!("  └─────────────────────────────┘");
    info!("  v{}", version);
    info!("");
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "clinic_cms=debug,tower_http=debug"
    } else {
        "clinic_cms=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new();

    // Apply CORS origins
    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
        .with_tracing(!config.no_tracing)
        .with_serve_uploads(!config.no_serve_uploads)
}

// =============================================================================
// Hash Password Command
// =============================================================================

fn run_hash_password(config: HashPasswordConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match hash_password(&config.password, config.cost) {
        Ok(hash) => {
            println!("{}", hash);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Check Command
// =============================================================================

async fn run_check(config: CheckConfig) -> ExitCode {
    // Initialize minimal logging for check command
    if config.verbose {
        init_logging(true);
    }

    println!("Clinic CMS Content Check");
    println!("════════════════════════");
    println!();

    let repository = JsonFileRepository::new(&config.data_path);
    let document = match repository.load().await {
        Ok(Some(document)) => {
            println!("✓ Loaded {}", repository.location());
            document
        }
        Ok(None) => {
            println!("✗ {} does not exist", repository.location());
            println!();
            println!("  It is created with the default content on first `serve`.");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            println!("✗ {} could not be read", repository.location());
            println!();
            println!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let content = &document.content;
    println!();
    println!("Users: {}", document.users.len());
    for user in &document.users {
        println!("  {} (id {})", user.username, user.id);
    }
    if document.users.is_empty() {
        println!("  (none - the seeded admin will be used for login)");
    }

    println!();
    println!("Collections:");
    for collection in Collection::ALL {
        println!(
            "  {:<10} {} record(s)",
            collection.key(),
            content.records(collection).len()
        );
    }

    println!();
    println!("Stats: {} entries", content.stats.len());
    println!(
        "Visibility: {} header element(s), {} footer element(s)",
        content.header_visibility.elements().count(),
        content.footer_visibility.elements().count()
    );
    if !content.extra.is_empty() {
        let keys: Vec<&str> = content.extra.keys().map(String::as_str).collect();
        println!("Unrecognized sections (kept as-is): {}", keys.join(", "));
    }

    println!();
    println!("════════════════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}
