use clap::Parser;
use recipebox::{
    cli::{commands, Cli, Commands},
    config::Settings,
    console::Console,
    db::{self, models::RecipeUpdate},
    web::{self, AppState},
    Error, RecipeRepository, Result,
};
use std::io::Write;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipebox=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.log_safe());
            eprintln!("\u{2717} {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => serve(settings, port, host).await,
        Commands::Migrate => migrate(settings).await,
        command => run_command(settings, command).await,
    }
}

async fn open_repository(settings: &Settings) -> Result<RecipeRepository> {
    let store = db::open_store(&settings.database).await?;
    Ok(RecipeRepository::new(store))
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }
    settings.validate()?;

    info!("Starting Recipe Box server");
    info!("Database: {}", settings.database.url);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let repository = open_repository(&settings).await?;
    info!(
        "Recipe store ready ({} recipes)",
        repository.count().await?
    );

    // Create application state
    let state = AppState {
        repository,
        settings: settings.clone(),
    };

    let app = web::create_router(state);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Recipe Box Server");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("\nRoutes:");
    println!("  GET  /");
    println!("  POST /add");
    println!("  GET  /delete/:id");
    println!("  POST /update/:id");
    println!("  GET  /health");
    println!("  GET  /ready");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn migrate(settings: Settings) -> Result<()> {
    if settings.database.is_memory_store() {
        println!("In-memory store selected; nothing to migrate");
        return Ok(());
    }

    info!("Running database migrations");
    let pool = db::init_pool_with_config(&settings.database).await?;
    db::run_migrations(&pool).await?;

    println!("\u{2713} Database migrations completed successfully");
    Ok(())
}

async fn run_command(settings: Settings, command: Commands) -> Result<()> {
    let repository = open_repository(&settings).await?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::List => commands::list(&repository, &mut out).await?,
        Commands::Add {
            name,
            ingredients,
            steps,
        } => commands::add(&repository, &name, &ingredients, &steps, &mut out).await?,
        Commands::Show { id } => commands::show(&repository, &id, &mut out).await?,
        Commands::Update {
            id,
            name,
            ingredients,
            steps,
        } => {
            let fields = RecipeUpdate {
                name,
                ingredients,
                steps,
            };
            commands::update(&repository, &id, fields, &mut out).await?
        }
        Commands::Delete { id, yes } => {
            commands::delete(&repository, &id, yes, &mut input, &mut out).await?
        }
        Commands::Count => commands::count(&repository, &mut out).await?,
        Commands::DeleteAll { confirm } => {
            commands::delete_all(&repository, confirm, &mut input, &mut out).await?
        }
        Commands::Interactive => {
            let mut console = Console::new(repository, input, out);
            console.run().await?;
            return Ok(());
        }
        Commands::Serve { .. } | Commands::Migrate => {
            return Err(Error::Internal(
                "serve and migrate are handled before the store is opened".to_string(),
            ));
        }
    }

    out.flush()?;
    Ok(())
}
