use dotenvy::dotenv;
use tracing::{error, info};

use crossdesk::router::init_router;
use crossdesk::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    crossdesk_observability::init_logging(env!("CARGO_CRATE_NAME"));

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "create-root" {
        handle_create_root(args).await;
        return;
    }

    let state = match init_app_state().await {
        Ok(state) => state,
        Err(e) => {
            error!("Startup configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&state.db).await {
        error!("Migration failure: {:#}", e);
        std::process::exit(1);
    }

    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind 0.0.0.0:3000");
    info!("Server running on http://localhost:3000");
    info!("Swagger UI at http://localhost:3000/swagger-ui");
    info!("Scalar UI at http://localhost:3000/scalar");
    axum::serve(listener, app).await.expect("Server error");
}

/// Bootstraps or re-keys the super-user account. This is the only way to
/// provision `root`; the HTTP surface refuses the reserved username.
async fn handle_create_root(args: Vec<String>) {
    if args.len() != 3 {
        eprintln!("Usage: {} create-root <password>", args[0]);
        std::process::exit(1);
    }
    let password = &args[2];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Migration failure");

    match crossdesk::modules::accounts::service::create_root_account(&pool, password).await {
        Ok(account) => {
            println!("Super-user account ready (id: {})", account.id);
        }
        Err(e) => {
            eprintln!("Error creating super-user: {}", e.error);
            std::process::exit(1);
        }
    }
}
