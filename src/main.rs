use actix_web::{App, HttpServer, middleware, web};

use meeting_scheduler::config::AppConfig;
use meeting_scheduler::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let pool = match db::init_pool(&config.database_url, config.max_connections).await {
        Ok(p) => p,
        Err(e) => {
            log::error!("Unable to connect to the database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = db::run_migrations(&pool).await {
        log::error!("{e}");
        db::close(&pool).await;
        std::process::exit(1);
    }

    let (host, port) = config.bind_addr();
    log::info!("Starting server at http://{host}:{port}");

    let app_pool = pool.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(app_pool.clone()))
            .configure(handlers::configure)
    })
    .bind((host, port));

    let result = match server {
        Ok(server) => server.run().await,
        Err(e) => {
            log::error!("Unable to bind: {e}");
            Err(e)
        }
    };

    db::close(&pool).await;
    log::info!("Server stopped");
    result
}
