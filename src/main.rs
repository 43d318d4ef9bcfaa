use std::env;
use std::io;

use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::{Config, Environment, File};

use sugang_timetable::db::establish_connection_pool;
use sugang_timetable::models::config::ServerConfig;
use sugang_timetable::repository::DieselRepository;
use sugang_timetable::routes;
use sugang_timetable::sugang::SugangClient;

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

    Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let client = match SugangClient::new(&server_config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build registration site client: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = Key::try_from(server_config.secret.as_bytes()).map_err(|e| {
        log::error!("Session secret must be at least 64 bytes: {e}");
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    let repo = web::Data::new(repo);
    let client = web::Data::new(client);
    let server_config = web::Data::new(server_config);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(client.clone())
            .app_data(server_config.clone())
            .service(web::scope("/api/v1").configure(routes::configure))
    })
    .bind(bind_address)?
    .run()
    .await
}
