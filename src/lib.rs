pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{CatalogService, OrderService};
use handlers::ApiDoc;
use infrastructure::{DieselCustomerRepository, DieselOrderRepository, DieselProductRepository};

pub use config::Config;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type AppOrderService =
    OrderService<DieselCustomerRepository, DieselProductRepository, DieselOrderRepository>;
pub type AppCatalogService = CatalogService<DieselCustomerRepository, DieselProductRepository>;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        log::info!("Applied {} migration(s)", applied.len());
    }
    Ok(())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let orders = web::Data::new(AppOrderService::new(
        DieselCustomerRepository::new(pool.clone()),
        DieselProductRepository::new(pool.clone()),
        DieselOrderRepository::new(pool.clone()),
    ));
    let catalog = web::Data::new(AppCatalogService::new(
        DieselCustomerRepository::new(pool.clone()),
        DieselProductRepository::new(pool),
    ));
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(orders.clone())
            .app_data(catalog.clone())
            .wrap(Logger::default())
            .configure(
                handlers::routes::<
                    DieselCustomerRepository,
                    DieselProductRepository,
                    DieselOrderRepository,
                >,
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
