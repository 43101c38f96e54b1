//! Seega's REST API.

use actix_web::{
    guard,
    middleware::DefaultHeaders,
    web::{self, Json, ServiceConfig},
};
use serde::Serialize;

mod config;
mod extractors;
mod games;
mod socket;

pub use self::{
    config::Config,
    extractors::{AuthError, Bearer},
};

pub type Result<T, E=seega_error::Error> = std::result::Result<T, E>;

/// Version of this server.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configure [`App`] for an API server.
///
/// [`App`]: actix_web::App
pub fn configure(cfg: &mut ServiceConfig) {
    cfg
        // Registered first so that it takes precedence over resources which
        // don't handle OPTIONS.
        .service(web::resource("/{tail:.*}")
            .guard(guard::Options())
            .to(preflight)
        )
        .route("/", web::get().to(about))
        .route("/health", web::get().to(health))
        .service(web::scope("/api")
            .configure(games::configure)
        );
}

/// Headers allowing the API to be used from any origin.
pub fn cors() -> DefaultHeaders {
    DefaultHeaders::new()
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS, PATCH")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Expose-Headers", "*")
}

#[derive(Serialize)]
struct About {
    message: &'static str,
    version: &'static str,
    status: &'static str,
}

/// Describe this server.
///
/// ## Method
///
/// ```text
/// GET /
/// ```
fn about() -> Json<About> {
    Json(About {
        message: "Seega Game API",
        version: VERSION,
        status: "online",
    })
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// Report that the server is alive.
///
/// This endpoint is polled by uptime monitors and must stay cheap.
///
/// ## Method
///
/// ```text
/// GET /health
/// ```
fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[derive(Serialize)]
struct Preflight {
    message: &'static str,
}

/// Answer CORS preflight requests.
fn preflight() -> Json<Preflight> {
    Json(Preflight { message: "OK" })
}
