use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use std::io;

use crate::handlers;
use crate::state::AppState;

/// Route wiring for the `/chat` surface, shared by the binary and the
/// integration tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/chat")
            .route("/history", web::get().to(handlers::history::handler))
            .route("/create", web::post().to(handlers::create::handler))
            .route("/health", web::get().to(handlers::health::handler))
            .route("", web::post().to(handlers::message::handler)),
    );
}

fn build_cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_header(header::CONTENT_TYPE)
            .supports_credentials(),
        None => Cors::permissive(),
    }
}

pub async fn run_server(
    state: AppState,
    port: u16,
    cors_origin: Option<String>,
) -> io::Result<()> {
    let state = web::Data::new(state);

    log::info!("listening on port {}", port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(build_cors(cors_origin.as_deref()))
            .configure(routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
