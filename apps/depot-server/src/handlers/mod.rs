//! HTTP handlers and route configuration.

mod errors;
mod health;
mod tasks;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/errors", web::get().to(errors::list_errors))
            .service(
                web::scope("/tasks")
                    .route("", web::get().to(tasks::list_tasks))
                    .route("", web::post().to(tasks::enqueue_task))
                    // Registered before "/{id}" so it is not parsed as an id.
                    .route("/stats", web::get().to(tasks::queue_stats))
                    .route("/{id}", web::get().to(tasks::get_task)),
            ),
    );
}
