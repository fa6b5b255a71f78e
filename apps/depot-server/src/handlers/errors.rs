//! Error code catalogue.

use actix_web::{HttpResponse, web};

use depot_shared::ApiResponse;
use depot_shared::dto::ErrorCatalogueEntry;

use crate::state::AppState;

/// GET /api/errors
pub async fn list_errors(state: web::Data<AppState>) -> HttpResponse {
    let entries: Vec<ErrorCatalogueEntry> = state
        .registry
        .iter()
        .map(|descriptor| ErrorCatalogueEntry {
            code: descriptor.code.to_string(),
            name: descriptor.name.to_string(),
            http_status: descriptor.http_status,
        })
        .collect();

    HttpResponse::Ok().json(ApiResponse::ok(entries))
}
