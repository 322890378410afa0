pub mod artist_handlers;
pub mod show_handlers;
pub mod venue_handlers;

use actix_web::HttpResponse;
use serde_json::json;

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Not found" }))
}
