use actix_web::web;

use crate::handlers::venue_handlers::{
    create_venue, delete_venue, edit_venue, get_venue, list_venues, search_venues, update_venue,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal segments are registered before the id match.
    cfg.service(
        web::scope("/venues")
            .route("", web::get().to(list_venues))
            .route("/search", web::post().to(search_venues))
            .route("/create", web::post().to(create_venue))
            .route("/{venue_id}", web::get().to(get_venue))
            .route("/{venue_id}", web::delete().to(delete_venue))
            .route("/{venue_id}/edit", web::get().to(edit_venue))
            .route("/{venue_id}/edit", web::post().to(update_venue)),
    );
}
