pub mod artist_routes;
pub mod show_routes;
pub mod venue_routes;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    venue_routes::configure(cfg);
    artist_routes::configure(cfg);
    show_routes::configure(cfg);
}
