use actix_web::{web, HttpResponse, Responder, ResponseError};
use diesel::prelude::*;

use crate::db::{get_conn, DbPool};
use crate::models::show_models::{NewShow, Show, ShowForm, ShowListing};
use crate::schema::shows;

pub async fn list_shows(pool: web::Data<DbPool>) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    // Inner joins drop any show whose artist or venue row is gone.
    let sql = r#"
        SELECT
            s.venue_id,
            v.name AS venue_name,
            s.artist_id,
            a.name AS artist_name,
            a.image_link AS artist_image_link,
            s.start_time
        FROM shows s
        JOIN artists a ON s.artist_id = a.id
        JOIN venues v ON s.venue_id = v.id
    "#;

    match diesel::sql_query(sql).load::<ShowListing>(&mut conn) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn create_show(pool: web::Data<DbPool>, form: web::Form<ShowForm>) -> impl Responder {
    let form = form.into_inner();
    let start_time = match form.parsed_start_time() {
        Ok(t) => t,
        Err(msg) => return HttpResponse::BadRequest().body(msg),
    };

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let new_show = NewShow {
        artist_id: form.artist_id,
        venue_id: form.venue_id,
        start_time,
    };

    let result = conn.transaction(|conn| {
        diesel::insert_into(shows::table)
            .values(&new_show)
            .get_result::<Show>(conn)
    });

    match result {
        Ok(show) => {
            log::info!("Show was successfully listed");
            HttpResponse::Created().json(show)
        }
        Err(e) => {
            // Dangling artist_id/venue_id surfaces here as a FK violation;
            // the caller only learns the operation failed.
            log::error!("Failed to create show: {e}");
            HttpResponse::InternalServerError().body("An error occurred. Show could not be listed.")
        }
    }
}
