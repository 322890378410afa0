use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use diesel::prelude::*;
use serde_json::json;

use crate::db::{get_conn, DbPool};
use crate::models::search_models::{SearchEntry, SearchQuery, SearchResults};
use crate::models::show_models::ShowWithArtist;
use crate::models::venue_models::{Venue, VenueDetail, VenueForm};
use crate::schema::{artists, shows, venues};
use crate::utils::aggregation_utils::{group_venues_by_location, partition_by_time};

pub async fn list_venues(pool: web::Data<DbPool>) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    // Ordered load keeps equal (city, state) keys adjacent for grouping.
    let result = venues::table
        .order((venues::state.asc(), venues::city.asc(), venues::id.asc()))
        .select(Venue::as_select())
        .load::<Venue>(&mut conn);

    match result {
        Ok(rows) => HttpResponse::Ok().json(group_venues_by_location(rows)),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn search_venues(
    pool: web::Data<DbPool>,
    form: web::Form<SearchQuery>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let pattern = format!("%{}%", form.term());
    // One reference instant for every upcoming-show count in this response.
    let now = Utc::now().naive_utc();

    let matches = match venues::table
        .filter(venues::name.ilike(pattern))
        .select(Venue::as_select())
        .load::<Venue>(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let mut data = Vec::with_capacity(matches.len());
    for venue in matches {
        let num_upcoming_shows = match shows::table
            .filter(shows::venue_id.eq(venue.id))
            .filter(shows::start_time.gt(now))
            .count()
            .get_result::<i64>(&mut conn)
        {
            Ok(n) => n,
            Err(_) => return HttpResponse::InternalServerError().finish(),
        };
        data.push(SearchEntry {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows,
        });
    }

    HttpResponse::Ok().json(SearchResults {
        count: data.len(),
        data,
    })
}

pub async fn get_venue(pool: web::Data<DbPool>, path: web::Path<i32>) -> impl Responder {
    let venue_id = path.into_inner();
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let venue = match venues::table
        .find(venue_id)
        .select(Venue::as_select())
        .first::<Venue>(&mut conn)
    {
        Ok(v) => v,
        Err(diesel::result::Error::NotFound) => {
            return HttpResponse::NotFound().body("Venue not found")
        }
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let entries = match shows::table
        .inner_join(artists::table)
        .filter(shows::venue_id.eq(venue_id))
        .select((
            shows::artist_id,
            artists::name,
            artists::image_link,
            shows::start_time,
        ))
        .load::<ShowWithArtist>(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let now = Utc::now().naive_utc();
    let (past_shows, upcoming_shows) = partition_by_time(entries, now, |s| s.start_time);

    HttpResponse::Ok().json(VenueDetail::from_parts(venue, past_shows, upcoming_shows))
}

pub async fn create_venue(pool: web::Data<DbPool>, form: web::Form<VenueForm>) -> impl Responder {
    let form = form.into_inner();
    if let Err(msg) = form.validate() {
        return HttpResponse::BadRequest().body(msg);
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let venue_name = form.name.clone();
    let new_venue = form.into_new_venue();

    let result = conn.transaction(|conn| {
        diesel::insert_into(venues::table)
            .values(&new_venue)
            .returning(Venue::as_returning())
            .get_result::<Venue>(conn)
    });

    match result {
        Ok(venue) => {
            log::info!("Venue {venue_name} was successfully listed");
            HttpResponse::Created().json(venue)
        }
        Err(e) => {
            log::error!("Failed to create venue {venue_name}: {e}");
            HttpResponse::InternalServerError()
                .body(format!("An error occurred. Venue {venue_name} could not be listed."))
        }
    }
}

pub async fn delete_venue(pool: web::Data<DbPool>, path: web::Path<i32>) -> impl Responder {
    let venue_id = path.into_inner();
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    // The venue's shows go in the same transaction: either the venue and
    // every show booked there are removed, or none are.
    let result = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
        diesel::delete(shows::table.filter(shows::venue_id.eq(venue_id))).execute(conn)?;
        diesel::delete(venues::table.find(venue_id)).execute(conn)
    });

    match result {
        Ok(0) => HttpResponse::NotFound().body("Venue not found"),
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(e) => {
            log::error!("Failed to delete venue {venue_id}: {e}");
            HttpResponse::InternalServerError()
                .body("An error occurred. Venue could not be deleted.")
        }
    }
}

/// Current field values for populating the edit form; genres stay in their
/// stored encoding.
pub async fn edit_venue(pool: web::Data<DbPool>, path: web::Path<i32>) -> impl Responder {
    let venue_id = path.into_inner();
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    match venues::table
        .find(venue_id)
        .select(Venue::as_select())
        .first::<Venue>(&mut conn)
    {
        Ok(venue) => HttpResponse::Ok().json(venue),
        Err(diesel::result::Error::NotFound) => HttpResponse::NotFound().body("Venue not found"),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn update_venue(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Form<VenueForm>,
) -> impl Responder {
    let venue_id = path.into_inner();
    let form = form.into_inner();
    if let Err(msg) = form.validate() {
        return HttpResponse::BadRequest().body(msg);
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let venue_name = form.name.clone();
    let changes = form.into_changes();

    let result = conn.transaction(|conn| {
        diesel::update(venues::table.find(venue_id))
            .set(&changes)
            .returning(Venue::as_returning())
            .get_result::<Venue>(conn)
    });

    match result {
        Ok(venue) => {
            log::info!("Venue {venue_name} was successfully updated");
            HttpResponse::Ok().json(venue)
        }
        Err(diesel::result::Error::NotFound) => HttpResponse::NotFound().body("Venue not found"),
        Err(e) => {
            log::error!("Failed to update venue {venue_id}: {e}");
            HttpResponse::InternalServerError()
                .body(format!("An error occurred. Venue {venue_name} could not be updated."))
        }
    }
}
