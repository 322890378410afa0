use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use diesel::prelude::*;
use serde_json::json;

use crate::db::{get_conn, DbPool};
use crate::models::artist_models::{Artist, ArtistDetail, ArtistForm, ArtistSummary};
use crate::models::search_models::{SearchEntry, SearchQuery, SearchResults};
use crate::models::show_models::ShowWithVenue;
use crate::schema::{artists, shows, venues};
use crate::utils::aggregation_utils::partition_by_time;

pub async fn list_artists(pool: web::Data<DbPool>) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let result = artists::table
        .order(artists::id.asc())
        .select((artists::id, artists::name))
        .load::<ArtistSummary>(&mut conn);

    match result {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn search_artists(
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

    let matches = match artists::table
        .filter(artists::name.ilike(pattern))
        .select(Artist::as_select())
        .load::<Artist>(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let mut data = Vec::with_capacity(matches.len());
    for artist in matches {
        let num_upcoming_shows = match shows::table
            .filter(shows::artist_id.eq(artist.id))
            .filter(shows::start_time.gt(now))
            .count()
            .get_result::<i64>(&mut conn)
        {
            Ok(n) => n,
            Err(_) => return HttpResponse::InternalServerError().finish(),
        };
        data.push(SearchEntry {
            id: artist.id,
            name: artist.name,
            num_upcoming_shows,
        });
    }

    HttpResponse::Ok().json(SearchResults {
        count: data.len(),
        data,
    })
}

pub async fn get_artist(pool: web::Data<DbPool>, path: web::Path<i32>) -> impl Responder {
    let artist_id = path.into_inner();
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let artist = match artists::table
        .find(artist_id)
        .select(Artist::as_select())
        .first::<Artist>(&mut conn)
    {
        Ok(a) => a,
        Err(diesel::result::Error::NotFound) => {
            return HttpResponse::NotFound().body("Artist not found")
        }
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let entries = match shows::table
        .inner_join(venues::table)
        .filter(shows::artist_id.eq(artist_id))
        .select((
            shows::venue_id,
            venues::name,
            venues::image_link,
            shows::start_time,
        ))
        .load::<ShowWithVenue>(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let now = Utc::now().naive_utc();
    let (past_shows, upcoming_shows) = partition_by_time(entries, now, |s| s.start_time);

    HttpResponse::Ok().json(ArtistDetail::from_parts(artist, past_shows, upcoming_shows))
}

pub async fn create_artist(pool: web::Data<DbPool>, form: web::Form<ArtistForm>) -> impl Responder {
    let form = form.into_inner();
    if let Err(msg) = form.validate() {
        return HttpResponse::BadRequest().body(msg);
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let artist_name = form.name.clone();
    let new_artist = form.into_new_artist();

    let result = conn.transaction(|conn| {
        diesel::insert_into(artists::table)
            .values(&new_artist)
            .returning(Artist::as_returning())
            .get_result::<Artist>(conn)
    });

    match result {
        Ok(artist) => {
            log::info!("Artist {artist_name} was successfully listed");
            HttpResponse::Created().json(artist)
        }
        Err(e) => {
            log::error!("Failed to create artist {artist_name}: {e}");
            HttpResponse::InternalServerError()
                .body(format!("An error occurred. Artist {artist_name} could not be listed."))
        }
    }
}

pub async fn delete_artist(pool: web::Data<DbPool>, path: web::Path<i32>) -> impl Responder {
    let artist_id = path.into_inner();
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    // Same contract as venue deletion: the artist's shows are removed in
    // the same transaction as the artist.
    let result = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
        diesel::delete(shows::table.filter(shows::artist_id.eq(artist_id))).execute(conn)?;
        diesel::delete(artists::table.find(artist_id)).execute(conn)
    });

    match result {
        Ok(0) => HttpResponse::NotFound().body("Artist not found"),
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(e) => {
            log::error!("Failed to delete artist {artist_id}: {e}");
            HttpResponse::InternalServerError()
                .body("An error occurred. Artist could not be deleted.")
        }
    }
}

/// Current field values for populating the edit form; genres stay in their
/// stored encoding.
pub async fn edit_artist(pool: web::Data<DbPool>, path: web::Path<i32>) -> impl Responder {
    let artist_id = path.into_inner();
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    match artists::table
        .find(artist_id)
        .select(Artist::as_select())
        .first::<Artist>(&mut conn)
    {
        Ok(artist) => HttpResponse::Ok().json(artist),
        Err(diesel::result::Error::NotFound) => HttpResponse::NotFound().body("Artist not found"),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn update_artist(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Form<ArtistForm>,
) -> impl Responder {
    let artist_id = path.into_inner();
    let form = form.into_inner();
    if let Err(msg) = form.validate() {
        return HttpResponse::BadRequest().body(msg);
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let artist_name = form.name.clone();
    let changes = form.into_changes();

    let result = conn.transaction(|conn| {
        diesel::update(artists::table.find(artist_id))
            .set(&changes)
            .returning(Artist::as_returning())
            .get_result::<Artist>(conn)
    });

    match result {
        Ok(artist) => {
            log::info!("Artist {artist_name} was successfully updated");
            HttpResponse::Ok().json(artist)
        }
        Err(diesel::result::Error::NotFound) => HttpResponse::NotFound().body("Artist not found"),
        Err(e) => {
            log::error!("Failed to update artist {artist_id}: {e}");
            HttpResponse::InternalServerError()
                .body(format!("An error occurred. Artist {artist_name} could not be updated."))
        }
    }
}
