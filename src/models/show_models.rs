use chrono::NaiveDateTime;
use diesel::prelude::{Insertable, Queryable, QueryableByName};
use diesel::sql_types::{Integer, Nullable, Text, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Serialize)]
pub struct Show {
    pub id: i32,
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::shows)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

#[derive(Deserialize)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: String,
}

impl ShowForm {
    /// Booking forms post timestamps either space- or T-separated.
    pub fn parsed_start_time(&self) -> Result<NaiveDateTime, String> {
        let raw = self.start_time.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .map_err(|_| format!("Invalid start_time: {raw}"))
    }
}

/// A venue's show joined with the booked artist's display fields.
#[derive(Queryable, Serialize, Debug)]
pub struct ShowWithArtist {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// An artist's show joined with the hosting venue's display fields.
#[derive(Queryable, Serialize, Debug)]
pub struct ShowWithVenue {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

#[derive(QueryableByName, Serialize)]
pub struct ShowListing {
    #[diesel(sql_type = Integer)]
    pub venue_id: i32,
    #[diesel(sql_type = Text)]
    pub venue_name: String,
    #[diesel(sql_type = Integer)]
    pub artist_id: i32,
    #[diesel(sql_type = Text)]
    pub artist_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub artist_image_link: Option<String>,
    #[diesel(sql_type = Timestamp)]
    pub start_time: NaiveDateTime,
}
