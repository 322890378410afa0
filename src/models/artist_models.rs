use diesel::prelude::{AsChangeset, Insertable};
use diesel::{Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::models::show_models::ShowWithVenue;
use crate::utils::genre_utils::decode_genres;

#[derive(Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::artists)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::artists)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Full-replace changeset: every mutable column is rewritten, and a
/// missing optional field clears the stored value.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::artists, treat_none_as_null = true)]
pub struct ArtistChanges {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("city", &self.city),
            ("state", &self.state),
            ("genres", &self.genres),
            ("facebook_link", &self.facebook_link),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{field} is required"));
            }
        }
        Ok(())
    }

    pub fn into_new_artist(self) -> NewArtist {
        NewArtist {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: self.genres,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            website: self.website,
            seeking_venue: self.seeking_venue.unwrap_or(false),
            seeking_description: self.seeking_description,
        }
    }

    pub fn into_changes(self) -> ArtistChanges {
        ArtistChanges {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: self.genres,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            website: self.website,
            seeking_venue: self.seeking_venue.unwrap_or(false),
            seeking_description: self.seeking_description,
        }
    }
}

#[derive(Queryable, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<ShowWithVenue>,
    pub upcoming_shows: Vec<ShowWithVenue>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn from_parts(
        artist: Artist,
        past_shows: Vec<ShowWithVenue>,
        upcoming_shows: Vec<ShowWithVenue>,
    ) -> Self {
        ArtistDetail {
            id: artist.id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            genres: decode_genres(&artist.genres),
            facebook_link: artist.facebook_link,
            image_link: artist.image_link,
            website: artist.website,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ArtistForm {
        ArtistForm {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("326-123-5000".to_string()),
            genres: "{Rock n Roll}".to_string(),
            facebook_link: "https://facebook.com/GunsNPetals".to_string(),
            image_link: None,
            website: None,
            seeking_venue: None,
            seeking_description: None,
        }
    }

    #[test]
    fn valid_form_passes_validation() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn each_required_field_rejects_empty_and_whitespace() {
        let blank = [String::new(), "   ".to_string()];
        for value in blank {
            let mut f = form();
            f.name = value.clone();
            assert!(f.validate().is_err());

            let mut f = form();
            f.city = value.clone();
            assert!(f.validate().is_err());

            let mut f = form();
            f.state = value.clone();
            assert!(f.validate().is_err());

            let mut f = form();
            f.genres = value.clone();
            assert!(f.validate().is_err());

            let mut f = form();
            f.facebook_link = value;
            assert!(f.validate().is_err());
        }
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut f = form();
        f.phone = None;
        f.image_link = None;
        f.website = None;
        f.seeking_venue = None;
        f.seeking_description = None;
        assert!(f.validate().is_ok());
    }

    #[test]
    fn into_new_artist_preserves_fields_and_defaults_seeking_venue() {
        let new_artist = form().into_new_artist();
        assert_eq!(new_artist.name, "Guns N Petals");
        assert_eq!(new_artist.city, "San Francisco");
        assert_eq!(new_artist.state, "CA");
        assert_eq!(new_artist.phone.as_deref(), Some("326-123-5000"));
        assert_eq!(new_artist.genres, "{Rock n Roll}");
        assert_eq!(new_artist.facebook_link, "https://facebook.com/GunsNPetals");
        assert!(!new_artist.seeking_venue);

        let mut f = form();
        f.seeking_venue = Some(true);
        assert!(f.into_new_artist().seeking_venue);
    }
}
