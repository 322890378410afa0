use diesel::prelude::{AsChangeset, Insertable};
use diesel::{Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::models::show_models::ShowWithArtist;
use crate::utils::genre_utils::decode_genres;

#[derive(Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::venues)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::venues)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Full-replace changeset: every mutable column is rewritten, and a
/// missing optional field clears the stored value.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::venues, treat_none_as_null = true)]
pub struct VenueChanges {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("city", &self.city),
            ("state", &self.state),
            ("address", &self.address),
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

    pub fn into_new_venue(self) -> NewVenue {
        NewVenue {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            genres: self.genres,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            website: self.website,
            seeking_talent: self.seeking_talent.unwrap_or(false),
            seeking_description: self.seeking_description,
        }
    }

    pub fn into_changes(self) -> VenueChanges {
        VenueChanges {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            genres: self.genres,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            website: self.website,
            seeking_talent: self.seeking_talent.unwrap_or(false),
            seeking_description: self.seeking_description,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<ShowWithArtist>,
    pub upcoming_shows: Vec<ShowWithArtist>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    pub fn from_parts(
        venue: Venue,
        past_shows: Vec<ShowWithArtist>,
        upcoming_shows: Vec<ShowWithArtist>,
    ) -> Self {
        VenueDetail {
            id: venue.id,
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            genres: decode_genres(&venue.genres),
            facebook_link: venue.facebook_link,
            image_link: venue.image_link,
            website: venue.website,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
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

    fn form() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            genres: "{Jazz,Reggae}".to_string(),
            facebook_link: "https://facebook.com/TheMusicalHop".to_string(),
            image_link: None,
            website: None,
            seeking_talent: None,
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
            f.address = value.clone();
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
        f.seeking_talent = None;
        f.seeking_description = None;
        assert!(f.validate().is_ok());
    }

    #[test]
    fn into_new_venue_preserves_fields_and_defaults_seeking_talent() {
        let new_venue = form().into_new_venue();
        assert_eq!(new_venue.name, "The Musical Hop");
        assert_eq!(new_venue.city, "San Francisco");
        assert_eq!(new_venue.state, "CA");
        assert_eq!(new_venue.address, "1015 Folsom Street");
        assert_eq!(new_venue.phone.as_deref(), Some("123-123-1234"));
        assert_eq!(new_venue.genres, "{Jazz,Reggae}");
        assert_eq!(new_venue.facebook_link, "https://facebook.com/TheMusicalHop");
        assert!(!new_venue.seeking_talent);

        let mut f = form();
        f.seeking_talent = Some(true);
        assert!(f.into_new_venue().seeking_talent);
    }
}
