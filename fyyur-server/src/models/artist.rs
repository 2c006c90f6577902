//! Artist records and the artist form

use serde::{Deserialize, Serialize};

use super::fields::{self, MAX_IMAGE_LINK_LEN, MAX_SHORT_TEXT_LEN, MAX_WEBSITE_LEN};
use super::{Genres, Location, ValidationError};

/// Artist as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

impl Artist {
    pub fn location(&self) -> Location {
        Location::new(&self.city, &self.state)
    }
}

/// Raw artist form as submitted (or as prefilled for editing)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    #[serde(alias = "website")]
    pub website_link: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

/// Validated artist fields, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

impl ArtistForm {
    pub fn validate(self) -> Result<ArtistInput, ValidationError> {
        Ok(ArtistInput {
            name: fields::required("name", self.name)?,
            city: fields::bounded(
                "city",
                fields::required("city", self.city)?,
                MAX_SHORT_TEXT_LEN,
            )?,
            state: fields::state(self.state)?,
            phone: fields::phone(self.phone)?,
            image_link: fields::link("image_link", self.image_link, MAX_IMAGE_LINK_LEN)?,
            facebook_link: fields::link("facebook_link", self.facebook_link, MAX_SHORT_TEXT_LEN)?,
            website: fields::link("website_link", self.website_link, MAX_WEBSITE_LEN)?,
            seeking_venue: fields::checkbox(self.seeking_venue.as_deref()),
            seeking_description: fields::optional(self.seeking_description),
            genres: Genres::from_selected(&self.genres)?,
        })
    }
}

impl From<&Artist> for ArtistForm {
    fn from(a: &Artist) -> Self {
        Self {
            name: Some(a.name.clone()),
            city: Some(a.city.clone()),
            state: Some(a.state.clone()),
            phone: Some(a.phone.clone()),
            image_link: a.image_link.clone(),
            facebook_link: a.facebook_link.clone(),
            website_link: a.website.clone(),
            genres: a.genres.as_slice().to_vec(),
            seeking_venue: a.seeking_venue.then(|| "y".to_owned()),
            seeking_description: a.seeking_description.clone(),
        }
    }
}
