//! Venue records and the venue form

use serde::{Deserialize, Serialize};

use super::fields::{self, MAX_IMAGE_LINK_LEN, MAX_SHORT_TEXT_LEN, MAX_WEBSITE_LEN};
use super::{Genres, Location, ValidationError};

/// Venue as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

impl Venue {
    pub fn location(&self) -> Location {
        Location::new(&self.city, &self.state)
    }
}

/// Raw venue form as submitted (or as prefilled for editing)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    #[serde(alias = "website")]
    pub website_link: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

/// Validated venue fields, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

impl VenueForm {
    /// Validate every field; the first failure is returned.
    pub fn validate(self) -> Result<VenueInput, ValidationError> {
        Ok(VenueInput {
            name: fields::required("name", self.name)?,
            city: fields::bounded(
                "city",
                fields::required("city", self.city)?,
                MAX_SHORT_TEXT_LEN,
            )?,
            state: fields::state(self.state)?,
            address: fields::bounded(
                "address",
                fields::required("address", self.address)?,
                MAX_SHORT_TEXT_LEN,
            )?,
            phone: fields::phone(self.phone)?,
            image_link: fields::link("image_link", self.image_link, MAX_IMAGE_LINK_LEN)?,
            facebook_link: fields::link("facebook_link", self.facebook_link, MAX_SHORT_TEXT_LEN)?,
            website: fields::link("website_link", self.website_link, MAX_WEBSITE_LEN)?,
            seeking_talent: fields::checkbox(self.seeking_talent.as_deref()),
            seeking_description: fields::optional(self.seeking_description),
            genres: Genres::from_selected(&self.genres)?,
        })
    }
}

impl From<&Venue> for VenueForm {
    fn from(v: &Venue) -> Self {
        Self {
            name: Some(v.name.clone()),
            city: Some(v.city.clone()),
            state: Some(v.state.clone()),
            address: Some(v.address.clone()),
            phone: Some(v.phone.clone()),
            image_link: v.image_link.clone(),
            facebook_link: v.facebook_link.clone(),
            website_link: v.website.clone(),
            genres: v.genres.as_slice().to_vec(),
            seeking_talent: v.seeking_talent.then(|| "y".to_owned()),
            seeking_description: v.seeking_description.clone(),
        }
    }
}
