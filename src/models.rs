use serde::Serialize;

use crate::entities::movie;

/// Fields of a movie about to be created under a caller-chosen id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMovie {
    pub name: String,
    pub imdb_rating: i64,
    pub genre: String,
    pub actors: String,
    pub director: String,
}

/// Fields supplied to a partial update. `None` leaves the stored value alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieChanges {
    /// Name exactly as sent, used for the uniqueness lookup even when empty.
    pub requested_name: Option<String>,
    pub name: Option<String>,
    pub imdb_rating: Option<i64>,
    pub genre: Option<String>,
    pub actors: Option<String>,
    pub director: Option<String>,
}

impl MovieChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.imdb_rating.is_none()
            && self.genre.is_none()
            && self.actors.is_none()
            && self.director.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub name: String,
    pub imdb_rating: i64,
    pub genre: String,
    pub actors: String,
    pub director: String,
}

impl From<movie::Model> for MovieResponse {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            imdb_rating: m.imdb_rating,
            genre: m.genre,
            actors: m.actors,
            director: m.director,
        }
    }
}
