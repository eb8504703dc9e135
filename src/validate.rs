use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult},
    models::{MovieChanges, NewMovie},
};

struct Field {
    key: &'static str,
    max_chars: Option<usize>,
    required: &'static str,
}

const NAME: Field =
    Field { key: "name", max_chars: Some(30), required: "Name of the movie is required" };
const IMDB_RATING: Field =
    Field { key: "imdb_rating", max_chars: None, required: "IMDB rating of the movie is required" };
const GENRE: Field =
    Field { key: "genre", max_chars: Some(30), required: "Genre of the movie is required" };
const ACTORS: Field =
    Field { key: "actors", max_chars: Some(150), required: "Actors of the movie are required" };
const DIRECTOR: Field =
    Field { key: "director", max_chars: Some(100), required: "Director of the movie is required" };

/// Validates a create body: all five fields must be present. Values are read
/// as text first and then checked against the column bounds.
pub fn create(body: &[u8]) -> AppResult<NewMovie> {
    let map = parse_object(body)?;
    let required = |field: &Field| -> AppResult<String> {
        text(&map, field)?.ok_or_else(|| AppError::field(field.key, field.required))
    };

    let name = required(&NAME)?;
    let imdb_rating = parse_rating(&required(&IMDB_RATING)?)?;
    let genre = required(&GENRE)?;
    let actors = required(&ACTORS)?;
    let director = required(&DIRECTOR)?;

    Ok(NewMovie { name, imdb_rating, genre, actors, director })
}

/// Validates an update body. Absent, null and empty values leave the stored
/// field untouched.
pub fn update(body: &[u8]) -> AppResult<MovieChanges> {
    let map = parse_object(body)?;
    let supplied = |field: &Field| -> AppResult<Option<String>> {
        Ok(text(&map, field)?.filter(|t| !t.is_empty()))
    };

    let requested_name = text(&map, &NAME)?;
    let imdb_rating = supplied(&IMDB_RATING)?.map(|t| parse_rating(&t)).transpose()?;

    Ok(MovieChanges {
        name: requested_name.clone().filter(|n| !n.is_empty()),
        requested_name,
        imdb_rating,
        genre: supplied(&GENRE)?,
        actors: supplied(&ACTORS)?,
        director: supplied(&DIRECTOR)?,
    })
}

fn parse_object(body: &[u8]) -> AppResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AppError::body("Failed to decode JSON object")),
    }
}

fn text(map: &Map<String, Value>, field: &Field) -> AppResult<Option<String>> {
    let text = match map.get(field.key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    match field.max_chars {
        Some(max) if text.chars().count() > max => Err(AppError::field(
            field.key,
            format!("{} must be at most {max} characters", field.key),
        )),
        _ => Ok(Some(text)),
    }
}

fn parse_rating(text: &str) -> AppResult<i64> {
    let text = text.trim();
    if let Ok(rating) = text.parse::<i64>() {
        return Ok(rating);
    }
    // fractional ratings are stored truncated, the column is an integer
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
            Ok(v.trunc() as i64)
        }
        _ => Err(AppError::field(IMDB_RATING.key, "IMDB rating must be a number")),
    }
}
