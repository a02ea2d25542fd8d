use serde::{Deserialize, Serialize};

use super::deserializers::{deserialize_optional_text, deserialize_rating, deserialize_runtime};

/// One row of a title search. Discarded on the next query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default, deserialize_with = "deserialize_optional_text")]
    pub poster_url: String,
}

/// Full record for a single title, fetched when a result is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default, deserialize_with = "deserialize_optional_text")]
    pub poster_url: String,
    #[serde(rename = "Runtime", default, deserialize_with = "deserialize_runtime")]
    pub runtime_minutes: u32,
    #[serde(rename = "imdbRating", default, deserialize_with = "deserialize_rating")]
    pub external_rating: f64,
    #[serde(rename = "Plot", default, deserialize_with = "deserialize_optional_text")]
    pub plot: String,
    #[serde(rename = "Released", default, deserialize_with = "deserialize_optional_text")]
    pub release_date: String,
    #[serde(rename = "Actors", default, deserialize_with = "deserialize_optional_text")]
    pub actors: String,
    #[serde(rename = "Director", default, deserialize_with = "deserialize_optional_text")]
    pub director: String,
    #[serde(rename = "Genre", default, deserialize_with = "deserialize_optional_text")]
    pub genre: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_from_omdb() {
        let json = r#"{"Title":"Inception","Year":"2010","imdbID":"tt1375666","Type":"movie","Poster":"https://m.media-amazon.com/images/inception.jpg"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.id, "tt1375666");
        assert_eq!(result.title, "Inception");
        assert_eq!(result.year, "2010");
        assert!(result.poster_url.ends_with("inception.jpg"));
    }

    #[test]
    fn test_search_result_without_poster() {
        let json = r#"{"Title":"Obscure","Year":"1999","imdbID":"tt0000001","Poster":"N/A"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.poster_url, "");
    }

    #[test]
    fn test_movie_detail_from_omdb() {
        let json = r#"{
            "Title":"Inception","Year":"2010","Rated":"PG-13","Released":"16 Jul 2010",
            "Runtime":"148 min","Genre":"Action, Adventure, Sci-Fi","Director":"Christopher Nolan",
            "Actors":"Leonardo DiCaprio, Joseph Gordon-Levitt","Plot":"A thief who steals secrets.",
            "Poster":"https://example.com/p.jpg","imdbRating":"8.8","imdbID":"tt1375666",
            "Response":"True"
        }"#;
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.id, "tt1375666");
        assert_eq!(detail.runtime_minutes, 148);
        assert_eq!(detail.external_rating, 8.8);
        assert_eq!(detail.director, "Christopher Nolan");
        assert_eq!(detail.release_date, "16 Jul 2010");
        assert_eq!(detail.genre, "Action, Adventure, Sci-Fi");
    }

    #[test]
    fn test_movie_detail_missing_fields_default() {
        let json = r#"{"imdbID":"tt0000002","Title":"Sparse","Runtime":"N/A","imdbRating":"N/A"}"#;
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.runtime_minutes, 0);
        assert_eq!(detail.external_rating, 0.0);
        assert_eq!(detail.plot, "");
        assert_eq!(detail.actors, "");
    }
}
