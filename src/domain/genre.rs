//! Browse filters offered by the discovery view.

/// A catalog genre used to filter browse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: &'static str,
}

/// Genres offered next to "Trending", in display order.
pub const GENRES: [Genre; 7] = [
    Genre { id: 28, name: "Action" },
    Genre { id: 35, name: "Comedy" },
    Genre { id: 27, name: "Horror" },
    Genre { id: 16, name: "Anime" },
    Genre { id: 878, name: "Sci-Fi" },
    Genre { id: 18, name: "Drama" },
    Genre { id: 53, name: "Thriller" },
];

/// Looks up a genre by numeric id.
#[must_use]
pub fn genre_by_id(id: u32) -> Option<Genre> {
    GENRES.iter().copied().find(|g| g.id == id)
}

/// Resolves a user-typed genre: either its numeric id or its name, ignoring case.
///
/// Unknown numeric ids are still accepted so any catalog genre can be browsed;
/// they are reported with the name "Genre".
///
/// # Examples
///
/// ```
/// use watchtier::domain::genre::parse_genre;
///
/// assert_eq!(parse_genre("sci-fi").map(|g| g.id), Some(878));
/// assert_eq!(parse_genre("28").map(|g| g.name), Some("Action"));
/// assert!(parse_genre("westerns").is_none());
/// ```
#[must_use]
pub fn parse_genre(input: &str) -> Option<Genre> {
    let input = input.trim();
    if let Ok(id) = input.parse::<u32>() {
        return Some(genre_by_id(id).unwrap_or(Genre { id, name: "Genre" }));
    }
    GENRES
        .iter()
        .copied()
        .find(|g| g.name.eq_ignore_ascii_case(input))
}
