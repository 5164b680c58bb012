//! Heuristic lookup tables keyed by genre, publisher and platform.
//!
//! Genres match exactly. Publishers match by case-insensitive substring, so
//! `"Square"` covers both "Square Enix" and "SquareSoft". All publisher
//! lookups go through [`publisher_matches`]; swapping the matching rule only
//! means changing that function.

use super::regions::Region;

pub const GENRE_PEAK_MONTH: &[(&str, u32)] = &[
    ("Sports", 9),
    ("Racing", 6),
    ("Shooter", 11),
    ("Action", 11),
    ("Fighting", 7),
    ("Role-Playing", 2),
    ("Simulation", 4),
    ("Platform", 10),
    ("Misc", 5),
];

pub const PUBLISHER_PEAK_MONTH: &[(&str, u32)] = &[
    ("Nintendo", 11),
    ("Sony", 3),
    ("Square", 12),
    ("Namco", 7),
    ("Capcom", 2),
    ("Ubisoft", 10),
];

pub const GENRE_REGION_AFFINITY: &[(&str, &[Region])] = &[
    ("Role-Playing", &[Region::Kanto, Region::Kansai]),
    ("Sports", &[Region::Kyushu, Region::Tohoku]),
    ("Racing", &[Region::Chubu]),
    ("Fighting", &[Region::Kansai]),
    ("Shooter", &[Region::Kanto]),
    ("Action", &[Region::Kanto, Region::Chubu]),
    ("Simulation", &[Region::Hokkaido, Region::Tohoku]),
    ("Platform", &[Region::Kansai]),
    ("Puzzle", &[Region::Shikoku, Region::Chugoku]),
    ("Misc", &[Region::Chugoku, Region::Kyushu]),
];

pub const PUBLISHER_REGION_AFFINITY: &[(&str, &[Region])] = &[
    ("Nintendo", &[Region::Kansai, Region::Kanto]),
    ("Capcom", &[Region::Kansai]),
    ("Square", &[Region::Kanto]),
    ("Namco", &[Region::Kanto]),
    ("Sega", &[Region::Kanto, Region::Kyushu]),
    ("Konami", &[Region::Kanto, Region::Kansai]),
    ("Sony", &[Region::Kanto]),
    ("Koei", &[Region::Kanto, Region::Chubu]),
];

/// Platforms treated as Nintendo hardware.
const FIRST_PARTY_PLATFORMS: &[&str] = &[
    "NES", "SNES", "N64", "GC", "WII", "WIIU", "NS", "GB", "GBA", "DS", "3DS",
];

const FIRST_PARTY_PUBLISHER: &str = "Nintendo";

pub fn publisher_matches(key: &str, publisher: &str) -> bool {
    !key.is_empty() && publisher.to_lowercase().contains(&key.to_lowercase())
}

/// First entry whose key matches `publisher`, in table order.
pub fn lookup_publisher<'a, T>(table: &'a [(&str, T)], publisher: &str) -> Option<&'a T> {
    table
        .iter()
        .find(|(key, _)| publisher_matches(key, publisher))
        .map(|(_, value)| value)
}

pub fn lookup_genre<'a, T>(table: &'a [(&str, T)], genre: &str) -> Option<&'a T> {
    let genre = genre.trim();
    table
        .iter()
        .find(|(key, _)| *key == genre)
        .map(|(_, value)| value)
}

pub fn genre_peak_month(genre: &str) -> Option<u32> {
    lookup_genre(GENRE_PEAK_MONTH, genre).copied()
}

pub fn publisher_peak_month(publisher: &str) -> Option<u32> {
    lookup_publisher(PUBLISHER_PEAK_MONTH, publisher).copied()
}

pub fn genre_regions(genre: &str) -> &'static [Region] {
    lookup_genre(GENRE_REGION_AFFINITY, genre)
        .copied()
        .unwrap_or(&[])
}

pub fn publisher_regions(publisher: &str) -> &'static [Region] {
    lookup_publisher(PUBLISHER_REGION_AFFINITY, publisher)
        .copied()
        .unwrap_or(&[])
}

/// Nintendo hardware or a Nintendo-published title.
pub fn is_first_party(platform: &str, publisher: &str) -> bool {
    let platform = platform.trim();
    FIRST_PARTY_PLATFORMS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(platform))
        || publisher_matches(FIRST_PARTY_PUBLISHER, publisher)
}
