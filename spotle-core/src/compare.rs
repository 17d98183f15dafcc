//! The four comparisons run on every wrong guess.
//!
//! Each comparison takes `(guess, mystery)` in that order and is pure. The
//! argument order matters: swapping it flips popularity and recency, and
//! relatedness only ever looks at the mystery artist's related list.

use crate::artist::Artist;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How the guess's follower count compares to the mystery artist's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Popularity {
    /// The guess has fewer followers than the mystery artist.
    GuessLower,
    /// The guess has more followers than the mystery artist.
    GuessHigher,
    Equal,
}

/// Genres shared by the guess and the mystery artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genres {
    NoCommonGenres,
    /// Shared genres, sorted and title-cased, e.g. `"Hip Hop, Rap"`.
    CommonGenres(String),
}

/// How recent the guess's latest album is relative to the mystery artist's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recency {
    GuessHasNoRelease,
    MysteryHasNoRelease,
    GuessLessRecent,
    GuessMoreRecent,
    SameRecency,
}

/// Whether the guess appears in the mystery artist's related list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relatedness {
    Related,
    Unrelated,
}

/// All four signals for one wrong guess, always computed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub popularity: Popularity,
    pub genres: Genres,
    pub recency: Recency,
    pub relatedness: Relatedness,
}

impl Feedback {
    /// Run every comparison for `guess` against `mystery`.
    pub fn between(guess: &Artist, mystery: &Artist) -> Self {
        Self {
            popularity: compare_popularity(guess, mystery),
            genres: compare_genres(guess, mystery),
            recency: compare_recency(guess, mystery),
            relatedness: compare_relatedness(guess, mystery),
        }
    }
}

pub fn compare_popularity(guess: &Artist, mystery: &Artist) -> Popularity {
    match guess.followers().cmp(&mystery.followers()) {
        Ordering::Less => Popularity::GuessLower,
        Ordering::Greater => Popularity::GuessHigher,
        Ordering::Equal => Popularity::Equal,
    }
}

pub fn compare_genres(guess: &Artist, mystery: &Artist) -> Genres {
    // Both sets are lowercase and ordered, so the intersection comes out sorted.
    let common: Vec<&str> = guess
        .genres()
        .intersection(mystery.genres())
        .map(String::as_str)
        .collect();

    if common.is_empty() {
        Genres::NoCommonGenres
    } else {
        Genres::CommonGenres(title_case(&common.join(", ")))
    }
}

/// A guess without a release is reported as such before the mystery is checked.
pub fn compare_recency(guess: &Artist, mystery: &Artist) -> Recency {
    let Some(guess_date) = guess.latest_release() else {
        return Recency::GuessHasNoRelease;
    };
    let Some(mystery_date) = mystery.latest_release() else {
        return Recency::MysteryHasNoRelease;
    };

    match guess_date.cmp(&mystery_date) {
        Ordering::Less => Recency::GuessLessRecent,
        Ordering::Greater => Recency::GuessMoreRecent,
        Ordering::Equal => Recency::SameRecency,
    }
}

/// Directed: is the guess listed under the mystery artist's related artists?
pub fn compare_relatedness(guess: &Artist, mystery: &Artist) -> Relatedness {
    if mystery.lists_as_related(guess.name()) {
        Relatedness::Related
    } else {
        Relatedness::Unrelated
    }
}

/// Words left lowercase inside a title.
const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "of", "on", "or", "the",
    "to", "v", "v.", "via", "vs", "vs.",
];

/// Title-case a phrase: every word capitalized except [`SMALL_WORDS`], which
/// stay lowercase unless they open or close the phrase. Hyphenated parts are
/// capitalized separately.
fn title_case(phrase: &str) -> String {
    let words: Vec<&str> = phrase.split(' ').collect();
    let last = words.len().saturating_sub(1);

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let bare = word.trim_end_matches(',');
            if i != 0 && i != last && SMALL_WORDS.contains(&bare) {
                word.to_string()
            } else {
                word.split('-').map(capitalize).collect::<Vec<_>>().join("-")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn artist(id: &str, name: &str) -> crate::artist::ArtistBuilder {
        Artist::builder(id, name).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_popularity_is_antisymmetric() {
        let small = artist("s", "Small").followers(10).build();
        let big = artist("b", "Big").followers(1_000).build();
        let also_small = artist("s2", "Also Small").followers(10).build();

        assert_eq!(compare_popularity(&small, &big), Popularity::GuessLower);
        assert_eq!(compare_popularity(&big, &small), Popularity::GuessHigher);
        assert_eq!(compare_popularity(&small, &also_small), Popularity::Equal);
        assert_eq!(compare_popularity(&also_small, &small), Popularity::Equal);
    }

    #[test]
    fn test_common_genres_sorted_and_title_cased() {
        let travis = artist("t", "Travis Scott").genres(["rap", "hip hop"]).build();
        let drake = artist("d", "Drake").genres(["hip hop", "rap", "pop"]).build();

        let expected = Genres::CommonGenres("Hip Hop, Rap".to_string());
        assert_eq!(compare_genres(&travis, &drake), expected);
        assert_eq!(compare_genres(&drake, &travis), expected);
    }

    #[test]
    fn test_genres_case_insensitive() {
        let a = artist("a", "A").genres(["K-Pop"]).build();
        let b = artist("b", "B").genres(["k-pop", "dance"]).build();
        assert_eq!(compare_genres(&a, &b), Genres::CommonGenres("K-Pop".to_string()));
    }

    #[test]
    fn test_no_common_genres() {
        let taylor = artist("t", "Taylor Swift").genres(["pop"]).build();
        let future = artist("f", "Future").genres(["rap", "trap"]).build();
        let untagged = artist("u", "Untagged").build();

        assert_eq!(compare_genres(&taylor, &future), Genres::NoCommonGenres);
        assert_eq!(compare_genres(&untagged, &future), Genres::NoCommonGenres);
        assert_eq!(compare_genres(&untagged, &untagged), Genres::NoCommonGenres);
    }

    #[test]
    fn test_recency_ordering() {
        let older = artist("o", "Older").latest_release(date(2019, 3, 1)).build();
        let newer = artist("n", "Newer").latest_release(date(2024, 1, 5)).build();
        let same = artist("s", "Same").latest_release(date(2024, 1, 5)).build();

        assert_eq!(compare_recency(&older, &newer), Recency::GuessLessRecent);
        assert_eq!(compare_recency(&newer, &older), Recency::GuessMoreRecent);
        assert_eq!(compare_recency(&newer, &same), Recency::SameRecency);
    }

    #[test]
    fn test_missing_guess_release_checked_first() {
        let none = artist("x", "No Album").build();
        let also_none = artist("y", "Also No Album").build();
        let dated = artist("d", "Dated").latest_release(date(2020, 6, 1)).build();

        assert_eq!(compare_recency(&none, &dated), Recency::GuessHasNoRelease);
        assert_eq!(compare_recency(&none, &also_none), Recency::GuessHasNoRelease);
        assert_eq!(compare_recency(&dated, &none), Recency::MysteryHasNoRelease);
    }

    #[test]
    fn test_relatedness_is_directed() {
        let a = artist("a", "Future").related(["Metro Boomin"]).build();
        let b = artist("b", "Drake").related(["Future", "21 Savage"]).build();

        assert_eq!(compare_relatedness(&a, &b), Relatedness::Related);
        assert_eq!(compare_relatedness(&b, &a), Relatedness::Unrelated);
    }

    #[test]
    fn test_relatedness_exact_name_match() {
        let guess = artist("g", "future").build();
        let mystery = artist("m", "Drake").related(["Future"]).build();
        assert_eq!(compare_relatedness(&guess, &mystery), Relatedness::Unrelated);
    }

    #[test]
    fn test_feedback_collects_all_four() {
        let guess = artist("g", "Future")
            .followers(5)
            .genres(["rap"])
            .build();
        let mystery = artist("m", "Drake")
            .followers(50)
            .genres(["rap", "pop"])
            .related(["Future"])
            .latest_release(date(2023, 10, 6))
            .build();

        let feedback = Feedback::between(&guess, &mystery);
        assert_eq!(feedback.popularity, Popularity::GuessLower);
        assert_eq!(feedback.genres, Genres::CommonGenres("Rap".to_string()));
        assert_eq!(feedback.recency, Recency::GuessHasNoRelease);
        assert_eq!(feedback.relatedness, Relatedness::Related);
    }

    #[test]
    fn test_small_words_stay_lowercase() {
        let a = artist("a", "A").genres(["drum and bass", "rock en espanol", "techno"]).build();
        let b = artist("b", "B").genres(["rock en espanol", "drum and bass"]).build();
        assert_eq!(
            compare_genres(&a, &b),
            Genres::CommonGenres("Drum and Bass, Rock en Espanol".to_string())
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hip hop"), "Hip Hop");
        assert_eq!(title_case("k-pop"), "K-Pop");
        assert_eq!(title_case("r&b"), "R&b");
        assert_eq!(title_case("drum and bass"), "Drum and Bass");
        assert_eq!(title_case("the a"), "The A");
        assert_eq!(title_case("hip hop, a cappella, rap"), "Hip Hop, a Cappella, Rap");
    }
}
