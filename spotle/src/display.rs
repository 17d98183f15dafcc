//! Console text for turn outcomes.

use spotle_core::{Feedback, Genres, Popularity, Recency, Relatedness};

pub fn popularity_line(signal: Popularity) -> &'static str {
    match signal {
        // The mystery artist has more followers than the guess.
        Popularity::GuessLower => "🔼 MORE FOLLOWERS",
        Popularity::GuessHigher => "🔽 LESS FOLLOWERS",
        Popularity::Equal => "🟰 SAME NUMBER OF FOLLOWERS",
    }
}

pub fn genres_line(signal: &Genres) -> String {
    match signal {
        Genres::NoCommonGenres => "🥀 NO COMMON GENRES".to_string(),
        Genres::CommonGenres(list) => format!("🎶 COMMON GENRES: {list}"),
    }
}

pub fn recency_line(signal: Recency) -> &'static str {
    match signal {
        Recency::GuessHasNoRelease => "👽 YOUR GUESS HAS NOT RELEASED AN ALBUM...",
        Recency::MysteryHasNoRelease => "❓ MYSTERY ARTIST HAS NOT RELEASED AN ALBUM...",
        Recency::GuessLessRecent => "⏳ MORE RECENT ALBUM RELEASE",
        Recency::GuessMoreRecent => "⌛ LESS RECENT ALBUM RELEASE",
        Recency::SameRecency => "⏰ SAME RECENT ALBUM RELEASE",
    }
}

pub fn relatedness_line(signal: Relatedness) -> &'static str {
    match signal {
        Relatedness::Related => "🐈 SIMILAR ARTIST",
        Relatedness::Unrelated => "🐕 DISSIMILAR ARTIST",
    }
}

/// The four hint lines, in fixed order.
pub fn feedback_lines(feedback: &Feedback) -> [String; 4] {
    [
        popularity_line(feedback.popularity).to_string(),
        genres_line(&feedback.genres),
        recency_line(feedback.recency).to_string(),
        relatedness_line(feedback.relatedness).to_string(),
    ]
}

pub fn won_line(mystery: &str) -> String {
    format!("🎉 CONGRATULATIONS! THE MYSTERY ARTIST WAS: {}!", mystery.to_uppercase())
}

pub fn lost_lines(mystery: &str) -> [String; 2] {
    [
        "😺 NICE TRY, BETTER LUCK NEXT TIME!".to_string(),
        format!("THE MYSTERY ARTIST WAS: {} 🙈", mystery.to_uppercase()),
    ]
}

pub const DUPLICATE_LINE: &str = "🤡 ALREADY GUESSED. TRY AGAIN!";

pub fn print_welcome() {
    println!();
    println!("Welcome to Spotle 🎹! The aim is to guess a musical artist.");
    println!("If you guess wrong, we will give you a few cheeky hints. Have fun! 🕵️");
    println!();
}
