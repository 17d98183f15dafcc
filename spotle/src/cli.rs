//! Command line options.

use spotle_core::DEFAULT_MAX_GUESSES;
use std::path::PathBuf;

/// Environment variable supplying the default guess limit.
pub const MAX_GUESSES_ENV: &str = "SPOTLE_MAX_GUESSES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub max_guesses: u32,
    /// Play offline against a JSON roster instead of Spotify.
    pub roster: Option<PathBuf>,
    pub playlist: Option<String>,
    pub market: Option<String>,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_guesses: DEFAULT_MAX_GUESSES,
            roster: None,
            playlist: None,
            market: None,
            help: false,
        }
    }
}

/// Parse options from command line arguments (program name first).
///
/// `env_max_guesses` is the value of [`MAX_GUESSES_ENV`], if set; the flag wins.
pub fn parse_args(args: &[String], env_max_guesses: Option<&str>) -> Result<Options, String> {
    let mut options = Options::default();

    if let Some(value) = env_max_guesses {
        options.max_guesses = parse_max_guesses(value)?;
    }

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "--max-guesses" => options.max_guesses = parse_max_guesses(value_of(&mut iter, arg)?)?,
            "--roster" => options.roster = Some(PathBuf::from(value_of(&mut iter, arg)?)),
            "--playlist" => options.playlist = Some(value_of(&mut iter, arg)?.to_string()),
            "--market" => options.market = Some(value_of(&mut iter, arg)?.to_string()),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(options)
}

fn value_of<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, String> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

// Zero parses here; the session rejects it when the game starts.
fn parse_max_guesses(value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid guess limit: {value}"))
}

pub fn print_help() {
    println!("Spotle - guess the mystery artist");
    println!();
    println!("USAGE:");
    println!("  spotle [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help             Show this help message");
    println!("  --max-guesses <N>      Wrong guesses allowed (default: {DEFAULT_MAX_GUESSES})");
    println!("                         Also read from {MAX_GUESSES_ENV}");
    println!("  --roster <PATH>        Play offline with artists from a JSON file");
    println!("  --playlist <NAME>      Featured playlist to draw the mystery artist from");
    println!("  --market <CODE>        Spotify market (default: US)");
    println!();
    println!("Spotify mode needs SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET,");
    println!("either exported or in a .env file.");
}
