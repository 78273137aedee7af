//! Command-line surface.
//!
//! The same [`Command`] set serves both one-shot invocations
//! (`watchtier rank heat s`) and lines typed into the interactive shell, which
//! are parsed with [`ShellLine`].

use crate::domain::TierId;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use clap::Parser;
use clap::Subcommand;

/// Rank movies from the TMDB catalog into an S/A/B/C/D tier list.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TMDB v3 API key; overrides the config file and TMDB_API_KEY.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Directory holding the tier list and log file.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of ~/.config/watchtier/config.toml.
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `watchtier=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Runs the interactive shell when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn parse_args<I, T>(itr: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(itr)
    }
}

/// One line typed at the shell prompt.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "watchtier", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

impl ShellLine {
    /// Parses a raw shell line.
    ///
    /// # Errors
    ///
    /// Returns the clap error (including `--help` output) or a quoting error.
    pub fn parse_line(line: &str) -> std::result::Result<Self, String> {
        let words = split_line(line)?;
        Self::try_parse_from(words).map_err(|e| e.to_string())
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search the catalog by title
    #[command(visible_alias = "s")]
    Search {
        /// Title words; empty clears the results
        query: Vec<String>,
    },

    /// Type into the search box; the search fires after the debounce interval
    Type {
        text: Vec<String>,
    },

    /// Show this week's trending movies
    Trending {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show popular movies of a genre (name or id)
    Genre {
        genre: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Next page of the current listing
    Next,

    /// Previous page of the current listing
    Prev,

    /// Show a movie's details and recommendations
    Detail {
        /// Movie id or title
        reference: String,
    },

    /// Add a movie to the unranked pool
    Add { reference: String },

    /// Remove a movie from the unranked pool
    Remove { reference: String },

    /// Place a movie in a tier, or take it out if it is already there
    Rank { reference: String, tier: TierId },

    /// Move a ranked movie back to the pool
    Unrank { reference: String },

    /// Drag a movie onto a tier, the pool, or in front of another movie
    Move {
        reference: String,
        /// Tier label (S, A, B, C, D) or `pool`
        #[arg(long, value_name = "TIER|pool")]
        to: Option<MoveTarget>,
        /// Drop onto this movie's position instead
        #[arg(long, value_name = "MOVIE", conflicts_with = "to")]
        before: Option<String>,
    },

    /// Show the tier list
    #[command(visible_alias = "b")]
    Board,

    /// Show the discover listing
    Discover,

    /// Move every ranked movie back to the pool
    ResetTiers,

    /// Clear the pool, the tiers and all results
    ResetAll,

    /// Write the board to a text file
    Export {
        /// File name without extension
        #[arg(short, long)]
        name: Option<String>,
        /// Directory to write into
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Start the interactive shell
    Shell,

    /// Leave the interactive shell
    #[command(visible_alias = "exit")]
    Quit,
}

/// Destination of a `move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    Tier(TierId),
    Pool,
}

impl FromStr for MoveTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("pool") {
            return Ok(Self::Pool);
        }
        s.parse().map(Self::Tier)
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tier(tier) => write!(f, "{tier}"),
            Self::Pool => f.write_str("pool"),
        }
    }
}

/// Splits a shell line into words, honoring single and double quotes.
///
/// # Errors
///
/// Returns an error for an unterminated quote.
pub fn split_line(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
