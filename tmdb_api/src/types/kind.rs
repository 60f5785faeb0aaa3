use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two browsable content kinds. The string form is the TMDB path segment.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" | "movies" => Ok(MediaKind::Movie),
            "tv" | "series" => Ok(MediaKind::Tv),
            _ => Err(()),
        }
    }
}

/// Target of a `/search/*` request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    Multi,
    Movie,
    Tv,
    Person,
}

impl std::fmt::Display for SearchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SearchScope::Multi => "multi",
                SearchScope::Movie => "movie",
                SearchScope::Tv => "tv",
                SearchScope::Person => "person",
            }
        )?;
        Ok(())
    }
}

impl FromStr for SearchScope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multi" => Ok(SearchScope::Multi),
            "movie" | "movies" => Ok(SearchScope::Movie),
            "tv" | "series" => Ok(SearchScope::Tv),
            "person" | "persons" => Ok(SearchScope::Person),
            _ => Err(()),
        }
    }
}
