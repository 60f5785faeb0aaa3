use std::str::FromStr;

use url::Url;

use crate::types::MediaKind;

use super::{common::QueryCommon, Query};

/// Query for `/discover/{movie,tv}`: the only provider endpoint that can filter
/// by genre and sort server-side.
#[derive(Clone, Debug)]
pub struct DiscoverQuery {
    pub common: QueryCommon,
    pub kind: MediaKind,
    pub genre_ids: Vec<i64>,
    pub sort_by: SortBy,
    pub include_adult: bool,
}

impl DiscoverQuery {
    pub fn new(kind: MediaKind) -> Self {
        Self {
            common: QueryCommon {
                page: Some(1),
                language: None,
            },
            kind,
            genre_ids: Vec::new(),
            sort_by: SortBy::default(),
            include_adult: false,
        }
    }

    pub fn with_genre(mut self, genre_id: i64) -> Self {
        self.genre_ids.push(genre_id);
        self
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

impl Query for DiscoverQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        url.query_pairs_mut()
            .append_pair("sort_by", &self.sort_by.to_string());
        if !self.genre_ids.is_empty() {
            // Comma means AND for TMDB.
            let genres = self
                .genre_ids
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .join(",");
            url.query_pairs_mut().append_pair("with_genres", &genres);
        }
        url.query_pairs_mut()
            .append_pair("include_adult", &self.include_adult.to_string());
        url
    }
}

/// Server-side ordering for discover results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    PopularityDesc,
    PopularityAsc,
    VoteAverageDesc,
    ReleaseDateDesc,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortBy::PopularityDesc => "popularity.desc",
                SortBy::PopularityAsc => "popularity.asc",
                SortBy::VoteAverageDesc => "vote_average.desc",
                SortBy::ReleaseDateDesc => "primary_release_date.desc",
            }
        )?;
        Ok(())
    }
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" | "popularity.desc" => Ok(SortBy::PopularityDesc),
            "popularity.asc" => Ok(SortBy::PopularityAsc),
            "rating" | "vote_average.desc" => Ok(SortBy::VoteAverageDesc),
            "release" | "primary_release_date.desc" => Ok(SortBy::ReleaseDateDesc),
            _ => Err(()),
        }
    }
}
