use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::campaign::EntityStatus;
use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Broad,
    Phrase,
    Exact,
}

impl MatchType {
    pub const fn as_str(self) -> &'static str {
        match self {
            MatchType::Broad => "BROAD",
            MatchType::Phrase => "PHRASE",
            MatchType::Exact => "EXACT",
        }
    }
}

impl Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BROAD" => Ok(MatchType::Broad),
            "PHRASE" => Ok(MatchType::Phrase),
            "EXACT" => Ok(MatchType::Exact),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown match type: {other}"
            ))),
        }
    }
}

/// A search keyword of an ad group.
///
/// `quality_score` runs 1–10 and `search_impression_share` is a percentage;
/// both are optional because the API omits them for low-volume keywords.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyword {
    pub id: i32,
    pub ad_group_id: i32,
    pub remote_id: i64,
    pub text: String,
    pub match_type: MatchType,
    pub status: EntityStatus,
    pub bid_micros: i64,
    pub quality_score: Option<i32>,
    pub search_impression_share: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewKeyword {
    pub remote_id: i64,
    pub text: String,
    pub match_type: MatchType,
    pub status: EntityStatus,
    pub bid_micros: i64,
    pub quality_score: Option<i32>,
    pub search_impression_share: Option<f64>,
}

impl NewKeyword {
    #[must_use]
    pub fn new(
        remote_id: i64,
        text: String,
        match_type: MatchType,
        status: EntityStatus,
        bid_micros: i64,
        quality_score: Option<i32>,
        search_impression_share: Option<f64>,
    ) -> Self {
        Self {
            remote_id,
            text: text.trim().to_string(),
            match_type,
            status,
            bid_micros: bid_micros.max(0),
            quality_score: quality_score.filter(|score| (1..=10).contains(score)),
            search_impression_share: search_impression_share
                .filter(|share| (0.0..=100.0).contains(share)),
        }
    }
}
