use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Serving state shared by campaigns, ad groups, ads and keywords.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Enabled,
    Paused,
    Removed,
}

impl EntityStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityStatus::Enabled => "ENABLED",
            EntityStatus::Paused => "PAUSED",
            EntityStatus::Removed => "REMOVED",
        }
    }
}

impl Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENABLED" => Ok(EntityStatus::Enabled),
            "PAUSED" => Ok(EntityStatus::Paused),
            "REMOVED" => Ok(EntityStatus::Removed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignType {
    Search,
    Display,
    Shopping,
    Video,
}

impl CampaignType {
    pub const fn as_str(self) -> &'static str {
        match self {
            CampaignType::Search => "SEARCH",
            CampaignType::Display => "DISPLAY",
            CampaignType::Shopping => "SHOPPING",
            CampaignType::Video => "VIDEO",
        }
    }
}

impl Display for CampaignType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CampaignType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SEARCH" => Ok(CampaignType::Search),
            "DISPLAY" => Ok(CampaignType::Display),
            "SHOPPING" => Ok(CampaignType::Shopping),
            "VIDEO" => Ok(CampaignType::Video),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown campaign type: {other}"
            ))),
        }
    }
}

/// A campaign of a linked account. `remote_id` is the Google-side id and is
/// stable across syncs, unlike the local `id`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: i32,
    pub account_id: i32,
    pub remote_id: i64,
    pub name: String,
    pub campaign_type: CampaignType,
    pub status: EntityStatus,
    pub daily_budget_micros: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCampaign {
    pub remote_id: i64,
    pub name: String,
    pub campaign_type: CampaignType,
    pub status: EntityStatus,
    pub daily_budget_micros: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl NewCampaign {
    #[must_use]
    pub fn new(
        remote_id: i64,
        name: String,
        campaign_type: CampaignType,
        status: EntityStatus,
        daily_budget_micros: i64,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            remote_id,
            name: name.trim().to_string(),
            campaign_type,
            status,
            daily_budget_micros: daily_budget_micros.max(0),
            start_date,
            end_date,
        }
    }
}
