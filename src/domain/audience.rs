use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::campaign::EntityStatus;
use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudienceType {
    Remarketing,
    Similar,
    Affinity,
    Demographic,
    Custom,
}

impl AudienceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            AudienceType::Remarketing => "REMARKETING",
            AudienceType::Similar => "SIMILAR",
            AudienceType::Affinity => "AFFINITY",
            AudienceType::Demographic => "DEMOGRAPHIC",
            AudienceType::Custom => "CUSTOM",
        }
    }
}

impl Display for AudienceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AudienceType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REMARKETING" => Ok(AudienceType::Remarketing),
            "SIMILAR" => Ok(AudienceType::Similar),
            "AFFINITY" => Ok(AudienceType::Affinity),
            "DEMOGRAPHIC" => Ok(AudienceType::Demographic),
            "CUSTOM" => Ok(AudienceType::Custom),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown audience type: {other}"
            ))),
        }
    }
}

/// Whether the segment restricts serving or only collects bid data.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetingMode {
    Targeting,
    Observation,
}

impl TargetingMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            TargetingMode::Targeting => "TARGETING",
            TargetingMode::Observation => "OBSERVATION",
        }
    }
}

impl Display for TargetingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetingMode {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TARGETING" => Ok(TargetingMode::Targeting),
            "OBSERVATION" => Ok(TargetingMode::Observation),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown targeting mode: {other}"
            ))),
        }
    }
}

/// An audience segment attached to a campaign.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Audience {
    pub id: i32,
    pub campaign_id: i32,
    pub remote_id: i64,
    pub name: String,
    pub audience_type: AudienceType,
    pub targeting_mode: TargetingMode,
    pub status: EntityStatus,
    /// Signed adjustment in percent, e.g. `25` or `-10`.
    pub bid_adjustment_percent: i32,
    /// Coarse membership bucket as reported by the API, e.g. `"50K - 100K"`.
    pub size_range: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAudience {
    pub remote_id: i64,
    pub name: String,
    pub audience_type: AudienceType,
    pub targeting_mode: TargetingMode,
    pub status: EntityStatus,
    pub bid_adjustment_percent: i32,
    pub size_range: String,
}

impl NewAudience {
    #[must_use]
    pub fn new(
        remote_id: i64,
        name: String,
        audience_type: AudienceType,
        targeting_mode: TargetingMode,
        status: EntityStatus,
        bid_adjustment_percent: i32,
        size_range: String,
    ) -> Self {
        Self {
            remote_id,
            name: name.trim().to_string(),
            audience_type,
            targeting_mode,
            status,
            // Bid adjustments outside -90%..+900% are not expressible in the
            // ads platform.
            bid_adjustment_percent: bid_adjustment_percent.clamp(-90, 900),
            size_range: size_range.trim().to_string(),
        }
    }
}
