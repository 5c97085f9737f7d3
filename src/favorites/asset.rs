use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Asset categories a user can favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Chart,
    Insight,
    Audience,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Chart, AssetKind::Insight, AssetKind::Audience];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Chart => "chart",
            AssetKind::Insight => "insight",
            AssetKind::Audience => "audience",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chart" => Ok(AssetKind::Chart),
            "insight" => Ok(AssetKind::Insight),
            "audience" => Ok(AssetKind::Audience),
            other => Err(AssetError::InvalidAssetKind(Some(other.to_string()))),
        }
    }
}

/// Errors produced while decoding an untyped payload into an [`Asset`]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssetError {
    #[error("Invalid asset format: {0}")]
    InvalidEnvelope(String),

    #[error("Invalid asset type: {}", .0.as_deref().unwrap_or("<missing>"))]
    InvalidAssetKind(Option<String>),

    #[error("Invalid {kind} format: {reason}")]
    MalformedAsset { kind: AssetKind, reason: String },
}

/// Shared read/write view over every asset variant.
///
/// `id` and `kind` are fixed at creation; only the description may change.
pub trait FavoriteAsset {
    fn id(&self) -> &str;
    fn kind(&self) -> AssetKind;
    fn description(&self) -> &str;
    fn set_description(&mut self, description: String);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub title: String,
    pub axes_titles: Vec<String>,
    pub data: Vec<i64>,
}

/// Marker variant: carries only the common fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audience {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub gender: String,
    pub birth_country: String,
    pub age_group: String,
    pub hours_online: i64,
    pub purchases: i64,
}

/// An explicit `null` description reads the same as an absent one
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! impl_favorite_asset {
    ($ty:ty, $kind:expr) => {
        impl FavoriteAsset for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn kind(&self) -> AssetKind {
                $kind
            }

            fn description(&self) -> &str {
                &self.description
            }

            fn set_description(&mut self, description: String) {
                self.description = description;
            }
        }
    };
}

impl_favorite_asset!(Chart, AssetKind::Chart);
impl_favorite_asset!(Insight, AssetKind::Insight);
impl_favorite_asset!(Audience, AssetKind::Audience);

/// A favorited asset of one of the three known kinds.
///
/// Serializes to the flat payload form, `type` tag included. Deserialization
/// goes through [`Asset::from_value`] so that a bad discriminator and a bad
/// variant body produce distinct errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", try_from = "Value")]
pub enum Asset {
    Chart(Chart),
    Insight(Insight),
    Audience(Audience),
}

/// Common fields read before the variant is known. Only `type` is used;
/// `id` and `description` are decoded to check their shape.
#[derive(Debug, Deserialize)]
struct AssetEnvelope {
    #[serde(rename = "id", default)]
    _id: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(rename = "description", default)]
    _description: Option<String>,
}

impl Asset {
    /// Decode an untyped payload: read the envelope for the discriminator, then
    /// decode the whole payload against that variant's schema.
    pub fn from_value(payload: Value) -> Result<Self, AssetError> {
        let envelope = AssetEnvelope::deserialize(&payload)
            .map_err(|e| AssetError::InvalidEnvelope(e.to_string()))?;

        let kind = match envelope.kind {
            Some(raw) => raw.parse::<AssetKind>()?,
            None => return Err(AssetError::InvalidAssetKind(None)),
        };

        let malformed = |e: serde_json::Error| AssetError::MalformedAsset {
            kind,
            reason: e.to_string(),
        };

        match kind {
            AssetKind::Chart => serde_json::from_value(payload).map(Asset::Chart).map_err(malformed),
            AssetKind::Insight => serde_json::from_value(payload).map(Asset::Insight).map_err(malformed),
            AssetKind::Audience => serde_json::from_value(payload).map(Asset::Audience).map_err(malformed),
        }
    }

    fn inner(&self) -> &dyn FavoriteAsset {
        match self {
            Asset::Chart(chart) => chart,
            Asset::Insight(insight) => insight,
            Asset::Audience(audience) => audience,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn FavoriteAsset {
        match self {
            Asset::Chart(chart) => chart,
            Asset::Insight(insight) => insight,
            Asset::Audience(audience) => audience,
        }
    }
}

impl TryFrom<Value> for Asset {
    type Error = AssetError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Asset::from_value(value)
    }
}

impl FavoriteAsset for Asset {
    fn id(&self) -> &str {
        self.inner().id()
    }

    fn kind(&self) -> AssetKind {
        self.inner().kind()
    }

    fn description(&self) -> &str {
        self.inner().description()
    }

    fn set_description(&mut self, description: String) {
        self.inner_mut().set_description(description);
    }
}

impl From<Chart> for Asset {
    fn from(chart: Chart) -> Self {
        Asset::Chart(chart)
    }
}

impl From<Insight> for Asset {
    fn from(insight: Insight) -> Self {
        Asset::Insight(insight)
    }
}

impl From<Audience> for Asset {
    fn from(audience: Audience) -> Self {
        Asset::Audience(audience)
    }
}
