use super::link::LinkId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Declared data type of a slot. Editors write the wildcard as `-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSlotType", into = "RawSlotType")]
pub enum SlotType {
    Any,
    Named(String),
}

impl SlotType {
    pub fn named(name: impl Into<String>) -> Self {
        SlotType::Named(name.into())
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, SlotType::Any)
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotType::Any => write!(f, "*"),
            SlotType::Named(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSlotType {
    Name(String),
    Sentinel(i64),
}

impl TryFrom<RawSlotType> for SlotType {
    type Error = String;

    fn try_from(raw: RawSlotType) -> Result<Self, Self::Error> {
        match raw {
            RawSlotType::Name(name) => Ok(SlotType::Named(name)),
            RawSlotType::Sentinel(-1) => Ok(SlotType::Any),
            RawSlotType::Sentinel(other) => Err(format!(
                "invalid slot type {}: expected a string or -1",
                other
            )),
        }
    }
}

impl From<SlotType> for RawSlotType {
    fn from(slot_type: SlotType) -> Self {
        match slot_type {
            SlotType::Any => RawSlotType::Sentinel(-1),
            SlotType::Named(name) => RawSlotType::Name(name),
        }
    }
}

/// An input slot. Holds at most one link id; the link itself lives in the
/// graph's link table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSlot {
    pub name: String,
    #[serde(rename = "type")]
    pub slot_type: SlotType,
    #[serde(default)]
    pub link: Option<LinkId>,
    /// Editor-specific keys (`widget`, `label`, `shape`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InputSlot {
    pub fn new(name: impl Into<String>, slot_type: SlotType) -> Self {
        Self {
            name: name.into(),
            slot_type,
            link: None,
            extra: Map::new(),
        }
    }
}

/// An output slot. Fans out to any number of links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSlot {
    pub name: String,
    #[serde(rename = "type")]
    pub slot_type: SlotType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<LinkId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutputSlot {
    pub fn new(name: impl Into<String>, slot_type: SlotType) -> Self {
        Self {
            name: name.into(),
            slot_type,
            links: Vec::new(),
            extra: Map::new(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LinkId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<LinkId>>::deserialize(deserializer)?.unwrap_or_default())
}
