use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single catalog entry. `name` is the unique key.
///
/// Fields beyond the ones the service reasons about (stats, generation,
/// legendary flag, ...) are carried opaquely in `attributes` and
/// serialized back flat, next to the named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub number: i64,
    pub name: String,
    pub type_one: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub type_two: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl Creature {
    pub fn new(number: i64, name: impl Into<String>, type_one: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            type_one: type_one.into(),
            type_two: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_type_two(mut self, type_two: impl Into<String>) -> Self {
        self.type_two = Some(type_two.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Looks up a field by its wire name. Named fields win over attributes.
    pub fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        match key {
            "number" => Some(Cow::Owned(Value::from(self.number))),
            "name" => Some(Cow::Owned(Value::String(self.name.clone()))),
            "type_one" => Some(Cow::Owned(Value::String(self.type_one.clone()))),
            "type_two" => self
                .type_two
                .as_ref()
                .map(|t| Cow::Owned(Value::String(t.clone()))),
            other => self.attributes.get(other).map(Cow::Borrowed),
        }
    }

    /// `wanted` must already be lowercase.
    pub fn has_type(&self, wanted: &str) -> bool {
        self.type_one.to_lowercase() == wanted
            || self
                .type_two
                .as_deref()
                .is_some_and(|t| t.to_lowercase() == wanted)
    }
}

/// A creature as it appears in one listing response.
///
/// `uuid` is a rendering key for the client, generated fresh for every
/// item of every response. It identifies nothing across requests.
#[derive(Debug, Clone, Serialize)]
pub struct DecoratedCreature {
    #[serde(flatten)]
    pub creature: Creature,
    pub is_captured: bool,
    pub uuid: Uuid,
}

impl DecoratedCreature {
    pub fn new(creature: Creature, is_captured: bool) -> Self {
        Self {
            creature,
            is_captured,
            uuid: Uuid::new_v4(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreaturePage {
    pub pokemon: Vec<DecoratedCreature>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn captured(name: &str) -> Self {
        Self {
            message: format!("{} marked as captured.", name),
        }
    }

    pub fn released(name: &str) -> Self {
        Self {
            message: format!("{} released.", name),
        }
    }
}
