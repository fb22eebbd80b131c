use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_LABEL: &str = "Unknown Card";
pub const DEFAULT_DESCRIPTION: &str = "No description";
pub const DEFAULT_ICON: &str = "fa-star";

/// A reputation card offered by the host.
///
/// Every field is optional on the wire. A missing or malformed value decodes to
/// `None` and the accessors fall back to display defaults, so one bad field
/// never costs the rest of the card (or the catalog). The typed fields are for
/// display only; what goes back to the host is [`Card::wire_value`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Card {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub reputation: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<u64>,
    /// Host fields the surface does not interpret; echoed back in `giveCard`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// The entry exactly as the host sent it, when the card came off the wire
    #[serde(skip)]
    pub raw: Option<Value>,
}

impl Card {
    pub fn new(label: impl Into<String>, reputation: u64) -> Self {
        Self {
            label: Some(label.into()),
            reputation: Some(reputation),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Decode one catalog entry. Anything that isn't an object becomes an
    /// all-defaults card rather than an error.
    pub fn from_value(value: Value) -> Self {
        let mut card: Card = serde_json::from_value(value.clone()).unwrap_or_default();
        card.raw = Some(value);
        card
    }

    /// JSON to hand back to the host: the received entry untouched, or the
    /// typed fields for cards built locally
    pub fn wire_value(&self) -> Result<Value, serde_json::Error> {
        match &self.raw {
            Some(raw) => Ok(raw.clone()),
            None => serde_json::to_value(self),
        }
    }

    pub fn label_or_default(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn icon_or_default(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_ICON)
    }

    /// Label with control characters stripped, safe to paint on a terminal
    pub fn display_label(&self) -> String {
        sanitize(self.label_or_default())
    }

    pub fn display_description(&self) -> String {
        sanitize(self.description_or_default())
    }

    pub fn reputation_or_default(&self) -> u64 {
        self.reputation.unwrap_or(0)
    }

    /// Stack size; zero reads as a single card
    pub fn stack_size(&self) -> u64 {
        self.quantity.filter(|&q| q > 0).unwrap_or(1)
    }

    /// "3x" style indicator, only for stacks larger than one
    pub fn stack_badge(&self) -> Option<String> {
        let size = self.stack_size();
        if size > 1 {
            Some(format!("{}x", size))
        } else {
            None
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (+{} rep)",
            self.display_label(),
            self.reputation_or_default()
        )
    }
}

/// Aggregate numbers shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(default, deserialize_with = "lenient_total")]
    pub available: u64,
    #[serde(default, rename = "totalRep", deserialize_with = "lenient_total")]
    pub total_rep: u64,
}

impl PlayerStats {
    pub fn new(available: u64, total_rep: u64) -> Self {
        Self {
            available,
            total_rep,
        }
    }

    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Drop control characters (escape sequences included) from host text.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

fn count_from(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from(&value))
}

fn lenient_total<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from(&value).unwrap_or(0))
}

/// `cards` field of a show message: absent, null or not-an-array all mean "no catalog"
pub(crate) fn lenient_cards<'de, D>(deserializer: D) -> Result<Option<Vec<Card>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items.into_iter().map(Card::from_value).collect()),
        _ => None,
    })
}

pub(crate) fn lenient_stats<'de, D>(deserializer: D) -> Result<Option<PlayerStats>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => Some(PlayerStats::from_value(value)),
        _ => None,
    })
}
