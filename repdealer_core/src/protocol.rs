//! Host ↔ surface message contract.
//!
//! Inbound messages are JSON objects discriminated by `type`. Outbound messages
//! are an action name plus a JSON body; nothing the host answers is parsed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::card::{self, Card, PlayerStats};
use crate::error::ProtocolError;

/// Messages from the host
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Inbound {
    /// Populate and reveal the surface
    #[serde(rename = "SHOW_UI")]
    Show {
        #[serde(default, deserialize_with = "card::lenient_cards")]
        cards: Option<Vec<Card>>,
        #[serde(default, deserialize_with = "card::lenient_stats")]
        stats: Option<PlayerStats>,
    },
    /// Hide the surface and drop the session
    #[serde(rename = "CLOSE_UI")]
    Close,
    /// Toggle the loading indicator only
    #[serde(rename = "LOADING")]
    Loading {
        #[serde(default, deserialize_with = "lenient_flag")]
        show: bool,
    },
    /// Any `type` this surface doesn't know; ignored
    #[serde(other)]
    Unknown,
}

impl Inbound {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(line)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Inbound::Show { .. } => "SHOW_UI",
            Inbound::Close => "CLOSE_UI",
            Inbound::Loading { .. } => "LOADING",
            Inbound::Unknown => "unknown",
        }
    }
}

/// Messages to the host. Fire-and-forget.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Close,
    GiveCard { card_index: usize, card_data: Card },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GiveCardBody {
    card_index: usize,
    card_data: Value,
}

impl Outbound {
    pub fn action(&self) -> &'static str {
        match self {
            Outbound::Close => "close",
            Outbound::GiveCard { .. } => "giveCard",
        }
    }

    pub fn body(&self) -> Result<Value, serde_json::Error> {
        match self {
            Outbound::Close => Ok(Value::Object(Default::default())),
            Outbound::GiveCard {
                card_index,
                card_data,
            } => serde_json::to_value(GiveCardBody {
                card_index: *card_index,
                card_data: card_data.wire_value()?,
            }),
        }
    }

    /// Callback address the host registers for this action
    pub fn endpoint(&self, resource: &str) -> String {
        format!("https://{}/{}", resource, self.action())
    }

    pub fn envelope(&self) -> Result<Envelope, serde_json::Error> {
        Ok(Envelope {
            action: self.action().to_string(),
            body: self.body()?,
        })
    }
}

/// Wire form of an outbound message for line-oriented links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub action: String,
    pub body: Value,
}

impl Envelope {
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}
