use chrono::{
    DateTime,
    NaiveDateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::cards::{
    Orientation,
    TarotCard,
};
use crate::fortune::fortune_for;
use crate::selector::select_card;

/// The card fields a reading stores. Readings carry a snapshot rather than a
/// card id alone so persisted history stays renderable even if the deck table
/// changes shape later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSnapshot {
    pub id: u8,
    pub name: String,
    pub name_en: String,
    pub image: String,
}

impl From<&'static TarotCard> for CardSnapshot {
    fn from(card: &'static TarotCard) -> Self {
        Self {
            id: card.id,
            name: card.name.to_string(),
            name_en: card.name_en.to_string(),
            image: card.image.to_string(),
        }
    }
}

/// One completed divination. Immutable once generated; the stored JSON field
/// names match the original browser-local records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub card: CardSnapshot,
    #[serde(rename = "isReversed", with = "reversed_flag")]
    pub orientation: Orientation,
    pub interpretation: String,
    pub interpretation_en: String,
    pub fortune: String,
    pub fortune_en: String,
    /// Display date, `2026/8/25` shape.
    pub date: String,
    pub wallet_address: String,
}

impl Reading {
    /// Runs the deterministic selector for `address` at `at`, then fills in
    /// the orientation-specific interpretation and the fortune text.
    pub fn generate(address: &str, at: NaiveDateTime, epoch_millis: i64) -> Self {
        let draw = select_card(address, at);
        let text = draw.card.text(draw.orientation);
        let (fortune, fortune_en) = fortune_for(draw.card, draw.orientation, address, at, epoch_millis);
        Self {
            card: draw.card.into(),
            orientation: draw.orientation,
            interpretation: text.meaning.to_string(),
            interpretation_en: text.meaning_en.to_string(),
            fortune,
            fortune_en,
            date: at.format("%Y/%-m/%-d").to_string(),
            wallet_address: address.to_string(),
        }
    }

    /// Parses a stored reading list. Malformed input yields an empty list,
    /// never an error.
    pub fn list_from_raw(raw: &str) -> Vec<Reading> {
        serde_json::from_str(raw).unwrap_or_default()
    }
}

mod reversed_flag {
    use serde::{
        Deserialize,
        Deserializer,
        Serializer,
    };

    use crate::cards::Orientation;

    pub fn serialize<S: Serializer>(
        orientation: &Orientation,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(orientation.is_reversed())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Orientation, D::Error> {
        let reversed = bool::deserialize(deserializer)?;
        Ok(if reversed {
            Orientation::Reversed
        } else {
            Orientation::Upright
        })
    }
}

/// A [`Reading`] as it appears in the history log, annotated with a generated
/// id, the capture timestamp, and the mint transaction hash if one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(flatten)]
    pub reading: Reading,
}

pub const HISTORY_CAP: usize = 10;

/// Newest-first log of past readings, capped at [`HISTORY_CAP`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a log from stored JSON. Entries missing a `card` object or
    /// both `interpretation` and `meaning` are dropped; so is anything that
    /// fails to deserialize. Never fatal.
    pub fn from_raw_json(raw: &str) -> Self {
        let Ok(values) = serde_json::from_str::<Vec<Value>>(raw) else {
            return Self::default();
        };
        let mut entries = Vec::new();
        for value in values {
            if !is_structurally_valid(&value) {
                tracing::warn!("dropping malformed history entry");
                continue;
            }
            match serde_json::from_value::<HistoryEntry>(value) {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    tracing::warn!(%error, "dropping undecodable history entry");
                }
            }
        }
        entries.truncate(HISTORY_CAP);
        Self { entries }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Prepends an entry, evicting the oldest once the cap is exceeded.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAP);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_structurally_valid(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let has_card = object.get("card").is_some_and(Value::is_object);
    let has_text = object.contains_key("interpretation") || object.contains_key("meaning");
    has_card && has_text
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn reading() -> Reading {
        let at = NaiveDate::from_ymd_opt(2026, 8, 25)
            .unwrap()
            .and_hms_opt(0, 0, 12)
            .unwrap();
        Reading::generate("0xABCDEF0123456789", at, 0)
    }

    fn entry(id: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            timestamp: Utc::now(),
            transaction_hash: None,
            reading: reading(),
        }
    }

    #[test]
    fn generate__hierophant_scenario_uses_reversed_meaning() {
        // when
        let reading = reading();

        // then
        assert_eq!(reading.card.id, 5);
        assert_eq!(reading.orientation, Orientation::Reversed);
        assert_eq!(
            reading.interpretation,
            "可能挑战传统观念，寻求个人独特的信仰道路。"
        );
        assert_eq!(
            reading.interpretation_en,
            "May challenge traditional beliefs, seek personal unique spiritual path."
        );
        assert_eq!(reading.date, "2026/8/25");
    }

    #[test]
    fn reading__serializes_with_original_field_names() {
        // when
        let json = serde_json::to_value(reading()).unwrap();

        // then
        assert_eq!(json["isReversed"], Value::Bool(true));
        assert_eq!(json["walletAddress"], "0xABCDEF0123456789");
        assert_eq!(json["card"]["nameEn"], "The Hierophant");
        assert!(json["interpretationEn"].is_string());
    }

    #[test]
    fn reading__round_trips_through_json() {
        // given
        let original = reading();

        // when
        let json = serde_json::to_string(&original).unwrap();
        let restored: Reading = serde_json::from_str(&json).unwrap();

        // then
        assert_eq!(restored, original);
    }

    #[test]
    fn record__caps_at_ten_newest_first() {
        // given
        let mut log = HistoryLog::new();

        // when
        for i in 0..11 {
            log.record(entry(&i.to_string()));
        }

        // then
        assert_eq!(log.len(), 10);
        assert_eq!(log.entries()[0].id, "10");
        assert_eq!(log.entries()[9].id, "1");
    }

    #[test]
    fn from_raw_json__malformed_input_yields_empty_log() {
        assert!(HistoryLog::from_raw_json("not json").is_empty());
        assert!(HistoryLog::from_raw_json("{\"not\":\"a list\"}").is_empty());
    }

    #[test]
    fn from_raw_json__drops_entries_without_card_or_text() {
        // given one valid entry, one without a card, one without text
        let valid = serde_json::to_value(entry("keep")).unwrap();
        let no_card = serde_json::json!({"id": "x", "interpretation": "text"});
        let no_text = serde_json::json!({"id": "y", "card": {"id": 0}});
        let raw = serde_json::to_string(&vec![valid, no_card, no_text]).unwrap();

        // when
        let log = HistoryLog::from_raw_json(&raw);

        // then
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].id, "keep");
    }

    #[test]
    fn from_raw_json__undecodable_legacy_entry_is_dropped() {
        // given an entry that passes the structural check but cannot decode
        let legacy = serde_json::json!([{"card": {"id": 0}, "meaning": "old shape"}]);

        // when
        let log = HistoryLog::from_raw_json(&legacy.to_string());

        // then
        assert!(log.is_empty());
    }

    #[test]
    fn list_from_raw__malformed_input_yields_empty_list() {
        assert!(Reading::list_from_raw("garbage").is_empty());
    }
}
