use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{
    Deserialize,
    Serialize,
};

use crate::cards::card_by_id;
use crate::config::AppConfig;
use crate::reading::Reading;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// ERC-721 style metadata document, shaped exactly like the payload the mint
/// contract receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<Attribute>,
}

fn attribute(trait_type: &str, value: impl Into<String>) -> Attribute {
    Attribute {
        trait_type: trait_type.to_string(),
        value: value.into(),
    }
}

pub fn metadata_for(reading: &Reading, config: &AppConfig) -> NftMetadata {
    let (keywords, keywords_en) = card_by_id(reading.card.id)
        .map(|card| {
            let text = card.text(reading.orientation);
            (text.keywords.join(", "), text.keywords_en.join(", "))
        })
        .unwrap_or_default();

    NftMetadata {
        name: format!("{} - {}", reading.card.name, reading.card.name_en),
        description: format!(
            "塔罗牌占卜结果 / Tarot Reading Result\n\n卡牌含义 / Card Meaning:\n{}\n\n{}\n\n今日运势 / Today's Fortune:\n{}\n\n{}",
            reading.interpretation,
            reading.interpretation_en,
            reading.fortune,
            reading.fortune_en
        ),
        image: config.image_url(&reading.card.image),
        attributes: vec![
            attribute("Card Name (Chinese)", reading.card.name.clone()),
            attribute("Card Name (English)", reading.card.name_en.clone()),
            attribute("Position", reading.orientation.label_en()),
            attribute("Keywords", keywords),
            attribute("Keywords (English)", keywords_en),
            attribute("Date", reading.date.clone()),
            attribute("Wallet Address", reading.wallet_address.clone()),
        ],
    }
}

/// Encodes the metadata as a `data:application/json;base64,` URI.
pub fn token_uri(metadata: &NftMetadata) -> crate::Result<String> {
    let json = serde_json::to_string(metadata).context("serializing nft metadata")?;
    Ok(format!(
        "data:application/json;base64,{}",
        STANDARD.encode(json)
    ))
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

    #[test]
    fn metadata_for__bilingual_name_and_attributes() {
        // when
        let metadata = metadata_for(&reading(), &AppConfig::default());

        // then
        assert_eq!(metadata.name, "教皇 - The Hierophant");
        assert_eq!(metadata.image, "https://your-domain.com/irys/教皇.png");
        let position = metadata
            .attributes
            .iter()
            .find(|a| a.trait_type == "Position")
            .unwrap();
        assert_eq!(position.value, "Reversed");
        let wallet = metadata
            .attributes
            .iter()
            .find(|a| a.trait_type == "Wallet Address")
            .unwrap();
        assert_eq!(wallet.value, "0xABCDEF0123456789");
    }

    #[test]
    fn token_uri__base64_payload_decodes_back_to_metadata() {
        // given
        let metadata = metadata_for(&reading(), &AppConfig::default());

        // when
        let uri = token_uri(&metadata).unwrap();

        // then
        let payload = uri.strip_prefix("data:application/json;base64,").unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        let restored: NftMetadata = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(restored, metadata);
    }
}
