use chrono::{
    NaiveDateTime,
    Timelike,
};

use crate::cards::{
    Orientation,
    TarotCard,
};

const TIME_TEMPLATES: [&str; 5] = [
    "今日{}",
    "在这个{}时分",
    "当{}的阳光洒下",
    "在{}的宁静中",
    "随着{}的到来",
];

const TIME_TEMPLATES_EN: [&str; 5] = [
    "This {}",
    "At this {} hour",
    "As the {} light pours down",
    "In the calm of the {}",
    "With the arrival of the {}",
];

const CARD_TEMPLATES: [&str; 5] = [
    "{}为您指引方向",
    "{}昭示着重要时刻",
    "{}带来深刻启示",
    "{}提醒您关注内心",
    "{}为您点亮前路",
];

const CARD_TEMPLATES_EN: [&str; 5] = [
    "{} points the way for you",
    "{} heralds an important moment",
    "{} brings profound revelation",
    "{} reminds you to look inward",
    "{} lights the road ahead",
];

const ENERGY_TEMPLATES: [&str; 5] = [
    "{}的能量围绕着您",
    "{}的力量在您身边流动",
    "{}的智慧指引着您",
    "{}的启示正在显现",
    "{}的振动与您共鸣",
];

const ENERGY_TEMPLATES_EN: [&str; 5] = [
    "the energy of {} surrounds you",
    "the power of {} flows around you",
    "the wisdom of {} guides you",
    "the insight of {} is taking shape",
    "the vibration of {} resonates with you",
];

const ADVICE_PHRASES: [&str; 8] = [
    "建议保持开放的心态面对挑战",
    "相信直觉的指引，勇敢前行",
    "这是反思和行动并重的一天",
    "宜静心思考，为未来做好准备",
    "保持平衡，迎接新的机遇",
    "倾听内心的声音，做出明智选择",
    "专注于当下，珍惜每个瞬间",
    "释放过去的束缚，拥抱新的开始",
];

const ADVICE_PHRASES_EN: [&str; 8] = [
    "keep an open mind toward every challenge",
    "trust your intuition and move forward bravely",
    "this is a day for both reflection and action",
    "think quietly and prepare for what comes next",
    "stay balanced and welcome new opportunities",
    "listen to your inner voice and choose wisely",
    "focus on the present and treasure every moment",
    "release old bindings and embrace a new beginning",
];

const BLESSING_PHRASES: [&str; 8] = [
    "愿您今日充满智慧与力量",
    "愿好运与您同行",
    "愿您找到内心的平静",
    "愿您收获意想不到的惊喜",
    "愿您勇敢面对一切挑战",
    "愿您的心灵得到滋养",
    "愿您的前路充满光明",
    "愿您实现心中的愿望",
];

const BLESSING_PHRASES_EN: [&str; 8] = [
    "May wisdom and strength fill your day",
    "May good fortune walk with you",
    "May you find peace within",
    "May unexpected delights come your way",
    "May you face every challenge with courage",
    "May your spirit be nourished",
    "May your road ahead be bright",
    "May your heart's wish come true",
];

fn time_of_day(hour: u32) -> (&'static str, &'static str) {
    if hour < 6 {
        ("凌晨", "early morning")
    } else if hour < 12 {
        ("上午", "morning")
    } else if hour < 18 {
        ("下午", "afternoon")
    } else {
        ("晚上", "evening")
    }
}

fn fill(template: &str, value: &str) -> String {
    template.replacen("{}", value, 1)
}

/// Assembles the zh/en daily-fortune pair for a drawn card.
///
/// The phrase selection mixes the address's summed character codes, the
/// seconds-of-day, and the caller-supplied millisecond timestamp, so repeated
/// calls in the same second can still differ. This is presentation flavor, not
/// part of the deterministic card pick.
pub fn fortune_for(
    card: &TarotCard,
    orientation: Orientation,
    address: &str,
    at: NaiveDateTime,
    epoch_millis: i64,
) -> (String, String) {
    let (tod, tod_en) = time_of_day(at.hour());
    let text = card.text(orientation);
    let keywords = text.keywords.iter().take(2).copied().collect::<Vec<_>>();
    let keywords_en = text
        .keywords_en
        .iter()
        .take(2)
        .copied()
        .collect::<Vec<_>>();

    let address_sum: i64 = address.chars().map(|c| c as u32 as i64).sum();
    let time_sum = i64::from(at.hour() * 3600 + at.minute() * 60 + at.second()) % 1000;
    let seed = ((address_sum + time_sum + epoch_millis) % 10_000) as usize;

    let card_label = format!("{}{}", card.name, orientation.label());
    let card_label_en = format!("{} ({})", card.name_en, orientation.label_en());

    let time_part = fill(TIME_TEMPLATES[seed % 5], tod);
    let card_part = fill(CARD_TEMPLATES[(seed + 7) % 5], &card_label);
    let energy_part = fill(ENERGY_TEMPLATES[(seed + 13) % 5], &keywords.join("、"));
    let advice_part = ADVICE_PHRASES[(seed + 19) % 8];

    let time_part_en = fill(TIME_TEMPLATES_EN[seed % 5], tod_en);
    let card_part_en = fill(CARD_TEMPLATES_EN[(seed + 7) % 5], &card_label_en);
    let energy_part_en = fill(
        ENERGY_TEMPLATES_EN[(seed + 13) % 5],
        &keywords_en.join(", "),
    );
    let advice_part_en = ADVICE_PHRASES_EN[(seed + 19) % 8];

    let mut fortune = format!("{time_part}，{card_part}。{energy_part}，{advice_part}。");
    let mut fortune_en =
        format!("{time_part_en}, {card_part_en}. {energy_part_en}, {advice_part_en}.");

    if (seed + 29) % 3 == 0 {
        let blessing = BLESSING_PHRASES[(seed + 23) % 8];
        let blessing_en = BLESSING_PHRASES_EN[(seed + 23) % 8];
        fortune.push_str(&format!(" {blessing}。"));
        fortune_en.push_str(&format!(" {blessing_en}."));
    }

    (fortune, fortune_en)
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::cards::MAJOR_ARCANA;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 25)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn fortune_for__same_inputs_same_output() {
        // given
        let card = &MAJOR_ARCANA[5];

        // when
        let first = fortune_for(card, Orientation::Reversed, "0xFEED", noon(), 1_234_567);
        let second = fortune_for(card, Orientation::Reversed, "0xFEED", noon(), 1_234_567);

        // then
        assert_eq!(first, second);
    }

    #[test]
    fn fortune_for__mentions_card_and_orientation() {
        // given
        let card = &MAJOR_ARCANA[0];

        // when
        let (zh, en) = fortune_for(card, Orientation::Upright, "0xFEED", noon(), 42);

        // then
        assert!(zh.contains("愚者正位"));
        assert!(en.contains("The Fool (Upright)"));
    }

    #[test]
    fn fortune_for__blessing_tracks_seed_residue() {
        // given: address sum 97 + seconds-of-day residue 200, so millis 3 gives
        // seed 300 (no blessing, 329 % 3 != 0) and millis 4 gives seed 301
        // (blessing, 330 % 3 == 0)
        let card = &MAJOR_ARCANA[10];
        let address = "a";

        // when
        let (zh_no, _) = fortune_for(card, Orientation::Upright, address, noon(), 3);
        let (zh_yes, _) = fortune_for(card, Orientation::Upright, address, noon(), 4);

        // then
        assert_eq!(zh_no.matches('。').count(), 2);
        assert_eq!(zh_yes.matches('。').count(), 3);
    }

    #[test]
    fn time_of_day__boundaries() {
        assert_eq!(time_of_day(0).0, "凌晨");
        assert_eq!(time_of_day(5).0, "凌晨");
        assert_eq!(time_of_day(6).0, "上午");
        assert_eq!(time_of_day(11).0, "上午");
        assert_eq!(time_of_day(12).0, "下午");
        assert_eq!(time_of_day(17).0, "下午");
        assert_eq!(time_of_day(18).0, "晚上");
        assert_eq!(time_of_day(23).0, "晚上");
    }
}
