use serde::{
    Deserialize,
    Serialize,
};

/// Upright or reversed state of a drawn card. Each side carries its own
/// keyword and meaning text.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn is_reversed(self) -> bool {
        matches!(self, Orientation::Reversed)
    }

    pub fn label(self) -> &'static str {
        match self {
            Orientation::Upright => "正位",
            Orientation::Reversed => "逆位",
        }
    }

    pub fn label_en(self) -> &'static str {
        match self {
            Orientation::Upright => "Upright",
            Orientation::Reversed => "Reversed",
        }
    }
}

/// Orientation-specific text for one card.
#[derive(PartialEq, Eq, Debug)]
pub struct OrientationText {
    pub keywords: &'static [&'static str],
    pub keywords_en: &'static [&'static str],
    pub meaning: &'static str,
    pub meaning_en: &'static str,
}

/// One of the 22 Major Arcana. All instances are compile-time constants in
/// [`MAJOR_ARCANA`]; nothing creates or mutates cards at runtime.
#[derive(PartialEq, Eq, Debug)]
pub struct TarotCard {
    pub id: u8,
    pub name: &'static str,
    pub name_en: &'static str,
    pub upright: OrientationText,
    pub reversed: OrientationText,
    pub image: &'static str,
}

impl TarotCard {
    pub fn text(&self, orientation: Orientation) -> &OrientationText {
        match orientation {
            Orientation::Upright => &self.upright,
            Orientation::Reversed => &self.reversed,
        }
    }
}

pub fn card_by_id(id: u8) -> Option<&'static TarotCard> {
    MAJOR_ARCANA.get(id as usize)
}

pub const MAJOR_ARCANA: [TarotCard; 22] = [
    TarotCard {
        id: 0,
        name: "愚者",
        name_en: "The Fool",
        upright: OrientationText {
            keywords: &["新开始", "冒险", "纯真", "自由"],
            keywords_en: &["New Beginnings", "Adventure", "Innocence", "Freedom"],
            meaning: "代表新的开始和无限可能，保持开放的心态迎接新挑战。",
            meaning_en: "Represents new beginnings and infinite possibilities, maintaining an open mind to embrace new challenges.",
        },
        reversed: OrientationText {
            keywords: &["鲁莽", "愚蠢", "缺乏计划"],
            keywords_en: &["Recklessness", "Foolishness", "Lack of Planning"],
            meaning: "警告不要过于冲动，需要更谨慎地思考和规划。",
            meaning_en: "Warns against being too impulsive, requiring more careful thinking and planning.",
        },
        image: "/irys/愚人.png",
    },
    TarotCard {
        id: 1,
        name: "魔术师",
        name_en: "The Magician",
        upright: OrientationText {
            keywords: &["技能", "意志力", "专注", "创造"],
            keywords_en: &["Skill", "Willpower", "Focus", "Creation"],
            meaning: "拥有实现目标的能力和资源，专注于自己的意图。",
            meaning_en: "Possesses the ability and resources to achieve goals, focusing on one's intentions.",
        },
        reversed: OrientationText {
            keywords: &["操纵", "欺骗", "缺乏技能"],
            keywords_en: &["Manipulation", "Deception", "Lack of Skill"],
            meaning: "可能存在欺骗或滥用权力，需要诚实面对自己。",
            meaning_en: "May involve deception or abuse of power, requiring honesty with oneself.",
        },
        image: "/irys/魔术师.png",
    },
    TarotCard {
        id: 2,
        name: "女祭司",
        name_en: "The High Priestess",
        upright: OrientationText {
            keywords: &["直觉", "神秘", "潜意识", "智慧"],
            keywords_en: &["Intuition", "Mystery", "Subconscious", "Wisdom"],
            meaning: "倾听内心的声音，相信直觉的指引，探索内在的智慧。",
            meaning_en: "Listen to your inner voice, trust intuitive guidance, and explore inner wisdom.",
        },
        reversed: OrientationText {
            keywords: &["缺乏直觉", "秘密", "内在冲突"],
            keywords_en: &["Lack of Intuition", "Secrets", "Inner Conflict"],
            meaning: "可能忽视了内在的声音，需要重新连接自己的直觉。",
            meaning_en: "May have ignored inner voice, need to reconnect with intuition.",
        },
        image: "/irys/女祭司.png",
    },
    TarotCard {
        id: 3,
        name: "女皇",
        name_en: "The Empress",
        upright: OrientationText {
            keywords: &["丰盛", "母性", "创造力", "自然"],
            keywords_en: &["Abundance", "Motherhood", "Creativity", "Nature"],
            meaning: "代表丰盛和创造力，享受生活的美好，孕育新的可能性。",
            meaning_en: "Represents abundance and creativity, enjoying life's beauty, nurturing new possibilities.",
        },
        reversed: OrientationText {
            keywords: &["依赖", "缺乏创造力", "过度保护"],
            keywords_en: &["Dependency", "Lack of Creativity", "Overprotection"],
            meaning: "可能过于依赖他人或缺乏创造力，需要重新找到平衡。",
            meaning_en: "May be overly dependent or lack creativity, need to find balance again.",
        },
        image: "/irys/女皇.png",
    },
    TarotCard {
        id: 4,
        name: "皇帝",
        name_en: "The Emperor",
        upright: OrientationText {
            keywords: &["权威", "秩序", "领导力", "稳定"],
            keywords_en: &["Authority", "Order", "Leadership", "Stability"],
            meaning: "展现领导力和权威，建立秩序和结构，承担责任。",
            meaning_en: "Demonstrate leadership and authority, establish order and structure, take responsibility.",
        },
        reversed: OrientationText {
            keywords: &["专制", "缺乏权威", "混乱"],
            keywords_en: &["Tyranny", "Lack of Authority", "Chaos"],
            meaning: "可能过于专制或缺乏有效的领导，需要调整管理方式。",
            meaning_en: "May be too tyrannical or lack effective leadership, need to adjust management style.",
        },
        image: "/irys/皇帝.png",
    },
    TarotCard {
        id: 5,
        name: "教皇",
        name_en: "The Hierophant",
        upright: OrientationText {
            keywords: &["传统", "精神指导", "学习", "仪式"],
            keywords_en: &["Tradition", "Spiritual Guidance", "Learning", "Ritual"],
            meaning: "寻求精神指导，学习传统智慧，参与有意义的仪式。",
            meaning_en: "Seek spiritual guidance, learn traditional wisdom, participate in meaningful rituals.",
        },
        reversed: OrientationText {
            keywords: &["反叛", "非传统", "个人信仰"],
            keywords_en: &["Rebellion", "Non-traditional", "Personal Belief"],
            meaning: "可能挑战传统观念，寻求个人独特的信仰道路。",
            meaning_en: "May challenge traditional beliefs, seek personal unique spiritual path.",
        },
        image: "/irys/教皇.png",
    },
    TarotCard {
        id: 6,
        name: "恋人",
        name_en: "The Lovers",
        upright: OrientationText {
            keywords: &["爱情", "选择", "和谐", "结合"],
            keywords_en: &["Love", "Choice", "Harmony", "Union"],
            meaning: "面临重要的选择，特别是关于爱情和关系，追求真正的和谐。",
            meaning_en: "Face important choices, especially about love and relationships, pursue true harmony.",
        },
        reversed: OrientationText {
            keywords: &["不和谐", "错误选择", "分离"],
            keywords_en: &["Disharmony", "Wrong Choice", "Separation"],
            meaning: "可能面临关系中的不和谐或需要重新评估选择。",
            meaning_en: "May face disharmony in relationships or need to reassess choices.",
        },
        image: "/irys/恋人.png",
    },
    TarotCard {
        id: 7,
        name: "战车",
        name_en: "The Chariot",
        upright: OrientationText {
            keywords: &["决心", "胜利", "意志力", "控制"],
            keywords_en: &["Determination", "Victory", "Willpower", "Control"],
            meaning: "通过坚定的决心和意志力克服障碍，取得胜利。",
            meaning_en: "Overcome obstacles through firm determination and willpower, achieve victory.",
        },
        reversed: OrientationText {
            keywords: &["缺乏控制", "失败", "缺乏方向"],
            keywords_en: &["Lack of Control", "Failure", "Lack of Direction"],
            meaning: "可能缺乏控制或方向，需要重新找到内在的平衡。",
            meaning_en: "May lack control or direction, need to find inner balance again.",
        },
        image: "/irys/战车.png",
    },
    TarotCard {
        id: 8,
        name: "力量",
        name_en: "Strength",
        upright: OrientationText {
            keywords: &["内在力量", "勇气", "耐心", "温柔"],
            keywords_en: &["Inner Strength", "Courage", "Patience", "Gentleness"],
            meaning: "通过内在的力量和温柔的方式克服挑战，展现真正的勇气。",
            meaning_en: "Overcome challenges through inner strength and gentle approach, show true courage.",
        },
        reversed: OrientationText {
            keywords: &["内在软弱", "恐惧", "缺乏自信"],
            keywords_en: &["Inner Weakness", "Fear", "Lack of Confidence"],
            meaning: "可能感到内在的软弱或恐惧，需要重新建立自信。",
            meaning_en: "May feel inner weakness or fear, need to rebuild confidence.",
        },
        image: "/irys/力量.png",
    },
    TarotCard {
        id: 9,
        name: "隐士",
        name_en: "The Hermit",
        upright: OrientationText {
            keywords: &["内省", "智慧", "指导", "孤独"],
            keywords_en: &["Introspection", "Wisdom", "Guidance", "Solitude"],
            meaning: "通过内省和独处寻找内在的智慧，成为他人的指导者。",
            meaning_en: "Find inner wisdom through introspection and solitude, become a guide for others.",
        },
        reversed: OrientationText {
            keywords: &["孤立", "缺乏指导", "迷失"],
            keywords_en: &["Isolation", "Lack of Guidance", "Lost"],
            meaning: "可能感到孤立或迷失，需要寻求外界的帮助和指导。",
            meaning_en: "May feel isolated or lost, need to seek external help and guidance.",
        },
        image: "/irys/隐士.png",
    },
    TarotCard {
        id: 10,
        name: "命运之轮",
        name_en: "Wheel of Fortune",
        upright: OrientationText {
            keywords: &["变化", "命运", "周期", "机遇"],
            keywords_en: &["Change", "Destiny", "Cycle", "Opportunity"],
            meaning: "命运之轮转动，带来变化和新的机遇，接受生活的起伏。",
            meaning_en: "The wheel of fortune turns, bringing change and new opportunities, accept life's ups and downs.",
        },
        reversed: OrientationText {
            keywords: &["坏运气", "抗拒变化", "停滞"],
            keywords_en: &["Bad Luck", "Resistance to Change", "Stagnation"],
            meaning: "可能遇到坏运气或抗拒必要的变化，需要适应和调整。",
            meaning_en: "May encounter bad luck or resist necessary changes, need to adapt and adjust.",
        },
        image: "/irys/命运之轮.png",
    },
    TarotCard {
        id: 11,
        name: "正义",
        name_en: "Justice",
        upright: OrientationText {
            keywords: &["公正", "平衡", "真理", "责任"],
            keywords_en: &["Fairness", "Balance", "Truth", "Responsibility"],
            meaning: "追求公正和平衡，承担应有的责任，坚持真理。",
            meaning_en: "Pursue fairness and balance, take due responsibility, uphold truth.",
        },
        reversed: OrientationText {
            keywords: &["不公正", "不平衡", "偏见"],
            keywords_en: &["Injustice", "Imbalance", "Bias"],
            meaning: "可能面临不公正的情况或需要重新审视自己的偏见。",
            meaning_en: "May face injustice or need to re-examine one's biases.",
        },
        image: "/irys/正义.png",
    },
    TarotCard {
        id: 12,
        name: "倒吊人",
        name_en: "The Hanged Man",
        upright: OrientationText {
            keywords: &["牺牲", "等待", "新视角", "接受"],
            keywords_en: &["Sacrifice", "Waiting", "New Perspective", "Acceptance"],
            meaning: "通过牺牲和等待获得新的视角，学会接受和放下。",
            meaning_en: "Gain new perspective through sacrifice and waiting, learn to accept and let go.",
        },
        reversed: OrientationText {
            keywords: &["抗拒", "拖延", "固执"],
            keywords_en: &["Resistance", "Procrastination", "Stubbornness"],
            meaning: "可能抗拒必要的牺牲或拖延重要的决定，需要改变态度。",
            meaning_en: "May resist necessary sacrifices or delay important decisions, need to change attitude.",
        },
        image: "/irys/倒吊人.png",
    },
    TarotCard {
        id: 13,
        name: "死神",
        name_en: "Death",
        upright: OrientationText {
            keywords: &["结束", "转变", "重生", "释放"],
            keywords_en: &["End", "Transformation", "Rebirth", "Release"],
            meaning: "代表结束和转变，放下过去，迎接新的开始和重生。",
            meaning_en: "Represents endings and transformation, let go of the past, welcome new beginnings and rebirth.",
        },
        reversed: OrientationText {
            keywords: &["抗拒变化", "停滞", "恐惧"],
            keywords_en: &["Resistance to Change", "Stagnation", "Fear"],
            meaning: "可能抗拒必要的变化或感到恐惧，需要勇敢面对转变。",
            meaning_en: "May resist necessary changes or feel fear, need to bravely face transformation.",
        },
        image: "/irys/死神.png",
    },
    TarotCard {
        id: 14,
        name: "节制",
        name_en: "Temperance",
        upright: OrientationText {
            keywords: &["平衡", "调和", "耐心", "和谐"],
            keywords_en: &["Balance", "Harmony", "Patience", "Moderation"],
            meaning: "寻求内在的平衡和和谐，通过耐心和节制达到目标。",
            meaning_en: "Seek inner balance and harmony, achieve goals through patience and moderation.",
        },
        reversed: OrientationText {
            keywords: &["不平衡", "极端", "缺乏耐心"],
            keywords_en: &["Imbalance", "Extremes", "Lack of Patience"],
            meaning: "可能失去平衡或走向极端，需要重新找到中间道路。",
            meaning_en: "May lose balance or go to extremes, need to find the middle path again.",
        },
        image: "/irys/节制.png",
    },
    TarotCard {
        id: 15,
        name: "恶魔",
        name_en: "The Devil",
        upright: OrientationText {
            keywords: &["束缚", "诱惑", "物质主义", "依赖"],
            keywords_en: &["Bondage", "Temptation", "Materialism", "Dependency"],
            meaning: "可能被物质欲望或不良习惯束缚，需要识别和打破这些枷锁。",
            meaning_en: "May be bound by material desires or bad habits, need to identify and break these chains.",
        },
        reversed: OrientationText {
            keywords: &["解放", "自由", "觉醒"],
            keywords_en: &["Liberation", "Freedom", "Awakening"],
            meaning: "开始意识到束缚并寻求解放，走向自由和觉醒。",
            meaning_en: "Begin to recognize bondage and seek liberation, move toward freedom and awakening.",
        },
        image: "/irys/恶魔.png",
    },
    TarotCard {
        id: 16,
        name: "高塔",
        name_en: "The Tower",
        upright: OrientationText {
            keywords: &["突然变化", "启示", "解放", "重建"],
            keywords_en: &["Sudden Change", "Revelation", "Liberation", "Rebuilding"],
            meaning: "突然的变化带来启示和解放，虽然痛苦但为重建铺平道路。",
            meaning_en: "Sudden changes bring revelation and liberation, painful but pave the way for rebuilding.",
        },
        reversed: OrientationText {
            keywords: &["抗拒变化", "恐惧", "僵化"],
            keywords_en: &["Resistance to Change", "Fear", "Rigidity"],
            meaning: "可能抗拒必要的变化或感到恐惧，需要勇敢面对现实。",
            meaning_en: "May resist necessary changes or feel fear, need to bravely face reality.",
        },
        image: "/irys/高塔.png",
    },
    TarotCard {
        id: 17,
        name: "星星",
        name_en: "The Star",
        upright: OrientationText {
            keywords: &["希望", "灵感", "精神指引", "治愈"],
            keywords_en: &["Hope", "Inspiration", "Spiritual Guidance", "Healing"],
            meaning: "在黑暗中看到希望，获得精神指引和治愈，相信美好的未来。",
            meaning_en: "See hope in darkness, receive spiritual guidance and healing, believe in a bright future.",
        },
        reversed: OrientationText {
            keywords: &["绝望", "失去希望", "缺乏灵感"],
            keywords_en: &["Despair", "Loss of Hope", "Lack of Inspiration"],
            meaning: "可能感到绝望或失去希望，需要重新寻找内在的光明。",
            meaning_en: "May feel despair or lose hope, need to find inner light again.",
        },
        image: "/irys/星星.png",
    },
    TarotCard {
        id: 18,
        name: "月亮",
        name_en: "The Moon",
        upright: OrientationText {
            keywords: &["幻觉", "潜意识", "恐惧", "直觉"],
            keywords_en: &["Illusion", "Subconscious", "Fear", "Intuition"],
            meaning: "面对潜意识的恐惧和幻觉，通过直觉和内在智慧找到真相。",
            meaning_en: "Face subconscious fears and illusions, find truth through intuition and inner wisdom.",
        },
        reversed: OrientationText {
            keywords: &["欺骗", "困惑", "恐惧"],
            keywords_en: &["Deception", "Confusion", "Fear"],
            meaning: "可能被欺骗或感到困惑，需要更加谨慎和清醒。",
            meaning_en: "May be deceived or feel confused, need to be more cautious and alert.",
        },
        image: "/irys/月亮.png",
    },
    TarotCard {
        id: 19,
        name: "太阳",
        name_en: "The Sun",
        upright: OrientationText {
            keywords: &["成功", "快乐", "活力", "成就"],
            keywords_en: &["Success", "Joy", "Vitality", "Achievement"],
            meaning: "享受成功和快乐，充满活力和正能量，实现重要的成就。",
            meaning_en: "Enjoy success and joy, full of vitality and positive energy, achieve important accomplishments.",
        },
        reversed: OrientationText {
            keywords: &["过度自信", "骄傲", "缺乏活力"],
            keywords_en: &["Overconfidence", "Pride", "Lack of Vitality"],
            meaning: "可能过于自信或骄傲，需要保持谦逊和平衡。",
            meaning_en: "May be overconfident or proud, need to maintain humility and balance.",
        },
        image: "/irys/太阳.png",
    },
    TarotCard {
        id: 20,
        name: "审判",
        name_en: "Judgement",
        upright: OrientationText {
            keywords: &["重生", "觉醒", "宽恕", "救赎"],
            keywords_en: &["Rebirth", "Awakening", "Forgiveness", "Redemption"],
            meaning: "经历重生和觉醒，学会宽恕和救赎，迎接新的开始。",
            meaning_en: "Experience rebirth and awakening, learn forgiveness and redemption, welcome new beginnings.",
        },
        reversed: OrientationText {
            keywords: &["缺乏自我反省", "抗拒改变", "内疚"],
            keywords_en: &["Lack of Self-Reflection", "Resistance to Change", "Guilt"],
            meaning: "可能缺乏自我反省或抗拒必要的改变，需要面对内心的声音。",
            meaning_en: "May lack self-reflection or resist necessary changes, need to face inner voice.",
        },
        image: "/irys/审判.png",
    },
    TarotCard {
        id: 21,
        name: "世界",
        name_en: "The World",
        upright: OrientationText {
            keywords: &["完成", "成就", "旅行", "圆满"],
            keywords_en: &["Completion", "Achievement", "Travel", "Fulfillment"],
            meaning: "达到重要的成就和完成，享受圆满和满足，准备新的旅程。",
            meaning_en: "Achieve important accomplishments and completion, enjoy fulfillment and satisfaction, prepare for new journeys.",
        },
        reversed: OrientationText {
            keywords: &["未完成", "缺乏成就感", "停滞"],
            keywords_en: &["Incomplete", "Lack of Achievement", "Stagnation"],
            meaning: "可能感到未完成或缺乏成就感，需要重新审视目标和方向。",
            meaning_en: "May feel incomplete or lack achievement, need to reassess goals and direction.",
        },
        image: "/irys/世界.png",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_arcana_ids_match_positions() {
        for (idx, card) in MAJOR_ARCANA.iter().enumerate() {
            assert_eq!(card.id as usize, idx);
        }
    }

    #[test]
    fn card_by_id_resolves_known_and_rejects_unknown() {
        assert_eq!(card_by_id(5).unwrap().name_en, "The Hierophant");
        assert!(card_by_id(22).is_none());
    }
}
