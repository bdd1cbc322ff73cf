use serde::{Deserialize, Serialize};
use strum::Display;

/// Primary meat of a dish, used only to compare dishes chosen for the same day
/// and to enforce the weekly fish cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MeatType {
    Fish,
    Beef,
    Pork,
    Chicken,
    Shrimp,
    Clam,
}

/// Phrases that contain a meat keyword without being that meat.
/// Masked out of the name before any keyword lookup.
const MASKED_PHRASES: &[&str] = &[
    // fish roe is its own ingredient, not the fish tag
    "fish roe",
    "鱼子",
    "鱼籽",
    // fish-fragrant sauce has no fish in it
    "fish-fragrant",
    "fish fragrant",
    "fish sauce",
    "鱼香",
    // squid
    "鱿鱼",
    // chicken egg is an egg
    "chicken egg",
    "鸡蛋",
    // milk and avocado
    "牛奶",
    "牛油果",
];

/// Keyword table in precedence order: the first matching entry wins.
const KEYWORDS: &[(MeatType, &[&str])] = &[
    (MeatType::Shrimp, &["shrimp", "prawn", "虾"]),
    (MeatType::Clam, &["clam", "蛤", "蚬", "花甲", "蛏"]),
    (
        MeatType::Fish,
        &[
            "fish", "salmon", "cod", "tuna", "trout", "mackerel", "tilapia", "鱼",
        ],
    ),
    (MeatType::Beef, &["beef", "steak", "brisket", "牛"]),
    (MeatType::Pork, &["pork", "bacon", "猪", "排骨", "五花"]),
    (MeatType::Chicken, &["chicken", "鸡"]),
];

/// Classify a dish by the keywords in its name.
///
/// Matching is case-insensitive and side effect free. Returns `None` when no
/// keyword matches.
pub fn classify(dish_name: &str) -> Option<MeatType> {
    let mut name = dish_name.to_lowercase();
    for phrase in MASKED_PHRASES {
        if name.contains(phrase) {
            name = name.replace(phrase, " ");
        }
    }

    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map(|(meat, _)| *meat)
}
