use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// The closed set of question categories. Serialized as kebab-case slugs,
/// e.g. `"the-medina"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ArrivalLogistics,
    TheMedina,
    SocialCultural,
    FoodDrink,
    Safety,
    ReligiousCalendar,
    Cities,
}

/// Page-level copy for a category listing.
#[derive(Debug, Clone, Copy)]
pub struct CategoryMeta {
    pub heading: &'static str,
    pub description: &'static str,
    pub intro: &'static str,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 7] = [
        Category::ArrivalLogistics,
        Category::TheMedina,
        Category::SocialCultural,
        Category::FoodDrink,
        Category::Safety,
        Category::ReligiousCalendar,
        Category::Cities,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::ArrivalLogistics => "arrival-logistics",
            Category::TheMedina => "the-medina",
            Category::SocialCultural => "social-cultural",
            Category::FoodDrink => "food-drink",
            Category::Safety => "safety",
            Category::ReligiousCalendar => "religious-calendar",
            Category::Cities => "cities",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::ArrivalLogistics => "Arrival & Logistics",
            Category::TheMedina => "The Medina",
            Category::SocialCultural => "Social & Cultural",
            Category::FoodDrink => "Food & Drink",
            Category::Safety => "Safety",
            Category::ReligiousCalendar => "Religious Calendar",
            Category::Cities => "Cities",
        }
    }

    pub fn meta(self) -> CategoryMeta {
        match self {
            Category::ArrivalLogistics => CategoryMeta {
                heading: "Arrival & Logistics",
                description: "Taxis, trains, buses, ride-hailing apps, the tourist tax, and getting from the airport to your riad door.",
                intro: "Getting around Morocco: how transport works, what to expect on arrival, and why your taxi can't take you to the door.",
            },
            Category::TheMedina => CategoryMeta {
                heading: "The Medina",
                description: "GPS errors, bathroom smells, cold riads, loud prayer calls, cockroaches, and the architecture behind it all.",
                intro: "What confuses, surprises, or unsettles visitors about life inside the old walled city, and the infrastructure behind it.",
            },
            Category::SocialCultural => CategoryMeta {
                heading: "Social & Cultural",
                description: "Greetings, haggling, tipping, dress, photography, and the unwritten rules of everyday Moroccan life.",
                intro: "The social codes visitors notice but rarely get explained.",
            },
            Category::FoodDrink => CategoryMeta {
                heading: "Food & Drink",
                description: "Tap water, shared tagines, hammams, mint tea, vegan food, alcohol, and why your stomach might need a day to adjust.",
                intro: "What you eat and drink in Morocco, and the habits around it.",
            },
            Category::Safety => CategoryMeta {
                heading: "Safety",
                description: "Scams, faux guides, night walks, heat, stray animals, and what is actually worth worrying about.",
                intro: "A calm look at the risks visitors ask about most.",
            },
            Category::ReligiousCalendar => CategoryMeta {
                heading: "Religious Calendar",
                description: "Ramadan, Eid, Friday prayers, and how the religious calendar shapes opening hours and street life.",
                intro: "How faith and its calendar set the rhythm of Moroccan cities.",
            },
            Category::Cities => CategoryMeta {
                heading: "Cities",
                description: "Marrakech mosques, Casablanca's Art Deco, Agadir's earthquake, Rabat as capital, and Taghazout's surf culture.",
                intro: "City-specific questions: what makes each place different and what visitors most often ask.",
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| ContentError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn serde_uses_slug() {
        let json = serde_json::to_string(&Category::ReligiousCalendar).unwrap();
        assert_eq!(json, "\"religious-calendar\"");
    }

    #[test]
    fn unknown_slug_is_rejected() {
        assert!("nightlife".parse::<Category>().is_err());
        assert!(serde_json::from_str::<Category>("\"nightlife\"").is_err());
    }
}
