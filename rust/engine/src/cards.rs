use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// Represents one of the four suits in a standard 52-card deck.
///
/// The serialized form is the suit symbol itself (`"♠"`, `"♡"`, `"♢"`,
/// `"♣"`), which is what consumers of the dealing endpoints expect.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    #[serde(rename = "♣")]
    Clubs,
    /// Diamonds suit (♢)
    #[serde(rename = "♢")]
    Diamonds,
    /// Hearts suit (♡)
    #[serde(rename = "♡")]
    Hearts,
    /// Spades suit (♠)
    #[serde(rename = "♠")]
    Spades,
}

impl Suit {
    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♢',
            Suit::Hearts => '♡',
            Suit::Spades => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single playing card: a rank from 1 (ace) through 13 (king) and a suit.
///
/// Cards are plain values; two cards are the same card exactly when rank and
/// suit match. The JSON form carries a fixed `"__class__": "Card"` tag:
///
/// ```text
/// {"__class__": "Card", "rank": 10, "suit": "♡"}
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Card {
    /// The rank of the card, 1 (ace) through 13 (king)
    pub rank: u8,
    /// The suit of the card
    pub suit: Suit,
}

impl Card {
    fn rank_label(&self) -> String {
        match self.rank {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            n => n.to_string(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_label(), self.suit)
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The tag is part of the wire contract, not a type marker.
        let mut state = serializer.serialize_struct("Card", 3)?;
        state.serialize_field("__class__", "Card")?;
        state.serialize_field("rank", &self.rank)?;
        state.serialize_field("suit", &self.suit)?;
        state.end()
    }
}

#[derive(Deserialize)]
struct CardFields {
    #[serde(rename = "__class__", default)]
    class: Option<String>,
    rank: u8,
    suit: Suit,
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = CardFields::deserialize(deserializer)?;
        if let Some(class) = &fields.class {
            if class != "Card" {
                return Err(de::Error::invalid_value(
                    de::Unexpected::Str(class),
                    &"the literal \"Card\"",
                ));
            }
        }
        if !(1..=13).contains(&fields.rank) {
            return Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(u64::from(fields.rank)),
                &"a rank between 1 and 13",
            ));
        }
        Ok(Card {
            rank: fields.rank,
            suit: fields.suit,
        })
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

/// The full 52-card set in construction order, one card per rank×suit pair.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for r in 1..=13 {
            v.push(Card { rank: r, suit: s });
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn full_deck_has_52_distinct_cards() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        let unique: HashSet<Card> = deck.into_iter().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn card_serializes_with_class_tag_and_symbol_suit() {
        let card = Card {
            rank: 10,
            suit: Suit::Hearts,
        };
        let json = serde_json::to_value(card).expect("serialize card");
        assert_eq!(json["__class__"], "Card");
        assert_eq!(json["rank"], 10);
        assert_eq!(json["suit"], "♡");
    }

    #[test]
    fn card_roundtrips_through_json() {
        for card in full_deck() {
            let json = serde_json::to_string(&card).expect("serialize");
            let back: Card = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(card, back);
        }
    }

    #[test]
    fn card_deserializes_without_class_tag() {
        let card: Card = serde_json::from_str(r#"{"rank": 1, "suit": "♠"}"#).expect("deserialize");
        assert_eq!(
            card,
            Card {
                rank: 1,
                suit: Suit::Spades
            }
        );
    }

    #[test]
    fn card_rejects_foreign_class_tag() {
        let result: Result<Card, _> =
            serde_json::from_str(r#"{"__class__": "Die", "rank": 1, "suit": "♠"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn card_rejects_out_of_range_rank() {
        for raw in [
            r#"{"rank": 0, "suit": "♠"}"#,
            r#"{"rank": 14, "suit": "♠"}"#,
        ] {
            let result: Result<Card, _> = serde_json::from_str(raw);
            assert!(result.is_err(), "rank in {raw} should be rejected");
        }
    }

    #[test]
    fn display_uses_face_letters() {
        let ace = Card {
            rank: 1,
            suit: Suit::Spades,
        };
        let seven = Card {
            rank: 7,
            suit: Suit::Diamonds,
        };
        let king = Card {
            rank: 13,
            suit: Suit::Clubs,
        };
        assert_eq!(ace.to_string(), "A♠");
        assert_eq!(seven.to_string(), "7♢");
        assert_eq!(king.to_string(), "K♣");
    }
}
