use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::DealError;

/// An external shuffle seed, either numeric or free-form text.
///
/// Both forms map onto a ChaCha20 RNG deterministically, so a fixed seed
/// value reproduces the same deck order on every run and platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    /// Interprets a configured seed value: numeric strings become
    /// [`Seed::Number`], anything else is kept as text.
    pub fn parse(raw: &str) -> Seed {
        match raw.parse::<u64>() {
            Ok(n) => Seed::Number(n),
            Err(_) => Seed::Text(raw.to_string()),
        }
    }

    fn rng(&self) -> ChaCha20Rng {
        match self {
            Seed::Number(n) => ChaCha20Rng::seed_from_u64(*n),
            Seed::Text(text) => {
                let mut key = [0u8; 32];
                for (slot, byte) in key.iter_mut().zip(text.bytes()) {
                    *slot = byte;
                }
                ChaCha20Rng::from_seed(key)
            }
        }
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Seed {
        Seed::Number(n)
    }
}

/// An ordered 52-card deck, permuted once at construction.
///
/// The ordering is fixed for the deck's whole lifetime; dealing only advances
/// a cursor, so `remaining() + dealt() == 52` always holds and no card can be
/// produced twice.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Builds a full deck shuffled with the given seed, or from OS entropy
    /// when no seed is configured.
    pub fn shuffled(seed: Option<&Seed>) -> Self {
        let mut cards = full_deck();
        match seed {
            Some(seed) => cards.shuffle(&mut seed.rng()),
            None => cards.shuffle(&mut ChaCha20Rng::from_os_rng()),
        }
        Self { cards, position: 0 }
    }

    /// Removes and returns the next `count` cards in dealing order.
    ///
    /// Fails without consuming anything when fewer than `count` cards
    /// remain; `deal(0)` is a no-op returning an empty hand in every state.
    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, DealError> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(DealError::Exhausted {
                requested: count,
                remaining,
            });
        }
        let start = self.position;
        self.position += count;
        Ok(self.cards[start..self.position].to_vec())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.position
    }

    pub fn dealt(&self) -> usize {
        self.position
    }
}
