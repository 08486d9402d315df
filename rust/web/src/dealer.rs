use std::sync::Mutex;

use thiserror::Error;

use dealer_engine::cards::Card;
use dealer_engine::deck::{Deck, Seed};
use dealer_engine::errors::DealError;
use dealer_engine::rules::DECK_SIZE;

#[derive(Debug, Error)]
pub enum DealerError {
    #[error(transparent)]
    Deal(#[from] DealError),
    #[error("deck state lock poisoned")]
    StatePoisoned,
}

/// Owner of the process-wide deck.
///
/// The deck is constructed lazily on the first deal, shuffled with the seed
/// the manager was given at startup (read once, before any request). It is
/// never reshuffled and never replaced; it only shrinks. All dealing happens
/// under one mutex so concurrent requests cannot interleave inside a
/// read-modify-write and no card is ever dealt twice.
#[derive(Debug)]
pub struct DeckManager {
    seed: Option<Seed>,
    deck: Mutex<Option<Deck>>,
}

impl DeckManager {
    pub fn new(seed: Option<Seed>) -> Self {
        Self {
            seed,
            deck: Mutex::new(None),
        }
    }

    /// Deals one hand of `count` cards from the shared deck.
    pub fn deal(&self, count: usize) -> Result<Vec<Card>, DealerError> {
        let mut guard = self.deck.lock().map_err(|_| DealerError::StatePoisoned)?;
        let deck = Self::deck_in(&mut guard, self.seed.as_ref());
        let hand = deck.deal(count)?;
        tracing::debug!(count, remaining = deck.remaining(), "dealt hand");
        Ok(hand)
    }

    /// Deals one hand per entry of `sizes`, in order, from the shared deck.
    ///
    /// The whole sequence runs under a single lock acquisition, so the hands
    /// of one request are contiguous in the deck's dealing order.
    pub fn deal_many(&self, sizes: &[usize]) -> Result<Vec<Vec<Card>>, DealerError> {
        let mut guard = self.deck.lock().map_err(|_| DealerError::StatePoisoned)?;
        let deck = Self::deck_in(&mut guard, self.seed.as_ref());

        // Fail before the first hand, so a rejected request never leaves the
        // deck half-consumed.
        let total: usize = sizes.iter().sum();
        if total > deck.remaining() {
            return Err(DealError::Exhausted {
                requested: total,
                remaining: deck.remaining(),
            }
            .into());
        }

        let mut hands = Vec::with_capacity(sizes.len());
        for &size in sizes {
            hands.push(deck.deal(size)?);
        }
        tracing::debug!(
            hands = sizes.len(),
            remaining = deck.remaining(),
            "dealt hands"
        );
        Ok(hands)
    }

    /// Cards left in the deck; a deck that has not been constructed yet
    /// still counts as full.
    pub fn remaining(&self) -> Result<usize, DealerError> {
        let guard = self.deck.lock().map_err(|_| DealerError::StatePoisoned)?;
        Ok(guard.as_ref().map_or(DECK_SIZE, Deck::remaining))
    }

    fn deck_in<'a>(slot: &'a mut Option<Deck>, seed: Option<&Seed>) -> &'a mut Deck {
        slot.get_or_insert_with(|| {
            tracing::info!(seeded = seed.is_some(), "constructing deck");
            Deck::shuffled(seed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn seeded_manager() -> DeckManager {
        DeckManager::new(Some(Seed::from(42u64)))
    }

    #[test]
    fn deck_counts_as_full_before_first_deal() {
        let manager = seeded_manager();
        assert_eq!(manager.remaining().unwrap(), 52);
    }

    #[test]
    fn dealing_decrements_remaining() {
        let manager = seeded_manager();
        let hand = manager.deal(5).unwrap();
        assert_eq!(hand.len(), 5);
        assert_eq!(manager.remaining().unwrap(), 47);
    }

    #[test]
    fn hands_from_one_request_never_overlap() {
        let manager = seeded_manager();
        let hands = manager.deal_many(&[13, 13, 13, 13]).unwrap();
        assert_eq!(hands.len(), 4);
        let mut seen = HashSet::new();
        for hand in &hands {
            assert_eq!(hand.len(), 13);
            for &card in hand {
                assert!(seen.insert(card), "card {card} appeared in two hands");
            }
        }
        assert_eq!(manager.remaining().unwrap(), 0);
    }

    #[test]
    fn cards_never_repeat_across_requests() {
        let manager = seeded_manager();
        let first: HashSet<_> = manager.deal(26).unwrap().into_iter().collect();
        let second: HashSet<_> = manager.deal(26).unwrap().into_iter().collect();
        assert!(first.is_disjoint(&second));
    }

    #[test]
    fn exhaustion_surfaces_the_engine_error() {
        let manager = seeded_manager();
        manager.deal(50).unwrap();
        match manager.deal(5) {
            Err(DealerError::Deal(DealError::Exhausted {
                requested: 5,
                remaining: 2,
            })) => {}
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn multi_deal_exhaustion_is_fail_fast() {
        let manager = seeded_manager();
        manager.deal(40).unwrap();

        let result = manager.deal_many(&[10, 10]);
        assert!(matches!(
            result,
            Err(DealerError::Deal(DealError::Exhausted {
                requested: 20,
                remaining: 12,
            }))
        ));
        // The first 10-card hand must not have been dealt.
        assert_eq!(manager.remaining().unwrap(), 12);
    }

    #[test]
    fn same_seed_managers_deal_identically() {
        let a = seeded_manager();
        let b = seeded_manager();
        assert_eq!(a.deal(13).unwrap(), b.deal(13).unwrap());
        assert_eq!(
            a.deal_many(&[5, 5]).unwrap(),
            b.deal_many(&[5, 5]).unwrap()
        );
    }
}
