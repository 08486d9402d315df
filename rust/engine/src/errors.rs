use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealError {
    #[error("hand size {size} is outside the allowed range 1..=52")]
    HandSizeOutOfRange { size: usize },
    #[error("requested {total} cards in total, a deck only holds 52")]
    OverCapacity { total: usize },
    #[error("requested {requested} cards with {remaining} left in the deck")]
    Exhausted { requested: usize, remaining: usize },
}
