use crate::errors::DealError;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Hand size used when a single-hand request names none.
pub const DEFAULT_HAND_SIZE: usize = 5;

/// Hand sizes used when a multi-hand request names none: four 13-card hands.
pub const DEFAULT_MULTI_DEAL: [usize; 4] = [13, 13, 13, 13];

/// Checks that a single requested hand size lies in `1..=52`.
pub fn validate_hand_size(size: usize) -> Result<(), DealError> {
    if size == 0 || size > DECK_SIZE {
        return Err(DealError::HandSizeOutOfRange { size });
    }
    Ok(())
}

/// Checks a whole multi-hand request: every size in `1..=52` and the total
/// within deck capacity. Runs to completion before any card moves, so a
/// rejected request leaves the deck untouched.
pub fn validate_hand_sizes(sizes: &[usize]) -> Result<(), DealError> {
    for &size in sizes {
        validate_hand_size(size)?;
    }
    let total: usize = sizes.iter().sum();
    if total > DECK_SIZE {
        return Err(DealError::OverCapacity { total });
    }
    Ok(())
}
