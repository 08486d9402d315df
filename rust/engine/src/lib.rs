//! # dealer-engine: Card Dealing Core
//!
//! The card domain behind the deck dealer service: card and deck
//! representation, deterministic seeded shuffling, and the hand-size rules
//! that bound dealing requests. No HTTP and no shared state live here; the
//! web crate owns the process-wide deck.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Card) and 52-card construction
//! - [`deck`] - Seed handling and deck shuffling/dealing with ChaCha20 RNG
//! - [`rules`] - Hand-size bounds and default request shapes
//! - [`errors`] - Error types for dealing operations
//!
//! ## Deterministic Dealing
//!
//! A fixed seed reproduces the same deck order, and therefore the same
//! sequence of hands, on every run:
//!
//! ```rust
//! use dealer_engine::deck::{Deck, Seed};
//!
//! let seed = Seed::from(42u64);
//! let mut a = Deck::shuffled(Some(&seed));
//! let mut b = Deck::shuffled(Some(&seed));
//! assert_eq!(a.deal(5).unwrap(), b.deal(5).unwrap());
//! ```
//!
//! ## Request Validation
//!
//! Hand sizes are checked before any card moves:
//!
//! ```rust
//! use dealer_engine::rules::validate_hand_sizes;
//!
//! assert!(validate_hand_sizes(&[13, 13, 13, 13]).is_ok());
//! assert!(validate_hand_sizes(&[26, 27]).is_err());
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod rules;
