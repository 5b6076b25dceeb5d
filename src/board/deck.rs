//! Deck generation.
//!
//! A deck is `2 × pair_count` tokens, each of `1..=pair_count` exactly
//! twice, in uniformly random order.

use rustc_hash::FxHashMap;

use crate::core::{GameRng, Token};

/// Shuffled sequence of paired tokens.
///
/// ## Example
///
/// ```
/// use concentric_pairs::board::Deck;
/// use concentric_pairs::core::GameRng;
///
/// let mut rng = GameRng::new(42);
/// let deck = Deck::generate(10, &mut rng);
///
/// assert_eq!(deck.len(), 20);
/// assert!(deck.is_well_formed(10));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    tokens: Vec<Token>,
}

impl Deck {
    /// Build `pair_count` duplicated tokens and shuffle them.
    #[must_use]
    pub fn generate(pair_count: u16, rng: &mut GameRng) -> Self {
        let mut tokens: Vec<Token> = (1..=pair_count)
            .flat_map(|n| [Token::new(n), Token::new(n)])
            .collect();
        rng.shuffle(&mut tokens);
        Self { tokens }
    }

    /// Tokens in deal order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// How many times each token occurs.
    #[must_use]
    pub fn counts(&self) -> FxHashMap<Token, usize> {
        let mut counts = FxHashMap::default();
        for &token in &self.tokens {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }

    /// Check that the deck holds exactly two of each of `1..=pair_count`.
    #[must_use]
    pub fn is_well_formed(&self, pair_count: u16) -> bool {
        let counts = self.counts();
        counts.len() == pair_count as usize
            && (1..=pair_count).all(|n| counts.get(&Token::new(n)) == Some(&2))
    }
}

impl IntoIterator for Deck {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
