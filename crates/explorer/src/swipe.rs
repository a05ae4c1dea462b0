use crate::error::ExplorerError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Like,
    Pass,
}

/// One recorded decision. `card` is the record index the card stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swipe {
    pub card: usize,
    pub direction: SwipeDirection,
}

/// A one-card-at-a-time review of listings.
///
/// Every card before `position` has exactly one entry in `history`, so undo
/// is a pop followed by a step back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwipeDeck {
    cards: Vec<usize>,
    position: usize,
    history: Vec<Swipe>,
}

impl SwipeDeck {
    pub fn new(cards: Vec<usize>) -> Self {
        Self {
            cards,
            position: 0,
            history: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card on top of the deck, if any remain.
    pub fn current(&self) -> Option<usize> {
        self.cards.get(self.position).copied()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.position
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.cards.len()
    }

    pub fn swipe(&mut self, direction: SwipeDirection) -> Result<Swipe, ExplorerError> {
        let card = self.current().ok_or(ExplorerError::DeckExhausted)?;
        let swipe = Swipe { card, direction };
        self.history.push(swipe);
        self.position += 1;
        tracing::debug!(card, ?direction, remaining = self.remaining(), "Card swiped.");
        Ok(swipe)
    }

    pub fn like(&mut self) -> Result<Swipe, ExplorerError> {
        self.swipe(SwipeDirection::Like)
    }

    pub fn pass(&mut self) -> Result<Swipe, ExplorerError> {
        self.swipe(SwipeDirection::Pass)
    }

    /// Takes back the most recent swipe and puts its card back on top.
    pub fn undo(&mut self) -> Option<Swipe> {
        let swipe = self.history.pop()?;
        self.position -= 1;
        Some(swipe)
    }

    /// Liked cards, in the order they were liked.
    pub fn shortlist(&self) -> Vec<usize> {
        self.cards_swiped(SwipeDirection::Like)
    }

    pub fn passed(&self) -> Vec<usize> {
        self.cards_swiped(SwipeDirection::Pass)
    }

    pub fn history(&self) -> &[Swipe] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.position = 0;
        self.history.clear();
    }

    fn cards_swiped(&self, direction: SwipeDirection) -> Vec<usize> {
        self.history
            .iter()
            .filter(|s| s.direction == direction)
            .map(|s| s.card)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipes_through_the_deck() {
        let mut deck = SwipeDeck::new(vec![4, 2, 7]);
        assert_eq!(deck.current(), Some(4));
        deck.like().unwrap();
        deck.pass().unwrap();
        deck.like().unwrap();

        assert!(deck.is_finished());
        assert_eq!(deck.current(), None);
        assert_eq!(deck.shortlist(), vec![4, 7]);
        assert_eq!(deck.passed(), vec![2]);
        assert_eq!(deck.like(), Err(ExplorerError::DeckExhausted));
    }

    #[test]
    fn undo_restores_the_previous_card() {
        let mut deck = SwipeDeck::new(vec![1, 2]);
        deck.like().unwrap();
        assert_eq!(deck.current(), Some(2));

        let undone = deck.undo().unwrap();
        assert_eq!(undone, Swipe { card: 1, direction: SwipeDirection::Like });
        assert_eq!(deck.current(), Some(1));
        assert!(deck.shortlist().is_empty());
        assert_eq!(deck.undo(), None);
    }

    #[test]
    fn reset_clears_history() {
        let mut deck = SwipeDeck::new(vec![1, 2]);
        deck.pass().unwrap();
        deck.reset();
        assert_eq!(deck.remaining(), 2);
        assert!(deck.history().is_empty());
    }

    #[test]
    fn empty_deck_is_finished() {
        let deck = SwipeDeck::new(Vec::new());
        assert!(deck.is_empty());
        assert!(deck.is_finished());
    }
}
