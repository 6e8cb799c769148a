use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::WordList;
use crate::engine::progress::ProgressStore;
use crate::engine::weight::weight;
use crate::session::{Card, Direction, SESSION_SIZE, Session};

/// Weighted candidate pool: each card repeated `weight` times. Reverse cards
/// only appear once the word's forward direction is comfortable.
pub fn candidate_pool(list: &WordList, store: &ProgressStore) -> Vec<Card> {
    let mut pool = Vec::new();
    for pair in &list.pairs {
        let record = store.record_or_default(&list.id, &pair.source);

        let forward = Card::new(pair.clone(), Direction::Forward);
        pool.extend(std::iter::repeat_n(forward, weight(&record.forward)));

        if record.forward.comfortable {
            let reverse = Card::new(pair.clone(), Direction::Reverse);
            pool.extend(std::iter::repeat_n(reverse, weight(&record.reverse)));
        }
    }
    pool
}

/// Take cards in pool order, skipping any card for the same word as the one
/// just taken, until `cap` cards are collected or the pool runs out.
pub fn take_without_repeats(pool: Vec<Card>, cap: usize) -> Vec<Card> {
    let mut cards: Vec<Card> = Vec::with_capacity(cap.min(pool.len()));
    for card in pool {
        if cards.len() >= cap {
            break;
        }
        if cards.last().is_some_and(|last| last.word() == card.word()) {
            continue;
        }
        cards.push(card);
    }
    cards
}

/// Adaptive session: weighted pool, uniform shuffle, anti-repetition walk.
pub fn build<R: Rng + ?Sized>(list: &WordList, store: &ProgressStore, rng: &mut R) -> Session {
    let mut pool = candidate_pool(list, store);
    pool.shuffle(rng);
    let cards = take_without_repeats(pool, SESSION_SIZE);
    log::debug!("built session for {}: {} cards", list.id, cards.len());
    Session::new(cards)
}

/// Forced reverse-direction drill: uniform shuffle of all pairs, ignoring
/// weights and comfort.
pub fn build_reverse<R: Rng + ?Sized>(list: &WordList, rng: &mut R) -> Session {
    let mut pairs = list.pairs.clone();
    pairs.shuffle(rng);
    let cards = pairs
        .into_iter()
        .take(SESSION_SIZE)
        .map(|pair| Card::new(pair, Direction::Reverse))
        .collect();
    Session::new(cards)
}
