#![allow(dead_code)]

use hanabi_hypo::basics::game::Game;
use hanabi_hypo::basics::identity_set::IdentitySet;
use hanabi_hypo::basics::state::GameState;
use itertools::Itertools;

use crate::util::{slot_order, Player};

fn matches(state: &GameState, set: &IdentitySet, ids: &[&str]) -> bool {
	set.len() == ids.len() && ids.iter().all(|&i| state.variant.expand_short(i).is_some_and(|id| set.contains(id)))
}

fn str_ids(state: &GameState, set: &IdentitySet) -> String {
	set.iter().map(|id| state.log_id(id)).join(",")
}

pub fn has_possible(game: &Game, target: Player, slot: usize, possible: &[&str]) {
	let state = game.visible_state();
	let card = &state.cards[slot_order(state, target, slot)];

	assert!(matches(state, &card.possible_cards_from_clues, possible),
		"Differing possibilities. Expected {}, got {}", possible.join(","), str_ids(state, &card.possible_cards_from_clues));
}

pub fn has_empathy(game: &Game, target: Player, slot: usize, empathy: &[&str]) {
	let state = game.visible_state();
	let card = &state.cards[slot_order(state, target, slot)];

	assert!(matches(state, &card.possible_cards_for_empathy, empathy),
		"Differing empathy. Expected {}, got {}", empathy.join(","), str_ids(state, &card.possible_cards_for_empathy));
}
