use std::sync::Arc;

use hanabi_hypo::basics::action::{Action, DiscardAction, PerformAction, StrikeAction};
use hanabi_hypo::basics::card::CardLocation;
use hanabi_hypo::basics::clue::ClueKind;
use hanabi_hypo::basics::game::{Game, GameOptions, Phase};
use hanabi_hypo::basics::play_stacks::StackDirection;
use hanabi_hypo::error::{ActionError, SetupError};

use crate::util::{clue, location, order_of, slot_order, take_turn, try_turn, Colour, Player, TestOptions};

pub mod util;
pub mod ex_asserts;

fn two_player(options: TestOptions) -> Game {
	util::setup(&[
		&["r1", "r3", "b4", "g2", "y5"],
		&["y1", "g1", "b1", "p1", "r2"],
	], options)
}

#[test]
fn it_plays_onto_the_stack() {
	let mut game = two_player(TestOptions { deck: &["p4"], ..TestOptions::default() });
	let order = slot_order(&game.state, Player::Alice, 1);

	let events = take_turn(&mut game, "Alice plays slot 1");

	assert!(matches!(events[0], Action::Play(_)));
	assert_eq!(location(&game.state, order), CardLocation::PlayStack(Colour::Red as usize));
	assert_eq!(game.state.stack_rank(Colour::Red as usize), Some(1));
	assert_eq!(game.state.next_playable_ranks(Colour::Red as usize), vec![2]);
	assert_eq!(game.state.cards[order].segment_played, Some(0));

	// Replacement card drawn to slot 1
	let drawn = slot_order(&game.state, Player::Alice, 1);
	assert_eq!(drawn, 10);
	assert_eq!(game.identities[drawn], game.state.variant.expand_short("p4"));
	assert_eq!(game.state.cards[drawn].identity, None);
	assert!(!game.state.cards[drawn].dealt_to_starting_hand);

	assert_eq!(game.state.turn.current_player_index, Player::Bob as usize);
	assert_eq!(game.state.turn.turn_num, 1);
	assert_eq!(game.state.turn.segment, 1);
	assert_eq!(game.state.cards_left, 50 - 11);
	assert_eq!(game.phase, Phase::WaitingForAction);
}

#[test]
fn it_records_misplays() {
	let mut game = two_player(TestOptions::default());
	let order = slot_order(&game.state, Player::Alice, 2);

	let events = take_turn(&mut game, "Alice plays slot 2");

	assert!(matches!(events[0], Action::Discard(DiscardAction { failed: true, .. })));
	assert!(matches!(events[1], Action::Strike(StrikeAction { num: 1, .. })));
	assert_eq!(game.state.strikes.len(), 1);
	assert_eq!(game.state.strikes[0].order, order);
	assert_eq!(game.state.play_stacks[Colour::Red as usize].len(), 1);
	assert_eq!(game.state.stack_rank(Colour::Red as usize), None);
	assert_eq!(location(&game.state, order), CardLocation::Discard);
	assert!(game.state.cards[order].is_misplayed);
	assert_eq!(game.state.clue_tokens, 8);
}

#[test]
fn it_rejects_clues_touching_nothing() {
	let mut game = util::setup(&[
		&["r1", "r3", "b4", "g2", "y5"],
		&["y1", "g1", "y2", "p1", "r2"],
	], TestOptions::default());
	let hash = game.hash();

	assert_eq!(try_turn(&mut game, "Alice clues blue to Bob"), Err(ActionError::NoCardsTouched { target: Player::Bob as usize }));
	assert_eq!(try_turn(&mut game, "Alice clues 5 to Bob"), Err(ActionError::NoCardsTouched { target: Player::Bob as usize }));
	assert_eq!(game.state.clue_tokens, 8);
	assert_eq!(game.hash(), hash);
	assert_eq!(game.phase, Phase::WaitingForAction);
}

#[test]
fn it_rejects_invalid_clues() {
	let mut game = two_player(TestOptions::default());

	assert_eq!(try_turn(&mut game, "Alice clues 6 to Bob"), Err(ActionError::InvalidClueValue { value: 6 }));
	assert_eq!(try_turn(&mut game, "Alice clues 1 to Alice"), Err(ActionError::InvalidTarget { giver: 0, target: 0 }));
	assert_eq!(game.perform(0, PerformAction::Colour { target: 1, value: 9 }), Err(ActionError::InvalidClueValue { value: 9 }));
}

#[test]
fn it_rejects_clues_without_tokens() {
	let mut game = two_player(TestOptions { clue_tokens: Some(0), ..TestOptions::default() });

	assert_eq!(try_turn(&mut game, "Alice clues 1 to Bob"), Err(ActionError::NotEnoughClueTokens));
	assert_eq!(game.state.clue_tokens, 0);
}

#[test]
fn it_rejects_discards_at_max_tokens() {
	let mut game = two_player(TestOptions::default());
	let hash = game.hash();

	assert_eq!(try_turn(&mut game, "Alice discards slot 5"), Err(ActionError::AtMaxClueTokens));
	assert_eq!(game.hash(), hash);
}

#[test]
fn it_rejects_cards_outside_the_hand() {
	let mut game = two_player(TestOptions::default());
	let bobs = slot_order(&game.state, Player::Bob, 1);

	assert!(matches!(
		game.perform(0, PerformAction::Play { target: bobs }),
		Err(ActionError::NotInHand { location: CardLocation::Hand(1), .. })
	));
	assert_eq!(game.perform(0, PerformAction::Play { target: 500 }), Err(ActionError::NoSuchCard { order: 500 }));
	assert_eq!(try_turn(&mut game, "Bob clues 1 to Alice"), Err(ActionError::NotYourTurn { actor: 1, current: 0 }));
}

#[test]
fn it_regains_tokens_on_discard() {
	let mut game = two_player(TestOptions { clue_tokens: Some(7), ..TestOptions::default() });

	take_turn(&mut game, "Alice discards slot 5");
	assert_eq!(game.state.clue_tokens, 8);
	assert_eq!(game.state.discard_pile.len(), 1);
}

#[test]
fn it_halves_tokens_when_clue_starved() {
	let mut game = util::setup(&[
		&["r1", "r3", "b4", "g2", "y5"],
		&["y1", "g1", "b1", "p1", "r2"],
	], TestOptions { variant: "Clue Starved (5 Suits)", clue_tokens: Some(3), ..TestOptions::default() });

	take_turn(&mut game, "Alice clues 1 to Bob");
	assert_eq!(game.state.clue_tokens, 1);

	assert_eq!(try_turn(&mut game, "Bob clues 3 to Alice"), Err(ActionError::NotEnoughClueTokens));

	take_turn(&mut game, "Bob discards slot 5");
	assert_eq!(game.state.clue_tokens, 2);
}

#[test]
fn it_regains_a_token_when_a_stack_completes() {
	let mut game = util::setup(&[
		&["r1", "r2", "r3", "r4", "r5"],
		&["y1", "g1", "b1", "p1", "y2"],
	], TestOptions { clue_tokens: Some(3), ..TestOptions::default() });

	for short in ["r1", "r2", "r3", "r4"] {
		let order = order_of(&game, &game.state, Player::Alice, short);
		game.perform(0, PerformAction::Play { target: order }).unwrap();
		take_turn(&mut game, "Bob discards slot 5");
	}
	assert_eq!(game.state.clue_tokens, 7);

	let order = order_of(&game, &game.state, Player::Alice, "r5");
	game.perform(0, PerformAction::Play { target: order }).unwrap();

	assert_eq!(game.state.clue_tokens, 8);
	assert_eq!(game.state.play_stack_directions[Colour::Red as usize], StackDirection::Finished);
	assert!(game.state.next_playable_ranks(Colour::Red as usize).is_empty());
	assert_eq!(game.state.score(), 5);
}

#[test]
fn it_ends_after_the_last_strike() {
	let mut game = util::setup(&[
		&["r3", "r4", "b4", "g2", "y5"],
		&["y3", "g4", "b3", "p3", "r2"],
	], TestOptions { deck: &["p5", "b5", "g5"], ..TestOptions::default() });

	take_turn(&mut game, "Alice plays slot 1");
	take_turn(&mut game, "Bob plays slot 1");
	let events = take_turn(&mut game, "Alice plays slot 2");

	assert_eq!(game.state.strikes.len(), 3);
	assert!(matches!(events.last(), Some(Action::GameOver(_))));
	assert_eq!(game.phase, Phase::GameOver);
	assert_eq!(try_turn(&mut game, "Bob clues 1 to Alice"), Err(ActionError::GameOver));
}

#[test]
fn it_ends_one_round_after_the_last_draw() {
	let mut game = two_player(TestOptions {
		init: Box::new(|game: &mut Game| game.state.cards_left = 1),
		..TestOptions::default()
	});

	take_turn(&mut game, "Alice plays slot 1");
	assert_eq!(game.state.cards_left, 0);
	assert_eq!(game.state.endgame_turns, Some(2));

	take_turn(&mut game, "Bob clues 3 to Alice");
	assert_eq!(game.phase, Phase::WaitingForAction);

	// No more draws
	let hand_size = game.state.hands[0].len();
	take_turn(&mut game, "Alice discards slot 5");
	assert_eq!(game.state.hands[0].len(), hand_size - 1);
	assert_eq!(game.phase, Phase::GameOver);
}

#[test]
fn it_terminates_on_request() {
	let mut game = two_player(TestOptions::default());

	let events = game.perform(0, PerformAction::Terminate { target: 0, value: 0 }).unwrap();

	assert!(matches!(events[..], [Action::GameOver(_)]));
	assert_eq!(game.phase, Phase::GameOver);
	assert!(!game.in_progress);
}

#[test]
fn it_keeps_every_card_in_one_holder() {
	let mut game = util::setup(&[
		&["r1", "r3", "b4", "g2", "y5"],
		&["y1", "g1", "b1", "p1", "r2"],
		&["y2", "g2", "b3", "p2", "r4"],
	], TestOptions { clue_tokens: Some(6), ..TestOptions::default() });

	assert!(game.state.check_partition());

	for action in [
		"Alice plays slot 1",
		"Bob plays slot 1",
		"Cathy discards slot 5",
		"Alice clues 2 to Cathy",
		"Bob plays slot 5",
		"Cathy plays slot 2",
	] {
		take_turn(&mut game, action);
		assert!(game.state.check_partition(), "Partition broken after '{action}'");
	}

	let held = game.state.hands.iter().map(Vec::len).sum::<usize>()
		+ game.state.play_stacks.iter().map(Vec::len).sum::<usize>()
		+ game.state.discard_pile.len();
	assert_eq!(held, game.state.card_order + game.state.variant.suits.len());
}

#[test]
fn it_plays_from_a_configured_start() {
	let mut game = two_player(TestOptions {
		init: Box::new(|game: &mut Game| game.state.play_stack_starts[Colour::Red as usize] = Some(3)),
		..TestOptions::default()
	});

	assert_eq!(game.state.next_playable_ranks(Colour::Red as usize), vec![3]);

	take_turn(&mut game, "Alice plays slot 2");
	assert_eq!(game.state.stack_rank(Colour::Red as usize), Some(3));
	assert_eq!(game.state.next_playable_ranks(Colour::Red as usize), vec![4]);
	assert!(game.state.strikes.is_empty());
}

#[test]
fn it_counts_reversed_suits_down() {
	let mut game = util::setup(&[
		&["p1", "p5", "b4", "g2", "y5"],
		&["y1", "g1", "b1", "r1", "r2"],
	], TestOptions { variant: "Reversed (5 Suits)", ..TestOptions::default() });

	take_turn(&mut game, "Alice plays slot 1");
	assert_eq!(game.state.strikes.len(), 1);

	take_turn(&mut game, "Bob clues 5 to Alice");
	take_turn(&mut game, "Alice plays slot 2");

	assert_eq!(game.state.stack_rank(Colour::Purple as usize), Some(5));
	assert_eq!(game.state.next_playable_ranks(Colour::Purple as usize), vec![4]);
}

#[test]
fn it_fixes_direction_on_the_first_play() {
	let mut game = util::setup(&[
		&["r5", "r4", "b4", "g2", "y5"],
		&["y1", "g1", "b1", "p1", "r2"],
	], TestOptions { variant: "Up or Down (5 Suits)", ..TestOptions::default() });

	assert_eq!(game.state.play_stack_directions[Colour::Red as usize], StackDirection::Undecided);

	take_turn(&mut game, "Alice plays slot 1");
	assert_eq!(game.state.play_stack_directions[Colour::Red as usize], StackDirection::Down);
	assert_eq!(game.state.next_playable_ranks(Colour::Red as usize), vec![4]);

	take_turn(&mut game, "Bob clues red to Alice");
	take_turn(&mut game, "Alice plays slot 2");

	assert_eq!(game.state.stack_rank(Colour::Red as usize), Some(4));
	assert_eq!(game.state.cards_left, 45 - 12);
}

#[test]
fn it_rejects_unsupported_player_counts() {
	let new_game = |names: &[&str]| Game::new(GameOptions::new(names), Arc::new(util::variant("No Variant")), Vec::new());

	let seven = ["Alice", "Bob", "Cathy", "Donald", "Emily", "Frank", "Grace"];
	assert_eq!(new_game(&seven).err(), Some(SetupError::InvalidPlayerCount { count: 7 }));
	assert_eq!(new_game(&["Alice"]).err(), Some(SetupError::InvalidPlayerCount { count: 1 }));

	let six = new_game(&seven[..6]).unwrap();
	assert_eq!(six.state.hand_size(), 3);
}

#[test]
fn it_waits_for_the_turn_before_the_next_action() {
	let mut game = two_player(TestOptions::default());
	let touched = slot_order(&game.state, Player::Bob, 5);

	game.handle_action(&Action::clue(Player::Alice as usize, Player::Bob as usize, clue(ClueKind::COLOUR, Colour::Red as usize), vec![touched], 0));
	assert_eq!(game.phase, Phase::Resolving);
	assert_eq!(try_turn(&mut game, "Bob clues red to Alice"), Err(ActionError::NotAwaiting));

	game.handle_action(&Action::turn(1, Player::Bob as i32));
	assert_eq!(game.phase, Phase::WaitingForAction);
	take_turn(&mut game, "Bob clues red to Alice");
}

#[test]
fn it_stamps_strikes_with_the_segment() {
	let mut game = two_player(TestOptions::default());
	game.handle_action(&Action::turn(7, Player::Bob as i32));

	let events = take_turn(&mut game, "Bob plays slot 5");

	assert!(matches!(events[1], Action::Strike(StrikeAction { turn: 1, .. })));
	assert_eq!(game.state.strikes[0].segment, 1);
}
