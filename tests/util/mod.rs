#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use hanabi_hypo::basics::action::{Action, PerformAction};
use hanabi_hypo::basics::card::{CardLocation, Identity};
use hanabi_hypo::basics::clue::{BaseClue, ClueKind};
use hanabi_hypo::basics::game::{Game, GameOptions, SharedReplay};
use hanabi_hypo::basics::state::GameState;
use hanabi_hypo::basics::variant::{all_ids, card_count, total_cards, Suit, Variant};
use hanabi_hypo::error::ActionError;
use log::LevelFilter;

pub enum Colour {
	Red,Yellow,Green,Blue,Purple
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Player {
	Alice,Bob,Cathy,Donald,Emily
}

fn five_suits(last: Suit) -> Vec<Suit> {
	vec![
		Suit::basic("Red", "r"),
		Suit::basic("Yellow", "y"),
		Suit::basic("Green", "g"),
		Suit::basic("Blue", "b"),
		last,
	]
}

static VARIANTS: LazyLock<HashMap<&str, Variant>> = LazyLock::new(|| {
	let mut six = five_suits(Suit::basic("Purple", "p"));
	six.push(Suit::basic("Teal", "t"));

	HashMap::from([
		("No Variant", Variant::new(0, "No Variant", five_suits(Suit::basic("Purple", "p")))),
		("6 Suits", Variant::new(1, "6 Suits", six)),
		("Rainbow (5 Suits)", Variant::new(16, "Rainbow (5 Suits)", five_suits(Suit::basic("Rainbow", "m").all_colours()))),
		("Black (5 Suits)", Variant::new(21, "Black (5 Suits)", five_suits(Suit::basic("Black", "k").one_of_each()))),
		("Prism (5 Suits)", Variant::new(1465, "Prism (5 Suits)", five_suits(Suit::basic("Prism", "i").prism()))),
		("Reversed (5 Suits)", Variant::new(1800, "Reversed (5 Suits)", five_suits(Suit::basic("Purple", "p").reversed()))),
		("Up or Down (5 Suits)", Variant::new(1300, "Up or Down (5 Suits)", five_suits(Suit::basic("Purple", "p"))).with_up_or_down()),
		("Clue Starved (5 Suits)", Variant::new(1500, "Clue Starved (5 Suits)", five_suits(Suit::basic("Purple", "p"))).with_clue_starved()),
	])
});

static NAMES: [&str; 5] = ["Alice", "Bob", "Cathy", "Donald", "Emily"];

pub fn variant(name: &str) -> Variant {
	VARIANTS.get(name).unwrap_or_else(|| panic!("No test variant {name}")).clone()
}

pub struct TestOptions<'a> {
	pub clue_tokens: Option<usize>,
	pub starting: Player,
	pub variant: &'a str,
	/** The player whose cards are hidden. None for a spectator. */
	pub viewpoint: Option<Player>,
	/** The next cards in the deck. The rest of the deck is filled in with the unused copies. */
	pub deck: &'a [&'a str],
	pub shared: Option<SharedReplay>,
	pub init: Box<dyn Fn(&mut Game)>,
}

impl<'a> Default for TestOptions<'a> {
	fn default() -> Self {
		Self {
			clue_tokens: None,
			starting: Player::Alice,
			variant: "No Variant",
			viewpoint: Some(Player::Alice),
			deck: &[],
			shared: None,
			init: Box::new(|_| {}),
		}
	}
}

fn expand(variant: &Variant, short: &str) -> Option<Identity> {
	if short == "xx" {
		return None;
	}
	Some(variant.expand_short(short).unwrap_or_else(|| panic!("Identity {short} doesn't exist in {}", variant.name)))
}

/**
 * Builds a game where each player holds the given cards, slot 1 first.
 * Cards marked "xx" have no known identity anywhere.
 */
pub fn setup(hands: &[&[&str]], test_options: TestOptions) -> Game {
	let _ = hanabi_hypo::logger::init(LevelFilter::Info);

	let variant = variant(test_options.variant);

	// Hands are dealt oldest card first, so slot 1 is drawn last
	let mut identities: Vec<Option<Identity>> = hands.iter()
		.flat_map(|hand| hand.iter().rev().map(|short| expand(&variant, short)))
		.chain(test_options.deck.iter().map(|short| expand(&variant, short)))
		.collect();

	for id in all_ids(&variant) {
		let used = identities.iter().filter(|&&i| i == Some(id)).count();

		if used > card_count(&variant, id) {
			panic!("Found {used} copies of {}!", variant.log_id(id));
		}

		identities.extend(std::iter::repeat_n(Some(id), card_count(&variant, id) - used));
	}
	identities.truncate(total_cards(&variant));

	let mut options = GameOptions::new(&NAMES[..hands.len()]);
	options.our_player_index = test_options.viewpoint.map(|p| p as usize);
	options.starting_player = test_options.starting as usize;
	options.shared = test_options.shared;

	let mut game = Game::new(options, Arc::new(variant), identities).unwrap();
	game.catchup = true;

	for (player_index, hand) in hands.iter().enumerate() {
		for _ in 0..hand.len() {
			let order = game.state.card_order;
			let id = game.identities[order];
			game.handle_action(&Action::draw(player_index, order, id));
		}
	}

	if let Some(clue_tokens) = test_options.clue_tokens {
		game.state.clue_tokens = clue_tokens;
	}

	(test_options.init)(&mut game);
	game.catchup = false;
	game
}

pub fn slot_order(state: &GameState, player: Player, slot: usize) -> usize {
	*state.hands[player as usize].get(slot - 1).unwrap_or_else(|| panic!("{player:?} has no slot {slot}"))
}

/** Finds a card in a player's hand by its true identity. */
pub fn order_of(game: &Game, state: &GameState, player: Player, short: &str) -> usize {
	let id = state.variant.expand_short(short);
	state.hands[player as usize].iter().copied()
		.find(|&order| game.identities[order] == id)
		.unwrap_or_else(|| panic!("{player:?} doesn't hold {short}"))
}

/**
 * Parses actions such as "Alice clues red to Bob", "Bob clues 5 to Alice",
 * "Alice plays slot 2" or "Cathy discards slot 5".
 */
pub fn parse_action(state: &GameState, raw: &str) -> (usize, PerformAction) {
	let parts = raw.split_whitespace().collect::<Vec<&str>>();
	let player_index = |name: &str| state.player_names.iter().position(|n| n == name)
		.unwrap_or_else(|| panic!("Couldn't parse player {name}, not in list of players {:?}", state.player_names));

	let actor = player_index(parts[0]);

	let action = match parts[1] {
		"clues" => {
			let target = player_index(parts[4]);

			match parts[2].parse::<usize>() {
				Ok(value) => PerformAction::Rank { target, value },
				Err(_) => {
					let value = state.variant.clue_colours.iter().position(|colour| colour.eq_ignore_ascii_case(parts[2]))
						.unwrap_or_else(|| panic!("Couldn't parse colour {}", parts[2]));
					PerformAction::Colour { target, value }
				}
			}
		}
		"plays" | "discards" => {
			let slot = parts[3].parse::<usize>().unwrap_or_else(|_| panic!("Couldn't parse slot in '{raw}'"));
			let target = state.hands[actor][slot - 1];

			if parts[1] == "plays" { PerformAction::Play { target } } else { PerformAction::Discard { target } }
		}
		other => panic!("Unknown action {other}"),
	};

	(actor, action)
}

pub fn try_turn(game: &mut Game, raw: &str) -> Result<Vec<Action>, ActionError> {
	let (actor, action) = parse_action(&game.state, raw);
	game.perform(actor, action)
}

pub fn take_turn(game: &mut Game, raw: &str) -> Vec<Action> {
	try_turn(game, raw).unwrap_or_else(|e| panic!("'{raw}' was rejected: {e}"))
}

pub fn hypo_turn(game: &mut Game, raw: &str) -> Result<(), ActionError> {
	let state = game.visible_state();
	let (actor, action) = parse_action(state, raw);

	if actor != state.turn.current_player_index {
		panic!("Expected {}'s turn for '{raw}'", state.player_names[state.turn.current_player_index]);
	}
	game.hypo_send(action)
}

pub fn clue(kind: ClueKind, value: usize) -> BaseClue {
	BaseClue { kind, value }
}

pub fn location(state: &GameState, order: usize) -> CardLocation {
	state.cards[order].location
}
