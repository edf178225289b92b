use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::{collections::HashMap, env, fs, sync::Arc};
use tokio::sync::mpsc;

use hanabi_hypo::basics::action::PerformAction;
use hanabi_hypo::basics::card::Identity;
use hanabi_hypo::basics::game::{Game, GameOptions};
use hanabi_hypo::basics::variant::{all_ids, card_count, Suit, Variant};
use hanabi_hypo::console::{self, ConsoleCommand};
use hanabi_hypo::logger;

struct Args {
	index: Option<usize>,
	file: Option<String>,
	variant: Option<String>,
	seed: u64,
	players: usize,
	turn: Option<usize>,
}

impl Args {
	fn parse(args: &[String]) -> Self {
		let mut hash_map = HashMap::new();

		for arg in args {
			let parts = arg.split('=').collect::<Vec<&str>>();

			if parts.len() != 2 {
				panic!("Invalid argument {arg}");
			}

			let key = parts[0];
			let value = parts[1];
			hash_map.insert(key.to_string(), value.to_string());
		}

		Self {
			index: hash_map.get("index").and_then(|e| e.parse().ok()),
			file: hash_map.get("file").cloned(),
			variant: hash_map.get("variant").cloned(),
			seed: hash_map.get("seed").and_then(|e| e.parse().ok()).unwrap_or(0),
			players: hash_map.get("players").and_then(|e| e.parse().ok()).unwrap_or(3),
			turn: hash_map.get("turn").and_then(|e| e.parse().ok()),
		}
	}
}

#[derive(Debug, Deserialize)]
struct GameData {
	players: Vec<String>,
	deck: Vec<Identity>,
	actions: Vec<PerformAction>,
}

impl GameData {
	fn from_file(file: &str) -> Self {
		let data = fs::read_to_string(file).unwrap_or_else(|e| panic!("Failed to read {file}: {e}"));
		serde_json::from_str(&data).unwrap_or_else(|e| panic!("Failed to deserialize game data: {e}"))
	}

	/** A fresh game with a shuffled deck and no actions. */
	fn shuffled(variant: &Variant, players: usize, seed: u64) -> Self {
		let mut deck = all_ids(variant)
			.flat_map(|id| std::iter::repeat_n(id, card_count(variant, id)))
			.collect::<Vec<_>>();
		deck.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

		let names = ["Alice", "Bob", "Cathy", "Donald", "Emily", "Frank"];
		Self { players: names[..players].iter().map(|n| n.to_string()).collect(), deck, actions: Vec::new() }
	}
}

fn load_variant(file: Option<&str>) -> Variant {
	match file {
		Some(file) => {
			let data = fs::read_to_string(file).unwrap_or_else(|e| panic!("Failed to read {file}: {e}"));
			Variant::from_json(&data).unwrap_or_else(|e| panic!("Failed to deserialize variant: {e}"))
		}
		None => Variant::new(0, "No Variant", vec![
			Suit::basic("Red", "r"),
			Suit::basic("Yellow", "y"),
			Suit::basic("Green", "g"),
			Suit::basic("Blue", "b"),
			Suit::basic("Purple", "p"),
		])
	}
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let args = env::args().collect::<Vec<String>>();
	let Args { index, file, variant, seed, players, turn } = Args::parse(&args[1..]);
	let _ = logger::init(logger::parse_level(env::var("HYPO_LOG_LEVEL").ok().as_deref()));

	let variant = Arc::new(load_variant(variant.as_deref()));
	let GameData { players, deck, actions } = match &file {
		Some(file) => GameData::from_file(file),
		None => GameData::shuffled(&variant, players, seed),
	};

	if index.is_some_and(|index| index >= players.len()) {
		panic!("Replay only has {} players!", players.len());
	}

	let mut options = GameOptions::new(&players.iter().map(String::as_str).collect::<Vec<_>>());
	options.our_player_index = index;

	let mut game = Game::new(options, variant, deck.into_iter().map(Some).collect()).unwrap_or_else(|e| panic!("Couldn't create game: {e}"));
	game.catchup = true;
	game.deal();

	for action in actions {
		if turn.is_some_and(|turn| game.state.turn.turn_num >= turn) {
			break;
		}

		let actor = game.state.turn.current_player_index;
		if let Err(e) = game.perform(actor, action) {
			panic!("Replay action {action:?} was rejected on turn {}: {e}", game.state.turn.turn_num);
		}
	}

	game.catchup = false;
	println!("{}", console::describe(&game.state));

	let (command_sender, mut command_receiver) = mpsc::unbounded_channel::<ConsoleCommand>();
	console::spawn_console(command_sender);

	while let Some(command) = command_receiver.recv().await {
		console::handle_command(&mut game, command);

		for (cmd, data) in game.queued_cmds.drain(..) {
			println!("{cmd} {data}");
		}
	}
	println!("Console closed.");
}
