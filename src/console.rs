use itertools::Itertools;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::basics::action::PerformAction;
use crate::basics::card::Identity;
use crate::basics::clue::first_clue_change;
use crate::basics::clue_tokens;
use crate::basics::game::Game;
use crate::basics::state::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HypoArg {
	Start, End, Back, Reveal
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
	Hypo(HypoArg),
	Play(usize),
	Discard(usize),
	Clue { target: usize, colour: bool, value: usize },
	Morph(usize, String),
	Show,
}

impl ConsoleCommand {
	pub fn parse(input: &str) -> Option<Self> {
		let parts: Vec<&str> = input.split_whitespace().collect();
		let num = |i: usize| parts.get(i).and_then(|p| p.parse::<usize>().ok());

		match parts.first()?.to_lowercase().as_str() {
			"hypo" | "h" => {
				let arg = match *parts.get(1)? {
					"start" => HypoArg::Start,
					"end" => HypoArg::End,
					"back" | "-" => HypoArg::Back,
					"reveal" => HypoArg::Reveal,
					_ => return None,
				};
				Some(ConsoleCommand::Hypo(arg))
			}
			"play" | "p" => Some(ConsoleCommand::Play(num(1)?)),
			"discard" | "d" => Some(ConsoleCommand::Discard(num(1)?)),
			"clue" | "c" => {
				let colour = match *parts.get(2)? {
					"colour" | "color" => true,
					"rank" => false,
					_ => return None,
				};
				Some(ConsoleCommand::Clue { target: num(1)?, colour, value: num(3)? })
			}
			"morph" | "m" => Some(ConsoleCommand::Morph(num(1)?, parts.get(2)?.to_string())),
			"show" | "s" => Some(ConsoleCommand::Show),
			_ => None,
		}
	}

	/** The action this command takes, if it is one. */
	pub fn to_perform(&self) -> Option<PerformAction> {
		match *self {
			ConsoleCommand::Play(target) => Some(PerformAction::Play { target }),
			ConsoleCommand::Discard(target) => Some(PerformAction::Discard { target }),
			ConsoleCommand::Clue { target, colour: true, value } => Some(PerformAction::Colour { target, value }),
			ConsoleCommand::Clue { target, colour: false, value } => Some(PerformAction::Rank { target, value }),
			_ => None,
		}
	}
}

/** Renders hands, stacks and tokens of a state, one line each. */
pub fn describe(state: &GameState) -> String {
	let mut lines = Vec::new();

	for (player_index, hand) in state.hands.iter().enumerate() {
		let cards = hand.iter().map(|&order| {
			let card = &state.cards[order];
			let id = state.log_iden(card);
			if card.clued() { format!("[{id}]({order})") } else { format!("{id}({order})") }
		}).join(" ");

		lines.push(format!("{}: {cards}", state.player_names[player_index]));
	}

	let stacks = (0..state.variant.suits.len()).map(|suit_index| {
		match state.stack_rank(suit_index) {
			Some(rank) => state.log_id(Identity { suit_index, rank }),
			None => format!("{}0", state.variant.short_form(suit_index)),
		}
	}).join(" ");

	lines.push(format!("stacks: {stacks}"));
	lines.push(format!(
		"clues: {}, strikes: {}, cards left: {}, score: {}/{}",
		clue_tokens::displayed(state.clue_tokens, &state.variant),
		state.strikes.len(),
		state.cards_left,
		state.score(),
		state.max_score()
	));
	lines.join("\n")
}

/** Lists the clue log of the visible state. Entries from the first one that differs from the real log are marked as hypothetical. */
pub fn describe_clues(real: &GameState, visible: &GameState) -> Vec<String> {
	let changed = first_clue_change(&real.clues, &visible.clues).unwrap_or(visible.clues.len());

	visible.clues.iter().enumerate().map(|(index, clue)| {
		let line = format!(
			"{} clues {} to {} ({})",
			visible.player_names[clue.giver],
			clue.to_base().name(&visible.variant),
			visible.player_names[clue.target],
			clue.list.iter().join(",")
		);
		if index >= changed { format!("{line} [hypo]") } else { line }
	}).collect()
}

/** Runs a console command against the game, inside the hypothetical when one is active. */
pub fn handle_command(game: &mut Game, command: ConsoleCommand) {
	match command {
		ConsoleCommand::Hypo(HypoArg::Start) => game.hypo_start(),
		ConsoleCommand::Hypo(HypoArg::End) => game.hypo_end(),
		ConsoleCommand::Hypo(HypoArg::Back) => game.hypo_back(),
		ConsoleCommand::Hypo(HypoArg::Reveal) => game.hypo_toggle_revealed(),
		ConsoleCommand::Morph(order, short) => match game.state.variant.expand_short(&short) {
			Some(id) => game.hypo_morph(order, id),
			None => println!("Unknown identity {short}."),
		},
		ConsoleCommand::Show => {
			println!("{}", describe(game.visible_state()));
			for line in describe_clues(&game.state, game.visible_state()) {
				println!("{line}");
			}
		}
		ref other => {
			let Some(action) = other.to_perform() else {
				return;
			};

			let result = if game.hypothetical.is_some() {
				game.hypo_send(action)
			}
			else {
				let actor = game.state.turn.current_player_index;
				game.perform(actor, action).map(|_| ())
			};

			if let Err(e) = result {
				println!("Rejected: {e}");
			}
		}
	}
}

pub fn spawn_console(command_sender: mpsc::UnboundedSender<ConsoleCommand>) {
	tokio::spawn(async move {
		let stdin = io::stdin();
		let reader = BufReader::new(stdin);
		let mut lines = reader.lines();

		while let Ok(Some(line)) = lines.next_line().await {
			let line = line.trim();

			if line.is_empty() {
				continue;
			}

			match ConsoleCommand::parse(line) {
				Some(cmd) => {
					if let Err(e) = command_sender.send(cmd) {
						eprintln!("Error: Console channel closed {}", e);
						break;
					}
				}
				None => {
					println!("Unknown command.");
				}
			}
		}
	});
}
