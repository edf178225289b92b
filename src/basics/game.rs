use colored::Colorize;
use log::info;
use std::sync::Arc;

use super::action::{Action, PerformAction};
use super::card::Identity;
use super::resolve::{self, IdentityLookup};
use super::state::GameState;
use super::variant::Variant;
use crate::basics;
use crate::error::{ActionError, SetupError};
use crate::hypo::HypoBranch;

/** The resolution state machine of the real game. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
	WaitingForAction,
	Resolving,
	Resolved,
	GameOver,
}

pub mod end_condition {
	pub const NORMAL: usize = 1;
	pub const STRIKEOUT: usize = 2;
	pub const TERMINATED: usize = 4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedReplay {
	pub am_leader: bool,
}

#[derive(Debug, Clone)]
pub struct GameOptions {
	pub table_id: u32,
	pub player_names: Vec<String>,
	/** The player whose cards are hidden, or None when spectating. */
	pub our_player_index: Option<usize>,
	pub starting_player: usize,
	pub shared: Option<SharedReplay>,
}

impl GameOptions {
	pub fn new(player_names: &[&str]) -> Self {
		Self {
			table_id: 0,
			player_names: player_names.iter().map(|name| name.to_string()).collect(),
			our_player_index: None,
			starting_player: 0,
			shared: None,
		}
	}
}

/** The explicit context threaded through every operation: the real game plus any hypothetical on top of it. */
#[derive(Debug, Clone)]
pub struct Game {
	pub table_id: u32,
	pub state: GameState,
	pub phase: Phase,
	/** The true identity of every card in deck order, where known. */
	pub identities: Vec<Option<Identity>>,
	pub hypothetical: Option<HypoBranch>,
	pub shared: Option<SharedReplay>,
	pub in_progress: bool,
	/** Suppresses action logging while catching up on a replay. */
	pub catchup: bool,
	/** Outgoing relay commands, as (command, JSON payload). */
	pub queued_cmds: Vec<(String, String)>,
}

impl Game {
	pub fn new(options: GameOptions, variant: Arc<Variant>, identities: Vec<Option<Identity>>) -> Result<Self, SetupError> {
		let GameOptions { table_id, player_names, our_player_index, starting_player, shared } = options;

		if !(2..=6).contains(&player_names.len()) {
			return Err(SetupError::InvalidPlayerCount { count: player_names.len() });
		}

		let mut state = GameState::new(player_names, our_player_index, variant);
		state.turn.current_player_index = starting_player;

		Ok(Self {
			table_id,
			state,
			phase: Phase::WaitingForAction,
			identities,
			hypothetical: None,
			shared,
			in_progress: true,
			catchup: false,
			queued_cmds: Vec::new(),
		})
	}

	/** Deals the starting hands from the identity table, one player at a time. */
	pub fn deal(&mut self) {
		for player_index in 0..self.state.num_players {
			for _ in 0..self.state.hand_size() {
				let order = self.state.card_order;
				let id = self.identities.get(order).copied().flatten();
				self.handle_action(&Action::draw(player_index, order, id));
			}
		}
	}

	pub fn hash(&self) -> u64 {
		self.state.hash()
	}

	pub fn lookup(&self) -> IdentityLookup<'_> {
		IdentityLookup::new(&self.identities)
	}

	/**
	 * Applies an event from the server (or from resolving an action) to the real state.
	 * Events other than draws move the phase: actions and strikes resolve, a turn waits for the next action.
	 */
	pub fn handle_action(&mut self, action: &Action) {
		if !self.catchup && !matches!(action, Action::Draw(_) | Action::Turn(_)) {
			info!("{}", format!("Turn {}: {}", self.state.turn.turn_num, action.fmt(&self.state.variant, &self.state.player_names)).yellow());
		}

		basics::handle_event(&mut self.state, action);

		self.phase = match action {
			_ if self.phase == Phase::GameOver => Phase::GameOver,
			Action::Clue(_) | Action::Play(_) | Action::Discard(_) | Action::Strike(_) => Phase::Resolving,
			Action::Draw(_) => self.phase,
			Action::Turn(_) if self.state.ended() => Phase::Resolved,
			Action::Turn(_) => Phase::WaitingForAction,
			Action::GameOver(_) => Phase::GameOver,
		};

		if let Action::GameOver(_) = action {
			self.in_progress = false;
			info!("Game over! Score {}/{}", self.state.score(), self.state.max_score());
		}
	}

	/**
	 * Resolves an action taken by a player against the real state.
	 * The action is validated before anything is written, so a rejected action changes nothing.
	 */
	pub fn perform(&mut self, actor: usize, action: PerformAction) -> Result<Vec<Action>, ActionError> {
		match self.phase {
			Phase::GameOver => return Err(ActionError::GameOver),
			Phase::Resolving | Phase::Resolved => return Err(ActionError::NotAwaiting),
			Phase::WaitingForAction => (),
		}

		if self.hypothetical.is_some() {
			return Err(ActionError::HypotheticalActive);
		}

		let current = self.state.turn.current_player_index;
		if actor != current {
			return Err(ActionError::NotYourTurn { actor, current });
		}

		if let PerformAction::Terminate { .. } = action {
			let event = Action::game_over(end_condition::TERMINATED, actor);
			self.handle_action(&event);
			return Ok(vec![event]);
		}

		let lookup = self.lookup();
		resolve::validate(&self.state, actor, &action, &lookup)?;
		let mut events = resolve::to_events(&self.state, actor, &action, &lookup);

		for event in &events {
			self.handle_action(event);
		}

		if self.phase == Phase::Resolved {
			let condition = if self.state.strikes.len() >= self.state.variant.max_strikes { end_condition::STRIKEOUT } else { end_condition::NORMAL };
			let event = Action::game_over(condition, actor);
			self.handle_action(&event);
			events.push(event);
		}

		Ok(events)
	}

	/** Whether local calls may change a hypothetical. Followers only apply what the leader sends. */
	pub fn can_lead(&self) -> bool {
		self.shared.is_none_or(|shared| shared.am_leader)
	}

	pub(crate) fn queue_replay_command(&mut self, data: serde_json::Value) {
		if self.shared.is_some_and(|shared| shared.am_leader) {
			self.queued_cmds.push(("replayAction".to_string(), data.to_string()));
		}
	}
}
