//! Player decision seam.
//!
//! Some effects need player input mid-resolution: picking whom to steal
//! from, which action to repeat, which resources cover the `any` part of a
//! shop cost. The `DecisionMaker` trait is that seam; the engine calls it
//! synchronously and validates every answer.
//!
//! Default implementations pick the first legal option, which keeps tests
//! and automation terse. Returning `None` from a mandatory choice rejects
//! the whole intent.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use rand::prelude::IndexedRandom;

use crate::color::Color;
use crate::game_state::GameState;
use crate::ids::{PlayerId, SpaceId};

/// Supplies the player choices effects need while resolving.
pub trait DecisionMaker {
    /// Choose which player to steal from. `candidates` is never empty.
    fn choose_steal_target(
        &mut self,
        _game: &GameState,
        _acting: PlayerId,
        candidates: &[PlayerId],
    ) -> Option<PlayerId> {
        candidates.first().copied()
    }

    /// Choose which action space to repeat. `options` is never empty.
    fn choose_action_to_repeat(
        &mut self,
        _game: &GameState,
        _acting: PlayerId,
        options: &[SpaceId],
    ) -> Option<SpaceId> {
        options.first().copied()
    }

    /// Choose the colors paying the `any` part of a shop cost, one entry per
    /// resource. Returning `None` lets the engine pay greedily from the
    /// buyer's most plentiful colors.
    fn choose_any_payment(
        &mut self,
        _game: &GameState,
        _acting: PlayerId,
        _amount: u32,
    ) -> Option<Vec<Color>> {
        None
    }
}

/// Takes every default: first option, greedy payment.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDecisionMaker;

impl DecisionMaker for AutoDecisionMaker {}

/// Answers from pre-loaded queues; falls back to the defaults when a queue
/// runs dry. Used by tests to script multi-step resolutions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisionMaker {
    steal_targets: VecDeque<PlayerId>,
    repeat_choices: VecDeque<SpaceId>,
    payments: VecDeque<Vec<Color>>,
}

impl ScriptedDecisionMaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steal_from(mut self, target: PlayerId) -> Self {
        self.steal_targets.push_back(target);
        self
    }

    pub fn repeat(mut self, space: SpaceId) -> Self {
        self.repeat_choices.push_back(space);
        self
    }

    pub fn pay_with(mut self, colors: Vec<Color>) -> Self {
        self.payments.push_back(colors);
        self
    }
}

impl DecisionMaker for ScriptedDecisionMaker {
    fn choose_steal_target(
        &mut self,
        _game: &GameState,
        _acting: PlayerId,
        candidates: &[PlayerId],
    ) -> Option<PlayerId> {
        self.steal_targets
            .pop_front()
            .or_else(|| candidates.first().copied())
    }

    fn choose_action_to_repeat(
        &mut self,
        _game: &GameState,
        _acting: PlayerId,
        options: &[SpaceId],
    ) -> Option<SpaceId> {
        self.repeat_choices
            .pop_front()
            .or_else(|| options.first().copied())
    }

    fn choose_any_payment(
        &mut self,
        _game: &GameState,
        _acting: PlayerId,
        _amount: u32,
    ) -> Option<Vec<Color>> {
        self.payments.pop_front()
    }
}

/// Picks uniformly among the legal options. Drives the CLI's demo mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDecisionMaker;

impl DecisionMaker for RandomDecisionMaker {
    fn choose_steal_target(
        &mut self,
        _game: &GameState,
        _acting: PlayerId,
        candidates: &[PlayerId],
    ) -> Option<PlayerId> {
        let mut rng = rand::rng();
        candidates.choose(&mut rng).copied()
    }

    fn choose_action_to_repeat(
        &mut self,
        _game: &GameState,
        _acting: PlayerId,
        options: &[SpaceId],
    ) -> Option<SpaceId> {
        let mut rng = rand::rng();
        options.choose(&mut rng).copied()
    }
}

// ============================================================================
// CLI Decision Maker
// ============================================================================

/// Prompts the user on stdin for each choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliDecisionMaker;

impl DecisionMaker for CliDecisionMaker {
    fn choose_steal_target(
        &mut self,
        game: &GameState,
        _acting: PlayerId,
        candidates: &[PlayerId],
    ) -> Option<PlayerId> {
        println!("Choose a player to steal from:");
        for (index, id) in candidates.iter().enumerate() {
            let name = game.player(*id).map(|p| p.name.as_str()).unwrap_or("?");
            println!("  [{}] {}", index, name);
        }
        prompt_index(candidates.len()).map(|i| candidates[i])
    }

    fn choose_action_to_repeat(
        &mut self,
        _game: &GameState,
        _acting: PlayerId,
        options: &[SpaceId],
    ) -> Option<SpaceId> {
        println!("Choose an action space to repeat:");
        for (index, id) in options.iter().enumerate() {
            let name = crate::catalog::Catalog::standard()
                .action(*id)
                .map(|a| a.name)
                .unwrap_or("?");
            println!("  [{}] {}", index, name);
        }
        prompt_index(options.len()).map(|i| options[i])
    }
}

/// Read an index below `len` from stdin; empty input or EOF declines.
fn prompt_index(len: usize) -> Option<usize> {
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).unwrap_or(0) == 0 {
            return None;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<usize>() {
            Ok(index) if index < len => return Some(index),
            _ => println!("Enter a number below {}", len),
        }
    }
}
