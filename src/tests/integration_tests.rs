//! Integration tests simulating real play through the public intent API.
//!
//! These drive full turns the way a UI would: submit intents, let the
//! dispatch layer validate and apply them, and assert on the resulting
//! state and trace.

use rand::prelude::IndexedRandom;

use crate::catalog::Catalog;
use crate::color::Color;
use crate::decision::{AutoDecisionMaker, ScriptedDecisionMaker};
use crate::game_loop::{Intent, IntentOutcome, apply_intent, legal_intents};
use crate::game_state::{GameConfig, GameState, GameStatus};
use crate::ids::{PlayerId, ShopId, SpaceId};
use crate::trace::TraceEvent;
use crate::turn::TurnStep;

fn catalog() -> &'static Catalog {
    Catalog::standard()
}

fn new_game(names: &[&str]) -> GameState {
    GameState::new(names, GameConfig::default(), catalog()).unwrap()
}

fn place(game: &mut GameState, raw: u32) {
    apply_intent(
        game,
        catalog(),
        Intent::PlaceWorker {
            space: SpaceId::from_raw(raw),
        },
        &mut AutoDecisionMaker,
    )
    .unwrap();
}

fn resolve(game: &mut GameState) {
    apply_intent(game, catalog(), Intent::ResolveAction, &mut AutoDecisionMaker).unwrap();
}

fn end_turn(game: &mut GameState) {
    apply_intent(game, catalog(), Intent::EndTurn, &mut AutoDecisionMaker).unwrap();
}

#[test]
fn test_shop_cost_modifier_never_leaks_between_players() {
    let mut game = new_game(&["Alice", "Bob"]);

    // Alice visits the Shrine: +1 Purple and a -1 personal discount.
    place(&mut game, 9);
    resolve(&mut game);
    end_turn(&mut game);

    assert_eq!(game.players[0].shop_cost_modifier, -1);
    assert_eq!(game.players[1].shop_cost_modifier, 0);

    // Bob buys the same discount from the Purple shop on his own turn.
    game.players[1].ledger.add(Color::Purple, 1);
    game.players[1].ledger.add(Color::Green, 1);
    apply_intent(
        &mut game,
        catalog(),
        Intent::BuyShop {
            shop: ShopId::Regular {
                color: Color::Purple,
                round: 1,
            },
        },
        &mut AutoDecisionMaker,
    )
    .unwrap();

    assert_eq!(game.players[0].shop_cost_modifier, -1);
    assert_eq!(game.players[1].shop_cost_modifier, -1);
}

#[test]
fn test_victory_purchase_is_an_exact_exchange() {
    let mut game = new_game(&["Alice", "Bob"]);
    game.players[0].ledger.add(Color::Red, 5);

    apply_intent(
        &mut game,
        catalog(),
        Intent::BuyShop {
            shop: ShopId::Victory { color: Color::Red },
        },
        &mut AutoDecisionMaker,
    )
    .unwrap();

    assert_eq!(game.players[0].ledger.amount(Color::Red), 0);
    assert_eq!(game.players[0].victory_points, 3);
}

#[test]
fn test_occupied_space_rejection_leaves_state_untouched() {
    let mut game = new_game(&["Alice", "Bob"]);
    place(&mut game, 5);
    resolve(&mut game);
    end_turn(&mut game);

    let players_before = game.players.clone();
    let board_before = game.board.clone();
    let turn_before = game.turn.clone();
    let history_before = game.history.clone();

    let err = apply_intent(
        &mut game,
        catalog(),
        Intent::PlaceWorker {
            space: SpaceId::from_raw(5),
        },
        &mut AutoDecisionMaker,
    )
    .unwrap_err();
    assert!(matches!(err, crate::game_loop::RulesError::Placement(_)));

    assert_eq!(game.players, players_before);
    assert_eq!(game.board, board_before);
    assert_eq!(game.turn, turn_before);
    assert_eq!(game.history, history_before);
}

#[test]
fn test_repeat_chain_of_depth_six_rejects_the_whole_intent() {
    let mut game = new_game(&["Alice", "Bob"]);
    game.turn.round = 2;

    // Warpath repeats; always answering "Warpath" builds a chain that must
    // die at the fifth link and void the resolution.
    place(&mut game, 2);
    let mut dm = ScriptedDecisionMaker::new();
    for _ in 0..6 {
        dm = dm.repeat(SpaceId::from_raw(2));
    }
    let err = apply_intent(&mut game, catalog(), Intent::ResolveAction, &mut dm).unwrap_err();
    assert_eq!(
        err,
        crate::game_loop::RulesError::Execution(crate::executor::ExecutionError::RecursionLimit)
    );

    // The placement stands, the action is still pending, nothing was gained.
    assert_eq!(game.turn.step, TurnStep::WorkerPlaced);
    assert_eq!(game.turn.pending_action, Some(SpaceId::from_raw(2)));
    assert!(game.players[0].ledger.is_empty());
}

#[test]
fn test_extra_worker_reopens_placement_in_the_same_turn() {
    let mut game = new_game(&["Alice", "Bob"]);
    game.turn.round = 2;

    // Guildhall grants an extra worker.
    place(&mut game, 4);
    resolve(&mut game);
    assert_eq!(game.turn.step, TurnStep::AwaitingWorkerPlacement);
    assert_eq!(game.players[0].workers_left, 2);

    // The same turn fits a second placement.
    place(&mut game, 1);
    resolve(&mut game);
    assert_eq!(game.players[0].ledger.amount(Color::Red), 2);
    end_turn(&mut game);
    assert_eq!(game.turn.active_player, PlayerId::from_index(1));
}

#[test]
fn test_extra_turn_keeps_the_same_player_active() {
    let mut game = new_game(&["Alice", "Bob"]);
    game.turn.round = 3;

    // Beacon grants an extra turn.
    place(&mut game, 12);
    resolve(&mut game);
    end_turn(&mut game);
    assert_eq!(game.turn.active_player, PlayerId::from_index(0));
    assert!(
        game.trace
            .events()
            .iter()
            .any(|e| matches!(e, TraceEvent::ExtraTurnTaken { .. }))
    );
}

#[test]
fn test_steal_requires_target_selection_and_clamps() {
    let mut game = new_game(&["Alice", "Bob", "Carol"]);
    game.players[2].ledger.add(Color::Yellow, 1);

    // Crypt steals 2 Yellow; Carol only has 1.
    game.turn.round = 2;
    place(&mut game, 16);
    let mut dm = ScriptedDecisionMaker::new().steal_from(PlayerId::from_index(2));
    apply_intent(&mut game, catalog(), Intent::ResolveAction, &mut dm).unwrap();

    assert_eq!(game.players[0].ledger.amount(Color::Yellow), 1);
    assert_eq!(game.players[2].ledger.amount(Color::Yellow), 0);
    assert_eq!(game.players[1].ledger.amount(Color::Yellow), 0);
}

#[test]
fn test_round_boundary_resets_board_and_workers() {
    let mut game = new_game(&["Alice", "Bob"]);

    // Exhaust everyone's workers over four turns.
    for raw in [1, 3, 5, 7] {
        place(&mut game, raw);
        resolve(&mut game);
        end_turn(&mut game);
    }

    assert_eq!(game.turn.round, 2);
    assert!(game.board.spaces().iter().all(|s| !s.is_occupied()));
    assert!(game.players.iter().all(|p| p.workers_left == 2));
    assert!(
        game.trace
            .events()
            .iter()
            .any(|e| matches!(e, TraceEvent::RoundAdvanced { round: 2 }))
    );
}

#[test]
fn test_full_game_finishes_with_a_winner() {
    let mut game = new_game(&["Alice", "Bob"]);

    let mut finished = false;
    for _ in 0..100 {
        let intents = legal_intents(&game, catalog());
        // Deterministic drill: always place on the first open space, resolve,
        // end the turn.
        let next = intents
            .iter()
            .find(|i| matches!(i, Intent::PlaceWorker { .. }))
            .or_else(|| intents.iter().find(|i| matches!(i, Intent::ResolveAction)))
            .or_else(|| intents.iter().find(|i| matches!(i, Intent::EndTurn)))
            .copied();
        let Some(next) = next else { break };
        match apply_intent(&mut game, catalog(), next, &mut AutoDecisionMaker) {
            Ok(IntentOutcome::GameFinished { .. }) => {
                finished = true;
                break;
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }

    assert!(finished, "three rounds of drills must end the game");
    assert!(matches!(game.status, GameStatus::Finished { .. }));
    assert!(
        game.trace
            .events()
            .iter()
            .any(|e| matches!(e, TraceEvent::GameFinished { .. }))
    );
}

#[test]
fn test_random_playout_preserves_ledger_invariants() {
    let mut game = new_game(&["Alice", "Bob", "Carol"]);
    let mut rng = rand::rng();

    for _ in 0..20_000 {
        if game.is_finished() {
            break;
        }
        let intents = legal_intents(&game, catalog());
        assert!(!intents.is_empty(), "an unfinished game always has a move");
        let intent = *intents.choose(&mut rng).unwrap();
        // A rejection must not corrupt state, so the result is irrelevant
        // to the invariants being checked here.
        let _ = apply_intent(&mut game, catalog(), intent, &mut AutoDecisionMaker);

        for player in &game.players {
            assert_eq!(player.ledger.entries().len(), Color::COUNT);
        }
    }

    assert!(game.is_finished(), "random play must terminate");
}

#[test]
fn test_blue_bypass_purchase_mid_placement_via_intents() {
    let mut game = new_game(&["Alice", "Bob"]);
    game.players[0].ledger.add(Color::Green, 2);

    place(&mut game, 1);
    assert_eq!(game.turn.step, TurnStep::WorkerPlaced);

    // Regular green shop is closed mid-placement...
    let err = apply_intent(
        &mut game,
        catalog(),
        Intent::BuyShop {
            shop: ShopId::Regular {
                color: Color::Green,
                round: 1,
            },
        },
        &mut AutoDecisionMaker,
    )
    .unwrap_err();
    assert_eq!(
        err,
        crate::game_loop::RulesError::Shop(crate::shop::ShopError::WrongPhase)
    );

    // ...but the Blue wharf bypasses the restriction.
    apply_intent(
        &mut game,
        catalog(),
        Intent::BuyShop {
            shop: ShopId::Regular {
                color: Color::Blue,
                round: 1,
            },
        },
        &mut AutoDecisionMaker,
    )
    .unwrap();
    assert_eq!(game.players[0].ledger.amount(Color::Blue), 2);
}
