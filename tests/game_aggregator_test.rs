//! Tests for multi-round aggregation and game finalization.

use chrono::{TimeZone, Utc};
use impossible_ttt::{
    FixedClock, Game, GameError, Grid, Outcome, Round, SequentialIds, Side, Tokens, finalize_game,
    game_winner, is_game_over,
};

fn game(num_rounds: usize, winners: &[Outcome]) -> Game {
    let rounds = winners
        .iter()
        .map(|winner| Round::new(Grid::new(), *winner))
        .collect();
    Game::new(num_rounds, Tokens::new("X", "O").expect("Valid tokens"), Side::Human)
        .expect("Valid game")
        .with_rounds(rounds)
}

#[test]
fn test_two_of_three_not_over() {
    let game = game(3, &[Outcome::Human, Outcome::Computer]);
    assert!(!is_game_over(&game));
    assert!(matches!(
        game_winner(&game),
        Err(GameError::GameInProgress { played: 2, total: 3 })
    ));
}

#[test]
fn test_human_wins_two_of_three() {
    let game = game(3, &[Outcome::Human, Outcome::Computer, Outcome::Human]);
    assert!(is_game_over(&game));
    assert_eq!(game_winner(&game), Ok(Outcome::Human));
}

#[test]
fn test_split_with_draw_is_draw() {
    let game = game(3, &[Outcome::Human, Outcome::Computer, Outcome::Draw]);
    assert_eq!(game_winner(&game), Ok(Outcome::Draw));
}

#[test]
fn test_all_draws_is_draw() {
    let game = game(2, &[Outcome::Draw, Outcome::Draw]);
    assert_eq!(game_winner(&game), Ok(Outcome::Draw));
}

#[test]
fn test_finalized_record_is_complete() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 18, 30, 0).unwrap());
    let mut ids = SequentialIds::new("final");
    let game = game(1, &[Outcome::Computer]);

    let record = finalize_game(&game, &mut ids, &clock).expect("Game is over");
    assert_eq!(record.id(), "final-1");
    assert_eq!(record.winner(), &Outcome::Computer);
    assert_eq!(record.num_rounds(), &1);
    assert_eq!(record.rounds(), game.rounds());
    assert_eq!(record.finish_date_time(), "2026-10-16T18:30:00.000Z");
}
