//! End-to-end tests for the play session feedback loop.

use chrono::{TimeZone, Utc};
use impossible_ttt::{
    ComputerPlayer, FixedClock, GameConfig, GameSource, InMemoryStore, Location, Orchestrator,
    Outcome, PlaySession, SequentialIds, SessionError, SessionStatus, Side, StoreError,
};
use rand::rngs::StdRng;

type TestSession = PlaySession<StdRng, SequentialIds, FixedClock>;

fn session(config: &GameConfig, seed: u64) -> TestSession {
    let orchestrator = Orchestrator::with_capabilities(
        ComputerPlayer::seeded(seed),
        SequentialIds::new("game"),
        FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 20, 0, 0).unwrap()),
    );
    let mut session = PlaySession::new(orchestrator, InMemoryStore::new());
    session.start(config).expect("Valid config");
    session
}

fn play_out(session: &mut TestSession, human_seed: u64) -> impossible_ttt::GameRecord {
    let mut human = ComputerPlayer::seeded(human_seed);
    let mut status = session.settle().expect("Settles");
    let mut moves = 0;
    loop {
        match status {
            SessionStatus::Finished(record) => return record,
            SessionStatus::NoGame => panic!("Game vanished"),
            SessionStatus::AwaitingHuman => {
                let grid = session.game().expect("Game in progress").current_squares();
                let location = human.choose_move(grid).expect("Human has a move");
                status = session.human_move(location).expect("Legal move");
                moves += 1;
                assert!(moves < 100, "Session did not terminate");
            }
        }
    }
}

#[test]
fn test_full_game_archives_one_record() {
    let config = GameConfig::default().with_num_rounds(3);
    let mut session = session(&config, 11);

    let record = play_out(&mut session, 12);

    assert_eq!(record.rounds().len(), 3);
    assert_eq!(record.id(), "game-1");
    assert!(session.game().is_none());
    assert!(session.store().fetch_current_game().is_none());
    assert_eq!(session.store().archive().len(), 1);
    assert_eq!(session.store().record("game-1"), Some(&record));

    let score = record.rounds().iter().fold((0, 0), |(h, c), round| match round.winner {
        Outcome::Human => (h + 1, c),
        Outcome::Computer => (h, c + 1),
        Outcome::Draw => (h, c),
    });
    let expected = match score.0.cmp(&score.1) {
        std::cmp::Ordering::Greater => Outcome::Human,
        std::cmp::Ordering::Less => Outcome::Computer,
        std::cmp::Ordering::Equal => Outcome::Draw,
    };
    assert_eq!(record.winner(), &expected);
}

#[test]
fn test_every_round_ends_resolved() {
    let config = GameConfig::default().with_num_rounds(5);
    let mut session = session(&config, 3);
    let record = play_out(&mut session, 4);

    for round in record.rounds() {
        assert!(impossible_ttt::is_round_over(&round.board));
        let tokens = record.tokens();
        assert_eq!(impossible_ttt::round_winner(&round.board, tokens), Ok(round.winner));
    }
}

#[test]
fn test_finished_session_stays_finished() {
    let config = GameConfig::default().with_num_rounds(1);
    let mut session = session(&config, 8);
    play_out(&mut session, 9);

    assert_eq!(session.settle(), Ok(SessionStatus::NoGame));
    assert_eq!(session.store().archive().len(), 1);
    assert_eq!(
        session.human_move(Location::new(0, 0).expect("Valid location")),
        Err(SessionError::Store(StoreError::NoGame))
    );
}

#[test]
fn test_openers_alternate_between_rounds() {
    let config = GameConfig::default()
        .with_num_rounds(2)
        .with_first_player(Side::Computer);
    let mut session = session(&config, 21);

    // Computer opens round one, so the human faces one mark.
    assert_eq!(session.settle(), Ok(SessionStatus::AwaitingHuman));
    assert_eq!(
        session.game().expect("Game").current_squares().filled_count(),
        1
    );

    let mut human = ComputerPlayer::seeded(22);
    while session.game().expect("Game").rounds().is_empty() {
        let grid = session.game().expect("Game").current_squares();
        let location = human.choose_move(grid).expect("Move");
        session.human_move(location).expect("Legal move");
    }

    // Human opens round two: nothing on the grid yet.
    let game = session.game().expect("Game");
    assert_eq!(game.next_player(), &Side::Human);
    assert_eq!(game.current_squares().filled_count(), 0);
}

#[test]
fn test_same_seeds_same_game() {
    let config = GameConfig::default().with_num_rounds(3);
    let first = play_out(&mut session(&config, 77), 78);
    let second = play_out(&mut session(&config, 77), 78);
    assert_eq!(first, second);
}

#[test]
fn test_service_document_drives_computer_move() {
    let json = r#"{
        "numRounds": 3,
        "humanToken": "X",
        "computerToken": "O",
        "nextPlayer": "computer",
        "currentSquares": [["X", null, null], [null, null, null], [null, null, null]],
        "rounds": [],
        "startDateTime": "2026-10-16T20:00:00.000Z"
    }"#;
    let game: impossible_ttt::Game = serde_json::from_str(json).expect("Service document");
    let mut orchestrator = Orchestrator::with_capabilities(
        ComputerPlayer::seeded(5),
        SequentialIds::new("game"),
        FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 20, 5, 0).unwrap()),
    );

    match orchestrator.evaluate(Some(&game)).expect("Evaluates") {
        Some(impossible_ttt::Command::RegisterMove(request)) => {
            assert_eq!(request.token.as_str(), "O");
            assert_ne!(request.location, Location::new(0, 0).expect("Valid location"));
        }
        other => panic!("Expected a computer move, got {:?}", other),
    }
}

#[test]
fn test_service_document_with_shared_token_rejected() {
    let json = r#"{
        "numRounds": 3,
        "humanToken": "X",
        "computerToken": "X",
        "nextPlayer": "human",
        "currentSquares": [["X", "X", "X"], [null, null, null], [null, null, null]],
        "rounds": []
    }"#;
    assert!(serde_json::from_str::<impossible_ttt::Game>(json).is_err());
}
