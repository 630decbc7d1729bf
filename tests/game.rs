//! Game integration tests.

use std::sync::{Arc, Mutex, Weak};

use hilo::{
    Card, DECK_SIZE, DeckError, Direction, EndReason, Game, GameOptions, GuessError, Phase,
    RevealError, SessionError, SessionListener, SessionSummary, Snapshot, Suit, build_deck,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

/// Canonical deck order with `front` moved to the top.
fn deck_with_top(front: &[Card]) -> Vec<Card> {
    let mut cards = front.to_vec();
    cards.extend(
        build_deck()
            .into_cards()
            .into_iter()
            .filter(|c| !front.contains(c)),
    );
    cards
}

fn scripted_game(cards: Vec<Card>) -> Game<impl FnMut() -> Vec<Card>> {
    Game::with_source(GameOptions::default(), move || cards.clone())
}

fn guess_and_reveal<D>(game: &Game<D>, direction: Direction) -> Snapshot {
    let outcome = game.submit_guess(direction).unwrap();
    let ticket = outcome.ticket.expect("session should continue");
    game.complete_reveal(ticket).unwrap()
}

#[derive(Default)]
struct Recorded {
    snapshots: Vec<Snapshot>,
    summaries: Vec<SessionSummary>,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Recorded>>);

impl SessionListener for Recorder {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.0.lock().unwrap().snapshots.push(*snapshot);
    }

    fn on_session_end(&mut self, summary: &SessionSummary) {
        self.0.lock().unwrap().summaries.push(summary.clone());
    }
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_reveal_delay_ms(1200)
        .with_streak_bonus(15)
        .with_push_your_luck_streak(5);

    assert_eq!(options.reveal_delay_ms, 1200);
    assert_eq!(options.streak_bonus, 15);
    assert_eq!(options.push_your_luck_streak, 5);

    let defaults = GameOptions::default();
    assert_eq!(defaults.reveal_delay_ms, 2000);
    assert_eq!(defaults.streak_bonus, 10);
    assert_eq!(defaults.push_your_luck_streak, 3);
}

#[test]
fn start_session_resets_round() {
    let game = Game::new(GameOptions::default(), 42);
    assert!(game.snapshot().is_none());
    assert!(!game.is_active());

    let snapshot = game.start_session("game-1", "fid-7").unwrap();
    assert_eq!(snapshot.position, 1);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.streak, 0);
    assert_eq!(snapshot.deck_size, DECK_SIZE);
    assert_eq!(snapshot.cards_remaining, DECK_SIZE - 1);
    assert_eq!(snapshot.phase, Phase::AwaitingGuess);
    assert!(snapshot.active);
    assert!(snapshot.upcoming_card.is_none());

    let round = game.round().unwrap();
    assert_eq!(snapshot.current_card, round.deck()[0]);
    assert_eq!(game.session_id().as_deref(), Some("game-1"));
    assert_eq!(game.user_id().as_deref(), Some("fid-7"));
}

#[test]
fn start_session_rejected_while_running() {
    let game = Game::new(GameOptions::default(), 1);
    game.start_session("a", "u").unwrap();
    assert_eq!(
        game.start_session("b", "u").unwrap_err(),
        SessionError::InvalidTransition
    );
    assert_eq!(game.session_id().as_deref(), Some("a"));

    game.end_session();
    game.start_session("b", "u").unwrap();
    assert_eq!(game.session_id().as_deref(), Some("b"));
}

#[test]
fn new_session_gets_a_fresh_deck() {
    let game = Game::new(GameOptions::default(), 9);
    game.start_session("a", "u").unwrap();
    let first = game.round().unwrap().deck().clone();
    game.end_session();

    game.start_session("b", "u").unwrap();
    let second = game.round().unwrap().deck().clone();
    assert_ne!(first, second);
}

#[test]
fn malformed_deck_fails_fast() {
    let game = Game::with_source(GameOptions::default(), || {
        let mut cards = build_deck().into_cards();
        cards.truncate(40);
        cards
    });
    assert_eq!(
        game.start_session("s", "u").unwrap_err(),
        SessionError::Deck(DeckError::WrongSize { len: 40 })
    );
    assert!(game.snapshot().is_none());

    let game = Game::with_source(GameOptions::default(), || {
        let mut cards = build_deck().into_cards();
        cards[51] = cards[0];
        cards
    });
    assert_eq!(
        game.start_session("s", "u").unwrap_err(),
        SessionError::Deck(DeckError::DuplicateCard(card(Suit::Hearts, 1)))
    );
}

#[test]
fn four_correct_guesses_score_one_hundred() {
    let game = scripted_game(build_deck().into_cards());
    game.start_session("s", "u").unwrap();

    let mut snapshot = game.snapshot().unwrap();
    for _ in 0..4 {
        snapshot = guess_and_reveal(&game, Direction::Higher);
    }
    assert_eq!(snapshot.streak, 4);
    assert_eq!(snapshot.score, 100);
    assert_eq!(snapshot.current_card, card(Suit::Hearts, 5));
}

#[test]
fn tie_is_correct_for_either_call() {
    let game = scripted_game(deck_with_top(&[
        card(Suit::Hearts, 7),
        card(Suit::Spades, 7),
        card(Suit::Clubs, 7),
    ]));
    game.start_session("s", "u").unwrap();

    let outcome = game.submit_guess(Direction::Lower).unwrap();
    assert!(outcome.result.correct);
    assert_eq!(outcome.result.streak, 1);
    game.complete_reveal(outcome.ticket.unwrap()).unwrap();

    let outcome = game.submit_guess(Direction::Higher).unwrap();
    assert!(outcome.result.correct);
    assert_eq!(outcome.snapshot.score, 30);
}

#[test]
fn miss_after_three_streak_ends_immediately() {
    let game = scripted_game(build_deck().into_cards());
    game.start_session("s", "u").unwrap();
    for _ in 0..3 {
        guess_and_reveal(&game, Direction::Higher);
    }
    assert_eq!(game.snapshot().unwrap().score, 60);

    let outcome = game.submit_guess(Direction::Lower).unwrap();
    assert!(!outcome.result.correct);
    assert!(outcome.ticket.is_none());
    assert!(!outcome.snapshot.active);
    assert_eq!(outcome.snapshot.phase, Phase::GameOver);
    assert_eq!(outcome.snapshot.upcoming_card, Some(card(Suit::Hearts, 5)));

    let summary = game.summary().unwrap();
    assert_eq!(summary.end_reason, EndReason::PushYourLuck);
    assert_eq!(summary.score, 60);
    assert_eq!(summary.best_streak, 3);
    assert_eq!(summary.streak, 0);
}

#[test]
fn guess_after_game_over_is_rejected() {
    let game = scripted_game(build_deck().into_cards());
    game.start_session("s", "u").unwrap();
    game.end_session();
    let before = game.round();

    assert_eq!(
        game.submit_guess(Direction::Higher).unwrap_err(),
        GuessError::InvalidTransition
    );
    assert_eq!(game.round(), before);
}

#[test]
fn end_session_cancels_pending_reveal() {
    let game = scripted_game(build_deck().into_cards());
    game.start_session("s", "u").unwrap();

    let ticket = game.submit_guess(Direction::Higher).unwrap().ticket.unwrap();
    let summary = game.end_session().unwrap();
    assert_eq!(summary.end_reason, EndReason::Ended);
    assert_eq!(summary.score, 10);
    assert!(game.pending_reveal().is_none());

    let before = game.round();
    assert_eq!(game.complete_reveal(ticket), Err(RevealError::Cancelled));
    assert_eq!(game.round(), before);
    assert_eq!(game.snapshot().unwrap().position, 1);
}

#[test]
fn stale_ticket_from_previous_session_is_cancelled() {
    let game = Game::new(GameOptions::default(), 5);
    game.start_session("a", "u").unwrap();
    let ticket = game.submit_guess(Direction::Higher).unwrap().ticket.unwrap();
    game.end_session();
    game.start_session("b", "u").unwrap();

    assert_eq!(game.complete_reveal(ticket), Err(RevealError::Cancelled));
    assert_eq!(game.phase(), Some(Phase::AwaitingGuess));
}

#[test]
fn ticket_from_replaced_engine_is_cancelled() {
    let old = scripted_game(build_deck().into_cards());
    old.start_session("s", "u").unwrap();
    let stale = old.submit_guess(Direction::Higher).unwrap().ticket.unwrap();

    let game = scripted_game(build_deck().into_cards());
    game.start_session("s", "u").unwrap();
    let live = game.submit_guess(Direction::Higher).unwrap().ticket.unwrap();
    assert_ne!(stale.id, live.id);

    assert_eq!(game.complete_reveal(stale), Err(RevealError::Cancelled));
    assert_eq!(game.phase(), Some(Phase::Revealing));
    assert_eq!(game.snapshot().unwrap().position, 1);
    assert_eq!(game.pending_reveal(), Some(live));

    assert_eq!(game.complete_reveal(live).unwrap().position, 2);
}

#[test]
fn reveal_ticket_only_completes_once() {
    let game = scripted_game(build_deck().into_cards());
    game.start_session("s", "u").unwrap();
    let ticket = game.submit_guess(Direction::Higher).unwrap().ticket.unwrap();

    game.complete_reveal(ticket).unwrap();
    assert_eq!(game.complete_reveal(ticket), Err(RevealError::Cancelled));
    assert_eq!(game.snapshot().unwrap().position, 2);
}

#[test]
fn end_session_is_idempotent() {
    let game = scripted_game(build_deck().into_cards());
    assert!(game.end_session().is_none());

    game.start_session("s", "u").unwrap();
    let first = game.end_session().unwrap();
    let second = game.end_session().unwrap();
    assert_eq!(first, second);
}

#[test]
fn reveal_without_session_is_rejected() {
    let game = Game::new(GameOptions::default(), 3);
    let ticket = hilo::RevealTicket {
        id: 1,
        delay_ms: 2000,
    };
    assert_eq!(game.complete_reveal(ticket), Err(RevealError::NoSession));
}

#[test]
fn deck_exhaustion_ends_on_last_reveal() {
    let game = scripted_game(build_deck().into_cards());
    game.start_session("s", "u").unwrap();

    // Miss on purpose at streak two so the push-your-luck rule never fires.
    loop {
        let snapshot = game.snapshot().unwrap();
        if snapshot.position == 51 {
            break;
        }
        let round = game.round().unwrap();
        let next = round.deck()[snapshot.position];
        let higher = next.rank > snapshot.current_card.rank;
        let direction = if higher == (snapshot.streak < 2) {
            Direction::Higher
        } else {
            Direction::Lower
        };
        guess_and_reveal(&game, direction);
    }

    let outcome = game.submit_guess(Direction::Higher).unwrap();
    assert!(outcome.result.correct);
    let snapshot = game.complete_reveal(outcome.ticket.unwrap()).unwrap();
    assert!(!snapshot.active);
    assert_eq!(snapshot.position, 51);
    assert_eq!(snapshot.upcoming_card, Some(card(Suit::Spades, 13)));

    let summary = game.summary().unwrap();
    assert_eq!(summary.end_reason, EndReason::DeckExhausted);
    assert_eq!(summary.guesses, 51);
    assert_eq!(summary.cards_seen, DECK_SIZE);
}

#[test]
fn listener_sees_every_change_and_one_summary() {
    let game = scripted_game(build_deck().into_cards());
    let recorder = Recorder::default();
    game.set_listener(recorder.clone());

    game.start_session("s", "u").unwrap();
    guess_and_reveal(&game, Direction::Higher);
    game.submit_guess(Direction::Higher).unwrap();
    game.end_session();
    game.end_session();

    let recorded = recorder.0.lock().unwrap();
    // start, guess, reveal, guess, end
    assert_eq!(recorded.snapshots.len(), 5);
    assert_eq!(recorded.snapshots[1].phase, Phase::Revealing);
    assert_eq!(recorded.snapshots[2].phase, Phase::AwaitingGuess);
    assert!(!recorded.snapshots[4].active);

    assert_eq!(recorded.summaries.len(), 1);
    assert_eq!(recorded.summaries[0].session_id, "s");
    assert_eq!(recorded.summaries[0].score, 30);
}

/// Ends the session as soon as a guess starts revealing.
struct EndOnReveal {
    game: Weak<Game>,
    phases: Arc<Mutex<Vec<Phase>>>,
}

impl SessionListener for EndOnReveal {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.phases.lock().unwrap().push(snapshot.phase);
        if snapshot.phase == Phase::Revealing {
            if let Some(game) = self.game.upgrade() {
                game.end_session();
            }
        }
    }
}

#[test]
fn listener_can_drive_the_engine() {
    let game = Arc::new(Game::new(GameOptions::default(), 7));
    let phases = Arc::new(Mutex::new(Vec::new()));
    game.set_listener(EndOnReveal {
        game: Arc::downgrade(&game),
        phases: Arc::clone(&phases),
    });

    game.start_session("s", "u").unwrap();
    let ticket = game.submit_guess(Direction::Higher).unwrap().ticket.unwrap();

    assert!(!game.is_active());
    assert_eq!(game.pending_reveal(), None);
    assert_eq!(game.summary().unwrap().end_reason, EndReason::Ended);
    assert_eq!(game.complete_reveal(ticket), Err(RevealError::Cancelled));

    // The nested end is not reported back; the listener stays installed.
    game.start_session("s2", "u").unwrap();
    assert_eq!(
        *phases.lock().unwrap(),
        [Phase::AwaitingGuess, Phase::Revealing, Phase::AwaitingGuess]
    );
}
