use hilo::{Direction, Game, GameOptions, GuessResult, RevealTicket, Snapshot};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsGuess {
    result: GuessResult,
    ticket: Option<RevealTicket>,
    snapshot: Snapshot,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, reveal_delay_ms: Option<u32>) -> Self {
        Self {
            game: Game::new(options(reveal_delay_ms), u64::from(seed)),
        }
    }

    /// Replaces the engine. Reveal timers still pending from the old engine
    /// are rejected as cancelled when they fire.
    pub fn reset(&mut self, seed: u32, reveal_delay_ms: Option<u32>) {
        self.game.end_session();
        self.game = Game::new(options(reveal_delay_ms), u64::from(seed));
    }

    pub fn start(&self, session_id: &str, user_id: &str) -> Result<JsValue, JsValue> {
        let snapshot = self
            .game
            .start_session(session_id, user_id)
            .map_err(js_err)?;
        to_js_value(&snapshot)
    }

    /// `higher` selects the direction; returns the guess, the reveal ticket,
    /// and the new snapshot.
    pub fn guess(&self, higher: bool) -> Result<JsValue, JsValue> {
        let direction = if higher {
            Direction::Higher
        } else {
            Direction::Lower
        };
        let outcome = self.game.submit_guess(direction).map_err(js_err)?;
        to_js_value(&JsGuess {
            result: outcome.result,
            ticket: outcome.ticket,
            snapshot: outcome.snapshot,
        })
    }

    /// Call from the `setTimeout` scheduled with the ticket's delay.
    pub fn complete_reveal(&self, ticket_id: u32) -> Result<JsValue, JsValue> {
        let ticket = RevealTicket {
            id: ticket_id,
            delay_ms: self.game.options.reveal_delay_ms,
        };
        let snapshot = self.game.complete_reveal(ticket).map_err(js_err)?;
        to_js_value(&snapshot)
    }

    pub fn end(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.game.end_session())
    }

    pub fn is_active(&self) -> bool {
        self.game.is_active()
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.game.snapshot())
    }

    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.game.summary())
    }
}

fn options(reveal_delay_ms: Option<u32>) -> GameOptions {
    let options = GameOptions::default();
    match reveal_delay_ms {
        Some(delay) => options.with_reveal_delay_ms(delay),
        None => options,
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
