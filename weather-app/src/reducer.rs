//! Reducer - (state, action) -> optional effect

use tracing::warn;
use weather_core::WeatherQuery;

use crate::action::{Action, Effect};
use crate::state::{AppState, DisplayState};

pub fn reducer(state: &mut AppState, action: Action) -> Option<Effect> {
    match action {
        // ===== Input actions =====
        Action::InputChar(c) => {
            state.input.push(c);
            None
        }

        Action::InputBackspace => {
            state.input.pop();
            None
        }

        Action::InputClear => {
            state.input.clear();
            None
        }

        // ===== Lookup actions =====
        Action::Search => {
            let seq = state.next_seq;
            state.next_seq = state.next_seq.wrapping_add(1);
            state.pending = Some(seq);
            state.display = DisplayState::Loading {
                city: state.input.clone(),
            };
            Some(Effect::Lookup {
                seq,
                query: WeatherQuery::new(state.input.clone()),
            })
        }

        Action::LookupDidLoad { seq, view } => {
            if state.pending == Some(seq) {
                state.pending = None;
                state.display = DisplayState::Loaded(view);
            }
            None
        }

        Action::LookupDidError { seq, message } => {
            if state.pending == Some(seq) {
                warn!(seq, %message, "lookup failed");
                state.pending = None;
                state.display = DisplayState::Failed(message);
            }
            None
        }

        // ===== Global actions =====
        Action::Quit => {
            state.should_quit = true;
            state.pending.take().map(|_| Effect::CancelLookup)
        }
    }
}
