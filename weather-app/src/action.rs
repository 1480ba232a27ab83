//! Actions and effects for the interactive window

use weather_core::WeatherQuery;

use crate::state::WeatherView;

/// Everything that can change the window state
#[derive(Clone, Debug)]
pub enum Action {
    // ===== Input =====
    InputChar(char),
    InputBackspace,
    InputClear,

    // ===== Lookup =====
    /// Intent: look up the city currently in the input box
    Search,

    /// Result: lookup `seq` finished with a summary
    LookupDidLoad { seq: u64, view: WeatherView },

    /// Result: lookup `seq` failed; `message` is shown verbatim
    LookupDidError { seq: u64, message: String },

    Quit,
}

/// Side effects declared by the reducer
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Run a lookup in the background, replacing any lookup in flight
    Lookup { seq: u64, query: WeatherQuery },
    /// Abort the lookup in flight, if any
    CancelLookup,
}
