use crate::models::StationSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Option value the state multi-select uses for "All States".
pub const ALL_SENTINEL: &str = "all";

/// Raw value of the state multi-select as the UI reports it.
///
/// May hold any combination, including `all` together with explicit states
/// or nothing at all; [`FilterState::from_event`] resolves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionEvent {
    pub all: bool,
    pub states: BTreeSet<String>,
}

impl SelectionEvent {
    pub fn all() -> Self {
        Self {
            all: true,
            states: BTreeSet::new(),
        }
    }

    pub fn states<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            all: false,
            states: states.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_all(mut self) -> Self {
        self.all = true;
        self
    }

    /// Build from selected option values, where `"all"` is the sentinel.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut event = Self::default();
        for value in values {
            let value = value.as_ref().trim();
            if value.eq_ignore_ascii_case(ALL_SENTINEL) {
                event.all = true;
            } else if !value.is_empty() {
                event.states.insert(value.to_string());
            }
        }
        event
    }
}

/// The active state selection.
///
/// Exactly one of "all selected" or "a non-empty set of states" holds.
/// Deserializing goes through [`FilterState::from_event`], so stored
/// selections are resolved the same way as fresh ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionEvent")]
pub struct FilterState {
    all: bool,
    states: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterState {
    pub fn all() -> Self {
        Self {
            all: true,
            states: BTreeSet::new(),
        }
    }

    /// Resolve a raw selection: `all` overrides explicit picks, and an empty
    /// selection falls back to `all`.
    pub fn from_event(event: &SelectionEvent) -> Self {
        if event.all || event.states.is_empty() {
            Self::all()
        } else {
            Self {
                all: false,
                states: event.states.clone(),
            }
        }
    }

    pub fn is_all(&self) -> bool {
        self.all
    }

    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    pub fn includes(&self, state: &str) -> bool {
        self.all || self.states.contains(state)
    }

    pub fn visible<'a>(
        &'a self,
        stations: &'a [StationSummary],
    ) -> impl Iterator<Item = &'a StationSummary> + 'a {
        stations.iter().filter(move |s| self.includes(&s.state))
    }
}

impl From<SelectionEvent> for FilterState {
    fn from(event: SelectionEvent) -> Self {
        Self::from_event(&event)
    }
}

/// Result of applying a selection to the station list.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub state: FilterState,
    pub visible: Vec<StationSummary>,
    pub hidden_count: usize,
}

/// Resolve `selection` and apply it, logging how many stations remain visible.
pub fn filter_stations(selection: &SelectionEvent, stations: &[StationSummary]) -> FilterOutcome {
    let state = FilterState::from_event(selection);
    let visible: Vec<StationSummary> = state.visible(stations).cloned().collect();
    let hidden_count = stations.len() - visible.len();

    if state.is_all() {
        info!("Filtering to states: {}", ALL_SENTINEL);
    } else {
        let names: Vec<&str> = state.states().iter().map(String::as_str).collect();
        info!("Filtering to states: {}", names.join(", "));
    }
    info!(
        "Filter applied: {} stations visible, {} stations hidden",
        visible.len(),
        hidden_count
    );

    FilterOutcome {
        state,
        visible,
        hidden_count,
    }
}

/// Stations whose state is selected, or every station when all are selected.
/// Input order is preserved.
pub fn apply_filter(selection: &SelectionEvent, stations: &[StationSummary]) -> Vec<StationSummary> {
    let state = FilterState::from_event(selection);
    state.visible(stations).cloned().collect()
}

/// Sorted distinct state codes, for the filter's option list.
pub fn available_states(stations: &[StationSummary]) -> Vec<String> {
    stations
        .iter()
        .map(|s| s.state.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
