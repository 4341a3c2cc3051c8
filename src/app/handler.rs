//! Event handling and state transition logic.
//!
//! This module implements the handler that turns user interaction, sheet gestures
//! and geolocation answers into state changes and action sequences.
//!
//! # Architecture
//!
//! 1. The runtime turns a host callback into an [`Event`]
//! 2. [`handle_event`] pattern-matches the event
//! 3. State mutations go through [`DiscoveryState`] setters and its [`SheetMachine`]
//! 4. Actions are collected and returned for the runtime to execute
//!
//! The returned flag says whether the listing needs a re-render. Sheet-only
//! changes (drag offsets, snaps) are carried entirely by their actions.
//!
//! # Event Types
//!
//! - **Filtering**: `SetScope`, `SetCity`, `SetCategory`, `SetQuery`, `SetSort`, `Clear`
//! - **Detail**: `DetailRequested`, `ToggleFavorite`
//! - **Sheet**: `DragStart`, `DragMove`, `DragEnd`, `DragCancel`, `Zoom`, `CloseSheet`, `FocusIn`
//! - **System**: `Start`, `LocationResolved`
//!
//! # Example
//!
//! ```rust
//! use placesheet::app::{handle_event, Action, DiscoveryState, Event, Settings};
//! use placesheet::catalog::{Catalog, CityDirectory};
//!
//! let mut state = DiscoveryState::from_query(Catalog::default(), CityDirectory::default(), Settings::default(), "");
//! let (render, actions) = handle_event(&mut state, &Event::SetCity("sibu".into()))?;
//! assert!(render);
//! assert_eq!(actions, vec![Action::ReplaceUrl { query: "city=sibu".into() }]);
//! # Ok::<(), placesheet::DiscoveryError>(())
//! ```
//!
//! [`SheetMachine`]: super::sheet::SheetMachine

use super::actions::Action;
use super::modes::CloseTrigger;
use super::presenter::{present, Presentation};
use super::state::DiscoveryState;
use crate::domain::error::Result;
use crate::domain::{Coordinates, Scope, SortMode};

/// Events produced by the host page and the geolocation capability.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// First event after construction, before the first render.
    Start,

    SetScope(Scope),
    /// Empty string selects every city.
    SetCity(String),
    /// Empty string selects every category.
    SetCategory(String),
    SetQuery(String),
    SetSort(SortMode),
    /// Clears the category and the search text.
    Clear,

    /// A place's details were asked for.
    DetailRequested {
        id: String,
        /// Viewport is at or above the breakpoint, measured when the request was made.
        wide: bool,
    },

    /// Pointer went down on the sheet's drag handle.
    DragStart {
        pointer_y: f64,
        /// Sheet top edge in pixels from the viewport top.
        sheet_top: f64,
        viewport_height: f64,
    },
    DragMove {
        pointer_y: f64,
    },
    /// Pointer released; carries the sheet's resulting top edge.
    DragEnd {
        sheet_top: f64,
        viewport_height: f64,
    },
    /// Gesture aborted by the platform (pointer cancel, lost capture).
    DragCancel,
    /// The expand control on a half-height sheet.
    Zoom,
    CloseSheet(CloseTrigger),
    /// Focus landed somewhere on the page.
    FocusIn {
        inside_sheet: bool,
    },

    ToggleFavorite {
        id: String,
    },

    /// Answer to [`Action::RequestLocation`].
    LocationResolved {
        generation: u64,
        fix: Option<Coordinates>,
    },
}

/// Processes an event, mutates state, and returns `(needs_render, actions)`.
///
/// # Errors
///
/// Returns [`crate::DiscoveryError::InvalidState`] when a drag would start (or a
/// release arrives with no drag live) with a non-finite or non-positive viewport
/// height. State is unchanged in that case. A live drag is never left attached.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut DiscoveryState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Start => Ok((true, request_location_if_needed(state).into_iter().collect())),
        Event::SetScope(scope) => {
            state.set_scope(*scope);
            Ok((true, after_filter_change(state)))
        }
        Event::SetCity(city_id) => {
            state.set_city(city_id);
            Ok((true, after_filter_change(state)))
        }
        Event::SetCategory(category) => {
            state.set_category(category);
            Ok((true, after_filter_change(state)))
        }
        Event::SetQuery(query) => {
            state.set_query(query);
            tracing::trace!(query = %state.filter().query, "search query updated");
            Ok((true, after_filter_change(state)))
        }
        Event::SetSort(sort) => {
            state.set_sort_mode(*sort);
            Ok((true, after_filter_change(state)))
        }
        Event::Clear => {
            state.clear();
            Ok((true, after_filter_change(state)))
        }
        Event::DetailRequested { id, wide } => {
            let sheet_id = match present(&state.catalog, id, *wide, &state.settings.detail_page) {
                Presentation::Navigate(href) => {
                    tracing::debug!(place_id = %id, href = %href, "navigating to detail page");
                    state.not_found = None;
                    return Ok((false, vec![Action::Navigate { href }]));
                }
                Presentation::Sheet(place) => Ok(place.id.clone()),
                Presentation::NotFound(missing) => Err(missing),
            };

            let sheet_id = match sheet_id {
                Ok(sheet_id) => sheet_id,
                Err(missing) => {
                    state.not_found = Some(missing);
                    let mut actions = state.sheet.close(CloseTrigger::CloseButton);
                    if state.filter().selected_id.is_some() {
                        actions.extend(clear_selection(state));
                    }
                    return Ok((true, actions));
                }
            };

            // The id must be in the URL before the sheet reads it for sharing.
            state.not_found = None;
            state.select(Some(&sheet_id));
            let mut actions = vec![replace_url(state)];
            actions.extend(state.sheet.open(&sheet_id));
            Ok((true, actions))
        }
        Event::DragStart { pointer_y, sheet_top, viewport_height } => {
            Ok((false, state.sheet.drag_start(*pointer_y, *sheet_top, *viewport_height)?))
        }
        Event::DragMove { pointer_y } => Ok((false, state.sheet.drag_move(*pointer_y))),
        Event::DragEnd { sheet_top, viewport_height } => {
            let mut actions = state.sheet.drag_end(*sheet_top, *viewport_height)?;
            if !state.sheet.phase().is_closed() || actions.is_empty() {
                return Ok((false, actions));
            }
            actions.extend(clear_selection(state));
            Ok((true, actions))
        }
        Event::DragCancel => Ok((false, state.sheet.drag_cancel())),
        Event::Zoom => Ok((false, state.sheet.zoom())),
        Event::CloseSheet(trigger) => {
            let mut actions = state.sheet.close(*trigger);
            if actions.is_empty() {
                return Ok((false, actions));
            }
            actions.extend(clear_selection(state));
            Ok((true, actions))
        }
        Event::FocusIn { inside_sheet } => Ok((false, state.sheet.focus_in(*inside_sheet))),
        Event::ToggleFavorite { id } => {
            if state.catalog.get(id).is_none() {
                tracing::debug!(place_id = %id, "favorite toggle for unknown place ignored");
                return Ok((false, vec![]));
            }
            let mut actions = vec![Action::ToggleFavorite { id: id.clone() }];
            if state.sheet.record_id() == Some(id.as_str()) {
                actions.push(Action::PopulateSheet { id: id.clone() });
            }
            Ok((true, actions))
        }
        Event::LocationResolved { generation, fix } => {
            if let Some(fix) = fix {
                state.last_fix = Some(*fix);
            }

            if *generation != state.location_generation {
                tracing::debug!(generation, current = state.location_generation, "stale location answer");
                return Ok((false, vec![]));
            }
            state.location_pending = false;

            if state.filter().sort != SortMode::Near {
                tracing::debug!(has_fix = fix.is_some(), "location arrived after leaving near sort");
                return Ok((false, vec![]));
            }

            if fix.is_some() {
                state.recompute();
            } else {
                tracing::debug!("no location fix, near stays in hot order");
            }
            Ok((true, vec![]))
        }
    }
}

fn replace_url(state: &DiscoveryState) -> Action {
    Action::ReplaceUrl {
        query: state.query_string(),
    }
}

fn after_filter_change(state: &mut DiscoveryState) -> Vec<Action> {
    let mut actions = vec![replace_url(state)];
    actions.extend(request_location_if_needed(state));
    actions
}

fn clear_selection(state: &mut DiscoveryState) -> Vec<Action> {
    state.select(None);
    vec![replace_url(state)]
}

/// Starts a geolocation request when `near` has neither a fix nor one on the way.
fn request_location_if_needed(state: &mut DiscoveryState) -> Option<Action> {
    if state.filter().sort != SortMode::Near || state.last_fix.is_some() || state.location_pending {
        return None;
    }

    state.location_generation += 1;
    state.location_pending = true;
    tracing::debug!(generation = state.location_generation, "requesting location for near sort");

    Some(Action::RequestLocation {
        generation: state.location_generation,
        timeout: state.settings.geolocation_timeout,
    })
}
