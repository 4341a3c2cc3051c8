//! The owned controller a page instance drives.
//!
//! [`DiscoveryController`] couples a [`DiscoveryState`] with the host's
//! capabilities. Host callbacks become [`Event`]s, [`handle_event`] decides, and the
//! controller executes the resulting [`Action`]s and re-renders when asked to.
//! Several controllers can live side by side; nothing here is global.

use super::capabilities::{Favorites, Geolocation, Renderer, SheetView, UrlHistory, Viewport};
use super::url_sync::UrlSync;
use crate::app::{handle_event, Action, DiscoveryState, Event};
use crate::domain::error::Result;
use crate::domain::{Coordinates, SortMode};
use futures_util::future::LocalBoxFuture;
use std::fmt;

/// Everything the controller needs from its host.
pub struct Capabilities {
    pub history: Box<dyn UrlHistory>,
    pub viewport: Box<dyn Viewport>,
    pub sheet: Box<dyn SheetView>,
    pub renderer: Box<dyn Renderer>,
    pub geolocation: Box<dyn Geolocation>,
    pub favorites: Box<dyn Favorites>,
}

/// A geolocation request waiting to be driven by the host's executor.
///
/// Await [`LocationRequest::resolve`] and feed the resulting event back through
/// [`DiscoveryController::dispatch`]. The controller keeps handling other events
/// while the request is outstanding.
pub struct LocationRequest {
    pub generation: u64,
    future: LocalBoxFuture<'static, Option<Coordinates>>,
}

impl LocationRequest {
    /// Waits for the fix and wraps it as [`Event::LocationResolved`].
    pub async fn resolve(self) -> Event {
        let fix = self.future.await;
        Event::LocationResolved {
            generation: self.generation,
            fix,
        }
    }
}

impl fmt::Debug for LocationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationRequest")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Listing page controller.
///
/// # Example
///
/// See `tests/discovery_flow.rs` for a full host wired with recording fakes.
pub struct DiscoveryController {
    state: DiscoveryState,
    caps: Capabilities,
    url_sync: UrlSync,
    pending_location: Option<LocationRequest>,
}

impl DiscoveryController {
    #[must_use]
    pub fn new(state: DiscoveryState, caps: Capabilities) -> Self {
        Self {
            state,
            caps,
            url_sync: UrlSync::default(),
            pending_location: None,
        }
    }

    /// Runs the first render, then presents the place named by the initial URL, if any.
    pub fn start(&mut self) {
        let _span = tracing::debug_span!("controller_start").entered();
        self.dispatch(&Event::Start);

        if let Some(id) = self.state.filter().selected_id.clone() {
            tracing::debug!(place_id = %id, "presenting place from initial url");
            self.request_detail(&id);
        }
    }

    /// Handles one event: decide, execute actions, render if needed.
    ///
    /// Returns whether the listing was re-rendered. Handler errors are logged and
    /// leave the page as it was.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.state, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                if should_render {
                    self.render();
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Opens details for `id`, measuring the viewport now.
    pub fn request_detail(&mut self, id: &str) -> bool {
        let width = self.caps.viewport.width();
        let wide = width >= f64::from(self.state.settings.breakpoint_px);
        tracing::debug!(place_id = %id, width, wide, "detail requested");
        self.dispatch(&Event::DetailRequested {
            id: id.to_string(),
            wide,
        })
    }

    /// Switches sort by its toolbar token.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiscoveryError::InvalidState`] for an unknown token; nothing
    /// changes in that case.
    pub fn set_sort_name(&mut self, name: &str) -> Result<bool> {
        let sort: SortMode = name.parse()?;
        Ok(self.dispatch(&Event::SetSort(sort)))
    }

    /// Hands the outstanding geolocation request to the caller, if there is one.
    pub fn take_location_request(&mut self) -> Option<LocationRequest> {
        self.pending_location.take()
    }

    /// Renders the listing from the current state.
    pub fn render(&mut self) {
        let href = self.caps.history.location().href();
        let view = self.state.compute_viewmodel(self.caps.favorites.as_ref(), &href);
        self.caps.renderer.render(&view);
    }

    #[must_use]
    pub const fn state(&self) -> &DiscoveryState {
        &self.state
    }

    #[must_use]
    pub fn favorites(&self) -> &dyn Favorites {
        self.caps.favorites.as_ref()
    }

    /// Number of URL replacements performed so far.
    #[must_use]
    pub fn url_writes(&self) -> u64 {
        self.url_sync.write_count()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::ReplaceUrl { query } => self.url_sync.write(self.caps.history.as_ref(), query),
            Action::Navigate { href } => self.caps.history.navigate(href),
            Action::LockScroll => self.caps.sheet.lock_scroll(),
            Action::UnlockScroll => self.caps.sheet.unlock_scroll(),
            Action::ShowBackdrop => self.caps.sheet.show_backdrop(),
            Action::HideBackdrop => self.caps.sheet.hide_backdrop(),
            Action::PopulateSheet { id } => {
                let href = self.caps.history.location().href();
                match self.state.compute_sheet(self.caps.favorites.as_ref(), &href) {
                    Some(content) if content.id == *id => self.caps.sheet.populate(&content),
                    _ => tracing::debug!(place_id = %id, "sheet no longer shows this place, skipping populate"),
                }
            }
            Action::ApplySheetPhase(phase) => self.caps.sheet.apply_phase(*phase),
            Action::SetSheetOffset(fraction) => self.caps.sheet.set_offset(*fraction),
            Action::SaveFocus => self.caps.sheet.save_focus(),
            Action::RestoreFocus => self.caps.sheet.restore_focus(),
            Action::FocusFirstInSheet => self.caps.sheet.focus_first(),
            Action::AttachDragListeners => self.caps.sheet.attach_drag_listeners(),
            Action::DetachDragListeners => self.caps.sheet.detach_drag_listeners(),
            Action::RequestLocation { generation, timeout } => {
                let future = self.caps.geolocation.current_position(*timeout);
                let previous = self.pending_location.replace(LocationRequest {
                    generation: *generation,
                    future,
                });
                if let Some(previous) = previous {
                    tracing::debug!(generation = previous.generation, "unclaimed location request superseded");
                }
            }
            Action::ToggleFavorite { id } => {
                let now = self.caps.favorites.toggle(id);
                tracing::debug!(place_id = %id, favorite = now, "favorite toggled");
            }
        }
    }
}
