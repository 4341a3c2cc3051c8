//! Bottom-sheet state machine.
//!
//! [`SheetMachine`] owns the committed [`SheetPhase`], the transient drag offset,
//! and the bookkeeping that keeps side effects balanced: scroll is locked at most
//! once per open sheet, and drag listeners are attached at most once per gesture
//! and always detached again, whichever way the gesture ends.
//!
//! Every transition returns the [`Action`]s the host must perform. Transitions that
//! do not apply in the current phase return no actions and leave the machine as it
//! was; the only way out of [`SheetPhase::Closed`] is [`SheetMachine::open`].

use super::actions::Action;
use super::modes::{CloseTrigger, SheetPhase, Snap};
use crate::domain::error::{DiscoveryError, Result};

/// Lowest position (fraction of viewport height) the sheet top may be dragged to.
pub const DRAG_MIN_FRACTION: f64 = 0.08;
/// Highest position the sheet top may be dragged to.
pub const DRAG_MAX_FRACTION: f64 = 0.92;
/// Releasing below this fraction dismisses the sheet.
pub const DISMISS_FRACTION: f64 = 0.75;
/// Releasing at or above this fraction (and not dismissing) snaps to half height.
pub const HALF_FRACTION: f64 = 0.30;

/// Pointer and layout readings captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Gesture {
    start_pointer_y: f64,
    start_top: f64,
    viewport_height: f64,
}

/// Where a released drag ends up, decided from the sheet top as a fraction of
/// viewport height.
#[must_use]
pub fn snap_for_release(top_fraction: f64) -> Option<Snap> {
    if top_fraction > DISMISS_FRACTION {
        None
    } else if top_fraction > HALF_FRACTION {
        Some(Snap::Half)
    } else {
        Some(Snap::Open)
    }
}

fn check_viewport(height: f64) -> Result<f64> {
    if height.is_finite() && height > 0.0 {
        Ok(height)
    } else {
        Err(DiscoveryError::InvalidState(format!(
            "viewport height must be finite and positive, got {height}"
        )))
    }
}

/// Finite-state machine for the detail sheet.
///
/// # Example
///
/// ```rust
/// use placesheet::app::{Action, SheetMachine, SheetPhase};
///
/// let mut sheet = SheetMachine::default();
/// let actions = sheet.open("kch-1");
/// assert_eq!(sheet.phase(), SheetPhase::Half);
/// assert!(actions.contains(&Action::LockScroll));
///
/// // A second open for the same record only refreshes the content.
/// let again = sheet.open("kch-1");
/// assert_eq!(again, vec![Action::PopulateSheet { id: "kch-1".into() }]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetMachine {
    phase: SheetPhase,
    record_id: Option<String>,
    offset: Option<f64>,
    gesture: Option<Gesture>,
    scroll_locked: bool,
}

impl SheetMachine {
    #[must_use]
    pub const fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// Id of the record on display, `None` while closed.
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// Live drag offset as a fraction of viewport height. Never authoritative.
    #[must_use]
    pub const fn offset(&self) -> Option<f64> {
        self.offset
    }

    #[must_use]
    pub const fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    #[must_use]
    pub const fn has_drag_listeners(&self) -> bool {
        self.gesture.is_some()
    }

    /// Presents `id`.
    ///
    /// From closed this snaps to half height, locks scroll, shows the backdrop,
    /// saves the prior focus and moves focus into the sheet. On an open sheet the
    /// same record only refreshes content; a different record also snaps back to
    /// half height, abandoning any live drag.
    pub fn open(&mut self, id: &str) -> Vec<Action> {
        let populate = Action::PopulateSheet { id: id.to_string() };

        if !self.phase.is_closed() {
            if self.record_id.as_deref() == Some(id) {
                return vec![populate];
            }

            tracing::debug!(from = ?self.record_id, to = %id, "sheet switching record");
            let mut actions = self.end_gesture();
            self.record_id = Some(id.to_string());
            self.phase = SheetPhase::Half;
            actions.push(populate);
            actions.push(Action::ApplySheetPhase(SheetPhase::Half));
            return actions;
        }

        tracing::debug!(place_id = %id, "sheet opening");
        let mut actions = Vec::with_capacity(6);
        if !self.scroll_locked {
            self.scroll_locked = true;
            actions.push(Action::LockScroll);
        }
        self.record_id = Some(id.to_string());
        self.phase = SheetPhase::Half;
        self.offset = None;

        actions.extend([
            Action::ShowBackdrop,
            populate,
            Action::ApplySheetPhase(SheetPhase::Half),
            Action::SaveFocus,
            Action::FocusFirstInSheet,
        ]);
        actions
    }

    /// Begins a drag from a resting phase.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidState`] when `viewport_height` is not a
    /// finite positive number.
    pub fn drag_start(&mut self, pointer_y: f64, sheet_top: f64, viewport_height: f64) -> Result<Vec<Action>> {
        let viewport_height = check_viewport(viewport_height)?;
        let origin = match self.phase {
            SheetPhase::Half => Snap::Half,
            SheetPhase::Open => Snap::Open,
            SheetPhase::Closed | SheetPhase::Dragging { .. } => return Ok(vec![]),
        };

        self.phase = SheetPhase::Dragging { origin };
        self.gesture = Some(Gesture {
            start_pointer_y: pointer_y,
            start_top: sheet_top,
            viewport_height,
        });
        Ok(vec![Action::AttachDragListeners])
    }

    /// Follows the pointer. Only the transient offset changes.
    ///
    /// The sheet can only be pulled down from where the drag started; the offset is
    /// clamped to the allowed band of the viewport.
    pub fn drag_move(&mut self, pointer_y: f64) -> Vec<Action> {
        let (SheetPhase::Dragging { .. }, Some(g)) = (self.phase, self.gesture) else {
            return vec![];
        };

        let dy = (pointer_y - g.start_pointer_y).max(0.0);
        let fraction = ((g.start_top + dy) / g.viewport_height).clamp(DRAG_MIN_FRACTION, DRAG_MAX_FRACTION);
        self.offset = Some(fraction);
        vec![Action::SetSheetOffset(fraction)]
    }

    /// Releases a drag and commits a phase from the sheet's top edge.
    ///
    /// Listeners are detached first, so they are gone even when the release
    /// dismisses the sheet. A live drag released with an unusable reading (a
    /// non-finite top edge or viewport height) ends like [`Self::drag_cancel`]:
    /// listeners detached once, phase back to the drag's origin.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidState`] when `viewport_height` is not a
    /// finite positive number and no drag is live.
    pub fn drag_end(&mut self, sheet_top: f64, viewport_height: f64) -> Result<Vec<Action>> {
        if !matches!(self.phase, SheetPhase::Dragging { .. }) {
            check_viewport(viewport_height)?;
            return Ok(vec![]);
        }

        let viewport_height = match check_viewport(viewport_height) {
            Ok(height) if sheet_top.is_finite() => height,
            Ok(_) => {
                tracing::warn!(sheet_top, "drag released with unmeasurable sheet top, cancelling");
                return Ok(self.drag_cancel());
            }
            Err(e) => {
                tracing::warn!(error = %e, "drag released with unmeasurable viewport, cancelling");
                return Ok(self.drag_cancel());
            }
        };

        let fraction = sheet_top / viewport_height;
        let mut actions = self.end_gesture();

        match snap_for_release(fraction) {
            None => {
                tracing::debug!(fraction, "sheet dragged past dismiss threshold");
                actions.extend(self.dismiss());
            }
            Some(snap) => {
                tracing::debug!(fraction, snap = ?snap, "sheet snapped");
                self.phase = snap.into();
                actions.push(Action::ApplySheetPhase(self.phase));
            }
        }
        Ok(actions)
    }

    /// Aborts a drag, returning to the phase it started from.
    pub fn drag_cancel(&mut self) -> Vec<Action> {
        let SheetPhase::Dragging { origin } = self.phase else {
            return vec![];
        };

        let mut actions = self.end_gesture();
        self.phase = origin.into();
        actions.push(Action::ApplySheetPhase(self.phase));
        actions
    }

    /// Expands a half-height sheet to full height.
    pub fn zoom(&mut self) -> Vec<Action> {
        if self.phase != SheetPhase::Half {
            return vec![];
        }
        self.phase = SheetPhase::Open;
        vec![Action::ApplySheetPhase(SheetPhase::Open)]
    }

    /// Closes the sheet from any phase. Closing a closed sheet does nothing.
    pub fn close(&mut self, trigger: CloseTrigger) -> Vec<Action> {
        if self.phase.is_closed() {
            return vec![];
        }
        tracing::debug!(trigger = ?trigger, "sheet closing");

        let mut actions = self.end_gesture();
        actions.extend(self.dismiss());
        actions
    }

    /// Keeps keyboard focus inside an open sheet.
    pub fn focus_in(&self, inside_sheet: bool) -> Vec<Action> {
        if self.phase.is_closed() || inside_sheet {
            return vec![];
        }
        vec![Action::FocusFirstInSheet]
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        self.offset = None;
        if self.gesture.take().is_some() {
            vec![Action::DetachDragListeners]
        } else {
            vec![]
        }
    }

    fn dismiss(&mut self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(4);
        self.phase = SheetPhase::Closed;
        self.record_id = None;
        self.offset = None;

        actions.push(Action::HideBackdrop);
        actions.push(Action::ApplySheetPhase(SheetPhase::Closed));
        if self.scroll_locked {
            self.scroll_locked = false;
            actions.push(Action::UnlockScroll);
        }
        actions.push(Action::RestoreFocus);
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f64 = 800.0;

    fn opened() -> SheetMachine {
        let mut sheet = SheetMachine::default();
        sheet.open("kch-1");
        sheet
    }

    fn count(actions: &[Action], wanted: &Action) -> usize {
        actions.iter().filter(|a| *a == wanted).count()
    }

    #[test]
    fn only_open_leaves_closed() {
        let mut sheet = SheetMachine::default();
        assert!(sheet.drag_start(100.0, 400.0, VH).unwrap().is_empty());
        assert!(sheet.drag_move(500.0).is_empty());
        assert!(sheet.drag_end(700.0, VH).unwrap().is_empty());
        assert!(sheet.drag_cancel().is_empty());
        assert!(sheet.zoom().is_empty());
        assert!(sheet.close(CloseTrigger::Escape).is_empty());
        assert!(sheet.focus_in(false).is_empty());
        assert_eq!(sheet, SheetMachine::default());

        sheet.open("kch-1");
        assert_eq!(sheet.phase(), SheetPhase::Half);
    }

    #[test]
    fn open_locks_scroll_once_and_traps_focus() {
        let mut sheet = SheetMachine::default();
        let first = sheet.open("kch-1");
        assert_eq!(count(&first, &Action::LockScroll), 1);
        assert_eq!(count(&first, &Action::SaveFocus), 1);
        assert_eq!(first.last(), Some(&Action::FocusFirstInSheet));

        let switched = sheet.open("kch-2");
        assert_eq!(count(&switched, &Action::LockScroll), 0);
        assert_eq!(sheet.record_id(), Some("kch-2"));
        assert!(sheet.is_scroll_locked());

        assert_eq!(sheet.focus_in(false), vec![Action::FocusFirstInSheet]);
        assert!(sheet.focus_in(true).is_empty());
    }

    #[test]
    fn release_at_forty_percent_snaps_half() {
        let mut sheet = opened();
        sheet.zoom();
        assert_eq!(sheet.drag_start(100.0, 80.0, VH).unwrap(), vec![Action::AttachDragListeners]);
        assert_eq!(sheet.phase(), SheetPhase::Dragging { origin: Snap::Open });

        let actions = sheet.drag_end(0.40 * VH, VH).unwrap();
        assert_eq!(sheet.phase(), SheetPhase::Half);
        assert_eq!(count(&actions, &Action::DetachDragListeners), 1);
        assert!(!sheet.has_drag_listeners());
    }

    #[test]
    fn release_at_eighty_percent_dismisses() {
        let mut sheet = opened();
        sheet.drag_start(100.0, 400.0, VH).unwrap();
        let actions = sheet.drag_end(0.80 * VH, VH).unwrap();

        assert_eq!(sheet.phase(), SheetPhase::Closed);
        assert_eq!(sheet.record_id(), None);
        assert!(!sheet.is_scroll_locked());
        assert_eq!(
            actions,
            vec![
                Action::DetachDragListeners,
                Action::HideBackdrop,
                Action::ApplySheetPhase(SheetPhase::Closed),
                Action::UnlockScroll,
                Action::RestoreFocus,
            ]
        );
    }

    #[test]
    fn thresholds_are_exclusive_above() {
        assert_eq!(snap_for_release(0.30), Some(Snap::Open));
        assert_eq!(snap_for_release(0.31), Some(Snap::Half));
        assert_eq!(snap_for_release(0.75), Some(Snap::Half));
        assert_eq!(snap_for_release(0.76), None);
    }

    #[test]
    fn drag_move_only_touches_the_offset() {
        let mut sheet = opened();
        sheet.drag_start(100.0, 400.0, VH).unwrap();

        assert_eq!(sheet.drag_move(300.0), vec![Action::SetSheetOffset(0.75)]);
        assert_eq!(sheet.drag_move(2000.0), vec![Action::SetSheetOffset(DRAG_MAX_FRACTION)]);
        // Pulling up past the start does not raise the sheet.
        assert_eq!(sheet.drag_move(0.0), vec![Action::SetSheetOffset(0.5)]);
        assert_eq!(sheet.phase(), SheetPhase::Dragging { origin: Snap::Half });
    }

    #[test]
    fn cancel_returns_to_origin_and_detaches_once() {
        let mut sheet = opened();
        sheet.drag_start(100.0, 400.0, VH).unwrap();
        assert!(sheet.drag_start(100.0, 400.0, VH).unwrap().is_empty());
        sheet.drag_move(250.0);

        let actions = sheet.drag_cancel();
        assert_eq!(actions, vec![Action::DetachDragListeners, Action::ApplySheetPhase(SheetPhase::Half)]);
        assert_eq!(sheet.offset(), None);
        assert!(sheet.drag_cancel().is_empty());
    }

    #[test]
    fn close_mid_drag_cleans_up_everything() {
        let mut sheet = opened();
        sheet.drag_start(100.0, 400.0, VH).unwrap();

        let actions = sheet.close(CloseTrigger::Backdrop);
        assert_eq!(count(&actions, &Action::DetachDragListeners), 1);
        assert_eq!(count(&actions, &Action::UnlockScroll), 1);
        assert_eq!(actions.last(), Some(&Action::RestoreFocus));
        assert_eq!(sheet, SheetMachine::default());
    }

    #[test]
    fn bad_viewport_is_rejected_before_a_drag() {
        let mut sheet = opened();
        assert!(sheet.drag_start(0.0, 0.0, f64::NAN).is_err());
        assert_eq!(sheet.phase(), SheetPhase::Half);
        assert!(!sheet.has_drag_listeners());
        assert!(sheet.drag_end(400.0, 0.0).is_err());
    }

    #[test]
    fn bad_viewport_on_release_still_detaches_once() {
        let mut sheet = opened();
        sheet.zoom();
        sheet.drag_start(0.0, 100.0, VH).unwrap();
        sheet.drag_move(300.0);

        let actions = sheet.drag_end(400.0, 0.0).unwrap();
        assert_eq!(actions, vec![Action::DetachDragListeners, Action::ApplySheetPhase(SheetPhase::Open)]);
        assert!(!sheet.has_drag_listeners());
        assert_eq!(sheet.phase(), SheetPhase::Open);
        assert_eq!(sheet.offset(), None);

        sheet.drag_start(0.0, 100.0, VH).unwrap();
        let actions = sheet.drag_end(f64::NAN, VH).unwrap();
        assert_eq!(count(&actions, &Action::DetachDragListeners), 1);
        assert!(sheet.drag_end(400.0, VH).unwrap().is_empty());
    }
}
