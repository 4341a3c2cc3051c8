//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the host runtime ([`crate::runtime`]) and the
//! domain/catalog/pipeline layers. It holds every decision the page makes and
//! performs none of the effects.
//!
//! # Architecture
//!
//! ```text
//! Host callback → Event → handle_event → State Mutations → Actions → Side Effects
//!                            ↑                                   ↓
//!                            └────── LocationResolved ◀── RequestLocation
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Sheet phase enums
//! - [`presenter`]: Full page vs. sheet decision for detail requests
//! - [`sheet`]: Bottom-sheet state machine
//! - [`state`]: State store and view model computation
//! - [`url`]: Query-string codec
//!
//! # Example
//!
//! ```rust
//! use placesheet::app::{handle_event, DiscoveryState, Event, Settings, SheetPhase};
//! use placesheet::catalog::{Catalog, CityDirectory};
//! use placesheet::domain::PlaceRecord;
//!
//! let catalog = Catalog::from_records(vec![PlaceRecord::new("1", "Cat Museum", "kuching")]);
//! let mut state = DiscoveryState::from_query(catalog, CityDirectory::default(), Settings::default(), "");
//! handle_event(&mut state, &Event::DetailRequested { id: "1".into(), wide: false })?;
//! assert_eq!(state.sheet.phase(), SheetPhase::Half);
//! # Ok::<(), placesheet::DiscoveryError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod presenter;
pub mod sheet;
pub mod state;
pub mod url;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{CloseTrigger, SheetPhase, Snap};
pub use presenter::{detail_href, present, Presentation};
pub use sheet::SheetMachine;
pub use state::{DiscoveryState, Settings};
pub use url::{parse_query, serialize_query, Location};
