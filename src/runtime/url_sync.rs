//! Serialized writes of listing state into the address bar.

use super::capabilities::UrlHistory;
use crate::app::url::compose_url;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Writes query strings with replace semantics, one at a time.
///
/// A write requested while another is in flight (for instance from a history
/// implementation that calls back into the page) is queued and performed after the
/// current one, so the address bar only ever holds whole snapshots in request order.
///
/// # Example
///
/// ```rust
/// use placesheet::app::Location;
/// use placesheet::runtime::{UrlHistory, UrlSync};
/// use std::cell::RefCell;
///
/// struct Bar(RefCell<Vec<String>>);
/// impl UrlHistory for Bar {
///     fn location(&self) -> Location { Location::from_href("/places.html") }
///     fn replace(&self, url: &str) { self.0.borrow_mut().push(url.to_string()); }
///     fn navigate(&self, _href: &str) {}
/// }
///
/// let bar = Bar(RefCell::new(Vec::new()));
/// let sync = UrlSync::default();
/// sync.write(&bar, "city=miri");
/// sync.write(&bar, "");
/// assert_eq!(*bar.0.borrow(), ["/places.html?city=miri", "/places.html"]);
/// ```
#[derive(Debug, Default)]
pub struct UrlSync {
    queue: RefCell<VecDeque<String>>,
    writing: Cell<bool>,
    writes: Cell<u64>,
}

impl UrlSync {
    /// Replaces the current URL's query with `query` (empty for the bare path).
    pub fn write(&self, history: &dyn UrlHistory, query: &str) {
        self.queue.borrow_mut().push_back(query.to_string());

        if self.writing.get() {
            tracing::debug!(queued = self.queue.borrow().len(), "url write in flight, queued");
            return;
        }

        self.writing.set(true);
        loop {
            // The borrow must end before `replace`, which may re-enter `write`.
            let next = self.queue.borrow_mut().pop_front();
            let Some(query) = next else { break };

            let url = compose_url(&history.location().path, &query);
            tracing::trace!(url = %url, "replacing url");
            history.replace(&url);
            self.writes.set(self.writes.get() + 1);
        }
        self.writing.set(false);
    }

    /// Number of completed replace calls.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }
}
