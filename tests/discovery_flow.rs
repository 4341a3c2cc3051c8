//! End-to-end flows through `DiscoveryController` with recording host fakes.

use futures_util::FutureExt;
use placesheet::app::{CloseTrigger, Location};
use placesheet::catalog::{Catalog, Favorites, MemoryFavorites};
use placesheet::domain::Coordinates;
use placesheet::pipeline::FixedLocation;
use placesheet::runtime::{Capabilities, Renderer, SheetView, UrlHistory, Viewport};
use placesheet::ui::{ListViewModel, SheetViewModel};
use placesheet::{initialize, Config, DiscoveryController, Event, PlaceRecord, SheetPhase, SortMode};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

struct FakeHistory {
    href: Rc<RefCell<String>>,
    log: Log,
}

impl UrlHistory for FakeHistory {
    fn location(&self) -> Location {
        Location::from_href(&self.href.borrow())
    }

    fn replace(&self, url: &str) {
        *self.href.borrow_mut() = url.to_string();
        self.log.borrow_mut().push(format!("replace {url}"));
    }

    fn navigate(&self, href: &str) {
        self.log.borrow_mut().push(format!("navigate {href}"));
    }
}

struct FakeViewport(Rc<Cell<f64>>);

impl Viewport for FakeViewport {
    fn width(&self) -> f64 {
        self.0.get()
    }
}

struct FakeSheet {
    log: Log,
    shared_urls: Rc<RefCell<Vec<String>>>,
}

impl FakeSheet {
    fn push(&self, entry: &str) {
        self.log.borrow_mut().push(entry.to_string());
    }
}

impl SheetView for FakeSheet {
    fn lock_scroll(&mut self) {
        self.push("lock");
    }
    fn unlock_scroll(&mut self) {
        self.push("unlock");
    }
    fn show_backdrop(&mut self) {
        self.push("backdrop on");
    }
    fn hide_backdrop(&mut self) {
        self.push("backdrop off");
    }
    fn populate(&mut self, content: &SheetViewModel) {
        self.shared_urls.borrow_mut().push(content.share.url.clone());
        self.push(&format!("populate {}", content.id));
    }
    fn apply_phase(&mut self, phase: SheetPhase) {
        self.push(&format!("phase {phase:?}"));
    }
    fn set_offset(&mut self, fraction: f64) {
        self.push(&format!("offset {fraction:.2}"));
    }
    fn save_focus(&mut self) {
        self.push("save focus");
    }
    fn restore_focus(&mut self) {
        self.push("restore focus");
    }
    fn focus_first(&mut self) {
        self.push("focus first");
    }
    fn attach_drag_listeners(&mut self) {
        self.push("attach");
    }
    fn detach_drag_listeners(&mut self) {
        self.push("detach");
    }
}

#[derive(Default)]
struct Frame {
    title: String,
    card_ids: Vec<String>,
    not_found: Option<String>,
    locating: bool,
}

struct FakeRenderer(Rc<RefCell<Vec<Frame>>>);

impl Renderer for FakeRenderer {
    fn render(&mut self, view: &ListViewModel) {
        self.0.borrow_mut().push(Frame {
            title: view.header.title.clone(),
            card_ids: view.cards.iter().map(|c| c.id.clone()).collect(),
            not_found: view.not_found.clone(),
            locating: view.locating,
        });
    }
}

struct Page {
    controller: DiscoveryController,
    href: Rc<RefCell<String>>,
    width: Rc<Cell<f64>>,
    history_log: Log,
    sheet_log: Log,
    shared_urls: Rc<RefCell<Vec<String>>>,
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl Page {
    fn last_frame(&self) -> std::cell::Ref<'_, Frame> {
        std::cell::Ref::map(self.frames.borrow(), |frames| frames.last().expect("rendered at least once"))
    }

    fn take_sheet_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.sheet_log.borrow_mut())
    }
}

fn place(id: &str, name: &str, city: &str, rating: f64, at: (f64, f64)) -> PlaceRecord {
    let mut p = PlaceRecord::new(id, name, city);
    p.rating = Some(rating);
    p.coordinates = Some(Coordinates::new(at.0, at.1));
    p.tags = vec!["Taste".to_string()];
    p.category = "Taste".to_string();
    p
}

fn catalog() -> Catalog {
    Catalog::from_records(vec![
        place("miri-1", "Tamu Muhibbah", "miri", 4.8, (4.39, 113.99)),
        place("kch-1", "Top Spot Food Court", "kuching", 4.5, (1.558, 110.345)),
        place("sibu-1", "Sibu Central Market", "sibu", 4.1, (2.29, 111.83)),
    ])
}

fn page(href: &str, width: f64, fix: Option<Coordinates>) -> Page {
    let href_cell = Rc::new(RefCell::new(href.to_string()));
    let width_cell = Rc::new(Cell::new(width));
    let history_log: Log = Rc::default();
    let sheet_log: Log = Rc::default();
    let shared_urls = Rc::new(RefCell::new(Vec::new()));
    let frames = Rc::new(RefCell::new(Vec::new()));

    let state = initialize(&Config::default(), catalog(), &Location::from_href(href));
    let caps = Capabilities {
        history: Box::new(FakeHistory {
            href: Rc::clone(&href_cell),
            log: Rc::clone(&history_log),
        }),
        viewport: Box::new(FakeViewport(Rc::clone(&width_cell))),
        sheet: Box::new(FakeSheet {
            log: Rc::clone(&sheet_log),
            shared_urls: Rc::clone(&shared_urls),
        }),
        renderer: Box::new(FakeRenderer(Rc::clone(&frames))),
        geolocation: Box::new(FixedLocation(fix)),
        favorites: Box::new(MemoryFavorites::default()),
    };

    Page {
        controller: DiscoveryController::new(state, caps),
        href: href_cell,
        width: width_cell,
        history_log,
        sheet_log,
        shared_urls,
        frames,
    }
}

#[test]
fn shared_link_with_id_opens_the_sheet_on_load() {
    let mut page = page("/places.html?city=kuching&id=kch-1", 390.0, None);
    page.controller.start();

    assert_eq!(
        page.take_sheet_log(),
        ["lock", "backdrop on", "populate kch-1", "phase Half", "save focus", "focus first"]
    );
    assert_eq!(*page.shared_urls.borrow(), ["/places.html?city=kuching&id=kch-1"]);
    assert_eq!(page.last_frame().card_ids, ["kch-1"]);
    assert_eq!(page.last_frame().title, "Kuching");
}

#[test]
fn dragging_far_down_dismisses_and_drops_id_from_url() {
    let mut page = page("/places.html", 390.0, None);
    page.controller.start();
    page.controller.request_detail("sibu-1");
    assert_eq!(*page.href.borrow(), "/places.html?id=sibu-1");
    page.take_sheet_log();

    page.controller.dispatch(&Event::DragStart {
        pointer_y: 500.0,
        sheet_top: 500.0,
        viewport_height: 1000.0,
    });
    page.controller.dispatch(&Event::DragMove { pointer_y: 800.0 });
    let rerendered = page.controller.dispatch(&Event::DragEnd {
        sheet_top: 800.0,
        viewport_height: 1000.0,
    });

    assert!(rerendered);
    assert_eq!(
        page.take_sheet_log(),
        ["attach", "offset 0.80", "detach", "backdrop off", "phase Closed", "unlock", "restore focus"]
    );
    assert_eq!(*page.href.borrow(), "/places.html");
    assert_eq!(page.controller.state().filter().selected_id, None);
}

#[test]
fn releasing_mid_screen_snaps_to_half() {
    let mut page = page("/places.html", 390.0, None);
    page.controller.start();
    page.controller.request_detail("kch-1");
    page.controller.dispatch(&Event::Zoom);
    page.take_sheet_log();

    page.controller.dispatch(&Event::DragStart {
        pointer_y: 100.0,
        sheet_top: 80.0,
        viewport_height: 1000.0,
    });
    page.controller.dispatch(&Event::DragEnd {
        sheet_top: 400.0,
        viewport_height: 1000.0,
    });

    assert_eq!(page.take_sheet_log(), ["attach", "detach", "phase Half"]);
    assert_eq!(page.controller.state().sheet.phase(), SheetPhase::Half);
    assert_eq!(*page.href.borrow(), "/places.html?id=kch-1");
}

#[test]
fn wide_viewport_navigates_to_the_detail_page() {
    let mut page = page("/places.html?city=miri", 390.0, None);
    page.controller.start();
    page.width.set(1280.0);

    page.controller.request_detail("miri-1");

    assert!(page.take_sheet_log().is_empty());
    assert_eq!(
        page.history_log.borrow().last().map(String::as_str),
        Some("navigate place.html?id=miri-1&city=miri")
    );
    assert_eq!(page.controller.state().filter().selected_id, None);
}

#[test]
fn unknown_id_from_url_shows_not_found() {
    let mut page = page("/places.html?id=gone-42", 390.0, None);
    page.controller.start();

    assert_eq!(page.last_frame().not_found.as_deref(), Some("gone-42"));
    assert_eq!(*page.href.borrow(), "/places.html");
    assert!(!page.take_sheet_log().iter().any(|e| e == "lock"));
}

#[test]
fn near_sort_reorders_once_the_fix_resolves() {
    let kuching = Coordinates::new(1.55, 110.34);
    let mut page = page("/places.html", 390.0, Some(kuching));
    page.controller.start();
    assert_eq!(page.last_frame().card_ids, ["miri-1", "kch-1", "sibu-1"]);

    page.controller.set_sort_name("near").unwrap();
    assert!(page.last_frame().locating);
    assert_eq!(page.last_frame().card_ids, ["miri-1", "kch-1", "sibu-1"]);
    assert_eq!(*page.href.borrow(), "/places.html?sort=near");

    let request = page.controller.take_location_request().expect("location requested");
    let resolved = request.resolve().now_or_never().expect("fixed location is ready");
    assert!(page.controller.dispatch(&resolved));

    assert!(!page.last_frame().locating);
    assert_eq!(page.last_frame().card_ids, ["kch-1", "sibu-1", "miri-1"]);
    assert!(page.controller.take_location_request().is_none());
}

#[test]
fn unknown_sort_name_changes_nothing() {
    let mut page = page("/places.html", 390.0, None);
    page.controller.start();
    let frames_before = page.frames.borrow().len();

    assert!(page.controller.set_sort_name("closest").is_err());
    assert_eq!(page.controller.state().filter().sort, SortMode::Hot);
    assert_eq!(page.frames.borrow().len(), frames_before);
    assert_eq!(page.controller.url_writes(), 0);
}

#[test]
fn escape_closes_and_favorites_refresh_the_open_sheet() {
    let mut page = page("/places.html", 390.0, None);
    page.controller.start();
    page.controller.request_detail("kch-1");
    page.take_sheet_log();

    page.controller.dispatch(&Event::ToggleFavorite { id: "kch-1".into() });
    assert!(page.controller.favorites().is_favorite("kch-1"));
    assert_eq!(page.take_sheet_log(), ["populate kch-1"]);

    page.controller.dispatch(&Event::CloseSheet(CloseTrigger::Escape));
    assert_eq!(
        page.take_sheet_log(),
        ["backdrop off", "phase Closed", "unlock", "restore focus"]
    );
    assert_eq!(*page.href.borrow(), "/places.html");
}
