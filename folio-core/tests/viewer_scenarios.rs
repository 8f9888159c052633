//! End-to-end viewer scenarios: load lifecycle, navigation, stale loads

use folio_core::{
    DocumentRef, LoadError, LoadStatus, NavigationError, Notice, PagedDocument, Severity,
    ValidationError, Viewer, ViewerConfig,
};
use pretty_assertions::assert_eq;
use std::num::NonZeroU32;

#[derive(Debug, Clone, PartialEq)]
struct FakeDocument {
    name: &'static str,
    pages: u32,
}

impl PagedDocument for FakeDocument {
    fn page_count(&self) -> u32 {
        self.pages
    }
}

fn viewer() -> Viewer<Vec<Notice>> {
    Viewer::new(ViewerConfig::default(), Vec::new())
}

fn reference(name: &str) -> DocumentRef {
    name.parse().unwrap()
}

#[test]
fn failed_load_notifies_once_and_keeps_page_state() {
    let mut viewer = viewer();
    let token = viewer.open(reference("missing.pdf"));

    let loaded = viewer.finish_load::<FakeDocument>(
        token,
        Err(LoadError::NotFound("missing.pdf".into())),
    );

    assert!(loaded.is_none());
    assert_eq!(viewer.state().status(), LoadStatus::Failed);
    assert_eq!(viewer.state().current_page(), 1);
    assert_eq!(viewer.state().page_count(), None);
    assert_eq!(
        viewer.notifier().as_slice(),
        &[Notice::new("Error", "Failed to load document", Severity::Error)]
    );
    assert_eq!(viewer.render_request(), None);
}

#[test]
fn reason_is_not_shown_to_the_user() {
    let mut viewer = viewer();
    let token = viewer.open(reference("broken.pdf"));
    viewer.finish_load::<FakeDocument>(token, Err(LoadError::Parse("trailer not found".into())));

    let notice = &viewer.notifier()[0];
    assert!(!notice.message.contains("trailer"));
}

#[test]
fn twelve_page_document_walks_to_the_end_and_stops() {
    let mut viewer = viewer();
    let token = viewer.open(reference("handout.pdf"));
    let doc = FakeDocument {
        name: "handout",
        pages: 12,
    };
    assert_eq!(viewer.finish_load(token, Ok(doc.clone())), Some(doc));

    assert_eq!(viewer.state().status(), LoadStatus::Ready);
    assert_eq!(viewer.state().current_page(), 1);

    for _ in 0..11 {
        assert_eq!(viewer.next_page(), Ok(true));
    }
    assert_eq!(viewer.state().current_page(), 12);

    assert_eq!(viewer.next_page(), Ok(false));
    assert_eq!(viewer.state().current_page(), 12);
    assert_eq!(viewer.state().page_input(), "12");
    assert!(viewer.notifier().is_empty());
}

#[test]
fn superseded_success_is_ignored() {
    let mut viewer = viewer();
    let token_a = viewer.open(reference("a.pdf"));
    let token_b = viewer.open(reference("b.pdf"));

    let stale = FakeDocument { name: "a", pages: 3 };
    assert_eq!(viewer.finish_load(token_a, Ok(stale)), None);
    assert_eq!(viewer.state().status(), LoadStatus::Loading);
    assert_eq!(viewer.state().page_count(), None);

    let fresh = FakeDocument { name: "b", pages: 7 };
    assert_eq!(viewer.finish_load(token_b, Ok(fresh.clone())), Some(fresh));
    assert_eq!(viewer.state().page_count(), NonZeroU32::new(7));
    assert_eq!(viewer.document(), Some(&reference("b.pdf")));
}

#[test]
fn superseded_failure_after_new_document_is_ready() {
    let mut viewer = viewer();
    let token_a = viewer.open(reference("a.pdf"));
    let token_b = viewer.open(reference("b.pdf"));

    viewer.finish_load(token_b, Ok(FakeDocument { name: "b", pages: 2 }));
    viewer.finish_load::<FakeDocument>(token_a, Err(LoadError::Io("timed out".into())));

    assert_eq!(viewer.state().status(), LoadStatus::Ready);
    assert_eq!(viewer.state().page_count(), NonZeroU32::new(2));
    assert!(viewer.notifier().is_empty());
}

#[test]
fn superseded_result_is_ignored_when_new_load_failed() {
    let mut viewer = viewer();
    let token_a = viewer.open(reference("a.pdf"));
    let token_b = viewer.open(reference("b.pdf"));

    viewer.finish_load::<FakeDocument>(token_b, Err(LoadError::Http("404".into())));
    viewer.finish_load(token_a, Ok(FakeDocument { name: "a", pages: 5 }));

    assert_eq!(viewer.state().status(), LoadStatus::Failed);
    assert_eq!(viewer.state().page_count(), None);
    assert_eq!(viewer.notifier().len(), 1);
}

#[test]
fn failed_viewer_recovers_with_new_document() {
    let mut viewer = viewer();
    let token = viewer.open(reference("bad.pdf"));
    viewer.finish_load::<FakeDocument>(token, Err(LoadError::Parse("garbage".into())));
    assert_eq!(viewer.next_page(), Err(NavigationError::NotReady));

    let token = viewer.open(reference("good.pdf"));
    viewer.finish_load(token, Ok(FakeDocument { name: "good", pages: 2 }));
    assert_eq!(viewer.next_page(), Ok(true));
}

#[test]
fn page_jump_field_round_trip() {
    let mut viewer = viewer();
    let token = viewer.open(reference("book.pdf"));

    viewer.set_page_input("9");
    assert_eq!(viewer.page_input_error(), Some(ValidationError::BoundUnknown));
    assert_eq!(viewer.commit_page_input(), Err(ValidationError::BoundUnknown));

    viewer.finish_load(token, Ok(FakeDocument { name: "book", pages: 10 }));
    viewer.take_render_request();
    // The text typed during the load is valid now, without retyping
    assert_eq!(viewer.state().page_input(), "9");
    assert_eq!(viewer.page_input_error(), None);

    viewer.set_page_input("abc");
    assert_eq!(viewer.page_input_error(), Some(ValidationError::NotANumber));
    assert_eq!(viewer.commit_page_input(), Err(ValidationError::NotANumber));
    assert_eq!(viewer.take_render_request(), None);

    viewer.set_page_input("9");
    assert_eq!(viewer.commit_page_input(), Ok(NonZeroU32::new(9).unwrap()));
    assert_eq!(viewer.state().current_page(), 9);
    assert_eq!(viewer.take_render_request().map(|r| r.page), Some(9));

    // Following navigation echoes the post-update page, not the old one
    viewer.next_page().unwrap();
    assert_eq!(viewer.state().page_input(), "10");
    viewer.previous_page().unwrap();
    viewer.previous_page().unwrap();
    assert_eq!(viewer.state().page_input(), "8");
}

#[test]
fn new_document_resets_transform_and_page() {
    let mut viewer = viewer();
    let token = viewer.open(reference("a.pdf"));
    viewer.finish_load(token, Ok(FakeDocument { name: "a", pages: 6 }));
    viewer.jump_to_page(4).unwrap();
    viewer.set_scale(2.5).unwrap();
    viewer.rotate90();

    let token = viewer.open(reference("https://example.com/b.pdf"));
    assert_eq!(viewer.state().current_page(), 1);
    assert_eq!(viewer.state().scale(), 1.0);
    assert_eq!(viewer.state().rotation(), 0);
    assert_eq!(viewer.state().page_input(), "1");

    viewer.finish_load(token, Ok(FakeDocument { name: "b", pages: 2 }));
    let request = viewer.take_render_request().unwrap();
    assert_eq!((request.page, request.scale, request.rotation), (1, 1.0, 0));
}

#[test]
fn transforms_are_accepted_before_load() {
    let mut viewer = viewer();
    let token = viewer.open(reference("slow.pdf"));
    viewer.set_scale(2.0).unwrap();
    viewer.rotate90();
    assert_eq!(viewer.take_render_request(), None);

    viewer.finish_load(token, Ok(FakeDocument { name: "slow", pages: 1 }));
    let request = viewer.take_render_request().unwrap();
    assert_eq!((request.scale, request.rotation), (2.0, 90));
}
