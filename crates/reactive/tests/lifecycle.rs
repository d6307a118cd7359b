//! Integration tests for subscription lifecycle, focused channels and
//! adapter-backed properties.

use conduit_reactive::{
    field_lens, state, Accessor, Error, Lens, Property, Pulse, Receipt, RegistryConfig, Source,
    StateSource, Transceiver,
};
use hashbrown::HashMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct Document {
    title: String,
    tags: Vec<String>,
}

fn document() -> Transceiver<Document> {
    Transceiver::new(Document {
        title: "draft".to_string(),
        tags: vec!["a".to_string()],
    })
}

#[test]
fn test_sibling_focuses_observe_each_others_writes() {
    let doc = document();
    let title = doc.channel().focus(field_lens!(Document, title));
    let tags = doc.channel().focus(field_lens!(Document, tags));

    let seen_titles = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen_titles.clone();
    let _receipt = title
        .sieve()
        .values()
        .subscribe(move |t: String| seen_clone.borrow_mut().push(t));

    tags.set(vec!["b".to_string()]);
    title.set("final".to_string());

    assert_eq!(*seen_titles.borrow(), vec!["draft", "final"]);
    assert_eq!(
        doc.get(),
        Document {
            title: "final".to_string(),
            tags: vec!["b".to_string()],
        }
    );
}

#[test]
fn test_composed_lens_focus() {
    let doc = document();
    let tags: Lens<Document, Vec<String>> = field_lens!(Document, tags);
    let first_tag = doc.channel().focus(tags.compose(&conduit_lens::index(0)));

    assert_eq!(first_tag.get(), Some("a".to_string()));
    first_tag.set(Some("z".to_string()));
    assert_eq!(doc.get().tags, vec!["z".to_string()]);
}

#[test]
fn test_index_focus_fill_and_remove() {
    let list = state(vec![1, 2]);
    let fifth = list.index(4);

    fifth.set(Some(9));
    assert_eq!(list.get(), vec![1, 2, 9, 9, 9]);

    list.index(0).set(None);
    assert_eq!(list.get(), vec![2, 9, 9, 9]);
}

#[test]
fn test_key_focus_over_hash_map() {
    let settings: Transceiver<HashMap<String, u32>> = Transceiver::new(HashMap::new());
    let volume = settings.channel().key("volume".to_string());
    let log = Rc::new(RefCell::new(Vec::new()));

    let log_clone = log.clone();
    let _receipt = volume
        .values()
        .subscribe(move |v: Option<u32>| log_clone.borrow_mut().push(v));

    volume.set(Some(3));
    volume.set(None);

    assert_eq!(*log.borrow(), vec![None, Some(3), None]);
    assert!(settings.get().is_empty());
}

#[test]
fn test_guard_cancels_on_drop() {
    let count = Transceiver::new(0);
    let calls = Rc::new(Cell::new(0));

    {
        let calls_clone = calls.clone();
        let _guard = count
            .channel()
            .subscribe(move |_| calls_clone.set(calls_clone.get() + 1))
            .guard();
        count.set(1);
    }
    count.set(2);

    assert_eq!(calls.get(), 2);
    assert_eq!(count.receivers(), 0);
}

#[test]
fn test_plain_receipt_survives_drop() {
    let count = Transceiver::new(0);
    let calls = Rc::new(Cell::new(0));

    let calls_clone = calls.clone();
    drop(
        count
            .channel()
            .subscribe(move |_| calls_clone.set(calls_clone.get() + 1)),
    );
    count.set(1);

    assert_eq!(calls.get(), 2);
}

#[test]
fn test_merged_receipts() {
    let a = Transceiver::new(0);
    let b = Transceiver::new(0);

    let receipt = Receipt::merge([a.channel().subscribe(|_| {}), b.channel().subscribe(|_| {})]);
    receipt.cancel();

    assert_eq!(a.receivers(), 0);
    assert_eq!(b.receivers(), 0);
}

#[test]
fn test_depth_limit_config() {
    assert_eq!(
        RegistryConfig::new(0),
        Err(Error::invalid_config("max_depth must be at least 1"))
    );

    let t = Transceiver::with_config(0, RegistryConfig::new(5).unwrap());
    let feedback = t.clone();
    let _receipt = t.channel().subscribe(move |p: Pulse<i32>| feedback.set(p.new + 1));

    // Priming write plus one write per permitted nesting level
    assert_eq!(t.get(), 6);
    assert_eq!(t.registry().dropped(), 1);
}

struct Slider {
    position: f64,
}

const POSITION: Accessor<Slider, f64> =
    Accessor::new("slider.position", |s| s.position, |s, p| s.position = p);

#[test]
fn test_property_focus_round_trip() {
    let slider = Rc::new(RefCell::new(Slider { position: 0.5 }));
    let position = Property::bind(&slider, POSITION);
    let value = position.channel().coalesce(0.0);

    assert_eq!(value.get(), 0.5);
    value.set(0.75);
    assert_eq!(slider.borrow().position, 0.75);
}

#[test]
fn test_property_after_owner_dropped() {
    let slider = Rc::new(RefCell::new(Slider { position: 0.5 }));
    let position = Property::bind(&slider, POSITION);
    let channel = position.channel();
    drop(slider);

    assert!(position.is_gone());
    assert_eq!(Source::get(&position), None);
    assert_eq!(channel.get(), None);
    assert_eq!(
        position.try_set(1.0),
        Err(Error::source_gone("slider.position"))
    );
}

#[test]
#[should_panic(expected = "slider.position")]
fn test_property_write_after_owner_dropped_panics() {
    let slider = Rc::new(RefCell::new(Slider { position: 0.5 }));
    let position = Property::bind(&slider, POSITION);
    drop(slider);

    StateSource::set(&position, Some(1.0));
}

#[test]
#[should_panic(expected = "Source gone")]
fn test_optional_focus_write_after_owner_dropped_panics() {
    let slider = Rc::new(RefCell::new(Slider { position: 0.5 }));
    let position = Property::bind(&slider, POSITION);
    let focused = position
        .channel()
        .focus(Lens::<f64, f64>::identity().optional());
    drop(slider);

    focused.set(Some(1.0));
}

#[test]
fn test_merged_property_receipts_request_every_part() {
    let a = Rc::new(RefCell::new(Slider { position: 0.1 }));
    let b = Rc::new(RefCell::new(Slider { position: 0.2 }));
    let pa = Property::bind(&a, POSITION);
    let pb = Property::bind(&b, POSITION);
    let log = Rc::new(RefCell::new(Vec::new()));

    let (la, lb) = (log.clone(), log.clone());
    let receipt = Receipt::merge([
        pa.channel()
            .values()
            .subscribe(move |v: Option<f64>| la.borrow_mut().push(v)),
        pb.channel()
            .values()
            .subscribe(move |v: Option<f64>| lb.borrow_mut().push(v)),
    ]);
    receipt.request();

    assert_eq!(
        *log.borrow(),
        vec![Some(0.1), Some(0.2), Some(0.1), Some(0.2)]
    );
}
