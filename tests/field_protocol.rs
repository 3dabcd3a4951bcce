mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use common::*;
use ganpaint_field::brush::{BrushKind, Operation};
use ganpaint_field::event::{CommitEvent, EditorEvent, ValueChange};
use ganpaint_field::field::Field;
use ganpaint_field::image::ImageRef;
use ganpaint_field::input::Surface;
use ganpaint_field::state::{FieldSnapshot, FieldValue};
use ganpaint_field::{FieldConfig, FieldError, GanPaintField};

fn create_field() -> GanPaintField {
    init_logging();
    GanPaintField::new(FieldConfig::default(), ready_service("media/results/r.jpg"))
}

#[test]
fn test_new_field_shows_the_first_seed() {
    let field = create_field();
    assert_eq!(field.get_value(), CHURCH0);
    let value = field.value_handle().get();
    assert_eq!(value.original_image.as_str(), CHURCH0);
    assert_eq!(value.brush, BrushKind::Tree);
    assert_eq!(value.operation, Operation::Draw);
}

#[test]
fn test_set_value_with_same_or_empty_address_is_silent() {
    let mut field = create_field();
    let log = record_events(&field);

    field.set_value(CHURCH0);
    field.set_value("");
    assert_eq!(field.get_value(), CHURCH0);
    assert!(log.lock().is_empty());
}

#[test]
fn test_set_value_notifies_exactly_once() {
    let mut field = create_field();
    let log = record_events(&field);

    field.set_value("media/other.jpg");
    assert_eq!(field.get_value(), "media/other.jpg");
    assert_eq!(
        log.lock().clone(),
        vec![
            EditorEvent::ValueChanged(ValueChange {
                old: ImageRef::from(CHURCH0),
                new: ImageRef::from("media/other.jpg"),
            }),
            EditorEvent::ImageRedraw { image: ImageRef::from("media/other.jpg") },
        ]
    );

    field.set_value("media/other.jpg");
    assert_eq!(value_changes(&log), 1);
}

#[test]
fn test_set_value_while_open_updates_the_panel() {
    let service = ManualService::new();
    let mut field = GanPaintField::new(FieldConfig::default(), service.handle());
    let log = record_events(&field);
    open(&mut field);
    draw(&mut field, &[(10, 10)]);
    let request_id = service.requests()[0].id;

    field.set_value("media/host.jpg");
    let state = field.panel().state().unwrap();
    assert_eq!(state.current_image().as_str(), "media/host.jpg");
    assert_eq!(state.original_image().as_str(), CHURCH0);
    assert!(!field.panel().is_processing());
    assert_eq!(commit_events(&log).last(), Some(&CommitEvent::Discarded { request_id }));
}

#[test]
fn test_reset_restores_the_original_address() {
    let mut field = create_field();
    open(&mut field);
    draw(&mut field, &[(10, 10)]);
    field.poll();
    assert_eq!(field.get_value(), "media/results/r.jpg");

    field.handle_input(&press(Surface::TextButtons, 55, 220));
    assert_eq!(field.get_value(), CHURCH0);
}

#[test]
fn test_snapshot_round_trip() {
    let mut field = create_field();
    open(&mut field);
    field.handle_input(&press(Surface::TextButtons, 50, 140));
    field.handle_input(&press(Surface::Gallery, 50, 40));
    field.close();

    let json = field.snapshot().to_json().unwrap();
    let mut restored = create_field();
    let log = record_events(&restored);
    restored.restore_json(&json).unwrap();

    assert_eq!(restored.get_value(), CHURCH1);
    assert_eq!(restored.value_handle().get(), field.value_handle().get());
    assert_eq!(restored.value_handle().get().brush, BrushKind::Brick);
    assert_eq!(value_changes(&log), 1);
}

#[test]
fn test_snapshot_with_empty_image_is_rejected() {
    let mut field = create_field();
    let json = r#"{"image":"","original_image":"a.jpg","brush":"tree","operation":"draw","version":"0.1.0"}"#;
    let result = field.restore_json(json);
    assert!(matches!(result, Err(FieldError::Persistence(_))));
    assert_eq!(field.get_value(), CHURCH0);
}

#[test]
fn test_restore_closes_the_panel() {
    let mut field = create_field();
    open(&mut field);
    let snapshot = FieldSnapshot::new(FieldValue::new(ImageRef::from("media/x.jpg")));
    field.restore(snapshot);
    assert!(!field.is_open());
    assert_eq!(field.get_value(), "media/x.jpg");
}

#[test]
fn test_field_from_json_config() {
    let field = GanPaintField::from_json(
        r#"{"media_path": "/static/", "image_extension": "png"}"#,
        ready_service("r.png"),
    )
    .unwrap();
    assert_eq!(field.get_value(), "/static/extensions/ganpaint_images/church0.png");

    let invalid = GanPaintField::from_json(r#"{"commit_timeout": 0}"#, ready_service("r.png"));
    assert!(matches!(invalid, Err(FieldError::Config(_))));
}

#[test]
fn test_host_writes_notify_once_while_readers_see_whole_values() {
    let mut field = create_field();
    let log = record_events(&field);
    let addresses: Vec<String> = (0..8).map(|i| format!("media/t{}.jpg", i)).collect();
    let stop = Arc::new(AtomicBool::new(false));

    // readers on other threads only ever see the seed or a complete write
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let value = field.value_handle();
            let stop = stop.clone();
            let mut allowed = addresses.clone();
            allowed.push(CHURCH0.to_owned());
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let image = value.image();
                    assert!(allowed.iter().any(|address| address == image.as_str()), "torn read {}", image);
                }
            })
        })
        .collect();

    for address in &addresses {
        field.set_value(address);
        field.set_value(address);
    }
    stop.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }

    let changes: Vec<ValueChange> = log
        .lock()
        .iter()
        .filter_map(|event| match event {
            EditorEvent::ValueChanged(change) => Some(change.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(changes.len(), 8);
    assert_eq!(changes[0].old.as_str(), CHURCH0);
    for (change, address) in changes.iter().zip(&addresses) {
        assert_eq!(change.new.as_str(), address);
    }
    for pair in changes.windows(2) {
        assert_eq!(pair[0].new, pair[1].old);
    }
}

#[test]
fn test_value_handle_tracks_the_open_panel() {
    let mut field = create_field();
    let log = record_events(&field);
    let handle = field.value_handle();
    open(&mut field);

    field.set_value("media/other.jpg");
    assert_eq!(handle.image().as_str(), "media/other.jpg");
    assert_eq!(field.panel().state().unwrap().current_image(), &handle.image());
    assert_eq!(value_changes(&log), 1);
}
