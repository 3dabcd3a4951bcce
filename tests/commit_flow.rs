mod common;

use std::time::{Duration, Instant};
use common::*;
use ganpaint_field::brush::{BrushKind, Operation};
use ganpaint_field::event::{CommitEvent, EditorEvent, ValueChange};
use ganpaint_field::field::Field;
use ganpaint_field::geometry::Point;
use ganpaint_field::image::ImageRef;
use ganpaint_field::input::Surface;
use ganpaint_field::panel::PanelStatus;
use ganpaint_field::service::{EditResponse, EditServiceError};
use ganpaint_field::{FieldConfig, GanPaintField};

const RESULT: &str = "media/results/edit-1.jpg";

fn create_open_field() -> (GanPaintField, ManualService, EventLog) {
    init_logging();
    let service = ManualService::new();
    let mut field = GanPaintField::new(FieldConfig::default(), service.handle());
    let log = record_events(&field);
    open(&mut field);
    (field, service, log)
}

#[test]
fn test_single_press_commits_a_one_point_stroke() {
    let (mut field, service, log) = create_open_field();

    draw(&mut field, &[(40, 50)]);
    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.points(), &[Point::new(40, 50)]);
    assert_eq!(request.brush, BrushKind::Tree);
    assert_eq!(request.operation, Operation::Draw);
    assert_eq!(request.source_image.as_str(), CHURCH0);

    assert!(field.panel().is_processing());
    assert_eq!(field.panel().status(), Some(&PanelStatus::Processing));
    assert_eq!(
        commit_events(&log),
        vec![CommitEvent::Started { request_id: request.id, points: 1 }]
    );
}

#[test]
fn test_successful_commit_replaces_the_image() {
    let (mut field, service, log) = create_open_field();
    draw(&mut field, &[(40, 50), (41, 52)]);
    let request_id = service.requests()[0].id;

    // nothing happens until the service answers
    field.poll();
    assert!(field.panel().is_processing());
    assert_eq!(field.get_value(), CHURCH0);

    service.respond(Ok(EditResponse::new(RESULT)));
    field.poll();

    assert_eq!(field.get_value(), RESULT);
    assert!(!field.panel().is_processing());
    assert_eq!(field.panel().status(), Some(&PanelStatus::Idle));
    let state = field.panel().state().unwrap();
    assert_eq!(state.current_image().as_str(), RESULT);
    assert_eq!(state.history().len(), 1);

    let events = log.lock().clone();
    let tail = &events[events.len() - 3..];
    assert_eq!(
        tail,
        &[
            EditorEvent::ValueChanged(ValueChange {
                old: ImageRef::from(CHURCH0),
                new: ImageRef::from(RESULT),
            }),
            EditorEvent::ImageRedraw { image: ImageRef::from(RESULT) },
            EditorEvent::Commit(CommitEvent::Completed {
                request_id,
                image: ImageRef::from(RESULT),
            }),
        ]
    );
}

#[test]
fn test_drawing_is_disabled_while_a_commit_is_pending() {
    let (mut field, service, _log) = create_open_field();
    draw(&mut field, &[(10, 10)]);
    let listeners = field.panel().listeners().clone();
    assert_eq!(listeners.len(), 5);

    draw(&mut field, &[(20, 20), (21, 21)]);
    assert_eq!(field.panel().active_stroke(), None);
    assert_eq!(listeners.len(), 5);
    assert_eq!(service.requests().len(), 1);
}

#[test]
fn test_gallery_selection_discards_the_pending_result() {
    let (mut field, service, log) = create_open_field();
    draw(&mut field, &[(10, 10)]);
    let request_id = service.requests()[0].id;

    assert!(field.handle_input(&press(Surface::Gallery, 50, 40)));
    assert_eq!(field.get_value(), CHURCH1);
    assert!(!field.panel().is_processing());
    assert_eq!(
        commit_events(&log).last(),
        Some(&CommitEvent::Discarded { request_id })
    );

    // a late answer is never applied
    service.respond(Ok(EditResponse::new(RESULT)));
    field.poll();
    assert_eq!(field.get_value(), CHURCH1);
    let state = field.panel().state().unwrap();
    assert_eq!(state.original_image().as_str(), CHURCH1);
    assert!(state.history().is_empty());

    // and drawing is possible again
    draw(&mut field, &[(5, 5)]);
    assert_eq!(service.requests().len(), 2);
    assert_eq!(service.requests()[1].source_image.as_str(), CHURCH1);
}

#[test]
fn test_service_failure_leaves_the_image_unchanged() {
    let (mut field, service, log) = create_open_field();
    draw(&mut field, &[(10, 10)]);
    let request_id = service.requests()[0].id;

    let error = EditServiceError::Rejected("no units for feature".to_owned());
    service.respond(Err(error.clone()));
    field.poll();

    assert_eq!(field.get_value(), CHURCH0);
    assert_eq!(field.panel().status(), Some(&PanelStatus::Failed(error.clone())));
    assert!(field.panel().state().unwrap().history().is_empty());
    assert_eq!(
        commit_events(&log).last(),
        Some(&CommitEvent::Failed { request_id, reason: error.to_string() })
    );
    assert_eq!(value_changes(&log), 0);

    // the next press clears the failure
    field.handle_input(&press(Surface::Canvas, 3, 3));
    assert_eq!(field.panel().status(), Some(&PanelStatus::Idle));
}

#[test]
fn test_commit_times_out() {
    let (mut field, service, log) = create_open_field();
    draw(&mut field, &[(10, 10)]);

    field.panel_mut().poll_at(Instant::now() + Duration::from_secs(5));
    assert!(field.panel().is_processing());

    field.panel_mut().poll_at(Instant::now() + Duration::from_secs(31));
    let timeout = EditServiceError::Timeout(Duration::from_secs(30));
    assert_eq!(field.panel().status(), Some(&PanelStatus::Failed(timeout)));
    assert!(!field.panel().is_processing());
    assert!(matches!(commit_events(&log).last(), Some(CommitEvent::Failed { .. })));

    // the answer arriving after the timeout is ignored
    service.respond(Ok(EditResponse::new(RESULT)));
    field.poll();
    assert_eq!(field.get_value(), CHURCH0);
}

#[test]
fn test_empty_result_is_an_invalid_response() {
    let (mut field, service, _log) = create_open_field();
    draw(&mut field, &[(10, 10)]);
    service.respond(Ok(EditResponse::new("")));
    field.poll();

    assert!(matches!(
        field.panel().status(),
        Some(PanelStatus::Failed(EditServiceError::InvalidResponse(_)))
    ));
    assert_eq!(field.get_value(), CHURCH0);
}

#[test]
fn test_closing_drops_the_pending_commit() {
    let (mut field, service, log) = create_open_field();
    draw(&mut field, &[(10, 10)]);
    let request_id = service.requests()[0].id;

    field.close();
    let events = log.lock().clone();
    assert_eq!(
        &events[events.len() - 2..],
        &[
            EditorEvent::Commit(CommitEvent::Discarded { request_id }),
            EditorEvent::PanelClosed,
        ]
    );

    service.respond(Ok(EditResponse::new(RESULT)));
    field.poll();
    assert_eq!(field.get_value(), CHURCH0);
}

#[test]
fn test_undo_and_reset_after_commits() {
    init_logging();
    let mut field = GanPaintField::new(FieldConfig::default(), ready_service(RESULT));
    open(&mut field);

    draw(&mut field, &[(10, 10)]);
    field.poll();
    assert_eq!(field.get_value(), RESULT);

    // undo button
    field.handle_input(&press(Surface::TextButtons, 10, 220));
    assert_eq!(field.get_value(), CHURCH0);

    draw(&mut field, &[(10, 10)]);
    field.poll();
    assert_eq!(field.get_value(), RESULT);

    // reset button
    field.handle_input(&press(Surface::TextButtons, 55, 220));
    assert_eq!(field.get_value(), CHURCH0);
    assert!(field.panel().state().unwrap().history().is_empty());
}

#[test]
fn test_configured_pen_radius_widens_the_request_mask() {
    init_logging();
    let service = ManualService::new();
    let config = FieldConfig {
        mask_pen_radius: 2,
        ..FieldConfig::default()
    };
    let mut field = GanPaintField::new(config, service.handle());
    open(&mut field);
    draw(&mut field, &[(100, 100)]);

    let request = &service.requests()[0];
    assert_eq!(request.pen_radius, 2);
    let mask = request.mask();
    assert_eq!(mask.selected_count(), 25);
    assert!(mask.is_selected(Point::new(98, 102)));
    assert!(!mask.is_selected(Point::new(97, 100)));
}
