// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `Lightbox` state machine.
//!
//! These drive a lightbox through a recording surface and check what it asked
//! the host to do: presentation flags, control state, timers, and fits.

mod support;

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use support::{RecordingSurface, SharedViewport, TestLightbox, lightbox, settle, show_now};
use vitrine_lightbox::{
    Control, Key, Lightbox, LightboxError, LightboxOptions, SourceId, SourceSpec,
};

#[test]
fn new_lightbox_is_hidden_with_no_current_image() {
    let lb = lightbox(3, LightboxOptions::default());
    assert!(!lb.is_shown());
    assert_eq!(lb.current(), None);
    assert_eq!(lb.len(), 3);
    assert!(!lb.surface().shown);
    assert!(lb.surface().scheduled.is_empty());
}

#[test]
fn sources_are_numbered_in_order() {
    let lb = lightbox(3, LightboxOptions::default());
    let urls: Vec<_> = lb.sources().iter().map(|s| s.url()).collect();
    assert_eq!(urls, ["0.jpg", "1.jpg", "2.jpg"]);
    for (index, source) in lb.sources().iter().enumerate() {
        assert_eq!(source.id(), SourceId::new(index));
    }
}

#[test]
fn single_source_disables_navigation_controls() {
    let lb = lightbox(1, LightboxOptions::default());
    assert!(lb.surface().disabled.contains(&Control::Prev));
    assert!(lb.surface().disabled.contains(&Control::Next));
    assert!(!lb.surface().disabled.contains(&Control::Close));
}

#[test]
fn no_sources_disables_navigation_controls() {
    let lb = lightbox(0, LightboxOptions::default());
    assert!(lb.is_empty());
    assert!(lb.surface().disabled.contains(&Control::Prev));
    assert!(lb.surface().disabled.contains(&Control::Next));
}

#[test]
fn several_sources_enable_navigation_controls() {
    let mut surface = RecordingSurface::navigation();
    // Left over from markup rendered before all triggers existed.
    surface.disabled.insert(Control::Prev);
    surface.disabled.insert(Control::Next);

    let lb = Lightbox::new(
        surface,
        SharedViewport::new(100.0, 100.0),
        support::square_sources(2),
        LightboxOptions::default(),
    )
    .unwrap();
    assert!(lb.surface().disabled.is_empty());
}

#[test]
fn missing_url_fails_construction() {
    let specs = vec![
        SourceSpec::new("a.jpg"),
        SourceSpec {
            url: None,
            ratio: Some(1.0),
        },
    ];
    let err = Lightbox::new(
        RecordingSurface::default(),
        SharedViewport::new(100.0, 100.0),
        specs,
        LightboxOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, LightboxError::MissingUrl { index: 1 });
}

#[test]
fn tab_index_makes_every_trigger_focusable() {
    let lb = lightbox(3, LightboxOptions::default());
    assert_eq!(
        lb.surface().focusable_sources,
        [SourceId::new(0), SourceId::new(1), SourceId::new(2)]
    );

    let lb = lightbox(3, LightboxOptions::default().with_tab_index(false));
    assert!(lb.surface().focusable_sources.is_empty());
}

#[test]
fn show_opens_and_swaps_after_timer() {
    let mut lb = lightbox(3, LightboxOptions::default());
    lb.show(SourceId::new(1)).unwrap();

    assert!(lb.is_shown());
    assert!(lb.surface().shown);
    assert!(lb.surface().key_listener);
    // Nothing swapped until the timer fires.
    assert_eq!(lb.surface().image_src, None);
    assert_eq!(lb.current(), None);
    assert_eq!(lb.target(), Some(SourceId::new(1)));

    let (delay, ticket) = lb.surface().scheduled[0];
    assert_eq!(delay, 0);
    assert!(lb.complete_swap(ticket));
    assert_eq!(lb.surface().image_src.as_deref(), Some("1.jpg"));
    assert_eq!(lb.current(), Some(SourceId::new(1)));
    assert_eq!(lb.pending_swap(), None);
    assert!(lb.surface().image_fit.is_some());
}

#[test]
fn show_unknown_source_is_rejected() {
    let mut lb = lightbox(2, LightboxOptions::default());
    let err = lb.show(SourceId::new(2)).unwrap_err();
    assert_eq!(err, LightboxError::UnknownSource(SourceId::new(2)));
    assert!(!lb.is_shown());
    assert!(lb.surface().scheduled.is_empty());
}

#[test]
fn repeated_show_runs_first_open_effects_once() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut lb = lightbox(
        3,
        LightboxOptions::default().with_on_change(move |_| *counter.borrow_mut() += 1),
    );

    show_now(&mut lb, 0);
    show_now(&mut lb, 1);
    show_now(&mut lb, 2);

    assert_eq!(lb.surface().key_listener_attaches, 1);
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(lb.surface().scheduled.len(), 3);
}

#[test]
fn each_show_hide_cycle_reopens_once() {
    let mut lb = lightbox(2, LightboxOptions::default());
    show_now(&mut lb, 0);
    lb.hide();
    show_now(&mut lb, 1);
    lb.hide();

    assert_eq!(lb.surface().key_listener_attaches, 2);
    assert_eq!(lb.surface().key_listener_detaches, 2);
}

#[test]
fn on_change_reports_activated_and_previous() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let mut lb = lightbox(
        3,
        LightboxOptions::default().with_on_change(move |event| {
            log.borrow_mut().push((
                event.activated.url().to_owned(),
                event.previous.map(|s| s.url().to_owned()),
                event.sources.len(),
            ));
        }),
    );

    show_now(&mut lb, 2);
    lb.hide();
    show_now(&mut lb, 0);

    assert_eq!(
        *seen.borrow(),
        [
            ("2.jpg".to_owned(), None, 3),
            ("0.jpg".to_owned(), Some("2.jpg".to_owned()), 3),
        ]
    );
    // The callback is handed back after each call.
    assert!(lb.options().on_change.is_some());
}

#[test]
fn hide_is_idempotent() {
    let mut lb = lightbox(3, LightboxOptions::default());
    show_now(&mut lb, 1);

    lb.hide();
    assert!(!lb.is_shown());
    assert!(!lb.surface().shown);
    assert!(!lb.surface().key_listener);
    assert_eq!(lb.surface().key_listener_detaches, 1);

    lb.hide();
    assert!(!lb.is_shown());
    assert_eq!(lb.surface().key_listener_detaches, 1);
    assert_eq!(lb.current(), Some(SourceId::new(1)));
}

#[test]
fn hide_before_show_does_nothing() {
    let mut lb = lightbox(2, LightboxOptions::default());
    lb.hide();
    assert_eq!(lb.surface().key_listener_detaches, 0);
    assert!(lb.surface().focusable.is_empty());
}

#[test]
fn next_cycles_back_to_start() {
    for count in 2..6 {
        for start in 0..count {
            let mut lb = lightbox(count, LightboxOptions::default());
            show_now(&mut lb, start);
            for _ in 0..count {
                lb.next().unwrap();
                settle(&mut lb);
            }
            assert_eq!(lb.current(), Some(SourceId::new(start)), "n={count} i={start}");
        }
    }
}

#[test]
fn prev_undoes_next_and_next_undoes_prev() {
    let count = 4;
    for start in 0..count {
        let mut lb = lightbox(count, LightboxOptions::default());
        show_now(&mut lb, start);

        lb.next().unwrap();
        lb.prev().unwrap();
        assert_eq!(settle(&mut lb), Some(start));

        lb.prev().unwrap();
        lb.next().unwrap();
        assert_eq!(settle(&mut lb), Some(start));
    }
}

#[test]
fn navigation_wraps_at_both_ends() {
    let mut lb = lightbox(3, LightboxOptions::default());
    show_now(&mut lb, 2);
    lb.next().unwrap();
    assert_eq!(settle(&mut lb), Some(0));
    lb.prev().unwrap();
    assert_eq!(settle(&mut lb), Some(2));
}

#[test]
fn navigation_before_first_show_opens_an_end() {
    let mut lb = lightbox(3, LightboxOptions::default());
    lb.next().unwrap();
    assert!(lb.is_shown());
    assert_eq!(settle(&mut lb), Some(0));

    let mut lb = lightbox(3, LightboxOptions::default());
    lb.prev().unwrap();
    assert_eq!(settle(&mut lb), Some(2));
}

#[test]
fn navigation_without_sources_is_an_error() {
    let mut lb = lightbox(0, LightboxOptions::default());
    assert_eq!(lb.next(), Err(LightboxError::NoSources));
    assert_eq!(lb.prev(), Err(LightboxError::NoSources));
    assert!(!lb.is_shown());
}

#[test]
fn rapid_navigation_steps_from_pending_target() {
    let mut lb = lightbox(5, LightboxOptions::default().with_transition_ms(300));
    show_now(&mut lb, 0);
    lb.image_loaded(None);

    // Three presses before any timer fires.
    lb.next().unwrap();
    lb.next().unwrap();
    lb.next().unwrap();
    assert_eq!(lb.current(), Some(SourceId::new(0)));
    assert_eq!(lb.target(), Some(SourceId::new(3)));
    assert_eq!(settle(&mut lb), Some(3));
}

#[test]
fn stale_swaps_are_ignored() {
    let mut lb = lightbox(3, LightboxOptions::default().with_transition_ms(200));
    lb.show(SourceId::new(1)).unwrap();
    lb.show(SourceId::new(2)).unwrap();
    let (_, first) = lb.surface().scheduled[0];
    let (_, second) = lb.surface().scheduled[1];
    assert!(second.generation() > first.generation());

    // The newer timer fires first, then the older one.
    assert!(lb.complete_swap(second));
    assert!(!lb.complete_swap(first));
    assert_eq!(lb.current(), Some(SourceId::new(2)));
    assert_eq!(lb.surface().image_src.as_deref(), Some("2.jpg"));

    // Older timer first: it is already stale and never touches the image.
    let mut lb = lightbox(3, LightboxOptions::default().with_transition_ms(200));
    lb.show(SourceId::new(1)).unwrap();
    lb.show(SourceId::new(2)).unwrap();
    let (_, first) = lb.surface().scheduled[0];
    assert!(!lb.complete_swap(first));
    assert_eq!(lb.surface().image_src, None);
}

#[test]
fn transition_is_cleared_on_load_of_new_image() {
    let mut lb = lightbox(2, LightboxOptions::default().with_transition_ms(300));
    lb.show(SourceId::new(0)).unwrap();
    assert!(lb.surface().transitioning);
    assert_eq!(lb.surface().scheduled[0].0, 300);

    let ticket = lb.surface().latest_swap().unwrap();
    lb.complete_swap(ticket);
    // Swapped, but the new image is not loaded yet.
    assert!(lb.surface().transitioning);

    lb.image_loaded(Some(Size::new(10.0, 10.0)));
    assert!(!lb.surface().transitioning);
}

#[test]
fn reshowing_same_image_does_not_wait_for_load() {
    let mut lb = lightbox(2, LightboxOptions::default().with_transition_ms(300));
    show_now(&mut lb, 1);
    lb.image_loaded(None);

    show_now(&mut lb, 1);
    assert!(!lb.surface().transitioning);
}

#[test]
fn sources_sharing_a_url_do_not_wait_for_load() {
    let specs = vec![SourceSpec::new("x.jpg"), SourceSpec::new("x.jpg")];
    let mut lb: TestLightbox = Lightbox::new(
        RecordingSurface::navigation(),
        SharedViewport::new(800.0, 400.0),
        specs,
        LightboxOptions::default().with_transition_ms(300),
    )
    .unwrap();
    show_now(&mut lb, 0);
    lb.image_loaded(Some(Size::new(200.0, 400.0)));
    assert!(!lb.surface().transitioning);
    let applied = lb.surface().fits_applied;

    show_now(&mut lb, 1);
    assert_eq!(lb.surface().image_src.as_deref(), Some("x.jpg"));
    assert_eq!(lb.current(), Some(SourceId::new(1)));
    assert!(
        !lb.surface().transitioning,
        "no load follows an unchanged URL"
    );
    // The ratio carries over, so the image is fitted without a load.
    assert_eq!(lb.current_source().unwrap().ratio(), Some(0.5));
    assert_eq!(lb.surface().fits_applied, applied + 1);
    let fit = lb.surface().image_fit.unwrap();
    assert_eq!(fit.height_percent, 100.0);
    assert!((fit.width_percent - 25.0).abs() < 1e-9);
}

#[test]
fn no_transition_never_sets_transitioning() {
    let mut lb = lightbox(2, LightboxOptions::default());
    show_now(&mut lb, 0);
    lb.next().unwrap();
    assert!(!lb.surface().transitioning);
}

#[test]
fn resize_fits_against_viewport() {
    let specs = vec![SourceSpec::new("wide.jpg").with_ratio(2.0)];
    let viewport = SharedViewport::new(600.0, 600.0);
    let mut lb: TestLightbox = Lightbox::new(
        RecordingSurface::default(),
        viewport.clone(),
        specs,
        LightboxOptions::default(),
    )
    .unwrap();
    show_now(&mut lb, 0);

    let fit = lb.surface().image_fit.unwrap();
    assert_eq!(fit.width_percent, 100.0);
    assert!((fit.height_percent - 50.0).abs() < 1e-9);

    // A much wider viewport pins height instead.
    viewport.set(1600.0, 400.0);
    lb.resize();
    let fit = lb.surface().image_fit.unwrap();
    assert_eq!(fit.height_percent, 100.0);
    assert!((fit.width_percent - 50.0).abs() < 1e-9);
}

#[test]
fn resize_while_hidden_is_a_no_op() {
    let mut lb = lightbox(2, LightboxOptions::default());
    lb.resize();
    assert_eq!(lb.surface().fits_applied, 0);

    show_now(&mut lb, 0);
    lb.hide();
    let applied = lb.surface().fits_applied;
    lb.resize();
    assert_eq!(lb.surface().fits_applied, applied);
}

#[test]
fn unknown_ratio_defers_fit_until_load() {
    let specs = vec![SourceSpec::new("mystery.jpg")];
    let mut lb: TestLightbox = Lightbox::new(
        RecordingSurface::default(),
        SharedViewport::new(800.0, 400.0),
        specs,
        LightboxOptions::default(),
    )
    .unwrap();
    show_now(&mut lb, 0);
    assert_eq!(lb.surface().image_fit, None);

    lb.image_loaded(Some(Size::new(300.0, 600.0)));
    assert_eq!(lb.current_source().unwrap().ratio(), Some(0.5));
    let fit = lb.surface().image_fit.unwrap();
    assert_eq!(fit.height_percent, 100.0);
    assert!((fit.width_percent - 25.0).abs() < 1e-9);

    // A later load with another size does not relearn.
    lb.image_loaded(Some(Size::new(100.0, 100.0)));
    assert_eq!(lb.current_source().unwrap().ratio(), Some(0.5));
}

#[test]
fn declared_ratio_is_not_overwritten_by_load() {
    let mut lb = lightbox(1, LightboxOptions::default());
    show_now(&mut lb, 0);
    let applied = lb.surface().fits_applied;
    lb.image_loaded(Some(Size::new(400.0, 100.0)));
    assert_eq!(lb.current_source().unwrap().ratio(), Some(1.0));
    assert_eq!(lb.surface().fits_applied, applied);
}

#[test]
fn navigation_controls_focusable_only_while_shown() {
    let mut lb = lightbox(3, LightboxOptions::default());
    assert!(lb.surface().focusable.is_empty());

    show_now(&mut lb, 0);
    assert!(lb.surface().focusable.contains(&Control::Prev));
    assert!(lb.surface().focusable.contains(&Control::Next));

    lb.hide();
    assert!(lb.surface().focusable.is_empty());
}

#[test]
fn navigation_controls_stay_unfocusable_for_single_source() {
    let mut lb = lightbox(1, LightboxOptions::default());
    show_now(&mut lb, 0);
    assert!(lb.surface().focusable.is_empty());
}

#[test]
fn navigation_controls_stay_unfocusable_without_tab_index() {
    let mut lb = lightbox(3, LightboxOptions::default().with_tab_index(false));
    show_now(&mut lb, 0);
    assert!(lb.surface().focusable.is_empty());
}

#[test]
fn keyboard_activation_moves_focus_to_next_control() {
    let mut lb = lightbox(3, LightboxOptions::default());
    lb.activate_source(SourceId::new(1)).unwrap();
    assert!(lb.is_shown());
    assert_eq!(lb.surface().focused, Some(Control::Next));
}

#[test]
fn keyboard_activation_keeps_focus_without_next_control() {
    let mut lb: TestLightbox = Lightbox::new(
        RecordingSurface::with_controls(&[Control::Close]),
        SharedViewport::new(100.0, 100.0),
        support::square_sources(3),
        LightboxOptions::default(),
    )
    .unwrap();
    lb.activate_source(SourceId::new(0)).unwrap();
    assert_eq!(lb.surface().focused, None);

    let mut lb = lightbox(1, LightboxOptions::default());
    lb.activate_source(SourceId::new(0)).unwrap();
    assert_eq!(lb.surface().focused, None);
}

#[test]
fn controls_navigate_and_close() {
    let mut lb = lightbox(3, LightboxOptions::default());
    show_now(&mut lb, 0);

    lb.activate_control(Control::Next).unwrap();
    assert_eq!(settle(&mut lb), Some(1));
    lb.activate_control(Control::Prev).unwrap();
    assert_eq!(settle(&mut lb), Some(0));
    lb.activate_control(Control::Close).unwrap();
    assert!(!lb.is_shown());
}

#[test]
fn escape_hides_only_when_shown() {
    let mut lb = lightbox(2, LightboxOptions::default());
    assert!(!lb.handle_scoped_key(Key::Escape));

    show_now(&mut lb, 0);
    assert!(!lb.handle_scoped_key(Key::Enter));
    assert!(lb.is_shown());
    assert!(lb.handle_scoped_key(Key::Escape));
    assert!(!lb.is_shown());
}
