use super::*;
use crate::foundation::core::Millis;

fn parts(slides: u64, autoplay_ms: u64) -> CarouselParts {
    CarouselParts {
        root: ElementId(1),
        track: Some(ElementId(2)),
        slides: (0..slides).map(|i| ElementId(10 + i)).collect(),
        dots: None,
        indicators: Vec::new(),
        autoplay_ms,
    }
}

fn ready(slides: u64, autoplay_ms: u64) -> (CarouselController, TimerQueue<AutoplayTick>) {
    let mut c = CarouselController::new(50.0);
    let mut timers = TimerQueue::new();
    assert!(c.setup(parts(slides, autoplay_ms), &mut timers).is_some());
    (c, timers)
}

fn index(c: &CarouselController) -> usize {
    c.get(ElementId(1)).map(Carousel::current_index).unwrap()
}

#[test]
fn go_to_wraps_out_of_range_targets() {
    let (mut c, mut timers) = ready(3, 0);
    c.go_to(ElementId(1), -1, &mut timers);
    assert_eq!(index(&c), 2);
    c.go_to(ElementId(1), 3, &mut timers);
    assert_eq!(index(&c), 0);
    c.step(ElementId(1), Step::Prev, &mut timers);
    assert_eq!(index(&c), 2);
}

#[test]
fn navigation_keeps_a_single_autoplay_timer() {
    let (mut c, mut timers) = ready(3, 5000);
    assert_eq!(timers.pending_count(), 1);
    c.go_to(ElementId(1), 1, &mut timers);
    c.go_to(ElementId(1), 2, &mut timers);
    assert_eq!(timers.pending_count(), 1);
    let armed = c.get(ElementId(1)).and_then(Carousel::timer).unwrap();
    assert!(timers.is_pending(armed));
}

#[test]
fn autoplay_advances_and_ignores_stale_ticks() {
    let (mut c, mut timers) = ready(3, 5000);
    let stale = c.get(ElementId(1)).and_then(Carousel::timer).unwrap();

    timers.advance_clock(Millis(2000));
    c.step(ElementId(1), Step::Next, &mut timers);
    assert_eq!(index(&c), 1);
    assert!(c.on_autoplay(AutoplayTick(ElementId(1)), stale, &mut timers).is_empty());
    assert_eq!(index(&c), 1);

    // Restarted at 2000, so the next tick lands at 7000 rather than 5000.
    assert!(timers.pop_due(Millis(6999)).is_none());
    let fired = timers.pop_due(Millis(7000)).unwrap();
    c.on_autoplay(fired.task, fired.id, &mut timers);
    assert_eq!(index(&c), 2);
}

#[test]
fn zero_interval_disables_autoplay() {
    let (c, timers) = ready(2, 0);
    assert_eq!(timers.pending_count(), 0);
    assert_eq!(c.get(ElementId(1)).and_then(Carousel::timer), None);
}

#[test]
fn swipe_must_exceed_threshold() {
    let (mut c, mut timers) = ready(3, 0);
    c.on_touch_start(ElementId(1), 300.0);
    assert!(c.on_touch_end(ElementId(1), 250.0, &mut timers).is_empty());
    assert_eq!(index(&c), 0);

    c.on_touch_start(ElementId(1), 300.0);
    assert!(!c.on_touch_end(ElementId(1), 249.0, &mut timers).is_empty());
    assert_eq!(index(&c), 1);

    c.on_touch_start(ElementId(1), 100.0);
    c.on_touch_end(ElementId(1), 200.0, &mut timers);
    assert_eq!(index(&c), 0);
}

#[test]
fn hover_suspends_until_pointer_leaves() {
    let (mut c, mut timers) = ready(3, 5000);
    c.on_pointer_enter(ElementId(1), &mut timers);
    assert_eq!(timers.pending_count(), 0);
    assert!(c.get(ElementId(1)).unwrap().is_suspended());

    // Navigation while hovered must not rearm.
    c.on_key(ElementId(1), Key::ArrowRight, &mut timers);
    assert_eq!(index(&c), 1);
    assert_eq!(timers.pending_count(), 0);

    timers.advance_clock(Millis(9000));
    c.on_pointer_leave(ElementId(1), &mut timers);
    assert_eq!(timers.pending_count(), 1);
    assert_eq!(timers.next_deadline(), Some(Millis(14000)));
}

#[test]
fn keys_map_left_and_right_only() {
    let (mut c, mut timers) = ready(3, 0);
    c.on_key(ElementId(1), Key::ArrowLeft, &mut timers);
    assert_eq!(index(&c), 2);
    assert!(c.on_key(ElementId(1), Key::ArrowDown, &mut timers).is_empty());
    assert!(c.on_key(ElementId(1), Key::Other, &mut timers).is_empty());
    assert_eq!(index(&c), 2);
}

#[test]
fn incomplete_carousels_are_inert() {
    let mut c = CarouselController::new(50.0);
    let mut timers: TimerQueue<AutoplayTick> = TimerQueue::new();
    assert!(c.setup(parts(1, 5000), &mut timers).is_none());
    let mut no_track = parts(3, 5000);
    no_track.track = None;
    assert!(c.setup(no_track, &mut timers).is_none());
    assert!(c.is_empty());
    assert_eq!(timers.pending_count(), 0);
    assert!(c.go_to(ElementId(1), 1, &mut timers).is_empty());
}

#[test]
fn setup_builds_labelled_indicators_once() {
    let mut c = CarouselController::new(50.0);
    let mut timers: TimerQueue<AutoplayTick> = TimerQueue::new();
    let mut p = parts(2, 0);
    p.dots = Some(ElementId(3));
    p.indicators = vec![ElementId(20), ElementId(21)];

    let paints = c.setup(p.clone(), &mut timers).unwrap();
    assert_eq!(paints[0], Paint::with_patch(ElementId(1), Patch::TabIndex { index: 0 }));
    assert_eq!(
        paints[2].patch,
        Patch::AppendChild {
            child: ElementId(21),
            class: view::INDICATOR_CLASS.to_owned(),
            label: "Go to slide 2".to_owned(),
        }
    );
    assert!(c.setup(p, &mut timers).is_none());
    assert_eq!(c.len(), 1);

    c.on_indicator(ElementId(1), 1, &mut timers);
    assert_eq!(index(&c), 1);
}
