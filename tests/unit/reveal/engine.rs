use super::*;
use crate::foundation::core::{Millis, Viewport};
use crate::markup::document::{Document, ElementDef};
use crate::visibility::notifier::RootMargin;

fn reveal_cfg() -> VisibilityConfig {
    VisibilityConfig {
        threshold: 0.1,
        root_margin: RootMargin {
            bottom: -50.0,
            ..RootMargin::default()
        },
    }
}

fn engine(motion: MotionPreference) -> RevealEngine {
    RevealEngine::new(reveal_cfg(), VisibilityConfig::with_threshold(0.2), motion).unwrap()
}

fn page() -> Document {
    Document::new(Viewport::new(800.0, 600.0))
        .with(ElementDef::new(1).rect(0.0, 100.0, 800.0, 200.0))
        .unwrap()
        .with(ElementDef::new(2).rect(0.0, 1500.0, 800.0, 1600.0))
        .unwrap()
        .with(ElementDef::new(10).rect(0.0, 300.0, 800.0, 500.0))
        .unwrap()
        .with(ElementDef::new(11).parent(10))
        .unwrap()
        .with(ElementDef::new(12).parent(10))
        .unwrap()
        .with(ElementDef::new(13).parent(10))
        .unwrap()
}

fn drain(timers: &mut TimerQueue<RevealTask>, until: u64) -> Vec<(u64, RevealTask)> {
    let mut out = Vec::new();
    while let Some(f) = timers.pop_due(Millis(until)) {
        out.push((f.at.0, f.task));
    }
    out
}

#[test]
fn reveal_waits_for_visibility_then_delay() {
    let mut doc = page();
    let mut timers: TimerQueue<RevealTask> = TimerQueue::new();
    let mut e = engine(MotionPreference::Full);
    assert!(e.register_reveal(ElementId(2), 300).is_empty());

    e.on_visibility(&doc, &mut timers);
    assert_eq!(timers.pending_count(), 0);

    doc.set_scroll_y(1000.0);
    timers.advance_clock(Millis(50));
    e.on_visibility(&doc, &mut timers);
    assert!(drain(&mut timers, 349).is_empty());
    let due = drain(&mut timers, 350);
    assert_eq!(due, vec![(350, RevealTask::Reveal(ElementId(2)))]);
    assert!(!e.revealable(ElementId(2)).unwrap().fired);

    let paints = e.on_timer(due[0].1);
    assert_eq!(paints, vec![Paint::class(ElementId(2), REVEALED_CLASS, true)]);
    assert!(e.revealable(ElementId(2)).unwrap().fired);
}

#[test]
fn repeated_visibility_updates_schedule_one_reveal() {
    let doc = page();
    let mut timers: TimerQueue<RevealTask> = TimerQueue::new();
    let mut e = engine(MotionPreference::Full);
    e.register_reveal(ElementId(1), 0);
    for _ in 0..5 {
        e.on_visibility(&doc, &mut timers);
    }
    assert_eq!(timers.pending_count(), 1);
    // Registering again after it fired changes nothing.
    assert!(e.register_reveal(ElementId(1), 0).is_empty());
    e.on_visibility(&doc, &mut timers);
    assert_eq!(timers.pending_count(), 1);
}

#[test]
fn stagger_children_fire_at_index_times_interval() {
    let doc = page();
    let mut timers: TimerQueue<RevealTask> = TimerQueue::new();
    let mut e = engine(MotionPreference::Full);
    let children = doc.children(ElementId(10)).to_vec();
    let initial = e.register_stagger_group(ElementId(10), children, 120);
    assert_eq!(initial.len(), 9);
    assert_eq!(initial[0], Paint::opacity(ElementId(11), 0.0));

    timers.advance_clock(Millis(1000));
    e.on_visibility(&doc, &mut timers);
    assert!(e.group(ElementId(10)).unwrap().fired);

    let due = drain(&mut timers, 10_000);
    let times: Vec<(u64, ElementId)> = due
        .iter()
        .map(|(at, t)| match t {
            RevealTask::StaggerChild { child, .. } => (*at, *child),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        times,
        vec![
            (1000, ElementId(11)),
            (1120, ElementId(12)),
            (1240, ElementId(13))
        ]
    );
    let paints = e.on_timer(due[1].1);
    assert!(paints.contains(&Paint::opacity(ElementId(12), 1.0)));
}

#[test]
fn stagger_order_is_frozen_at_registration() {
    let doc = page();
    let mut timers: TimerQueue<RevealTask> = TimerQueue::new();
    let mut e = engine(MotionPreference::Full);
    e.register_stagger_group(ElementId(10), vec![ElementId(13), ElementId(11)], 100);
    e.register_stagger_group(ElementId(10), vec![ElementId(11)], 5);
    assert_eq!(
        e.group(ElementId(10)).unwrap().children,
        vec![ElementId(13), ElementId(11)]
    );
    e.on_visibility(&doc, &mut timers);
    assert_eq!(timers.pending_count(), 2);
}

#[test]
fn reduced_motion_fires_everything_synchronously() {
    let doc = page();
    let mut timers: TimerQueue<RevealTask> = TimerQueue::new();
    let mut e = engine(MotionPreference::Reduced);

    let paints = e.register_reveal(ElementId(2), 500);
    assert!(paints.contains(&Paint::class(ElementId(2), REVEALED_CLASS, true)));
    assert!(paints.contains(&Paint::transform(ElementId(2), Transform::None)));
    assert!(e.revealable(ElementId(2)).unwrap().fired);

    let paints = e.register_stagger_group(ElementId(10), vec![ElementId(11)], 100);
    assert!(paints.contains(&Paint::opacity(ElementId(11), 1.0)));
    assert!(e.group(ElementId(10)).unwrap().fired);

    assert!(!e.register_parallax(ElementId(1), 0.3));
    assert_eq!(e.reveal_sensor().watched_len(), 0);
    assert_eq!(e.stagger_sensor().watched_len(), 0);

    e.on_visibility(&doc, &mut timers);
    assert_eq!(timers.pending_count(), 0);
}
