use super::*;

fn plain() -> Formatter {
    ValueFormat::default().into_formatter()
}

#[test]
fn first_tick_renders_start_and_last_renders_end() {
    let mut run = ValueRun::new(ElementId(1), 0, 100, 1000, plain()).unwrap();
    let first = run.tick(Millis(5000));
    assert_eq!(first.value, 0);
    assert!(!first.done);

    let mid = run.tick(Millis(5500));
    // 1 - 0.5^3 = 0.875
    assert_eq!(mid.value, 87);

    let almost = run.tick(Millis(5999));
    assert!(almost.value <= 100);
    assert!(!almost.done);

    let last = run.tick(Millis(6000));
    assert_eq!(last.value, 100);
    assert_eq!(last.text, "100");
    assert!(last.done);
}

#[test]
fn overshooting_the_duration_still_lands_exactly() {
    let mut run = ValueRun::new(ElementId(1), 0, 7, 1000, plain()).unwrap();
    run.tick(Millis(0));
    let out = run.tick(Millis(4321));
    assert_eq!(out.value, 7);
    assert!(out.done);
    assert_eq!(run.progress(), 1.0);
}

#[test]
fn descending_runs_floor_toward_negative_infinity() {
    let mut run = ValueRun::new(ElementId(1), 100, 0, 1000, plain()).unwrap();
    assert_eq!(run.tick(Millis(0)).value, 100);
    // 100 - 100 * 0.875 = 12.5 -> 12
    assert_eq!(run.tick(Millis(500)).value, 12);
    assert_eq!(run.tick(Millis(1000)).value, 0);
}

#[test]
fn full_range_span_does_not_overflow() {
    let mut run = ValueRun::new(ElementId(1), i64::MIN, 1, 1000, plain()).unwrap();
    assert_eq!(run.tick(Millis(0)).value, i64::MIN);
    let mid = run.tick(Millis(500)).value;
    assert!(mid > i64::MIN && mid < 0);
    assert_eq!(run.tick(Millis(1000)).value, 1);
}

#[test]
fn zero_duration_is_rejected() {
    assert!(matches!(
        ValueRun::new(ElementId(1), 0, 1, 0, plain()),
        Err(MotionError::Validation(_))
    ));
}

#[test]
fn format_applies_prefix_suffix_and_grouping() {
    let f = ValueFormat {
        prefix: "$".to_owned(),
        suffix: "+".to_owned(),
        group_thousands: true,
    };
    assert_eq!(f.format(1_250_000), "$1,250,000+");
    let pct = ValueFormat {
        suffix: "%".to_owned(),
        ..ValueFormat::default()
    };
    assert_eq!(pct.format(1000), "1000%");
}

#[test]
fn animator_ticks_once_per_frame_until_done() {
    let mut frames: FrameQueue<ValueFrame> = FrameQueue::new(16);
    let mut anim = ValueAnimator::new();
    let run = ValueRun::new(ElementId(9), 0, 100, 32, plain()).unwrap();
    anim.animate(run, &mut frames);
    assert_eq!(frames.take_frame().len(), 1);

    let p = anim.on_frame(Millis(16), &mut frames);
    assert_eq!(p, vec![Paint::text(ElementId(9), "0".to_owned())]);
    assert_eq!(frames.take_frame().len(), 1);

    anim.on_frame(Millis(32), &mut frames);
    assert!(anim.is_running(ElementId(9)));
    frames.take_frame();

    let p = anim.on_frame(Millis(48), &mut frames);
    assert_eq!(p, vec![Paint::text(ElementId(9), "100".to_owned())]);
    assert!(!anim.is_running(ElementId(9)));
    assert!(!frames.has_pending());
}

#[test]
fn new_run_on_same_target_supersedes_the_old_one() {
    let mut frames: FrameQueue<ValueFrame> = FrameQueue::new(16);
    let mut anim = ValueAnimator::new();
    anim.animate(
        ValueRun::new(ElementId(2), 0, 10, 1000, plain()).unwrap(),
        &mut frames,
    );
    anim.animate(
        ValueRun::new(ElementId(2), 500, 600, 1000, plain()).unwrap(),
        &mut frames,
    );
    assert_eq!(anim.active_len(), 1);
    // Both animate calls share one pending frame.
    assert_eq!(frames.take_frame().len(), 1);
    let p = anim.on_frame(Millis(16), &mut frames);
    assert_eq!(p, vec![Paint::text(ElementId(2), "500".to_owned())]);
}
