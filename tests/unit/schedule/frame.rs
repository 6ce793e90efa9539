use super::*;

#[test]
fn idle_queue_schedules_no_frame() {
    let q: FrameQueue<u8> = FrameQueue::new(16);
    assert_eq!(q.next_frame_after(Millis(0)), None);
}

#[test]
fn next_frame_is_strictly_after_now() {
    let mut q = FrameQueue::new(16);
    q.request(1u8);
    assert_eq!(q.next_frame_after(Millis(0)), Some(Millis(16)));
    assert_eq!(q.next_frame_after(Millis(100)), Some(Millis(112)));
    assert_eq!(q.next_frame_after(Millis(112)), Some(Millis(128)));
}

#[test]
fn take_frame_drains_in_request_order() {
    let mut q = FrameQueue::new(16);
    q.request('a');
    let b = q.request('b');
    q.request('c');
    assert!(q.cancel(b));
    assert!(!q.cancel(b));
    let tasks: Vec<char> = q.take_frame().into_iter().map(|(_, t)| t).collect();
    assert_eq!(tasks, vec!['a', 'c']);
    assert!(!q.has_pending());
}
