use crate::component::ComponentId;
use crate::sim::{Event, PendingBuffer, SimTime};

fn ev(label: u64, completed: f64) -> Event {
    let mut e = Event::new(ComponentId(0), label, SimTime(completed));
    e.component = Some(ComponentId(1));
    e
}

fn labels(buf: &PendingBuffer) -> Vec<u64> {
    buf.iter().map(|e| e.label).collect()
}

#[test]
fn pending_buffer_orders_by_completion_then_insertion() {
    let mut buf = PendingBuffer::new();
    buf.insert(ev(1, 3.0));
    buf.insert(ev(2, 1.0));
    buf.insert(ev(3, 3.0));
    buf.insert(ev(4, 2.0));

    assert_eq!(labels(&buf), vec![2, 4, 1, 3]);
    assert_eq!(buf.pop_front().expect("event").label, 2);
    assert_eq!(buf.len(), 3);
}

#[test]
fn pending_buffer_push_front_and_remove() {
    let mut buf = PendingBuffer::new();
    buf.insert(ev(1, 1.0));
    buf.insert(ev(2, 2.0));
    buf.push_front(ev(3, 0.5));
    assert_eq!(labels(&buf), vec![3, 1, 2]);

    let removed = buf.remove(1).expect("event");
    assert_eq!(removed.label, 1);
    assert_eq!(labels(&buf), vec![3, 2]);
    assert!(buf.remove(5).is_none());
}
