use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use futures::StreamExt;

use crate::effect::prelude::*;
use crate::pipe::{produce, Producer};

fn countdown(from: u32) -> Producer<impl Effect<Output = u32, Env = ()>> {
    let left = AtomicU32::new(from);
    produce(from_fn(move |_: &()| {
        let n = left.load(Ordering::SeqCst);
        if n == 0 {
            Err(Error::end_of_stream())
        } else {
            left.store(n - 1, Ordering::SeqCst);
            Ok(n)
        }
    }))
}

#[tokio::test]
async fn test_run_with_sink_forwards_in_order_then_reports_error() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = seen.clone();

    let result = countdown(3)
        .run_with_sink(&(), |n| {
            let seen = sink_seen.clone();
            async move { seen.lock().unwrap().push(n) }
        })
        .await;

    assert_eq!(result, Err(Error::end_of_stream()));
    assert_eq!(*seen.lock().unwrap(), vec![3, 2, 1]);
}

#[tokio::test]
async fn test_producer_does_not_catch_source_error() {
    let producer = produce(fail::<u32, ()>("disk gone"));

    let (values, error) = producer.collect(&()).await;
    assert!(values.is_empty());
    assert_eq!(error, Some(Error::new("disk gone")));
}

#[tokio::test]
async fn test_take_limits_values() {
    let (values, error) = produce(pure::<_, ()>(7)).take(2).collect(&()).await;

    assert_eq!(values, vec![7, 7]);
    assert_eq!(error, None);
}

#[tokio::test]
async fn test_take_keeps_smallest_limit() {
    let (values, _) = produce(pure::<_, ()>(1)).take(5).take(2).take(4).collect(&()).await;
    assert_eq!(values.len(), 2);
}

#[tokio::test]
async fn test_take_stops_before_running_source_again() {
    let runs = Arc::new(AtomicU32::new(0));
    let counter = runs.clone();
    let producer = produce(from_fn(move |_: &()| Ok(counter.fetch_add(1, Ordering::SeqCst)))).take(3);

    assert_eq!(producer.run_with_sink(&(), |_| async {}).await, Ok(()));
    assert_eq!(runs.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_stream_ends_with_error_item() {
    let producer = countdown(2);
    let items: Vec<Fin<u32>> = producer.stream(&()).collect().await;

    assert_eq!(items, vec![Ok(2), Ok(1), Err(Error::end_of_stream())]);
}

#[tokio::test]
async fn test_yield_once() {
    let producer = countdown(1);
    let seen = Arc::new(Mutex::new(None));
    let slot = seen.clone();

    let first = producer
        .yield_once(&(), |n| async move { *slot.lock().unwrap() = Some(n) })
        .await;
    let second = producer.yield_once(&(), |_| async {}).await;

    assert_eq!(first, Ok(()));
    assert_eq!(*seen.lock().unwrap(), Some(1));
    assert_eq!(second, Err(Error::end_of_stream()));
}
