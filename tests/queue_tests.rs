//! Integration tests for CommandQueue shared across threads

mod common;
use common::*;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use key_illumination::config::QUEUE_CAPACITY;
use key_illumination::{
    BlinkRequest, BlinkScheduler, CommandQueue, IlluminationConfig, KeyPressLatch, QueueFull,
};

static SHARED_QUEUE: CommandQueue<CriticalSectionRawMutex> = CommandQueue::new();

#[test]
fn producers_on_threads_fill_queue_without_blocking() {
    let producers = 4;
    let per_producer = QUEUE_CAPACITY / producers;

    std::thread::scope(|s| {
        for producer in 0..producers {
            s.spawn(move || {
                for secs in 0..per_producer {
                    let request = BlinkRequest::new(key(producer as u8), secs as u8 + 1);
                    SHARED_QUEUE.submit(request).unwrap();
                }
            });
        }
    });
    assert!(SHARED_QUEUE.is_full());

    let rejected = BlinkRequest::new(key(15), 30);
    assert_eq!(SHARED_QUEUE.submit(rejected), Err(QueueFull(rejected)));

    // each producer's requests come out in the order it submitted them
    let mut last_secs = [0u8; 4];
    while let Some(request) = SHARED_QUEUE.poll() {
        let producer = request.key.as_usize();
        assert!(request.duration_seconds > last_secs[producer]);
        last_secs[producer] = request.duration_seconds;
    }
    assert_eq!(last_secs, [per_producer as u8; 4]);
}

#[test]
fn scheduler_drains_one_request_per_tick() {
    let queue = CommandQueue::<CriticalSectionRawMutex>::new();
    let timer = MockTimeSource::new();
    let presses = KeyPressLatch::new();
    let mut scheduler = BlinkScheduler::new(
        MockStrip::new(),
        &timer,
        &queue,
        &presses,
        IlluminationConfig::default(),
    );

    for index in 0..QUEUE_CAPACITY as u8 {
        queue.submit(BlinkRequest::new(key(index), 10)).unwrap();
    }

    for expected in 0..QUEUE_CAPACITY as u8 {
        timer.advance(TICK_MS);
        let summary = scheduler.tick();
        assert_eq!(summary.consumed.map(|r| r.key), Some(key(expected)));
        assert_eq!(queue.len(), QUEUE_CAPACITY - 1 - expected as usize);
    }
    assert_eq!(scheduler.active_blinks(), QUEUE_CAPACITY);
    assert!(scheduler.tick().consumed.is_none());
}
