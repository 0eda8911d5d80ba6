mod common;

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use common::{key, FakeController};
use smcprims_client::SmcClient;
use smcprims_frame::{READ_KEY, READ_KEY_INFO};

const THREADS: usize = 12;

#[test]
fn racing_key_info_settles_on_one_value() {
    let controller = Arc::new(FakeController::with_sample_keys().with_varying_attributes());
    controller.delay_key_info(Duration::from_millis(20));
    let client = Arc::new(SmcClient::new(Arc::clone(&controller)));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let client = Arc::clone(&client);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                client.key_info(key("TC0P")).unwrap()
            })
        })
        .collect();
    let observed: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let settled = client.key_info(key("TC0P")).unwrap();
    assert!(observed.iter().all(|info| *info == settled));
    assert!(controller.calls(READ_KEY_INFO) >= 1);
    assert!(controller.calls(READ_KEY_INFO) <= THREADS);
    assert_eq!(client.cache().len(), 1);

    let stats = client.cache().stats();
    assert_eq!(stats.inserts, 1);
    assert_eq!(stats.discarded as usize, controller.calls(READ_KEY_INFO) - 1);
}

#[test]
fn concurrent_reads_and_resets_stay_consistent() {
    let controller = Arc::new(FakeController::with_sample_keys());
    let client = Arc::new(SmcClient::new(Arc::clone(&controller)));

    let readers: Vec<_> = (0..4)
        .map(|i| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                let name = if i % 2 == 0 { "TC0P" } else { "F0Tg" };
                for _ in 0..200 {
                    let value = client.read_key(key(name)).unwrap();
                    assert_eq!(value.key, key(name));
                    assert!(value.data_size == 2 || value.data_size == 4);
                }
            })
        })
        .collect();

    let resetter = {
        let client = Arc::clone(&client);
        thread::spawn(move || {
            for _ in 0..100 {
                client.cache().reset();
                thread::yield_now();
            }
        })
    };

    for reader in readers {
        reader.join().unwrap();
    }
    resetter.join().unwrap();

    assert_eq!(controller.calls(READ_KEY), 800);
    assert!(client.cache().len() <= 2);
}
