use core::sync::atomic::{AtomicU64, AtomicUsize};

use atomic_ops::bitmap;
use atomic_ops::{BITMAP_WORD_BITS, RC, SC};
use crossbeam_utils::thread;

#[test]
fn disjoint_setters_in_one_word_lose_nothing() {
    let word_bits = BITMAP_WORD_BITS as usize;
    let bits = [AtomicUsize::new(0)];

    thread::scope(|s| {
        for t in 0..word_bits {
            let bits = &bits;
            s.spawn(move |_| {
                assert!(!bitmap::set(bits, t, RC));
            });
        }
    })
    .unwrap();

    let found: Vec<usize> = bitmap::iter_set(&bits, 0, word_bits, RC).collect();
    assert_eq!(found, (0..word_bits).collect::<Vec<_>>());
}

#[test]
fn interleaved_setters_and_clearers() {
    const THREADS: usize = 8;
    const N_BITS: usize = 4096;

    let bits: Vec<AtomicU64> = (0..bitmap::word_count::<AtomicU64>(N_BITS))
        .map(|_| AtomicU64::new(0))
        .collect();
    for i in (0..N_BITS).filter(|i| i % 2 == 1) {
        bitmap::set(&bits, i, RC);
    }

    // Thread t owns every index congruent to t: it sets the evens, clears the odds.
    thread::scope(|s| {
        for t in 0..THREADS {
            let bits = &bits;
            s.spawn(move |_| {
                for i in (t..N_BITS).step_by(THREADS) {
                    if i % 2 == 0 {
                        assert!(!bitmap::set(bits, i, RC));
                    } else {
                        assert!(bitmap::clear(bits, i, RC));
                    }
                }
            });
        }
    })
    .unwrap();

    let found: Vec<usize> = bitmap::iter_set(&bits, 0, N_BITS, SC).collect();
    let expected: Vec<usize> = (0..N_BITS).step_by(2).collect();
    assert_eq!(found, expected);
}

#[test]
fn readers_only_see_published_bits() {
    const N_BITS: usize = 1024;

    let bits: Vec<AtomicU64> = (0..bitmap::word_count::<AtomicU64>(N_BITS))
        .map(|_| AtomicU64::new(0))
        .collect();

    thread::scope(|s| {
        s.spawn(|_| {
            for i in (0..N_BITS).step_by(3) {
                bitmap::set(&bits, i, RC);
            }
        });
        for _ in 0..2 {
            s.spawn(|_| {
                for _ in 0..100 {
                    let mut last = None;
                    for i in bitmap::iter_set(&bits, 0, N_BITS, RC) {
                        assert_eq!(i % 3, 0);
                        assert!(last.map_or(true, |l| i > l));
                        last = Some(i);
                    }
                }
            });
        }
    })
    .unwrap();

    assert_eq!(bitmap::count_ones(&bits, 0, N_BITS, RC), N_BITS.div_ceil(3));
}
