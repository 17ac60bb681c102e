//! The orientation cell must hand out whole triples only: a reader racing
//! writers never sees axes from two different writes.

use common::{Orientation, OrientationCell};
use std::thread;

#[test]
fn starts_unknown() {
    let cell = OrientationCell::new();
    assert_eq!(cell.get(), Orientation::UNKNOWN);
}

#[test]
fn last_write_wins_and_stays() {
    let cell = OrientationCell::new();
    cell.set(Orientation {
        alpha: 10,
        beta: 20,
        gamma: 30,
    });
    cell.set(Orientation {
        alpha: 11,
        beta: 21,
        gamma: 31,
    });
    // No freshness timeout: the last value is returned indefinitely.
    assert_eq!(cell.get().alpha, 11);
    assert_eq!(cell.get().alpha, 11);
}

#[test]
fn concurrent_reads_never_observe_a_torn_triple() {
    let cell = OrientationCell::new();
    cell.set(Orientation {
        alpha: 0,
        beta: 1,
        gamma: 2,
    });

    // Writers only ever store coherent triples (beta = alpha + 1,
    // gamma = alpha + 2); a torn read would break that relation.
    let writer = {
        let cell = cell.clone();
        thread::spawn(move || {
            for n in 0..1000 {
                cell.set(Orientation {
                    alpha: n,
                    beta: n + 1,
                    gamma: n + 2,
                });
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cell = cell.clone();
            thread::spawn(move || {
                for _ in 0..1000 {
                    let o = cell.get();
                    assert_eq!(o.beta, o.alpha + 1, "torn read: {:?}", o);
                    assert_eq!(o.gamma, o.alpha + 2, "torn read: {:?}", o);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
