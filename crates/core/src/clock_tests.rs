// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_clock_advance_moves_both_clocks() {
    let clock = FakeClock::new();
    let start = clock.now();
    let start_ms = clock.epoch_ms();

    clock.advance(Duration::from_secs(90));

    assert_eq!(clock.now() - start, Duration::from_secs(90));
    assert_eq!(clock.epoch_ms() - start_ms, 90_000);
}

#[test]
fn fake_clock_clones_share_time() {
    let clock = FakeClock::new();
    let other = clock.clone();
    clock.set_epoch_ms(42);
    assert_eq!(other.epoch_ms(), 42);
}

#[test]
fn system_clock_is_after_2020() {
    assert!(SystemClock.epoch_ms() > 1_577_836_800_000);
}
