// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod enqueue;
pub mod failed;
pub mod queues;
pub mod stats;
pub mod work;
pub mod workers;
