#![cfg(feature = "host")]
#![allow(missing_docs, reason = "integration test crate")]
//! Host-level tests for the mutex-wrapped matrix.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use neopixel_matrix::{
    color,
    matrix::{MatrixConfig, NeopixelMatrix, SharedMatrix},
    transport::{Transport, TransportError, Triple},
};

#[derive(Default)]
struct Counter {
    slots: [Triple; 4],
    transmits: usize,
}

impl Transport for Counter {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn set_slot(&mut self, index: usize, triple: Triple) {
        self.slots[index] = triple;
    }

    fn transmit(&mut self) -> Result<(), TransportError> {
        self.transmits += 1;
        Ok(())
    }
}

fn shared() -> SharedMatrix<NoopRawMutex, Counter, 4> {
    let matrix = NeopixelMatrix::new(MatrixConfig::new(2, 2), Counter::default()).expect("valid");
    SharedMatrix::new(matrix)
}

#[test]
fn draw_and_refresh_inside_one_lock() {
    let shared = shared();
    shared
        .lock(|matrix| {
            matrix.fill(color::BLUE);
            matrix.set_pixel(0, 0, color::RED)?;
            matrix.show()
        })
        .expect("transmit");

    let matrix = shared.into_inner();
    assert_eq!(matrix.transport().transmits, 1);
    assert_eq!(matrix.pixel(0, 0), Ok(color::RED));
    assert_eq!(matrix.pixel(1, 1), Ok(color::BLUE));
}

#[test]
fn lock_returns_the_closure_value() {
    let shared = shared();
    let size = shared.lock(|matrix| (matrix.width(), matrix.height()));
    assert_eq!(size, (2, 2));
}

#[test]
#[should_panic(expected = "already")]
fn reentrant_lock_panics() {
    let shared = shared();
    shared.lock(|_outer| shared.lock(|inner| inner.fill(color::WHITE)));
}
