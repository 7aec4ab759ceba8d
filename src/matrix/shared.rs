//! A matrix that several tasks or interrupt handlers can draw into.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::RawMutex};

use super::NeopixelMatrix;
use crate::transport::Transport;

/// A [`NeopixelMatrix`] behind one blocking mutex.
///
/// Every draw, scroll, or refresh happens inside a single [`lock`](Self::lock)
/// call, so a refresh never sees a half-drawn frame. Pick the raw mutex to
/// match the contexts that share it (`CriticalSectionRawMutex` across
/// interrupts, `NoopRawMutex` within one executor).
///
/// ```rust
/// use embassy_sync::blocking_mutex::raw::NoopRawMutex;
/// use neopixel_matrix::{
///     color,
///     matrix::{MatrixConfig, NeopixelMatrix, SharedMatrix},
///     transport::{Transport, TransportError, Triple},
/// };
///
/// struct Sink([Triple; 4]);
///
/// impl Transport for Sink {
///     fn len(&self) -> usize { 4 }
///     fn set_slot(&mut self, index: usize, triple: Triple) { self.0[index] = triple; }
///     fn transmit(&mut self) -> Result<(), TransportError> { Ok(()) }
/// }
///
/// let matrix = NeopixelMatrix::<_, 4>::new(MatrixConfig::new(2, 2), Sink([[0; 3]; 4]))?;
/// let shared = SharedMatrix::<NoopRawMutex, _, 4>::new(matrix);
///
/// shared.lock(|matrix| {
///     matrix.fill(color::WHITE);
///     matrix.show()
/// })?;
/// # Ok::<(), neopixel_matrix::Error>(())
/// ```
pub struct SharedMatrix<M: RawMutex, T, const N: usize> {
    inner: Mutex<M, RefCell<NeopixelMatrix<T, N>>>,
}

impl<M: RawMutex, T: Transport, const N: usize> SharedMatrix<M, T, N> {
    /// Wrap `matrix`.
    #[must_use]
    pub const fn new(matrix: NeopixelMatrix<T, N>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(matrix)),
        }
    }

    /// Run `operation` with exclusive access to the matrix.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside `operation`.
    pub fn lock<R>(&self, operation: impl FnOnce(&mut NeopixelMatrix<T, N>) -> R) -> R {
        self.inner.lock(|cell| operation(&mut cell.borrow_mut()))
    }

    /// Take the matrix back out.
    pub fn into_inner(self) -> NeopixelMatrix<T, N> {
        self.inner.into_inner().into_inner()
    }
}
