use core::future::Future;
use std::time::Instant;

/// Runs a future to completion while clocking it, reporting the elapsed
/// wall time in fractional seconds alongside the future's output.
pub async fn measure<T>(future: impl Future<Output = T>) -> (T, f64) {
    let started = Instant::now();
    let value = future.await;

    (value, started.elapsed().as_secs_f64())
}
