// src/progress.rs
/// Lightweight progress reporting for multi-location runs.
/// The CLI implements this to surface status while locations are processed.
pub trait Progress {
    /// Called at the start with the number of locations.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One location finished (written or without coverage).
    fn item_done(&mut self, _location: &str) {}

    fn item_failed(&mut self, _location: &str, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
