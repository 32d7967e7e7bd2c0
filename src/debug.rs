use std::time::Instant;

/// A simple RAII timer for pipeline stages.
/// When created, it notes the start time.
/// When it goes out of scope (at the end of a block), it logs
/// the time elapsed since its creation at debug level.
pub struct Tracer {
    name: String,
    start_time: Instant,
}

impl Tracer {
    pub fn new(name: impl Into<String>) -> Self {
        Tracer {
            name: name.into(),
            start_time: Instant::now(),
        }
    }
}

impl Drop for Tracer {
    fn drop(&mut self) {
        let elapsed = self.start_time.elapsed();
        log::debug!("[Trace] {}: {:.2?}", self.name, elapsed);
    }
}
