use tokio::time::Instant;

/// Monotonic millisecond clock measured from the start of a session.
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    origin: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }

    pub fn now_ms(&self) -> u64 {
        self.at_ms(Instant::now())
    }

    pub fn at_ms(&self, instant: Instant) -> u64 {
        instant.saturating_duration_since(self.origin).as_millis() as u64
    }
}
