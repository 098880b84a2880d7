/// Wall-clock frame timer driven by host timestamps.
/// The host passes its own millisecond clock (e.g. the animation-frame timestamp);
/// the epoch is whatever the host uses. Time never runs backwards.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    now_ms: f64,
    delta_ms: f64,
    frames: u64,
    started: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new host timestamp. Returns the clamped delta since the previous frame.
    pub fn advance(&mut self, host_ms: f64) -> f64 {
        if !host_ms.is_finite() {
            log::warn!("ignoring non-finite frame timestamp {host_ms}");
            self.delta_ms = 0.0;
            return 0.0;
        }
        if self.started {
            let now = host_ms.max(self.now_ms);
            self.delta_ms = now - self.now_ms;
            self.now_ms = now;
        } else {
            self.now_ms = host_ms;
            self.delta_ms = 0.0;
            self.started = true;
        }
        self.frames += 1;
        self.delta_ms
    }

    /// Current time in host milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Time between the last two frames, in milliseconds.
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Number of frames recorded.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
