/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_millis(ms: f64) -> Self {
        Time(ms / 1000.0)
    }

    pub fn as_millis(self) -> f64 {
        self.0 * 1000.0
    }

    pub fn after_millis(self, ms: f64) -> Self {
        Time(self.0 + ms / 1000.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: Time, duration_ms: f64) -> Self {
        Self {
            start,
            end: start.after_millis(duration_ms.max(0.0)),
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Fraction of the span elapsed at `t`, clamped to `[0, 1]`.
    ///
    /// A zero-length span is complete as soon as it starts.
    pub fn progress(&self, t: Time) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return if t.0 >= self.start.0 { 1.0 } else { 0.0 };
        }
        ((t.0 - self.start.0) / d).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, t: Time) -> bool {
        self.progress(t) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Time, TimeSpan};

    #[test]
    fn millis_round_trip() {
        let t = Time::from_millis(750.0);
        assert_eq!(t, Time(0.75));
        assert_eq!(t.as_millis(), 750.0);
    }

    #[test]
    fn progress_is_clamped() {
        let span = TimeSpan::starting_at(Time(1.0), 500.0);
        assert_eq!(span.progress(Time(0.5)), 0.0);
        assert_eq!(span.progress(Time(1.25)), 0.5);
        assert_eq!(span.progress(Time(3.0)), 1.0);
        assert!(span.is_complete(Time(1.5)));
    }

    #[test]
    fn zero_length_span_completes_immediately() {
        let span = TimeSpan::starting_at(Time(2.0), 0.0);
        assert_eq!(span.progress(Time(1.0)), 0.0);
        assert_eq!(span.progress(Time(2.0)), 1.0);
    }
}
