use foundation::time::Time;

/// Animation frame metadata.
///
/// Frames are either fixed-step (`new`/`next`, deterministic for tests and
/// offline rendering) or stamped by the host's animation clock
/// (`at`/`advance_to`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Time since the previous frame (seconds).
    pub dt_s: f64,
    /// Clock time of this frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn at(index: u64, time: Time) -> Self {
        Self {
            index,
            dt_s: 0.0,
            time,
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }

    /// Next frame stamped with a host clock reading. Clocks that go backwards
    /// yield `dt_s == 0`.
    pub fn advance_to(self, time: Time) -> Self {
        Self {
            index: self.index + 1,
            dt_s: (time.0 - self.time.0).max(0.0),
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Time;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 1.0 / 60.0);
        let b = Frame::new(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(10.0 / 60.0));
    }

    #[test]
    fn next_advances_index_and_time() {
        let f0 = Frame::new(0, 0.5);
        let f1 = f0.next();
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(0.5));
    }

    #[test]
    fn host_clock_frames_track_dt() {
        let f0 = Frame::at(0, Time(2.0));
        let f1 = f0.advance_to(Time(2.25));
        assert_eq!(f1.index, 1);
        assert_eq!(f1.dt_s, 0.25);
        let f2 = f1.advance_to(Time(1.0));
        assert_eq!(f2.dt_s, 0.0);
    }
}
