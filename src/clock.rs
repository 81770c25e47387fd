use std::time::Duration;
use std::time::SystemTime;

/// Source of the current instant for the `REQUEST_TIME*` globals.
pub trait Clock: Send + Sync {
  fn now(&self) -> SystemTime;
}

/// Reads the system wall-clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> SystemTime {
    SystemTime::now()
  }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(SystemTime);

impl FixedClock {
  pub fn new(now: SystemTime) -> Self {
    Self(now)
  }

  /// A clock stopped at `secs` seconds after the Unix epoch, `None` when `secs` is not finite or
  /// out of the range of [`SystemTime`].
  pub fn from_unix_secs_f64(secs: f64) -> Option<Self> {
    let offset = Duration::try_from_secs_f64(secs.abs()).ok()?;
    let now = match secs.is_sign_negative() {
      true => SystemTime::UNIX_EPOCH.checked_sub(offset),
      false => SystemTime::UNIX_EPOCH.checked_add(offset),
    };
    now.map(Self)
  }
}

impl Clock for FixedClock {
  fn now(&self) -> SystemTime {
    self.0
  }
}

/// Splits an instant into whole seconds since the epoch and the microsecond part.
///
/// Seconds are floored, so an instant before the epoch still has a positive microsecond part.
pub(crate) fn unix_timestamp(time: SystemTime) -> (i64, u32) {
  match time.duration_since(SystemTime::UNIX_EPOCH) {
    Ok(elapsed) => (elapsed.as_secs().cast_signed(), elapsed.subsec_micros()),
    Err(err) => {
      let before = err.duration();
      let secs = before.as_secs().cast_signed();
      match before.subsec_micros() {
        0 => (-secs, 0),
        micros => (-secs - 1, 1_000_000 - micros),
      }
    }
  }
}
