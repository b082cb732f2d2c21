//! Per-colour chess clock charged from caller-supplied timestamps.

use super::{Color, PerColor, Timestamp};

/// Base time and per-action increment, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeControl {
    pub base_ms: u64,
    pub increment_ms: u64,
}

impl TimeControl {
    pub const fn new(base_ms: u64, increment_ms: u64) -> Self {
        Self {
            base_ms,
            increment_ms,
        }
    }
}

/// Remaining time per colour plus the instant the clock was last charged.
///
/// `last_charge` is `None` until both players are ready; an unstarted clock
/// never runs down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameClock {
    pub remaining_ms: PerColor<i64>,
    pub last_charge: Option<Timestamp>,
}

impl GameClock {
    pub fn new(control: TimeControl) -> Self {
        let base = i64::try_from(control.base_ms).unwrap_or(i64::MAX);
        Self {
            remaining_ms: PerColor::splat(base),
            last_charge: None,
        }
    }

    #[inline]
    pub const fn is_running(&self) -> bool {
        self.last_charge.is_some()
    }

    pub fn start(&mut self, now: Timestamp) {
        if self.last_charge.is_none() {
            self.last_charge = Some(now);
        }
    }

    /// Deducts the time elapsed since the last charge from every colour in `running`.
    pub fn charge(&mut self, running: &[Color], now: Timestamp) {
        let Some(last) = self.last_charge else {
            return;
        };
        let elapsed = Self::elapsed(last, now);
        for &color in running {
            self.remaining_ms[color] = self.remaining_ms[color].saturating_sub(elapsed);
        }
        self.last_charge = Some(now.max(last));
    }

    pub fn credit(&mut self, color: Color, increment_ms: u64) {
        let increment = i64::try_from(increment_ms).unwrap_or(i64::MAX);
        self.remaining_ms[color] = self.remaining_ms[color].saturating_add(increment);
    }

    /// Remaining time per colour as it would read at `now`, without charging.
    pub fn projected(&self, running: &[Color], now: Timestamp) -> PerColor<i64> {
        let mut remaining = self.remaining_ms;
        if let Some(last) = self.last_charge {
            let elapsed = Self::elapsed(last, now);
            for &color in running {
                remaining[color] = remaining[color].saturating_sub(elapsed);
            }
        }
        remaining
    }

    /// Instant at which `color` runs out of time if it keeps running from the last charge.
    pub fn flag_time(&self, color: Color) -> Option<Timestamp> {
        let last = self.last_charge?;
        let remaining = u64::try_from(self.remaining_ms[color].max(0)).unwrap_or(0);
        Some(last + remaining)
    }

    fn elapsed(last: Timestamp, now: Timestamp) -> i64 {
        i64::try_from(now.millis_since(last)).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstarted_clock_does_not_run() {
        let mut clock = GameClock::new(TimeControl::new(1_000, 100));
        clock.charge(&[Color::White], Timestamp(50_000));
        assert_eq!(clock.remaining_ms[Color::White], 1_000);
        assert_eq!(clock.flag_time(Color::White), None);
    }

    #[test]
    fn charge_only_touches_running_colours() {
        let mut clock = GameClock::new(TimeControl::new(1_000, 100));
        clock.start(Timestamp(10));
        clock.charge(&[Color::Black], Timestamp(310));
        assert_eq!(clock.remaining_ms[Color::White], 1_000);
        assert_eq!(clock.remaining_ms[Color::Black], 700);
        clock.credit(Color::Black, 100);
        assert_eq!(clock.remaining_ms[Color::Black], 800);
        assert_eq!(clock.flag_time(Color::Black), Some(Timestamp(1_110)));
    }

    #[test]
    fn projection_leaves_the_clock_untouched() {
        let mut clock = GameClock::new(TimeControl::new(1_000, 0));
        clock.start(Timestamp(0));
        let view = clock.projected(&[Color::White, Color::Black], Timestamp(400));
        assert_eq!(view, PerColor::new(600, 600));
        assert_eq!(clock.remaining_ms, PerColor::new(1_000, 1_000));
    }
}
