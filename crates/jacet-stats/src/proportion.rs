/// A count of successes out of a number of trials.
///
/// Used for accuracy-style ratios. The rate of an empty proportion is
/// undefined and reported as `None` rather than `0.0`.
///
/// # Examples
///
/// ```
/// # use jacet_stats::proportion::Proportion;
/// let p = Proportion::from_outcomes([true, false, true, true]);
/// assert_eq!(p.successes, 3);
/// assert_eq!(p.trials, 4);
/// assert_eq!(p.rate(), Some(0.75));
/// assert_eq!(Proportion::default().rate(), None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Proportion {
    /// Number of successful trials.
    pub successes: usize,
    /// Total number of trials.
    pub trials: usize,
}

impl Proportion {
    /// Counts successes over a sequence of boolean outcomes.
    #[must_use]
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut acc, success| {
                acc.record(success);
                acc
            })
    }

    /// Records one trial.
    pub fn record(&mut self, success: bool) {
        self.trials += 1;
        if success {
            self.successes += 1;
        }
    }

    /// Number of failed trials.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.trials - self.successes
    }

    /// Success rate in `[0, 1]`, or `None` when there are no trials.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        (self.trials > 0).then(|| self.successes as f64 / self.trials as f64)
    }

    /// Success rate as a percentage.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.rate().map(|r| r * 100.0)
    }
}

/// Rounds `value` to `places` decimal places (half away from zero).
///
/// ```
/// # use jacet_stats::proportion::round_to;
/// assert_eq!(round_to(0.666_666, 2), 0.67);
/// assert_eq!(round_to(2.5, 0), 3.0);
/// ```
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}
