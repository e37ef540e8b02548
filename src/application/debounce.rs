use tokio::time::{Duration, Instant, sleep_until};

/// Delay between the last search keystroke and the search itself.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds at most one pending value and releases it once `delay` has passed
/// without a newer value arriving.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the timer.
    pub fn schedule(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.delay, value));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the pending value once its deadline passes. Never
    /// resolves while nothing is pending.
    ///
    /// Cancel safe: dropping the future before it resolves leaves the
    /// pending value in place.
    pub async fn fire(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|(deadline, _)| *deadline) else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;

        match self.pending.take() {
            Some((_, value)) => value,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.schedule("rust");

        let started = Instant::now();
        let value = debouncer.fire().await;

        assert_eq!(value, "rust");
        assert!(started.elapsed() >= SEARCH_DEBOUNCE);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_value_restarts_timer() {
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.schedule("r");

        advance(Duration::from_millis(200)).await;
        debouncer.schedule("ru");
        advance(Duration::from_millis(200)).await;

        // The first deadline has passed but was superseded.
        let early = timeout(Duration::from_millis(50), debouncer.fire()).await;
        assert!(early.is_err());
        assert!(debouncer.is_pending());

        let value = debouncer.fire().await;
        assert_eq!(value, "ru");
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_pending_never_fires() {
        let mut debouncer: Debouncer<&str> = Debouncer::new(SEARCH_DEBOUNCE);
        let result = timeout(Duration::from_secs(5), debouncer.fire()).await;
        assert!(result.is_err());

        debouncer.schedule("x");
        debouncer.cancel();
        let result = timeout(Duration::from_secs(5), debouncer.fire()).await;
        assert!(result.is_err());
    }
}
