//! Tests for the announcer and timer tiles

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use marbletrack::tiles::{Announcer, NexusId, TimerTile};

    // Tests the announcer remembers its chain
    #[test]
    fn test_announcer_context() {
        assert_eq!(Announcer::new(NexusId(3)).context(), NexusId(3));
    }

    // Tests remaining time counts down and saturates at zero
    // Verified by subtracting without saturation
    #[test]
    fn test_timer_countdown() {
        let mut timer = TimerTile::new(Duration::from_secs(10));
        assert_eq!(timer.remaining(), Duration::from_secs(10));
        assert!(!timer.is_expired());

        timer.tick(Duration::from_secs(4));
        assert_eq!(timer.elapsed(), Duration::from_secs(4));
        assert_eq!(timer.remaining(), Duration::from_secs(6));

        timer.tick(Duration::from_secs(20));
        assert_eq!(timer.remaining(), Duration::ZERO);
        assert!(timer.is_expired());
        assert_eq!(timer.limit(), Duration::from_secs(10));
    }

    // Tests a zero limit is expired from the start
    #[test]
    fn test_zero_limit_timer() {
        assert!(TimerTile::new(Duration::ZERO).is_expired());
    }
}
