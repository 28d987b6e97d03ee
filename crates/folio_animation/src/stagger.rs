//! Staggered start delays for lists of elements

/// Delay between consecutive items of a list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaggerConfig {
    /// Delay between each item's start (ms)
    pub delay_ms: u64,
}

impl StaggerConfig {
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    /// Delay for the item at `index`
    pub fn delay_for_index(&self, index: usize) -> u64 {
        self.delay_ms.saturating_mul(index as u64)
    }

    /// `(index, delay)` for every item of a list of `total`
    pub fn delays(&self, total: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        (0..total).map(move |i| (i, self.delay_for_index(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_delay() {
        let config = StaggerConfig::new(100);
        assert_eq!(config.delay_for_index(0), 0);
        assert_eq!(config.delay_for_index(1), 100);
        assert_eq!(config.delay_for_index(4), 400);
    }

    #[test]
    fn test_delays() {
        let delays: Vec<_> = StaggerConfig::new(50).delays(3).collect();
        assert_eq!(delays, vec![(0, 0), (1, 50), (2, 100)]);
    }
}
