//! Weighted random selection
//!
//! Both selectors take the random source as an argument, so a fill driven by
//! a seeded `SmallRng` is reproducible.

use rand::Rng;

/// Picks random values that each have a probability assigned
///
/// Values can be picked any number of times.
#[derive(Debug, Clone)]
pub struct RandomPicker<T> {
    sum: f64,
    /// (cumulative threshold, value), thresholds ascending
    thresholds: Vec<(f64, T)>,
}

impl<T> Default for RandomPicker<T> {
    fn default() -> Self {
        Self {
            sum: 0.0,
            thresholds: Vec::new(),
        }
    }
}

impl<T> RandomPicker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value. Probabilities <= 0 are ignored.
    pub fn add(&mut self, value: T, probability: f64) {
        if probability > 0.0 {
            self.sum += probability;
            self.thresholds.push((self.sum, value));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.sum
    }

    /// Pick a value
    ///
    /// # Panics
    /// Panics when the picker is empty.
    pub fn pick(&self, rng: &mut impl Rng) -> &T {
        assert!(!self.is_empty(), "RandomPicker::pick called on an empty picker");

        if self.thresholds.len() == 1 {
            return &self.thresholds[0].1;
        }

        let random = rng.gen::<f64>() * self.sum;
        let index = self
            .thresholds
            .partition_point(|(threshold, _)| *threshold < random)
            .min(self.thresholds.len() - 1);

        &self.thresholds[index].1
    }

    pub fn clear(&mut self) {
        self.sum = 0.0;
        self.thresholds.clear();
    }
}

/// Takes random values that each have a probability assigned
///
/// Each added value can only be taken once.
#[derive(Debug, Clone)]
pub struct RandomTaker<T> {
    sum: f64,
    entries: Vec<(T, f64)>,
}

impl<T> Default for RandomTaker<T> {
    fn default() -> Self {
        Self {
            sum: 0.0,
            entries: Vec::new(),
        }
    }
}

impl<T> RandomTaker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value. Probabilities <= 0 are ignored.
    pub fn add(&mut self, value: T, probability: f64) {
        if probability > 0.0 {
            self.sum += probability;
            self.entries.push((value, probability));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.sum
    }

    /// Remove and return a value
    ///
    /// # Panics
    /// Panics when the taker is empty.
    pub fn take(&mut self, rng: &mut impl Rng) -> T {
        assert!(!self.is_empty(), "RandomTaker::take called on an empty taker");

        let threshold = rng.gen::<f64>() * self.sum;
        let last = self.entries.len() - 1;

        // Scan from the back; the first entry is what is left when the
        // running sum never exceeds the threshold.
        let mut sum = 0.0;
        let mut i = last;
        while i > 0 {
            sum += self.entries[i].1;
            if sum > threshold {
                break;
            }
            i -= 1;
        }

        // Move the chosen entry to the back and pop it
        let (value, probability) = self.entries.swap_remove(i);

        if self.entries.is_empty() {
            self.sum = 0.0;
        } else {
            self.sum -= probability;
        }
        value
    }

    pub fn clear(&mut self) {
        self.sum = 0.0;
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn seeded_rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    #[test]
    fn test_single_value_always_picked() {
        let mut rng = seeded_rng();
        for weight in [1e-9, 0.5, 1.0, 1e12] {
            let mut picker = RandomPicker::new();
            picker.add("only", weight);
            for _ in 0..100 {
                assert_eq!(*picker.pick(&mut rng), "only");
            }
        }
    }

    #[test]
    fn test_non_positive_weights_are_ignored() {
        let mut picker = RandomPicker::new();
        picker.add(1, 0.0);
        picker.add(2, -3.0);
        assert!(picker.is_empty());

        let mut taker = RandomTaker::new();
        taker.add(1, 0.0);
        taker.add(2, -0.5);
        assert!(taker.is_empty());
        assert_eq!(taker.total_weight(), 0.0);
    }

    #[test]
    #[should_panic(expected = "empty picker")]
    fn test_pick_empty_panics() {
        let picker: RandomPicker<u32> = RandomPicker::new();
        picker.pick(&mut seeded_rng());
    }

    #[test]
    #[should_panic(expected = "empty taker")]
    fn test_take_empty_panics() {
        let mut taker: RandomTaker<u32> = RandomTaker::new();
        taker.take(&mut seeded_rng());
    }

    #[test]
    fn test_equal_weights_are_fair() {
        let mut rng = seeded_rng();
        let mut picker = RandomPicker::new();
        picker.add('a', 1.0);
        picker.add('b', 1.0);

        let draws = 100_000;
        let a_count = (0..draws).filter(|_| *picker.pick(&mut rng) == 'a').count();
        let ratio = a_count as f64 / draws as f64;
        assert!((ratio - 0.5).abs() < 0.01, "ratio was {ratio}");
    }

    #[test]
    fn test_weights_bias_selection() {
        let mut rng = seeded_rng();
        let mut picker = RandomPicker::new();
        picker.add('a', 3.0);
        picker.add('b', 1.0);

        let draws = 40_000;
        let a_count = (0..draws).filter(|_| *picker.pick(&mut rng) == 'a').count();
        let ratio = a_count as f64 / draws as f64;
        assert!((ratio - 0.75).abs() < 0.02, "ratio was {ratio}");
    }

    #[test]
    fn test_picker_clear() {
        let mut picker = RandomPicker::new();
        picker.add(1, 2.0);
        picker.add(2, 2.0);
        assert_eq!(picker.len(), 2);
        assert_eq!(picker.total_weight(), 4.0);

        picker.clear();
        assert!(picker.is_empty());
        assert_eq!(picker.total_weight(), 0.0);
    }

    #[test]
    fn test_taker_never_repeats() {
        let mut rng = seeded_rng();
        let mut taker = RandomTaker::new();
        for value in 0..10u32 {
            taker.add(value, 1.0 + value as f64);
        }

        let mut seen = Vec::new();
        while !taker.is_empty() {
            let value = taker.take(&mut rng);
            assert!(!seen.contains(&value));
            seen.push(value);
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(taker.total_weight(), 0.0);
    }

    #[test]
    fn test_taker_total_weight_decreases_by_taken_weight() {
        let mut rng = seeded_rng();
        let weights = [0.5, 1.25, 2.0, 4.0];
        let mut taker = RandomTaker::new();
        for (i, &w) in weights.iter().enumerate() {
            taker.add(i, w);
        }

        while !taker.is_empty() {
            let before = taker.total_weight();
            let taken = taker.take(&mut rng);
            let expected = before - weights[taken];
            assert!((taker.total_weight() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_taker_re_add_after_take() {
        let mut rng = seeded_rng();
        let mut taker = RandomTaker::new();
        taker.add(7, 1.0);
        assert_eq!(taker.take(&mut rng), 7);
        assert!(taker.is_empty());

        taker.add(7, 1.0);
        assert_eq!(taker.len(), 1);
        assert_eq!(taker.take(&mut rng), 7);
    }
}
