//! Utilities for working with probabilities.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn normalise(&mut self, target: f64) -> f64;
    fn scale(&mut self, factor: f64);
    fn mean(&self) -> Option<f64>;
    fn median(&self) -> Option<f64>;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        self.scale(target / sum);
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.sum() / self.len() as f64)
        }
    }

    /// The middle element of a sorted copy, or the mean of the two middle elements for an
    /// even-length slice. Sorting first keeps the result independent of the input order.
    fn median(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let mut sorted = self.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / 2.0)
        } else {
            Some(sorted[mid])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;
    use fairline_testing::assert_slice_f64_near;

    #[test]
    fn sum() {
        let data = [0.0, 0.1, 0.2];
        assert_f64_near!(0.3, data.sum(), 1);
    }

    #[test]
    fn normalise() {
        let mut data = [0.05, 0.1, 0.15, 0.2];
        let sum = data.normalise(1.0);
        assert_f64_near!(0.5, sum, 1);
        assert_slice_f64_near(&[0.1, 0.2, 0.3, 0.4], &data, 1);
    }

    #[test]
    fn normalise_vigged_pair() {
        let mut data = [1.0 / 1.909090909, 1.0 / 1.909090909];
        let booksum = data.normalise(1.0);
        assert_float_absolute_eq!(1.047619, booksum, 1e-6);
        assert_float_absolute_eq!(1.0, data.sum(), 1e-12);
    }

    #[test]
    fn scale() {
        let mut data = [0.1, 0.2, 0.3];
        data.scale(2.0);
        assert_slice_f64_near(&[0.2, 0.4, 0.6], &data, 1);
    }

    #[test]
    fn mean() {
        let empty: [f64; 0] = [];
        assert_eq!(None, empty.mean());
        let data = [0.1, 0.2, 0.3];
        assert_float_absolute_eq!(0.2, data.mean().unwrap(), 1e-12);
    }

    #[test]
    fn median_odd() {
        let data = [0.9, 0.1, 0.5];
        assert_eq!(Some(0.5), data.median());
        let data = [0.7];
        assert_eq!(Some(0.7), data.median());
    }

    #[test]
    fn median_even() {
        let data = [0.4, 0.1, 0.3, 0.9];
        assert_float_absolute_eq!(0.35, data.median().unwrap(), 1e-12);
    }

    #[test]
    fn median_empty() {
        let empty: [f64; 0] = [];
        assert_eq!(None, empty.median());
    }

    #[test]
    fn median_resists_outlier() {
        let data = [0.50, 0.51, 0.49, 0.52, 0.99];
        let median = data.median().unwrap();
        assert_eq!(0.51, median);
        assert!(data.mean().unwrap() - median > 0.05);
    }

    #[test]
    fn median_independent_of_order() {
        let forward = [0.3, 0.1, 0.7, 0.5, 0.2, 0.6];
        let mut reversed = forward;
        reversed.reverse();
        assert_eq!(forward.median(), reversed.median());
    }
}
