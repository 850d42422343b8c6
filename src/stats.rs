/// Arithmetic mean of the measured runs, `None` when there are none.
pub fn aggregate(runs: &[f64]) -> Option<f64> {
    if runs.is_empty() {
        return None;
    }
    Some(runs.iter().sum::<f64>() / runs.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_three() {
        assert_eq!(aggregate(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn mean_of_one() {
        assert_eq!(aggregate(&[0.125]), Some(0.125));
    }

    #[test]
    fn no_outlier_rejection() {
        assert_eq!(aggregate(&[1.0, 1.0, 1.0, 9.0]), Some(3.0));
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(aggregate(&[]), None);
    }
}
