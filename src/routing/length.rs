//! Total path length

use super::types::Point;

/// Sum of the Euclidean lengths of consecutive segments
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single_point() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[Point::new(3.0, 4.0)]), 0.0);
    }

    #[test]
    fn test_sums_segments() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(3.0, 10.0),
        ];
        assert_eq!(path_length(&pts), 11.0);
    }
}
