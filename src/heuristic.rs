//! Distance estimates between two grid positions.
use grid_util::point::Point;

/// Estimate of the remaining cost from the first point to the second.
pub type Heuristic = fn(&Point, &Point) -> f64;

/// `|x1 - x2| + |y1 - y2|`. Admissible and consistent on a 4-connected grid with unit costs.
pub fn manhattan(p1: &Point, p2: &Point) -> f64 {
    ((p1.x - p2.x).abs() + (p1.y - p2.y).abs()) as f64
}

/// Straight-line distance.
pub fn euclidean(p1: &Point, p2: &Point) -> f64 {
    let dx = (p1.x - p2.x) as f64;
    let dy = (p1.y - p2.y) as f64;
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(manhattan(&a, &b), 7.0);
        assert_eq!(euclidean(&a, &b), 5.0);
        assert_eq!(manhattan(&b, &a), manhattan(&a, &b));
        assert_eq!(euclidean(&a, &a), 0.0);
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        for x in -3..=3 {
            for y in -3..=3 {
                let p = Point::new(x, y);
                let o = Point::new(0, 0);
                assert!(euclidean(&p, &o) <= manhattan(&p, &o));
            }
        }
    }
}
