use std::cmp::Ordering;

use serde::Serialize;

/// One independent variable's sampling interval `[min, max]`.
///
/// Immutable after construction. `min` is expected to lie below `max`;
/// a reversed interval is a caller error and is rejected when an equation
/// is built. Ordering comparisons go by interval width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max - self.min
    }
}

impl PartialOrd for Bounds {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.width().partial_cmp(&other.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width() {
        assert_eq!(Bounds::new(-10.0, 10.0).width(), 20.0);
        assert_eq!(Bounds::new(2.0, 2.0).width(), 0.0);
    }

    #[test]
    fn test_ordering_by_width() {
        let narrow = Bounds::new(0.0, 1.0);
        let wide = Bounds::new(-100.0, 1.0);
        assert!(narrow < wide);
        assert!(wide > narrow);

        // equal widths compare equal regardless of position
        let shifted = Bounds::new(5.0, 6.0);
        assert_eq!(narrow.partial_cmp(&shifted), Some(Ordering::Equal));
    }
}
