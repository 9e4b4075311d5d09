//! Linear viewport scales.
//!
//! Zooming never rewrites tile geometry: the partition is computed once in
//! layout space and two independent scales (x and y) map it to the screen.
//! Retargeting a scale's domain to a node's rectangle is what makes that
//! node fill the viewport.

/// A linear mapping from a domain interval to a range interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value into the range. A degenerate domain maps
    /// everything to the range start rather than dividing by zero.
    pub fn scale(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() < f64::EPSILON {
            return r0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    /// Retarget the domain (the zoom operation).
    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_endpoints_and_midpoint() {
        let s = LinearScale::new((0.0, 990.0), (0.0, 1980.0));
        assert_eq!(s.scale(0.0), 0.0);
        assert_eq!(s.scale(990.0), 1980.0);
        assert_eq!(s.scale(495.0), 990.0);
    }

    #[test]
    fn retarget_maps_subrect_to_full_range() {
        let mut s = LinearScale::new((0.0, 990.0), (0.0, 990.0));
        s.set_domain((100.0, 300.0));
        assert_eq!(s.scale(100.0), 0.0);
        assert_eq!(s.scale(300.0), 990.0);
        // Points outside the focused domain extrapolate off-screen.
        assert!(s.scale(0.0) < 0.0);
    }

    #[test]
    fn degenerate_domain_is_safe() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.scale(5.0), 0.0);
        assert_eq!(s.scale(99.0), 0.0);
    }
}
