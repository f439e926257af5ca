/// A function known only at sampled support points, evaluated in
/// between by linear interpolation.
///
/// `xs` must be non-decreasing. Queries outside the sampled domain
/// clamp to the boundary values. On a plateau (repeated `xs` entries)
/// the later support point wins; callers inverting a non-decreasing
/// function through a swapped-axes curve accept this as a nearest-entry
/// approximation on flat segments.
#[derive(Clone, Debug)]
pub struct SampledCurve {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampledCurve {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        assert_eq!(xs.len(), ys.len());
        assert!(xs.len() >= 2);
        SampledCurve { xs, ys }
    }

    pub fn support(&self) -> (&[f64], &[f64]) {
        (&self.xs, &self.ys)
    }

    pub fn eval(&self, x: f64) -> f64 {
        let last = self.xs.len() - 1;
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[last] {
            return self.ys[last];
        }
        // first support point at or beyond x; lo < hi since x is interior
        let hi = self.xs.partition_point(|&v| v < x);
        let lo = hi - 1;
        let dx = self.xs[hi] - self.xs[lo];
        if dx <= 0.0 {
            self.ys[hi]
        } else {
            let w = (x - self.xs[lo]) / dx;
            self.ys[lo] + w * (self.ys[hi] - self.ys[lo])
        }
    }
}
