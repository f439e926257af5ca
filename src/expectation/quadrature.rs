/// Composite Simpson's rule over evenly spaced samples.
///
/// `xs` and `ys` must have equal length of at least two. With an odd
/// number of intervals, the final interval is finished with the
/// trapezoid rule.
pub(super) fn simpson(xs: &[f64], ys: &[f64]) -> f64 {
    assert_eq!(xs.len(), ys.len());
    assert!(xs.len() >= 2);

    let intervals = xs.len() - 1;
    let h = (xs[intervals] - xs[0]) / intervals as f64;
    let paired = intervals - intervals % 2;

    let mut acc = 0.0;
    let mut i = 0;
    while i < paired {
        acc += h / 3.0 * (ys[i] + 4.0 * ys[i + 1] + ys[i + 2]);
        i += 2;
    }
    if paired < intervals {
        acc += h / 2.0 * (ys[intervals - 1] + ys[intervals]);
    }
    acc
}

/// `n` evenly spaced points covering `[0, end]`, endpoints included.
pub(super) fn linspace(end: f64, n: usize) -> Vec<f64> {
    assert!(n >= 2);
    let step = end / (n - 1) as f64;
    (0..n).map(|i| i as f64 * step).collect()
}
