//! Overflow-safe reductions over finite values.

/// Sum that saturates at `±f64::MAX` instead of overflowing to infinity.
pub fn saturating_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, |acc, v| {
        let next = acc + v;
        if next.is_finite() {
            next
        } else {
            f64::MAX.copysign(next)
        }
    })
}

/// Running mean, `None` for no values. Stays finite for any finite input
/// since each step moves the mean between its old value and the new one.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut m = 0.0;
    let mut k = 0.0;
    for v in values {
        k += 1.0;
        m += v / k - m / k;
    }
    (k > 0.0).then_some(m)
}
