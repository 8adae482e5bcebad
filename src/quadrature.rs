//! Adaptive Simpson quadrature on a finite interval.

/// Quadrature settings.
///
/// Tolerance and subdivision cap are explicit values, not library defaults,
/// so results are reproducible across runs and platforms.
#[derive(Debug, Clone, Copy)]
pub struct QuadSettings {
    /// Absolute error tolerance for the full interval.
    pub tolerance: f64,

    /// Maximum number of interval subdivisions before the current estimate
    /// is accepted as-is.
    pub max_subdivisions: usize,
}

impl Default for QuadSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_subdivisions: 200,
        }
    }
}

/// Result of a quadrature run.
#[derive(Debug, Clone, Copy)]
pub struct Quadrature {
    /// Best available estimate of the integral.
    pub value: f64,

    /// False if the subdivision cap was reached before every subinterval
    /// met its share of the tolerance.
    pub converged: bool,
}

/// Integrate `f` from `lower` to `upper`.
///
/// Reversed limits negate the result; equal limits yield zero. The
/// integrand is assumed finite on the interval; non-finite values stop the
/// refinement of the affected subinterval.
pub fn integrate<F>(f: F, lower: f64, upper: f64, settings: &QuadSettings) -> Quadrature
where
    F: Fn(f64) -> f64,
{
    if lower == upper {
        return Quadrature {
            value: 0.0,
            converged: true,
        };
    }

    if lower > upper {
        let flipped = adaptive_simpson(&f, upper, lower, settings);
        return Quadrature {
            value: -flipped.value,
            converged: flipped.converged,
        };
    }

    adaptive_simpson(&f, lower, upper, settings)
}

struct Interval {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    estimate: f64,
    tolerance: f64,
}

fn adaptive_simpson<F>(f: &F, lower: f64, upper: f64, settings: &QuadSettings) -> Quadrature
where
    F: Fn(f64) -> f64,
{
    let fa = f(lower);
    let fb = f(upper);
    let mid = 0.5 * (lower + upper);
    let fm = f(mid);

    let mut stack = vec![Interval {
        a: lower,
        b: upper,
        fa,
        fm,
        fb,
        estimate: simpson(lower, upper, fa, fm, fb),
        tolerance: settings.tolerance,
    }];

    let mut value = 0.0;
    let mut subdivisions = 0;
    let mut converged = true;

    while let Some(iv) = stack.pop() {
        let mid = 0.5 * (iv.a + iv.b);
        let left_mid = 0.5 * (iv.a + mid);
        let right_mid = 0.5 * (mid + iv.b);
        let f_left = f(left_mid);
        let f_right = f(right_mid);

        let left = simpson(iv.a, mid, iv.fa, f_left, iv.fm);
        let right = simpson(mid, iv.b, iv.fm, f_right, iv.fb);
        let diff = left + right - iv.estimate;

        // Accept with the Richardson-extrapolated two-panel estimate.
        if diff.abs() <= 15.0 * iv.tolerance || !diff.is_finite() {
            value += left + right + diff / 15.0;
            continue;
        }

        if subdivisions >= settings.max_subdivisions {
            converged = false;
            value += left + right + diff / 15.0;
            continue;
        }
        subdivisions += 1;

        let half_tolerance = 0.5 * iv.tolerance;
        stack.push(Interval {
            a: iv.a,
            b: mid,
            fa: iv.fa,
            fm: f_left,
            fb: iv.fm,
            estimate: left,
            tolerance: half_tolerance,
        });
        stack.push(Interval {
            a: mid,
            b: iv.b,
            fa: iv.fm,
            fm: f_right,
            fb: iv.fb,
            estimate: right,
            tolerance: half_tolerance,
        });
    }

    Quadrature { value, converged }
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}
