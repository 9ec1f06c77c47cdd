//! Legendre polynomials and derivatives via stable three-term recurrences.
//!
//! The hierarchical basis is built on the Legendre family rather than raw
//! monomials; the recurrence keeps evaluation well-conditioned at every
//! supported order.
//!
//! Values use:
//! ```text
//! (n+1) P_{n+1}(x) = (2n+1) x P_n(x) - n P_{n-1}(x)
//! ```
//! and derivatives use:
//! ```text
//! P'_n(x) = P'_{n-2}(x) + (2n-1) P_{n-1}(x)
//! ```
//! which, unlike the `(1 - x^2)` form, is valid at the endpoints too.

/// Values `P_0(x) .. P_{n_max}(x)`.
pub fn legendre_values(n_max: usize, x: f64) -> Vec<f64> {
    let mut p = vec![0.0; n_max + 1];
    p[0] = 1.0;
    if n_max == 0 {
        return p;
    }
    p[1] = x;
    for n in 2..=n_max {
        let nf = n as f64;
        p[n] = ((2.0 * nf - 1.0) * x * p[n - 1] - (nf - 1.0) * p[n - 2]) / nf;
    }
    p
}

/// Values and derivatives `(P_0..P_{n_max}, P'_0..P'_{n_max})` at `x`.
pub fn legendre_with_derivs(n_max: usize, x: f64) -> (Vec<f64>, Vec<f64>) {
    let p = legendre_values(n_max, x);
    let mut dp = vec![0.0; n_max + 1];
    if n_max >= 1 {
        dp[1] = 1.0;
    }
    for n in 2..=n_max {
        dp[n] = dp[n - 2] + (2.0 * n as f64 - 1.0) * p[n - 1];
    }
    (p, dp)
}
