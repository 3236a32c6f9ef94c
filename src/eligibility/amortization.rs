//! Standard reducing-balance amortization
//!
//! Used to turn EMI capacity into a loan amount (stage 5) and a loan amount
//! back into an EMI for display and lender comparison.

/// Monthly rate as a decimal from an annual percentage (e.g. 12.0 -> 0.01)
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / (12.0 * 100.0)
}

/// Present value of 1 per month for `months` months at `monthly_rate`
///
/// `[(1+i)^n - 1] / [i (1+i)^n]`; zero when the rate or term is not positive.
/// Approaches `1/i` as the term grows without bound.
pub fn annuity_factor(monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate <= 0.0 || months == 0 {
        return 0.0;
    }
    let factor = growth(monthly_rate, months);
    if !factor.is_finite() {
        return 1.0 / monthly_rate;
    }
    (factor - 1.0) / (monthly_rate * factor)
}

/// `(1+i)^n` with the exponent saturated to the `powi` domain
fn growth(monthly_rate: f64, months: u32) -> f64 {
    (1.0 + monthly_rate).powi(i32::try_from(months).unwrap_or(i32::MAX))
}

/// Largest principal an EMI of `emi` can service
pub fn principal_from_emi(emi: f64, monthly_rate: f64, months: u32) -> f64 {
    if emi <= 0.0 {
        return 0.0;
    }
    emi * annuity_factor(monthly_rate, months)
}

/// Equated monthly instalment for a principal
///
/// `P r (1+r)^n / [(1+r)^n - 1]`, falling back to straight-line repayment
/// at a zero rate.
pub fn emi(principal: f64, annual_rate_pct: f64, months: u32) -> f64 {
    if principal <= 0.0 || months == 0 {
        return 0.0;
    }
    let r = monthly_rate(annual_rate_pct);
    if r <= 0.0 {
        return principal / months as f64;
    }
    let factor = growth(r, months);
    if !factor.is_finite() {
        return principal * r;
    }
    principal * r * factor / (factor - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_emi() {
        // 1 lakh at 12% over 12 months
        assert_relative_eq!(emi(100_000.0, 12.0, 12), 8_884.88, epsilon = 0.01);
    }

    #[test]
    fn test_emi_inverts_principal() {
        let i = monthly_rate(10.5);
        let principal = principal_from_emi(17_500.0, i, 60);
        assert_relative_eq!(emi(principal, 10.5, 60), 17_500.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(annuity_factor(0.0, 36), 0.0);
        assert_eq!(annuity_factor(0.01, 0), 0.0);
        assert_eq!(principal_from_emi(0.0, 0.01, 36), 0.0);
        assert_eq!(principal_from_emi(-10.0, 0.01, 36), 0.0);
        assert_eq!(emi(0.0, 12.0, 36), 0.0);
        assert_eq!(emi(120_000.0, 12.0, 0), 0.0);
        assert_relative_eq!(emi(120_000.0, 0.0, 12), 10_000.0);
    }

    #[test]
    fn test_unbounded_term_stays_finite() {
        let i = monthly_rate(12.0);
        assert_relative_eq!(annuity_factor(i, u32::MAX), 100.0, epsilon = 1e-9);
        assert_relative_eq!(annuity_factor(i, 2_400_000_000), 100.0, epsilon = 1e-9);
        assert_relative_eq!(emi(100_000.0, 12.0, u32::MAX), 1_000.0, epsilon = 1e-9);
        assert!(principal_from_emi(17_500.0, i, u32::MAX).is_finite());
    }
}
