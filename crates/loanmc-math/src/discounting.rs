//! Discounting and annuity arithmetic on annual periods.

use crate::error::{MathError, MathResult};

fn check_rate(rate: f64) -> MathResult<()> {
    if rate.is_finite() && rate > -1.0 {
        Ok(())
    } else {
        Err(MathError::invalid_input(format!(
            "discount rate {rate} must be finite and greater than -1"
        )))
    }
}

/// Discount factor `(1 + rate)^-t` for `t` whole periods.
pub fn discount_factor(rate: f64, t: u32) -> MathResult<f64> {
    check_rate(rate)?;
    Ok((1.0 + rate).powi(-(t as i32)))
}

/// Present value of end-of-period cash flows.
///
/// ```text
/// PV = Σ cf_t / (1 + rate)^t,   t = 1..n
/// ```
///
/// # Example
///
/// ```rust
/// use loanmc_math::discounting::present_value;
///
/// let pv = present_value(&[110.0], 0.10).unwrap();
/// assert!((pv - 100.0).abs() < 1e-9);
/// ```
pub fn present_value(cash_flows: &[f64], rate: f64) -> MathResult<f64> {
    check_rate(rate)?;
    let step = 1.0 / (1.0 + rate);
    let (pv, _) = cash_flows
        .iter()
        .fold((0.0, step), |(pv, df), cf| (pv + cf * df, df * step));
    Ok(pv)
}

/// Level payment that amortizes `principal` over `periods` at `rate` per period.
///
/// ```text
/// A = P × r(1 + r)^T / ((1 + r)^T − 1),   or P / T when r = 0
/// ```
pub fn level_payment(principal: f64, rate: f64, periods: u32) -> MathResult<f64> {
    if periods == 0 {
        return Err(MathError::invalid_input("amortization needs at least one period"));
    }
    if !rate.is_finite() || rate < 0.0 {
        return Err(MathError::invalid_input(format!(
            "amortization rate {rate} must be non-negative"
        )));
    }

    if rate == 0.0 {
        return Ok(principal / f64::from(periods));
    }

    let growth = (1.0 + rate).powi(periods as i32);
    Ok(principal * rate * growth / (growth - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factor() {
        assert_relative_eq!(discount_factor(0.08, 0).unwrap(), 1.0);
        assert_relative_eq!(discount_factor(0.08, 2).unwrap(), 1.0 / 1.1664, epsilon = 1e-12);
        assert!(discount_factor(-1.0, 1).is_err());
    }

    #[test]
    fn test_present_value_matches_direct_sum() {
        let cfs = [100.0, 200.0, 300.0];
        let direct: f64 = cfs
            .iter()
            .enumerate()
            .map(|(i, cf)| cf / 1.05_f64.powi(i as i32 + 1))
            .sum();
        assert_relative_eq!(present_value(&cfs, 0.05).unwrap(), direct, epsilon = 1e-9);
    }

    #[test]
    fn test_present_value_zero_rate_is_sum() {
        assert_relative_eq!(present_value(&[1.0, 2.0, 3.0], 0.0).unwrap(), 6.0);
        assert_relative_eq!(present_value(&[], 0.05).unwrap(), 0.0);
    }

    #[test]
    fn test_level_payment() {
        // $10,000 at 10% over 10 years
        assert_relative_eq!(
            level_payment(10_000.0, 0.10, 10).unwrap(),
            1627.4539488251,
            epsilon = 1e-6
        );
        assert_relative_eq!(level_payment(1200.0, 0.0, 12).unwrap(), 100.0);
        assert!(level_payment(1000.0, 0.05, 0).is_err());
        assert!(level_payment(1000.0, -0.05, 5).is_err());
    }

    #[test]
    fn test_annuity_priced_at_its_own_rate_is_par() {
        let payment = level_payment(10_000.0, 0.07, 15).unwrap();
        let pv = present_value(&[payment; 15], 0.07).unwrap();
        assert_relative_eq!(pv, 10_000.0, epsilon = 1e-6);
    }
}
