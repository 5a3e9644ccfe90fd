//! Per-step results of a DMRG run.

use std::fmt;

/// Phase a measurement was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Infinite,
    Finite { half_sweep: usize },
}

/// Outcome of one superblock diagonalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub stage: Stage,
    /// Sites in the left part of the chain.
    pub sites_left: usize,
    /// Sites in the right part of the chain.
    pub sites_right: usize,
    /// Ground-state energy of the whole superblock.
    pub energy: f64,
    /// States retained by the truncation that followed.
    pub states_kept: usize,
    /// Density-matrix weight dropped by that truncation.
    pub discarded_weight: f64,
}

impl Measurement {
    pub fn sites(&self) -> usize {
        self.sites_left + self.sites_right
    }

    pub fn energy_per_site(&self) -> f64 {
        self.energy / self.sites() as f64
    }
}

/// `<sites left> <sites right> <energy per site>`, the energy with 16
/// significant digits.
impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.sites_left,
            self.sites_right,
            format_significant(self.energy_per_site(), 16)
        )
    }
}

/// Format `value` with `digits` significant digits the way C's `%.<digits>g`
/// does: fixed notation for decimal exponents in `[-4, digits)`, scientific
/// otherwise, trailing zeros removed in both.
///
/// # Examples
///
/// ```
/// use heisdmrg::measurement::format_significant;
///
/// assert_eq!(format_significant(-0.4040063509461097, 16), "-0.4040063509461097");
/// assert_eq!(format_significant(0.25, 16), "0.25");
/// assert_eq!(format_significant(1.5e-7, 16), "1.5e-07");
/// ```
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let precision = digits.max(1);

    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(sites_left: usize, sites_right: usize, energy: f64) -> Measurement {
        Measurement {
            stage: Stage::Infinite,
            sites_left,
            sites_right,
            energy,
            states_kept: 2,
            discarded_weight: 0.0,
        }
    }

    #[test]
    fn test_energy_per_site() {
        let m = measurement(3, 5, -3.0);
        assert_eq!(m.sites(), 8);
        assert_eq!(m.energy_per_site(), -0.375);
    }

    #[test]
    fn test_display_line() {
        assert_eq!(measurement(2, 2, -1.0).to_string(), "2 2 -0.25");
        assert_eq!(measurement(4, 6, -4.0).to_string(), "4 6 -0.4");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_significant(0.0, 16), "0");
        assert_eq!(format_significant(-1.0, 16), "-1");
        assert_eq!(format_significant(123.5, 16), "123.5");
        assert_eq!(format_significant(1.0 / 3.0, 16), "0.3333333333333333");
        assert_eq!(format_significant(0.0001, 16), "0.0001");
        assert_eq!(format_significant(2.0 / 3.0, 4), "0.6667");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_significant(0.00001, 16), "1e-05");
        assert_eq!(format_significant(-2.5e-12, 16), "-2.5e-12");
        assert_eq!(format_significant(1.0e20, 16), "1e+20");
        assert_eq!(format_significant(123456.0, 3), "1.23e+05");
    }

    #[test]
    fn test_format_rounding_moves_exponent() {
        assert_eq!(format_significant(9.99996, 4), "10");
        assert_eq!(format_significant(99999.7, 5), "1e+05");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_significant(f64::NAN, 16), "nan");
        assert_eq!(format_significant(f64::NEG_INFINITY, 16), "-inf");
    }
}
