/// Day-of-year scaling of household reference curves.
///
/// The factor is the 4th-degree polynomial
/// `a4·d⁴ + a3·d³ + a2·d² + a1·d + a0` evaluated at the day of year `d`.
///
/// # Examples
///
/// ```
/// use slp_sim::profile::Dynamizer;
///
/// let f = Dynamizer::factor(1);
/// assert!(f > 1.2 && f < 1.3);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Dynamizer;

impl Dynamizer {
    pub const A4: f64 = -3.92e-10;
    pub const A3: f64 = 3.2e-7;
    pub const A2: f64 = -7.02e-5;
    pub const A1: f64 = 2.1e-3;
    pub const A0: f64 = 1.24;

    /// Scaling factor for `day_of_year` (1 = January 1st).
    pub fn factor(day_of_year: u32) -> f64 {
        let d = f64::from(day_of_year);
        // Horner form of the polynomial
        (((Self::A4 * d + Self::A3) * d + Self::A2) * d + Self::A1) * d + Self::A0
    }

    /// Returns `values` scaled elementwise by the factor of `day_of_year`.
    pub fn apply(values: &[f64], day_of_year: u32) -> Vec<f64> {
        let f = Self::factor(day_of_year);
        values.iter().map(|v| v * f).collect()
    }
}
