//! Physical constants used by the free-energy estimator.
//!
//! Values are fixed and exact as written; they are built as decimals so that
//! energy arithmetic never passes through binary floating point.

use bigdecimal::BigDecimal;
use std::sync::LazyLock;

/// Simulation temperature in K.
pub static TEMPERATURE: LazyLock<BigDecimal> = LazyLock::new(|| BigDecimal::new(31015.into(), 2));
/// Boltzmann constant in J/K.
pub static BOLTZMANN: LazyLock<BigDecimal> =
    LazyLock::new(|| BigDecimal::new(13806488.into(), 30));
/// Avogadro constant in 1/mol.
pub static AVOGADRO: LazyLock<BigDecimal> =
    LazyLock::new(|| BigDecimal::new(60221413.into(), -16));
/// Hartree to Joule.
pub static HARTREE_TO_JOULE: LazyLock<BigDecimal> =
    LazyLock::new(|| BigDecimal::new(43597482.into(), 25));
/// Joule to kcal.
pub static JOULE_TO_KCAL: LazyLock<BigDecimal> =
    LazyLock::new(|| BigDecimal::new(239005736.into(), 12));
/// Thermochemical kJ per kcal, used for the per-sample energy series.
pub static KJ_PER_KCAL: LazyLock<BigDecimal> = LazyLock::new(|| BigDecimal::new(4184.into(), 3));

/// k_B * T in J.
pub fn thermal_energy() -> BigDecimal {
    &*BOLTZMANN * &*TEMPERATURE
}

/// Factor turning `-ln(<exp(-dE/kT)>)` into kcal/mol: k_B * T * N_A * JKCAL.
pub fn molar_kcal_factor() -> BigDecimal {
    thermal_energy() * &*AVOGADRO * &*JOULE_TO_KCAL
}

#[cfg(test)]
mod tests {
    use super::{
        AVOGADRO, BOLTZMANN, HARTREE_TO_JOULE, JOULE_TO_KCAL, KJ_PER_KCAL, TEMPERATURE,
        molar_kcal_factor, thermal_energy,
    };
    use num_traits::ToPrimitive;

    fn as_f64(value: &bigdecimal::BigDecimal) -> f64 {
        value.to_f64().expect("constant should convert to f64")
    }

    #[test]
    fn constants_match_literal_values() {
        let cases = [
            (as_f64(&TEMPERATURE), 310.15),
            (as_f64(&BOLTZMANN), 1.3806488e-23),
            (as_f64(&AVOGADRO), 6.0221413e23),
            (as_f64(&HARTREE_TO_JOULE), 4.3597482e-18),
            (as_f64(&JOULE_TO_KCAL), 0.000239005736),
            (as_f64(&KJ_PER_KCAL), 4.184),
        ];

        for (actual, expected) in cases {
            assert!(
                ((actual - expected) / expected).abs() <= 1.0e-14,
                "{actual} != {expected}"
            );
        }
    }

    #[test]
    fn derived_factors_are_consistent() {
        let kt = as_f64(&thermal_energy());
        assert!((kt / (1.3806488e-23 * 310.15) - 1.0).abs() <= 1.0e-14);

        // R * T in kcal/mol at 310.15 K is roughly 0.6163.
        let rt = as_f64(&molar_kcal_factor());
        assert!((rt - 0.616_33).abs() <= 1.0e-4, "RT = {rt}");
    }
}
