//! Fat/SNF based pricing.
//!
//! Each farmer category has one formula row: a base price plus weight
//! coefficients for fat and SNF. The formula is advisory: the save path
//! stores whatever rate the operator confirmed, and callers that want the
//! formula price ask for it explicitly.

use crate::db::RateEntry;

/// Baseline readings at which milk is worth exactly the base price.
pub const REFERENCE_FAT: f64 = 3.5;
pub const REFERENCE_SNF: f64 = 8.5;

pub const FAT_MIN: f64 = 2.0;
pub const FAT_MAX: f64 = 8.0;
pub const SNF_MIN: f64 = 7.0;
pub const SNF_MAX: f64 = 9.5;

/// Per-litre rate for the given readings under a category formula.
pub fn compute_rate(formula: &RateEntry, fat: f64, snf: f64) -> f64 {
    formula.base
        + formula.fat_rate * (fat - REFERENCE_FAT)
        + formula.snf_rate * (snf - REFERENCE_SNF)
}

/// Checks a fat reading against the accepted biological range.
pub fn validate_fat(fat: f64) -> Result<(), String> {
    if !(FAT_MIN..=FAT_MAX).contains(&fat) {
        return Err(format!(
            "Invalid FAT value! FAT must be between {:.1} and {:.1}",
            FAT_MIN, FAT_MAX
        ));
    }
    Ok(())
}

/// Checks an SNF reading against the accepted biological range.
pub fn validate_snf(snf: f64) -> Result<(), String> {
    if !(SNF_MIN..=SNF_MAX).contains(&snf) {
        return Err(format!(
            "Invalid SNF value! SNF must be between {:.1} and {:.1}",
            SNF_MIN, SNF_MAX
        ));
    }
    Ok(())
}

/// The shift toggle: two states, no terminal state.
pub fn next_shift(current: &str) -> &'static str {
    if current == "Morning" {
        "Evening"
    } else {
        "Morning"
    }
}
