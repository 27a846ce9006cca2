//! Bloom filter sizing
//!
//! With `m` bits, `k` hashes and `x` inserted keys:
//! - FPR = (1 - e^(-k*x/m))^k
//! - optimal m = -x*ln(fpr) / (ln(2)^2)
//! - optimal k = (m/x) * ln(2)

use std::f64::consts::LN_2;

/// Upper bound applied to derived hash counts
pub const MAX_DERIVED_HASH_COUNT: u32 = 32;

/// Sizing derived from an expected load
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParams {
    /// Number of bits in the filter (n)
    pub capacity_bits: u64,
    /// Number of hash functions (k)
    pub hash_count: u32,
    /// False positive rate expected at the target load
    pub expected_fpr: f64,
}

/// Calculate the smallest filter meeting `target_fpr` at `expected_elements`
pub fn calculate_optimal_parameters(expected_elements: u64, target_fpr: f64) -> FilterParams {
    if expected_elements == 0 {
        return FilterParams {
            capacity_bits: 1,
            hash_count: 1,
            expected_fpr: 1.0,
        };
    }

    let m = minimum_bits(expected_elements, target_fpr).max(1);
    let k = optimal_k(m, expected_elements).clamp(1, MAX_DERIVED_HASH_COUNT);

    FilterParams {
        capacity_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, expected_elements, k),
    }
}

/// False positive rate for `m` bits, `elements` inserted keys and `k` hashes
pub fn calculate_fpr(m: u64, elements: u64, k: u32) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (elements as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Optimal k for `m` bits and `elements` keys
pub fn optimal_k(m: u64, elements: u64) -> u32 {
    if elements == 0 {
        return 1;
    }
    ((m as f64 / elements as f64) * LN_2).round() as u32
}

/// Minimum m for `elements` keys at `target_fpr`
pub fn minimum_bits(elements: u64, target_fpr: f64) -> u64 {
    let ln2_squared = LN_2 * LN_2;
    (-(elements as f64) * target_fpr.ln() / ln2_squared).ceil() as u64
}
