//! Shared helpers for the integration tests

#![allow(dead_code)]

use membership_filter::{FilterError, MembershipFilter};

/// Put `r0..r{n}`, then probe them plus `rr0..rr{n}` and return the share of
/// correct answers
pub fn hit_rate<F: MembershipFilter>(filter: &mut F, n: usize) -> Result<f64, FilterError> {
    for i in 0..n {
        filter.put_str(&format!("r{}", i))?;
    }

    let mut misses = 0;
    for i in 0..n {
        if !filter.has_str(&format!("r{}", i))? {
            misses += 1;
        }
        if filter.has_str(&format!("rr{}", i))? {
            misses += 1;
        }
    }

    Ok((n as f64 - misses as f64) / n as f64)
}

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
