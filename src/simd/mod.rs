//! Runtime SIMD feature detection and the vector kernels.
//!
//! All kernels in this crate require AVX2. Runtime CPU feature detection is
//! used to select the vector path; the result is cached after the first
//! call. Callers check [`has_avx2`] and fall back to the scalar path on
//! older hardware; non-x86 targets compile the scalar path only. The scalar
//! and vector paths share their validation tables, so a given input produces
//! the same result on every host.

use std::sync::OnceLock;

pub(crate) mod x86_64;

// CPU feature detection cache
static HAS_AVX2: OnceLock<bool> = OnceLock::new();

/// Check if AVX2 is available (cached after first call).
pub(crate) fn has_avx2() -> bool {
    *HAS_AVX2.get_or_init(|| is_x86_feature_detected!("avx2"))
}
