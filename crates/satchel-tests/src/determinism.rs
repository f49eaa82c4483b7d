//! Determinism checks for generated bundles.
//!
//! A generation run must produce byte-identical documents for identical
//! inputs. [`verify_determinism`] runs a producer several times and compares
//! the BLAKE3 hash of each output.

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run.
    pub hash: String,
    /// Index of the first run whose output differed.
    pub first_mismatch: Option<usize>,
}

/// Hex-encoded BLAKE3 hash of `data`.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Runs `produce` `runs` times and compares the outputs.
///
/// # Panics
///
/// Panics if `runs` is less than 2.
pub fn verify_determinism<F>(mut produce: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> Vec<u8>,
{
    assert!(runs >= 2, "determinism needs at least two runs");

    let hash = compute_hash(&produce());
    let first_mismatch = (1..runs).find(|_| compute_hash(&produce()) != hash);

    DeterminismResult {
        is_deterministic: first_mismatch.is_none(),
        runs,
        hash,
        first_mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_output_is_deterministic() {
        let result = verify_determinism(|| b"same".to_vec(), 3);
        assert!(result.is_deterministic);
        assert_eq!(result.hash, compute_hash(b"same"));
    }

    #[test]
    fn test_counter_output_is_not() {
        let mut n = 0u8;
        let result = verify_determinism(
            || {
                n += 1;
                vec![n]
            },
            3,
        );
        assert!(!result.is_deterministic);
        assert_eq!(result.first_mismatch, Some(1));
    }
}
