//! Property-based tests for archive planning and path filtering.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::pack::chunk::{plan, ChunkPolicy};
    use crate::path::PathFilter;
    use proptest::prelude::*;

    fn policy_strategy() -> impl Strategy<Value = ChunkPolicy> {
        (1u64..500, 1u64..500, any::<bool>()).prop_map(|(target_size, hard_cap, enforce_target)| {
            ChunkPolicy {
                target_size,
                hard_cap,
                enforce_target,
            }
        })
    }

    // ============================================================================
    // plan property tests
    // ============================================================================

    proptest! {
        /// Property: every file lands in exactly one chunk, in input order
        #[test]
        fn plan_covers_input_once(
            sizes in prop::collection::vec(0u64..300, 0..60),
            policy in policy_strategy(),
        ) {
            let chunks = plan(&sizes, policy);
            let mut next = 0;
            for chunk in &chunks {
                prop_assert_eq!(chunk.start, next);
                prop_assert!(chunk.end > chunk.start, "no empty chunks");
                next = chunk.end;
            }
            prop_assert_eq!(next, sizes.len());
        }

        /// Property: indices are contiguous starting at 1
        #[test]
        fn plan_indices_contiguous(
            sizes in prop::collection::vec(0u64..300, 0..60),
            policy in policy_strategy(),
        ) {
            let chunks = plan(&sizes, policy);
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.index, i + 1);
            }
        }

        /// Property: a chunk exceeds the hard cap only when it holds a single
        /// oversized file
        #[test]
        fn plan_respects_hard_cap(
            sizes in prop::collection::vec(0u64..300, 0..60),
            policy in policy_strategy(),
        ) {
            for chunk in plan(&sizes, policy) {
                let total: u64 = sizes[chunk.start..chunk.end].iter().sum();
                prop_assert_eq!(total, chunk.total_bytes);
                if total > policy.hard_cap {
                    prop_assert_eq!(chunk.len(), 1, "chunk {:?} over cap", chunk);
                }
            }
        }

        /// Property: planning is deterministic
        #[test]
        fn plan_is_deterministic(
            sizes in prop::collection::vec(0u64..300, 0..60),
            policy in policy_strategy(),
        ) {
            prop_assert_eq!(plan(&sizes, policy), plan(&sizes, policy));
        }

        /// Property: with the soft target off, no two adjacent chunks could
        /// have been merged under the cap
        #[test]
        fn plan_is_greedy_without_target(
            sizes in prop::collection::vec(0u64..300, 1..60),
            hard_cap in 1u64..500,
        ) {
            let policy = ChunkPolicy { target_size: 0, hard_cap, enforce_target: false };
            let chunks = plan(&sizes, policy);
            for pair in chunks.windows(2) {
                let first_of_next = sizes[pair[1].start];
                prop_assert!(pair[0].total_bytes + first_of_next > hard_cap);
            }
        }
    }

    // ============================================================================
    // PathFilter property tests
    // ============================================================================

    proptest! {
        /// Property: any path built on an allowed prefix is allowed
        #[test]
        fn filter_allows_anything_under_prefix(rest in "[a-z0-9_/.]{0,30}") {
            let filter = PathFilter::default();
            for prefix in filter.prefixes().to_vec() {
                let path = format!("{}{}", prefix, rest);
                prop_assert!(filter.allows(&path));
            }
        }

        /// Property: paths starting with an unlisted directory are rejected
        #[test]
        fn filter_rejects_other_roots(rest in "[a-z0-9_/.]{0,30}") {
            let filter = PathFilter::default();
            let path = format!("vendor/{}", rest);
            prop_assert!(!filter.allows(&path));
        }
    }
}
