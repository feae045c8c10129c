//! Prefix-length normalization for RIR delegation records.
//!
//! The RIR statistics exchange format reports allocation sizes
//! asymmetrically: IPv4 rows carry a host count, IPv6 rows carry the prefix
//! length directly. Only IPv4 needs arithmetic; IPv6 values pass through
//! unchanged. Collapsing the two would be a correctness bug, not a
//! simplification.

/// Convert an IPv4 allocation size (host count) to a CIDR prefix length.
///
/// `32 - floor(log2(size))`, clamped to 0 for oversized allocations. A size
/// of 0 never appears in well-formed registry data; it maps to /32 (a single
/// host) as a guard against malformed input.
pub fn ipv4_prefix(size: u64) -> u32 {
    if size == 0 {
        return 32;
    }
    32u32.saturating_sub(size.ilog2())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powers_of_two_map_to_exact_prefixes() {
        for exp in 0..=32u32 {
            let size = 1u64 << exp;
            assert_eq!(ipv4_prefix(size), 32 - exp, "size 2^{exp}");
        }
    }

    #[test]
    fn zero_size_is_a_single_host() {
        assert_eq!(ipv4_prefix(0), 32);
    }

    #[test]
    fn common_allocation_sizes() {
        assert_eq!(ipv4_prefix(256), 24);
        assert_eq!(ipv4_prefix(65536), 16);
        assert_eq!(ipv4_prefix(16_777_216), 8);
    }

    #[test]
    fn non_power_of_two_truncates() {
        // floor(log2(768)) == 9
        assert_eq!(ipv4_prefix(768), 23);
        assert_eq!(ipv4_prefix(3), 31);
    }

    #[test]
    fn oversized_allocations_clamp_to_zero() {
        assert_eq!(ipv4_prefix(1u64 << 32), 0);
        assert_eq!(ipv4_prefix(u64::MAX), 0);
    }
}
