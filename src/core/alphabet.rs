// alphabet.rs - Nucleotide alphabet and normalization

/// Nucleotide symbol after normalization.
///
/// Codes start at 1: a zero value inside a sparse matrix is indistinguishable
/// from an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Base {
    A = 1,
    C = 2,
    G = 3,
    T = 4,
    /// Ambiguous or unreadable base (N, IUPAC ambiguity codes, artifacts).
    Unknown = 5,
    /// Alignment gap, only kept apart under `GapPolicy::Distinct`.
    Gap = 6,
}

/// How `-` symbols are treated during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapPolicy {
    /// Coerce gaps to `Unknown`, so gap runs count as masked positions.
    AsUnknown,
    /// Keep gaps as their own symbol.
    Distinct,
}

impl Base {
    /// Numeric code stored in sparse SNP matrices.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for bases that cannot be meaningfully compared.
    pub fn is_unknown(self) -> bool {
        matches!(self, Base::Unknown)
    }
}

/// Normalize a raw symbol: case-insensitive, everything outside ACGT
/// collapses to `Unknown` (gaps excepted under `GapPolicy::Distinct`).
pub fn normalize(symbol: u8, policy: GapPolicy) -> Base {
    match symbol.to_ascii_lowercase() {
        b'a' => Base::A,
        b'c' => Base::C,
        b'g' => Base::G,
        b't' => Base::T,
        b'-' if policy == GapPolicy::Distinct => Base::Gap,
        _ => Base::Unknown,
    }
}

/// Normalize a whole symbol slice.
pub fn normalize_sequence(symbols: &[u8], policy: GapPolicy) -> Vec<Base> {
    symbols.iter().map(|&s| normalize(s, policy)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_canonical_bases() {
        assert_eq!(normalize(b'a', GapPolicy::AsUnknown), Base::A);
        assert_eq!(normalize(b'C', GapPolicy::AsUnknown), Base::C);
        assert_eq!(normalize(b'g', GapPolicy::AsUnknown), Base::G);
        assert_eq!(normalize(b'T', GapPolicy::AsUnknown), Base::T);
    }

    #[test]
    fn test_normalize_ambiguity_codes() {
        // IUPAC ambiguity codes and anything unexpected collapse to Unknown
        for symbol in [b'n', b'N', b'r', b'y', b'w', b'?', b'x'] {
            assert_eq!(normalize(symbol, GapPolicy::AsUnknown), Base::Unknown);
        }
    }

    #[test]
    fn test_normalize_gap_policy() {
        assert_eq!(normalize(b'-', GapPolicy::AsUnknown), Base::Unknown);
        assert_eq!(normalize(b'-', GapPolicy::Distinct), Base::Gap);
    }

    #[test]
    fn test_codes_are_nonzero() {
        let all = [Base::A, Base::C, Base::G, Base::T, Base::Unknown, Base::Gap];
        for base in all {
            assert!(base.code() > 0);
        }
    }

    #[test]
    fn test_normalize_sequence() {
        let normalized = normalize_sequence(b"acGT-n", GapPolicy::AsUnknown);
        assert_eq!(
            normalized,
            vec![
                Base::A,
                Base::C,
                Base::G,
                Base::T,
                Base::Unknown,
                Base::Unknown
            ]
        );
    }
}
