//! Nucleotide canonicalization and strand normalization.
//!
//! Sequences are plain byte vectors over `A`, `C`, `G`, `T` and `N`.

/// An owned nucleotide sequence, uppercase, over {A,C,G,T,N}.
pub type Sequence = Vec<u8>;

/// Maps every byte to its canonical base: uppercase ACGT stay, everything
/// else (lowercase soft-masking aside) becomes `N`.
const CANONICAL_ARRAY: [u8; 256] = {
    let mut arr = [b'N'; 256];
    arr[b'A' as usize] = b'A';
    arr[b'a' as usize] = b'A';
    arr[b'C' as usize] = b'C';
    arr[b'c' as usize] = b'C';
    arr[b'G' as usize] = b'G';
    arr[b'g' as usize] = b'G';
    arr[b'T' as usize] = b'T';
    arr[b't' as usize] = b'T';
    arr
};

/// Base -> complementary base. Unknown bytes complement to `N`.
const COMPLEMENT_ARRAY: [u8; 256] = {
    let mut arr = [b'N'; 256];
    arr[b'A' as usize] = b'T';
    arr[b'a' as usize] = b'T';
    arr[b'C' as usize] = b'G';
    arr[b'c' as usize] = b'G';
    arr[b'G' as usize] = b'C';
    arr[b'g' as usize] = b'C';
    arr[b'T' as usize] = b'A';
    arr[b't' as usize] = b'A';
    arr
};

/// Uppercase a sequence in place and replace non-ACGT bytes with `N`.
pub fn canonicalize_in_place(seq: &mut [u8]) {
    for b in seq.iter_mut() {
        *b = CANONICAL_ARRAY[*b as usize];
    }
}

pub fn canonicalize(seq: &[u8]) -> Sequence {
    seq.iter().map(|&b| CANONICAL_ARRAY[b as usize]).collect()
}

pub fn complement(base: u8) -> u8 {
    COMPLEMENT_ARRAY[base as usize]
}

///
/// Reverse complement a nucleotide sequence.
///
/// A<->T, C<->G, N<->N, read back to front. Applying it twice returns the
/// original canonical sequence.
///
pub fn reverse_complement(seq: &[u8]) -> Sequence {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(b"ACGT", b"ACGT")]
    #[case(b"AACG", b"CGTT")]
    #[case(b"GATTACA", b"TGTAATC")]
    #[case(b"ANNC", b"GNNT")]
    #[case(b"", b"")]
    fn test_reverse_complement(#[case] seq: &[u8], #[case] expected: &[u8]) {
        assert_eq!(reverse_complement(seq), expected.to_vec());
    }

    #[rstest]
    fn test_reverse_complement_is_an_involution() {
        // every 4-mer over the alphabet
        let alphabet = b"ACGTN";
        for a in alphabet {
            for b in alphabet {
                for c in alphabet {
                    for d in alphabet {
                        let seq = vec![*a, *b, *c, *d];
                        assert_eq!(reverse_complement(&reverse_complement(&seq)), seq);
                    }
                }
            }
        }
    }

    #[rstest]
    fn test_lowercase_is_complemented_to_uppercase() {
        assert_eq!(reverse_complement(b"acgt"), b"ACGT".to_vec());
    }

    #[rstest]
    fn test_canonicalize() {
        assert_eq!(canonicalize(b"acgtRYn-"), b"ACGTNNNN".to_vec());

        let mut seq = b"gAtc".to_vec();
        canonicalize_in_place(&mut seq);
        assert_eq!(seq, b"GATC".to_vec());
    }
}
