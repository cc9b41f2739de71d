// distance.rs - Masked-aware SNP distances between sequence sets

use ndarray::{Array1, Array2, Axis};
use sprs::{CsMat, TriMat};

use crate::core::alphabet::Base;
use crate::core::encoder::SnpMatrix;

/// Closest focal sequence found for one context sequence.
#[derive(Debug, Clone)]
pub struct ClosestMatch {
    pub name: String,
    pub closest: String,
    pub distance: f64,
}

/// Calculate the dense distance matrix between two SNP-encoded sequence sets.
///
/// Entry (i, j) counts the alignment positions where sequence i of `a` and
/// sequence j of `b` are both readable and carry different bases. A position
/// masked in either sequence is excluded: it is neither a match nor a
/// mismatch. Positions where both sequences carry the same non-reference base
/// are no difference at all.
///
/// Every per-pair aggregate is a whole-matrix sparse product, so the cost
/// scales with the number of stored SNPs and masked runs rather than with
/// rows(a) * rows(b) * alignment length.
pub fn calculate_distance_matrix(a: &SnpMatrix, b: &SnpMatrix) -> Result<Array2<f64>, String> {
    if a.alignment_length() != b.alignment_length() {
        return Err(format!(
            "Alignment lengths differ: {} vs {}",
            a.alignment_length(),
            b.alignment_length()
        ));
    }

    // Start from the per-row SNP totals of both sides. Each correction below
    // cancels the positions that are not a real difference, leaving exactly
    // one count per readable differing position.
    let mut distances = Array2::<f64>::zeros((a.len(), b.len()));
    distances += &row_nnz(&a.snps).insert_axis(Axis(1));
    distances += &row_nnz(&b.snps).insert_axis(Axis(0));

    // Positions noteworthy on both sides (SNP or masked) were counted once
    // per SNP side; remove the overlap so each such position nets to at most
    // one
    let noteworthy_b = transposed(&noteworthy_indicator(b));
    accumulate_product(&mut distances, &noteworthy_indicator(a), &noteworthy_b, -1.0);

    // Identical SNP bases on both sides are agreements, not differences
    for base in [Base::A, Base::C, Base::G, Base::T] {
        let indicator_b = transposed(&base_indicator(&b.snps, base));
        accumulate_product(
            &mut distances,
            &base_indicator(&a.snps, base),
            &indicator_b,
            -1.0,
        );
    }

    // Positions masked on both sides were over-cancelled by the noteworthy
    // term; restore them to zero
    let masked_b = transposed(&masked_indicator(b));
    accumulate_product(&mut distances, &masked_indicator(a), &masked_b, 1.0);

    Ok(distances)
}

/// Pick the closest focal sequence for every context sequence.
///
/// Candidates are ranked by raw distance plus the focal sequence's masked
/// fraction, steering the choice away from heavily masked focal sequences
/// without touching the reported value. The penalty is deliberately one-sided:
/// context masking plays no part in it. Ties go to the lowest focal index.
pub fn closest_matches(context: &SnpMatrix, focal: &SnpMatrix) -> Result<Vec<ClosestMatch>, String> {
    if focal.is_empty() {
        return Err("Focal set contains no sequences".to_string());
    }

    let distances = calculate_distance_matrix(context, focal)?;
    let alignment_length = focal.alignment_length() as f64;
    let penalties: Vec<f64> = focal
        .masked
        .iter()
        .map(|positions| positions.len() as f64 / alignment_length)
        .collect();

    let mut matches = Vec::with_capacity(context.len());
    for (row, name) in context.names.iter().enumerate() {
        let mut best = 0usize;
        let mut best_adjusted = f64::INFINITY;
        for (col, penalty) in penalties.iter().enumerate() {
            let adjusted = distances[[row, col]] + penalty;
            if adjusted < best_adjusted {
                best_adjusted = adjusted;
                best = col;
            }
        }
        matches.push(ClosestMatch {
            name: name.clone(),
            closest: focal.names[best].clone(),
            distance: distances[[row, best]],
        });
    }

    Ok(matches)
}

/// Per-row non-zero counts as a dense vector.
fn row_nnz(matrix: &CsMat<u8>) -> Array1<f64> {
    Array1::from(
        matrix
            .outer_iterator()
            .map(|row| row.nnz() as f64)
            .collect::<Vec<_>>(),
    )
}

/// 0/1 matrix marking the cells of `matrix` holding exactly `base`.
fn base_indicator(matrix: &CsMat<u8>, base: Base) -> CsMat<f64> {
    let code = base.code();
    let mut triplets = TriMat::new(matrix.shape());
    for (&value, (row, col)) in matrix.iter() {
        if value == code {
            triplets.add_triplet(row, col, 1.0);
        }
    }
    triplets.to_csr()
}

/// 0/1 matrix with one entry per masked position.
fn masked_indicator(matrix: &SnpMatrix) -> CsMat<f64> {
    let mut triplets = TriMat::new((matrix.len(), matrix.alignment_length()));
    for (row, positions) in matrix.masked.iter().enumerate() {
        for &col in positions {
            triplets.add_triplet(row, col, 1.0);
        }
    }
    triplets.to_csr()
}

/// 0/1 matrix marking every noteworthy position: stored SNPs and masked
/// positions together. The two sets are disjoint by construction, so no cell
/// exceeds one.
fn noteworthy_indicator(matrix: &SnpMatrix) -> CsMat<f64> {
    let mut triplets = TriMat::new((matrix.len(), matrix.alignment_length()));
    for (_, (row, col)) in matrix.snps.iter() {
        triplets.add_triplet(row, col, 1.0);
    }
    for (row, positions) in matrix.masked.iter().enumerate() {
        for &col in positions {
            triplets.add_triplet(row, col, 1.0);
        }
    }
    triplets.to_csr()
}

/// Transposed copy in row storage, ready as the right operand of a product.
fn transposed(matrix: &CsMat<f64>) -> CsMat<f64> {
    matrix.transpose_view().to_csr()
}

/// Accumulate `sign * (left x right)` into `target`.
fn accumulate_product(target: &mut Array2<f64>, left: &CsMat<f64>, right: &CsMat<f64>, sign: f64) {
    let product = left * right;
    for (&value, (row, col)) in product.iter() {
        target[[row, col]] += sign * value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alphabet::{normalize_sequence, GapPolicy};
    use crate::core::encoder::{ReferenceSource, SequenceRecord, SnpEncoder};

    fn records(entries: &[(&str, &str)]) -> Vec<Result<SequenceRecord, String>> {
        entries
            .iter()
            .map(|(id, seq)| Ok(SequenceRecord::new(*id, seq.as_bytes())))
            .collect()
    }

    fn encode(reference: &str, entries: &[(&str, &str)]) -> SnpMatrix {
        let consensus = normalize_sequence(reference.as_bytes(), GapPolicy::AsUnknown);
        SnpEncoder::new()
            .encode(
                records(entries).into_iter(),
                ReferenceSource::Supplied(&consensus),
                None,
            )
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_distance_equals_snp_count_against_reference_identical_row() {
        let context = encode("acgtacgt", &[("two_snps", "tcgtacga")]);
        let focal = encode("acgtacgt", &[("like_reference", "acgtacgt")]);

        let distances = calculate_distance_matrix(&context, &focal).unwrap();
        assert_eq!(distances[[0, 0]], 2.0);
    }

    #[test]
    fn test_distance_matrix_is_symmetric() {
        let left = encode(
            "acgtacgt",
            &[("l1", "tcgtacgt"), ("l2", "acntacga"), ("l3", "acgtacgt")],
        );
        let right = encode(
            "acgtacgt",
            &[("r1", "acgaacnt"), ("r2", "nngtacgt"), ("r3", "tcgtacga")],
        );

        let forward = calculate_distance_matrix(&left, &right).unwrap();
        let backward = calculate_distance_matrix(&right, &left).unwrap();

        for row in 0..left.len() {
            for col in 0..right.len() {
                assert_eq!(forward[[row, col]], backward[[col, row]]);
            }
        }
    }

    #[test]
    fn test_identical_sequences_with_masked_positions_are_distance_zero() {
        let a = encode("acgtacgt", &[("a", "aTntacnt")]);
        let b = encode("acgtacgt", &[("b", "aTntacnt")]);

        let distances = calculate_distance_matrix(&a, &b).unwrap();
        assert_eq!(distances[[0, 0]], 0.0);
    }

    #[test]
    fn test_masked_position_never_counts_as_difference() {
        // Position 2 is masked on one side and a SNP on the other; position 5
        // is masked on one side and reference-identical on the other
        let a = encode("acgtacgt", &[("a", "acntacgt")]);
        let b = encode("acgtacgt", &[("b", "acTtangt")]);

        let distances = calculate_distance_matrix(&a, &b).unwrap();
        assert_eq!(distances[[0, 0]], 0.0);
    }

    #[test]
    fn test_disagreeing_snps_count_once() {
        let a = encode("acgt", &[("a", "Tcgt")]);
        let b = encode("acgt", &[("b", "Gcgt")]);

        let distances = calculate_distance_matrix(&a, &b).unwrap();
        assert_eq!(distances[[0, 0]], 1.0);
    }

    #[test]
    fn test_mismatched_alignment_lengths_fail() {
        let short = encode("acgt", &[("s", "acga")]);
        let long = encode("acgtacgt", &[("l", "acgtacga")]);

        assert!(calculate_distance_matrix(&short, &long).is_err());
    }

    #[test]
    fn test_end_to_end_closest_focal_sequence() {
        let focal = encode("acgt", &[("focal_1", "acgt")]);
        let context = encode("acgt", &[("context_1", "acga"), ("context_2", "acnt")]);

        let results = closest_matches(&context, &focal).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "context_1");
        assert_eq!(results[0].closest, "focal_1");
        assert_eq!(results[0].distance, 1.0);
        assert_eq!(results[1].name, "context_2");
        assert_eq!(results[1].closest, "focal_1");
        assert_eq!(results[1].distance, 0.0);
    }

    #[test]
    fn test_selection_prefers_less_masked_focal_sequence() {
        // Both focal sequences are raw distance 0 from the context sequence;
        // the masked fraction decides
        let focal = encode("acgt", &[("heavily_masked", "acnn"), ("lightly_masked", "acgn")]);
        let context = encode("acgt", &[("probe", "acgt")]);

        let results = closest_matches(&context, &focal).unwrap();
        assert_eq!(results[0].closest, "lightly_masked");
        assert_eq!(results[0].distance, 0.0);
    }

    #[test]
    fn test_selection_tie_breaks_to_first_focal_sequence() {
        let focal = encode("acgt", &[("first", "acgt"), ("second", "acgt")]);
        let context = encode("acgt", &[("probe", "aagt")]);

        let results = closest_matches(&context, &focal).unwrap();
        assert_eq!(results[0].closest, "first");
        assert_eq!(results[0].distance, 1.0);
    }

    #[test]
    fn test_reported_distance_is_raw_not_penalized() {
        let focal = encode("acgt", &[("masked_focal", "nngt")]);
        let context = encode("acgt", &[("probe", "acgt")]);

        let results = closest_matches(&context, &focal).unwrap();
        assert_eq!(results[0].distance, 0.0);
    }

    #[test]
    fn test_chunked_results_match_single_pass() {
        let consensus = normalize_sequence(b"acgtacgt", GapPolicy::AsUnknown);
        let focal = encode("acgtacgt", &[("f1", "acgtacga"), ("f2", "acgtacgt")]);
        let context_entries = [
            ("c1", "tcgtacgt"),
            ("c2", "acgtacnt"),
            ("c3", "acgaacga"),
            ("c4", "nngtacgt"),
            ("c5", "acgtacgt"),
        ];

        let whole = encode("acgtacgt", &context_entries);
        let single_pass = closest_matches(&whole, &focal).unwrap();

        let encoder = SnpEncoder::new();
        let mut stream = records(&context_entries).into_iter();
        let mut chunked = Vec::new();
        while let Some(chunk) = encoder
            .encode(&mut stream, ReferenceSource::Supplied(&consensus), Some(2))
            .unwrap()
        {
            chunked.extend(closest_matches(&chunk, &focal).unwrap());
        }

        assert_eq!(single_pass.len(), chunked.len());
        for (expected, actual) in single_pass.iter().zip(chunked.iter()) {
            assert_eq!(expected.name, actual.name);
            assert_eq!(expected.closest, actual.closest);
            assert_eq!(expected.distance, actual.distance);
        }
    }

    #[test]
    fn test_derived_reference_order_does_not_change_distances() {
        let encoder = SnpEncoder::new();
        let forward = encoder
            .encode(
                records(&[("s1", "acgtncgt"), ("s2", "tcgtacga")]).into_iter(),
                ReferenceSource::FirstRecord,
                None,
            )
            .unwrap()
            .unwrap();
        let reversed = encoder
            .encode(
                records(&[("s2", "tcgtacga"), ("s1", "acgtncgt")]).into_iter(),
                ReferenceSource::FirstRecord,
                None,
            )
            .unwrap()
            .unwrap();

        let d_forward = calculate_distance_matrix(&forward, &forward).unwrap();
        let d_reversed = calculate_distance_matrix(&reversed, &reversed).unwrap();

        // The derived consensus differs, the pairwise distance does not
        assert_ne!(forward.consensus, reversed.consensus);
        assert_eq!(d_forward[[0, 1]], d_reversed[[1, 0]]);
        assert_eq!(d_forward[[0, 1]], d_forward[[1, 0]]);
    }
}
