use crate::consts::MIN_PRIMER_LEN;
use crate::error::{EngineError, PfResult};
use poolforge_protocol::primer::Primer;

/// Base alphabet in code order: A=0, C=1, G=2, T=3.
///
/// The ordering is load-bearing: complements sit at mirrored positions, so
/// `x ^ y == 3` tests Watson-Crick complementarity and `3 - x` is the
/// complement of `x`.
const BASES: [u8; 4] = *b"ACGT";

/// A primer pair reduced to numeric form plus the per-primer scalars the
/// cost function consumes.
#[derive(Debug, Clone)]
pub struct EncodedPrimer {
    pub id: String,
    pub gene: String,
    pub fwd_codes: Vec<u8>,
    pub rev_codes: Vec<u8>,
    pub fwd_tm: f64,
    pub rev_tm: f64,
    pub avg_tm: f64,
    pub gc_content: f64,
    pub length: usize,
}

#[inline(always)]
pub fn encode_base(b: u8) -> Option<u8> {
    match b {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Inverse of the integer encoding; reproduces the normalized sequence.
pub fn decode(codes: &[u8]) -> String {
    codes.iter().map(|&c| BASES[c as usize] as char).collect()
}

/// Reverse complement in code space. A<->T and C<->G mirror around the
/// middle of the alphabet, so the complement of `c` is `3 - c`.
pub fn reverse_complement(codes: &[u8]) -> Vec<u8> {
    codes.iter().rev().map(|&c| 3 - c).collect()
}

/// Wallace rule: 2 degC per A/T, 4 degC per G/C. Only valid for short
/// oligos, which is all a multiplex panel uses; the cost function needs Tm
/// values that are comparable across primers, not calibrated ones.
pub fn wallace_tm(codes: &[u8]) -> f64 {
    let gc = codes.iter().filter(|&&c| c == 1 || c == 2).count();
    let at = codes.len() - gc;
    (2 * at + 4 * gc) as f64
}

fn gc_count(codes: &[u8]) -> usize {
    codes.iter().filter(|&&c| c == 1 || c == 2).count()
}

fn encode_strand(id: &str, seq: &str) -> PfResult<Vec<u8>> {
    let trimmed = seq.trim();
    let mut codes = Vec::with_capacity(trimmed.len());
    for b in trimmed.bytes() {
        let code = encode_base(b.to_ascii_uppercase()).ok_or_else(|| {
            EngineError::InvalidSequence { id: id.to_string() }
        })?;
        codes.push(code);
    }
    if codes.len() < MIN_PRIMER_LEN {
        return Err(EngineError::InvalidSequence { id: id.to_string() });
    }
    Ok(codes)
}

/// Encodes a primer list in input order. Fails on the first malformed
/// sequence, naming the offending primer.
pub fn encode_primers(primers: &[Primer]) -> PfResult<Vec<EncodedPrimer>> {
    let mut encoded = Vec::with_capacity(primers.len());
    for primer in primers {
        let fwd_codes = encode_strand(&primer.id, &primer.forward)?;
        let rev_codes = encode_strand(&primer.id, &primer.reverse)?;

        let fwd_tm = wallace_tm(&fwd_codes);
        let rev_tm = wallace_tm(&rev_codes);

        // GC is reported over both strands combined; length is the
        // forward strand.
        let gc = gc_count(&fwd_codes) + gc_count(&rev_codes);
        let total_len = fwd_codes.len() + rev_codes.len();
        let gc_content = 100.0 * gc as f64 / total_len as f64;

        encoded.push(EncodedPrimer {
            id: primer.id.clone(),
            gene: primer.gene.clone(),
            length: fwd_codes.len(),
            fwd_tm,
            rev_tm,
            avg_tm: (fwd_tm + rev_tm) / 2.0,
            gc_content,
            fwd_codes,
            rev_codes,
        });
    }
    Ok(encoded)
}
