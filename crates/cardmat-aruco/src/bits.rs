//! Square 0/1 bit matrix of a marker interior.

use serde::{Deserialize, Serialize};

/// Row-major `size x size` matrix of bits, `1` = foreground (raised), `0` = background (recessed).
///
/// Serializes as a list of rows (`[[1,0,...],...]`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<u8>>", try_from = "Vec<Vec<u8>>")]
pub struct BitMatrix {
    size: usize,
    bits: Vec<u8>,
}

impl BitMatrix {
    /// Build from row-major bits. Returns `None` unless `bits.len() == size * size`
    /// and every value is 0 or 1.
    pub fn from_bits(size: usize, bits: Vec<u8>) -> Option<Self> {
        if bits.len() != size * size || bits.iter().any(|&b| b > 1) {
            return None;
        }
        Some(Self { size, bits })
    }

    /// Unpack a row-major code (`idx = row * size + col`, black = 1).
    pub fn from_code(code: u64, size: usize) -> Option<Self> {
        if size * size > 64 {
            return None;
        }
        let bits = (0..size * size)
            .map(|idx| ((code >> idx) & 1) as u8)
            .collect();
        Some(Self { size, bits })
    }

    /// Pack into the row-major code layout used by `calib-targets-aruco`.
    pub fn to_code(&self) -> Option<u64> {
        if self.bits.len() > 64 {
            return None;
        }
        Some(
            self.bits
                .iter()
                .enumerate()
                .fold(0u64, |acc, (idx, &b)| acc | (u64::from(b) << idx)),
        )
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(self.bits[row * self.size + col])
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        // chunks(0) panics; an empty matrix simply has no rows
        self.bits.chunks(self.size.max(1))
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }
}

impl From<BitMatrix> for Vec<Vec<u8>> {
    fn from(m: BitMatrix) -> Self {
        m.rows().map(<[u8]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for BitMatrix {
    type Error = String;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        if let Some(bad) = rows.iter().position(|r| r.len() != size) {
            return Err(format!(
                "row {bad} has {} entries, expected {size}",
                rows[bad].len()
            ));
        }
        let bits: Vec<u8> = rows.into_iter().flatten().collect();
        BitMatrix::from_bits(size, bits).ok_or_else(|| "bit values must be 0 or 1".to_string())
    }
}
