use crate::error::{NeuroError, Result};
use serde::{Deserialize, Serialize};

/// Layer widths `[n0, n1, ..., nk]` of a fixed feedforward network.
///
/// `n0` is the input width and `nk` the output width. Holds at least two
/// entries, all non-zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct LayerSizes(Vec<usize>);

impl LayerSizes {
    pub fn new(sizes: Vec<usize>) -> Result<Self> {
        if sizes.len() < 2 || sizes.contains(&0) {
            return Err(NeuroError::InvalidTopology(sizes));
        }
        Ok(Self(sizes))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn input_width(&self) -> usize {
        self.0[0]
    }

    #[must_use]
    pub fn output_width(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    /// Number of weight matrices, one less than the number of layer widths.
    #[must_use]
    pub fn num_layers(&self) -> usize {
        self.0.len() - 1
    }

    /// `(fan_in, fan_out)` for every weight matrix, input side first.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    pub(crate) fn ensure_same(&self, other: &LayerSizes) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(NeuroError::TopologyMismatch {
                expected: self.0.clone(),
                got: other.0.clone(),
            })
        }
    }
}

impl TryFrom<Vec<usize>> for LayerSizes {
    type Error = NeuroError;

    fn try_from(sizes: Vec<usize>) -> Result<Self> {
        Self::new(sizes)
    }
}

impl From<LayerSizes> for Vec<usize> {
    fn from(sizes: LayerSizes) -> Self {
        sizes.0
    }
}

impl AsRef<[usize]> for LayerSizes {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_and_zero_width_topologies() {
        assert!(LayerSizes::new(vec![]).is_err());
        assert!(LayerSizes::new(vec![4]).is_err());
        assert!(LayerSizes::new(vec![4, 0, 2]).is_err());
    }

    #[test]
    fn reports_widths() {
        let sizes = LayerSizes::new(vec![5, 6, 4, 2]).unwrap();
        assert_eq!(sizes.input_width(), 5);
        assert_eq!(sizes.output_width(), 2);
        assert_eq!(sizes.num_layers(), 3);
        assert_eq!(sizes.pairs().collect::<Vec<_>>(), vec![(5, 6), (6, 4), (4, 2)]);
    }

    #[test]
    fn deserializing_validates() {
        let ok: LayerSizes = serde_json::from_str("[3, 2]").unwrap();
        assert_eq!(ok.as_slice(), &[3, 2]);
        assert!(serde_json::from_str::<LayerSizes>("[3]").is_err());
    }
}
