use std::collections::BTreeMap;

/// Occurrence count per byte value, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, usize>,
}

impl FrequencyTable {
    /// Counts every byte of `bytes` in a single pass.
    pub fn sample(bytes: &[u8]) -> Self {
        let mut histogram = [0usize; 256];
        for &byte in bytes {
            histogram[byte as usize] += 1;
        }

        let counts = histogram
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
            .collect();

        FrequencyTable { counts }
    }

    pub fn get(&self, symbol: u8) -> Option<usize> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the sampled buffer length.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<(u8, usize)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, usize)>>(iter: I) -> Self {
        let counts = iter.into_iter().filter(|&(_, count)| count > 0).collect();
        FrequencyTable { counts }
    }
}
