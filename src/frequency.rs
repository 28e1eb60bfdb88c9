use log::debug;

/// Occurrence count of every byte value in an input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        debug!(
            "Counted {} bytes over {} distinct symbols",
            data.len(),
            table.distinct()
        );
        table
    }

    /// Builds a table from `(symbol, count)` pairs. A later pair for the same
    /// symbol replaces the earlier one.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = Self::new();
        for (symbol, count) in entries {
            table.set(symbol, count);
        }
        table
    }

    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of symbols that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Shannon entropy of the distribution in bits per symbol.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total_f = total as f64;

        let entropy: f64 = self
            .iter()
            .map(|(_, count)| {
                let p = count as f64 / total_f;
                -p * p.log2()
            })
            .sum();

        debug!(
            "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
            entropy, total
        );
        entropy
    }
}
