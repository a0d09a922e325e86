use std::collections::{BTreeMap, HashMap};

/// Symbol to code mapping. Each code is a run of ASCII '0'/'1' tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        CodeTable { codes: BTreeMap::new() }
    }

    /// Returns the previous code of `symbol`, if any.
    pub fn insert(&mut self, symbol: u8, code: String) -> Option<String> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_str()))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// No code is a prefix of another, and no code is empty.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        if sorted.first().map_or(false, |c| c.is_empty()) {
            return false;
        }
        // in lexicographic order a prefix sorts directly before some extension of it
        sorted.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    pub fn inverse(&self) -> InverseCodeTable {
        let symbols = self
            .codes
            .iter()
            .map(|(&symbol, code)| (code.as_bytes().to_vec(), symbol))
            .collect();
        InverseCodeTable {
            symbols,
            max_code_len: self.max_code_len(),
        }
    }
}

/// Code to symbol mapping used while decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InverseCodeTable {
    symbols: HashMap<Vec<u8>, u8>,
    max_code_len: usize,
}

impl InverseCodeTable {
    pub fn get(&self, code: &str) -> Option<u8> {
        self.get_tokens(code.as_bytes())
    }

    /// Lookup by raw payload tokens.
    pub fn get_tokens(&self, tokens: &[u8]) -> Option<u8> {
        self.symbols.get(tokens).copied()
    }

    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<&CodeTable> for InverseCodeTable {
    fn from(table: &CodeTable) -> Self {
        table.inverse()
    }
}
