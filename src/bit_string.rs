/// Payload of ASCII bit tokens, one byte of '0' or '1' per encoded bit.
///
/// The artifact format stores bits unpacked; this buffer keeps them that way.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    tokens: Vec<u8>,
}

impl BitString {
    pub fn new() -> Self {
        BitString { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BitString { tokens: Vec::with_capacity(capacity) }
    }

    pub fn capacity(&self) -> usize {
        self.tokens.capacity()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.tokens
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.tokens
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.tokens.push(if bit { b'1' } else { b'0' });
    }

    /// Appends a code already rendered as tokens.
    pub fn push_code(&mut self, code: &str) {
        self.tokens.extend_from_slice(code.as_bytes());
    }

    pub fn bit_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<u8>> for BitString {
    fn from(tokens: Vec<u8>) -> Self {
        BitString { tokens }
    }
}

impl AsRef<[u8]> for BitString {
    fn as_ref(&self) -> &[u8] {
        &self.tokens
    }
}
