use crate::identifier::Identifier;

/// Tracks which identifiers are outstanding so that releasing an identifier twice, or one that was
/// never reserved, panics instead of silently breaking uniqueness. When debug assertions are
/// disabled this is elided.
#[cfg(debug_assertions)]
pub struct OutstandingLedger {
    words: Box<[u64]>,
}

#[cfg(debug_assertions)]
impl OutstandingLedger {
    const WORD_BITS: usize = u64::BITS as usize;

    pub fn new() -> Self {
        let words = (u16::MAX as usize + 1) / Self::WORD_BITS;

        Self {
            words: vec![0; words].into_boxed_slice(),
        }
    }

    pub fn record_reserve(&mut self, id: Identifier) {
        let (word, mask) = Self::position(id);

        assert!(
            self.words[word] & mask == 0,
            "identifier {} was issued while still outstanding",
            id
        );

        self.words[word] |= mask;
    }

    pub fn record_release(&mut self, id: Identifier) {
        let (word, mask) = Self::position(id);

        assert!(
            self.words[word] & mask != 0,
            "released identifier {} which is not outstanding",
            id
        );

        self.words[word] &= !mask;
    }

    fn position(id: Identifier) -> (usize, u64) {
        let value = id.get() as usize;
        (value / Self::WORD_BITS, 1 << (value % Self::WORD_BITS))
    }
}

#[cfg(not(debug_assertions))]
pub struct OutstandingLedger {
    _private: (),
}

#[cfg(not(debug_assertions))]
impl OutstandingLedger {
    pub fn new() -> Self {
        Self { _private: () }
    }

    pub fn record_reserve(&mut self, _id: Identifier) {}

    pub fn record_release(&mut self, _id: Identifier) {}
}
