use crate::identifier::Identifier;

/// Released identifiers that no waiter has claimed. The most recently released identifier is
/// handed out first.
pub struct FreeStack {
    identifiers: Vec<Identifier>,
}

impl FreeStack {
    pub fn new() -> Self {
        Self {
            identifiers: Vec::new(),
        }
    }

    pub fn push(&mut self, id: Identifier) {
        self.identifiers.push(id);
    }

    pub fn pop(&mut self) -> Option<Identifier> {
        self.identifiers.pop()
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}
