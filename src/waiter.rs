use crate::config::WaiterOrder;
use crate::identifier::Identifier;

/// A handle to a parked waiter. Only the caller that parked it may claim it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WaiterKey {
    index: usize,
}

enum Slot {
    Vacant { next_vacant: Option<usize> },
    Parked { next: Option<usize> },
    Fulfilled(Identifier),
}

/// Blocked reservations, linked through array slots so keys remain stable while other waiters come
/// and go. Waiters are always served from the head; the configured order decides which end new
/// waiters are linked onto.
pub struct WaiterQueue {
    slots: Vec<Slot>,
    first_vacant: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    parked: usize,
    order: WaiterOrder,
}

impl WaiterQueue {
    pub fn new(order: WaiterOrder) -> Self {
        Self {
            slots: Vec::new(),
            first_vacant: None,
            head: None,
            tail: None,
            parked: 0,
            order,
        }
    }

    /// Links a new waiter into the queue.
    pub fn park(&mut self) -> WaiterKey {
        let index = self.allocate();

        match self.order {
            WaiterOrder::NewestFirst => {
                self.slots[index] = Slot::Parked { next: self.head };
                if self.head.is_none() {
                    self.tail = Some(index);
                }
                self.head = Some(index);
            }
            WaiterOrder::OldestFirst => {
                self.slots[index] = Slot::Parked { next: None };
                match self.tail {
                    Some(tail) => *self.next_mut(tail) = Some(index),
                    None => self.head = Some(index),
                }
                self.tail = Some(index);
            }
        }

        self.parked += 1;
        WaiterKey { index }
    }

    /// Unlinks the head waiter and assigns it the identifier. Gives the identifier back if nobody is
    /// waiting.
    pub fn fulfill_head(&mut self, id: Identifier) -> Result<(), Identifier> {
        let index = match self.head {
            Some(index) => index,
            None => return Err(id),
        };

        let next = *self.next_mut(index);
        self.head = next;
        if next.is_none() {
            self.tail = None;
        }

        self.slots[index] = Slot::Fulfilled(id);
        self.parked -= 1;
        Ok(())
    }

    /// Takes the identifier assigned to a waiter, freeing its slot. Returns `None` if the waiter is
    /// still parked.
    pub fn claim(&mut self, key: WaiterKey) -> Option<Identifier> {
        match self.slots[key.index] {
            Slot::Fulfilled(id) => {
                self.vacate(key.index);
                Some(id)
            }
            Slot::Parked { .. } => None,
            Slot::Vacant { .. } => unreachable!("waiter claimed twice"),
        }
    }

    /// The number of waiters that have not been fulfilled yet.
    pub fn len(&self) -> usize {
        self.parked
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn allocate(&mut self) -> usize {
        match self.first_vacant {
            Some(index) => {
                self.first_vacant = match self.slots[index] {
                    Slot::Vacant { next_vacant } => next_vacant,
                    _ => unreachable!("vacant list points at an occupied slot"),
                };
                index
            }
            None => {
                self.slots.push(Slot::Vacant { next_vacant: None });
                self.slots.len() - 1
            }
        }
    }

    fn vacate(&mut self, index: usize) {
        self.slots[index] = Slot::Vacant {
            next_vacant: self.first_vacant,
        };
        self.first_vacant = Some(index);
    }

    fn next_mut(&mut self, index: usize) -> &mut Option<usize> {
        match &mut self.slots[index] {
            Slot::Parked { next } => next,
            _ => unreachable!("queue links through a waiter that is not parked"),
        }
    }
}
