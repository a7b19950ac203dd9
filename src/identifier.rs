//! A packet identifier issued by an [IdentifierPool](crate::IdentifierPool).
//!
//! Identifiers are always in `1..=65535`. Zero is reserved by protocols as "no identifier", so it
//! is unrepresentable here.
//!
//! # Example
//!
//! ```
//! # use packet_id_pool::{Identifier, IdentifierPool};
//! let pool = IdentifierPool::new();
//! let id = pool.reserve();
//!
//! assert_eq!(id.get(), 1);
//! assert_eq!(id.to_bytes(), [0x00, 0x01]);
//! assert_eq!(Identifier::from_bytes([0x00, 0x01]), Some(id));
//! ```

use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::num::NonZeroU16;

use crate::codec;

/// A packet identifier in `1..=65535`. See the [module-level documentation](crate::identifier)
/// for more.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Identifier {
    value: NonZeroU16,
}

impl Identifier {
    /// The smallest identifier, and the first one a fresh pool issues.
    pub const MIN: Identifier = Identifier {
        value: NonZeroU16::MIN,
    };

    /// The largest identifier.
    pub const MAX: Identifier = Identifier {
        value: NonZeroU16::MAX,
    };

    /// Wraps a raw value, returning `None` for zero.
    pub fn new(value: u16) -> Option<Self> {
        NonZeroU16::new(value).map(Self::from)
    }

    /// Decodes an identifier from its big-endian wire form, returning `None` if it encodes zero.
    pub fn from_bytes(bytes: [u8; codec::WIRE_LENGTH]) -> Option<Self> {
        Self::new(codec::decode(bytes))
    }

    /// The raw value of this identifier.
    pub fn get(self) -> u16 {
        self.value.get()
    }

    /// Encodes this identifier into its big-endian wire form.
    pub fn to_bytes(self) -> [u8; codec::WIRE_LENGTH] {
        codec::encode(self.get())
    }
}

impl From<NonZeroU16> for Identifier {
    fn from(value: NonZeroU16) -> Self {
        Self { value }
    }
}

impl From<Identifier> for u16 {
    fn from(id: Identifier) -> u16 {
        id.get()
    }
}

impl TryFrom<u16> for Identifier {
    type Error = ZeroIdentifier;

    fn try_from(value: u16) -> Result<Self, ZeroIdentifier> {
        Self::new(value).ok_or(ZeroIdentifier)
    }
}

impl Debug for Identifier {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Identifier").field(&self.get()).finish()
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.get(), f)
    }
}

/// The error returned when converting zero into an [Identifier].
#[derive(Debug, thiserror::Error, Copy, Clone, Hash, Eq, PartialEq)]
#[error("zero is not a valid packet identifier")]
pub struct ZeroIdentifier;
