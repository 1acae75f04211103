//! BIP-32 derivation paths such as `m/44'/60'/0'/0/0`.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// BIP-44 purpose level.
pub const BIP44_PURPOSE: u32 = 44;

/// One step of a derivation path.
///
/// The wrapped value never carries the hardened bit; [`ChildIndex::to_u32`]
/// adds it back for hardened steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Non-hardened step, printed as `n`.
    Normal(u32),
    /// Hardened step, printed as `n'`.
    Hardened(u32),
}

impl ChildIndex {
    /// Bit that marks a hardened index in raw form (2^31).
    pub const HARDENED_OFFSET: u32 = 1 << 31;

    /// Non-hardened step; `index` must be below 2^31.
    pub fn normal(index: u32) -> Result<Self> {
        check_range(index, false).map(Self::Normal)
    }

    /// Hardened step; `index` must be below 2^31.
    pub fn hardened(index: u32) -> Result<Self> {
        check_range(index, true).map(Self::Hardened)
    }

    /// Whether the step is hardened.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Index without the hardened bit.
    pub const fn index(&self) -> u32 {
        let (Self::Normal(index) | Self::Hardened(index)) = *self;
        index
    }

    /// Raw BIP-32 value, hardened bit included.
    pub const fn to_u32(&self) -> u32 {
        match *self {
            Self::Normal(index) => index,
            Self::Hardened(index) => index | Self::HARDENED_OFFSET,
        }
    }
}

fn check_range(index: u32, hardened: bool) -> Result<u32> {
    if index < ChildIndex::HARDENED_OFFSET {
        Ok(index)
    } else {
        let mark = if hardened { "'" } else { "" };
        Err(Error::InvalidDerivationPath(format!(
            "child {index}{mark} exceeds 2^31 - 1"
        )))
    }
}

/// Splits a raw BIP-32 value into index and hardened flag.
impl From<u32> for ChildIndex {
    fn from(raw: u32) -> Self {
        let index = raw & !Self::HARDENED_OFFSET;
        if raw & Self::HARDENED_OFFSET == 0 {
            Self::Normal(index)
        } else {
            Self::Hardened(index)
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_hardened() { "'" } else { "" };
        write!(f, "{}{mark}", self.index())
    }
}

/// Accepts `n`, `n'`, `nh` and `nH`.
impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (digits, hardened) = match s.strip_suffix(['\'', 'h', 'H']) {
            Some(digits) => (digits, true),
            None => (s, false),
        };
        let index: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidDerivationPath(format!("bad path component {s:?}")))?;

        if hardened {
            Self::hardened(index)
        } else {
            Self::normal(index)
        }
    }
}

/// Sequence of child steps from the master key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// Path made of `indices`, in order.
    pub fn new(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }

    /// `m/44'/coin_type'/account'/change/address_index`.
    pub fn bip44(coin_type: u32, account: u32, change: u32, address_index: u32) -> Result<Self> {
        Ok(Self::new(vec![
            ChildIndex::hardened(BIP44_PURPOSE)?,
            ChildIndex::hardened(coin_type)?,
            ChildIndex::hardened(account)?,
            ChildIndex::normal(change)?,
            ChildIndex::normal(address_index)?,
        ]))
    }

    /// Parse `m/...`; a bare `m` is the master key itself.
    pub fn parse(path: &str) -> Result<Self> {
        let mut parts = path.trim().split('/');
        match parts.next() {
            Some("m" | "M") => {}
            _ => {
                return Err(Error::InvalidDerivationPath(format!(
                    "{path:?} does not start at m"
                )));
            }
        }
        parts
            .map(str::parse)
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Steps in order.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Number of steps.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        self.indices
            .iter()
            .try_for_each(|index| write!(f, "/{index}"))
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod child_index {
        use super::*;

        #[test]
        fn test_raw_value() {
            let hardened = ChildIndex::hardened(60).unwrap();
            assert_eq!(hardened.to_u32(), 0x8000_003c);
            assert_eq!(ChildIndex::from(0x8000_003c), hardened);
            assert_eq!(ChildIndex::from(7), ChildIndex::Normal(7));
        }

        #[test]
        fn test_range() {
            assert!(ChildIndex::normal((1 << 31) - 1).is_ok());
            assert!(matches!(
                ChildIndex::hardened(1 << 31),
                Err(Error::InvalidDerivationPath(_))
            ));
        }

        #[test]
        fn test_parse_markers() {
            for s in ["44'", "44h", "44H"] {
                assert_eq!(s.parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
            }
            assert_eq!("0".parse::<ChildIndex>().unwrap(), ChildIndex::Normal(0));
            assert!("".parse::<ChildIndex>().is_err());
            assert!("-1".parse::<ChildIndex>().is_err());
            assert!("2147483648'".parse::<ChildIndex>().is_err());
        }
    }

    mod path {
        use super::*;

        #[test]
        fn test_bip44() {
            let path = DerivationPath::bip44(60, 0, 0, 0).unwrap();
            assert_eq!(path.depth(), 5);
            assert_eq!(path.to_string(), "m/44'/60'/0'/0/0");
            assert_eq!(path, "m/44'/60'/0'/0/0".parse().unwrap());
        }

        #[test]
        fn test_testnet_coin_type() {
            let path = DerivationPath::bip44(1, 0, 0, 0).unwrap();
            assert_eq!(path.indices()[1], ChildIndex::Hardened(1));
        }

        #[test]
        fn test_master() {
            let master = DerivationPath::parse("m").unwrap();
            assert_eq!(master.depth(), 0);
            assert_eq!(master.to_string(), "m");
        }

        #[test]
        fn test_rejects_malformed() {
            for bad in ["", "44'/60'", "m/44'//0", "m/", "m/x"] {
                assert!(DerivationPath::parse(bad).is_err(), "{bad:?}");
            }
        }
    }
}
