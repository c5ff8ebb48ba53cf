//! Order-independent identity of an order bundle.
//!
//! A [`CanonicalKey`] is the sorted list of order indices in a route. Two
//! permutations of the same orders share a key, which is how the enumerator
//! keeps only the cheapest permutation per bundle. Keys hash through
//! [`PackedKeyState`], which packs the indices into machine words instead of
//! running a general-purpose hash.

use std::cmp::Ordering;
use std::hash::{BuildHasher, Hash, Hasher};

use courier_core::MAX_ROUTE_LEN;

/// Sorted, fixed-capacity set of order indices.
///
/// # Examples
/// ```
/// use courier_routes::CanonicalKey;
///
/// let a = CanonicalKey::from_indices(&[4, 1, 9]).unwrap();
/// let b = CanonicalKey::from_indices(&[9, 4, 1]).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_slice(), &[1, 4, 9]);
/// assert!(CanonicalKey::from_indices(&[0; 9]).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalKey {
    slots: [u16; MAX_ROUTE_LEN],
    len: usize,
}

impl CanonicalKey {
    /// Build a key from indices in any order.
    ///
    /// Returns `None` when more than [`MAX_ROUTE_LEN`] indices are given.
    #[must_use]
    pub fn from_indices(indices: &[u16]) -> Option<Self> {
        if indices.len() > MAX_ROUTE_LEN {
            return None;
        }
        let mut slots = [0_u16; MAX_ROUTE_LEN];
        for (slot, index) in slots.iter_mut().zip(indices) {
            *slot = *index;
        }
        let mut key = Self {
            slots,
            len: indices.len(),
        };
        key.as_mut_slice().sort_unstable();
        Some(key)
    }

    /// Sorted indices.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        self.slots.get(..self.len).unwrap_or(&[])
    }

    fn as_mut_slice(&mut self) -> &mut [u16] {
        self.slots.get_mut(..self.len).unwrap_or(&mut [])
    }

    /// Number of orders in the bundle.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Report whether the key is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Hash for CanonicalKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for index in self.as_slice() {
            state.write_u16(*index);
        }
    }
}

impl Ord for CanonicalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl PartialOrd for CanonicalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How many bits each index occupies inside a packed hash word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPacking {
    /// 8 bits per index; a full key fits one word. Valid for up to 256
    /// orders.
    #[default]
    Byte,
    /// 16 bits per index, four per word, words folded together with XOR.
    Short,
}

impl KeyPacking {
    /// Pick the narrowest packing able to hold every index below
    /// `order_count`.
    ///
    /// # Examples
    /// ```
    /// use courier_routes::KeyPacking;
    ///
    /// assert_eq!(KeyPacking::for_universe(256), KeyPacking::Byte);
    /// assert_eq!(KeyPacking::for_universe(257), KeyPacking::Short);
    /// ```
    #[must_use]
    pub const fn for_universe(order_count: usize) -> Self {
        if order_count <= 256 {
            Self::Byte
        } else {
            Self::Short
        }
    }

    const fn bits(self) -> u32 {
        match self {
            Self::Byte => 8,
            Self::Short => 16,
        }
    }
}

/// [`BuildHasher`] producing [`PackedKeyHasher`]s for one packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedKeyState {
    packing: KeyPacking,
}

impl PackedKeyState {
    /// Hash state for keys drawn from `order_count` orders.
    #[must_use]
    pub const fn for_universe(order_count: usize) -> Self {
        Self {
            packing: KeyPacking::for_universe(order_count),
        }
    }

    /// Selected packing.
    #[must_use]
    pub const fn packing(&self) -> KeyPacking {
        self.packing
    }
}

impl BuildHasher for PackedKeyState {
    type Hasher = PackedKeyHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PackedKeyHasher::new(self.packing)
    }
}

/// Packs `u16` writes into 64-bit words and folds full words with XOR.
#[derive(Debug, Clone)]
pub struct PackedKeyHasher {
    bits: u32,
    word: u64,
    filled: u32,
    folded: u64,
}

impl PackedKeyHasher {
    /// Empty hasher for `packing`.
    #[must_use]
    pub const fn new(packing: KeyPacking) -> Self {
        Self {
            bits: packing.bits(),
            word: 0,
            filled: 0,
            folded: 0,
        }
    }
}

/// Odd multiplier moving the packed bits into the high bits used for probing.
const SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

impl Hasher for PackedKeyHasher {
    fn finish(&self) -> u64 {
        (self.folded ^ self.word).wrapping_mul(SPREAD)
    }

    fn write_u16(&mut self, index: u16) {
        if self.filled >= u64::BITS {
            self.folded ^= self.word;
            self.word = 0;
            self.filled = 0;
        }
        let mask = (1_u64 << self.bits) - 1;
        self.word |= (u64::from(index) & mask) << self.filled;
        self.filled += self.bits;
    }

    fn write(&mut self, bytes: &[u8]) {
        for pair in bytes.chunks(2) {
            let low = pair.first().copied().map_or(0, u16::from);
            let high = pair.get(1).copied().map_or(0, u16::from);
            self.write_u16(low | (high << 8));
        }
    }
}
