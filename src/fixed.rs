//! Fixed capacity containers
//!
//! Both containers live entirely on the stack and track their length explicitly.

use core::{cmp, fmt, hash, ops, slice, str};

#[derive(Copy, Clone)]
///Growable array with capacity `N`
pub struct FixedVec<T, const N: usize> {
    data: [T; N],
    len: usize,
}

impl<T: Copy + Default, const N: usize> FixedVec<T, N> {
    #[inline]
    ///Creates empty instance
    pub fn new() -> Self {
        Self {
            data: [T::default(); N],
            len: 0,
        }
    }

    #[inline]
    ///Appends `value`, returning `false` if there is no space left
    pub fn push(&mut self, value: T) -> bool {
        if self.len == Self::CAPACITY {
            return false;
        }

        self.data[self.len] = value;
        self.len += 1;
        true
    }
}

impl<T, const N: usize> FixedVec<T, N> {
    ///Maximum number of elements
    pub const CAPACITY: usize = N;

    #[inline(always)]
    ///Number of stored elements
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    ///Returns whether nothing is stored
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    ///Removes all elements
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline(always)]
    ///Access stored elements
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    #[inline(always)]
    ///Iterates over stored elements
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T: Copy + Default, const N: usize> Default for FixedVec<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> ops::Deref for FixedVec<T, N> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedVec<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedVec<T, N> {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for FixedVec<T, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for FixedVec<T, N> {}

#[derive(Copy, Clone)]
///ASCII string with capacity of `N` bytes
pub struct FixedString<const N: usize> {
    data: [u8; N],
    len: usize,
}

impl<const N: usize> FixedString<N> {
    ///Maximum number of characters
    pub const CAPACITY: usize = N;

    #[inline]
    ///Creates empty string
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            len: 0,
        }
    }

    ///Creates string from `text`
    ///
    ///Returns `None` if `text` is not ASCII or longer than `N`
    pub fn from_ascii(text: &str) -> Option<Self> {
        if text.len() > Self::CAPACITY {
            return None;
        }

        let mut result = Self::new();
        for byte in text.bytes() {
            if !result.push(byte) {
                return None;
            }
        }
        Some(result)
    }

    #[inline]
    ///Appends ASCII `byte`, returning `false` if it is not ASCII or no space is left
    pub fn push(&mut self, byte: u8) -> bool {
        if !byte.is_ascii() || self.len == Self::CAPACITY {
            return false;
        }

        self.data[self.len] = byte;
        self.len += 1;
        true
    }

    #[inline(always)]
    ///Number of characters
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    ///Returns whether string is empty
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    ///Removes all characters
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline(always)]
    ///Access raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    #[inline]
    ///Access string
    pub fn as_str(&self) -> &str {
        //Only ASCII is ever stored
        str::from_utf8(self.as_bytes()).unwrap_or_default()
    }
}

impl<const N: usize> Default for FixedString<N> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ops::Deref for FixedString<N> {
    type Target = str;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl<const N: usize> PartialEq for FixedString<N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> Eq for FixedString<N> {}

impl<const N: usize> PartialOrd for FixedString<N> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for FixedString<N> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl<const N: usize> hash::Hash for FixedString<N> {
    #[inline(always)]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

impl<const N: usize> fmt::Debug for FixedString<N> {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), fmt)
    }
}

impl<const N: usize> fmt::Display for FixedString<N> {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}
