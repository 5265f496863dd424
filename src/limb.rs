//! Fixed-capacity limb storage and the word level kernels shared by [MutInt](crate::MutInt)
//! and the reducers.
//!
//! The kernels work on little-endian limb slices and never allocate. Callers are responsible
//! for passing destinations that are large enough.

use core::cmp::Ordering;
use core::ops::{Index, IndexMut};

/// A single base 2^32 digit
pub type Limb = u32;
/// Double width accumulator used for carries and products
pub type DoubleLimb = u64;
/// Number of bits in a [Limb]
pub const LIMB_BITS: usize = 32;

/// Raw limb storage with a cursor pointing at the most significant nonzero limb.
///
/// The buffer has no sign and no arithmetic policy. It only guarantees that it never
/// shrinks, and offers [commit](LimbBuffer::commit) to zero stale words and re-position the
/// cursor after a kernel wrote a new value into the low words.
#[derive(Clone, Debug)]
pub struct LimbBuffer {
    limbs: Vec<Limb>,
    last: usize,
}

impl LimbBuffer {
    /// Create a zeroed buffer holding at least one limb.
    pub fn with_capacity(capacity: usize) -> Self {
        LimbBuffer {
            limbs: vec![0; capacity.max(1)],
            last: 0,
        }
    }

    /// Number of limbs the buffer can hold without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.limbs.len()
    }

    /// Index of the most significant nonzero limb (0 for the value zero)
    #[inline]
    pub fn last(&self) -> usize {
        self.last
    }

    /// Number of significant limbs, at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.last + 1
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.last == 0 && self.limbs[0] == 0
    }

    /// The significant limbs, least significant first.
    #[inline]
    pub fn words(&self) -> &[Limb] {
        &self.limbs[..=self.last]
    }

    /// The whole storage including the zero words above the cursor.
    #[inline]
    pub fn as_slice(&self) -> &[Limb] {
        &self.limbs
    }

    /// Mutable access to the whole storage. Writers must finish with [commit](Self::commit).
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Limb] {
        &mut self.limbs
    }

    /// Make sure at least `len` limbs are available. Growing keeps the value.
    #[inline]
    pub fn reserve(&mut self, len: usize) {
        if self.limbs.len() < len {
            self.limbs.resize(len, 0);
        }
    }

    /// Reset to zero without releasing storage.
    pub fn clear(&mut self) {
        for w in &mut self.limbs[..=self.last] {
            *w = 0;
        }
        self.last = 0;
    }

    /// Zero every word in `from..to` (clamped to the capacity).
    pub fn zero_range(&mut self, from: usize, to: usize) {
        let to = to.min(self.limbs.len());
        if from < to {
            for w in &mut self.limbs[from..to] {
                *w = 0;
            }
        }
    }

    /// Declare `limbs[..len]` to be the new value.
    ///
    /// Words from `len` up to the previous cursor are zeroed, then the cursor is trimmed down
    /// past leading zero words.
    pub fn commit(&mut self, len: usize) {
        let len = len.min(self.limbs.len());
        if len <= self.last {
            self.zero_range(len, self.last + 1);
        }
        self.set_last(len.saturating_sub(1));
    }

    /// Put the cursor at `hint` and trim it down past zero words.
    pub fn set_last(&mut self, hint: usize) {
        let mut i = hint.min(self.limbs.len() - 1);
        while i > 0 && self.limbs[i] == 0 {
            i -= 1;
        }
        self.last = i;
    }

    /// Check the storage invariant: nothing but zeros above the cursor and a nonzero top word
    /// unless the value is zero.
    pub fn is_canonical(&self) -> bool {
        if self.last >= self.limbs.len() {
            return false;
        }
        if self.last > 0 && self.limbs[self.last] == 0 {
            return false;
        }
        self.limbs[self.last + 1..].iter().all(|&w| w == 0)
    }
}

impl Index<usize> for LimbBuffer {
    type Output = Limb;

    #[inline]
    fn index(&self, index: usize) -> &Limb {
        &self.limbs[index]
    }
}

impl IndexMut<usize> for LimbBuffer {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Limb {
        &mut self.limbs[index]
    }
}

/// Bit length of a single word
#[inline]
pub fn bit_length(word: Limb) -> usize {
    LIMB_BITS - word.leading_zeros() as usize
}

/// Length of `words` without its leading zero words (at least 1 for non-empty input)
#[inline]
pub fn trimmed_len(words: &[Limb]) -> usize {
    let mut n = words.len();
    while n > 1 && words[n - 1] == 0 {
        n -= 1;
    }
    n
}

/// Compare two little-endian magnitudes, ignoring leading zero words.
pub fn cmp(a: &[Limb], b: &[Limb]) -> Ordering {
    let a = &a[..trimmed_len(a)];
    let b = &b[..trimmed_len(b)];
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// `acc += b`, carrying through the whole of `acc`. Returns the carry out of `acc`.
///
/// Requires `acc.len() >= b.len()`.
pub fn add_assign(acc: &mut [Limb], b: &[Limb]) -> Limb {
    debug_assert!(acc.len() >= b.len());
    let mut carry: DoubleLimb = 0;
    for (i, w) in acc.iter_mut().enumerate() {
        if i >= b.len() && carry == 0 {
            break;
        }
        carry += *w as DoubleLimb + b.get(i).copied().unwrap_or(0) as DoubleLimb;
        *w = carry as Limb;
        carry >>= LIMB_BITS;
    }
    carry as Limb
}

/// `acc -= b` over the whole of `acc`. Returns true if the result borrowed below zero.
///
/// Requires `acc.len() >= b.len()`.
pub fn sub_assign(acc: &mut [Limb], b: &[Limb]) -> bool {
    debug_assert!(acc.len() >= b.len());
    let mut borrow: i64 = 0;
    for (i, w) in acc.iter_mut().enumerate() {
        if i >= b.len() && borrow == 0 {
            break;
        }
        borrow += *w as i64 - b.get(i).copied().unwrap_or(0) as i64;
        *w = borrow as Limb;
        borrow >>= LIMB_BITS;
    }
    borrow != 0
}

/// `acc = b - acc` where both are read as `b.len()` words. Returns true on borrow.
///
/// Requires `acc.len() >= b.len()`; words of `acc` past `b.len()` must be zero.
pub fn sub_from_assign(acc: &mut [Limb], b: &[Limb]) -> bool {
    debug_assert!(acc.len() >= b.len());
    let mut borrow: i64 = 0;
    for (i, &bw) in b.iter().enumerate() {
        borrow += bw as i64 - acc[i] as i64;
        acc[i] = borrow as Limb;
        borrow >>= LIMB_BITS;
    }
    borrow != 0
}

/// `acc[..a.len()] += a * m`. Returns the word carried out of `acc[a.len() - 1]`,
/// which the caller has to place itself.
pub fn mul_add_limb(acc: &mut [Limb], a: &[Limb], m: Limb) -> Limb {
    debug_assert!(acc.len() >= a.len());
    let m = m as DoubleLimb;
    let mut carry: DoubleLimb = 0;
    for (w, &x) in acc.iter_mut().zip(a) {
        carry += *w as DoubleLimb + x as DoubleLimb * m;
        *w = carry as Limb;
        carry >>= LIMB_BITS;
    }
    carry as Limb
}

/// `acc *= m` in place. Returns the word carried out of the top of `acc`.
pub fn mul_limb_assign(acc: &mut [Limb], m: Limb) -> Limb {
    let m = m as DoubleLimb;
    let mut carry: DoubleLimb = 0;
    for w in acc.iter_mut() {
        carry += *w as DoubleLimb * m;
        *w = carry as Limb;
        carry >>= LIMB_BITS;
    }
    carry as Limb
}

/// `dst[..a.len() + b.len()] = a * b` with the operand scanning schoolbook method.
///
/// `dst` must not overlap the operands, which the borrow checker guarantees for slices.
pub fn mul_into(dst: &mut [Limb], a: &[Limb], b: &[Limb]) {
    let n = a.len() + b.len();
    debug_assert!(dst.len() >= n);
    for w in &mut dst[..n] {
        *w = 0;
    }
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0 {
            continue;
        }
        let carry = mul_add_limb(&mut dst[i..i + b.len()], b, ai);
        dst[i + b.len()] = carry;
    }
}

/// Low `words` words of `a * b`, written into `dst[..words]`.
pub fn mul_low_into(dst: &mut [Limb], a: &[Limb], b: &[Limb], words: usize) {
    debug_assert!(dst.len() >= words);
    for w in &mut dst[..words] {
        *w = 0;
    }
    for (i, &ai) in a.iter().enumerate().take(words) {
        let blen = b.len().min(words - i);
        let carry = mul_add_limb(&mut dst[i..i + blen], &b[..blen], ai);
        if i + blen < words {
            dst[i + blen] = carry;
        }
    }
}

/// Negate a fixed width two's complement word string in place.
pub fn twos_negate(words: &mut [Limb]) {
    let mut carry = 1u64;
    for w in words.iter_mut() {
        carry += (!*w) as u64;
        *w = carry as Limb;
        carry >>= LIMB_BITS;
    }
}

/// `n0^-1 mod 2^32` for odd `n0`, by Newton iteration. Every step doubles the number of
/// correct low bits, starting from the 3 bits that `n0 * n0 == 1 (mod 8)` provides.
pub fn inverse_limb(n0: Limb) -> Limb {
    debug_assert!(n0 & 1 == 1);
    let mut inv = n0;
    for _ in 0..4 {
        inv = inv.wrapping_mul(2u32.wrapping_sub(n0.wrapping_mul(inv)));
    }
    inv
}
