use crate::rolling_hash::poly_hash;

/// Default bucket count is `1 << DEFAULT_CAPACITY_POW` (1 048 576).
pub const DEFAULT_CAPACITY_POW: u32 = 20;

/// One chain entry: the cached hash and the owned string.
type Entry = (u64, String);

/// Set of strings using separate chaining over a power-of-two bucket array.
///
/// Strings are keyed by [`poly_hash`]; a string lives in bucket `hash & mask`.
/// After an insertion pushes the load factor to 0.75 or above, the bucket
/// array doubles and every entry is redistributed. Capacity never shrinks.
///
/// No normalization happens here: `"Cat"` and `"cat"` are different members.
#[derive(Debug, Clone)]
pub struct StringSet {
    buckets: Vec<Vec<Entry>>,
    mask: u64,
    size: usize,
}

impl StringSet {
    pub fn new() -> Self {
        Self::with_capacity_pow(DEFAULT_CAPACITY_POW)
    }

    /// Create an empty set with `1 << pow` buckets.
    pub fn with_capacity_pow(pow: u32) -> Self {
        let capacity = 1usize << pow;
        Self {
            buckets: empty_buckets(capacity),
            mask: capacity as u64 - 1,
            size: 0,
        }
    }

    /// Number of distinct strings stored.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current number of buckets (always a power of two).
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Insert `s`. Returns `true` if it was not already present.
    pub fn add(&mut self, s: &str) -> bool {
        let h = poly_hash(s);
        let idx = self.index(h);
        let bucket = &mut self.buckets[idx];
        if bucket.iter().any(|(_, x)| x == s) {
            return false;
        }
        bucket.push((h, s.to_owned()));
        self.size += 1;
        self.maybe_grow();
        true
    }

    /// Remove `s`. Returns `true` if it was present.
    pub fn discard(&mut self, s: &str) -> bool {
        let idx = self.index(poly_hash(s));
        let bucket = &mut self.buckets[idx];
        match bucket.iter().position(|(_, x)| x == s) {
            Some(pos) => {
                // Keeps the remaining chain in insertion order.
                bucket.remove(pos);
                self.size -= 1;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, s: &str) -> bool {
        self.buckets[self.index(poly_hash(s))]
            .iter()
            .any(|(_, x)| x == s)
    }

    /// Iterate members in bucket order, then insertion order within a bucket.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets.iter(),
            chain: <&[Entry]>::default().iter(),
        }
    }

    fn index(&self, h: u64) -> usize {
        (h & self.mask) as usize
    }

    fn maybe_grow(&mut self) {
        // Load factor >= 0.75.
        if self.size * 4 >= self.capacity() * 3 {
            self.rehash(self.capacity() << 1);
        }
    }

    /// Redistribute every entry into `new_capacity` fresh buckets.
    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        let new_mask = new_capacity as u64 - 1;
        let mut new_buckets = empty_buckets(new_capacity);
        for (h, s) in std::mem::take(&mut self.buckets).into_iter().flatten() {
            new_buckets[(h & new_mask) as usize].push((h, s));
        }
        self.buckets = new_buckets;
        self.mask = new_mask;
        log::debug!(
            "string set resized: {} -> {} buckets ({} entries)",
            old_capacity,
            new_capacity,
            self.size
        );
    }
}

impl Default for StringSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Loading is a sequence of plain `add` calls.
impl Extend<String> for StringSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for s in iter {
            self.add(&s);
        }
    }
}

impl<'a> IntoIterator for &'a StringSet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Borrowing iterator over the members of a [`StringSet`].
pub struct Iter<'a> {
    buckets: std::slice::Iter<'a, Vec<Entry>>,
    chain: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some((_, s)) = self.chain.next() {
                return Some(s.as_str());
            }
            self.chain = self.buckets.next()?.iter();
        }
    }
}

fn empty_buckets(capacity: usize) -> Vec<Vec<Entry>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Vec::new);
    buckets
}
