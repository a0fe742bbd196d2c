//! Lock-free global string table backing [`Symbol`](super::Symbol).

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use super::{Symbol, KNOWN_SYMBOL_TEXT, RESERVED_SYMBOLS_END};

/// The process-wide string table. Keywords are pre-interned on first touch
/// so their indices are stable across the life of the program.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Thread-safe string table. Interned strings are leaked to obtain
/// `'static` references; this is acceptable because a compiler invocation
/// interns a bounded number of unique strings and never needs to free them.
pub struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next_index: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
        }
    }

    fn initialize_known_symbols(&self) {
        for &(text, idx) in KNOWN_SYMBOL_TEXT {
            let interned: &'static str = Box::leak(text.to_string().into_boxed_str());
            let hash = Self::hash_string(text);
            self.map.insert(hash, (interned, idx));
        }
    }

    pub fn intern(&self, string: &str) -> Symbol {
        let hash = Self::hash_string(string);

        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == string {
                return Symbol { index: entry.value().1 };
            }
        }

        match self.map.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                if entry.get().0 == string {
                    Symbol { index: entry.get().1 }
                } else {
                    self.insert_with_probe(string, hash)
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
                let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                entry.insert((interned, idx));
                Symbol { index: idx }
            }
        }
    }

    /// Linear probing for the rare hash collision between distinct strings.
    fn insert_with_probe(&self, string: &str, original_hash: u64) -> Symbol {
        const MAX_PROBES: u64 = 32;
        const PROBE_STRIDE: u64 = 0x9e3779b97f4a7c15;

        for i in 1u64..=MAX_PROBES {
            let probe_hash = original_hash.wrapping_add(i.wrapping_mul(PROBE_STRIDE));
            match self.map.get(&probe_hash) {
                Some(entry) if entry.value().0 == string => {
                    return Symbol { index: entry.value().1 };
                }
                Some(_) => continue,
                None => {
                    let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
                    let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                    self.map.insert(probe_hash, (interned, idx));
                    return Symbol { index: idx };
                }
            }
        }

        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.map.insert(original_hash, (interned, idx));
        Symbol { index: idx }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.index)
            .map(|entry| entry.value().0)
    }

    #[inline]
    fn hash_string(string: &str) -> u64 {
        let mut hasher = AHasher::default();
        string.hash(&mut hasher);
        hasher.finish()
    }
}
