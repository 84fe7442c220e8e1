//! The public facade tying the arena, B+tree index, Bloom filter, and
//! snapshot codec together into a single ordered byte-string key-value
//! store.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::arena::Arena;
use crate::bloom::BloomFilter;
use crate::config::{ARENA_DEFAULT, BLOOM_GROWTH_CHECK_STRIDE, BLOOM_INITIAL_BITS};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::snapshot::{read_snapshot, write_snapshot};
use crate::tree::BTreeIndex;

/// A point-in-time summary of the store's size and resource usage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub memory_used: usize,
    pub bloom_bits: usize,
    pub bloom_fill_rate: f64,
    pub tree_height: usize,
    pub node_count: usize,
}

/// An embedded, in-process, single-threaded ordered key-value store.
pub struct Store {
    arena: Arena,
    tree: BTreeIndex,
    bloom: BloomFilter,
    path: Option<PathBuf>,
    puts_since_growth_check: u64,
}

impl Store {
    /// Open a store. If `path` names an existing file, its snapshot is
    /// loaded; otherwise a fresh, empty store is created. `close`/`save`
    /// write back to `path` when one was given.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let mut store = Store {
            arena: Arena::new(ARENA_DEFAULT)?,
            tree: BTreeIndex::new(),
            bloom: BloomFilter::new(BLOOM_INITIAL_BITS),
            path: path.map(Path::to_path_buf),
            puts_since_growth_check: 0,
        };
        if let Some(path) = path {
            if path.exists() {
                store.load(path)?;
            }
        }
        Ok(store)
    }

    /// Insert or overwrite `key` with `value`.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let key_slice = self.arena.alloc_copy(key)?;
        let value_slice = self.arena.alloc_copy(value)?;
        self.tree.put(&self.arena, key, key_slice, value_slice);
        self.bloom.add(key);

        self.puts_since_growth_check += 1;
        if self.puts_since_growth_check >= BLOOM_GROWTH_CHECK_STRIDE {
            self.puts_since_growth_check = 0;
            if self.bloom.should_grow() {
                let arena = &self.arena;
                let tree = &self.tree;
                self.bloom.grow(tree.iter_live(arena).map(|(k, _)| k));
            }
        }
        Ok(())
    }

    /// Fetch the live value for `key`, if any.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        if !self.bloom.maybe_contains(key) {
            return None;
        }
        self.tree.get(&self.arena, key).map(|slice| self.arena.get(slice))
    }

    /// True if `key` maps to a live value.
    pub fn exists(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Tombstone the entry for `key`. Returns `StoreError::NotFound` if it
    /// is absent or already deleted.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.tree.delete(&self.arena, key)
    }

    /// A fresh cursor over the store's live entries, in key order.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.tree, &self.arena)
    }

    /// Invoke `f` with every live (key, value) pair in ascending key order.
    pub fn foreach(&self, mut f: impl FnMut(&[u8], &[u8])) {
        let mut cursor = self.cursor();
        let mut has_entry = cursor.first();
        while has_entry {
            f(cursor.key().unwrap(), cursor.value().unwrap());
            has_entry = cursor.next();
        }
    }

    /// Invoke `f` with every live (key, value) pair whose key falls within
    /// the inclusive range `[from, to]`.
    pub fn range(&self, from: &[u8], to: &[u8], mut f: impl FnMut(&[u8], &[u8])) {
        let mut cursor = self.cursor();
        let mut has_entry = cursor.seek(from);
        while has_entry {
            let key = cursor.key().unwrap();
            if key > to {
                break;
            }
            f(key, cursor.value().unwrap());
            has_entry = cursor.next();
        }
    }

    /// A snapshot of the store's current size and resource usage.
    pub fn stats(&self) -> Stats {
        Stats {
            count: self.tree.len(),
            memory_used: self.arena.used(),
            bloom_bits: self.bloom.bit_count(),
            bloom_fill_rate: self.bloom.fill(),
            tree_height: self.tree.height(),
            node_count: self.tree.node_count(),
        }
    }

    /// Write a snapshot to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let entries: Vec<(Vec<u8>, Vec<u8>)> = self.tree.iter_live(&self.arena).collect();
        log::debug!("snapshot: saving {} entries to {}", entries.len(), path.display());
        write_snapshot(
            &mut writer,
            entries.into_iter(),
            self.bloom.bit_count() as u64,
            self.bloom.raw_bytes(),
        )
    }

    /// Load a snapshot from `path`, replacing this store's contents.
    ///
    /// The saved Bloom filter bytes are installed first, then every saved
    /// entry is replayed through the ordinary put path: this rebuilds the
    /// tree from scratch and re-adds each key to the bloom filter, which is
    /// idempotent and tolerates a stale or corrupted saved filter (replay
    /// only ever sets bits, never clears them).
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let loaded = read_snapshot(reader)?;

        self.arena = Arena::new(ARENA_DEFAULT)?;
        self.tree = BTreeIndex::new();
        self.bloom = BloomFilter::from_raw(loaded.bloom_bit_count as usize, loaded.bloom_bytes);
        self.puts_since_growth_check = 0;

        for (key, value) in loaded.entries {
            self.put(&key, &value)?;
        }
        Ok(())
    }

    /// Close the store, writing a snapshot if it was opened with a path.
    pub fn close(self) -> Result<()> {
        if let Some(path) = self.path.clone() {
            self.save(&path)?;
        }
        Ok(())
    }
}
