//! The binary snapshot codec: magic, live-entry count, Bloom filter bytes,
//! then every live (key, value) pair in leaf-chain order.
//!
//! All integers are explicit little-endian via `byteorder`, matching the
//! reference implementation's on-disk layout bit-for-bit. Tombstoned entries
//! are never written; reloading replays each saved entry through the
//! ordinary put path, which rebuilds the tree from scratch and re-adds every
//! key to the already-installed Bloom filter.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Result, StoreError};

/// Magic number identifying a store snapshot. On disk (little-endian) this
/// is the byte sequence `53 42 50 54` — "SBPT".
pub const MAGIC: u32 = 0x5450_4253;

/// Write a snapshot: magic, live count, bloom bit count + raw bloom bytes,
/// then each (key, value) pair with explicit length prefixes.
pub fn write_snapshot<W: Write>(
    mut writer: W,
    entries: impl ExactSizeIterator<Item = (Vec<u8>, Vec<u8>)>,
    bloom_bit_count: u64,
    bloom_bytes: &[u8],
) -> Result<()> {
    writer.write_u32::<LittleEndian>(MAGIC)?;
    writer.write_u64::<LittleEndian>(entries.len() as u64)?;
    writer.write_u64::<LittleEndian>(bloom_bit_count)?;
    writer.write_all(bloom_bytes)?;
    for (key, value) in entries {
        writer.write_u32::<LittleEndian>(key.len() as u32)?;
        writer.write_u32::<LittleEndian>(value.len() as u32)?;
        writer.write_all(&key)?;
        writer.write_all(&value)?;
    }
    Ok(())
}

/// The raw contents of a snapshot, decoded but not yet replayed into a tree.
pub struct LoadedSnapshot {
    pub bloom_bit_count: u64,
    pub bloom_bytes: Vec<u8>,
    pub entries: Vec<(Vec<u8>, Vec<u8>)>,
}

/// Read and validate a snapshot's header and body.
pub fn read_snapshot<R: Read>(mut reader: R) -> Result<LoadedSnapshot> {
    let magic = reader
        .read_u32::<LittleEndian>()
        .map_err(|_| StoreError::Invalid("truncated header".into()))?;
    if magic != MAGIC {
        return Err(StoreError::Invalid(format!(
            "bad magic: expected {MAGIC:#010x}, got {magic:#010x}"
        )));
    }
    let live_count = reader
        .read_u64::<LittleEndian>()
        .map_err(|_| StoreError::Invalid("truncated header".into()))?;
    let bloom_bit_count = reader
        .read_u64::<LittleEndian>()
        .map_err(|_| StoreError::Invalid("truncated header".into()))?;
    let bloom_byte_count = (bloom_bit_count / 8) as usize;

    let mut bloom_bytes = vec![0u8; bloom_byte_count];
    reader
        .read_exact(&mut bloom_bytes)
        .map_err(|_| StoreError::Invalid("truncated bloom bytes".into()))?;

    let mut entries = Vec::with_capacity(live_count as usize);
    for _ in 0..live_count {
        let key_len = reader
            .read_u32::<LittleEndian>()
            .map_err(|_| StoreError::Invalid("truncated entry header".into()))? as usize;
        let value_len = reader
            .read_u32::<LittleEndian>()
            .map_err(|_| StoreError::Invalid("truncated entry header".into()))? as usize;
        let mut key = vec![0u8; key_len];
        reader
            .read_exact(&mut key)
            .map_err(|_| StoreError::Invalid("truncated key bytes".into()))?;
        let mut value = vec![0u8; value_len];
        reader
            .read_exact(&mut value)
            .map_err(|_| StoreError::Invalid("truncated value bytes".into()))?;
        entries.push((key, value));
    }

    log::debug!(
        "snapshot: loaded {} entries, bloom {} bits",
        entries.len(),
        bloom_bit_count
    );

    Ok(LoadedSnapshot {
        bloom_bit_count,
        bloom_bytes,
        entries,
    })
}
