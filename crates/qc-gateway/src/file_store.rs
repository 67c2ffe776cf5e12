//! # Derived file state (spec §3, §4.7, §9)
//!
//! A mapping from filename to a byte string whose length is always a
//! multiple of 512; record `i` occupies bytes `[512*i, 512*i+512)`. This
//! map is a *cache* of what the confirmed chain implies; it is updated
//! eagerly at client-submission time rather than on block confirmation
//! (spec §9, "Eager vs. committed file state") — reads may observe
//! operations that are later lost if the producing miner crashes before
//! the block is mined.

use shared_types::errors::ClientError;
use shared_types::entities::{MAX_RECORDS_PER_FILE, RECORD_SIZE};
use std::collections::HashMap;
use std::sync::RwLock;

pub struct FileStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    pub fn create_file(&self, name: &str) -> Result<(), ClientError> {
        let mut files = self.files.write().expect("file store lock poisoned");
        if files.contains_key(name) {
            return Err(ClientError::FileExists);
        }
        files.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// `"name1;name2;…"`, or `"No File"` if no file has been created yet
    /// (spec §4.7, §8 property 7 — this is the fifth error-like string).
    pub fn list_files(&self) -> String {
        let files = self.files.read().expect("file store lock poisoned");
        if files.is_empty() {
            return "No File".to_string();
        }
        let mut names: Vec<&String> = files.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn total_recs(&self, name: &str) -> Result<usize, ClientError> {
        let files = self.files.read().expect("file store lock poisoned");
        let bytes = files.get(name).ok_or(ClientError::FileDoesNotExist)?;
        Ok(bytes.len() / RECORD_SIZE)
    }

    /// Returns the exact 512 bytes of record `pos` (spec §8 property 6).
    pub fn read_rec(&self, name: &str, pos: usize) -> Result<Vec<u8>, ClientError> {
        let files = self.files.read().expect("file store lock poisoned");
        let bytes = files.get(name).ok_or(ClientError::FileDoesNotExist)?;
        let record_count = bytes.len() / RECORD_SIZE;
        if pos >= record_count {
            return Err(ClientError::RecordDoesNotExist);
        }
        Ok(bytes[pos * RECORD_SIZE..pos * RECORD_SIZE + RECORD_SIZE].to_vec())
    }

    /// Pads/truncates `content` to exactly 512 bytes and appends it as a
    /// new record. Returns the new record's index and the exact 512-byte
    /// record that was stored (the latter is what gets wrapped into the
    /// `AppendRec` op broadcast to the network).
    pub fn append_rec(&self, name: &str, content: &[u8]) -> Result<(usize, Vec<u8>), ClientError> {
        let mut files = self.files.write().expect("file store lock poisoned");
        let bytes = files.get_mut(name).ok_or(ClientError::FileDoesNotExist)?;
        let record_count = bytes.len() / RECORD_SIZE;
        if record_count >= MAX_RECORDS_PER_FILE {
            return Err(ClientError::FileMaxLenReached);
        }
        let mut record = vec![0u8; RECORD_SIZE];
        let copy_len = content.len().min(RECORD_SIZE);
        record[..copy_len].copy_from_slice(&content[..copy_len]);
        bytes.extend_from_slice(&record);
        Ok((record_count, record))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_file_rejects_duplicate_names() {
        let store = FileStore::new();
        store.create_file("a.txt").unwrap();
        assert_eq!(store.create_file("a.txt"), Err(ClientError::FileExists));
    }

    #[test]
    fn list_files_reports_no_file_sentinel_when_empty() {
        let store = FileStore::new();
        assert_eq!(store.list_files(), "No File");
        store.create_file("a.txt").unwrap();
        store.create_file("b.txt").unwrap();
        assert_eq!(store.list_files(), "a.txt;b.txt");
    }

    #[test]
    fn append_then_read_round_trips_padded_record() {
        let store = FileStore::new();
        store.create_file("f").unwrap();
        let (idx, record) = store.append_rec("f", b"hello").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(record.len(), RECORD_SIZE);
        assert!(record.starts_with(b"hello"));
        assert!(record[5..].iter().all(|&b| b == 0));

        assert_eq!(store.total_recs("f").unwrap(), 1);
        let read_back = store.read_rec("f", 0).unwrap();
        assert_eq!(read_back, record);
    }

    #[test]
    fn read_rec_out_of_range_is_rejected() {
        let store = FileStore::new();
        store.create_file("f").unwrap();
        assert_eq!(
            store.read_rec("f", 0),
            Err(ClientError::RecordDoesNotExist)
        );
    }

    #[test]
    fn operations_on_missing_file_are_rejected() {
        let store = FileStore::new();
        assert_eq!(
            store.total_recs("ghost"),
            Err(ClientError::FileDoesNotExist)
        );
        assert_eq!(
            store.read_rec("ghost", 0),
            Err(ClientError::FileDoesNotExist)
        );
        assert_eq!(
            store.append_rec("ghost", b"x").map(|_| ()),
            Err(ClientError::FileDoesNotExist)
        );
    }

    #[test]
    fn overlong_content_is_truncated_to_one_record() {
        let store = FileStore::new();
        store.create_file("f").unwrap();
        let long = vec![b'x'; RECORD_SIZE + 100];
        let (_, record) = store.append_rec("f", &long).unwrap();
        assert_eq!(record.len(), RECORD_SIZE);
        assert!(record.iter().all(|&b| b == b'x'));
    }
}
