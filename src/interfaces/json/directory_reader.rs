use crate::domain::address::AddressDirectory;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads the deposit-address directory from JSON.
///
/// Expected shape:
///
/// ```json
/// {
///   "bitcoin":    { "network": "TRC20", "address": "..." },
///   "usdt_trc20": { "network": "TRC20", "address": "..." },
///   "usdt_bep20": { "network": "BEP20", "address": "..." }
/// }
/// ```
pub struct AddressDirectoryReader<R: Read> {
    source: R,
}

impl<R: Read> AddressDirectoryReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<AddressDirectory> {
        Ok(serde_json::from_reader(self.source)?)
    }
}

impl AddressDirectoryReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}
