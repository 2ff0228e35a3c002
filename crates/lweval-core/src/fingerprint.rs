use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Version string mixed into every run identifier.
pub const CODE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const RUN_ID_LEN: usize = 8;
const DATA_SHA_LEN: usize = 16;

pub fn sha256_hex(s: &str) -> String {
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    hex::encode(h.finalize())
}

/// Truncated SHA-256 of a file's bytes, streamed.
pub fn file_sha(path: &Path) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut h = Sha256::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        h.update(&buf[..n]);
    }
    let mut hex = hex::encode(h.finalize());
    hex.truncate(DATA_SHA_LEN);
    Ok(hex)
}

/// Inputs to a run identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity<'a> {
    pub adapter_name: &'a str,
    pub adapter_version: &'a str,
    pub suite: &'a str,
    pub data_sha: &'a str,
    pub code_version: &'a str,
    pub timestamp: &'a str,
}

impl RunIdentity<'_> {
    /// Short hex fingerprint. The timestamp is an input, so two runs of the
    /// same configuration get distinct ids.
    pub fn run_id(&self) -> String {
        let raw = format!(
            "{}:{}:{}:{}:{}:{}",
            self.adapter_name,
            self.adapter_version,
            self.suite,
            self.data_sha,
            self.code_version,
            self.timestamp
        );
        let mut hex = sha256_hex(&raw);
        hex.truncate(RUN_ID_LEN);
        hex
    }
}
