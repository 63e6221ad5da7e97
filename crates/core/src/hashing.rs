//! Content hashing for derived identifiers and upload paths.

use md5::{Digest, Md5};

use crate::slug::slugify;

/// Compute an MD5 hex digest of the given bytes.
pub fn md5_hex(data: &[u8]) -> String {
    let hash = Md5::digest(data);
    format!("{hash:x}")
}

/// Hash of the slugified form of `text`.
///
/// Two inputs that slugify to the same string share a hash, so
/// `"Red Chair"` and `"red   chair"` map to the same code.
pub fn content_hash(text: &str) -> String {
    md5_hex(slugify(text).as_bytes())
}
