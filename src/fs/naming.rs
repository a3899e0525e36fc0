//! Output filename derivation.

use sha1::{Digest, Sha1};

/// Derive the output filename for an image URL.
///
/// The name is the SHA-1 hex of the URL basename (everything after the last
/// `/`, query string included) plus a `.jpg` extension, so a given URL always
/// maps to the same file.
pub fn hashed_filename(url: &str) -> String {
    let basename = match url.rfind('/') {
        Some(idx) => &url[idx + 1..],
        None => url,
    };

    let digest = Sha1::digest(basename.as_bytes());
    format!("{}.jpg", hex::encode(digest))
}
