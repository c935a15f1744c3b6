//! Local artifact verification
//!
//! Computes SHA256 or SHA512 digests of downloaded files so they can be
//! compared with the hash recorded in a `Packages` index.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use sha2::{Digest, Sha256, Sha512};
use tracing::debug;

use crate::{config::HashType, Error, Result};

fn digest_reader<D: Digest, R: Read>(mut reader: R) -> std::io::Result<String>
where
    sha2::digest::Output<D>: std::fmt::LowerHex,
{
    let mut hasher = D::new();

    let mut buffer = [0u8; 65536]; // 64KB buffer
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

/// Compute the hex digest of a file with the given algorithm.
pub fn digest_file<P: AsRef<Path>>(path: P, hash_type: &HashType) -> Result<String> {
    let reader = BufReader::new(File::open(path)?);
    let digest = match hash_type.as_str().to_ascii_uppercase().as_str() {
        "SHA256" => digest_reader::<Sha256, _>(reader)?,
        "SHA512" => digest_reader::<Sha512, _>(reader)?,
        _ => return Err(Error::UnsupportedHash(hash_type.to_string())),
    };
    Ok(digest)
}

/// Check that a file matches `expected`. Hex case is ignored.
pub fn verify_file<P: AsRef<Path>>(path: P, hash_type: &HashType, expected: &str) -> Result<()> {
    let path = path.as_ref();
    let actual = digest_file(path, hash_type)?;
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(Error::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }
    debug!("{} {} verified for {}", hash_type, actual, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn hello_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_sha256_digest() {
        let file = hello_file();
        assert_eq!(digest_file(file.path(), &HashType::default()).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn test_sha512_digest_length() {
        let file = hello_file();
        let digest = digest_file(file.path(), &HashType::new("SHA512")).unwrap();
        assert_eq!(digest.len(), 128);
    }

    #[test]
    fn test_verify_ignores_case() {
        let file = hello_file();
        verify_file(file.path(), &HashType::default(), &HELLO_SHA256.to_uppercase()).unwrap();
    }

    #[test]
    fn test_verify_mismatch() {
        let file = hello_file();
        let err = verify_file(file.path(), &HashType::default(), "deadbeef").unwrap_err();
        match err {
            Error::ChecksumMismatch { expected, actual, .. } => {
                assert_eq!(expected, "deadbeef");
                assert_eq!(actual, HELLO_SHA256);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_hash() {
        let file = hello_file();
        let err = digest_file(file.path(), &HashType::new("MD5Sum")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedHash(name) if name == "MD5Sum"));
    }
}
