//! Content hash sent alongside uploads

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// BLAKE2b with a 32-byte digest, as lower-case hex
pub fn generate_hash(data: &[u8]) -> String {
    hex::encode(Blake2b256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            generate_hash(b"Do your best."),
            "e5f82d8e538c516f946db5f8fad590412458a1fec09bac56630695d0558b0c60"
        );
        assert_eq!(
            generate_hash(b"God doesn't require us to succeed; he only requires that you try."),
            "b358a76b01dc65389326e2e2d66c2cb0118b874bfe7e8d2dbac8889160e6d60b"
        );
    }

    #[test]
    fn test_empty_input() {
        let hash = generate_hash(&[]);
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }
}
