use rand::{Rng, thread_rng};

const ALPHABET: &[u8] = b"0123456789abcdef";

pub const ID_LEN: usize = 32;

/// Opaque client identifier: 128 random bits as lowercase hex. Drawn
/// once per client process and resent with every request; the server
/// only ever uses it as a map key.
pub fn fresh_id() -> String {
    let mut rng = thread_rng();

    let mut buf = vec![0u8; ID_LEN];

    for b in &mut buf {
        let i = rng.gen_range(0..ALPHABET.len());

        *b = ALPHABET[i];
    }

    String::from_utf8(buf).expect("ascii only")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_hex_of_expected_length() {
        let id = fresh_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(fresh_id(), fresh_id());
    }
}
