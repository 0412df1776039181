//! Base85/Ascii85 encoding and decoding for the SDB codec.
//!
//! Binary data is packed four bytes at a time into five printable digit
//! characters (`!`..=`u`), with a `z` shorthand for all-zero groups and
//! optional `<~ ... ~>` bookend delimiters.

pub mod constants;

mod error;
mod from_base85;
mod to_base85;

pub use constants::{END_DELIMITER, START_DELIMITER};
pub use error::Base85Error;
pub use from_base85::from_base85;
pub use to_base85::to_base85;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn encode_wire_matrix() {
        assert_eq!(to_base85(&[], true), "<~~>");
        assert_eq!(to_base85(&[], false), "");
        assert_eq!(to_base85(&[0, 0, 0, 0], false), "z");
        assert_eq!(to_base85(&[0, 0, 0, 0, 0, 0, 0, 0], true), "<~zz~>");
        assert_eq!(to_base85(b"sure", true), "<~F*2M7~>");
        // Partial final groups emit real-byte-count + 1 digits.
        assert_eq!(to_base85(b"s", false).len(), 2);
        assert_eq!(to_base85(b"su", false).len(), 3);
        assert_eq!(to_base85(b"sur", false).len(), 4);
    }

    #[test]
    fn zero_run_shorthand_roundtrip() {
        for groups in [1usize, 2, 7] {
            let data = vec![0u8; groups * 4];
            let text = to_base85(&data, true);
            assert_eq!(text.len(), groups + 4);
            assert_eq!(from_base85(&text).unwrap(), data);
        }
    }

    #[test]
    fn zero_padded_final_group_is_not_shorthand() {
        // Three zero bytes do not form a full group; no `z` may appear.
        let text = to_base85(&[0, 0, 0], false);
        assert!(!text.contains('z'));
        assert_eq!(from_base85(&text).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn partial_group_roundtrip() {
        for data in [&b"A"[..], b"AB", b"ABC", b"ABCD", b"ABCDE", b"ABCDEFG"] {
            let with = to_base85(data, true);
            assert_eq!(from_base85(&with).unwrap(), data, "input {data:?}");
            let without = to_base85(data, false);
            assert_eq!(from_base85(&without).unwrap(), data, "input {data:?}");
        }
    }

    #[test]
    fn decode_skips_whitespace() {
        let text = "<~ F*2M7 \n ~ > ";
        assert_eq!(from_base85(text).unwrap(), b"sure");
    }

    #[test]
    fn decode_rejects_out_of_range_characters() {
        assert!(matches!(
            from_base85("F*\x1f2M7"),
            Err(Base85Error::UnexpectedChar { code: 0x1f, .. })
        ));
        assert!(matches!(
            from_base85("F*2M7\u{77}"),
            Err(Base85Error::UnexpectedChar { code: 0x77, .. })
        ));
    }

    #[test]
    fn decode_rejects_misplaced_shorthand() {
        assert!(matches!(
            from_base85("Fz"),
            Err(Base85Error::UnexpectedZero { position: 1 })
        ));
    }

    #[test]
    fn decode_rejects_broken_eod() {
        assert!(matches!(
            from_base85("<~F*2M7~"),
            Err(Base85Error::BrokenEod { .. })
        ));
        assert!(matches!(
            from_base85("<~F*2M7~x"),
            Err(Base85Error::BrokenEod { .. })
        ));
    }

    #[test]
    fn random_buffers_roundtrip() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5db);
        for _ in 0..64 {
            let len = rng.gen_range(0..257);
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let text = to_base85(&data, true);
            assert_eq!(from_base85(&text).unwrap(), data, "len {len}");
        }
    }
}
