//! Minimal OSC 1.0 message encoding, enough for the remote-control link.

#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    Int(i32),
    Str(String),
}

impl OscArg {
    fn tag(&self) -> char {
        match self {
            OscArg::Int(_) => 'i',
            OscArg::Str(_) => 's',
        }
    }
}

/// Encodes a single OSC message (not a bundle).
pub fn encode_message(address: &str, args: &[OscArg]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    push_padded(&mut buf, address);

    let tags: String = std::iter::once(',').chain(args.iter().map(OscArg::tag)).collect();
    push_padded(&mut buf, &tags);

    for arg in args {
        match arg {
            OscArg::Int(v) => buf.extend_from_slice(&v.to_be_bytes()),
            OscArg::Str(s) => push_padded(&mut buf, s),
        }
    }
    buf
}

// NUL-terminated, then padded to a multiple of four bytes.
fn push_padded(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_verb_only_message() {
        let bytes = encode_message("/et", &[OscArg::Str("connect".into())]);
        assert_eq!(
            bytes,
            b"/et\0,s\0\0connect\0".to_vec(),
        );
    }

    #[test]
    fn encodes_event_with_int_payload() {
        let bytes = encode_message(
            "/eyetracker",
            &[
                OscArg::Str("event".into()),
                OscArg::Str("target".into()),
                OscArg::Int(7),
            ],
        );
        let mut expected = b"/eyetracker\0,ssi\0\0\0\0event\0\0\0target\0\0".to_vec();
        expected.extend_from_slice(&[0, 0, 0, 7]);
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len() % 4, 0);
    }

    #[test]
    fn negative_ints_are_big_endian_twos_complement() {
        let bytes = encode_message("/a", &[OscArg::Int(-2)]);
        assert_eq!(&bytes[bytes.len() - 4..], &[0xff, 0xff, 0xff, 0xfe]);
    }
}
