//! Conversion between the two encodings of an ECDSA signature (r, s).
//!
//! JWS carries the raw fixed-width concatenation `r || s` (RFC 7518 section 3.4), each component
//! left-padded with zeros to the byte length of the curve order.  Conventional ECDSA primitives
//! produce and consume the ASN.1 DER encoding `SEQUENCE { INTEGER r, INTEGER s }`.

const DER_TAG_INTEGER: u8 = 0x02;
const DER_TAG_SEQUENCE: u8 = 0x30;

/// Converts a raw `r || s` signature into a DER-encoded `SEQUENCE { INTEGER r, INTEGER s }`.
///
/// The raw signature must be exactly `2 * component_len` bytes.  A signature of any other length
/// is accepted only if it already looks like DER (leading SEQUENCE tag), in which case it is returned
/// unchanged.
pub fn raw_to_der(raw: &[u8], component_len: usize) -> Result<Vec<u8>, &'static str> {
    if raw.len() != 2 * component_len {
        if raw.first() == Some(&DER_TAG_SEQUENCE) {
            return Ok(raw.to_vec());
        }
        return Err("raw ECDSA signature has the wrong length and is not DER-encoded");
    }
    let (r, s) = raw.split_at(component_len);

    let mut content = Vec::with_capacity(2 * (component_len + 4));
    write_der_integer(&mut content, r)?;
    write_der_integer(&mut content, s)?;

    let mut der = Vec::with_capacity(content.len() + 3);
    der.push(DER_TAG_SEQUENCE);
    write_der_length(&mut der, content.len())?;
    der.extend_from_slice(&content);
    Ok(der)
}

/// Converts a DER-encoded `SEQUENCE { INTEGER r, INTEGER s }` into the raw `r || s` form, each
/// component left-padded with zeros to exactly `component_len` bytes.
pub fn der_to_raw(der: &[u8], component_len: usize) -> Result<Vec<u8>, &'static str> {
    let mut reader = DERReader(der);
    let mut sequence = DERReader(reader.read_tlv(DER_TAG_SEQUENCE)?);
    if !reader.0.is_empty() {
        return Err("trailing bytes after DER SEQUENCE");
    }
    let r = sequence.read_tlv(DER_TAG_INTEGER)?;
    let s = sequence.read_tlv(DER_TAG_INTEGER)?;
    if !sequence.0.is_empty() {
        return Err("DER SEQUENCE contains more than two INTEGERs");
    }

    let mut raw = Vec::with_capacity(2 * component_len);
    write_padded_component(&mut raw, r, component_len)?;
    write_padded_component(&mut raw, s, component_len)?;
    Ok(raw)
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first_nonzero..]
}

fn write_der_integer(out: &mut Vec<u8>, unsigned_be: &[u8]) -> Result<(), &'static str> {
    let magnitude = strip_leading_zeros(unsigned_be);
    // DER INTEGERs are two's complement, so a set high bit needs a 0x00 in front to stay positive.
    // Zero is encoded as the single byte 0x00.
    let needs_padding = magnitude.first().map_or(true, |&b| b & 0x80 != 0);
    out.push(DER_TAG_INTEGER);
    write_der_length(out, magnitude.len() + usize::from(needs_padding))?;
    if needs_padding {
        out.push(0x00);
    }
    out.extend_from_slice(magnitude);
    Ok(())
}

/// Only the lengths that DERReader::read_length accepts can be written.
fn write_der_length(out: &mut Vec<u8>, len: usize) -> Result<(), &'static str> {
    if len < 0x80 {
        out.push(len as u8);
    } else if len <= 0xff {
        out.push(0x81);
        out.push(len as u8);
    } else if len <= 0xffff {
        out.push(0x82);
        out.push((len >> 8) as u8);
        out.push(len as u8);
    } else {
        return Err("ECDSA signature is too long to DER-encode");
    }
    Ok(())
}

fn write_padded_component(
    out: &mut Vec<u8>,
    der_integer_content: &[u8],
    component_len: usize,
) -> Result<(), &'static str> {
    if der_integer_content.first().is_some_and(|&b| b & 0x80 != 0) {
        return Err("negative DER INTEGER in ECDSA signature");
    }
    let magnitude = strip_leading_zeros(der_integer_content);
    if magnitude.len() > component_len {
        return Err("DER INTEGER is too long for the curve");
    }
    out.resize(out.len() + component_len - magnitude.len(), 0x00);
    out.extend_from_slice(magnitude);
    Ok(())
}

struct DERReader<'a>(&'a [u8]);

impl<'a> DERReader<'a> {
    fn read_byte(&mut self) -> Result<u8, &'static str> {
        let (&b, rest) = self.0.split_first().ok_or("truncated DER")?;
        self.0 = rest;
        Ok(b)
    }
    fn read_length(&mut self) -> Result<usize, &'static str> {
        let first = self.read_byte()?;
        match first {
            0x00..=0x7f => Ok(usize::from(first)),
            0x81 => {
                let len = usize::from(self.read_byte()?);
                if len < 0x80 {
                    return Err("non-minimal DER length");
                }
                Ok(len)
            }
            0x82 => {
                let len = (usize::from(self.read_byte()?) << 8) | usize::from(self.read_byte()?);
                if len <= 0xff {
                    return Err("non-minimal DER length");
                }
                Ok(len)
            }
            _ => Err("unsupported DER length encoding"),
        }
    }
    /// Reads a tag-length-value with the expected tag, returning the value bytes.
    fn read_tlv(&mut self, expected_tag: u8) -> Result<&'a [u8], &'static str> {
        if self.read_byte()? != expected_tag {
            return Err("unexpected DER tag");
        }
        let len = self.read_length()?;
        if len > self.0.len() {
            return Err("truncated DER");
        }
        let (value, rest) = self.0.split_at(len);
        self.0 = rest;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_to_der_high_bit_component() {
        let mut raw = [0x11u8; 64];
        raw[0] = 0xFF;
        let der = raw_to_der(&raw, 32).expect("pass");
        // SEQUENCE { INTEGER (0x00 + 32 bytes), INTEGER (32 bytes) }
        assert_eq!(der[0], 0x30);
        assert_eq!(der[1] as usize, 2 + 33 + 2 + 32);
        assert_eq!(&der[2..5], &[0x02, 33, 0x00]);
        assert_eq!(&der[5..37], &raw[..32]);
        assert_eq!(&der[37..39], &[0x02, 32]);
        assert_eq!(&der[39..], &raw[32..]);
        assert_eq!(der_to_raw(&der, 32).expect("pass"), raw);
    }

    #[test]
    fn test_raw_to_der_leading_zeros_are_stripped() {
        let mut raw = [0x00u8; 96];
        raw[47] = 0x01;
        raw[49] = 0x7f;
        let der = raw_to_der(&raw, 48).expect("pass");
        let mut expected_der = vec![0x30, 0x34, 0x02, 0x01, 0x01, 0x02, 0x2f, 0x7f];
        expected_der.extend(std::iter::repeat(0x00).take(46));
        assert_eq!(der, expected_der);
        // The raw form comes back at exactly the original width.
        assert_eq!(der_to_raw(&der, 48).expect("pass"), raw);
    }

    #[test]
    fn test_zero_component() {
        let raw = [0x00u8; 64];
        let der = raw_to_der(&raw, 32).expect("pass");
        assert_eq!(der, vec![0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00]);
        assert_eq!(der_to_raw(&der, 32).expect("pass"), raw);
    }

    #[test]
    fn test_oversized_components_are_rejected() {
        // Each INTEGER fits a two-byte length, but the SEQUENCE holding both does not.
        let component_len = 0x9000;
        let raw = vec![0x7fu8; 2 * component_len];
        assert!(raw_to_der(&raw, component_len).is_err());
        let component_len = 0x10000;
        let raw = vec![0x7fu8; 2 * component_len];
        assert!(raw_to_der(&raw, component_len).is_err());
        // The largest encodable signature still round-trips.
        let component_len = 0x7ff0;
        let raw = vec![0x7fu8; 2 * component_len];
        let der = raw_to_der(&raw, component_len).expect("pass");
        assert_eq!(&der[..4], &[0x30, 0x82, 0xff, 0xe8]);
        assert_eq!(der_to_raw(&der, component_len).expect("pass"), raw);
    }

    #[test]
    fn test_p521_uses_long_form_length() {
        let mut raw = [0xA5u8; 132];
        raw[0] = 0x01;
        raw[66] = 0x01;
        let der = raw_to_der(&raw, 66).expect("pass");
        assert_eq!(&der[..3], &[0x30, 0x81, 0x88]);
        assert_eq!(der.len(), 3 + 0x88);
        assert_eq!(der_to_raw(&der, 66).expect("pass"), raw);
    }

    #[test]
    fn test_der_passthrough() {
        let der = [0x30, 0x06, 0x02, 0x01, 0x05, 0x02, 0x01, 0x07];
        assert_eq!(raw_to_der(&der, 32).expect("pass"), der);
        raw_to_der(&[0x01u8; 63], 32).expect_err("pass");
        raw_to_der(&[], 32).expect_err("pass");
    }

    #[test]
    fn test_der_to_raw_rejects_malformed() {
        // Wrong outer tag.
        der_to_raw(&[0x31, 0x06, 0x02, 0x01, 0x05, 0x02, 0x01, 0x07], 32).expect_err("pass");
        // Truncated.
        der_to_raw(&[0x30, 0x06, 0x02, 0x01, 0x05, 0x02, 0x01], 32).expect_err("pass");
        // Trailing bytes.
        der_to_raw(&[0x30, 0x06, 0x02, 0x01, 0x05, 0x02, 0x01, 0x07, 0x00], 32).expect_err("pass");
        // Only one INTEGER.
        der_to_raw(&[0x30, 0x03, 0x02, 0x01, 0x05], 32).expect_err("pass");
        // Negative INTEGER.
        der_to_raw(&[0x30, 0x06, 0x02, 0x01, 0x85, 0x02, 0x01, 0x07], 32).expect_err("pass");
        // Component longer than the curve allows.
        let mut too_long = vec![0x30, 0x25, 0x02, 0x21];
        too_long.extend(std::iter::repeat(0x11).take(33));
        too_long.extend([0x02, 0x00]);
        der_to_raw(&too_long, 32).expect_err("pass");
    }
}
