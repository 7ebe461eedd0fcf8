//! Edge case tests for the bit cursors.

use zbin_core::{BitsReader, BitsWriter};

#[test]
fn test_read_bit_saturates_past_capacity() {
    let data = [0xA5, 0xFF, 0x01];
    for extra in [0u64, 1, 7, 64] {
        let mut reader = BitsReader::new(&data);
        let size = reader.size_bits();
        let mut ones = 0;
        for i in 0..size + extra {
            let bit = reader.read_bit();
            if i >= size {
                assert_eq!(bit, 0);
            }
            ones += u32::from(bit);
            assert!(reader.position() <= size);
        }
        assert_eq!(ones, 4 + 8 + 1);
        assert_eq!(reader.position(), size);
    }
}

#[test]
fn test_empty_buffer() {
    let mut reader = BitsReader::new(&[]);
    assert_eq!(reader.size_bits(), 0);
    assert_eq!(reader.read_bit(), 0);
    assert_eq!(reader.read_bits(32), 0);
    assert_eq!(reader.read_golomb(), 0);
    assert!(reader.is_exhausted());

    let mut buf: [u8; 0] = [];
    let mut writer = BitsWriter::new(&mut buf);
    writer.write_bits(8, 0xFF);
    assert_eq!(writer.position(), 0);
}

#[test]
fn test_golomb_spec_vectors() {
    // x=0 -> "1", x=1 -> "010", x=6 -> "00111"
    for (value, bits, len) in [(0u64, 0b1u64, 1u32), (1, 0b010, 3), (6, 0b00111, 5)] {
        let mut buf = [0u8; 1];
        {
            let mut writer = BitsWriter::new(&mut buf);
            writer.write_golomb(value);
            assert_eq!(u64::from(len), writer.position());
        }
        let mut reader = BitsReader::new(&buf);
        assert_eq!(reader.read_bits(len), bits);

        let mut reader = BitsReader::new(&buf);
        assert_eq!(reader.read_golomb(), value);
    }
}

#[test]
fn test_golomb_roundtrip_below_2_pow_20() {
    // The longest code in range is 2 * 20 + 1 = 41 bits.
    let mut buf = [0u8; 6];
    for value in 0..(1u64 << 20) {
        buf.fill(0);
        {
            let mut writer = BitsWriter::new(&mut buf);
            writer.write_golomb(value);
        }
        let mut reader = BitsReader::new(&buf);
        assert_eq!(reader.read_golomb(), value);
    }
}

#[test]
fn test_golomb_sequence_in_one_buffer() {
    let values: Vec<u64> = (0..200).map(|i| i * i * 7).collect();
    let mut buf = vec![0u8; 1024];
    let written;
    {
        let mut writer = BitsWriter::new(&mut buf);
        for &v in &values {
            writer.write_golomb(v);
        }
        written = writer.bytes_written();
    }

    let mut reader = BitsReader::new(&buf[..written]);
    for &v in &values {
        assert_eq!(reader.read_golomb(), v);
    }
    assert!(reader.remaining_bits() < 8);
}

#[test]
fn test_truncated_golomb_is_detectable() {
    // Prefix promises a 4-bit suffix, but only 3 bits remain.
    let data = [0b0000_1010u8];
    let mut reader = BitsReader::new(&data);
    let _ = reader.read_golomb();
    assert!(reader.is_exhausted());
}

#[test]
fn test_mixed_fields_like_a_header() {
    // forbidden_zero_bit(1) nal_ref_idc(2) nal_unit_type(5) then ue(v), se(v), flag
    let mut buf = [0u8; 4];
    {
        let mut writer = BitsWriter::new(&mut buf);
        writer.write_bits(1, 0);
        writer.write_bits(2, 3);
        writer.write_bits(5, 7);
        writer.write_golomb(100);
        writer.write_signed_golomb(-3);
        writer.write_bit(1);
        writer.align_to_byte();
    }

    let mut reader = BitsReader::new(&buf);
    assert_eq!(reader.read_bits(1), 0);
    assert_eq!(reader.read_bits(2), 3);
    assert_eq!(reader.read_bits(5), 7);
    assert_eq!(reader.read_golomb(), 100);
    assert_eq!(reader.read_signed_golomb(), -3);
    assert_eq!(reader.read_bit(), 1);
    reader.align_to_byte();
    assert_eq!(reader.position() % 8, 0);
}
