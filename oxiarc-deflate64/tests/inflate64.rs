//! Streaming DEFLATE64 decoding over generated streams.

mod common;

use common::{StreamBuilder, Token, literals, sample_stream, sample_text};
use oxiarc_core::StreamDecoder;
use oxiarc_deflate64::{Deflate64Decoder, Inflater, MIN_READ_SIZE};

fn decode_in_chunks(compressed: &[u8], chunk_size: usize) -> Vec<u8> {
    let mut inflater = Inflater::new();
    let mut output = Vec::new();
    for chunk in compressed.chunks(chunk_size) {
        output.extend(inflater.decompress(chunk).unwrap());
    }
    assert!(inflater.is_finished(), "chunk size {}", chunk_size);
    output
}

fn is_sample_line(line: &[u8]) -> bool {
    let Some(rest) = line.strip_prefix(b"Sample content ") else {
        return false;
    };
    let Some(number) = rest.strip_suffix(b".\n") else {
        return false;
    };
    !number.is_empty() && number.iter().all(u8::is_ascii_digit)
}

#[test]
fn test_sample_fixture_in_64k_chunks() {
    let compressed = sample_stream(100_000, 10_000);

    let mut decoder = Deflate64Decoder::new();
    let mut output = Vec::new();
    for chunk in compressed.chunks(decoder.min_read_size()) {
        assert!(!decoder.is_finished());
        output.extend(decoder.decompress(chunk).unwrap());
    }

    assert!(decoder.is_finished());
    assert_eq!(output.len(), 2_188_890);
    assert_eq!(&output[..18], b"Sample content 0.\n");
    assert!(output.split_inclusive(|&b| b == b'\n').all(is_sample_line));
    assert_eq!(output, sample_text(100_000));
}

#[test]
fn test_chunking_invariance() {
    let compressed = sample_stream(3_000, 700);
    let expected = sample_text(3_000);

    let whole = decode_in_chunks(&compressed, compressed.len());
    assert_eq!(whole, expected);

    for chunk_size in [1, 2, 3, 5, 7, 13, 64, 1000, MIN_READ_SIZE] {
        assert_eq!(
            decode_in_chunks(&compressed, chunk_size),
            expected,
            "chunk size {}",
            chunk_size
        );
    }
}

#[test]
fn test_empty_input_keeps_state() {
    let compressed = sample_stream(20, 20);
    let mut inflater = Inflater::new();

    assert!(inflater.decompress(b"").unwrap().is_empty());
    assert!(!inflater.is_finished());

    let (head, tail) = compressed.split_at(compressed.len() / 2);
    let mut output = inflater.decompress(head).unwrap();
    assert!(inflater.decompress(b"").unwrap().is_empty());
    assert!(!inflater.is_finished());
    output.extend(inflater.decompress(tail).unwrap());

    assert!(inflater.is_finished());
    assert!(inflater.decompress(b"").unwrap().is_empty());
    assert!(inflater.is_finished());
    assert_eq!(output, sample_text(20));
}

#[test]
fn test_eof_set_by_last_byte() {
    let compressed = sample_stream(50, 50);
    let (body, last) = compressed.split_at(compressed.len() - 1);

    let mut inflater = Inflater::new();
    inflater.decompress(body).unwrap();
    assert!(!inflater.is_finished());
    inflater.decompress(last).unwrap();
    assert!(inflater.is_finished());
}

#[test]
fn test_distance_65536() {
    let history: Vec<u8> = (0..65536u32).map(|i| (i % 251) as u8).collect();

    let mut builder = StreamBuilder::new();
    builder
        .stored(&history[..65535], false)
        .stored(&history[65535..], false)
        .fixed(
            &[Token::Match {
                length: 100,
                distance: 65536,
            }],
            true,
        );
    let compressed = builder.finish();

    let output = decode_in_chunks(&compressed, 4096);
    assert_eq!(output.len(), 65636);
    assert_eq!(&output[..65536], &history[..]);
    assert_eq!(&output[65536..], &history[..100]);
}

#[test]
fn test_length_65538() {
    let mut tokens = literals(b"q");
    tokens.push(Token::Match {
        length: 65538,
        distance: 1,
    });

    let mut builder = StreamBuilder::new();
    builder.dynamic_full(&tokens, true);
    let compressed = builder.finish();

    let output = decode_in_chunks(&compressed, 3);
    let copied = &output[1..];
    assert_eq!(copied.len(), 65538);
    assert!(copied.iter().all(|&b| b == b'q'));
}

#[test]
fn test_sparse_dynamic_tables() {
    // 16 codes of 4 bits and a single one-bit distance code.
    let mut litlen = vec![0u8; 286];
    for symbol in (b'a'..=b'l').map(usize::from).chain([256, 257, 258, 285]) {
        litlen[symbol] = 4;
    }
    let distance = [1u8];

    let tokens = [
        Token::Literal(b'a'),
        Token::Match {
            length: 3,
            distance: 1,
        },
        Token::Match {
            length: 4,
            distance: 1,
        },
        Token::Match {
            length: 1000,
            distance: 1,
        },
        Token::Literal(b'l'),
    ];

    let mut builder = StreamBuilder::new();
    builder.dynamic(&tokens, &litlen, &distance, true);
    let compressed = builder.finish();

    let mut expected = vec![b'a'; 1 + 3 + 4 + 1000];
    expected.push(b'l');
    assert_eq!(decode_in_chunks(&compressed, 1), expected);
}

#[test]
fn test_block_without_distance_codes() {
    // 255 codes of 8 bits and 2 of 9 bits fill the code space exactly.
    let litlen: Vec<u8> = (0..257).map(|symbol| if symbol < 255 { 8 } else { 9 }).collect();
    let mut builder = StreamBuilder::new();
    builder.dynamic(&literals(b"no matches here"), &litlen, &[0], true);
    let compressed = builder.finish();

    assert_eq!(decode_in_chunks(&compressed, 2), b"no matches here");
}

#[test]
fn test_unused_input_after_end() {
    let mut compressed = sample_stream(10, 10);
    compressed.extend_from_slice(b"PK\x03\x04");

    let mut inflater = Inflater::new();
    let output = inflater.decompress(&compressed).unwrap();
    assert_eq!(output, sample_text(10));
    assert_eq!(inflater.unused_input(), b"PK\x03\x04");
    assert_eq!(inflater.total_in() as usize, compressed.len() - 4);
}
