//! Reading DEFLATE64 members through the method registry.

#[path = "../../oxiarc-deflate64/tests/common/mod.rs"]
mod common;

use oxiarc_archive::zip::{MethodRegistry, ReaderOptions, ZipEntryReader, open_member};
use oxiarc_core::CompressionMethod;
use std::io::{BufRead, Cursor, Read};

const LINES: usize = 100_000;

fn sample_member(options: ReaderOptions) -> ZipEntryReader<Cursor<Vec<u8>>> {
    let compressed = common::sample_stream(LINES, 10_000);
    let size = compressed.len() as u64;
    ZipEntryReader::open(
        &MethodRegistry::new(),
        CompressionMethod::Deflate64.id(),
        Cursor::new(compressed),
        size,
        options,
    )
    .unwrap()
}

#[test]
fn test_member_advertises_method_9() {
    let registry = MethodRegistry::new();
    let spec = registry.check_compression(9).unwrap();
    assert_eq!(spec.method, CompressionMethod::Deflate64);
    assert_eq!(registry.header_versions(9, 20, 20).unwrap(), (21, 21));
}

#[test]
fn test_read_whole_member() {
    let mut reader = sample_member(ReaderOptions::default());

    let mut output = Vec::new();
    reader.read_to_end(&mut output).unwrap();
    assert_eq!(output.len(), 2_188_890);
    assert_eq!(output, common::sample_text(LINES));
    assert!(reader.is_finished());
}

#[test]
fn test_read_18_then_line() {
    let mut reader = sample_member(ReaderOptions::default());

    assert_eq!(reader.read(&mut []).unwrap(), 0);

    let mut first = [0u8; 18];
    reader.read_exact(&mut first).unwrap();
    assert_eq!(&first, b"Sample content 0.\n");

    let mut line = String::new();
    reader.read_line(&mut line).unwrap();
    assert_eq!(line, "Sample content 1.\n");
}

#[test]
fn test_read_64k_then_lines() {
    let mut reader = sample_member(ReaderOptions::default());

    let mut block = vec![0u8; 65536];
    reader.read_exact(&mut block).unwrap();

    let mut rest_of_line = String::new();
    reader.read_line(&mut rest_of_line).unwrap();
    assert!(rest_of_line.ends_with('\n'));

    let mut line = String::new();
    reader.read_line(&mut line).unwrap();
    assert_eq!(line, "Sample content 3174.\n");
}

#[test]
fn test_chunk_size_does_not_change_output() {
    let expected = common::sample_text(2_000);
    let compressed = common::sample_stream(2_000, 300);

    for chunk_size in [1, 17, 4096, 1 << 20] {
        let mut reader = ZipEntryReader::open(
            &MethodRegistry::new(),
            9,
            Cursor::new(&compressed),
            compressed.len() as u64,
            ReaderOptions::new().with_chunk_size(chunk_size),
        )
        .unwrap();

        let mut output = Vec::new();
        reader.read_to_end(&mut output).unwrap();
        assert_eq!(output, expected, "chunk size {}", chunk_size);
    }
}

#[test]
fn test_lines_iterate_over_member() {
    let compressed = common::sample_stream(500, 100);
    let reader = open_member(9, Cursor::new(&compressed), compressed.len() as u64).unwrap();

    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>().unwrap();
    assert_eq!(lines.len(), 500);
    assert_eq!(lines[0], "Sample content 0.");
    assert_eq!(lines[499], "Sample content 499.");
}

#[test]
fn test_member_followed_by_next_header() {
    // Data after the member's compressed bytes is left in the source.
    let mut archive = common::sample_stream(10, 10);
    let size = archive.len() as u64;
    archive.extend_from_slice(b"PK\x03\x04");

    let mut reader = open_member(9, Cursor::new(archive), size).unwrap();
    let mut output = Vec::new();
    reader.read_to_end(&mut output).unwrap();
    assert_eq!(output, common::sample_text(10));

    let mut source = reader.into_inner();
    let mut next = Vec::new();
    source.read_to_end(&mut next).unwrap();
    assert_eq!(next, b"PK\x03\x04");
}

#[test]
fn test_corrupt_member() {
    let mut compressed = common::sample_stream(1_000, 1_000);
    // Turn the first block into a reserved block type.
    compressed[0] |= 0b110;
    let size = compressed.len() as u64;

    let mut reader = open_member(9, Cursor::new(compressed), size).unwrap();
    let err = reader.read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().starts_with("Bad Deflate64 data: "));
}
