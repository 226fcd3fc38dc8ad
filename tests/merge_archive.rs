//! End-to-end merge behaviour over real ZIP bytes.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};
use zipstitch::{merge_archive, Error, MergeAction};

fn build_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in files {
        writer.start_file(name.to_string(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn entry_names(bytes: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn read_entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = Vec::new();
    file.read_to_end(&mut out).unwrap();
    out
}

#[test]
fn merges_matched_pair_and_passes_binary_through() {
    let jpeg: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];
    let input = build_zip(&[
        ("01_Ch1_1_.txt", b"Hello "),
        ("01_Ch1_2_.txt", b"\nWorld"),
        ("cover.jpg", jpeg),
    ]);

    let (output, log) = merge_archive(&input).unwrap();

    let mut names = entry_names(&output);
    names.sort();
    assert_eq!(names, vec!["01_Ch1.txt", "cover.jpg"]);
    assert_eq!(read_entry(&output, "01_Ch1.txt"), b"Hello World");
    assert_eq!(read_entry(&output, "cover.jpg"), jpeg);

    assert_eq!(
        log,
        vec![MergeAction::Merged {
            part1: "01_Ch1_1_.txt".to_string(),
            part2: "01_Ch1_2_.txt".to_string(),
            output: "01_Ch1.txt".to_string(),
        }]
    );
}

#[test]
fn single_part_kept_under_original_name() {
    let input = build_zip(&[("07_Solo_2_.txt", b"tail only")]);

    let (output, log) = merge_archive(&input).unwrap();

    assert_eq!(entry_names(&output), vec!["07_Solo_2_.txt"]);
    assert_eq!(read_entry(&output, "07_Solo_2_.txt"), b"tail only");
    assert_eq!(
        log,
        vec![MergeAction::KeptSingle {
            path: "07_Solo_2_.txt".to_string(),
            missing_part: 1,
        }]
    );
}

#[test]
fn unmatched_text_passes_through_unchanged() {
    let input = build_zip(&[("Intro_3_.txt", b"not a pairable marker")]);

    let (output, log) = merge_archive(&input).unwrap();

    assert_eq!(entry_names(&output), vec!["Intro_3_.txt"]);
    assert_eq!(read_entry(&output, "Intro_3_.txt"), b"not a pairable marker");
    assert_eq!(
        log,
        vec![MergeAction::KeptUnchanged {
            path: "Intro_3_.txt".to_string(),
        }]
    );
}

#[test]
fn archive_without_pairable_files_keeps_file_set_and_content() {
    let files: &[(&str, &[u8])] = &[
        ("readme.txt", b"plain"),
        ("data.bin", &[0u8, 1, 2, 3]),
        ("notes/extra.txt", b"nested"),
    ];
    let input = build_zip(files);

    let (output, _log) = merge_archive(&input).unwrap();

    let mut names = entry_names(&output);
    names.sort();
    assert_eq!(names, vec!["data.bin", "notes/extra.txt", "readme.txt"]);
    for (name, content) in files {
        assert_eq!(&read_entry(&output, name), content, "content of {name}");
    }
}

#[test]
fn empty_archive_is_an_error() {
    let input = build_zip(&[]);
    let err = merge_archive(&input).unwrap_err();
    assert!(matches!(err, Error::EmptyArchive));
}

#[test]
fn corrupt_archive_is_an_error() {
    let err = merge_archive(b"definitely not a zip").unwrap_err();
    assert!(matches!(err, Error::Archive(_)));
}

#[test]
fn non_utf8_text_entry_aborts_the_run() {
    let input = build_zip(&[
        ("01_Ch_1_.txt", &[0xff, 0xfe][..]),
        ("01_Ch_2_.txt", b"ok"),
    ]);

    let err = merge_archive(&input).unwrap_err();
    match err {
        Error::Decode { path } => assert_eq!(path, "01_Ch_1_.txt"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn mixed_archive_logs_every_text_decision_in_order() {
    let input = build_zip(&[
        ("02_B_1_.txt", b"b1"),
        ("01_A_1_.txt", b"a1"),
        ("02_B_2_.txt", b"\nb2"),
        ("notes.txt", b"n"),
        ("cover.jpg", &[0xff, 0xd8][..]),
    ]);

    let (output, log) = merge_archive(&input).unwrap();

    assert_eq!(read_entry(&output, "02_B.txt"), b"b1b2");
    assert_eq!(
        log,
        vec![
            MergeAction::Merged {
                part1: "02_B_1_.txt".to_string(),
                part2: "02_B_2_.txt".to_string(),
                output: "02_B.txt".to_string(),
            },
            MergeAction::KeptSingle {
                path: "01_A_1_.txt".to_string(),
                missing_part: 2,
            },
            MergeAction::KeptUnchanged {
                path: "notes.txt".to_string(),
            },
        ]
    );
}
