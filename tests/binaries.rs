use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

const ENCODE: &str = env!("CARGO_BIN_EXE_encode");
const DECODE: &str = env!("CARGO_BIN_EXE_decode");

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("huffpack-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn run(bin: &str, args: &[&PathBuf]) -> Output {
    Command::new(bin).args(args).output().unwrap()
}

#[test]
fn files_round_trip_through_both_binaries() {
    let original = scratch("pair.txt");
    let packed = scratch("pair.huf");
    let restored = scratch("pair.out");
    let data = b"So she went into the garden to cut a cabbage-leaf to make an apple-pie.\n";
    fs::write(&original, data).unwrap();

    let out = run(ENCODE, &[&original, &packed]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Symbol\tFreq\tCode\n"));
    assert!(stdout.contains(&format!("Total chars = {}", data.len())));

    let out = run(DECODE, &[&packed, &restored]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn empty_file_round_trips() {
    let original = scratch("empty.txt");
    let packed = scratch("empty.huf");
    let restored = scratch("empty.out");
    fs::write(&original, b"").unwrap();

    assert_eq!(run(ENCODE, &[&original, &packed]).status.code(), Some(0));
    assert_eq!(fs::read(&packed).unwrap(), vec![0; 10]);
    assert_eq!(run(DECODE, &[&packed, &restored]).status.code(), Some(0));
    assert_eq!(fs::read(&restored).unwrap(), b"");
}

#[test]
fn wrong_argument_count_exits_with_one() {
    let only = scratch("only-one-arg");
    for bin in [ENCODE, DECODE] {
        assert_eq!(run(bin, &[]).status.code(), Some(1));
        assert_eq!(run(bin, &[&only]).status.code(), Some(1));
        assert_eq!(run(bin, &[&only, &only, &only]).status.code(), Some(1));
    }
}

#[test]
fn unreadable_input_exits_with_two() {
    let missing = scratch("does-not-exist.txt");
    let target = scratch("never-written.out");
    for bin in [ENCODE, DECODE] {
        assert_eq!(run(bin, &[&missing, &target]).status.code(), Some(2));
    }
}

#[test]
fn unwritable_output_exits_with_three() {
    let input = scratch("writable-input.txt");
    fs::write(&input, b"abc").unwrap();
    let bad_output = scratch("no-such-dir").join("out.huf");
    assert_eq!(run(ENCODE, &[&input, &bad_output]).status.code(), Some(3));
}

#[test]
fn malformed_compressed_file_exits_with_four() {
    let bogus = scratch("bogus.huf");
    let target = scratch("bogus.out");
    // Declares one symbol, then stops.
    fs::write(&bogus, [1u8, 0, b'x']).unwrap();
    assert_eq!(run(DECODE, &[&bogus, &target]).status.code(), Some(4));
}
