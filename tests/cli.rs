use std::fs;
use std::process::Command;

use tempfile::tempdir;

const HUFF: &str = env!("CARGO_BIN_EXE_huff");
const PUFF: &str = env!("CARGO_BIN_EXE_puff");

#[test]
fn test_huff_then_puff() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    let compressed = dir.path().join("original.huff");
    let restored = dir.path().join("restored.txt");

    let text = "Huffman encoding is a greedy algorithm that builds optimal prefix codes. ".repeat(20);
    fs::write(&original, &text).unwrap();

    let status = Command::new(HUFF)
        .arg(&original)
        .arg(&compressed)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(fs::metadata(&compressed).unwrap().len() < text.len() as u64);

    let status = Command::new(PUFF)
        .arg(&compressed)
        .arg(&restored)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&restored).unwrap(), text);
}

#[test]
fn test_paths_prompted_on_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let dir = tempdir().unwrap();
    let original = dir.path().join("in.bin");
    let compressed = dir.path().join("out.huff");
    fs::write(&original, [1u8, 2, 3, 3, 3]).unwrap();

    let mut child = Command::new(HUFF)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .unwrap();
    let answers = format!("{}\n{}\n", original.display(), compressed.display());
    child
        .stdin
        .take()
        .unwrap()
        .write_all(answers.as_bytes())
        .unwrap();
    assert!(child.wait().unwrap().success());

    let container = fs::read(&compressed).unwrap();
    assert_eq!(huffpuff::decompress_bytes(&container).unwrap(), [1u8, 2, 3, 3, 3]);
}

#[test]
fn test_corrupt_input_leaves_no_output() {
    let dir = tempdir().unwrap();
    let corrupt = dir.path().join("corrupt.huff");
    let restored = dir.path().join("restored.txt");

    let mut container = huffpuff::compress_bytes(b"some text that will be cut short").unwrap();
    container.truncate(container.len() - 3);
    fs::write(&corrupt, &container).unwrap();

    let output = Command::new(PUFF)
        .arg(&corrupt)
        .arg(&restored)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed container"));
    assert!(!restored.exists());
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    let output = Command::new(HUFF)
        .arg(dir.path().join("does-not-exist"))
        .arg(dir.path().join("out.huff"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("can't open file"));
}
