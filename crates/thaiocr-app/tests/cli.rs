// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Runs the `thai-ocr` binary end to end.

use std::path::Path;
use std::process::{Command, Output};

fn thai_ocr(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_thai-ocr"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to run thai-ocr")
}

#[test]
fn help_lists_tesseract_flag() {
    let home = tempfile::tempdir().unwrap();
    let out = thai_ocr(home.path(), &["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("--tesseract-path"));
}

#[test]
fn unsupported_input_exits_with_one() {
    let home = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    let input = work.path().join("notes.docx");
    std::fs::write(&input, "whatever").unwrap();
    let output = work.path().join("notes.txt");

    let out = thai_ocr(
        home.path(),
        &[input.to_str().unwrap(), output.to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Processing failed"));
    assert!(!output.exists());
}

#[test]
fn malformed_config_exits_with_one() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("broken.json");
    std::fs::write(&config, "[1, 2").unwrap();

    let out = thai_ocr(
        home.path(),
        &["in.png", "out.txt", "--config", config.to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(1));
}

#[cfg(unix)]
#[test]
fn fake_engine_writes_pdf_pages_and_saves_config() {
    use std::os::unix::fs::PermissionsExt;

    let home = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();

    for (name, body) in [
        (
            "tesseract",
            "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then echo tesseract 5.3.4; exit 0; fi\necho \"หน้า $(basename \"$1\" .png)\"\n",
        ),
        ("pdftoppm", "#!/bin/sh\n: > \"$5-1.png\"\n: > \"$5-2.png\"\n"),
    ] {
        let path = bin.path().join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    let input = work.path().join("book.pdf");
    std::fs::write(&input, b"%PDF-1.5").unwrap();
    let output = work.path().join("out").join("book.txt");
    let config = home.path().join("thai-ocr").join("config.json");

    let out = thai_ocr(
        home.path(),
        &[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--tesseract-path",
            bin.path().join("tesseract").to_str().unwrap(),
            "--poppler-path",
            bin.path().to_str().unwrap(),
            "--save-config",
        ],
    );
    assert!(out.status.success(), "stdout: {}", String::from_utf8_lossy(&out.stdout));
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "=== Page 1 ===\nหน้า page-1\n\n=== Page 2 ===\nหน้า page-2\n"
    );

    let saved = std::fs::read_to_string(config).unwrap();
    assert!(saved.contains("\"language\": \"tha\""));
    assert!(saved.contains("\"psm_mode\": 6"));
}
