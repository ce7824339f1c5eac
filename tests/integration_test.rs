//! Integration tests for directory scans and CSV output

use std::fs;
use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};

use qrstamp::commands::{build_cli, CommandFactory, QrstampCommandFactory};
use qrstamp::{OutputTarget, Qrstamp, ScanConfig, TimestampOutcome};

/// Renders `text` as a QR code PNG with 6-pixel modules and a 4-module quiet zone
fn qr_png(text: &str) -> Vec<u8> {
    let code = QrCode::new(text.as_bytes()).unwrap();
    let width = code.width() as u32;
    let colors = code.to_colors();
    let side = (width + 8) * 6;

    let image = GrayImage::from_fn(side, side, |x, y| {
        let (mx, my) = (x / 6, y / 6);
        if mx < 4 || my < 4 || mx >= width + 4 || my >= width + 4 {
            return Luma([255]);
        }
        match colors[((my - 4) * width + (mx - 4)) as usize] {
            Color::Dark => Luma([0]),
            Color::Light => Luma([255]),
        }
    });

    let mut buffer = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

#[test]
fn test_directory_scan_writes_csv() {
    let images = tempfile::tempdir().unwrap();
    fs::write(images.path().join("guest-02.png"), qr_png("Jane Doe, table 4")).unwrap();
    fs::write(images.path().join("guest-01.PNG"), qr_png("John \"JJ\" Smith")).unwrap();
    fs::write(images.path().join("guest-03.jpg"), b"truncated upload").unwrap();
    fs::write(images.path().join("readme.md"), b"# not an image").unwrap();

    let out = tempfile::tempdir().unwrap();
    let csv_path = out.path().join("qr_codes.csv");

    let scanner = Qrstamp::new(ScanConfig {
        input_dir: images.path().to_path_buf(),
        output: OutputTarget::File(csv_path.clone()),
        ..ScanConfig::default()
    });

    let records = scanner.scan().unwrap();
    assert_eq!(records.len(), 3);
    for record in &records {
        // PNG without EXIF and an unreadable JPEG both fall back to the file time
        assert!(matches!(record.timestamp(), TimestampOutcome::Filesystem(_)));
    }

    scanner.write_report(&records).unwrap();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Filename,QR Code Content,Date/Time");
    assert!(lines[1].starts_with("guest-01.PNG,\"John \"\"JJ\"\" Smith\","));
    assert!(lines[2].starts_with("guest-02.png,\"Jane Doe, table 4\","));
    assert!(lines[3].starts_with("guest-03.jpg,Error reading QR code,"));
    assert!(lines[3].ends_with('Z'));
}

#[test]
fn test_scan_command_from_cli_arguments() {
    let images = tempfile::tempdir().unwrap();
    fs::write(images.path().join("one.png"), qr_png("first")).unwrap();
    fs::write(images.path().join("two.png"), qr_png("second")).unwrap();

    let out = tempfile::tempdir().unwrap();
    let csv_path = out.path().join("report.csv");

    let matches = build_cli().get_matches_from([
        "qrstamp",
        "--dir", images.path().to_str().unwrap(),
        "--output", csv_path.to_str().unwrap(),
        "--jobs", "2",
        "--quote-all",
        "--no-progress",
    ]);
    let config = ScanConfig::from_args(&matches).unwrap();

    let command = QrstampCommandFactory::new().create_command(&matches, config).unwrap();
    command.execute().unwrap();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "\"Filename\",\"QR Code Content\",\"Date/Time\"");
    assert!(lines[1].starts_with("\"one.png\",\"first\",\""));
    assert!(lines[2].starts_with("\"two.png\",\"second\",\""));
}

#[test]
fn test_list_command_writes_no_report() {
    let images = tempfile::tempdir().unwrap();
    fs::write(images.path().join("one.png"), qr_png("first")).unwrap();
    fs::write(images.path().join("notes.txt"), b"skip me").unwrap();

    let out = tempfile::tempdir().unwrap();
    let csv_path = out.path().join("report.csv");

    let matches = build_cli().get_matches_from([
        "qrstamp",
        "--list",
        "--dir", images.path().to_str().unwrap(),
        "--output", csv_path.to_str().unwrap(),
    ]);
    let config = ScanConfig::from_args(&matches).unwrap();

    let command = QrstampCommandFactory::new().create_command(&matches, config).unwrap();
    command.execute().unwrap();

    assert!(!csv_path.exists());
}

#[test]
fn test_list_command_reports_missing_directory() {
    let matches = build_cli().get_matches_from([
        "qrstamp",
        "--list",
        "--dir", "/no/such/qrstamp/images",
    ]);
    let config = ScanConfig::from_args(&matches).unwrap();

    let command = QrstampCommandFactory::new().create_command(&matches, config).unwrap();
    assert!(command.execute().is_err());
}

#[test]
fn test_missing_directory_fails_the_run() {
    let scanner = Qrstamp::new(ScanConfig {
        input_dir: "/no/such/qrstamp/images".into(),
        ..ScanConfig::default()
    });
    assert!(scanner.scan().is_err());
}
