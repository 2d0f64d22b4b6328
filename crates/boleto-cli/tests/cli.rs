//! Integration tests for the `boleto` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const BANK_LINE: &str = "23790.12345 60000.123456 78901.234567 8 12340000010000";
const BANK_DIGITS: &str = "23790123456000012345678901234567812340000010000";

fn cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("boleto").unwrap();
    // Keep the user's real config out of the way
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

/// Build a PDF where each page holds the given lines of text.
fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut content = String::from("BT /F1 10 Tf 40 760 Td 14 TL ");
        for line in *lines {
            content.push_str(&format!("({line} ) Tj T* "));
        }
        content.push_str("ET");

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(pages.len() as i64),
    });

    for &pid in &page_ids {
        if let Ok(dict) = doc.get_object_mut(pid).and_then(|o| o.as_dict_mut()) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn boleto_page() -> Vec<&'static str> {
    vec![
        "Pagador: ACME Comercio LTDA CNPJ 12.345.678/0001-90",
        "Vencimento 10/05/2025",
        "Valor do documento R$ 1.500,00",
        BANK_LINE,
    ]
}

#[test]
fn help_lists_subcommands() {
    let home = tempfile::tempdir().unwrap();
    cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn config_path_points_at_boleto_dir() {
    let home = tempfile::tempdir().unwrap();
    cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn config_path_follows_global_flag() {
    let home = tempfile::tempdir().unwrap();
    let custom = home.path().join("custom-settings.json");
    cmd(home.path())
        .arg("-c")
        .arg(&custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom-settings.json"))
        .stdout(predicate::str::contains("missing"));
}

#[test]
fn config_init_writes_defaults() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("boleto.json");

    cmd(home.path())
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["extraction"]["mode"], "strict");

    // A second init without --force refuses to overwrite
    cmd(home.path())
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn process_exports_csv_row() {
    let dir = tempfile::tempdir().unwrap();
    let page = boleto_page();
    let pdf = dir.path().join("boleto.pdf");
    std::fs::write(&pdf, pdf_with_pages(&[&page])).unwrap();

    let expected_row = format!(
        "boleto.pdf (page 1),12.345.678/0001-90,10/05/2025,1500.00,{}",
        BANK_DIGITS
    );

    cmd(dir.path())
        .args(["process", "-f", "csv"])
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "source_label,payer_document,due_date,amount,barcode_digits",
        ))
        .stdout(predicate::str::contains(expected_row));
}

#[test]
fn process_strict_drops_cover_page() {
    let dir = tempfile::tempdir().unwrap();
    let cover: &[&str] = &["Carta de cobranca", "Segue boleto em anexo"];
    let page = boleto_page();
    let pdf = dir.path().join("lote.pdf");
    std::fs::write(&pdf, pdf_with_pages(&[cover, &page])).unwrap();

    let output = cmd(dir.path())
        .args(["process", "-f", "json"])
        .arg(&pdf)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = value["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["source_label"], "lote.pdf (page 2)");
    assert_eq!(records[0]["barcode_digits"], BANK_DIGITS);
}

#[test]
fn process_lenient_keeps_pending_file() {
    let dir = tempfile::tempdir().unwrap();
    let cover: &[&str] = &["Carta de cobranca", "Valor R$ 80,00"];
    let pdf = dir.path().join("sem-codigo.pdf");
    std::fs::write(&pdf, pdf_with_pages(&[cover])).unwrap();

    let output = cmd(dir.path())
        .args(["process", "-f", "json", "--mode", "lenient"])
        .arg(&pdf)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["records"][0]["source_label"], "sem-codigo.pdf");
    assert!(value["records"][0]["barcode_digits"].is_null());
    assert_eq!(value["summary"]["pending"], 1);
}

#[test]
fn process_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["process", "/nonexistent/boleto.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_reports_unreadable_files_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let page = boleto_page();
    std::fs::write(dir.path().join("a.pdf"), pdf_with_pages(&[&page])).unwrap();
    std::fs::write(dir.path().join("b.pdf"), b"not a pdf at all").unwrap();

    let pattern = dir.path().join("*.pdf");
    let output = cmd(dir.path())
        .args(["batch", "-f", "csv", "-j", "2"])
        .arg(pattern.to_str().unwrap())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("a.pdf (page 1),"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("b.pdf"));
    assert!(stderr.contains("Failed files:"));
}

#[test]
fn batch_sequential_matches_concurrent() {
    let dir = tempfile::tempdir().unwrap();
    let page = boleto_page();
    for name in ["x1.pdf", "x2.pdf", "x3.pdf"] {
        std::fs::write(dir.path().join(name), pdf_with_pages(&[&page])).unwrap();
    }
    let pattern = dir.path().join("*.pdf");

    let run = |jobs: &str| {
        let output = cmd(dir.path())
            .args(["batch", "-f", "csv", "-j", jobs])
            .arg(pattern.to_str().unwrap())
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    let sequential = run("1");
    assert_eq!(sequential, run("3"));
    assert!(sequential.contains("x1.pdf (page 1)"));
    assert!(sequential.contains("x3.pdf (page 1)"));
}

#[test]
fn batch_fail_on_error_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.pdf"), b"%PDF-1.4\ntruncated").unwrap();

    let pattern = dir.path().join("*.pdf");
    cmd(dir.path())
        .args(["batch", "--fail-on-error"])
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be processed"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.pdf");
    cmd(dir.path())
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}
