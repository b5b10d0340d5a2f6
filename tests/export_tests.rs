use risk_recon::export::{export_all, CSV_HEADER};
use risk_recon::{ResultRecord, ScanKind};

fn sample() -> Vec<ResultRecord> {
    vec![
        ResultRecord::new(
            "https://example.com/x",
            ScanKind::Whois,
            "WHOIS",
            "deep-whois https://example.com/x",
            "Registrar: Example\nStatus: active\n",
        ),
        ResultRecord::new(
            "https://example.com/x",
            ScanKind::Dns,
            "DNS",
            "dig +short https://example.com/x",
            "He said \"hi\"\nbye",
        ),
        ResultRecord::new(
            "https://example.com/x",
            ScanKind::FullOsint,
            "Nmap",
            "nmap -Pn -F https://example.com/x",
            "",
        ),
    ]
}

#[tokio::test]
async fn writes_three_files_under_sanitized_target() {
    let root = tempfile::tempdir().expect("tempdir");
    let records = sample();
    let paths = export_all(root.path(), "https://example.com/x", &records)
        .await
        .expect("export ok");

    assert_eq!(paths.len(), 3);
    let dir = root.path().join("https___example.com_x");
    for (p, ext) in paths.iter().zip(["txt", "csv", "json"]) {
        assert_eq!(p.parent(), Some(dir.as_path()));
        assert_eq!(p.extension().and_then(|e| e.to_str()), Some(ext));
        let name = p.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with("risk_"));
        // risk_yyyyMMdd_HHmmss.<ext>
        assert_eq!(name.len(), "risk_".len() + 15 + 1 + ext.len());
    }
    let stems: Vec<_> = paths.iter().map(|p| p.file_stem().unwrap().to_owned()).collect();
    assert!(stems.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 3);
}

#[tokio::test]
async fn csv_has_one_line_per_record() {
    let root = tempfile::tempdir().expect("tempdir");
    let records = sample();
    let paths = export_all(root.path(), "t", &records).await.expect("export ok");

    let csv = std::fs::read_to_string(&paths[1]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), records.len() + 1);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[2].ends_with(r#","He said ""hi""\nbye""#));
}

#[tokio::test]
async fn json_round_trips_every_field() {
    let root = tempfile::tempdir().expect("tempdir");
    let records = sample();
    let paths = export_all(root.path(), "t", &records).await.expect("export ok");

    let json = std::fs::read_to_string(&paths[2]).unwrap();
    assert!(json.contains("https://example.com/x"));
    let back: Vec<ResultRecord> = serde_json::from_str(&json).expect("valid json");
    assert_eq!(back, records);
}

#[tokio::test]
async fn text_report_lists_records_in_order() {
    let root = tempfile::tempdir().expect("tempdir");
    let records = sample();
    let paths = export_all(root.path(), "t", &records).await.expect("export ok");

    let txt = std::fs::read_to_string(&paths[0]).unwrap();
    assert!(txt.starts_with("R.I.S.K – Real Internet Security Knowledge\nTarget: t\n"));
    let whois = txt.find("[WHOIS] WHOIS").unwrap();
    let dns = txt.find("[DNS / Network] DNS").unwrap();
    let nmap = txt.find("[R.I.S.K OSINT] Nmap").unwrap();
    assert!(whois < dns && dns < nmap);
}

#[tokio::test]
async fn empty_results_touch_nothing() {
    let root = tempfile::tempdir().expect("tempdir");
    let export_root = root.path().join("RISK-Exports");
    let paths = export_all(&export_root, "t", &[]).await.expect("no-op");
    assert!(paths.is_empty());
    assert!(!export_root.exists());
}

#[tokio::test]
async fn unwritable_root_is_an_io_error() {
    let root = tempfile::tempdir().expect("tempdir");
    let blocker = root.path().join("file");
    std::fs::write(&blocker, b"x").unwrap();
    let err = export_all(&blocker, "t", &sample()).await.unwrap_err();
    assert!(matches!(err, risk_recon::ExportError::Io { .. }));
}
