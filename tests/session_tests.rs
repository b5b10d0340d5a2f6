use risk_recon::{Executor, ScanKind, Session};

#[tokio::test]
async fn chain_through_real_shell_records_three_steps() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut session = Session::new(Executor::with_shell("/bin/sh"), root.path());

    // The recon tools are usually absent in CI; every step still produces a record.
    let mut titles = Vec::new();
    let ids = session
        .run_chain("  127.0.0.1 ", |p| titles.push(p.record.title().to_string()))
        .await;

    assert_eq!(ids.len(), 3);
    assert_eq!(titles, vec!["WHOIS", "DNS", "Nmap"]);
    let kinds: Vec<_> = session.results().iter().map(|r| r.scan_type()).collect();
    assert_eq!(kinds, vec![ScanKind::Whois, ScanKind::Dns, ScanKind::FullOsint]);
    assert!(session.results().iter().all(|r| r.target() == "127.0.0.1"));
    assert!(!session.is_running());

    let paths = session.export().await.expect("export ok");
    assert_eq!(paths.len(), 3);
    assert!(paths[0].starts_with(root.path().join("127.0.0.1")));
    assert_eq!(session.last_export(), paths.as_slice());
}

#[tokio::test]
async fn full_osint_single_scan_is_a_placeholder() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut session = Session::new(Executor::with_shell("/bin/sh"), root.path());
    let rec = session.run_scan(ScanKind::FullOsint, "example.com").await;
    assert_eq!(rec.title(), "R.I.S.K OSINT");
    assert_eq!(rec.output(), "Use full chain\n");
}
