use crate::types::{ScanKind, ScanStep};

/// Title and command line for a single-shot scan of `target`.
///
/// The target is substituted verbatim; no quoting or escaping is applied.
pub fn resolve(kind: ScanKind, target: &str) -> ScanStep {
    let (title, command) = match kind {
        ScanKind::Whois => ("WHOIS", format!("deep-whois {target}")),
        ScanKind::Dns => ("DNS / dig", format!("dig +short {target}")),
        ScanKind::FullOsint => ("R.I.S.K OSINT", "echo 'Use full chain'".to_string()),
    };
    ScanStep {
        kind,
        title: title.to_string(),
        command,
    }
}

/// The fixed three-step plan run by the full chain: WHOIS, DNS, then a fast nmap sweep.
pub fn chain_plan(target: &str) -> Vec<ScanStep> {
    vec![
        ScanStep {
            kind: ScanKind::Whois,
            title: "WHOIS".to_string(),
            command: format!("deep-whois {target}"),
        },
        ScanStep {
            kind: ScanKind::Dns,
            title: "DNS".to_string(),
            command: format!("dig +short {target}"),
        },
        ScanStep {
            kind: ScanKind::FullOsint,
            title: "Nmap".to_string(),
            command: format!("nmap -Pn -F {target}"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_single_scans() {
        let w = resolve(ScanKind::Whois, "example.com");
        assert_eq!((w.title.as_str(), w.command.as_str()), ("WHOIS", "deep-whois example.com"));

        let d = resolve(ScanKind::Dns, "example.com");
        assert_eq!((d.title.as_str(), d.command.as_str()), ("DNS / dig", "dig +short example.com"));

        let f = resolve(ScanKind::FullOsint, "example.com");
        assert_eq!(f.title, "R.I.S.K OSINT");
        assert_eq!(f.command, "echo 'Use full chain'");
    }

    #[test]
    fn target_is_not_escaped() {
        let s = resolve(ScanKind::Dns, "a.com; id");
        assert_eq!(s.command, "dig +short a.com; id");
    }

    #[test]
    fn chain_plan_order_and_tags() {
        let plan = chain_plan("10.0.0.1");
        let kinds: Vec<_> = plan.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![ScanKind::Whois, ScanKind::Dns, ScanKind::FullOsint]);
        assert_eq!(plan[2].title, "Nmap");
        assert_eq!(plan[2].command, "nmap -Pn -F 10.0.0.1");
    }
}
