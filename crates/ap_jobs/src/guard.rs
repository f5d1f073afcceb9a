/// Decides whether a candidate title collides with what is already stored.
pub trait DuplicateGuard: Send + Sync {
    fn is_duplicate(&self, title: &str, existing: &[String]) -> bool;
}

/// Case-insensitive exact comparison against every existing title.
pub fn is_duplicate(title: &str, existing: &[String]) -> bool {
    let title = title.to_lowercase();
    existing.iter().any(|t| t.to_lowercase() == title)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TitleGuard;

impl DuplicateGuard for TitleGuard {
    fn is_duplicate(&self, title: &str, existing: &[String]) -> bool {
        is_duplicate(title, existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        assert!(is_duplicate(
            "Quantum Computing Today",
            &titles(&["Edge Nodes", "quantum computing today"])
        ));
        assert!(!is_duplicate(
            "Quantum Computing Today",
            &titles(&["Quantum Computing Tomorrow"])
        ));
    }

    #[test]
    fn test_no_partial_matching() {
        assert!(!is_duplicate("Quantum", &titles(&["Quantum Computing Today"])));
        assert!(!is_duplicate("Quantum Computing Today ", &titles(&["Quantum Computing Today"])));
        assert!(!is_duplicate("Anything", &[]));
    }

    #[test]
    fn test_guard_delegates() {
        let guard: &dyn DuplicateGuard = &TitleGuard;
        assert!(guard.is_duplicate("ÉCOLE", &titles(&["école"])));
    }
}
