use ap_core::{Error, Result};

const TITLE: &str = "TITLE:";
const SUMMARY: &str = "SUMMARY:";
const CONTENT: &str = "CONTENT:";

/// Title, summary and body text, before tags and provenance are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub summary: String,
    pub content: String,
}

/// Find `label` in `upper` at or after `from`; returns (label start, body start).
fn locate(upper: &str, label: &str, from: usize) -> Option<(usize, usize)> {
    upper[from..]
        .find(label)
        .map(|i| (from + i, from + i + label.len()))
}

/// Body of the section whose label starts at `label_at`, running from `start`
/// to `end`. Bold markers belonging to a `**LABEL:**` wrapper are dropped,
/// whether they close this label or open the next one.
fn section(text: &str, label_at: usize, start: usize, end: usize) -> &str {
    let mut raw = &text[start..end];
    if text[..label_at].ends_with("**") {
        raw = raw.strip_prefix("**").unwrap_or(raw);
    }
    if end < text.len() && text[..end].ends_with("**") {
        raw = raw.strip_suffix("**").unwrap_or(raw);
    }
    raw.trim()
}

fn clean_line(line: &str) -> &str {
    line.trim()
        .trim_matches(|c: char| c == '*' || c == '#' || c == '"')
        .trim()
}

/// Extract the three labeled sections from a backend response.
///
/// Labels match case-insensitively and must appear in order; each section runs
/// until the next label or the end of the text.
pub fn parse_response(text: &str) -> Result<ArticleDraft> {
    let upper = text.to_ascii_uppercase();
    let missing = |label: &str| Error::UnparseableResponse(format!("missing {} section", label));

    let (title_at, title_body) = locate(&upper, TITLE, 0).ok_or_else(|| missing(TITLE))?;
    let (summary_at, summary_body) =
        locate(&upper, SUMMARY, title_body).ok_or_else(|| missing(SUMMARY))?;
    let (content_at, content_body) =
        locate(&upper, CONTENT, summary_body).ok_or_else(|| missing(CONTENT))?;

    let title = section(text, title_at, title_body, summary_at)
        .lines()
        .map(clean_line)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string();

    let summary = section(text, summary_at, summary_body, content_at)
        .lines()
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let content = section(text, content_at, content_body, text.len()).to_string();

    if title.is_empty() {
        return Err(Error::UnparseableResponse("empty TITLE section".to_string()));
    }
    if summary.is_empty() {
        return Err(Error::UnparseableResponse("empty SUMMARY section".to_string()));
    }
    if content.is_empty() {
        return Err(Error::UnparseableResponse("empty CONTENT section".to_string()));
    }

    Ok(ArticleDraft {
        title,
        summary,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_response() {
        let text = "TITLE: Quantum Computing Today\nSUMMARY: Qubits are leaving the lab.\nCONTENT:\nFirst paragraph.\n\nSecond paragraph.\n";
        let draft = parse_response(text).unwrap();
        assert_eq!(draft.title, "Quantum Computing Today");
        assert_eq!(draft.summary, "Qubits are leaving the lab.");
        assert_eq!(draft.content, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_parse_tolerates_preamble_case_and_markdown() {
        let text = "Sure! Here is your article.\n\n**Title:** \"Telemedicine at Scale\"\n**Summary:** Remote care is now routine.\nIt keeps growing.\n**Content:**\nBody text here.";
        let draft = parse_response(text).unwrap();
        assert_eq!(draft.title, "Telemedicine at Scale");
        assert_eq!(draft.summary, "Remote care is now routine. It keeps growing.");
        assert_eq!(draft.content, "Body text here.");
    }

    #[test]
    fn test_parse_keeps_bold_text_in_body() {
        let text = "TITLE: Edge AI\nSUMMARY: Models move to devices.\nCONTENT:\n**Intro** sets the scene.\n\nClosing with **emphasis**";
        let draft = parse_response(text).unwrap();
        assert_eq!(draft.content, "**Intro** sets the scene.\n\nClosing with **emphasis**");

        let wrapped = "**TITLE:** Edge AI\n**SUMMARY:** Models move to devices.\n**CONTENT:** **Intro** sets the scene.";
        let draft = parse_response(wrapped).unwrap();
        assert_eq!(draft.title, "Edge AI");
        assert_eq!(draft.summary, "Models move to devices.");
        assert_eq!(draft.content, "**Intro** sets the scene.");
    }

    #[test]
    fn test_parse_requires_every_section() {
        let err = parse_response("TITLE: A\nSUMMARY: B\nBody without label").unwrap_err();
        assert!(matches!(err, Error::UnparseableResponse(ref m) if m.contains("CONTENT")));

        assert!(parse_response("SUMMARY: B\nCONTENT: C").is_err());
        assert!(parse_response("").is_err());
    }

    #[test]
    fn test_parse_requires_order() {
        assert!(parse_response("CONTENT: C\nSUMMARY: B\nTITLE: A").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_sections() {
        assert!(parse_response("TITLE:\nSUMMARY: B\nCONTENT: C").is_err());
        assert!(parse_response("TITLE: A\nSUMMARY:   \nCONTENT: C").is_err());
        assert!(parse_response("TITLE: A\nSUMMARY: B\nCONTENT:   \n").is_err());
    }
}
