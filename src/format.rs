use crate::router::{AnswerPayload, SourceCitation};
use crate::tavily::{ExtractResponse, SearchResponse};

const MAX_PAGE_CHARS: usize = 5000;

/// Escape characters that break Markdown link syntax: `[`, `]`, `(`, `)`.
fn escape_md_link(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '[' | ']' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn push_sources(output: &mut String, sources: &[SourceCitation]) {
    if sources.is_empty() {
        return;
    }
    output.push_str("\n\n---\n**Sources:**\n");
    for source in sources {
        output.push_str(&format!(
            "- [{}]({})\n",
            escape_md_link(&source.title),
            escape_md_link(&source.url)
        ));
    }
}

pub fn format_answer(payload: &AnswerPayload) -> String {
    let mut output = payload.answer.clone();
    push_sources(&mut output, &payload.sources);
    output
}

pub fn format_search(response: &SearchResponse, query: &str) -> String {
    let heading: String = query
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let mut output = format!("# Search: {heading}\n\n");

    if let Some(answer) = response.answer.as_deref().filter(|a| !a.is_empty()) {
        output.push_str(answer);
        output.push_str("\n\n");
    }

    if response.results.is_empty() {
        output.push_str("(no results)\n");
        return output;
    }

    for (i, result) in response.results.iter().enumerate() {
        output.push_str(&format!(
            "{}. [{}]({})\n",
            i + 1,
            escape_md_link(&result.title),
            escape_md_link(&result.url)
        ));
        if !result.content.is_empty() {
            output.push_str(&format!("   {}\n", result.content));
        }
    }

    output
}

pub fn format_extract(response: &ExtractResponse) -> String {
    let mut output = String::new();

    for page in &response.results {
        output.push_str(&format!("## {}\n\n", page.url));
        if page.raw_content.len() > MAX_PAGE_CHARS {
            let end = page.raw_content.floor_char_boundary(MAX_PAGE_CHARS);
            output.push_str(&page.raw_content[..end]);
            output.push_str("...\n\n(truncated)");
        } else {
            output.push_str(&page.raw_content);
        }
        output.push_str("\n\n");
    }

    if !response.failed_results.is_empty() {
        output.push_str("## Failed URLs\n\n");
        for failed in &response.failed_results {
            let reason = failed.error.as_deref().unwrap_or("unknown error");
            output.push_str(&format!("- {} ({reason})\n", failed.url));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tavily::SearchResult;
    use crate::tavily::types::{ExtractedPage, FailedExtraction};

    #[test]
    fn escapes_special_chars() {
        assert_eq!(escape_md_link("normal text"), "normal text");
        assert_eq!(escape_md_link("a[b]c(d)e"), r"a\[b\]c\(d\)e");
    }

    #[test]
    fn answer_without_sources_is_plain_text() {
        let payload = AnswerPayload {
            answer: "Just text.".into(),
            sources: vec![],
            has_live_data: false,
        };
        assert_eq!(format_answer(&payload), "Just text.");
    }

    #[test]
    fn answer_lists_sources_as_links() {
        let payload = AnswerPayload {
            answer: "Sunny.".into(),
            sources: vec![SourceCitation {
                title: "Forecast [EU]".into(),
                url: "https://w.example/(paris)".into(),
            }],
            has_live_data: true,
        };

        let text = format_answer(&payload);
        assert!(text.starts_with("Sunny.\n\n---\n**Sources:**\n"));
        assert!(text.contains(r"- [Forecast \[EU\]](https://w.example/\(paris\))"));
    }

    #[test]
    fn each_source_gets_its_own_line() {
        let payload = AnswerPayload {
            answer: "Both.".into(),
            sources: vec![
                SourceCitation {
                    title: "A".into(),
                    url: "https://a.com".into(),
                },
                SourceCitation {
                    title: "B".into(),
                    url: "https://b.com".into(),
                },
            ],
            has_live_data: true,
        };

        assert_eq!(
            format_answer(&payload),
            "Both.\n\n---\n**Sources:**\n- [A](https://a.com)\n- [B](https://b.com)\n"
        );
    }

    #[test]
    fn search_output_numbers_results() {
        let response = SearchResponse {
            answer: Some("Summary.".into()),
            results: vec![
                SearchResult {
                    title: "A".into(),
                    content: "alpha".into(),
                    url: "https://a.com".into(),
                    score: None,
                },
                SearchResult {
                    title: "B".into(),
                    content: String::new(),
                    url: "https://b.com".into(),
                    score: Some(0.5),
                },
            ],
            ..Default::default()
        };

        let text = format_search(&response, "rust\nnews");
        assert!(text.starts_with("# Search: rust news\n\nSummary.\n\n"));
        assert!(text.contains("1. [A](https://a.com)\n   alpha\n"));
        assert!(text.contains("2. [B](https://b.com)\n"));
    }

    #[test]
    fn search_output_notes_empty_results() {
        let text = format_search(&SearchResponse::default(), "q");
        assert!(text.contains("(no results)"));
    }

    #[test]
    fn extract_output_truncates_and_lists_failures() {
        let response = ExtractResponse {
            results: vec![ExtractedPage {
                url: "https://long.com".into(),
                raw_content: "x".repeat(MAX_PAGE_CHARS + 10),
            }],
            failed_results: vec![FailedExtraction {
                url: "https://fail.com".into(),
                error: None,
            }],
        };

        let text = format_extract(&response);
        assert!(text.contains("## https://long.com"));
        assert!(text.contains("(truncated)"));
        assert!(text.contains("- https://fail.com (unknown error)"));
    }
}
