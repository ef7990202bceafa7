//! HTML field extraction with tiered fallbacks.
//!
//! Real pages vary wildly; body extraction tries paragraph blocks first,
//! then headings plus paragraphs, then the whole document's text, so even
//! sparse pages yield something for the validity filter to judge.

use scraper::{Html, Selector};

use crate::text::{normalize_whitespace, truncate_chars};
use crate::types::config::ContentConfig;

const MAX_TITLE_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 200;

const MIN_PARAGRAPH_LEN: usize = 15;
const PARAGRAPH_CAP: usize = 300;
const MIN_ELEMENT_LEN: usize = 10;
const ELEMENT_CAP: usize = 200;
const WHOLE_TEXT_CAP: usize = 500;

/// Paragraph blocks needed before the heading fallback is skipped.
const MIN_PARAGRAPH_BLOCKS: usize = 2;

/// Extract the page title, capped, with a fixed fallback.
pub fn extract_title(document: &Html) -> String {
    let selector = Selector::parse("title").unwrap();
    document
        .select(&selector)
        .next()
        .map(|t| t.text().collect::<String>())
        .map(|t| truncate_chars(t.trim(), MAX_TITLE_LEN).to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No title".to_string())
}

/// Extract the meta description, capped, with a fixed fallback.
pub fn extract_description(document: &Html) -> String {
    let selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(|c| truncate_chars(c, MAX_DESCRIPTION_LEN).to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "No description available".to_string())
}

/// Extract body text with tiered fallbacks.
pub fn extract_body(document: &Html, config: &ContentConfig) -> String {
    let mut blocks: Vec<String> = Vec::new();

    // First pass: the leading paragraph elements
    let p_selector = Selector::parse("p").unwrap();
    for paragraph in document.select(&p_selector).take(config.max_paragraphs) {
        let text = paragraph.text().collect::<String>().trim().to_string();
        if text.chars().count() > MIN_PARAGRAPH_LEN {
            blocks.push(truncate_chars(&text, PARAGRAPH_CAP).to_string());
        }
    }

    // Thin pages: widen to headings plus paragraphs
    if blocks.len() < MIN_PARAGRAPH_BLOCKS {
        let wide_selector = Selector::parse("h1, h2, h3, p").unwrap();
        for element in document.select(&wide_selector).take(config.max_elements) {
            let text = element.text().collect::<String>().trim().to_string();
            if text.chars().count() > MIN_ELEMENT_LEN {
                blocks.push(truncate_chars(&text, ELEMENT_CAP).to_string());
            }
        }
    }

    // Last resort: whatever text the document has
    if blocks.is_empty() {
        let all_text = document.root_element().text().collect::<String>();
        let clean = normalize_whitespace(&all_text);
        if !clean.is_empty() {
            blocks.push(truncate_chars(&clean, WHOLE_TEXT_CAP).to_string());
        }
    }

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_title_with_fallback() {
        let doc = parse("<html><head><title>  Page Title  </title></head></html>");
        assert_eq!(extract_title(&doc), "Page Title");

        let doc = parse("<html><body>no title here</body></html>");
        assert_eq!(extract_title(&doc), "No title");
    }

    #[test]
    fn test_description_with_fallback() {
        let doc = parse(r#"<html><head><meta name="description" content="A summary."></head></html>"#);
        assert_eq!(extract_description(&doc), "A summary.");

        let doc = parse("<html><head></head></html>");
        assert_eq!(extract_description(&doc), "No description available");
    }

    #[test]
    fn test_body_prefers_paragraphs() {
        let doc = parse(
            "<html><body>\
             <p>The first paragraph has plenty of text in it.</p>\
             <p>The second paragraph also has plenty of text.</p>\
             <p>tiny</p>\
             </body></html>",
        );
        let body = extract_body(&doc, &ContentConfig::default());

        assert!(body.contains("first paragraph"));
        assert!(body.contains("second paragraph"));
        assert!(!body.contains("tiny"));
    }

    #[test]
    fn test_body_falls_back_to_headings() {
        let doc = parse(
            "<html><body>\
             <h1>A heading with real words</h1>\
             <h2>Another heading with words</h2>\
             <p>short p</p>\
             </body></html>",
        );
        let body = extract_body(&doc, &ContentConfig::default());

        assert!(body.contains("A heading with real words"));
        assert!(body.contains("Another heading with words"));
    }

    #[test]
    fn test_body_falls_back_to_whole_document() {
        let doc = parse("<html><body><div>Loose text outside any block</div></body></html>");
        let body = extract_body(&doc, &ContentConfig::default());

        assert_eq!(body, "Loose text outside any block");
    }

    #[test]
    fn test_body_caps_paragraph_count() {
        let paragraphs: String = (0..20)
            .map(|i| format!("<p>Paragraph number {} with enough text to keep.</p>", i))
            .collect();
        let doc = parse(&format!("<html><body>{}</body></html>", paragraphs));

        let body = extract_body(&doc, &ContentConfig::default());
        assert_eq!(body.split("\n\n").count(), ContentConfig::default().max_paragraphs);
    }
}
