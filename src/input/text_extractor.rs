//! Text extraction from the supported file formats

use crate::error::{MatcherError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    /// Keep the text of the document, one line per block.
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reads the `text` field of a JSON document, as sent to the skills analysis.
pub struct JsonTextExtractor;

impl TextExtractor for JsonTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        let value: Value = serde_json::from_str(&content)?;

        value
            .get("text")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| {
                MatcherError::InvalidInput(format!(
                    "Expected a string field 'text' in {}",
                    path.display()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# Offre\n\nStack: **React** et `docker`\n\n- SQL\n- Git\n";
        let text = MarkdownExtractor::markdown_to_text(markdown);
        assert_eq!(text, "Offre\nStack: React et docker\nSQL\nGit");
    }

    #[tokio::test]
    async fn test_json_text_extractor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offre.json");
        std::fs::write(&path, r#"{"text": "Python et SQL"}"#).unwrap();
        assert_eq!(JsonTextExtractor.extract(&path).await.unwrap(), "Python et SQL");

        std::fs::write(&path, r#"{"body": "Python"}"#).unwrap();
        assert!(matches!(
            JsonTextExtractor.extract(&path).await,
            Err(MatcherError::InvalidInput(_))
        ));
    }
}
