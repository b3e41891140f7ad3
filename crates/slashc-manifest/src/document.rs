//! Manifest documents: a description line and an escaped prompt block.

use serde::Deserialize;

use crate::escape::{DELIMITER, escape_prompt_body};
use crate::{ManifestError, Result};

/// One slash-command manifest, holding the raw (unescaped) prompt body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    pub description: String,
    pub prompt: String,
}

#[derive(Deserialize)]
struct ManifestFields {
    description: String,
    prompt: String,
}

impl ManifestDocument {
    /// Build a manifest, rejecting descriptions that cannot be emitted
    /// verbatim inside a quoted string.
    pub fn new(description: impl Into<String>, prompt: impl Into<String>) -> Result<Self> {
        let description = description.into();
        check_description(&description).map_err(|reason| ManifestError::InvalidDescription {
            description: description.clone(),
            reason,
        })?;
        Ok(Self {
            description,
            prompt: prompt.into(),
        })
    }

    /// Render the manifest text.
    ///
    /// ```text
    /// description = "<description>"
    ///
    /// prompt = """
    /// <escaped body>
    /// """
    /// ```
    pub fn render(&self) -> String {
        let escaped = escape_prompt_body(&self.prompt);
        let mut out = String::with_capacity(self.description.len() + escaped.len() + 40);
        out.push_str("description = \"");
        out.push_str(&self.description);
        out.push_str("\"\n\nprompt = ");
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(&escaped);
        out.push('\n');
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }

    /// Read a manifest back with a TOML parser.
    ///
    /// The line feed [`render`](Self::render) puts before the closing
    /// delimiter is not part of the body and is stripped.
    pub fn parse(text: &str) -> Result<Self> {
        let fields: ManifestFields = toml::from_str(text)?;
        let prompt = match fields.prompt.strip_suffix('\n') {
            Some(body) => body.to_string(),
            None => fields.prompt,
        };
        Ok(Self {
            description: fields.description,
            prompt,
        })
    }
}

/// Serialize a description and raw prompt body into manifest text.
pub fn serialize(description: &str, prompt_body: &str) -> Result<String> {
    Ok(ManifestDocument::new(description, prompt_body)?.render())
}

/// Descriptions are emitted without escaping, so they must be a single
/// line free of quotes, backslashes and control characters.
pub fn check_description(text: &str) -> std::result::Result<(), &'static str> {
    if text.trim().is_empty() {
        return Err("description is empty");
    }
    if text.contains(['\n', '\r']) {
        return Err("description spans more than one line");
    }
    if text.contains('"') {
        return Err("description contains a double quote");
    }
    if text.contains('\\') {
        return Err("description contains a backslash");
    }
    if text.chars().any(|c| c.is_control() && c != '\t') {
        return Err("description contains a control character");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout_is_exact() {
        let text = serialize("Do foo", "# Foo\n\nRun foo.").unwrap();
        assert_eq!(
            text,
            "description = \"Do foo\"\n\nprompt = \"\"\"\n# Foo\n\nRun foo.\n\"\"\"\n"
        );
    }

    #[test]
    fn test_render_escapes_delimiter_in_body() {
        let body = "Wrap it in \"\"\" quotes \"\"\" please";
        let text = serialize("Quote", body).unwrap();
        let block = text
            .split_once("prompt = \"\"\"\n")
            .map(|(_, rest)| rest)
            .unwrap();
        // The only raw delimiter left is the closing one.
        assert_eq!(block.matches(DELIMITER).count(), 1);
        assert!(block.ends_with("\n\"\"\"\n"));
    }

    #[test]
    fn test_parse_recovers_fields() {
        let bodies = [
            "plain",
            "ends with newline\n",
            "has \"\"\" delimiter",
            "back\\slash and \\\"\\\"\\\" pre-escaped",
            "windows\r\nline endings",
            "  leading spaces\n\n\ntrailing blank lines\n\n",
            "\"quote at both ends\"",
        ];
        for body in bodies {
            let doc = ManifestDocument::new("Check parse", body).unwrap();
            let parsed = ManifestDocument::parse(&doc.render()).unwrap();
            assert_eq!(parsed, doc, "body {body:?}");
        }
    }

    #[test]
    fn test_empty_body() {
        let doc = ManifestDocument::new("Empty", "").unwrap();
        assert_eq!(doc.render(), "description = \"Empty\"\n\nprompt = \"\"\"\n\n\"\"\"\n");
        assert_eq!(ManifestDocument::parse(&doc.render()).unwrap().prompt, "");
    }

    #[test]
    fn test_invalid_descriptions_are_rejected() {
        for bad in ["", "two\nlines", "has \"quote\"", "back\\slash", "bell\u{7}"] {
            assert!(
                matches!(
                    serialize(bad, "body"),
                    Err(ManifestError::InvalidDescription { .. })
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_manifest() {
        assert!(matches!(
            ManifestDocument::parse("prompt = \"only a prompt\""),
            Err(ManifestError::Parse(_))
        ));
    }
}
