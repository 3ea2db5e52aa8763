use anyhow::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by JavaScript's encodeURIComponent. The note
/// app's x-callback-url handler decodes with those semantics, so we encode
/// with the matching set.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Build the note-creation deep link, e.g.
/// `bear://x-callback-url/create?title=...&text=...&open_note=yes`.
pub fn create_url(scheme: &str, title: &str, text: &str) -> String {
    format!(
        "{}://x-callback-url/create?title={}&text={}&open_note=yes",
        scheme,
        encode_component(title),
        encode_component(text)
    )
}

/// Body for the created note. When a processed result is delivered together
/// with its source transcript, both go into one note under separate headings.
pub fn note_body(text: &str, original: Option<&str>) -> String {
    match original {
        Some(original) => format!(
            "## Gemini Processed Result\n\n{}\n\n---\n\n## Full Transcription\n\n{}",
            text, original
        ),
        None => text.to_string(),
    }
}

/// Hand the deep link to the platform opener.
pub fn open_url(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = std::process::Command::new("open");
        c.arg(url);
        c
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = std::process::Command::new("xdg-open");
        c.arg(url);
        c
    };

    let status = command.status()?;
    if !status.success() {
        anyhow::bail!("URL opener exited with {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("line1\nline2"), "line1%0Aline2");
        assert_eq!(encode_component("hello world"), "hello%20world");
    }

    #[test]
    fn test_encode_unreserved_passthrough() {
        // encodeURIComponent leaves these alone
        assert_eq!(encode_component("Az09-_.!~*'()"), "Az09-_.!~*'()");
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = "Speaker A: cost=high & risky\n\nSpeaker B: agreed?";
        let encoded = encode_component(original);
        assert!(!encoded.contains('&'));
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('\n'));

        let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_encode_decode_roundtrip_unicode() {
        let original = "café naïve Übung";
        let encoded = encode_component(original);
        let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_create_url_shape() {
        let url = create_url("bear", "My Title", "body & text");
        assert!(url.starts_with("bear://x-callback-url/create?title=My%20Title&text="));
        assert!(url.ends_with("&open_note=yes"));
        assert!(url.contains("body%20%26%20text"));
    }

    #[test]
    fn test_note_body_plain() {
        assert_eq!(note_body("just text", None), "just text");
    }

    #[test]
    fn test_note_body_with_original() {
        let body = note_body("summary here", Some("full transcript"));
        assert!(body.starts_with("## Gemini Processed Result\n\nsummary here"));
        assert!(body.contains("\n\n---\n\n"));
        assert!(body.ends_with("## Full Transcription\n\nfull transcript"));
    }
}
