use crate::{
    MetadataSignal,
    signals::{SignalDetector, SignalInput},
};

const MAX_PLAUSIBLE_BYTES: u64 = 50 * 1024 * 1024;
const MIN_PLAUSIBLE_BYTES: u64 = 1000;

const AI_NAME_MARKERS: [&str; 4] = ["ai", "generated", "midjourney", "dalle"];

/// Flags suspicious file-level facts. A pure function of FileFacts, so unlike
/// the pixel detectors its output is exactly reproducible; rule order is
/// fixed and preserved in the emitted flags list.
pub struct MetadataPlausibilityDetector;

impl MetadataPlausibilityDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetadataPlausibilityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalDetector for MetadataPlausibilityDetector {
    type Signal = MetadataSignal;

    fn name(&self) -> &'static str {
        "Metadata Plausibility Detector"
    }

    fn evaluate(&self, input: &SignalInput<'_>) -> MetadataSignal {
        let facts = input.facts;
        let mut flags: Vec<String> = Vec::new();

        if let Some(mime) = &facts.mime_type {
            if !mime.starts_with("image/") {
                flags.push("Invalid MIME type".into());
            }
        }

        if facts.byte_size < MIN_PLAUSIBLE_BYTES {
            flags.push("Suspiciously small file size".into());
        }

        if facts.byte_size > MAX_PLAUSIBLE_BYTES {
            flags.push("Unusually large file size".into());
        }

        if facts.modified_ms.unwrap_or(0) == 0 {
            flags.push("Missing modification timestamp".into());
        }

        let name = facts.file_name.to_lowercase();

        if name.contains("screenshot") || name.contains("screen shot") {
            flags.push("Screenshot detected".into());
        }

        if AI_NAME_MARKERS.iter().any(|marker| name.contains(marker)) {
            flags.push("AI-related filename".into());
        }

        let authentic = flags.is_empty();
        let description = if authentic {
            "File metadata looks plausible for an unmodified image.".into()
        } else {
            format!("File metadata raised {} flag(s): {}.", flags.len(), flags.join(", "))
        };

        MetadataSignal {
            authentic,
            flags,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileFacts, pixels::PixelBuffer};

    fn evaluate(facts: FileFacts) -> MetadataSignal {
        let pixels = PixelBuffer::from_rgba(2, 2, vec![0u8; 16]).unwrap();
        let input = SignalInput {
            pixels: &pixels,
            facts: &facts,
        };
        MetadataPlausibilityDetector::new().evaluate(&input)
    }

    fn plausible_facts() -> FileFacts {
        FileFacts {
            file_name: "vacation.jpg".into(),
            mime_type: Some("image/jpeg".into()),
            byte_size: 500_000,
            modified_ms: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn plausible_facts_produce_no_flags() {
        let signal = evaluate(plausible_facts());
        assert!(signal.authentic);
        assert!(signal.flags.is_empty());
    }

    #[test]
    fn non_image_mime_is_flagged() {
        let mut facts = plausible_facts();
        facts.mime_type = Some("text/plain".into());

        let signal = evaluate(facts);
        assert!(!signal.authentic);
        assert_eq!(signal.flags, vec!["Invalid MIME type".to_string()]);
    }

    #[test]
    fn absent_mime_is_not_flagged() {
        let mut facts = plausible_facts();
        facts.mime_type = None;

        assert!(evaluate(facts).authentic);
    }

    #[test]
    fn zero_byte_file_is_flagged_small() {
        let mut facts = plausible_facts();
        facts.byte_size = 0;

        let signal = evaluate(facts);
        assert!(!signal.authentic);
        assert!(signal.flags.contains(&"Suspiciously small file size".to_string()));
    }

    #[test]
    fn oversized_file_is_flagged() {
        let mut facts = plausible_facts();
        facts.byte_size = 51 * 1024 * 1024;

        let signal = evaluate(facts);
        assert!(signal.flags.contains(&"Unusually large file size".to_string()));
    }

    #[test]
    fn missing_or_zero_timestamp_is_flagged() {
        let mut facts = plausible_facts();
        facts.modified_ms = None;
        assert!(evaluate(facts.clone()).flags.contains(&"Missing modification timestamp".to_string()));

        facts.modified_ms = Some(0);
        assert!(evaluate(facts).flags.contains(&"Missing modification timestamp".to_string()));
    }

    #[test]
    fn screenshot_names_are_flagged_case_insensitively() {
        for name in ["Screenshot 2024.png", "my Screen Shot.png"] {
            let mut facts = plausible_facts();
            facts.file_name = name.into();
            assert!(evaluate(facts).flags.contains(&"Screenshot detected".to_string()));
        }
    }

    #[test]
    fn ai_related_names_are_flagged() {
        for name in ["midjourney_output.png", "DALLE-render.png", "generated_art.png"] {
            let mut facts = plausible_facts();
            facts.file_name = name.into();

            let signal = evaluate(facts);
            assert!(!signal.authentic);
            assert!(signal.flags.contains(&"AI-related filename".to_string()));
        }
    }

    #[test]
    fn flag_order_is_stable_across_calls() {
        let facts = FileFacts {
            file_name: "screenshot-ai.png".into(),
            mime_type: Some("application/octet-stream".into()),
            byte_size: 12,
            modified_ms: None,
        };

        let first = evaluate(facts.clone());
        let second = evaluate(facts);

        assert_eq!(first.flags, second.flags);
        assert_eq!(
            first.flags,
            vec![
                "Invalid MIME type".to_string(),
                "Suspiciously small file size".to_string(),
                "Missing modification timestamp".to_string(),
                "Screenshot detected".to_string(),
                "AI-related filename".to_string(),
            ]
        );
    }
}
