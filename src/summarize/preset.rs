use crate::error::{Error, Result};

/// A named, fixed prompt-and-temperature configuration for the summarization
/// call. The catalog is static; selection picks an entry, never edits one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub system_prompt: &'static str,
    pub temperature: f64,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Summarize",
        description: "Create a concise summary with key points",
        system_prompt: "You are an expert at summarizing conversations and transcripts. Create a clear, concise summary that captures the main points, key decisions, and important details. Format your response with clear sections for: Summary, Key Points, Action Items (if any), and Notable Quotes.",
        temperature: 0.3,
    },
    Preset {
        name: "Meeting Minutes",
        description: "Format as professional meeting minutes",
        system_prompt: "You are a professional meeting transcriptionist. Convert this transcript into properly formatted meeting minutes. Include: Date, Participants (identified by speaker numbers), Agenda Items (inferred from discussion), Decisions Made, Action Items, and Next Steps. Use professional business formatting.",
        temperature: 0.2,
    },
    Preset {
        name: "Content Analysis",
        description: "Deep analysis of content and discussion",
        system_prompt: "You are an expert content analyst. Provide a detailed analysis of this transcript including: Main Themes, Sentiment Analysis, Discussion Patterns, Key Insights, Areas of Agreement/Disagreement, and Recommendations. Support your analysis with specific examples from the transcript.",
        temperature: 0.4,
    },
    Preset {
        name: "Action Items",
        description: "Extract and organize action items",
        system_prompt: "You are an executive assistant focused on action items. Review this transcript and extract all action items, tasks, and commitments. Format each item with: Owner (speaker number if available), Task, Timeline (if mentioned), and Context. Sort by priority if possible.",
        temperature: 0.2,
    },
];

/// Look up a preset by name, case-insensitively.
pub fn find(name: &str) -> Result<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownPreset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_presets() {
        assert_eq!(PRESETS.len(), 4);
        let names: Vec<_> = PRESETS.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["Summarize", "Meeting Minutes", "Content Analysis", "Action Items"]
        );
    }

    #[test]
    fn test_find_case_insensitive() {
        assert_eq!(find("meeting minutes").unwrap().name, "Meeting Minutes");
        assert_eq!(find("SUMMARIZE").unwrap().name, "Summarize");
    }

    #[test]
    fn test_find_unknown() {
        assert!(matches!(find("Haiku"), Err(Error::UnknownPreset(_))));
    }

    #[test]
    fn test_meeting_minutes_temperature() {
        let preset = find("Meeting Minutes").unwrap();
        assert_eq!(preset.temperature, 0.2);
    }
}
