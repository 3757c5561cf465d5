use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

pub const LABEL_CLEAN: &str = "Clean Target";
pub const LABEL_INPUT: &str = "Input";
pub const LABEL_ENHANCED: &str = "Enhanced Output of Spatial-U-Net";

/// Rank given to labels that are not in the priority table.
pub const UNRANKED: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// ExampleSpec – a known example folder and its SNR label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExampleSpec {
    pub name: String,
    pub snr: String,
}

impl ExampleSpec {
    fn new(name: &str, snr: &str) -> Self {
        Self {
            name: name.to_string(),
            snr: snr.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogConfig – the static lookup tables
// ---------------------------------------------------------------------------

/// Immutable tables that drive the directory scan.
///
/// Can be deserialized from JSON; any field left out keeps its default, so a
/// file that only lists `examples` is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Known example folders, in declaration order.
    pub examples: Vec<ExampleSpec>,
    /// Recognized audio extensions, lowercase and without the dot.
    pub audio_extensions: BTreeSet<String>,
    /// Filename stem → display label.
    pub labels: BTreeMap<String, String>,
    /// Display label → sort rank (lower first).
    pub label_priority: BTreeMap<String, u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let examples = vec![
            ExampleSpec::new("Example_01", "-20 dB"),
            ExampleSpec::new("Example_02", "-25 dB"),
            ExampleSpec::new("Example_03", "-30 dB"),
        ];

        let audio_extensions = ["wav", "mp3", "flac", "ogg", "m4a"]
            .into_iter()
            .map(String::from)
            .collect();

        let labels = [
            ("noisy_input", LABEL_INPUT),
            ("enhanced_output", LABEL_ENHANCED),
            ("speech_only", LABEL_CLEAN),
        ]
        .into_iter()
        .map(|(stem, label)| (stem.to_string(), label.to_string()))
        .collect();

        let label_priority = [(LABEL_CLEAN, 0), (LABEL_INPUT, 1), (LABEL_ENHANCED, 2)]
            .into_iter()
            .map(|(label, rank)| (label.to_string(), rank))
            .collect();

        Self {
            examples,
            audio_extensions,
            labels,
            label_priority,
        }
    }
}

impl CatalogConfig {
    /// Lowercase every extension and strip a leading dot, so `".WAV"` in a
    /// config file behaves like `"wav"`.
    pub fn normalized(mut self) -> Self {
        self.audio_extensions = self
            .audio_extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Whether the path carries a recognized audio extension (any case).
    pub fn is_audio(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.audio_extensions.contains(&e.to_ascii_lowercase()))
            .unwrap_or(false)
    }

    /// Mapped label for `stem`, falling back to the full filename.
    pub fn label_for(&self, file_name: &str, stem: &str) -> String {
        self.labels
            .get(stem)
            .cloned()
            .unwrap_or_else(|| file_name.to_string())
    }

    /// Sort rank of a display label; unknown labels go last.
    pub fn priority(&self, label: &str) -> u32 {
        self.label_priority.get(label).copied().unwrap_or(UNRANKED)
    }

    pub fn snr_for(&self, name: &str) -> Option<&str> {
        self.examples
            .iter()
            .find(|ex| ex.name == name)
            .map(|ex| ex.snr.as_str())
    }

    /// Example folder names in declaration order.
    pub fn example_names(&self) -> Vec<&str> {
        self.examples.iter().map(|ex| ex.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        let cfg = CatalogConfig::default();
        assert!(cfg.is_audio(Path::new("a.wav")));
        assert!(cfg.is_audio(Path::new("a.WAV")));
        assert!(cfg.is_audio(Path::new("b.Flac")));
        assert!(!cfg.is_audio(Path::new("notes.txt")));
        assert!(!cfg.is_audio(Path::new("wav")));
        assert!(!cfg.is_audio(Path::new(".wav")));
    }

    #[test]
    fn unmapped_stem_falls_back_to_filename() {
        let cfg = CatalogConfig::default();
        assert_eq!(cfg.label_for("speech_only.wav", "speech_only"), LABEL_CLEAN);
        assert_eq!(cfg.label_for("mix_3.wav", "mix_3"), "mix_3.wav");
    }

    #[test]
    fn unknown_labels_rank_last() {
        let cfg = CatalogConfig::default();
        assert!(cfg.priority(LABEL_CLEAN) < cfg.priority(LABEL_INPUT));
        assert!(cfg.priority(LABEL_INPUT) < cfg.priority(LABEL_ENHANCED));
        assert_eq!(cfg.priority("whatever.wav"), UNRANKED);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "examples": [{ "name": "Room_A", "snr": "-5 dB" }],
            "audio_extensions": [".WAV", "opus"]
        }"#;
        let cfg: CatalogConfig = serde_json::from_str(json).unwrap();
        let cfg = cfg.normalized();

        assert_eq!(cfg.example_names(), vec!["Room_A"]);
        assert_eq!(cfg.snr_for("Room_A"), Some("-5 dB"));
        assert_eq!(cfg.snr_for("Example_01"), None);
        assert!(cfg.is_audio(Path::new("x.opus")));
        assert!(cfg.is_audio(Path::new("x.wav")));
        assert!(!cfg.is_audio(Path::new("x.mp3")));
        // labels were not given, so the defaults remain
        assert_eq!(cfg.label_for("noisy_input.wav", "noisy_input"), LABEL_INPUT);
    }
}
