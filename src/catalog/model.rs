use serde::Serialize;

// ---------------------------------------------------------------------------
// FileEntry – one playable file inside an example folder
// ---------------------------------------------------------------------------

/// A single audio file as shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Raw filename, e.g. `noisy_input.wav`.
    pub file_name: String,
    /// Display label from the stem table, or the filename when unmapped.
    pub label: String,
    /// `example/filename`, always forward-slash separated.
    pub rel_path: String,
}

// ---------------------------------------------------------------------------
// ExampleGroup – one example folder with at least one audio file
// ---------------------------------------------------------------------------

/// One example card: its folder name, SNR label and ordered files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleGroup {
    pub name: String,
    pub snr: String,
    pub files: Vec<FileEntry>,
}

impl ExampleGroup {
    /// Labels in display order. Handy for assertions and log lines.
    pub fn labels(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.label.as_str()).collect()
    }
}
