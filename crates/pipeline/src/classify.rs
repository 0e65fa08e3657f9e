use serde::{Deserialize, Serialize};

/// Target language mode for a refactoring job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    Java,
    NodeJs,
}

impl LanguageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::NodeJs => "nodejs",
        }
    }

    /// Parses the user-supplied language name (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "java" => Some(Self::Java),
            "nodejs" => Some(Self::NodeJs),
            _ => None,
        }
    }
}

impl std::fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the pipeline does with a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Send the file content to the rewrite service.
    Transform,
    /// Copy the file to the destination byte-for-byte.
    Copy,
}

/// Decides whether a file is eligible for rewriting under the given mode.
///
/// Pure function of its inputs. Files that turn out to be unreadable as text
/// are downgraded to a verbatim copy at read time regardless of what this
/// returns.
pub fn classify(filename: &str, mode: LanguageMode) -> FileAction {
    let eligible = match mode {
        LanguageMode::Java => filename.ends_with(".java") || filename == "pom.xml",
        LanguageMode::NodeJs => {
            filename.ends_with(".js")
                || filename.ends_with(".cjs")
                || filename.ends_with(".mjs")
                || filename == "package.json"
        }
    };

    if eligible {
        FileAction::Transform
    } else {
        FileAction::Copy
    }
}
