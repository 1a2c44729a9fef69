use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source language selected for a buffer.
///
/// Known identifiers map to a fixed set of variants. Anything else is carried
/// through verbatim in [`Language::Other`] so the analysis service can decide
/// what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    Cpp,
    C,
    CSharp,
    Java,
    JavaScript,
    TypeScript,
    Python,
    Go,
    Rust,
    R,
    Php,
    Perl,
    Ruby,
    Swift,
    Kotlin,
    Dart,
    Matlab,
    Sql,
    Html,
    Css,
    Elixir,
    /// Unrecognized identifier, passed through unchanged.
    Other(String),
}

impl Language {
    pub const KNOWN: [Language; 21] = [
        Self::Cpp,
        Self::C,
        Self::CSharp,
        Self::Java,
        Self::JavaScript,
        Self::TypeScript,
        Self::Python,
        Self::Go,
        Self::Rust,
        Self::R,
        Self::Php,
        Self::Perl,
        Self::Ruby,
        Self::Swift,
        Self::Kotlin,
        Self::Dart,
        Self::Matlab,
        Self::Sql,
        Self::Html,
        Self::Css,
        Self::Elixir,
    ];

    /// Wire identifier sent to the analysis service.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::CSharp => "csharp",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::R => "r",
            Self::Php => "php",
            Self::Perl => "perl",
            Self::Ruby => "ruby",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Dart => "dart",
            Self::Matlab => "matlab",
            Self::Sql => "sql",
            Self::Html => "html",
            Self::Css => "css",
            Self::Elixir => "elixir",
            Self::Other(raw) => raw,
        }
    }

    /// Human readable label.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Cpp => "C++",
            Self::C => "C",
            Self::CSharp => "C#",
            Self::Java => "Java",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::R => "R",
            Self::Php => "PHP",
            Self::Perl => "Perl",
            Self::Ruby => "Ruby",
            Self::Swift => "Swift",
            Self::Kotlin => "Kotlin",
            Self::Dart => "Dart",
            Self::Matlab => "MATLAB",
            Self::Sql => "SQL",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Elixir => "Elixir",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Resolve an identifier, accepting the usual aliases (`c++`, `js`, `py3`, ...).
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();
        let known = match key.as_str() {
            "cpp" | "c++" => Some(Self::Cpp),
            "c" => Some(Self::C),
            "csharp" | "c#" => Some(Self::CSharp),
            "java" => Some(Self::Java),
            "javascript" | "js" | "node" => Some(Self::JavaScript),
            "typescript" | "ts" => Some(Self::TypeScript),
            "r" => Some(Self::R),
            "perl" => Some(Self::Perl),
            "swift" => Some(Self::Swift),
            "kotlin" => Some(Self::Kotlin),
            "dart" => Some(Self::Dart),
            "sql" => Some(Self::Sql),
            "html" => Some(Self::Html),
            "css" => Some(Self::Css),
            "elixir" => Some(Self::Elixir),
            "rust" => Some(Self::Rust),
            "ruby" | "rb" => Some(Self::Ruby),
            "python" | "python3" | "py" | "py3" => Some(Self::Python),
            "go" | "golang" => Some(Self::Go),
            "php" => Some(Self::Php),
            "matlab" => Some(Self::Matlab),
            _ => None,
        };

        known.unwrap_or_else(|| Self::Other(raw.to_string()))
    }

    /// Guess the language of a source file from its extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lang = match ext.to_lowercase().as_str() {
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Self::Cpp,
            "c" | "h" => Self::C,
            "cs" => Self::CSharp,
            "java" => Self::Java,
            "js" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "py" => Self::Python,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "r" => Self::R,
            "php" => Self::Php,
            "pl" | "pm" => Self::Perl,
            "rb" => Self::Ruby,
            "swift" => Self::Swift,
            "kt" | "kts" => Self::Kotlin,
            "dart" => Self::Dart,
            "m" => Self::Matlab,
            "sql" => Self::Sql,
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "ex" | "exs" => Self::Elixir,
            _ => return None,
        };
        Some(lang)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.as_str().to_string()
    }
}
