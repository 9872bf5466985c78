// Supported languages and their per-language constants.
// Every table keyed by language lives here so new languages are added in one place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodeNestError;

/// Language identifier, serialized exactly as the execution service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    #[default]
    Cpp,
    Javascript,
    Java,
    Python,
}

impl LanguageId {
    /// All languages in selector order.
    pub const ALL: [LanguageId; 4] = [
        LanguageId::Cpp,
        LanguageId::Javascript,
        LanguageId::Java,
        LanguageId::Python,
    ];

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageId::Cpp => "cpp",
            LanguageId::Javascript => "javascript",
            LanguageId::Java => "java",
            LanguageId::Python => "python",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::Cpp => "C++",
            LanguageId::Javascript => "JavaScript",
            LanguageId::Java => "Java",
            LanguageId::Python => "Python",
        }
    }

    /// File extension used when exporting a buffer.
    pub fn extension(&self) -> &'static str {
        match self {
            LanguageId::Cpp => "cpp",
            LanguageId::Javascript => "js",
            LanguageId::Java => "java",
            LanguageId::Python => "py",
        }
    }

    /// Short glyph shown next to the language name in the header.
    pub fn icon(&self) -> &'static str {
        match self {
            LanguageId::Cpp => "C+",
            LanguageId::Javascript => "JS",
            LanguageId::Java => "Jv",
            LanguageId::Python => "Py",
        }
    }

    /// Starter program loaded into a fresh buffer.
    pub fn starter_template(&self) -> &'static str {
        match self {
            LanguageId::Cpp => {
                r#"//start coding here...
    
#include <iostream>
using namespace std;
int main() {
    cout << "Hello, World!" << endl;
    return 0;
}"#
            }
            LanguageId::Javascript => {
                r#"//start coding here...
        
function func() {
    console.log("Hello, World!");
}

func();"#
            }
            LanguageId::Java => {
                r#"//start coding here...
        
public class Main {

public static void main(String[] args) {
    System.out.println("Hello, World!");
}
}"#
            }
            LanguageId::Python => {
                r#"#start coding here...
print("Hello, World!")
     "#
            }
        }
    }

    fn index(&self) -> usize {
        match self {
            LanguageId::Cpp => 0,
            LanguageId::Javascript => 1,
            LanguageId::Java => 2,
            LanguageId::Python => 3,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageId {
    type Err = CodeNestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| CodeNestError::UnknownLanguage(s.to_string()))
    }
}
