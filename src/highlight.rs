//! Display-only token classes for the editor pane. Lines are classified
//! independently; there is no state carried between lines.

const KOTLIN_KEYWORDS: &[&str] = &[
    "package", "import", "class", "data", "interface", "fun", "val", "var", "override",
    "private", "lateinit", "object", "companion", "abstract", "suspend", "return", "if",
    "else", "when", "is", "for", "while", "null", "true", "false",
];

const GRADLE_KEYWORDS: &[&str] = &[
    "plugins", "id", "dependencies", "implementation", "kapt", "project", "all", "android",
    "apply", "true", "false", "null",
];

/// Keyword set picked from a file's language hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Kotlin,
    Gradle,
    Xml,
}

impl Dialect {
    /// Unknown or missing hints fall back to Kotlin.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(str::to_ascii_lowercase).as_deref() {
            Some("groovy" | "gradle" | "kts") => Self::Gradle,
            Some("xml") => Self::Xml,
            _ => Self::Kotlin,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kotlin => "Kotlin",
            Self::Gradle => "Gradle",
            Self::Xml => "XML",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Kotlin => KOTLIN_KEYWORDS,
            Self::Gradle => GRADLE_KEYWORDS,
            Self::Xml => &[],
        }
    }

    fn comment_start(self) -> &'static str {
        match self {
            Self::Xml => "<!--",
            Self::Kotlin | Self::Gradle => "//",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Plain,
    Keyword,
    Annotation,
    Literal,
    Comment,
    TypeName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub class: TokenClass,
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn end_of<F: Fn(char) -> bool>(line: &str, start: usize, keep: F) -> usize {
    line[start..]
        .char_indices()
        .find(|&(_, ch)| !keep(ch))
        .map_or(line.len(), |(offset, _)| start + offset)
}

fn end_of_literal(line: &str, start: usize, quote: char) -> usize {
    let mut escaped = false;
    for (offset, ch) in line[start + quote.len_utf8()..].char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return start + quote.len_utf8() + offset + ch.len_utf8();
        }
    }
    line.len()
}

fn classify_word(word: &str, dialect: Dialect) -> TokenClass {
    if dialect.keywords().contains(&word) {
        TokenClass::Keyword
    } else if word.starts_with(|ch: char| ch.is_ascii_uppercase()) && word.chars().count() > 1 {
        TokenClass::TypeName
    } else {
        TokenClass::Plain
    }
}

pub fn classify_line(line: &str, dialect: Dialect) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;

    while let Some(ch) = line[start..].chars().next() {
        let (end, class) = if line[start..].starts_with(dialect.comment_start()) {
            (line.len(), TokenClass::Comment)
        } else if ch.is_whitespace() {
            (end_of(line, start, char::is_whitespace), TokenClass::Plain)
        } else if ch == '"' || ch == '\'' {
            (end_of_literal(line, start, ch), TokenClass::Literal)
        } else if ch == '@' {
            (end_of(line, start + 1, is_word_char), TokenClass::Annotation)
        } else if is_word_char(ch) {
            let end = end_of(line, start, is_word_char);
            (end, classify_word(&line[start..end], dialect))
        } else {
            (start + ch.len_utf8(), TokenClass::Plain)
        };

        tokens.push(Token {
            text: &line[start..end],
            class,
        });
        start = end;
    }

    tokens
}
