// tkwire-core/src/command.rs
use std::fmt;

/// Error decoding a list-shaped interpreter result
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("unmatched open brace in list")]
    UnmatchedBrace,
    #[error("unmatched open quote in list")]
    UnmatchedQuote,
    #[error("list element in braces followed by {0:?} instead of space")]
    TrailingAfterBrace(char),
    #[error("list element in quotes followed by {0:?} instead of space")]
    TrailingAfterQuote(char),
}

/// A single toolkit command assembled word by word.
///
/// Every word passes through [`quote`] (or [`list_word`]) so that spaces,
/// brackets and dollar signs in user text can never change the shape of the
/// command. Only [`Command::raw`] and [`Command::script`] bypass quoting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    words: Vec<String>,
    detached: bool,
}

impl Command {
    /// Start a command with its first word (a command name or widget path)
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            words: vec![quote(name.as_ref())],
            detached: false,
        }
    }

    /// A command addressed to a widget that has no path yet. Words can
    /// still be appended, but [`crate::Tk`] refuses to evaluate it.
    pub fn detached() -> Self {
        Self {
            words: Vec::new(),
            detached: true,
        }
    }

    /// An argument fragment without a command name, used for init parameters
    pub fn args() -> Self {
        Self::default()
    }

    /// Append one word, quoted if needed
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.words.push(quote(&value.to_string()));
        self
    }

    /// Append `-name value`
    pub fn opt(self, name: &str, value: impl fmt::Display) -> Self {
        self.arg(name).arg(value)
    }

    /// Append a list as a single word
    pub fn list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.push(list_word(items));
        self
    }

    /// Append a script body in braces. The body must be a well-formed script.
    pub fn script(mut self, body: impl AsRef<str>) -> Self {
        self.words.push(format!("{{{}}}", body.as_ref()));
        self
    }

    /// Append a word verbatim (command substitution and the like)
    pub fn raw(mut self, word: impl Into<String>) -> Self {
        self.words.push(word.into());
        self
    }

    /// Append all words of another command or fragment
    pub fn extend(mut self, other: &Command) -> Self {
        self.words.extend(other.words.iter().cloned());
        self.detached |= other.detached;
        self
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

fn is_special(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '{' | '}' | '[' | ']' | '$' | '\\' | ';')
}

/// Quote one command word. Plain words pass through untouched; anything
/// with whitespace or substitution characters is double-quoted with the
/// substitution characters escaped.
pub fn quote(word: &str) -> String {
    if word.is_empty() {
        return "{}".to_string();
    }
    if !word.chars().any(is_special) {
        return word.to_string();
    }

    let mut out = String::with_capacity(word.len() + 2);
    out.push('"');
    for c in word.chars() {
        match c {
            '"' | '\\' | '$' | '[' | ']' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Encode one list element
pub fn list_element(item: &str) -> String {
    if item.is_empty() {
        return "{}".to_string();
    }
    if !item.starts_with('#') && !item.chars().any(is_special) {
        return item.to_string();
    }
    if brace_safe(item) {
        return format!("{{{}}}", item);
    }

    let mut out = String::with_capacity(item.len() * 2);
    for c in item.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '#' if out.is_empty() => out.push_str("\\#"),
            c if is_special(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

fn brace_safe(item: &str) -> bool {
    let mut depth = 0usize;
    for c in item.chars() {
        match c {
            '\\' => return false,
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth == 0
}

/// Encode a list as a string value (variable contents, not a command word)
pub fn list_string<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let elements: Vec<String> = items
        .into_iter()
        .map(|item| list_element(item.as_ref()))
        .collect();
    elements.join(" ")
}

/// Encode a whole list as one braced command word
pub fn list_word<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    format!("{{{}}}", list_string(items))
}

/// Decode a list-shaped string (interpreter results, callback payloads)
pub fn parse_list(input: &str) -> Result<Vec<String>, ListError> {
    let mut items = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let Some(&first) = chars.peek() else {
            break;
        };

        let mut item = String::new();
        match first {
            '{' => {
                chars.next();
                let mut depth = 1usize;
                loop {
                    match chars.next() {
                        None => return Err(ListError::UnmatchedBrace),
                        Some('\\') => {
                            item.push('\\');
                            if let Some(next) = chars.next() {
                                item.push(next);
                            }
                        }
                        Some('{') => {
                            depth += 1;
                            item.push('{');
                        }
                        Some('}') => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                            item.push('}');
                        }
                        Some(c) => item.push(c),
                    }
                }
                if let Some(&c) = chars.peek()
                    && !c.is_whitespace()
                {
                    return Err(ListError::TrailingAfterBrace(c));
                }
            }
            '"' => {
                chars.next();
                loop {
                    match chars.next() {
                        None => return Err(ListError::UnmatchedQuote),
                        Some('"') => break,
                        Some('\\') => push_escaped(&mut item, chars.next()),
                        Some(c) => item.push(c),
                    }
                }
                if let Some(&c) = chars.peek()
                    && !c.is_whitespace()
                {
                    return Err(ListError::TrailingAfterQuote(c));
                }
            }
            _ => {
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    chars.next();
                    if c == '\\' {
                        push_escaped(&mut item, chars.next());
                    } else {
                        item.push(c);
                    }
                }
            }
        }
        items.push(item);
    }

    Ok(items)
}

fn push_escaped(out: &mut String, next: Option<char>) {
    match next {
        Some('n') => out.push('\n'),
        Some('t') => out.push('\t'),
        Some('r') => out.push('\r'),
        Some('\n') => out.push(' '),
        Some(c) => out.push(c),
        None => out.push('\\'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words_are_not_quoted() {
        let cmd = Command::new("pack")
            .arg(".1.2")
            .opt("-padx", 1)
            .opt("-fill", "both");
        assert_eq!(cmd.to_string(), "pack .1.2 -padx 1 -fill both");
    }

    #[test]
    fn test_special_characters_are_escaped() {
        assert_eq!(quote("hello world"), "\"hello world\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("[exit]"), "\"\\[exit\\]\"");
        assert_eq!(quote("$HOME"), "\"\\$HOME\"");
        assert_eq!(quote(""), "{}");
    }

    #[test]
    fn test_list_word_encoding() {
        assert_eq!(list_word(["a", "b c", ""]), "{a {b c} {}}");
        assert_eq!(list_word(Vec::<String>::new()), "{}");
        assert_eq!(list_word(["x}y"]), "{x\\}y}");
    }

    #[test]
    fn test_list_encoding_survives_decoding() {
        let items = vec![
            "plain".to_string(),
            "two words".to_string(),
            "brace}only".to_string(),
            "back\\slash".to_string(),
            "#hash".to_string(),
            "line\nbreak".to_string(),
            String::new(),
        ];
        let word = list_word(&items);
        let inner = &word[1..word.len() - 1];
        assert_eq!(parse_list(inner).unwrap(), items);
    }

    #[test]
    fn test_parse_interpreter_results() {
        assert_eq!(
            parse_list(".1.2 .1.3   .1.4").unwrap(),
            vec![".1.2", ".1.3", ".1.4"]
        );
        assert_eq!(
            parse_list("7 .1.5 {a b} \"c d\"").unwrap(),
            vec!["7", ".1.5", "a b", "c d"]
        );
        assert!(parse_list("").unwrap().is_empty());
        assert_eq!(parse_list("{a"), Err(ListError::UnmatchedBrace));
        assert_eq!(parse_list("{a}b"), Err(ListError::TrailingAfterBrace('b')));
    }

    #[test]
    fn test_script_and_raw_words() {
        let cmd = Command::new("bind")
            .arg(".3")
            .arg("<Double-1>")
            .script("break");
        assert_eq!(cmd.to_string(), "bind .3 <Double-1> {break}");

        let clear = Command::new(".2.5").arg("delete").raw("[.2.5 children {}]");
        assert_eq!(clear.to_string(), ".2.5 delete [.2.5 children {}]");
    }

    #[test]
    fn test_extend_with_fragment() {
        let init = Command::args().opt("-text", "Hi there");
        let cmd = Command::new("ttk::label").arg(".1").extend(&init);
        assert_eq!(cmd.to_string(), "ttk::label .1 -text \"Hi there\"");
    }

    #[test]
    fn test_detached_stays_detached() {
        let cmd = Command::detached().arg("configure").opt("-text", "x");
        assert!(cmd.is_detached());
        assert!(Command::new("pack").extend(&cmd).is_detached());
        assert!(!Command::new("pack").is_detached());
    }
}
