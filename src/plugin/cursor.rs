use crate::imports::*;

/*
    Types:
    * TextCursor - Character-indexed scanner used by the name, selector, alias and sort-key grammars.

    Positions are character indices into the whole text so every InvalidCharacter error can be
    rendered with a caret, even when the failing token is nested several grammars deep.
*/
pub(crate) struct TextCursor<'a> {
    text: &'a str,
    chars: Vec<char>,
    position: usize,
}

impl<'a> TextCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            position: 0,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    pub fn peek_is(&self, c: char) -> bool {
        self.peek() == Some(c)
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    pub fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let start = self.position;
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.position += 1;
        }
        self.slice(start, self.position)
    }

    pub fn skip_whitespace(&mut self) -> usize {
        self.take_while(char::is_whitespace).chars().count()
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end.min(self.chars.len())].iter().collect()
    }

    pub fn rest(&self) -> String {
        self.slice(self.position, self.chars.len())
    }

    pub fn invalid_character(&self) -> anyhow::Error {
        self.invalid_character_at(self.position)
    }

    pub fn invalid_character_at(&self, position: usize) -> anyhow::Error {
        PluginError::invalid_character(self.text, position).into()
    }

    /// Reads `[A-Za-z][A-Za-z0-9-]*` and validates it as a PluginName. A non-letter first
    /// character is reported at its own position.
    pub fn name(&mut self) -> Result<PluginName> {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return Err(self.invalid_character()),
        }
        let start = self.position;
        let token = self.take_while(is_name_char);
        PluginName::with(&token).map_err(|e| self.reposition(e, start))
    }

    /// Reads a balanced `( .. )` argument list starting at the cursor, quoted strings may hold
    /// parens and commas, `""` escapes a quote.
    pub fn parenthesised(&mut self) -> Result<String> {
        let start = self.position;
        let mut depth = 0usize;
        let mut quoted = false;
        while let Some(c) = self.advance() {
            match c {
                '"' => quoted = !quoted,
                '(' if !quoted => depth += 1,
                ')' if !quoted && depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(self.slice(start, self.position));
                    }
                }
                _ => {}
            }
        }
        Err(PluginError::invalid_argument("Missing ')'").into())
    }

    /// Rewrites an InvalidCharacter raised against a token so it points into the whole text.
    pub fn reposition(&self, error: anyhow::Error, offset: usize) -> anyhow::Error {
        match error.downcast_ref::<PluginError>() {
            Some(PluginError::InvalidCharacter { position, .. }) => {
                self.invalid_character_at(offset + position)
            }
            _ => error,
        }
    }
}

pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}
