//! Argument vector
//!
//! Whitespace tokenization into borrowed slices, no allocation.

/// Tokens stored per line. Further tokens are counted but not kept.
pub const MAX_TOKENS: usize = 8;

/// Tokenized command line. Token 0 is the command name.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    tokens: [&'a str; MAX_TOKENS],
    stored: usize,
    count: usize,
}

impl<'a> Args<'a> {
    /// Create empty argument vector
    pub const fn empty() -> Self {
        Self {
            tokens: [""; MAX_TOKENS],
            stored: 0,
            count: 0,
        }
    }

    /// Split a line on whitespace.
    pub fn parse(line: &'a str) -> Self {
        let mut args = Self::empty();
        for token in line.split_whitespace() {
            args.push(token);
        }
        args
    }

    /// Wrap tokens produced by an external tokenizer.
    pub fn from_tokens(tokens: &[&'a str]) -> Self {
        let mut args = Self::empty();
        for &token in tokens {
            args.push(token);
        }
        args
    }

    fn push(&mut self, token: &'a str) {
        if self.stored < MAX_TOKENS {
            self.tokens[self.stored] = token;
            self.stored += 1;
        }
        self.count += 1;
    }

    /// The command name, or `""` for an empty line.
    pub fn command(&self) -> &'a str {
        self.argv(0).unwrap_or("")
    }

    /// Total number of tokens on the line, including any not stored.
    pub fn argc(&self) -> usize {
        self.count
    }

    /// Token by position; index 0 is the command.
    pub fn argv(&self, idx: usize) -> Option<&'a str> {
        if idx < self.stored {
            Some(self.tokens[idx])
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Stored tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens[..self.stored].iter().copied()
    }
}

impl Default for Args<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
