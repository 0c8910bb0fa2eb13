//! Fits free-text names into the fixed-width name fields of the binary
//! records.
//!
//! The device firmware only displays a handful of characters per name, and
//! the record layouts reserve 12 or 20 bytes. [ShortName] strips characters
//! the firmware can't handle, applies the configured whitespace and case
//! policies and truncates the result to the configured width, substituting
//! a default base name when nothing usable remains.

use std::collections::HashSet;

pub struct ShortName {
    max_length: usize,
    badchars: String,
    must_upper: bool,
    must_unique: bool,
    whitespace_ok: bool,
    repeating_whitespace_ok: bool,
    default_name: String,
    used: HashSet<String>,
}

impl ShortName {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            badchars: String::new(),
            must_upper: false,
            must_unique: false,
            whitespace_ok: true,
            repeating_whitespace_ok: true,
            default_name: "WPT".to_string(),
            used: HashSet::new(),
        }
    }

    /// Characters that are removed from every name.
    pub fn badchars(mut self, badchars: &str) -> Self {
        self.badchars = badchars.to_string();
        self
    }

    /// Force the result to upper case.
    pub fn must_upper(mut self, must_upper: bool) -> Self {
        self.must_upper = must_upper;
        self
    }

    /// Disambiguate repeated results with a numeric suffix.
    pub fn must_unique(mut self, must_unique: bool) -> Self {
        self.must_unique = must_unique;
        self
    }

    /// Whether whitespace survives at all.
    pub fn whitespace_ok(mut self, whitespace_ok: bool) -> Self {
        self.whitespace_ok = whitespace_ok;
        self
    }

    /// Whether runs of whitespace survive uncollapsed.
    pub fn repeating_whitespace_ok(mut self, repeating_whitespace_ok: bool) -> Self {
        self.repeating_whitespace_ok = repeating_whitespace_ok;
        self
    }

    /// Base name used when the input shortens to nothing.
    pub fn default_name(mut self, default_name: &str) -> Self {
        self.default_name = default_name.to_string();
        self
    }

    /// Produce a name of at most `max_length` bytes.
    pub fn shorten(&mut self, name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        let mut last_was_space = false;
        for c in name.chars() {
            if self.badchars.contains(c) {
                continue;
            }
            if c.is_whitespace() {
                if !self.whitespace_ok {
                    continue;
                }
                if last_was_space && !self.repeating_whitespace_ok {
                    continue;
                }
                last_was_space = true;
            } else {
                last_was_space = false;
            }
            out.push(c);
        }

        let mut out = out.trim().to_string();
        if self.must_upper {
            out = out.to_uppercase();
        }
        if out.is_empty() {
            out = self.default_name.clone();
        }
        out.truncate(out.floor_char_boundary(self.max_length));

        if self.must_unique {
            out = self.uniquify(out);
            self.used.insert(out.clone());
        }
        out
    }

    fn uniquify(&self, base: String) -> String {
        if !self.used.contains(&base) {
            return base;
        }
        for n in 1.. {
            let suffix = format!(".{n}");
            let room = self.max_length.saturating_sub(suffix.len());
            let mut candidate = base.clone();
            candidate.truncate(candidate.floor_char_boundary(room));
            candidate.push_str(&suffix);
            if !self.used.contains(&candidate) {
                return candidate;
            }
        }
        unreachable!()
    }
}
