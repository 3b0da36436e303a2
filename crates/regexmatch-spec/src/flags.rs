//! Per-block modifier letters.
//!
//! Each letter toggles one option: uppercase enables, lowercase disables.
//! Letters are applied left to right, so the last one for an option wins.
//! Unknown letters are ignored.

use std::fmt;

/// Matching options for one pattern block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionFlags {
    /// `I` / `i`
    pub ignore_case: bool,
    /// `D` / `d`
    pub dot_all: bool,
    /// `S` / `s`: every literal space matches one or more spaces or tabs.
    pub collapse_infinite_spaces: bool,
    /// `P` / `p`: allow spacing around `;` and escaped pipes.
    pub pipe_semicolon_spacing: bool,
    /// `R` / `r`: allow spacing around `<`, `<<`, `>` and `>>`.
    pub redirect_spacing: bool,
    /// `O` / `o`
    pub match_any_order: bool,
    /// `T` / `t`: trim the answer (and each answer line) before matching.
    pub trim_spaces: bool,
}

impl Default for OptionFlags {
    fn default() -> Self {
        Self {
            ignore_case: false,
            dot_all: false,
            collapse_infinite_spaces: true,
            pipe_semicolon_spacing: false,
            redirect_spacing: false,
            match_any_order: false,
            trim_spaces: true,
        }
    }
}

impl OptionFlags {
    /// Decode a flag string on top of the default options.
    pub fn parse(flags: &str) -> Self {
        let mut options = Self::default();
        options.apply(flags);
        options
    }

    pub fn apply(&mut self, flags: &str) {
        for letter in flags.chars() {
            let enable = letter.is_ascii_uppercase();
            if let Some(option) = self.option_mut(letter.to_ascii_uppercase()) {
                *option = enable;
            }
        }
    }

    fn option_mut(&mut self, letter: char) -> Option<&mut bool> {
        match letter {
            'I' => Some(&mut self.ignore_case),
            'D' => Some(&mut self.dot_all),
            'P' => Some(&mut self.pipe_semicolon_spacing),
            'R' => Some(&mut self.redirect_spacing),
            'O' => Some(&mut self.match_any_order),
            'S' => Some(&mut self.collapse_infinite_spaces),
            'T' => Some(&mut self.trim_spaces),
            _ => None,
        }
    }
}

/// Renders the shortest flag string that reproduces these options from the
/// defaults.
impl fmt::Display for OptionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults = Self::default();
        let letters = [
            ('I', self.ignore_case, defaults.ignore_case),
            ('D', self.dot_all, defaults.dot_all),
            ('P', self.pipe_semicolon_spacing, defaults.pipe_semicolon_spacing),
            ('R', self.redirect_spacing, defaults.redirect_spacing),
            ('O', self.match_any_order, defaults.match_any_order),
            ('S', self.collapse_infinite_spaces, defaults.collapse_infinite_spaces),
            ('T', self.trim_spaces, defaults.trim_spaces),
        ];

        for (letter, value, default) in letters {
            if value == default {
                continue;
            }
            if value {
                write!(f, "{}", letter)?;
            } else {
                write!(f, "{}", letter.to_ascii_lowercase())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = OptionFlags::parse("");
        assert!(options.trim_spaces);
        assert!(options.collapse_infinite_spaces);
        assert!(!options.ignore_case);
        assert!(!options.dot_all);
        assert!(!options.pipe_semicolon_spacing);
        assert!(!options.redirect_spacing);
        assert!(!options.match_any_order);
    }

    #[test]
    fn test_uppercase_enables() {
        let options = OptionFlags::parse("IDPRO");
        assert!(options.ignore_case);
        assert!(options.dot_all);
        assert!(options.pipe_semicolon_spacing);
        assert!(options.redirect_spacing);
        assert!(options.match_any_order);
    }

    #[test]
    fn test_lowercase_disables() {
        let options = OptionFlags::parse("st");
        assert!(!options.collapse_infinite_spaces);
        assert!(!options.trim_spaces);
    }

    #[test]
    fn test_last_write_wins() {
        assert!(OptionFlags::parse("IiI").ignore_case);
        assert!(!OptionFlags::parse("IiIi").ignore_case);
        assert!(OptionFlags::parse("sS").collapse_infinite_spaces);
    }

    #[test]
    fn test_unknown_letters_ignored() {
        assert_eq!(OptionFlags::parse("xyzXYZ"), OptionFlags::default());
    }

    #[test]
    fn test_apply_keeps_current_values() {
        let mut options = OptionFlags::parse("I");
        options.apply("O");
        assert!(options.ignore_case);
        assert!(options.match_any_order);
    }

    #[test]
    fn test_display() {
        assert_eq!(OptionFlags::default().to_string(), "");
        assert_eq!(OptionFlags::parse("OiIst").to_string(), "IOst");
    }

    #[test]
    fn test_display_reparses() {
        let options = OptionFlags::parse("DpPRrTsO");
        assert_eq!(OptionFlags::parse(&options.to_string()), options);
    }
}
