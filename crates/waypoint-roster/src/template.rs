//! Placeholder substitution hook.
//!
//! Waypoint substitutes its own two tokens (`%player%`, `%amount%`) and
//! expands the literal `\n` escape. Every other placeholder (ranks,
//! server names, colour codes) belongs to the host's placeholder system,
//! reached through [`TemplateParser`].

use waypoint_session::Session;

/// Replaced with the subject's display name in rows and `find` replies.
pub const PLAYER_TOKEN: &str = "%player%";

/// Replaced with the number of visible members in a tier header.
pub const AMOUNT_TOKEN: &str = "%amount%";

/// The host's template substitution function.
///
/// - `context`: the viewer the text is being rendered for, if it is a
///   player
/// - `subject`: the session the text is about (a `find` target, a roster
///   row), if any
///
/// Any `Fn(&str, Option<&Session>, Option<&Session>) -> String` closure
/// implements this trait, which is handy in tests.
pub trait TemplateParser: Send + Sync {
    fn parse(
        &self,
        template: &str,
        context: Option<&Session>,
        subject: Option<&Session>,
    ) -> String;
}

impl<F> TemplateParser for F
where
    F: Fn(&str, Option<&Session>, Option<&Session>) -> String + Send + Sync,
{
    fn parse(
        &self,
        template: &str,
        context: Option<&Session>,
        subject: Option<&Session>,
    ) -> String {
        self(template, context, subject)
    }
}

/// A parser that leaves templates untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlaceholders;

impl TemplateParser for NoPlaceholders {
    fn parse(
        &self,
        template: &str,
        _context: Option<&Session>,
        _subject: Option<&Session>,
    ) -> String {
        template.to_string()
    }
}

/// Expands the two-character escape `\n` into a real newline.
pub fn expand_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_newlines_replaces_escape() {
        assert_eq!(expand_newlines(r"a\nb\n"), "a\nb\n");
        assert_eq!(expand_newlines("plain"), "plain");
    }

    #[test]
    fn test_no_placeholders_returns_input() {
        assert_eq!(NoPlaceholders.parse("%rank%", None, None), "%rank%");
    }

    #[test]
    fn test_closure_is_a_parser() {
        let upper = |t: &str, _: Option<&Session>, _: Option<&Session>| {
            t.to_uppercase()
        };
        assert_eq!(upper.parse("hi", None, None), "HI");
    }
}
