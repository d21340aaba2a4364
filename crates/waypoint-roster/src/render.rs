//! Turns a [`Roster`] into the text delivered to a channel.

use waypoint_session::Session;

use crate::{
    expand_newlines, Roster, RosterTemplates, TemplateParser, AMOUNT_TOKEN,
    PLAYER_TOKEN,
};

/// Renders a roster as newline-separated lines:
///
/// ```text
/// header                 (once, if configured)
/// tier header            (per non-empty tier, %amount% = visible count)
/// row                    (per visible member, %player% = display name)
/// ...
/// footer                 (once, if configured)
/// ```
///
/// Only the header and footer are taken from `templates`; tier headers and
/// rows come from the tiers the roster was queried with. `context` is the
/// viewer's own session, passed through to the host parser.
pub fn render_roster(
    templates: &RosterTemplates,
    roster: &Roster,
    parser: &dyn TemplateParser,
    context: Option<&Session>,
) -> String {
    let mut lines = Vec::new();
    let mut push = |text: String| lines.push(expand_newlines(&text));

    if let Some(header) = &templates.header {
        push(parser.parse(header, context, None));
    }

    for section in &roster.sections {
        if let Some(header) = &section.tier.header {
            let header =
                header.replace(AMOUNT_TOKEN, &section.members.len().to_string());
            push(parser.parse(&header, context, None));
        }

        let row = section.tier.row.as_deref().unwrap_or(PLAYER_TOKEN);
        for member in &section.members {
            let line = row.replace(PLAYER_TOKEN, member.name());
            push(parser.parse(&line, context, Some(member)));
        }
    }

    if let Some(footer) = &templates.footer {
        push(parser.parse(footer, context, None));
    }

    lines.join("\n")
}
