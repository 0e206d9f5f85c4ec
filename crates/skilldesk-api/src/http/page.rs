//! Server-rendered HTML pages.

const SKILL_EDITOR_TEMPLATE: &str = include_str!("../../templates/skill_editor.html");

/// Navigation mode of the editor pages.
pub const NAV_MODE_CREATE: &str = "create";

/// Render the skill editor shell for `skill_id`.
pub fn render_skill_editor(skill_id: &str, nav_mode: &str) -> String {
    SKILL_EDITOR_TEMPLATE
        .replace("{{skill_id}}", &escape_html(skill_id))
        .replace("{{nav_mode}}", &escape_html(nav_mode))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_placeholders() {
        let html = render_skill_editor("abcDEF123-_x", NAV_MODE_CREATE);
        assert!(html.contains(r#"data-skill-id="abcDEF123-_x""#));
        assert!(html.contains(r#"data-nav-mode="create""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;"
        );
    }
}
