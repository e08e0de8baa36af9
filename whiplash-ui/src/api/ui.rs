//! Web UI pages
//!
//! Server-rendered HTML: the mood prompt form, the detected-mood bubble,
//! and the playlist list. The light/dark theme travels as a query
//! parameter so every page stays stateless.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::warn;
use whiplash_mood::detect_mood;

use crate::AppState;

/// Page query parameters shared by the UI routes
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub theme: Theme,
    pub text: Option<String>,
}

/// UI color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn query_value(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// (background, text, link, surface) colors
    fn palette(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Theme::Light => ("#ffffff", "#000000", "#1a0dab", "#f2f2f2"),
            Theme::Dark => ("#121212", "#e0e0e0", "#bb86fc", "#1e1e1e"),
        }
    }
}

/// GET /
///
/// Landing page with the mood prompt form and theme toggle
pub async fn root_page(Query(query): Query<PageQuery>) -> impl IntoResponse {
    let body = format!(
        "{}{}",
        theme_toggle(query.theme, "/", None),
        prompt_form(query.theme, "")
    );
    Html(render_page(query.theme, &body))
}

/// GET /mood?text=...
///
/// Result page: mood bubble for the top label, the full ranked sequence,
/// and playlist suggestions for the top label. A failed search renders an
/// inline notice rather than an error page.
pub async fn mood_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let text = query.text.unwrap_or_default();
    let moods = detect_mood(&text);
    let top = moods[0].clone();

    let (playlists, notice) = match state.spotify.search_playlists(&top).await {
        Ok(entries) if entries.is_empty() => {
            (Vec::new(), Some("No playlists found for this mood."))
        }
        Ok(entries) => (entries, None),
        Err(err) => {
            warn!(error = %err, mood = %top, "playlist search failed");
            (Vec::new(), Some("Playlist search is unavailable right now."))
        }
    };

    let mut body = String::new();
    body.push_str(&theme_toggle(query.theme, "/mood", Some(&text)));
    body.push_str(&prompt_form(query.theme, &text));

    body.push_str(&format!(
        r#"
        <div class="mood-bubble">You're feeling: {}</div>
"#,
        escape_html(&top)
    ));

    if moods.len() > 1 {
        body.push_str(&format!(
            r#"        <p class="detected-list">Everything detected: {}</p>
"#,
            escape_html(&moods.join(", "))
        ));
    }

    body.push_str(&format!(
        r#"        <h4>Here are some playlists based on your mood: <span class="accent">{}</span></h4>
"#,
        escape_html(&top)
    ));

    if let Some(notice) = notice {
        body.push_str(&format!(
            r#"        <p class="notice">{}</p>
"#,
            notice
        ));
    }

    for playlist in &playlists {
        body.push_str(&format!(
            r#"        <div class="playlist"><a href="{}" target="_blank">{}</a></div>
"#,
            escape_html(&playlist.url),
            escape_html(&playlist.name)
        ));
    }

    Html(render_page(query.theme, &body))
}

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_page))
        .route("/mood", get(mood_page))
}

/// Wrap a page body with the document shell and themed styles
fn render_page(theme: Theme, body: &str) -> String {
    let (background, text_color, link, surface) = theme.palette();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>whiplash.fm</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: {background};
            color: {text_color};
            line-height: 1.6;
            padding: 30px;
        }}
        a {{
            color: {link};
            text-decoration: none;
        }}
        h1 {{
            font-size: 34px;
            margin-bottom: 5px;
        }}
        h3 {{
            font-size: 24px;
            margin-bottom: 20px;
        }}
        h4 {{
            margin-top: 30px;
        }}
        .accent {{
            color: #e52e71;
        }}
        .theme-toggle {{
            margin-bottom: 20px;
        }}
        .theme-toggle button {{
            padding: 5px 14px;
            margin-right: 5px;
            border: 1px solid {link};
            border-radius: 4px;
            background: {surface};
            color: {text_color};
            cursor: pointer;
        }}
        .theme-toggle button[disabled] {{
            opacity: 0.5;
            cursor: default;
        }}
        .prompt input[type="text"] {{
            width: 60%;
            padding: 10px;
            font-size: 18px;
            border: 1px solid {link};
            border-radius: 4px;
            background: {surface};
            color: {text_color};
        }}
        .prompt button {{
            padding: 10px 20px;
            font-size: 18px;
            border: none;
            border-radius: 4px;
            background: #e52e71;
            color: white;
            cursor: pointer;
        }}
        .mood-bubble {{
            margin-top: 20px;
            background: linear-gradient(135deg, #ff8a00, #e52e71);
            padding: 20px;
            border-radius: 15px;
            text-align: center;
            font-size: 24px;
            font-weight: 600;
            color: white;
            box-shadow: 0 4px 10px rgba(0,0,0,0.2);
        }}
        .detected-list {{
            margin-top: 10px;
            font-size: 15px;
            opacity: 0.8;
        }}
        .playlist {{
            margin-left: 40px;
            margin-bottom: 10px;
            font-weight: 500;
            font-size: 18px;
        }}
        .notice {{
            margin-top: 10px;
            font-style: italic;
            opacity: 0.8;
        }}
    </style>
</head>
<body>
    <h1>whiplash.fm</h1>
    <h3>Hey you! How are you feeling?</h3>
{body}</body>
</html>
"#
    )
}

/// Theme toggle row: a GET form resubmitting the current page with the
/// chosen theme, carrying the prompt text along when present.
fn theme_toggle(current: Theme, action: &str, text: Option<&str>) -> String {
    let hidden = text
        .map(|t| {
            format!(
                r#"<input type="hidden" name="text" value="{}">"#,
                escape_html(t)
            )
        })
        .unwrap_or_default();

    let button = |theme: Theme, label: &str| {
        let disabled = if theme == current { " disabled" } else { "" };
        format!(
            r#"<button type="submit" name="theme" value="{}"{}>{}</button>"#,
            theme.query_value(),
            disabled,
            label
        )
    };

    format!(
        r#"        <form class="theme-toggle" action="{}" method="get">{}{}{}</form>
"#,
        action,
        hidden,
        button(Theme::Light, "Light"),
        button(Theme::Dark, "Dark")
    )
}

/// Prompt form resubmitting to the result page
fn prompt_form(theme: Theme, text: &str) -> String {
    format!(
        r#"        <form class="prompt" action="/mood" method="get">
            <input type="hidden" name="theme" value="{}">
            <input type="text" name="text" value="{}" placeholder="Tell me how you feel...">
            <button type="submit">Find playlists</button>
        </form>
"#,
        theme.query_value(),
        escape_html(text)
    )
}

/// Escape text for interpolation into HTML body or attribute context
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"mad" & sad</b>"#),
            "&lt;b&gt;&quot;mad&quot; &amp; sad&lt;/b&gt;"
        );
    }

    #[test]
    fn theme_defaults_to_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn theme_parses_from_query_value() {
        let query: PageQuery = serde_urlencoded_like("theme=dark&text=hello");
        assert_eq!(query.theme, Theme::Dark);
        assert_eq!(query.text.as_deref(), Some("hello"));

        let query: PageQuery = serde_urlencoded_like("text=hello");
        assert_eq!(query.theme, Theme::Light);
    }

    fn serde_urlencoded_like(query: &str) -> PageQuery {
        serde_json::from_value(
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect::<serde_json::Map<_, _>>()
                .into(),
        )
        .expect("query should deserialize")
    }

    #[test]
    fn rendered_page_embeds_theme_palette() {
        let dark = render_page(Theme::Dark, "body");
        assert!(dark.contains("#121212"));
        let light = render_page(Theme::Light, "body");
        assert!(light.contains("#ffffff"));
    }

    #[test]
    fn prompt_form_escapes_user_text() {
        let form = prompt_form(Theme::Light, r#""><script>"#);
        assert!(!form.contains("<script>"));
        assert!(form.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn toggle_disables_current_theme() {
        let toggle = theme_toggle(Theme::Dark, "/", None);
        assert!(toggle.contains(r#"value="dark" disabled"#));
        assert!(!toggle.contains(r#"value="light" disabled"#));
    }
}
