use std::fmt::Write;

use crate::config::TipConfig;
use crate::models::action::tip_href;

/// Escapes `value` for use in HTML text and quoted attribute values.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// JSON string literal safe to embed in an inline `<script>`.
fn script_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

/// Unfurler URL that renders a preview of `target`.
pub fn unfurl_url(conf: &TipConfig, target: &str) -> String {
    match url::Url::parse_with_params(&conf.unfurler_url, &[("url", target)]) {
        Ok(url) => url.to_string(),
        Err(_) => {
            let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
            format!("{}?url={}", conf.unfurler_url, encoded)
        }
    }
}

/// Preview page with Twitter Card / Open Graph tags that hands the browser over
/// to the unfurler after `redirect_delay_ms`.
pub fn build_page(
    conf: &TipConfig,
    title: &str,
    description: &str,
    image_url: &str,
    amount: Option<&str>,
) -> String {
    let target = conf.action_url(amount);
    let redirect = unfurl_url(conf, &target);

    let title = escape(title);
    let description = escape(description);
    let image_url = escape(image_url);
    let handle = escape(&conf.twitter_handle);
    let target_attr = escape(&target);
    let redirect_attr = escape(&redirect);

    let mut action_meta = String::new();
    if let Some(amount) = amount {
        let _ = write!(
            action_meta,
            "\n    <meta name=\"blink:action\" content=\"{}\">",
            escape(&tip_href(amount))
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>

    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:site" content="{handle}">
    <meta name="twitter:creator" content="{handle}">
    <meta name="twitter:title" content="{title}">
    <meta name="twitter:description" content="{description}">
    <meta name="twitter:image" content="{image_url}">
    <meta name="twitter:url" content="{target_attr}">

    <meta property="og:title" content="{title}">
    <meta property="og:type" content="website">
    <meta property="og:url" content="{target_attr}">
    <meta property="og:image" content="{image_url}">
    <meta property="og:description" content="{description}">

    <meta name="description" content="{description}">{action_meta}
    <script>
      setTimeout(function() {{
        document.getElementById('debug').textContent = 'Redirecting now...';
        window.location.href = {redirect_js};
      }}, {delay});
    </script>
</head>
<body>
    <h1>{title}</h1>
    <p>{description}</p>
    <img src="{image_url}" alt="{title}" style="max-width: 300px; height: auto;">
    <p id="debug">Waiting to redirect...</p>
    <p>If you are not redirected automatically, please <a href="{redirect_attr}">click here</a>.</p>
</body>
</html>
"#,
        redirect_js = script_string(&redirect),
        delay = conf.redirect_delay_ms,
    )
}
