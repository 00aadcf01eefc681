//! HTML rendering for the converter page.

use crate::pace::RaceProjections;

/// Values the page template needs.
#[derive(Debug, Clone)]
pub struct PageView {
    pub minutes: u32,
    pub seconds: u32,
    pub pace: String,
    pub races: RaceProjections,
    pub error: Option<String>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            minutes: 0,
            seconds: 0,
            pace: "0".to_string(),
            races: RaceProjections {
                five_k: "0".to_string(),
                ten_k: "0".to_string(),
                twenty_k: "0".to_string(),
                half_marathon: "0".to_string(),
                marathon: "0".to_string(),
                other: "0".to_string(),
            },
            error: None,
        }
    }
}

/// Render the converter page.
///
/// Every interpolated value is produced by the server (numbers or fixed
/// strings), never echoed user input.
pub fn render_page(view: &PageView) -> String {
    let error_banner = match &view.error {
        Some(message) => format!(r#"<p class="error">{message}</p>"#),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Pace Converter</title>
<link rel="stylesheet" href="/css/style.css">
<script src="/js/pace.js" defer></script>
</head>
<body>
<h1>Pace Converter</h1>
{error_banner}
<form method="post" action="/">
  <fieldset>
    <legend>min/km to km/h</legend>
    <label>Minutes <input type="number" name="minutes" min="0" value="{minutes}"></label>
    <label>Seconds <input type="number" name="seconds" min="0" max="59" value="{seconds}"></label>
    <button type="submit" name="converttokmperh" value="1">Convert</button>
  </fieldset>
  <fieldset>
    <legend>km/h to min/km</legend>
    <label>km/h <input type="text" name="kmperhour" value="{pace}"></label>
    <button type="submit" name="converttominperkm" value="1">Convert</button>
  </fieldset>
</form>
<h2>Race projections</h2>
<table>
  <tr><th>5 km</th><td>{five_k}</td></tr>
  <tr><th>10 km</th><td>{ten_k}</td></tr>
  <tr><th>20 km</th><td>{twenty_k}</td></tr>
  <tr><th>Half marathon</th><td>{half}</td></tr>
  <tr><th>Marathon</th><td>{marathon}</td></tr>
  <tr><th>Other</th><td>{other}</td></tr>
</table>
</body>
</html>
"#,
        error_banner = error_banner,
        minutes = view.minutes,
        seconds = view.seconds,
        pace = view.pace,
        five_k = view.races.five_k,
        ten_k = view.races.ten_k,
        twenty_k = view.races.twenty_k,
        half = view.races.half_marathon,
        marathon = view.races.marathon,
        other = view.races.other,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_renders_zeroes() {
        let html = render_page(&PageView::default());
        assert!(html.contains(r#"name="minutes""#));
        assert!(html.contains(r#"name="kmperhour""#));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn error_banner_present_when_set() {
        let view = PageView {
            error: Some("minutes must be a whole number".to_string()),
            ..PageView::default()
        };
        let html = render_page(&view);
        assert!(html.contains("minutes must be a whole number"));
    }
}
