//! Root shell
//!
//! Static header and footer around the dashboard body.

/// Wrap `body` in the page frame
pub fn frame(body: &str, api_url: &str, width: usize) -> String {
    let title = "ML Analytics Dashboard";
    let live = "● Live";
    let gap = width.saturating_sub(title.chars().count() + live.chars().count() + 1).max(1);

    let rule = "═".repeat(width);
    let thin = "─".repeat(width);

    [
        rule.clone(),
        format!(" {}{}{}", title, " ".repeat(gap), live),
        " Real-time churn prediction".to_string(),
        rule,
        String::new(),
        body.to_string(),
        String::new(),
        thin,
        format!(
            " churnwatch v{} · backend {}",
            env!("CARGO_PKG_VERSION"),
            api_url
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_wraps_body() {
        let text = frame("BODY", "http://localhost:8000", 60);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].chars().count(), 60);
        assert!(lines[1].starts_with(" ML Analytics Dashboard"));
        assert!(lines[1].ends_with("● Live"));
        assert_eq!(lines[1].chars().count(), 60);
        assert!(lines.contains(&"BODY"));
        assert!(lines.last().unwrap().contains("http://localhost:8000"));
    }
}
