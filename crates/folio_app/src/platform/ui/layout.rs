use folio_core::{Page, SITE_TITLE, SOCIAL_LINKS};

/// Static chrome printed once when the page mounts.
pub fn initial_lines(current: Page) -> Vec<String> {
    let nav = Page::ALL
        .iter()
        .map(|page| {
            if *page == current {
                format!("[{}]", page.nav_label())
            } else {
                page.nav_label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![
        SITE_TITLE.to_string(),
        nav,
        String::new(),
        "GET IN TOUCH".to_string(),
        "Let's work together".to_string(),
        String::new(),
        "CONNECT".to_string(),
    ];
    lines.extend(
        SOCIAL_LINKS
            .iter()
            .map(|link| format!("  {:<10} {}", link.name, link.url)),
    );
    lines.push(String::new());
    lines
}
