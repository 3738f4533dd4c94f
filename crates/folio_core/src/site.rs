//! Static site map: routed pages, navigation labels and contact links.

pub const SITE_TITLE: &str = "Nadilla Ananda – Creative Digital Designer";
pub const SITE_DESCRIPTION: &str = "Nadilla Ananda – Creative Digital Designer crafting memorable digital experiences with a focus on elegant, minimal aesthetics.";
pub const CONTACT_EMAIL: &str = "747nadillananda@gmail.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Work,
    Info,
    Contact,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 4] = [Page::Home, Page::Work, Page::Info, Page::Contact];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Work => "/work",
            Page::Info => "/info",
            Page::Contact => "/contact",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Page::Home => "HOME",
            Page::Work => "WORK",
            Page::Info => "INFO",
            Page::Contact => "CONTACT",
        }
    }

    /// Resolves a location path; a trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Page> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Page::ALL
            .into_iter()
            .find(|page| page.path().eq_ignore_ascii_case(normalized))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
}

impl SocialLink {
    /// Mail links stay in the current tab; everything else opens a new one.
    pub fn opens_in_new_tab(&self) -> bool {
        !self.url.starts_with("mailto:")
    }
}

pub const SOCIAL_LINKS: [SocialLink; 4] = [
    SocialLink {
        name: "Email",
        url: "mailto:747nadillananda@gmail.com",
    },
    SocialLink {
        name: "Instagram",
        url: "https://www.instagram.com/s4inteves/",
    },
    SocialLink {
        name: "LinkedIn",
        url: "https://www.linkedin.com/in/nadillananda/",
    },
    SocialLink {
        name: "GitHub",
        url: "https://github.com/nadillananda",
    },
];
