//! The rating badge shown next to the place title.

use std::fmt::Write as _;

/// Colour band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    High,
    Mid,
    Low,
}

impl RatingTier {
    /// 3.4 and above is high, 3.3 up to 3.4 is mid, anything lower is low.
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 3.4 {
            RatingTier::High
        } else if rating >= 3.3 {
            RatingTier::Mid
        } else {
            RatingTier::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            RatingTier::High => "tabemap-rating-high",
            RatingTier::Mid => "tabemap-rating-mid",
            RatingTier::Low => "tabemap-rating-low",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Badge {
    /// Lookup dispatched, no answer yet.
    Loading,
    Rated { rating: f64, url: Option<String> },
    /// No listing, no score, or the lookup failed.
    NotFound,
}

impl Badge {
    /// Badge for a finished lookup. A missing rating renders as not found even
    /// when the listing itself was located.
    pub fn from_lookup(rating: Option<f64>, url: Option<String>) -> Self {
        match rating {
            Some(rating) => Badge::Rated { rating, url },
            None => Badge::NotFound,
        }
    }

    pub fn text(&self) -> String {
        match self {
            Badge::Loading => "Loading...".to_string(),
            Badge::Rated { rating, .. } => format!("{:.2}", rating),
            Badge::NotFound => "N/A".to_string(),
        }
    }

    pub fn tier(&self) -> RatingTier {
        match self {
            Badge::Loading => RatingTier::Mid,
            Badge::Rated { rating, .. } => RatingTier::from_rating(*rating),
            Badge::NotFound => RatingTier::Low,
        }
    }

    pub fn css_classes(&self) -> String {
        format!("tabemap-rating-badge {}", self.tier().css_class())
    }

    /// Listing page the badge links to, if it is a link.
    pub fn link(&self) -> Option<&str> {
        match self {
            Badge::Rated { url: Some(url), .. } => Some(url),
            _ => None,
        }
    }

    /// Markup inserted into the host page. A rated badge with a URL becomes a
    /// link opening in a new tab, prefixed with the site icon.
    pub fn to_html(&self, icon_src: &str) -> String {
        let mut html = String::from(r#"<div class="tabemap-rating-container">"#);
        match self.link() {
            Some(url) => {
                let _ = write!(
                    html,
                    r#"<a href="{}" target="_blank" class="{}"><img class="tabemap-rating-icon" src="{}" alt="">{}</a>"#,
                    escape(url),
                    self.css_classes(),
                    escape(icon_src),
                    escape(&self.text()),
                );
            }
            None => {
                let _ = write!(
                    html,
                    r#"<span class="{}">{}</span>"#,
                    self.css_classes(),
                    escape(&self.text()),
                );
            }
        }
        html.push_str("</div>");
        html
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RatingTier::from_rating(3.39), RatingTier::Mid);
        assert_eq!(RatingTier::from_rating(3.40), RatingTier::High);
        assert_eq!(RatingTier::from_rating(3.29), RatingTier::Low);
        assert_eq!(RatingTier::from_rating(3.30), RatingTier::Mid);
        assert_eq!(RatingTier::from_rating(0.0), RatingTier::Low);
    }

    #[test]
    fn test_text_and_classes() {
        let rated = Badge::Rated {
            rating: 3.5,
            url: None,
        };
        assert_eq!(rated.text(), "3.50");
        assert_eq!(rated.css_classes(), "tabemap-rating-badge tabemap-rating-high");
        assert_eq!(Badge::Loading.text(), "Loading...");
        assert_eq!(Badge::NotFound.text(), "N/A");
        assert_eq!(
            Badge::NotFound.css_classes(),
            "tabemap-rating-badge tabemap-rating-low"
        );
    }

    #[test]
    fn test_from_lookup_without_rating_is_not_found() {
        let url = Some("https://tabelog.com/tokyo/A1301/A130101/13000001/".to_string());
        assert_eq!(Badge::from_lookup(None, url.clone()), Badge::NotFound);
        assert_eq!(
            Badge::from_lookup(Some(0.0), url.clone()),
            Badge::Rated {
                rating: 0.0,
                url
            }
        );
    }

    #[test]
    fn test_html_plain_and_linked() {
        assert_eq!(
            Badge::Loading.to_html("icon.png"),
            r#"<div class="tabemap-rating-container"><span class="tabemap-rating-badge tabemap-rating-mid">Loading...</span></div>"#
        );

        let linked = Badge::Rated {
            rating: 3.456,
            url: Some("https://tabelog.com/a?x=1&y=\"2\"".to_string()),
        };
        let html = linked.to_html("icon.png");
        assert!(html.contains(r#"href="https://tabelog.com/a?x=1&amp;y=&quot;2&quot;""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"<img class="tabemap-rating-icon" src="icon.png""#));
        assert!(html.contains(">3.46</a>"));
    }
}
