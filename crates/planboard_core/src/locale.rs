//! Locale packs for date rendering.
//!
//! Every supported locale is listed here; there is no runtime lookup by
//! constructed name. Unknown codes resolve to [`Locale::DEFAULT`].

use chrono::{DateTime, TimeZone};

use crate::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
    Es,
    Fr,
    De,
    It,
    Pt,
    Zh,
    Ja,
    Ko,
    Ar,
    Hi,
}

/// Date and time patterns for one locale, in `chrono` strftime syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalePack {
    pub locale: Locale,
    /// Short date, the `L` token.
    pub date: &'static str,
    /// Time with seconds, the `LTS` token.
    pub time_with_seconds: &'static str,
}

impl Locale {
    pub const DEFAULT: Locale = Locale::En;

    pub const ALL: [Locale; 12] = [
        Locale::En,
        Locale::Ru,
        Locale::Es,
        Locale::Fr,
        Locale::De,
        Locale::It,
        Locale::Pt,
        Locale::Zh,
        Locale::Ja,
        Locale::Ko,
        Locale::Ar,
        Locale::Hi,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::It => "it",
            Locale::Pt => "pt",
            Locale::Zh => "zh",
            Locale::Ja => "ja",
            Locale::Ko => "ko",
            Locale::Ar => "ar",
            Locale::Hi => "hi",
        }
    }

    /// Parses a language tag such as `"ru"`, `"en-US"` or `"pt_BR"`.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let base = tag
            .trim()
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Locale::ALL.into_iter().find(|locale| locale.code() == base)
    }

    /// Like [`Locale::from_tag`] but falls back to the default locale.
    pub fn resolve(tag: Option<&str>) -> Locale {
        tag.and_then(Locale::from_tag).unwrap_or(Locale::DEFAULT)
    }

    pub fn pack(self) -> LocalePack {
        let (date, time_with_seconds) = match self {
            Locale::En => ("%m/%d/%Y", "%-I:%M:%S %p"),
            Locale::Ru | Locale::De => ("%d.%m.%Y", "%H:%M:%S"),
            Locale::Es | Locale::Fr | Locale::It | Locale::Pt => ("%d/%m/%Y", "%H:%M:%S"),
            Locale::Zh | Locale::Ja => ("%Y/%m/%d", "%H:%M:%S"),
            Locale::Ko => ("%Y.%m.%d.", "%p %-I:%M:%S"),
            Locale::Ar => ("%-d/%-m/%Y", "%H:%M:%S"),
            Locale::Hi => ("%d/%m/%Y", "%-I:%M:%S %p"),
        };
        LocalePack {
            locale: self,
            date,
            time_with_seconds,
        }
    }
}

/// Renders `value` as short date followed by time with seconds.
pub fn format_date<Tz>(value: Option<&DateTime<Tz>>, pack: &LocalePack) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match value {
        Some(value) => format!(
            "{} {}",
            value.format(pack.date),
            value.format(pack.time_with_seconds)
        ),
        None => String::new(),
    }
}

/// Relative time from `then` to `now`, phrased through the catalog.
pub fn time_ago<Tz: TimeZone>(
    then: Option<&DateTime<Tz>>,
    now: &DateTime<Tz>,
    catalog: &Catalog,
) -> String {
    let Some(then) = then else {
        return String::new();
    };
    let seconds = now.timestamp() - then.timestamp();
    let future = seconds < 0;
    let seconds = seconds.unsigned_abs();

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let (single, plural, count) = if seconds < 45 {
        ("a few seconds", "a few seconds", 0)
    } else if minutes < 2 {
        ("a minute", "{0} minutes", 1)
    } else if minutes < 45 {
        ("a minute", "{0} minutes", minutes)
    } else if hours < 2 {
        ("an hour", "{0} hours", 1)
    } else if hours < 22 {
        ("an hour", "{0} hours", hours)
    } else if days < 2 {
        ("a day", "{0} days", 1)
    } else if days < 26 {
        ("a day", "{0} days", days)
    } else if days < 45 {
        ("a month", "{0} months", 1)
    } else if days < 320 {
        ("a month", "{0} months", (days / 30).max(2))
    } else if days < 548 {
        ("a year", "{0} years", 1)
    } else {
        ("a year", "{0} years", (days / 365).max(2))
    };

    let count_text = count.to_string();
    let amount = if count <= 1 {
        catalog.translate(single, &[], None)
    } else {
        catalog.translate(plural, &[count_text.as_str()], None)
    };
    if future {
        catalog.translate("in {0}", &[amount.as_str()], None)
    } else {
        catalog.translate("{0} ago", &[amount.as_str()], None)
    }
}
