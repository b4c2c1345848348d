use chrono::{Duration, TimeZone, Utc};
use planboard_core::{format_date, time_ago, Catalog, Locale};

#[test]
fn dates_render_with_the_locale_pack() {
    let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();

    assert_eq!(format_date(Some(&at), &Locale::En.pack()), "03/07/2024 2:05:09 PM");
    assert_eq!(format_date(Some(&at), &Locale::Ru.pack()), "07.03.2024 14:05:09");
    assert_eq!(format_date(Some(&at), &Locale::Ja.pack()), "2024/03/07 14:05:09");
    assert_eq!(format_date::<Utc>(None, &Locale::En.pack()), "");
}

#[test]
fn relative_time_is_phrased_in_english_without_a_catalog() {
    let now = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
    let catalog = Catalog::new();
    let ago = |delta: Duration| time_ago(Some(&(now - delta)), &now, &catalog);

    assert_eq!(ago(Duration::seconds(10)), "a few seconds ago");
    assert_eq!(ago(Duration::seconds(70)), "a minute ago");
    assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
    assert_eq!(ago(Duration::hours(3)), "3 hours ago");
    assert_eq!(ago(Duration::days(1)), "a day ago");
    assert_eq!(ago(Duration::days(10)), "10 days ago");
    assert_eq!(ago(Duration::days(400)), "a year ago");
    assert_eq!(ago(Duration::minutes(-5)), "in 5 minutes");
    assert_eq!(time_ago::<Utc>(None, &now, &catalog), "");
}

#[test]
fn relative_time_uses_catalog_phrases() {
    let now = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
    let catalog = Catalog::from_entries([
        ("{0} minutes", "{0} минут"),
        ("{0} ago", "{0} назад"),
    ]);
    let then = now - Duration::minutes(7);
    assert_eq!(time_ago(Some(&then), &now, &catalog), "7 минут назад");
}
