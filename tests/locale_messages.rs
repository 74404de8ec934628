//! Locale-sensitive message rendering
//!
//! Only `process_locale_drives_errors` touches the process-wide locale;
//! every other test renders with an explicit locale.

use chrono::NaiveDate;
use proptest::prelude::*;
use tidemark::locale::{self, Locale};
use tidemark::prelude::*;

fn locales() -> Vec<Locale> {
    ["en-US", "en-GB", "fr-FR", "de-DE", "ru", "ja", "nl-NL"]
        .iter()
        .filter_map(|tag| tag.parse().ok())
        .chain([Locale::root()])
        .collect()
}

/// Drop every token a locale may change: digits and separators.
fn literal_text(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .filter(|c| !matches!(*c, '.' | ',' | '/' | '-' | '\u{202f}' | '\u{a0}'))
        .collect()
}

#[test]
fn process_locale_drives_errors() {
    let previous = locale::locale();
    locale::set_locale("de-DE".parse().unwrap());

    let limit = Builder::<f64>::new()
        .is_lte(1000.0)
        .with_message("%1$.2f* exceeds %2$.2f*", vec![]);
    assert_eq!(limit.that(1234.5).errors(), Some("1234,50 exceeds 1000,00"));

    let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let deadline = Builder::<NaiveDate>::new().is_before(day);
    assert_eq!(
        deadline.that(day).errors(),
        Some("the date '09.03.2024' should be before: '09.03.2024'")
    );

    locale::set_locale(previous);
}

#[test]
fn explicit_locale_formats_dates() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let evaluator = Builder::<NaiveDate>::new().is_after(day).that(day);

    let rendered: Vec<String> = ["en-US", "fr-FR", "ja"]
        .iter()
        .map(|tag| {
            let locale: Locale = tag.parse().unwrap();
            evaluator.failure_in(&locale).unwrap().message
        })
        .collect();

    assert_eq!(
        rendered,
        [
            "the date '03/09/2024' should be after: '03/09/2024'",
            "the date '09/03/2024' should be after: '09/03/2024'",
            "the date '2024/03/09' should be after: '2024/03/09'",
        ]
    );
}

#[test]
fn grouping_follows_locale() {
    let evaluator = Builder::<u64>::new()
        .is_lt(1_000_000)
        .with_message("%1$,d* is over %2$,d*", vec![])
        .that(1_234_567);

    let us = evaluator.failure_in(&Locale::us()).unwrap().message;
    let german = evaluator.failure_in(&"de".parse().unwrap()).unwrap().message;
    assert_eq!(us, "1,234,567 is over 1,000,000");
    assert_eq!(german, "1.234.567 is over 1.000.000");
}

proptest! {
    #[test]
    fn prop_locale_changes_only_numeric_tokens(value in -1.0e9f64..1.0e9, bound in 0u32..1_000) {
        let evaluator = Builder::<f64>::new()
            .is_lt(f64::from(bound))
            .with_message("limit %2$,.3f* reached by %1$,.2f*", vec![])
            .that(value.abs() + f64::from(bound));

        let texts: Vec<String> = locales()
            .iter()
            .map(|locale| literal_text(&evaluator.failure_in(locale).unwrap().message))
            .collect();
        prop_assert!(texts.iter().all(|text| *text == texts[0]));
        prop_assert_eq!(texts[0].as_str(), "limit  reached by ");
    }

    #[test]
    fn prop_catalog_text_is_locale_independent(year in 1970i32..2100, ordinal in 1u32..365) {
        let day = NaiveDate::from_yo_opt(year, ordinal).unwrap();
        let evaluator = Builder::<NaiveDate>::new().not().is_after_or_equal(day).that(day);

        let texts: Vec<String> = locales()
            .iter()
            .map(|locale| literal_text(&evaluator.failure_in(locale).unwrap().message))
            .collect();
        prop_assert!(texts.iter().all(|text| *text == texts[0]));
        prop_assert_eq!(
            texts[0].as_str(),
            "the date '' should NOT be after or equal to: ''"
        );
    }
}
