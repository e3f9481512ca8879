//! Property-based tests for the formatting layer.
//!
//! These cover the progressive input masks and the currency and date
//! parsing they feed, across a much wider input range than the unit
//! tests reach.

use proptest::prelude::*;
use rust_decimal::Decimal;

use costura_core::format;

fn digits_of(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

fn capped_digits(text: &str, cap: usize) -> String {
    text.chars().filter(char::is_ascii_digit).take(cap).collect()
}

// Property: masks keep typed digits, in order, and invent none
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn phone_mask_preserves_the_first_eleven_digits(input in "[0-9() ./-]{0,24}") {
        let masked = format::format_phone(&input);
        prop_assert_eq!(digits_of(&masked), capped_digits(&input, 11));
    }

    #[test]
    fn rg_mask_caps_at_nine_digits(input in "[0-9]{0,20}") {
        let masked = format::format_rg(&input);
        prop_assert_eq!(digits_of(&masked), capped_digits(&input, 9));
    }

    #[test]
    fn masks_are_stable_under_reapplication(input in "[0-9() ./-]{0,24}") {
        let phone = format::format_phone(&input);
        prop_assert_eq!(format::format_phone(&phone), phone.clone());

        let cpf = format::format_cpf(&input);
        prop_assert_eq!(format::format_cpf(&cpf), cpf.clone());

        let rg = format::format_rg(&input);
        prop_assert_eq!(format::format_rg(&rg), rg.clone());

        let date = format::format_date_input(&input);
        prop_assert_eq!(format::format_date_input(&date), date.clone());
    }
}

// Property: complete numbers land on their canonical shapes
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn complete_mobiles_take_the_five_four_split(digits in "[0-9]{11}") {
        let masked = format::format_phone(&digits);
        prop_assert_eq!(masked.len(), 15, "unexpected mask: {}", masked);
        prop_assert_eq!(&masked[0..1], "(");
        prop_assert_eq!(&masked[3..5], ") ");
        prop_assert_eq!(&masked[10..11], "-");
    }

    #[test]
    fn complete_landlines_take_the_four_four_split(digits in "[0-9]{10}") {
        let masked = format::format_phone(&digits);
        prop_assert_eq!(masked.len(), 14, "unexpected mask: {}", masked);
        prop_assert_eq!(&masked[3..5], ") ");
        prop_assert_eq!(&masked[9..10], "-");
    }

    #[test]
    fn complete_cpfs_follow_the_canonical_shape(digits in "[0-9]{11}") {
        let masked = format::format_cpf(&digits);
        prop_assert_eq!(masked.len(), 14, "unexpected mask: {}", masked);
        prop_assert_eq!(&masked[3..4], ".");
        prop_assert_eq!(&masked[7..8], ".");
        prop_assert_eq!(&masked[11..12], "-");
        prop_assert_eq!(digits_of(&masked), digits);
    }

    #[test]
    fn eight_typed_digits_render_a_full_date(digits in "[0-9]{8}") {
        let masked = format::format_date_input(&digits);
        prop_assert_eq!(masked.len(), 10, "unexpected mask: {}", masked);
        prop_assert_eq!(&masked[2..3], "/");
        prop_assert_eq!(&masked[5..6], "/");
    }
}

// Property: currency rendering and parsing agree
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn rendered_amounts_parse_back(cents in 0i64..1_000_000_000_000) {
        let amount = Decimal::new(cents, 2);
        let rendered = format::format_currency(amount);
        prop_assert!(rendered.starts_with("R$ "), "unexpected rendering: {}", rendered);

        let parsed = format::parse_amount(rendered.trim_start_matches("R$ "));
        prop_assert_eq!(parsed, Some(amount));
    }

    #[test]
    fn text_without_digits_never_parses(input in "[a-zA-Z ]{0,12}") {
        prop_assert_eq!(format::parse_amount(&input), None);
    }
}

// Property: the strict date parser is range-only
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn in_range_dates_round_trip_field_by_field(
        day in 1u32..=31,
        month in 1u32..=12,
        year in 1900i32..=2200,
    ) {
        let text = format!("{day:02}/{month:02}/{year:04}");
        let parsed = format::parse_date(&text).expect("in-range date should parse");
        prop_assert_eq!(parsed.day, day);
        prop_assert_eq!(parsed.month, month);
        prop_assert_eq!(parsed.year, year);
    }

    #[test]
    fn out_of_range_days_and_months_are_refused(
        day in 32u32..=99,
        month in 13u32..=99,
        year in 1900i32..=2200,
    ) {
        let bad_day = format!("{day:02}/01/{year:04}");
        prop_assert!(format::parse_date(&bad_day).is_none());
        let bad_month = format!("01/{month:02}/{year:04}");
        prop_assert!(format::parse_date(&bad_month).is_none());
    }
}
