//! Formatting of amounts and dates in the Brazilian Portuguese style.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision, Scales};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

/// Format `amount` as Brazilian reais, e.g. "R$ 1.234,50".
pub fn format_currency(amount: Decimal) -> String {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    let formatter = FORMATTER.get_or_init(|| {
        Formatter::currency("R$ ")
            .unwrap()
            .scales(Scales::none())
            .precision(Precision::Decimals(2))
    });

    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    if rounded.is_zero() {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "R$ 0,00".to_owned();
    }

    let formatted = formatter.fmt_string(rounded.to_f64().unwrap_or_default());
    let formatted = with_two_decimals(&to_brazilian_marks(&formatted));

    if amount.is_sign_negative() {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Swap the "," thousands separator and the "." decimal point that numfmt
/// writes for the Brazilian "." and ",".
fn to_brazilian_marks(formatted: &str) -> String {
    formatted
        .chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            c => c,
        })
        .collect()
}

/// numfmt omits trailing zeros, e.g. "12,30" is rendered as "12,3" and
/// "150,00" as "150", so pad the cents back to two digits.
fn with_two_decimals(formatted: &str) -> String {
    match formatted.rsplit_once(',') {
        Some((whole, cents)) if cents.len() < 2 => format!("{whole},{cents:0<2}"),
        Some(_) => formatted.to_owned(),
        None => format!("{formatted},00"),
    }
}

/// Format a calendar date as "DD/MM/YYYY".
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
