//! Natural, case-insensitive string ordering.
//!
//! Runs of ASCII digits compare by numeric value, everything else compares
//! character by character after lowercasing, so `"Item 9" < "item 10"`.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compares two strings in natural order, ignoring case.
///
/// ```
/// use std::cmp::Ordering;
/// use sieve_query::natural::compare_ignore_case;
///
/// assert_eq!(compare_ignore_case("file2", "File10"), Ordering::Less);
/// assert_eq!(compare_ignore_case("ABC", "abc"), Ordering::Equal);
/// ```
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let ordering = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                compare_digit_runs(&l_run, &r_run)
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                l.to_lowercase().cmp(r.to_lowercase())
            }
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

// Leading zeros carry no value; a longer run is a larger number.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
