#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

#[test]
fn test_format_amount_small() {
    assert_eq!(format_amount(dec!(4.50)), "$4.50");
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234.5)), "$1,234.50");
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42)), "-$42.00");
}

#[test]
fn test_display_amount_masked() {
    assert_eq!(display_amount(dec!(1234.56), true), "$•••••");
    assert_eq!(display_amount(dec!(1234.56), false), "$1,234.56");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly-ten", 11), "exactly-ten");
    assert_eq!(truncate("this is too long", 8), "this is…");
    assert_eq!(truncate("anything", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("café au lait", 5), "café…");
}

#[test]
fn test_scroll_down_and_up() {
    let mut index = 0;
    let mut scroll = 0;

    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);

    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 4);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_bounds() {
    let mut index = 0;
    let mut scroll = 0;

    // can't move past the end
    for _ in 0..20 {
        scroll_down(&mut index, &mut scroll, 3, 5);
    }
    assert_eq!(index, 2);

    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!(index, 9);
    assert_eq!(scroll, 6);
}
