mod helpers;

use helpers::menu;
use schoolmeal_calendar::{
    DayKind, GENERIC_HOLIDAY_LABEL, HolidayRegistry, MenuDay, MenuMap, YearMonth, build_month,
    leading_filler_count, week_rows,
};
use time::macros::date;

#[test]
fn test_grid_length_is_filler_plus_days_for_every_month() {
    let registry = HolidayRegistry::default();
    let menus = MenuMap::new();

    for year in [2023, 2024, 2025, 2026] {
        for month0 in 0..12 {
            let month = YearMonth::new(year, month0).unwrap();
            let days = build_month(month, &menus, &registry);
            let filler = usize::from(leading_filler_count(month));

            assert_eq!(days.len(), filler + usize::from(month.days_in_month()));

            let current: Vec<u8> = days
                .iter()
                .filter(|d| d.kind == DayKind::Current)
                .map(|d| d.day_number)
                .collect();
            let expected: Vec<u8> = (1..=month.days_in_month()).collect();
            assert_eq!(current, expected, "{year}-{month0}");

            assert!(days[..filler].iter().all(|d| d.kind == DayKind::Previous));
        }
    }
}

#[test]
fn test_march_2025_filler_is_tail_of_february() {
    let month = YearMonth::new(2025, 2).unwrap();
    let days = build_month(month, &MenuMap::new(), &HolidayRegistry::default());

    // 2025-03-01 is a Saturday.
    assert_eq!(leading_filler_count(month), 6);
    let filler: Vec<u8> = days.iter().take(6).map(|d| d.day_number).collect();
    assert_eq!(filler, vec![23, 24, 25, 26, 27, 28]);
    assert!(days.iter().take(6).all(|d| !d.has_menu && !d.is_holiday));

    assert_eq!(days.len(), 37);
    assert_eq!(week_rows(days.len()), 6);
}

#[test]
fn test_month_starting_on_sunday_has_no_filler() {
    // 2025-06-01 is a Sunday.
    let month = YearMonth::new(2025, 5).unwrap();
    let days = build_month(month, &MenuMap::new(), &HolidayRegistry::default());

    assert_eq!(days.len(), 30);
    assert_eq!(days[0].kind, DayKind::Current);
    assert_eq!(days[0].day_number, 1);
}

#[test]
fn test_has_menu_on_weekday_with_items() {
    let month = YearMonth::new(2025, 2).unwrap();
    let menus = menu(&[("2025-03-03", &["김치찌개"])]);
    let days = build_month(month, &menus, &HolidayRegistry::default());

    let monday = days.iter().find(|d| d.is_current() && d.day_number == 3).unwrap();
    assert!(monday.has_menu);
    assert_eq!(monday.date(month), Some(date!(2025 - 03 - 03)));

    assert_eq!(days.iter().filter(|d| d.has_menu).count(), 1);
}

#[test]
fn test_weekend_menu_is_suppressed() {
    let month = YearMonth::new(2025, 2).unwrap();
    let menus = menu(&[("2025-03-08", &["김치찌개"])]);
    let days = build_month(month, &menus, &HolidayRegistry::default());

    let saturday = days.iter().find(|d| d.is_current() && d.day_number == 8).unwrap();
    assert!(!saturday.has_menu);
}

#[test]
fn test_empty_menu_list_is_not_a_menu() {
    let month = YearMonth::new(2025, 2).unwrap();
    let menus = menu(&[("2025-03-04", &[])]);
    let days = build_month(month, &menus, &HolidayRegistry::default());

    assert!(days.iter().all(|d| !d.has_menu));
}

#[test]
fn test_server_holiday_names_take_precedence() {
    let month = YearMonth::new(2025, 4).unwrap();
    let mut menus = MenuMap::new();
    menus.insert(
        date!(2025 - 05 - 05),
        MenuDay::new(date!(2025 - 05 - 05), vec![]).with_holiday_names(vec!["어린이날(학교)".to_owned()]),
    );
    menus.insert(
        date!(2025 - 05 - 14),
        MenuDay::new(date!(2025 - 05 - 14), vec!["쌀밥".to_owned()])
            .with_holiday_names(vec!["개교기념일".to_owned()]),
    );

    let days = build_month(month, &menus, &HolidayRegistry::default());
    let find = |n: u8| days.iter().find(|d| d.is_current() && d.day_number == n).unwrap();

    assert_eq!(find(5).holiday_name.as_deref(), Some("어린이날(학교)"));
    assert!(find(14).is_holiday);
    assert_eq!(find(14).holiday_name.as_deref(), Some("개교기념일"));

    // Falls back to the registry where the server says nothing.
    assert_eq!(find(6).holiday_name.as_deref(), Some("어린이날 대체공휴일"));
    assert!(!find(7).is_holiday);
}

#[test]
fn test_school_holiday_uses_generic_label() {
    let month = YearMonth::new(2025, 4).unwrap();
    let mut registry = HolidayRegistry::default();
    registry.add_school_holiday(date!(2025 - 05 - 02));

    let days = build_month(month, &MenuMap::new(), &registry);
    let friday = days.iter().find(|d| d.is_current() && d.day_number == 2).unwrap();

    assert!(friday.is_holiday);
    assert_eq!(friday.holiday_name.as_deref(), Some(GENERIC_HOLIDAY_LABEL));
}

#[test]
fn test_build_month_is_deterministic() {
    let month = YearMonth::new(2025, 2).unwrap();
    let menus = menu(&[("2025-03-03", &["김치찌개"]), ("2025-03-04", &["된장국"])]);
    let registry = HolidayRegistry::default();

    assert_eq!(
        build_month(month, &menus, &registry),
        build_month(month, &menus, &registry)
    );
}

#[test]
fn test_serializes_for_the_page() {
    let month = YearMonth::new(2025, 2).unwrap();
    let days = build_month(month, &MenuMap::new(), &HolidayRegistry::default());
    let json = serde_json::to_value(&days).unwrap();

    assert_eq!(json[0]["kind"], "previous");
    assert_eq!(json[6]["kind"], "current");
    assert_eq!(json[6]["dayNumber"], 1);
    assert_eq!(json[6]["isHoliday"], true);
    assert_eq!(json[6]["holidayName"], "삼일절");
    assert!(json[7].get("holidayName").is_none());
}
