//! Integration tests for the planner (presentation service).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use taskday::db::Database;
use taskday::planner::{TaskPlanner, current_week_of, is_same_day, is_upcoming_slot};
use taskday::types::{TaskColor, TaskKind};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    day(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

/// Planner over a fresh in-memory store, anchored on a fixed instant.
fn setup_planner(reference: NaiveDateTime) -> TaskPlanner {
    let db = Database::open_in_memory().expect("Failed to create in-memory database");
    TaskPlanner::with_reference(db, reference).expect("Failed to build planner")
}

mod week_tests {
    use super::*;

    #[test]
    fn week_is_seven_consecutive_days_from_sunday() {
        // 2024-11-15 is a Friday.
        let week = current_week_of(day(2024, 11, 15));

        assert_eq!(week.len(), 7);
        assert_eq!(week[0], day(2024, 11, 10));
        for pair in week.windows(2) {
            assert_eq!(pair[1], pair[0].succ_opt().unwrap());
        }
        assert!(week.contains(&day(2024, 11, 15)));
    }

    #[test]
    fn week_crosses_month_boundary() {
        // 2024-10-31 is a Thursday; week runs Oct 27 .. Nov 2.
        let week = current_week_of(day(2024, 10, 31));
        assert_eq!(week[0], day(2024, 10, 27));
        assert_eq!(week[6], day(2024, 11, 2));
    }

    #[test]
    fn week_crosses_year_boundary() {
        // 2024-12-31 is a Tuesday; week runs Dec 29 .. Jan 4.
        let week = current_week_of(day(2024, 12, 31));
        assert_eq!(week[0], day(2024, 12, 29));
        assert_eq!(week[6], day(2025, 1, 4));
    }

    #[test]
    fn planner_week_contains_the_reference_date() {
        let planner = setup_planner(dt(2024, 11, 15, 10, 0));

        assert_eq!(planner.current_week().len(), 7);
        assert!(planner.current_week().contains(&day(2024, 11, 15)));
        assert_eq!(planner.selected_date(), day(2024, 11, 15));
    }
}

mod slot_tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn later_hour_is_upcoming() {
        assert!(is_upcoming_slot(dt(2024, 11, 15, 14, 0), at(9, 30)));
    }

    #[test]
    fn same_hour_compares_minutes_inclusively() {
        assert!(is_upcoming_slot(dt(2024, 11, 15, 9, 30), at(9, 30)));
        assert!(is_upcoming_slot(dt(2024, 11, 15, 9, 45), at(9, 30)));
        assert!(!is_upcoming_slot(dt(2024, 11, 15, 9, 15), at(9, 30)));
    }

    #[test]
    fn earlier_hour_is_past() {
        assert!(!is_upcoming_slot(dt(2024, 11, 15, 8, 59), at(9, 0)));
    }

    // The predicate compares time-of-day only; a deadline on another date
    // with a matching slot still counts as upcoming.
    #[test]
    fn date_component_is_ignored() {
        assert!(is_upcoming_slot(dt(2020, 1, 1, 14, 0), at(9, 30)));
    }

    #[test]
    fn same_day_helper_ignores_time() {
        assert!(is_same_day(dt(2024, 11, 15, 0, 0), dt(2024, 11, 15, 23, 59)));
        assert!(!is_same_day(dt(2024, 11, 15, 23, 59), dt(2024, 11, 16, 0, 0)));
    }
}

mod draft_tests {
    use super::*;

    #[test]
    fn draft_defaults_match_the_reference_instant() {
        let planner = setup_planner(dt(2024, 11, 15, 10, 0));

        let draft = planner.draft();
        assert!(draft.title.is_empty());
        assert!(draft.description.is_empty());
        assert_eq!(draft.color, TaskColor::RedCard);
        assert_eq!(draft.kind, TaskKind::Basic);
        assert_eq!(draft.deadline, dt(2024, 11, 15, 10, 0));
        assert!(!draft.is_completed);
        assert!(planner.editing().is_none());
    }

    #[test]
    fn save_with_empty_title_is_rejected_and_draft_kept() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        planner.draft_mut().description = "no title yet".to_string();

        assert!(!planner.save_draft());

        // Nothing reached the store and the draft is intact for retry.
        assert!(planner.filtered_tasks().is_empty());
        assert_eq!(planner.draft().description, "no title yet");
    }

    #[test]
    fn save_refreshes_the_filtered_view() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        let draft = planner.draft_mut();
        draft.title = "Pay bills".to_string();
        draft.deadline = dt(2024, 11, 15, 9, 0);

        assert!(planner.save_draft());

        assert_eq!(planner.filtered_tasks().len(), 1);
        assert_eq!(planner.filtered_tasks()[0].title, "Pay bills");
    }

    #[test]
    fn saving_twice_with_same_natural_key_updates_not_duplicates() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        let draft = planner.draft_mut();
        draft.title = "Pay bills".to_string();
        draft.deadline = dt(2024, 11, 15, 9, 0);
        assert!(planner.save_draft());

        planner.draft_mut().description = "second pass".to_string();
        planner.draft_mut().kind = TaskKind::Urgent;
        assert!(planner.save_draft());

        let tasks = planner.filtered_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "second pass");
        assert_eq!(tasks[0].kind, TaskKind::Urgent);
    }

    #[test]
    fn load_draft_from_task_enters_edit_mode() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        let draft = planner.draft_mut();
        draft.title = "Edit me".to_string();
        draft.deadline = dt(2024, 11, 15, 9, 0);
        draft.color = TaskColor::PurpleCard;
        assert!(planner.save_draft());
        let task = planner.filtered_tasks()[0].clone();

        planner.reset_draft();
        assert!(planner.draft().title.is_empty());

        planner.load_draft_from_task(&task);
        assert_eq!(planner.draft().title, "Edit me");
        assert_eq!(planner.draft().color, TaskColor::PurpleCard);
        assert_eq!(planner.draft().deadline, dt(2024, 11, 15, 9, 0));
        assert_eq!(planner.editing().map(|t| t.id.as_str()), Some(task.id.as_str()));
    }

    #[test]
    fn reset_draft_restores_defaults_and_clears_editing() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        let draft = planner.draft_mut();
        draft.title = "Something".to_string();
        draft.kind = TaskKind::Important;
        draft.color = TaskColor::GreenCard;
        assert!(planner.save_draft());
        let task = planner.filtered_tasks()[0].clone();
        planner.load_draft_from_task(&task);

        planner.reset_draft();

        assert!(planner.draft().title.is_empty());
        assert_eq!(planner.draft().kind, TaskKind::Basic);
        assert_eq!(planner.draft().color, TaskColor::RedCard);
        assert!(planner.editing().is_none());
    }
}

mod view_tests {
    use super::*;

    fn seed(planner: &mut TaskPlanner, title: &str, deadline: NaiveDateTime) {
        let draft = planner.draft_mut();
        draft.title = title.to_string();
        draft.deadline = deadline;
        assert!(planner.save_draft());
    }

    #[test]
    fn select_date_rebuilds_the_view_for_that_day() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        seed(&mut planner, "Friday task", dt(2024, 11, 15, 9, 0));
        seed(&mut planner, "Saturday task", dt(2024, 11, 16, 9, 0));

        planner.select_date(day(2024, 11, 16)).unwrap();
        let titles: Vec<&str> = planner.filtered_tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Saturday task"]);

        planner.select_date(day(2024, 11, 15)).unwrap();
        let titles: Vec<&str> = planner.filtered_tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Friday task"]);
    }

    #[test]
    fn view_preserves_store_order() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        seed(&mut planner, "Evening", dt(2024, 11, 15, 21, 0));
        seed(&mut planner, "Morning", dt(2024, 11, 15, 8, 0));

        let titles: Vec<&str> = planner.filtered_tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Morning", "Evening"]);
    }

    #[test]
    fn mark_complete_round_trips_through_the_view() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        seed(&mut planner, "Workout", dt(2024, 11, 15, 7, 0));
        let task = planner.filtered_tasks()[0].clone();

        planner.mark_complete(&task).unwrap();
        assert!(planner.filtered_tasks()[0].is_completed);

        let task = planner.filtered_tasks()[0].clone();
        planner.mark_complete(&task).unwrap();
        assert!(!planner.filtered_tasks()[0].is_completed);
    }

    #[test]
    fn delete_removes_from_the_view() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        seed(&mut planner, "Old task", dt(2024, 11, 15, 9, 0));
        let task = planner.filtered_tasks()[0].clone();

        planner.delete_task(&task).unwrap();
        assert!(planner.filtered_tasks().is_empty());
    }

    #[test]
    fn failed_delete_leaves_the_view_untouched() {
        let mut planner = setup_planner(dt(2024, 11, 15, 10, 0));
        seed(&mut planner, "Keep", dt(2024, 11, 15, 9, 0));
        seed(&mut planner, "Remove", dt(2024, 11, 15, 12, 0));
        let stale = planner.filtered_tasks()[1].clone();

        planner.delete_task(&stale).unwrap();
        assert_eq!(planner.filtered_tasks().len(), 1);

        // Deleting from a stale snapshot surfaces NotFound and does not
        // corrupt the cache.
        let err = planner.delete_task(&stale).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(planner.filtered_tasks().len(), 1);
        assert_eq!(planner.filtered_tasks()[0].title, "Keep");
    }
}
