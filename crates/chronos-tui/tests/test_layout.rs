mod common;

use chrono::{TimeZone, Utc};
use ratatui::layout::Rect;

use chronos_core::models::ActivityItem;
use chronos_tui::app::Cursor;
use chronos_tui::ui::layout::{centered_fixed, compute_panels};

use common::{render_to_string, sample_app};

#[test]
fn tall_terminal_gets_full_layout() {
    let panels = compute_panels(Rect::new(0, 0, 120, 60));
    let linear = panels.linear.unwrap();
    let git = panels.git.unwrap();
    let help = panels.help.unwrap();

    assert_eq!(linear.height, 20);
    assert_eq!(linear.width + git.width, 120);
    assert_eq!(git.x, linear.width);
    assert_eq!(panels.log.height, 6);
    assert_eq!(help.height, 2);
    assert_eq!(panels.grid.height, 32);
    assert_eq!(panels.grid.y, 20);
    assert_eq!(help.y + help.height, 60);
}

#[test]
fn short_terminal_gets_grid_and_log_only() {
    let panels = compute_panels(Rect::new(0, 0, 120, 40));
    assert!(panels.linear.is_none());
    assert!(panels.git.is_none());
    assert!(panels.help.is_none());
    assert_eq!(panels.log.height, 5);
    assert_eq!(panels.grid.height, 35);
}

#[test]
fn popup_is_centered_and_clamped() {
    let popup = centered_fixed(50, 5, Rect::new(0, 0, 120, 40));
    assert_eq!(popup, Rect::new(35, 17, 50, 5));

    let tiny = centered_fixed(50, 5, Rect::new(0, 0, 30, 4));
    assert_eq!(tiny, Rect::new(0, 0, 30, 4));
}

#[test]
fn full_frame_shows_every_panel() {
    let mut app = sample_app();
    app.linear_activity.items = vec![ActivityItem {
        timestamp: Some(Utc.with_ymd_and_hms(2026, 2, 3, 14, 5, 0).unwrap()),
        label: "ENG-42".into(),
        title: "Fix login redirect".into(),
    }];
    let output = render_to_string(&app, 140, 60);

    assert!(output.contains(" Recent Linear Activity "));
    assert!(output.contains("Feb 3 14:05 | ENG-42       | Fix login redirect"));
    assert!(output.contains(" Recent Git Activity "));
    assert!(output.contains("No recent Git activity found"));
    assert!(output.contains(" Time Report - February 2026 "));
    assert!(output.contains(" Log "));
    assert!(output.contains("[Ctrl+N]new task"));
}

#[test]
fn compact_frame_hides_activity_and_help() {
    let app = sample_app();
    let output = render_to_string(&app, 120, 30);
    assert!(!output.contains("Recent Linear Activity"));
    assert!(!output.contains("[Ctrl+N]"));
    assert!(output.contains(" Time Report - February 2026 "));
}

#[test]
fn add_task_popup_overlays_grid() {
    let mut app = sample_app();
    app.begin_add_task();
    for c in "Dep".chars() {
        app.task_push(c);
    }
    let output = render_to_string(&app, 120, 30);
    assert!(output.contains(" Add New Task "));
    assert!(output.contains("Task name: Dep_"));
    assert!(output.contains("Press Enter to confirm, Esc to cancel"));
}

#[test]
fn grid_scrolls_to_keep_selected_day_visible() {
    let mut app = sample_app();
    // Feb 28 2026 is a Saturday
    app.cursor = Cursor { task: 0, day: 27 };
    let output = render_to_string(&app, 100, 20);
    assert!(output.contains(">x<"));
    assert!(output.contains("Build"));
    assert!(output.contains("      28"));
}

#[test]
fn log_panel_shows_latest_lines() {
    let mut app = sample_app();
    for i in 0..10 {
        app.log.info(format!("message {i}"));
    }
    let output = render_to_string(&app, 100, 14);
    assert!(output.contains("INFO: message 9"));
    assert!(output.contains("INFO: message 7"));
    assert!(!output.contains("INFO: message 6"));
}
