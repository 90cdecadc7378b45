//! Grid view integration tests
//!
//! End-to-end checks through `GridView`: scrolling, resizing, reconfiguring
//! the row source, and the frames handed to the render backends.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use stickygrid::{
    generate_rows, GridConfig, GridError, GridView, ListenerRegistry, RenderBackend, RowRecord,
    TextRenderer,
};

fn build(config: &GridConfig) -> (GridView<Vec<RowRecord>, ListenerRegistry>, ListenerRegistry) {
    let total = usize::try_from(config.total_count).unwrap();
    let columns = usize::try_from(config.columns_per_row).unwrap();
    let registry = ListenerRegistry::new();
    let view = GridView::new(config, generate_rows(total, columns), registry.clone()).unwrap();
    (view, registry)
}

fn default_view() -> GridView<Vec<RowRecord>, ListenerRegistry> {
    build(&GridConfig::default()).0
}

#[test]
fn test_default_demo_grid() {
    let view = default_view();
    let frame = view.frame();
    assert_eq!(frame.range(), Some((0, 19)));
    assert_eq!(frame.rows.len(), 20);
    assert_eq!(frame.total_extent, 350_000.0);
    assert_eq!(frame.column_width, 150);
    assert_eq!(frame.rows[0].id, 0);
    assert_eq!(frame.rows[19].layout.scrollable[9].text, "R20C14");
}

#[test]
fn test_scroll_to_bottom() {
    let mut view = default_view();
    view.set_scroll(0.0, view.total_extent());
    let frame = view.frame();
    let (_, last) = frame.range().unwrap();
    assert_eq!(last, 9999);
    assert!(frame.rows.iter().all(|row| row.item.index < 10_000));
}

#[test]
fn test_rows_positioned_from_item_start() {
    let mut view = default_view();
    view.set_scroll(0.0, 3500.0);
    let frame = view.frame();
    for row in &frame.rows {
        assert_eq!(row.item.start, row.item.index as f64 * 35.0);
        assert_eq!(frame.viewport.to_screen_y(&row.item), row.item.start - 3500.0);
    }
}

#[test]
fn test_row_gap_spaces_rows() {
    let config = GridConfig {
        total_count: 100,
        row_gap: 5.0,
        ..GridConfig::default()
    };
    let (view, _) = build(&config);
    let frame = view.frame();
    assert_eq!(frame.total_extent, 4000.0);
    assert_eq!(frame.row_height, 35.0);
    assert_eq!(frame.rows[2].item.start, 80.0);
}

#[test]
fn test_resize_only_changes_horizontal_layout() {
    let mut view = default_view();
    view.set_scroll(0.0, 7000.0);
    let before: Vec<_> = view.frame().rows.iter().map(|r| r.item).collect();

    assert!(view.pointer_down(600.0));
    view.pointer_move(700.0);
    let frame = view.frame();
    let after: Vec<_> = frame.rows.iter().map(|r| r.item).collect();

    assert_eq!(before, after);
    assert_eq!(frame.column_width, 250);
    assert_eq!(frame.pinned_width, 1000.0);
    assert_eq!(frame.content_width, 1000.0 + 5.0 + 1500.0);
    assert!(frame.rows.iter().all(|r| r.layout.pinned_width == 1000.0));
}

#[test]
fn test_resize_clamps_through_view() {
    let (mut view, registry) = build(&GridConfig::default());
    view.pointer_down(600.0);
    assert_eq!(view.pointer_move(1100.0), Some(400));
    assert_eq!(view.pointer_move(100.0), Some(60));
    assert_eq!(registry.live(), 1);
    view.capture_lost();
    assert_eq!(registry.live(), 0);
    assert_eq!(view.column_width(), 60);
}

#[test]
fn test_dropping_view_mid_drag_releases_observers() {
    let (mut view, registry) = build(&GridConfig::default());
    view.pointer_down(600.0);
    drop(view);
    assert_eq!(registry.live(), 0);
}

#[test]
fn test_custom_width_bounds() {
    let config = GridConfig {
        total_count: 10,
        default_column_width: 120,
        min_column_width: 100,
        max_column_width: 140,
        ..GridConfig::default()
    };
    let (mut view, _) = build(&config);
    view.pointer_down(0.0);
    assert_eq!(view.pointer_move(500.0), Some(140));
}

#[test]
fn test_invalid_configurations_are_rejected() {
    let cases = [
        GridConfig {
            row_height: 0.0,
            ..GridConfig::default()
        },
        GridConfig {
            total_count: -1,
            ..GridConfig::default()
        },
        GridConfig {
            sticky_columns: -1,
            ..GridConfig::default()
        },
        GridConfig {
            sticky_columns: 20,
            ..GridConfig::default()
        },
    ];
    for config in cases {
        let result = GridView::new(&config, Vec::<RowRecord>::new(), ListenerRegistry::new());
        assert!(
            matches!(result, Err(GridError::InvalidConfiguration(_))),
            "accepted {config:?}"
        );
    }
}

#[test]
fn test_empty_grid() {
    let config = GridConfig {
        total_count: 0,
        ..GridConfig::default()
    };
    let (view, _) = build(&config);
    let frame = view.frame();
    assert!(frame.rows.is_empty());
    assert_eq!(frame.range(), None);
    assert_eq!(frame.total_extent, 0.0);
}

#[test]
fn test_reconfigure_rows_changes_count() {
    let mut view = default_view();
    view.set_scroll(0.0, 100_000.0);
    view.reconfigure_rows(generate_rows(40, 14)).unwrap();
    assert_eq!(view.config().total_count, 40);
    assert_eq!(view.frame().range(), Some((34, 39)));
}

#[test]
fn test_frame_json_shape() {
    let view = default_view();
    let json = serde_json::to_value(view.frame()).unwrap();
    assert_eq!(json["totalExtent"], 350_000.0);
    assert_eq!(json["columnWidth"], 150);
    assert_eq!(json["handleActive"], false);
    let row = &json["rows"][0];
    assert_eq!(row["item"]["index"], 0);
    assert_eq!(row["layout"]["pinned"][0]["text"], "R1C1");
    assert_eq!(row["layout"]["handle"]["x"], 600.0);
    assert_eq!(row["layout"]["scrollable"][0]["key"], 4);
}

#[test]
fn test_config_from_json_round_trip_through_view() {
    let config = GridConfig::from_json(
        r#"{"totalCount": 30, "stickyColumns": 2, "columnsPerRow": 5, "overscan": 0}"#,
    )
    .unwrap();
    let (view, _) = build(&config);
    let frame = view.frame();
    assert_eq!(frame.range(), Some((0, 14)));
    assert_eq!(frame.rows[0].layout.pinned.len(), 2);
    assert_eq!(frame.rows[0].layout.scrollable.len(), 3);
}

#[test]
fn test_text_dump() {
    let mut view = default_view();
    view.set_viewport_size(1000.0, 70.0);
    view.set_scroll(300.0, 35.0);
    let mut text = TextRenderer::new();
    text.resize(1000, 70, 1.0);
    view.render(&mut text).unwrap();

    let out = text.output();
    let mut lines = out.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("rows 0..=8"), "{header}");
    assert!(header.contains("scroll (300, 35)"));

    let row_one = out.lines().find(|l| l.contains("R2C1")).unwrap();
    assert!(row_one.contains("R2C1 R2C2 R2C3 R2C4 ‖"));
    // 300px of horizontal scroll hides R2C5 and R2C6 under the pinned block.
    assert!(!row_one.contains("R2C5"));
    assert!(!row_one.contains("R2C6"));
    assert!(row_one.contains("R2C7"));
}

fn sized(total: i64, sticky: i64) -> GridConfig {
    GridConfig {
        total_count: total,
        sticky_columns: sticky,
        ..GridConfig::default()
    }
}

#[test]
fn test_rows_wider_than_columns_per_row_are_rejected() {
    let result = GridView::new(&sized(10, 4), generate_rows(10, 20), ListenerRegistry::new());
    assert!(matches!(result, Err(GridError::InvalidConfiguration(_))));

    let mut view = default_view();
    let result = view.reconfigure_rows(generate_rows(10, 20));
    assert!(matches!(result, Err(GridError::InvalidConfiguration(_))));
    assert_eq!(view.config().total_count, 10_000);
}

#[test]
fn test_rows_shorter_than_pinned_block_are_rejected() {
    let result = GridView::new(&sized(10, 4), generate_rows(10, 2), ListenerRegistry::new());
    assert!(matches!(result, Err(GridError::InvalidConfiguration(_))));

    let mut view = default_view();
    let result = view.reconfigure_rows(generate_rows(10, 2));
    assert!(matches!(result, Err(GridError::InvalidConfiguration(_))));
}

#[test]
fn test_one_mismatched_row_rejects_the_source() {
    let mut rows = generate_rows(10, 14);
    rows[7] = RowRecord::new(7, vec!["short".into()]);
    let result = GridView::new(&sized(10, 4), rows, ListenerRegistry::new());
    assert!(matches!(result, Err(GridError::InvalidConfiguration(_))));
}

#[test]
fn test_content_width_matches_composed_rows() {
    let (mut view, _) = build(&sized(50, 4));
    let check = |view: &GridView<Vec<RowRecord>, ListenerRegistry>| {
        let frame = view.frame();
        for row in &frame.rows {
            assert_eq!(row.layout.content_width, frame.content_width);
            let last = row.layout.scrollable.last().unwrap();
            assert_eq!(last.right(), frame.content_width);
        }
    };
    check(&view);

    view.pointer_down(600.0);
    view.pointer_move(680.0);
    view.pointer_up();
    check(&view);
}
