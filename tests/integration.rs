// SPDX-License-Identifier: MPL-2.0
use std::fs;
use std::path::{Path, PathBuf};

use image_rs::{Rgba, RgbaImage};
use sticker_sheet::application::grid::{EditOutcome, GridSettings};
use sticker_sheet::application::port::{CropWidget, ImageSource};
use sticker_sheet::application::snapshot::{ProjectSnapshot, RestoreError};
use sticker_sheet::application::stamps::Placement;
use sticker_sheet::application::StickerSheet;
use sticker_sheet::config;
use sticker_sheet::domain::geometry::Point;
use sticker_sheet::domain::grid::{
    CellIndex, CropTransform, GroupIndex, LayoutMode, PaperSize, PortableImage,
};
use sticker_sheet::domain::stamp::StampContent;
use sticker_sheet::infrastructure::{DecodedImageSource, HeadlessCropFactory};
use tempfile::tempdir;

type Sheet = StickerSheet<DecodedImageSource, HeadlessCropFactory>;

fn new_sheet() -> Sheet {
    StickerSheet::new(
        DecodedImageSource::new(),
        HeadlessCropFactory::default(),
        GridSettings::default(),
    )
}

fn write_pngs(dir: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("photo-{i}.png"));
            #[allow(clippy::cast_possible_truncation)]
            let shade = (i * 15) as u8;
            RgbaImage::from_pixel(40, 30, Rgba([shade, 120, 200, 255]))
                .save(&path)
                .expect("failed to write png");
            path
        })
        .collect()
}

fn paths(files: &[PathBuf]) -> Vec<PortableImage> {
    files.iter().cloned().map(PortableImage::Path).collect()
}

fn cell(index: usize) -> CellIndex {
    CellIndex::new(index).expect("cell on grid")
}

/// Simulates the user panning and zooming the widget of `index`.
fn user_edit(sheet: &mut Sheet, index: usize, transform: CropTransform) -> EditOutcome {
    let grid = sheet.grid_mut();
    let widget = grid.cell_widget_mut(cell(index)).expect("cell is bound");
    widget.set_transform(transform).expect("finite transform");
    let reported = widget.transform();
    grid.on_crop_edited(cell(index), reported)
}

#[test]
fn import_picks_mode_from_count_and_fills_every_cell() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 4);
    let mut sheet = new_sheet();

    let mode = sheet.grid_mut().import_images(paths(&files));
    assert_eq!(mode, Some(LayoutMode::Quad));
    // Nothing is assigned until the new layout has settled.
    assert_eq!(sheet.grid().store().occupied(), 0);
    assert!(sheet.grid().has_pending_import());

    let mut report = None;
    for _ in 0..GridSettings::default().settle_frames.value() {
        report = report.or(sheet.grid_mut().on_frame());
    }
    let report = report.expect("import ran after settling");
    assert_eq!(report.assigned.len(), 4);
    assert!(report.failed.is_empty());

    for resolved in sheet.grid().resolved_cells() {
        assert!(resolved.image.is_some(), "{} is empty", resolved.cell);
        assert!(sheet.grid().is_bound(resolved.cell));
    }
    assert_eq!(sheet.grid().source().live_count(), 4);
}

#[test]
fn crop_edit_reaches_group_siblings_on_next_frame() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 4);
    let mut sheet = new_sheet();
    sheet.grid_mut().import_images(paths(&files));
    sheet.grid_mut().settle();

    let zoomed = CropTransform::new(0.0, 0.0, 2.0);
    assert_eq!(user_edit(&mut sheet, 0, zoomed), EditOutcome::Queued);
    assert!(sheet.grid().cell_transform(cell(1)).is_some_and(|t| t.is_fit()));

    sheet.grid_mut().on_frame();

    // Quad group 0 is the top-left 2x2 block.
    for index in [0, 1, 4, 5] {
        assert_eq!(sheet.grid().cell_transform(cell(index)), Some(zoomed));
    }
    for index in [2, 8, 15] {
        assert!(sheet.grid().cell_transform(cell(index)).is_some_and(|t| t.is_fit()));
    }
    assert_eq!(
        sheet.grid().group_image(GroupIndex::new(0)).and_then(|g| g.transform),
        Some(zoomed)
    );
}

#[test]
fn sibling_echo_does_not_requeue() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 1);
    let mut sheet = new_sheet();
    sheet.grid_mut().import_images(paths(&files));
    sheet.grid_mut().settle();
    assert_eq!(sheet.grid().mode(), LayoutMode::Single);

    let zoomed = CropTransform::new(0.0, 0.0, 1.5);
    user_edit(&mut sheet, 3, zoomed);
    sheet.grid_mut().on_frame();
    assert!(!sheet.grid().has_pending_work());

    // A sibling widget reporting the value it was just given is an echo.
    let outcome = sheet.grid_mut().on_crop_edited(cell(9), zoomed);
    assert_eq!(outcome, EditOutcome::Echo);
    assert!(!sheet.grid().has_pending_work());
}

#[test]
fn late_sibling_echoes_after_pointer_up_keep_the_settled_crop() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 4);
    let mut sheet = new_sheet();
    sheet.grid_mut().import_images(paths(&files));
    sheet.grid_mut().settle();

    let dragging = CropTransform::new(0.0, 0.0, 1.5);
    let settled = CropTransform::new(0.0, 0.0, 2.0);
    user_edit(&mut sheet, 0, dragging);
    sheet.grid_mut().on_frame();
    sheet
        .grid_mut()
        .cell_widget_mut(cell(0))
        .expect("cell is bound")
        .set_transform(settled)
        .expect("finite transform");
    sheet.grid_mut().end_interaction(cell(0));

    // Cell 1 only now reports both writes it received.
    for reported in [dragging, settled] {
        assert_eq!(sheet.grid_mut().on_crop_edited(cell(1), reported), EditOutcome::Echo);
        sheet.grid_mut().on_frame();
    }
    assert_eq!(
        sheet.grid().group_image(GroupIndex::new(0)).and_then(|g| g.transform),
        Some(settled)
    );
    for index in [0, 1, 4, 5] {
        assert_eq!(sheet.grid().cell_transform(cell(index)), Some(settled));
    }
    assert!(!sheet.grid().has_pending_work());
}

#[test]
fn invalid_stored_crop_restores_the_image_at_fit() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 1);
    let json = serde_json::json!({
        "version": 1,
        "mode": "single",
        "images": [{
            "source": { "kind": "path", "value": files[0] },
            "transform": { "offset_x": 0.0, "offset_y": 0.0, "scale_x": 0.0, "scale_y": 0.0 }
        }]
    })
    .to_string();

    let mut sheet = new_sheet();
    sheet.restore_json(&json).expect("restore should succeed");

    let grid = sheet.grid();
    assert_eq!(grid.mode(), LayoutMode::Single);
    assert_eq!(grid.store().occupied(), 1);
    assert_eq!(grid.group_image(GroupIndex::new(0)).and_then(|g| g.transform), None);
    for resolved in grid.resolved_cells() {
        assert!(grid.cell_transform(resolved.cell).is_some_and(|t| t.is_fit()));
    }
}

#[test]
fn save_and_restore_round_trip() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 4);
    let project = dir.path().join("project.json");

    let zoomed = CropTransform::new(0.0, 0.0, 2.0);
    {
        let mut sheet = new_sheet();
        sheet.set_paper_size(PaperSize::Hagaki);
        sheet.grid_mut().import_images(paths(&files));
        sheet.grid_mut().settle();
        user_edit(&mut sheet, 10, zoomed);
        sheet.create_stamp(
            StampContent::Emoji {
                glyph: "⭐".into(),
            },
            Placement {
                position: Some(Point::new(120.0, 80.0)),
                ..Placement::default()
            },
        );
        // The pending edit is saved even though no frame ran.
        sheet.save_to_file(&project).expect("save should succeed");
    }

    let mut restored = new_sheet();
    restored.load_from_file(&project).expect("load should succeed");

    let grid = restored.grid();
    assert_eq!(grid.mode(), LayoutMode::Quad);
    assert_eq!(grid.paper_size(), PaperSize::Hagaki);
    assert_eq!(grid.store().occupied(), 4);
    for (group, file) in files.iter().enumerate() {
        let image = grid.group_image(GroupIndex::new(group)).expect("slot restored");
        assert_eq!(
            grid.source().export(image.source),
            Some(PortableImage::Path(file.clone()))
        );
    }
    // Cell 10 belongs to quad group 3.
    assert_eq!(grid.cell_transform(cell(15)), Some(zoomed));
    assert!(grid.cell_transform(cell(0)).is_some_and(|t| t.is_fit()));

    assert_eq!(restored.stamps().len(), 1);
    let stamp = restored.stamps().iter().next().expect("one stamp");
    assert_eq!(stamp.content.as_str(), "⭐");
    assert_eq!(stamp.position, Point::new(120.0, 80.0));
}

#[test]
fn inline_images_survive_deleting_the_originals() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 2);
    let inline: Vec<PortableImage> = files
        .iter()
        .map(|f| DecodedImageSource::inline(f).expect("inline png"))
        .collect();
    let project = dir.path().join("project.json");

    {
        let mut sheet = new_sheet();
        sheet.grid_mut().set_mode(LayoutMode::Unique);
        let report = sheet.grid_mut().assign_images(&inline, GroupIndex::new(0));
        assert_eq!(report.assigned.len(), 2);
        sheet.save_to_file(&project).expect("save should succeed");
    }
    for file in &files {
        fs::remove_file(file).expect("remove original");
    }

    let mut restored = new_sheet();
    restored.load_from_file(&project).expect("load should succeed");
    assert_eq!(restored.grid().store().occupied(), 2);
}

#[test]
fn missing_image_leaves_slot_empty_on_restore() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 4);
    let project = dir.path().join("project.json");
    {
        let mut sheet = new_sheet();
        sheet.grid_mut().import_images(paths(&files));
        sheet.grid_mut().settle();
        sheet.save_to_file(&project).expect("save should succeed");
    }
    fs::remove_file(&files[2]).expect("remove one image");

    let mut restored = new_sheet();
    restored.load_from_file(&project).expect("load should succeed");
    let grid = restored.grid();
    assert_eq!(grid.store().occupied(), 3);
    assert!(grid.group_image(GroupIndex::new(2)).is_none());
    assert!(!grid.is_bound(cell(10)));
}

#[test]
fn malformed_project_is_rejected_without_changes() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 1);
    let mut sheet = new_sheet();
    sheet.grid_mut().import_images(paths(&files));
    sheet.grid_mut().settle();

    let err = sheet
        .restore_json(r#"{"version":1,"mode":"quad","images":"not-an-array"}"#)
        .unwrap_err();
    assert!(matches!(err, RestoreError::Malformed(_)));

    let err = sheet
        .restore_json(r#"{"version":9,"mode":"quad","images":[]}"#)
        .unwrap_err();
    assert!(matches!(err, RestoreError::UnsupportedVersion { .. }));

    assert_eq!(sheet.grid().mode(), LayoutMode::Single);
    assert_eq!(sheet.grid().store().occupied(), 1);
}

#[test]
fn shrinking_mode_releases_dropped_images() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 16);
    let mut sheet = new_sheet();
    sheet.grid_mut().import_images(paths(&files));
    sheet.grid_mut().settle();
    assert_eq!(sheet.grid().mode(), LayoutMode::Unique);
    assert_eq!(sheet.grid().source().live_count(), 16);

    sheet.grid_mut().set_mode(LayoutMode::Single);
    assert_eq!(sheet.grid().source().live_count(), 1);
    for resolved in sheet.grid().resolved_cells() {
        assert_eq!(resolved.group, GroupIndex::new(0));
    }

    sheet.grid_mut().set_mode(LayoutMode::Unique);
    assert_eq!(sheet.grid().store().occupied(), 1);
    assert!(sheet.grid().is_bound(cell(0)));
    assert!(!sheet.grid().is_bound(cell(1)));
}

#[test]
fn snapshot_json_is_stable() {
    let dir = tempdir().expect("failed to create temp dir");
    let files = write_pngs(dir.path(), 1);
    let mut sheet = new_sheet();
    sheet.grid_mut().import_images(paths(&files));
    sheet.grid_mut().settle();

    let json = sheet.serialize_state().to_json().expect("encode");
    let parsed = ProjectSnapshot::from_json(&json).expect("decode");
    assert_eq!(parsed, sheet.serialize_state());
}

#[test]
fn config_drives_grid_settings() {
    let dir = tempdir().expect("failed to create temp dir");
    fs::write(
        dir.path().join("settings.toml"),
        "[grid]\nmode = \"unique\"\npaper = \"letter\"\nsettle_frames = 2\n",
    )
    .expect("write config");

    let loaded = config::load(Some(dir.path())).expect("load config");
    let settings = loaded.grid_settings();
    assert_eq!(settings.initial_mode, LayoutMode::Unique);
    assert_eq!(settings.paper, PaperSize::Letter);
    assert_eq!(settings.settle_frames.value(), 2);

    let sheet = StickerSheet::new(
        DecodedImageSource::new(),
        HeadlessCropFactory::new(settings.max_crop_scale),
        settings,
    );
    assert_eq!(sheet.grid().mode(), LayoutMode::Unique);
    assert_eq!(sheet.grid().store().len(), 16);
}
