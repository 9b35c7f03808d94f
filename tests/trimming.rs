use eframe::egui::{Rect, pos2, vec2};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use trimmr::{
    Controller, DONE_MESSAGE, Effect, Event, ScrollDirection, Session, Settings, ViewEvent,
};

fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let pixels = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 3 % 256) as u8, ((x ^ y) % 256) as u8, 255])
    });
    // RGB so the same helper can write JPEG
    DynamicImage::ImageRgba8(pixels).to_rgb8().save(&path).unwrap();
    path
}

fn output_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

fn viewport() -> Rect {
    Rect::from_min_size(pos2(0.0, 0.0), vec2(1600.0, 1000.0))
}

fn saved_path(effects: &[Effect]) -> PathBuf {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Saved(path) => Some(path.clone()),
            _ => None,
        })
        .expect("no file saved")
}

#[test]
fn two_images_two_clicks_finishes_batch() {
    let sources = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let first = write_image(sources.path(), "first.png", 800, 900);
    let second = write_image(sources.path(), "second.jpg", 300, 400);

    let mut controller = Controller::new(Settings::default(), Session::default());
    controller.handle(Event::ViewportChanged(viewport()));
    controller.handle(Event::SelectImages(vec![first, second]));
    controller.handle(Event::SelectOutputFolder(Some(out.path().to_path_buf())));

    let effects = controller.handle(Event::StartTrimming);
    assert!(effects.contains(&Effect::ImageChanged));
    assert_eq!(controller.session().counter_label().as_deref(), Some("Image 1 of 2"));

    controller.handle(Event::View(ViewEvent::PointerMoved(pos2(800.0, 500.0))));
    let effects = controller.handle(Event::PrimaryClick);
    assert!(matches!(effects[0], Effect::Saved(_)));
    assert_eq!(controller.session().counter_label().as_deref(), Some("Image 2 of 2"));

    let effects = controller.handle(Event::PrimaryClick);
    assert!(effects.contains(&Effect::Done(DONE_MESSAGE.to_string())));

    let files = output_files(out.path());
    assert_eq!(files.len(), 2);
    for file in &files {
        let name = file.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("trimmed_") && name.ends_with(".png"), "{name}");
        let image = image::open(file).unwrap();
        assert_eq!((image.width(), image.height()), (512, 648));
    }
    assert!(files[0].to_str().unwrap().contains("trimmed_1_"));
    assert!(files[1].to_str().unwrap().contains("trimmed_2_"));

    assert!(controller.session().is_empty());
    assert_eq!(controller.session().current(), None);
    assert!(!controller.is_trimming());
}

#[test]
fn toggling_shape_changes_later_saves() {
    let sources = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let path = write_image(sources.path(), "a.png", 1000, 1000);

    let mut controller = Controller::new(
        Settings::default(),
        Session::new(vec![path], Some(out.path().to_path_buf())),
    );
    controller.handle(Event::ViewportChanged(viewport()));
    controller.handle(Event::StartTrimming);

    let portrait = saved_path(&controller.handle(Event::ModifiedClick));
    controller.handle(Event::View(ViewEvent::ToggleFrameShape));
    let square = saved_path(&controller.handle(Event::ModifiedClick));

    let portrait = image::open(portrait).unwrap();
    let square = image::open(square).unwrap();
    assert_eq!((portrait.width(), portrait.height()), (512, 648));
    assert_eq!((square.width(), square.height()), (512, 512));

    // Modified clicks never advance
    assert_eq!(controller.session().index(), 0);
    assert!(controller.is_trimming());
}

#[test]
fn output_size_ignores_zoom() {
    let sources = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let path = write_image(sources.path(), "a.png", 1200, 900);

    let mut controller = Controller::new(
        Settings::default(),
        Session::new(vec![path], Some(out.path().to_path_buf())),
    );
    controller.handle(Event::ViewportChanged(viewport()));
    controller.handle(Event::StartTrimming);

    for scroll in [
        ViewEvent::Scroll(ScrollDirection::In),
        ViewEvent::Scroll(ScrollDirection::In),
        ViewEvent::AcceleratedScroll(ScrollDirection::In),
        ViewEvent::Scroll(ScrollDirection::Out),
        ViewEvent::Scroll(ScrollDirection::Out),
        ViewEvent::Scroll(ScrollDirection::Out),
        ViewEvent::Scroll(ScrollDirection::Out),
    ] {
        controller.handle(Event::View(scroll));
        controller.handle(Event::View(ViewEvent::PointerMoved(pos2(10.0, 990.0))));
        let saved = saved_path(&controller.handle(Event::ModifiedClick));
        let image = image::open(saved).unwrap();
        assert_eq!((image.width(), image.height()), (512, 648));
    }
}

#[test]
fn unzoomed_crop_equals_resized_region() {
    let sources = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let path = write_image(sources.path(), "a.png", 800, 900);

    let mut controller = Controller::new(
        Settings::default(),
        Session::new(vec![path.clone()], Some(out.path().to_path_buf())),
    );
    controller.handle(Event::ViewportChanged(viewport()));
    controller.handle(Event::StartTrimming);

    // Image sits at (400, 50); put the frame's top-left at source (100, 40)
    let geometry = controller.geometry().unwrap();
    assert_eq!(geometry.image_rect.min, pos2(400.0, 50.0));
    controller.handle(Event::View(ViewEvent::PointerMoved(pos2(
        400.0 + 100.0 + 256.0,
        50.0 + 40.0 + 324.0,
    ))));
    assert_eq!(controller.geometry().unwrap().frame_rect.min, pos2(500.0, 90.0));

    let saved = saved_path(&controller.handle(Event::ModifiedClick));
    let output = image::open(saved).unwrap().to_rgba8();

    let source = image::open(path).unwrap().to_rgba8();
    let region = imageops::crop_imm(&source, 100, 40, 512, 648).to_image();
    let expected = imageops::resize(&region, 512, 648, FilterType::CatmullRom);
    assert_eq!(output, expected);
}

#[test]
fn save_without_writable_folder_does_not_advance() {
    let sources = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let a = write_image(sources.path(), "a.png", 700, 700);
    let b = write_image(sources.path(), "b.png", 700, 700);
    let missing = out.path().join("missing");

    let mut controller = Controller::new(Settings::default(), Session::new(vec![a, b], Some(missing)));
    controller.handle(Event::StartTrimming);

    let effects = controller.handle(Event::PrimaryClick);
    assert!(matches!(effects.as_slice(), [Effect::Error { .. }]));
    assert_eq!(controller.session().index(), 0);
    assert!(controller.is_trimming());
}

#[test]
fn frame_stays_inside_image_after_zoom_and_toggle() {
    let sources = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let path = write_image(sources.path(), "a.png", 1400, 1000);

    let mut controller = Controller::new(
        Settings::default(),
        Session::new(vec![path], Some(out.path().to_path_buf())),
    );
    controller.handle(Event::ViewportChanged(viewport()));
    controller.handle(Event::StartTrimming);
    controller.handle(Event::View(ViewEvent::PointerMoved(pos2(1590.0, 5.0))));

    let events = [
        ViewEvent::ToggleFrameShape,
        ViewEvent::Scroll(ScrollDirection::Out),
        ViewEvent::Scroll(ScrollDirection::Out),
        ViewEvent::Scroll(ScrollDirection::Out),
        ViewEvent::Scroll(ScrollDirection::Out),
        ViewEvent::Scroll(ScrollDirection::Out),
        ViewEvent::ToggleFrameShape,
        ViewEvent::Scroll(ScrollDirection::In),
    ];
    for event in events {
        controller.handle(Event::View(event));
        let geometry = controller.geometry().unwrap();
        let image = geometry.image_rect.expand(1e-3);
        assert!(image.contains_rect(geometry.frame_rect), "{geometry:?}");
    }
}
