use super::*;
use crate::foundation::core::Rgba8;
use crate::grading::catalog::FilterPreset;

struct FakeCamera {
    ready: bool,
    frame: Option<Bitmap>,
    pulls: usize,
}

impl FrameSource for FakeCamera {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn latest_frame(&mut self) -> Option<Bitmap> {
        self.pulls += 1;
        self.frame.clone()
    }
}

fn camera(ready: bool) -> FakeCamera {
    FakeCamera {
        ready,
        frame: Some(Bitmap::filled(64, 48, Rgba8::rgb(120, 90, 60)).unwrap()),
        pulls: 0,
    }
}

#[test]
fn unready_source_is_skipped_without_pulling_frames() {
    let mut lp = PreviewLoop::new(GradingConfig::default(), 16).unwrap();
    let mut cam = camera(false);
    let mut surface = InMemorySurface::new();

    assert_eq!(
        lp.tick(&mut cam, &mut surface),
        PreviewTick::Skipped(SkipReason::SourceNotReady)
    );
    assert_eq!(cam.pulls, 0);
    assert!(surface.frames().is_empty());
    assert_eq!(lp.stats().skipped, 1);
}

#[test]
fn missing_frame_is_skipped() {
    let mut lp = PreviewLoop::new(GradingConfig::default(), 16).unwrap();
    let mut cam = camera(true);
    cam.frame = None;
    let mut surface = InMemorySurface::new();
    assert_eq!(
        lp.tick(&mut cam, &mut surface),
        PreviewTick::Skipped(SkipReason::NoFrame)
    );
}

#[test]
fn ready_source_presents_square_preview() {
    let mut lp = PreviewLoop::new(GradingConfig::default(), 16)
        .unwrap()
        .with_seed(1);
    let mut cam = camera(true);
    let mut surface = InMemorySurface::new();

    for _ in 0..3 {
        assert_eq!(lp.tick(&mut cam, &mut surface), PreviewTick::Presented);
    }
    assert_eq!(surface.frames().len(), 3);
    let last = surface.last().unwrap();
    assert_eq!((last.width(), last.height()), (16, 16));
    // Original without beauty: color is untouched.
    assert_eq!(last.pixel(8, 8), Some([120, 90, 60, 255]));
    assert_eq!(
        lp.stats(),
        PreviewStats {
            presented: 3,
            skipped: 0
        }
    );
}

#[test]
fn config_change_applies_to_next_tick() {
    let mut lp = PreviewLoop::new(GradingConfig::default(), 8)
        .unwrap()
        .with_seed(2);
    let mut cam = camera(true);
    let mut surface = InMemorySurface::new();

    lp.tick(&mut cam, &mut surface);
    lp.set_config(GradingConfig::new(FilterPreset::RetroNoir, 0));
    lp.tick(&mut cam, &mut surface);

    let first = &surface.frames()[0];
    let second = &surface.frames()[1];
    assert_eq!(first.pixel(0, 0), Some([120, 90, 60, 255]));
    let px = second.pixel(0, 0).unwrap();
    assert_eq!(px[0], px[1]);
    assert_eq!(px[1], px[2]);
}

#[test]
fn zero_preview_size_is_rejected() {
    assert!(PreviewLoop::new(GradingConfig::default(), 0).is_err());
}
