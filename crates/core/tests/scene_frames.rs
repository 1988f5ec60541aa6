use motif_engine_core::{
    AppConfig, ControlEvent, DrawList, PixelPoint, SceneInstance, SceneKind,
};

const DELTA: f32 = 1.0 / 60.0;

fn run(scene: &mut SceneInstance, frames: usize) -> DrawList {
    let mut list = DrawList::new();
    for _ in 0..frames {
        list.clear();
        scene.frame(DELTA, &mut list);
    }
    list
}

#[test]
fn every_scene_draws_each_frame() {
    let config = AppConfig::default();
    for kind in SceneKind::ALL {
        let mut scene = SceneInstance::build(kind, &config).unwrap();
        let list = run(&mut scene, 90);
        assert!(!list.is_empty(), "{kind} drew nothing");
        assert_eq!(scene.clock().frame, 90);
        assert!((scene.clock().time_seconds - 1.5).abs() < 1e-3);
    }
}

#[test]
fn frames_are_deterministic() {
    let config = AppConfig::default();
    let mut a = SceneInstance::build(SceneKind::Colored, &config).unwrap();
    let mut b = SceneInstance::build(SceneKind::Colored, &config).unwrap();
    assert_eq!(run(&mut a, 45), run(&mut b, 45));
}

#[test]
fn outline_scene_only_rasterizes() {
    let config = AppConfig::default();
    let mut scene = SceneInstance::build(SceneKind::Outline, &config).unwrap();
    for _ in 0..10 {
        let stats = run(&mut scene, 30).stats();
        assert_eq!(stats.polygons, 0);
        assert_eq!(stats.arcs, 0);
        assert!(stats.pixels > 0);
    }
}

#[test]
fn auto_play_strikes_bars_through_the_scene() {
    let mut config = AppConfig::default();
    config.kolintang.interactive = false;
    let mut scene = SceneInstance::build(SceneKind::Kolintang, &config).unwrap();
    scene.handle_event(ControlEvent::ToggleAutoPlay);

    let idle = run(&mut scene, 1);
    let struck = run(&mut scene, 40);
    // One mallet in auto-play, so the primitive count settles.
    assert_eq!(idle.stats().polygons, struck.stats().polygons);
    assert!(!scene.handle_click(PixelPoint::new(988.0, 540.0)));
}

#[test]
fn config_json_reaches_the_scene() {
    let config = AppConfig::from_json_str(
        r#"{ "viewport": { "width": 800, "height": 600 }, "coords": { "show_axes": false } }"#,
    )
    .unwrap();
    let scene = SceneInstance::build(SceneKind::Outline, &config).unwrap();
    assert_eq!(scene.coords().center(), PixelPoint::new(400.0, 300.0));

    let mut with_scene = DrawList::new();
    scene.draw(&mut with_scene);
    let mut motifs_only = DrawList::new();
    scene.graph().draw(&mut motifs_only);
    assert_eq!(with_scene, motifs_only);
}

#[test]
fn static_scene_is_frame_independent() {
    let config = AppConfig::default();
    let mut scene = SceneInstance::build(SceneKind::Static, &config).unwrap();
    let first = run(&mut scene, 1);
    let later = run(&mut scene, 120);
    assert_eq!(first, later);
    assert_eq!(first.stats().arcs, 0);
}
