use phys_viewer::scenes::load_builtin_frames;
use phys_viewer::{
    ButtonState, Camera, DemoWorld, InputEvent, Key, SceneConfig, SceneController, SceneRenderer,
};

struct NullRenderer;

impl SceneRenderer<DemoWorld> for NullRenderer {
    fn render(&mut self, _camera: &Camera, _world: &DemoWorld) {}
}

fn builtin_scene() -> SceneController<DemoWorld> {
    let mut scene =
        SceneController::new(DemoWorld::new(), Camera::default(), SceneConfig::default());
    for frame in load_builtin_frames().unwrap().into_handles() {
        scene.register_frame(frame);
    }
    scene
}

#[test]
fn test_builtin_set_plays_through_scene() {
    let mut scene = builtin_scene();
    assert!(scene.frames().len() >= 2);
    scene.init_frame().unwrap();
    assert!(scene.backend().is_ready());
    let first_bodies = scene.backend().bodies().len();
    assert!(first_bodies > 0);

    let report = scene
        .tick(
            [InputEvent::Key {
                key: Key::Right,
                state: ButtonState::Released,
            }],
            &mut NullRenderer,
        )
        .unwrap();
    assert_eq!(report.frame_changed, Some(1));

    let name = scene.frames().current().unwrap().name().to_string();
    let expected = load_builtin_frames().unwrap().frames[1].name.clone();
    assert_eq!(name, expected);
}

#[test]
fn test_restart_rebuilds_initial_state() {
    let mut scene = builtin_scene();
    scene.init_frame().unwrap();
    let initial: Vec<_> = scene
        .backend()
        .bodies()
        .iter()
        .map(|b| b.position)
        .collect();

    for _ in 0..30 {
        scene.tick(std::iter::empty(), &mut NullRenderer).unwrap();
    }
    assert_ne!(
        scene
            .backend()
            .bodies()
            .iter()
            .map(|b| b.position)
            .collect::<Vec<_>>(),
        initial
    );

    scene.change_frame(0).unwrap();
    let restarted: Vec<_> = scene
        .backend()
        .bodies()
        .iter()
        .map(|b| b.position)
        .collect();
    assert_eq!(restarted, initial);
}
