use weld::config::Config;

#[test]
fn defaults_match_the_demo() {
    let config = Config::default();
    assert_eq!(config.asset, "cube.obj");
    assert_eq!(config.fov_y_degrees, 65.0);
    assert_eq!(config.near_z, 0.1);
    assert_eq!(config.far_z, 100.0);
    assert_eq!(config.max_frames_in_flight, 3);
    assert!(config.gamepads);
}

#[test]
fn setters_replace_single_fields() {
    let config = Config::default()
        .with_asset("teapot.obj")
        .with_window_title("Teapot")
        .with_clear_colour(wgpu::Color::WHITE)
        .with_gamepads(false);

    assert_eq!(config.asset, "teapot.obj");
    assert_eq!(config.window_title, "Teapot");
    assert_eq!(config.clear_colour, wgpu::Color::WHITE);
    assert!(!config.gamepads);
    assert_eq!(config.max_frames_in_flight, Config::DEFAULT_MAX_FRAMES_IN_FLIGHT);
}

#[test]
fn frames_in_flight_is_at_least_one() {
    assert_eq!(Config::default().with_max_frames_in_flight(0).max_frames_in_flight, 1);
    assert_eq!(Config::default().with_max_frames_in_flight(2).max_frames_in_flight, 2);
}
