use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::WindowResolution,
};
use conway_age_bevy::{
    camera::CamPlugin, life::LifePlugin, prelude::WINDOW_SIZE_PX, state::GameState,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Aging Life".into(),
                        resizable: true,
                        focused: true,
                        present_mode: bevy::window::PresentMode::AutoNoVsync,
                        mode: bevy::window::WindowMode::Windowed,
                        resolution: WindowResolution::new(WINDOW_SIZE_PX.0, WINDOW_SIZE_PX.1),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins((FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin::default()))
        .init_state::<GameState>()
        .add_plugins((CamPlugin, LifePlugin))
        .run();
}
