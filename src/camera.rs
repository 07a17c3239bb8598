use bevy::{
    input::mouse::MouseWheel,
    math::vec2,
    prelude::*,
    render::camera::ScalingMode,
    window::PrimaryWindow,
};

use crate::{
    prelude::BG_COLOR,
    state::GameState,
    view::{cursor_to_pointer, View, ZoomDirection},
};

pub struct CamPlugin;

impl Plugin for CamPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BG_COLOR))
            .init_resource::<View>()
            .add_systems(OnEnter(GameState::Load), spawn_cam)
            .add_systems(
                Update,
                ((zoom_on_scroll, pan_on_drag), sync_cam_to_view)
                    .chain()
                    .run_if(in_state(GameState::Running).or(in_state(GameState::Paused))),
            );
    }
}

// Init
fn spawn_cam(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::WindowSize,
            scale: 1.0,
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
        Msaa::Off,
    ));
}

/// one zoom step per wheel event, about the cursor
fn zoom_on_scroll(
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut view: ResMut<View>,
) {
    let Ok(window) = windows.get_single() else {
        wheel.clear();
        return;
    };
    let pointer = window
        .cursor_position()
        .map(|cursor| cursor_to_pointer(cursor, window.size()))
        .unwrap_or(Vec2::splat(0.5));

    for event in wheel.read() {
        if let Some(direction) = ZoomDirection::from_scroll(event.y) {
            view.zoom_at(pointer, direction);
            debug!("zoom {:.2} center {:?}", view.zoom, view.center);
        }
    }
}

/// drag with the middle button to pan
fn pan_on_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    mut moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut view: ResMut<View>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    let Ok(window) = windows.get_single() else {
        moved.clear();
        return;
    };
    let size = window.size();
    for event in moved.read() {
        if let (true, Some(prev)) = (buttons.pressed(MouseButton::Middle), *last_cursor) {
            let delta = event.position - prev;
            view.pan_by(vec2(delta.x / size.x, -delta.y / size.y));
        }
        *last_cursor = Some(event.position);
    }
}

/// The board sprite spans the window at scale 1, so the camera shows exactly the window
/// `View` describes.
fn sync_cam_to_view(
    view: Res<View>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cam_query: Query<(&mut Transform, &mut OrthographicProjection), With<Camera2d>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((mut transform, mut projection)) = cam_query.get_single_mut() else {
        return;
    };
    let offset = (view.center - 0.5) * window.size();
    transform.translation = offset.extend(transform.translation.z);
    projection.scale = view.zoom.recip();
}
