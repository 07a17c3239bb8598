#![allow(clippy::type_complexity, clippy::too_many_arguments)]

use std::time::Duration;

use bevy::{
    color::Srgba,
    math::vec2,
    prelude::*,
    render::{
        render_asset::RenderAssetUsages,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
    tasks::ComputeTaskPool,
    window::{CursorLeft, PrimaryWindow, WindowResized},
};

use crate::{
    board::{Grid, LifeBoard, StampTarget},
    patterns::{Pattern, Rotation, SHAPES},
    prelude::*,
    state::{is_running, simulation_running, GameState},
    view::{cursor_to_pointer, View},
};

pub struct LifePlugin;

impl Plugin for LifePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LifeBoard::default())
            .insert_resource(GenerationClock::from_rate(TARGET_GENERATIONS_PER_SEC))
            .init_resource::<AgePalette>()
            .init_resource::<Placement>()
            .add_systems(OnEnter(GameState::Load), load_board)
            .add_systems(
                Update,
                (
                    handle_kbd,
                    resize_board,
                    paint_with_pointer,
                    advance_generation.run_if(simulation_running),
                    render_board,
                    update_hud,
                )
                    .chain()
                    .run_if(in_state(GameState::Running).or(in_state(GameState::Paused))),
            );
    }
}

// ——> SYSTEMS

/// allocate the board for the window, spawn its sprite and the HUD
fn load_board(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut board: ResMut<LifeBoard>,
    mut images: ResMut<Assets<Image>>,
    palette: Res<AgePalette>,
    time: Res<Time<Real>>,
    mut clock: ResMut<GenerationClock>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let window_size = windows
        .get_single()
        .map(Window::size)
        .unwrap_or(vec2(WINDOW_SIZE_PX.0, WINDOW_SIZE_PX.1));
    let (width, height) = grid_size_for(window_size);
    board.initialize(width, height);

    let image = images.add(Image::new_fill(
        board_extent(width, height),
        TextureDimension::D2,
        &palette.rgba(0),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    ));
    commands.insert_resource(BoardImage(image.clone()));
    commands.spawn((
        BoardSprite,
        Sprite {
            image,
            custom_size: Some(window_size),
            ..default()
        },
        Transform::default(),
    ));
    commands.spawn((
        Hud,
        Text::new(""),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(HUD_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));

    info!("board initialized at {width}x{height} cells");
    clock.restart(time.elapsed());
    next_state.set(GameState::Running);
}

fn handle_kbd(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time<Real>>,
    mut clock: ResMut<GenerationClock>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut placement: ResMut<Placement>,
    mut board: ResMut<LifeBoard>,
) {
    for key in keyboard_input.get_just_pressed() {
        let Some(action) = KeyAction::from_key(*key) else {
            continue;
        };
        match action {
            KeyAction::ToggleRunning => match state.get() {
                GameState::Running => {
                    info!("simulation paused at generation {}", board.generation());
                    next_state.set(GameState::Paused);
                }
                GameState::Paused => {
                    info!("simulation running");
                    // generations resume one full interval after the key press
                    clock.restart(time.elapsed());
                    next_state.set(GameState::Running);
                }
                GameState::Load => (),
            },
            KeyAction::Clear => {
                board.clear();
                info!("board cleared");
            }
            KeyAction::Randomize => {
                board.randomize(SOUP_DENSITY, &mut fastrand::Rng::new());
                info!("board filled with a random soup");
            }
            _ => placement.apply(action),
        }
    }
}

/// reallocate (and so clear) the board whenever the window size changes
fn resize_board(
    mut resized: EventReader<WindowResized>,
    primary: Query<(), With<PrimaryWindow>>,
    mut board: ResMut<LifeBoard>,
    board_image: Res<BoardImage>,
    mut images: ResMut<Assets<Image>>,
    mut sprite_query: Query<&mut Sprite, With<BoardSprite>>,
) {
    let Some(event) = resized
        .read()
        .filter(|event| primary.contains(event.window))
        .last()
    else {
        return;
    };
    let window_size = vec2(event.width, event.height);
    if let Ok(mut sprite) = sprite_query.get_single_mut() {
        sprite.custom_size = Some(window_size);
    }

    let (width, height) = grid_size_for(window_size);
    if board.current().size() == (width, height) {
        return;
    }
    board.initialize(width, height);
    if let Some(image) = images.get_mut(&board_image.0) {
        image.resize(board_extent(width, height));
    }
    info!("window resized, board reset to {width}x{height} cells");
}

/// Left button stamps the selected pattern (or draws one cell) under the cursor, and keeps
/// doing so on every cursor move until released.
fn paint_with_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    mut moved: EventReader<CursorMoved>,
    mut left: EventReader<CursorLeft>,
    windows: Query<&Window, With<PrimaryWindow>>,
    view: Res<View>,
    placement: Res<Placement>,
    state: Res<State<GameState>>,
    next_state: Res<NextState<GameState>>,
    mut board: ResMut<LifeBoard>,
    mut drawing: Local<bool>,
) {
    let Ok(window) = windows.get_single() else {
        moved.clear();
        left.clear();
        return;
    };
    let size = window.size();
    let target = StampTarget::for_running(is_running(&state, &next_state));
    let paint = |board: &mut LifeBoard, cursor: Vec2| {
        let (row, col) =
            view.pointer_to_cell(cursor_to_pointer(cursor, size), board.width(), board.height());
        placement.paint(board, row, col, target);
    };

    if buttons.just_pressed(MouseButton::Left) {
        *drawing = true;
        if let Some(cursor) = window.cursor_position() {
            paint(&mut *board, cursor);
        }
    }
    for event in moved.read() {
        if *drawing {
            paint(&mut *board, event.position);
        }
    }
    let cursor_left = !left.is_empty();
    left.clear();
    if buttons.just_released(MouseButton::Left) || cursor_left {
        *drawing = false;
    }
}

fn advance_generation(
    time: Res<Time<Real>>,
    mut clock: ResMut<GenerationClock>,
    mut board: ResMut<LifeBoard>,
) {
    if clock.tick(time.elapsed()) {
        board.step_par(ComputeTaskPool::get());
    }
}

/// upload the current generation to the board image
fn render_board(
    board: Res<LifeBoard>,
    palette: Res<AgePalette>,
    board_image: Res<BoardImage>,
    mut images: ResMut<Assets<Image>>,
) {
    if !board.is_changed() {
        return;
    }
    let Some(image) = images.get_mut(&board_image.0) else {
        return;
    };
    palette.paint(board.current(), &mut image.data);
}

fn update_hud(
    placement: Res<Placement>,
    board: Res<LifeBoard>,
    view: Res<View>,
    state: Res<State<GameState>>,
    mut hud_query: Query<&mut Text, With<Hud>>,
) {
    if !(placement.is_changed() || board.is_changed() || view.is_changed() || state.is_changed())
    {
        return;
    }
    let Ok(mut text) = hud_query.get_single_mut() else {
        return;
    };
    let run_label = match state.get() {
        GameState::Running => "running",
        _ => "paused",
    };
    text.0 = format!(
        "{} | gen {} | zoom {:.1}x | {run_label}",
        placement.label(),
        board.generation(),
        view.zoom,
    );
}

// ——> HELPERS

/// board dimensions (width, height) in cells for a window size in logical pixels
pub fn grid_size_for(window_size: Vec2) -> (usize, usize) {
    let cells = (window_size * GRID_RESOLUTION_MULTIPLIER).round().max(Vec2::ONE);
    (cells.x as usize, cells.y as usize)
}

fn board_extent(width: usize, height: usize) -> Extent3d {
    Extent3d {
        width: width as u32,
        height: height as u32,
        depth_or_array_layers: 1,
    }
}

/// display color of a cell age
pub fn age_to_color(age: u8) -> Srgba {
    match age {
        0 => COLOR_DEAD,
        1 => COLOR_AGE_1,
        2..=5 => COLOR_AGE_2_5,
        6..=10 => COLOR_AGE_6_10,
        11..=15 => COLOR_AGE_11_15,
        16..=20 => COLOR_AGE_16_20,
        _ => COLOR_AGE_21_PLUS,
    }
}

/// Keyboard actions. `S` and `Enter` both toggle running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlacement,
    ToggleRunning,
    Rotate,
    NextShape,
    PrevShape,
    Clear,
    Randomize,
}

impl KeyAction {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        let action = match key {
            KeyCode::KeyP => KeyAction::TogglePlacement,
            KeyCode::KeyS | KeyCode::Enter => KeyAction::ToggleRunning,
            KeyCode::KeyR => KeyAction::Rotate,
            KeyCode::ArrowRight => KeyAction::NextShape,
            KeyCode::ArrowLeft => KeyAction::PrevShape,
            KeyCode::KeyC => KeyAction::Clear,
            KeyCode::KeyN => KeyAction::Randomize,
            _ => return None,
        };
        Some(action)
    }
}

// ——> COMPONENTS

#[derive(Component)]
#[require(Sprite)]
struct BoardSprite;

#[derive(Component)]
#[require(Text)]
struct Hud;

// ——> RESOURCES

#[derive(Resource, Clone)]
struct BoardImage(Handle<Image>);

/// Gates generations to a fixed rate. At most one tick per check; time that has passed
/// beyond one interval is dropped, never caught up.
#[derive(Resource, Debug, Clone)]
pub struct GenerationClock {
    interval: Duration,
    last_tick: Duration,
}

impl GenerationClock {
    pub fn from_rate(generations_per_sec: u64) -> Self {
        Self {
            interval: Duration::from_millis(1000 / generations_per_sec.max(1)),
            last_tick: Duration::ZERO,
        }
    }

    pub fn restart(&mut self, now: Duration) {
        self.last_tick = now;
    }

    /// true if a generation is due at `now`
    pub fn tick(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_tick) >= self.interval {
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}

/// RGBA bytes for every possible age
#[derive(Resource, Debug, Clone)]
pub struct AgePalette([[u8; 4]; 256]);

impl Default for AgePalette {
    fn default() -> Self {
        Self(std::array::from_fn(|age| {
            let color = age_to_color(age as u8);
            [color.red, color.green, color.blue, color.alpha]
                .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
        }))
    }
}

impl AgePalette {
    #[inline]
    pub fn rgba(&self, age: u8) -> [u8; 4] {
        self.0[age as usize]
    }

    /// writes one RGBA pixel per cell, row 0 first
    pub fn paint(&self, grid: &Grid, rgba: &mut [u8]) {
        for (pixel, &age) in rgba.chunks_exact_mut(4).zip(grid.cells()) {
            pixel.copy_from_slice(&self.rgba(age));
        }
    }
}

/// What a left click does: stamp the selected pattern, or draw a single cell.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub active: bool,
    pub selected: usize,
    pub rotation: Rotation,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            active: true,
            selected: 0,
            rotation: Rotation::R0,
        }
    }
}

impl Placement {
    #[inline]
    pub fn pattern(&self) -> &'static Pattern {
        &SHAPES[self.selected]
    }

    /// Applies a placement key. Rotating and cycling only work while placing shapes,
    /// and every change of shape or mode starts again unrotated.
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::TogglePlacement => {
                self.active = !self.active;
                self.rotation = Rotation::R0;
            }
            KeyAction::Rotate if self.active => self.rotation = self.rotation.next(),
            KeyAction::NextShape if self.active => {
                self.selected = (self.selected + 1) % SHAPES.len();
                self.rotation = Rotation::R0;
            }
            KeyAction::PrevShape if self.active => {
                self.selected = (self.selected + SHAPES.len() - 1) % SHAPES.len();
                self.rotation = Rotation::R0;
            }
            _ => (),
        }
    }

    pub fn paint(&self, board: &mut LifeBoard, row: i32, col: i32, target: StampTarget) {
        if self.active {
            debug!(
                "stamping {} at ({row}, {col}) rotated {}",
                self.pattern().name,
                self.rotation.degrees()
            );
            board.stamp_pattern(self.pattern(), row, col, self.rotation, target);
        } else {
            board.draw_cell(row, col, target);
        }
    }

    pub fn label(&self) -> String {
        if self.active {
            format!(
                "Shape: {} (Rot: {}°)",
                self.pattern().name,
                self.rotation.degrees()
            )
        } else {
            "Draw".to_string()
        }
    }
}
