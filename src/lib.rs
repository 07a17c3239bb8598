pub mod board;
pub mod camera;
pub mod life;
pub mod patterns;
pub mod rules;
pub mod state;
pub mod view;

pub mod prelude {
    use bevy::color::{Color, Srgba};

    pub const WINDOW_SIZE_PX: (f32, f32) = (1000.0, 1000.0);
    pub const BG_COLOR: Color = Color::srgb(0.0, 0.0, 0.0);

    /// grid cells per logical window pixel, on each axis
    pub const GRID_RESOLUTION_MULTIPLIER: f32 = 2.0;
    pub const TARGET_GENERATIONS_PER_SEC: u64 = 10;

    pub const MIN_ZOOM: f32 = 1.0;
    pub const MAX_ZOOM: f32 = 20.0;
    pub const ZOOM_STEP: f32 = 1.1;

    pub const MAX_AGE: u8 = u8::MAX;
    pub const BIRTH: [u8; 1] = [3];
    pub const SURVIVAL: [u8; 2] = [2, 3];

    /// density of live cells in a random soup
    pub const SOUP_DENSITY: f32 = 0.25;

    pub const HUD_FONT_SIZE: f32 = 18.0;
    pub const HUD_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);

    pub const COLOR_DEAD: Srgba = Srgba::rgb(0.05, 0.05, 0.05);
    pub const COLOR_AGE_1: Srgba = Srgba::rgb(0.2, 1.0, 0.2);
    pub const COLOR_AGE_2_5: Srgba = Srgba::rgb(0.6, 1.0, 0.2);
    pub const COLOR_AGE_6_10: Srgba = Srgba::rgb(1.0, 1.0, 0.2);
    pub const COLOR_AGE_11_15: Srgba = Srgba::rgb(1.0, 0.7, 0.1);
    pub const COLOR_AGE_16_20: Srgba = Srgba::rgb(1.0, 0.4, 0.1);
    pub const COLOR_AGE_21_PLUS: Srgba = Srgba::rgb(0.8, 0.1, 0.1);
}
