use raylib::prelude::*;
use std::time::Duration;

use crate::command::Command;
use crate::constants::FPS;
use crate::engine::Presenter;
use crate::error::BannerError;
use crate::pixel_buffer::PixelBuffer;

const DIGIT_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

/// Shows banner frames in a raylib window.
///
/// Right/Left step through images, Space toggles auto-advance and the
/// digit keys 1-9 jump to an image.
pub struct RaylibWindow {
    rl: RaylibHandle,
    thread: RaylibThread,
    texture: Texture2D,
    width: u32,
    height: u32,
    auto_advance: bool,
}

impl RaylibWindow {
    pub fn open(width: u32, height: u32) -> Result<Self, BannerError> {
        let (mut rl, thread) = raylib::init()
            .size(width as i32, height as i32)
            .title("Slide Banner")
            .vsync()
            .resizable()
            .build();
        rl.set_target_fps(FPS);
        rl.set_trace_log(TraceLogLevel::LOG_ERROR);

        let blank = Image::gen_image_color(width as i32, height as i32, Color::BLACK);
        let texture = rl
            .load_texture_from_image(&thread, &blank)
            .map_err(|e| BannerError::Presenter(format!("failed to create texture: {e}")))?;

        Ok(Self {
            rl,
            thread,
            texture,
            width,
            height,
            auto_advance: true,
        })
    }
}

impl Presenter for RaylibWindow {
    fn frame_time(&mut self) -> Duration {
        Duration::from_secs_f32(self.rl.get_frame_time())
    }

    fn present(&mut self, frame: &PixelBuffer) -> Result<(), BannerError> {
        self.texture
            .update_texture(frame.data())
            .map_err(|e| BannerError::Presenter(format!("failed to upload frame: {e}")))?;

        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);

        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.draw_texture_pro(
            &self.texture,
            Rectangle::new(0.0, 0.0, self.width as f32, self.height as f32),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        Ok(())
    }

    fn poll_commands(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();

        if self.rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            commands.push(Command::Next);
        }
        if self.rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            commands.push(Command::Prev);
        }
        if self.rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            self.auto_advance = !self.auto_advance;
            commands.push(if self.auto_advance {
                Command::Start
            } else {
                Command::Stop
            });
        }
        for (index, key) in DIGIT_KEYS.iter().enumerate() {
            if self.rl.is_key_pressed(*key) {
                commands.push(Command::Seek(index));
            }
        }

        commands
    }

    fn is_closed(&self) -> bool {
        self.rl.window_should_close()
    }
}
