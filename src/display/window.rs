use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use super::{PixelBuffer, Viewport};
use crate::error::{CanvasError, Result};

/// SDL window that shows a [`PixelBuffer`] scaled to fit, letterboxed
pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
    vsync: bool,
}

/// Streaming texture the canvas is uploaded into each frame
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
    /// Pointer position in window pixels
    MouseMove { x: i32, y: i32 },
    WindowResized { width: u32, height: u32 },
}

fn display_err(e: impl ToString) -> CanvasError {
    CanvasError::Display(e.to_string())
}

impl Display {
    /// Open a window `scale` times the canvas size
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        scale: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(display_err)?;
        let video_subsystem = sdl_context.video().map_err(display_err)?;

        let scale = scale.max(1);
        let window = video_subsystem
            .window(title, width * scale, height * scale)
            .position_centered()
            .resizable()
            .build()
            .map_err(display_err)?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let mut canvas = canvas_builder.build().map_err(display_err)?;
        canvas
            .set_logical_size(width, height)
            .map_err(display_err)?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(display_err)?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
                vsync,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    /// Follow a canvas resize: the logical size tracks the buffer
    pub fn set_logical_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.canvas
            .set_logical_size(width, height)
            .map_err(display_err)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Window size in physical pixels
    pub fn window_size(&self) -> (u32, u32) {
        self.canvas.window().size()
    }

    /// Letterboxed viewport for pointer mapping
    pub fn viewport(&self) -> Viewport {
        Viewport::letterbox(self.window_size(), (self.width, self.height))
    }

    pub fn present(&mut self, target: &mut RenderTarget, buffer: &PixelBuffer) -> Result<()> {
        if !target.matches(buffer) {
            return Err(CanvasError::Display(format!(
                "render target is {}x{} but canvas is {}x{}",
                target.width,
                target.height,
                buffer.width(),
                buffer.height()
            )));
        }
        target
            .texture
            .update(None, buffer.as_bytes(), buffer.pitch())
            .map_err(display_err)?;

        self.canvas.clear();
        self.canvas
            .copy(&target.texture, None, None)
            .map_err(display_err)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyUp(k)),
                Event::MouseMotion { x, y, .. } => events.push(InputEvent::MouseMove { x, y }),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } => events.push(InputEvent::WindowResized {
                    width: w.max(0) as u32,
                    height: h.max(0) as u32,
                }),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Create an ARGB8888 streaming texture matching the canvas size
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(display_err)?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }

    /// Whether this texture can take `buffer` as-is
    pub fn matches(&self, buffer: &PixelBuffer) -> bool {
        self.width == buffer.width() && self.height == buffer.height()
    }
}
