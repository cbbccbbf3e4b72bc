//! Viewport reader: size, orientation and platform of the host.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Portrait whenever the height is at least the width.
    pub fn of(size: Size) -> Self {
        if size.height >= size.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Index into a `[portrait, landscape]` pair.
    pub const fn index(self) -> usize {
        match self {
            Orientation::Portrait => 0,
            Orientation::Landscape => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Keys that mark a value as platform specific.
pub const PLATFORM_KEYS: [&str; 2] = ["ios", "android"];

/// Key consulted by platform maps when the current platform has no entry.
pub const DEFAULT_PLATFORM_KEY: &str = "default";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
    Web,
    Windows,
    Macos,
    Linux,
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Macos
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// Identifier used as a key in platform maps and conditional fragments.
    pub const fn key(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Web => "web",
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
            Platform::Other => "other",
        }
    }
}

/// What the engine needs to know about the host's viewport.
///
/// `window` drives breakpoints and scaling, `screen` drives orientation.
/// Hosts forward their resize/rotation events to
/// [`Responsive::viewport_changed`](crate::Responsive::viewport_changed).
pub trait Viewport {
    fn window(&self) -> Size;

    fn screen(&self) -> Size {
        self.window()
    }

    fn platform(&self) -> Platform {
        Platform::current()
    }
}

impl<V: Viewport + ?Sized> Viewport for Rc<V> {
    fn window(&self) -> Size {
        (**self).window()
    }
    fn screen(&self) -> Size {
        (**self).screen()
    }
    fn platform(&self) -> Platform {
        (**self).platform()
    }
}

/// Viewport whose values are pushed in by the host (or by tests).
#[derive(Debug)]
pub struct StaticViewport {
    window: Cell<Size>,
    screen: Cell<Size>,
    platform: Cell<Platform>,
}

impl StaticViewport {
    pub fn new(width: f32, height: f32) -> Self {
        let size = Size::new(width, height);
        Self {
            window: Cell::new(size),
            screen: Cell::new(size),
            platform: Cell::new(Platform::current()),
        }
    }

    pub fn with_platform(self, platform: Platform) -> Self {
        self.platform.set(platform);
        self
    }

    /// Sets window and screen at once.
    pub fn set_size(&self, width: f32, height: f32) {
        let size = Size::new(width, height);
        self.window.set(size);
        self.screen.set(size);
    }

    /// Changes only the window width, keeping the current heights.
    pub fn set_width(&self, width: f32) {
        let window = self.window.get();
        let screen = self.screen.get();
        self.window.set(Size::new(width, window.height));
        self.screen.set(Size::new(width, screen.height));
    }

    pub fn set_window(&self, size: Size) {
        self.window.set(size);
    }

    pub fn set_screen(&self, size: Size) {
        self.screen.set(size);
    }

    pub fn set_platform(&self, platform: Platform) {
        self.platform.set(platform);
    }
}

impl Viewport for StaticViewport {
    fn window(&self) -> Size {
        self.window.get()
    }
    fn screen(&self) -> Size {
        self.screen.get()
    }
    fn platform(&self) -> Platform {
        self.platform.get()
    }
}
