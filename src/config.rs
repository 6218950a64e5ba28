use std::path::PathBuf;

/// Number of file-selector bookmarks.
pub const NB_BOOKMARKS: usize = 4;
/// Longest bookmark label, in characters.
pub const BOOKMARK_LABEL_LEN: usize = 8;

pub const DEFAULT_SKIN_FILENAME: &str = "skin_modern.png";
pub const DEFAULT_FONT_FILENAME: &str = "font_Dpaint.png";

// --- Colors ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from three 0..=63 channels.
    pub const fn from_6bit(r: u8, g: u8, b: u8) -> Self {
        Self::new(expand_channel(r), expand_channel(g), expand_channel(b))
    }
}

/// Widen a 6-bit channel to 8 bits, copying the top bits into the bottom.
#[inline(always)]
pub const fn expand_channel(v: u8) -> u8 {
    let v = v & 0x3F;
    (v << 2) | (v >> 4)
}

// --- Enumerated settings ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Solid,
    Transparent,
    Thin,
}

impl CursorShape {
    /// Decode the 1-based `Cursor_aspect` code.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Solid),
            2 => Some(Self::Transparent),
            3 => Some(Self::Thin),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::Transparent => "Transparent",
            Self::Thin => "Thin",
        }
    }
}

/// How many screen pixels each image pixel takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelRatio {
    #[default]
    Simple,
    Wide,
    Tall,
    Double,
    Triple,
    Wide2,
    Tall2,
    Tall3,
    Quad,
}

impl PixelRatio {
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Simple),
            1 => Some(Self::Wide),
            2 => Some(Self::Tall),
            3 => Some(Self::Double),
            4 => Some(Self::Triple),
            5 => Some(Self::Wide2),
            6 => Some(Self::Tall2),
            7 => Some(Self::Tall3),
            8 => Some(Self::Quad),
            _ => None,
        }
    }

    /// Smallest window (width, height) able to show a 320x200 screen.
    pub const fn min_window(&self) -> (u32, u32) {
        match self {
            Self::Simple => (0, 0),
            Self::Wide => (640, 0),
            Self::Tall => (0, 400),
            Self::Double => (640, 400),
            Self::Triple => (3 * 320, 3 * 200),
            Self::Wide2 => (4 * 320, 2 * 200),
            Self::Tall2 => (2 * 320, 4 * 200),
            Self::Tall3 => (3 * 320, 4 * 200),
            Self::Quad => (4 * 320, 4 * 200),
        }
    }

    #[inline(always)]
    pub const fn fits(&self, width: u32, height: u32) -> bool {
        let (w, h) = self.min_window();
        width >= w && height >= h
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Wide => "Wide",
            Self::Tall => "Tall",
            Self::Double => "Double",
            Self::Triple => "Triple",
            Self::Wide2 => "Wide2",
            Self::Tall2 => "Tall2",
            Self::Tall3 => "Tall3",
            Self::Quad => "Quad",
        }
    }
}

/// Modifier key that swaps the left and right mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapModifier {
    #[default]
    None,
    Ctrl,
    Alt,
}

impl SwapModifier {
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Ctrl,
            2 => Self::Alt,
            _ => Self::None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Ctrl => "Ctrl",
            Self::Alt => "Alt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuBars {
    pub layers: bool,
    pub animation: bool,
    pub tools: bool,
}

impl Default for MenuBars {
    fn default() -> Self {
        Self {
            layers: true,
            animation: false,
            tools: true,
        }
    }
}

impl MenuBars {
    /// Decode the `Menubars_visible` bit mask. Bit 0 (status bar) is ignored.
    pub const fn from_mask(mask: i32) -> Self {
        Self {
            layers: mask & 2 != 0,
            animation: false,
            tools: mask & 4 != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bookmark {
    pub label: String,
    pub directory: Option<PathBuf>,
}

impl Bookmark {
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.directory.is_none()
    }
}

// --- The record ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // [MOUSE]
    /// Stylus cursor mode; set from the platform before the file is read.
    pub stylus_mode: bool,
    pub mouse_sensitivity_x: u8,
    pub mouse_sensitivity_y: u8,
    pub cursor: CursorShape,

    // [MENU]
    /// 0 = black, 1 = dark, 2 = light, 3 = white.
    pub fav_menu_colors: [Rgb; 4],
    /// Menu zoom: positive values force a factor, negative ones cap it.
    pub menu_ratio: i8,

    // [FILE_SELECTOR]
    pub show_hidden_files: bool,
    pub show_hidden_directories: bool,
    /// Delay before the preview shows up, in 1/100 s.
    pub preview_delay: u16,
    pub maximize_preview: bool,
    /// 0 = off, 1 = files, 2 = directories.
    pub find_file_fast: u8,

    // [LOADING]
    pub auto_set_resolution: bool,
    /// 1 = internal resolution, 2 = image size.
    pub set_resolution_according_to: u8,
    pub clear_palette: bool,

    // [MISCELLANEOUS]
    pub display_image_limits: bool,
    pub adjust_brush_pick: bool,
    pub coords_relative: bool,
    pub backup: bool,
    pub max_undo_pages: u8,
    pub slider_delay_left: u8,
    pub slider_delay_right: u8,
    pub auto_save: bool,
    pub max_polygon_vertices: u16,
    pub fast_zoom: bool,
    pub separate_colors: bool,
    pub fx_feedback: bool,
    pub safety_colors: bool,
    pub opening_message: bool,
    pub clear_with_stencil: bool,
    pub auto_discontinuous: bool,
    pub screen_size_in_gif: bool,
    pub auto_count_used_colors: bool,

    // Optional, newer format revisions.
    pub default_resolution: usize,
    /// Size of the first video mode. Only read from the file when that mode
    /// is a window.
    pub window_width: u32,
    pub window_height: u32,
    pub mouse_merge_movement: u16,
    pub mouse_motion_debounce: u16,
    pub palette_cells_x: u16,
    pub palette_cells_y: u8,
    pub bookmarks: [Bookmark; NB_BOOKMARKS],
    pub palette_vertical: bool,
    pub window_pos_x: i32,
    pub window_pos_y: i32,
    /// Milliseconds.
    pub double_click_speed: u16,
    /// Milliseconds.
    pub double_key_speed: u16,
    pub skin_file: String,
    pub font_file: String,
    pub pixel_ratio: PixelRatio,
    pub menu_bars: MenuBars,
    pub right_click_colorpick: bool,
    pub sync_views: bool,
    pub swap_buttons: SwapModifier,
    pub scripts_directory: PathBuf,
    pub allow_multi_shortcuts: bool,
    pub tilemap_allow_flipped_x: bool,
    pub tilemap_allow_flipped_y: bool,
    pub tilemap_show_count: bool,
    /// 0 = auto, 1 = on, 2 = off.
    pub use_virtual_keyboard: u8,
    pub default_mode_layers: bool,
    /// Gamma used for Thomson MO/TO palettes, in tenths.
    pub moto_gamma: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stylus_mode: cfg!(feature = "stylus"),
            mouse_sensitivity_x: 1,
            mouse_sensitivity_y: 1,
            cursor: CursorShape::Solid,
            fav_menu_colors: [
                Rgb::BLACK,
                Rgb::from_6bit(21, 21, 21),
                Rgb::from_6bit(42, 42, 42),
                Rgb::WHITE,
            ],
            menu_ratio: -2,
            show_hidden_files: false,
            show_hidden_directories: false,
            preview_delay: 8,
            maximize_preview: false,
            find_file_fast: 0,
            auto_set_resolution: false,
            set_resolution_according_to: 1,
            clear_palette: true,
            display_image_limits: true,
            adjust_brush_pick: true,
            coords_relative: true,
            backup: false,
            max_undo_pages: 10,
            slider_delay_left: 4,
            slider_delay_right: 32,
            auto_save: false,
            max_polygon_vertices: 1024,
            fast_zoom: true,
            separate_colors: false,
            fx_feedback: true,
            safety_colors: true,
            opening_message: true,
            clear_with_stencil: true,
            auto_discontinuous: false,
            screen_size_in_gif: false,
            auto_count_used_colors: true,
            default_resolution: 0,
            window_width: 640,
            window_height: 480,
            mouse_merge_movement: 100,
            mouse_motion_debounce: 0,
            palette_cells_x: 16,
            palette_cells_y: 4,
            bookmarks: Default::default(),
            palette_vertical: true,
            window_pos_x: 9999,
            window_pos_y: 9999,
            double_click_speed: 500,
            double_key_speed: 500,
            skin_file: DEFAULT_SKIN_FILENAME.to_string(),
            font_file: DEFAULT_FONT_FILENAME.to_string(),
            pixel_ratio: PixelRatio::Simple,
            menu_bars: MenuBars::default(),
            right_click_colorpick: false,
            sync_views: true,
            swap_buttons: SwapModifier::None,
            scripts_directory: PathBuf::from(crate::paths::SCRIPTS_SUBDIRECTORY),
            allow_multi_shortcuts: false,
            tilemap_allow_flipped_x: false,
            tilemap_allow_flipped_y: false,
            tilemap_show_count: false,
            use_virtual_keyboard: 0,
            default_mode_layers: false,
            moto_gamma: 28,
        }
    }
}

impl Config {
    #[inline(always)]
    pub const fn light_color(&self) -> Rgb {
        self.fav_menu_colors[2]
    }

    #[inline(always)]
    pub const fn dark_color(&self) -> Rgb {
        self.fav_menu_colors[1]
    }

    pub fn bookmark_count(&self) -> usize {
        self.bookmarks.iter().filter(|b| !b.is_empty()).count()
    }
}
