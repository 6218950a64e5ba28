use super::LoadContext;
use crate::config::{Config, CursorShape, MenuBars, PixelRatio, Rgb, SwapModifier};
use std::path::PathBuf;

// --- Schema table ---
//
// One step per line of the expected file layout, in file order. Mandatory
// entries abort the load when missing or out of range; optional entries keep
// whatever default the record already holds.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Mandatory,
    Optional,
}

pub type ApplyValues = fn(&mut Config, &[i32], &LoadContext);
pub type ApplyText = fn(&mut Config, &str, &LoadContext);

pub struct ValuesEntry {
    pub key: &'static str,
    pub arity: usize,
    pub presence: Presence,
    /// Inclusive bounds every value must respect.
    pub range: Option<(i32, i32)>,
    /// The entry is skipped entirely when this returns false.
    pub guard: fn(&LoadContext) -> bool,
    pub apply: ApplyValues,
}

/// Free-text option; always optional.
pub struct TextEntry {
    pub key: &'static str,
    /// Keep `;` and `#` in the value.
    pub raw: bool,
    pub apply: ApplyText,
}

pub enum Step {
    Group(&'static str),
    Values(ValuesEntry),
    Text(TextEntry),
    /// Up to `NB_BOOKMARKS` label/directory pairs.
    Bookmarks,
}

impl Step {
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Group(name) => *name,
            Self::Values(entry) => entry.key,
            Self::Text(entry) => entry.key,
            Self::Bookmarks => "Bookmark_label",
        }
    }
}

const fn always(_: &LoadContext) -> bool {
    true
}

fn primary_is_windowed(ctx: &LoadContext) -> bool {
    !ctx.video_modes.primary().fullscreen
}

const fn mandatory(key: &'static str, arity: usize, min: i32, max: i32, apply: ApplyValues) -> Step {
    Step::Values(ValuesEntry {
        key,
        arity,
        presence: Presence::Mandatory,
        range: Some((min, max)),
        guard: always,
        apply,
    })
}

const fn optional(key: &'static str, arity: usize, range: Option<(i32, i32)>, apply: ApplyValues) -> Step {
    Step::Values(ValuesEntry {
        key,
        arity,
        presence: Presence::Optional,
        range,
        guard: always,
        apply,
    })
}

const fn text(key: &'static str, raw: bool, apply: ApplyText) -> Step {
    Step::Text(TextEntry { key, raw, apply })
}

#[inline(always)]
fn color(v: &[i32]) -> Rgb {
    Rgb::from_6bit(v[0] as u8, v[1] as u8, v[2] as u8)
}

pub const SCHEMA: &[Step] = &[
    Step::Group("[MOUSE]"),
    mandatory("X_sensitivity", 1, 1, 4, |c, v, _| c.mouse_sensitivity_x = v[0] as u8),
    mandatory("Y_sensitivity", 1, 1, 4, |c, v, _| c.mouse_sensitivity_y = v[0] as u8),
    // Deprecated: still validated, no longer used.
    mandatory("X_correction_factor", 1, 0, 4, |_, _, _| {}),
    mandatory("Y_correction_factor", 1, 0, 4, |_, _, _| {}),
    mandatory("Cursor_aspect", 1, 1, 3, |c, v, _| {
        c.cursor = CursorShape::from_code(v[0]).unwrap_or_default();
    }),
    Step::Group("[MENU]"),
    mandatory("Light_color", 3, 0, 63, |c, v, _| c.fav_menu_colors[2] = color(v)),
    mandatory("Dark_color", 3, 0, 63, |c, v, _| c.fav_menu_colors[1] = color(v)),
    mandatory("Menu_ratio", 1, -4, 2, |c, v, _| c.menu_ratio = v[0] as i8),
    Step::Group("[FILE_SELECTOR]"),
    mandatory("Show_hidden_files", 1, 0, 1, |c, v, _| c.show_hidden_files = v[0] != 0),
    mandatory("Show_hidden_directories", 1, 0, 1, |c, v, _| {
        c.show_hidden_directories = v[0] != 0;
    }),
    mandatory("Preview_delay", 1, 1, 256, |c, v, _| c.preview_delay = v[0] as u16),
    mandatory("Maximize_preview", 1, 0, 1, |c, v, _| c.maximize_preview = v[0] != 0),
    mandatory("Find_file_fast", 1, 0, 2, |c, v, _| c.find_file_fast = v[0] as u8),
    Step::Group("[LOADING]"),
    mandatory("Auto_set_resolution", 1, 0, 1, |c, v, _| c.auto_set_resolution = v[0] != 0),
    mandatory("Set_resolution_according_to", 1, 1, 2, |c, v, _| {
        c.set_resolution_according_to = v[0] as u8;
    }),
    mandatory("Clear_palette", 1, 0, 1, |c, v, _| c.clear_palette = v[0] != 0),
    Step::Group("[MISCELLANEOUS]"),
    mandatory("Draw_limits", 1, 0, 1, |c, v, _| c.display_image_limits = v[0] != 0),
    mandatory("Adjust_brush_pick", 1, 0, 1, |c, v, _| c.adjust_brush_pick = v[0] != 0),
    // 1 = relative, 2 = absolute.
    mandatory("Coordinates", 1, 1, 2, |c, v, _| c.coords_relative = v[0] == 1),
    mandatory("Backup", 1, 0, 1, |c, v, _| c.backup = v[0] != 0),
    mandatory("Undo_pages", 1, 1, 99, |c, v, _| c.max_undo_pages = v[0] as u8),
    mandatory("Gauges_scrolling_speed_Left", 1, 1, 255, |c, v, _| {
        c.slider_delay_left = v[0] as u8;
    }),
    mandatory("Gauges_scrolling_speed_Right", 1, 1, 255, |c, v, _| {
        c.slider_delay_right = v[0] as u8;
    }),
    mandatory("Auto_save", 1, 0, 1, |c, v, _| c.auto_save = v[0] != 0),
    mandatory("Vertices_per_polygon", 1, 2, 16384, |c, v, _| {
        c.max_polygon_vertices = v[0] as u16;
    }),
    mandatory("Fast_zoom", 1, 0, 1, |c, v, _| c.fast_zoom = v[0] != 0),
    mandatory("Separate_colors", 1, 0, 1, |c, v, _| c.separate_colors = v[0] != 0),
    mandatory("FX_feedback", 1, 0, 1, |c, v, _| c.fx_feedback = v[0] != 0),
    mandatory("Safety_colors", 1, 0, 1, |c, v, _| c.safety_colors = v[0] != 0),
    mandatory("Opening_message", 1, 0, 1, |c, v, _| c.opening_message = v[0] != 0),
    mandatory("Clear_with_stencil", 1, 0, 1, |c, v, _| c.clear_with_stencil = v[0] != 0),
    mandatory("Auto_discontinuous", 1, 0, 1, |c, v, _| c.auto_discontinuous = v[0] != 0),
    mandatory("Save_screen_size_in_GIF", 1, 0, 1, |c, v, _| c.screen_size_in_gif = v[0] != 0),
    mandatory("Auto_nb_colors_used", 1, 0, 1, |c, v, _| {
        c.auto_count_used_colors = v[0] != 0;
    }),
    // Everything below was added by later versions of the format.
    text("Default_video_mode", false, |c, s, ctx| {
        if let Some(mode) = ctx.video_modes.index_of(s) {
            c.default_resolution = mode;
        }
    }),
    Step::Values(ValuesEntry {
        key: "Default_window_size",
        arity: 2,
        presence: Presence::Optional,
        range: None,
        guard: primary_is_windowed,
        apply: |c, v, _| {
            if v[0] >= 320 {
                c.window_width = v[0] as u32;
            }
            if v[1] >= 200 {
                c.window_height = v[1] as u32;
            }
        },
    }),
    optional("Merge_movement", 1, Some((0, 1000)), |c, v, _| {
        c.mouse_merge_movement = v[0] as u16;
    }),
    optional("Mouse_motion_debounce", 1, Some((0, 1000)), |c, v, _| {
        c.mouse_motion_debounce = v[0] as u16;
    }),
    optional("Palette_cells_X", 1, Some((1, 256)), |c, v, _| c.palette_cells_x = v[0] as u16),
    optional("Palette_cells_Y", 1, Some((1, 16)), |c, v, _| c.palette_cells_y = v[0] as u8),
    Step::Bookmarks,
    optional("Palette_vertical", 1, Some((0, 1)), |c, v, _| c.palette_vertical = v[0] != 0),
    optional("Window_position", 2, None, |c, v, _| {
        c.window_pos_x = v[0];
        c.window_pos_y = v[1];
    }),
    optional("Double_click_speed", 1, Some((1, 2000)), |c, v, _| {
        c.double_click_speed = v[0] as u16;
    }),
    optional("Double_key_speed", 1, Some((1, 2000)), |c, v, _| {
        c.double_key_speed = v[0] as u16;
    }),
    text("Skin_file", true, |c, s, _| {
        if !s.is_empty() {
            c.skin_file = s.to_string();
        }
    }),
    text("Font_file", true, |c, s, _| {
        if !s.is_empty() {
            c.font_file = s.to_string();
        }
    }),
    // Unknown codes, and ratios the window is too small for, fall back to Simple.
    optional("Pixel_ratio", 1, None, |c, v, _| {
        c.pixel_ratio = PixelRatio::from_code(v[0])
            .filter(|ratio| ratio.fits(c.window_width, c.window_height))
            .unwrap_or_default();
    }),
    optional("Menubars_visible", 1, None, |c, v, _| c.menu_bars = MenuBars::from_mask(v[0])),
    optional("Right_click_colorpick", 1, None, |c, v, _| c.right_click_colorpick = v[0] != 0),
    optional("Sync_views", 1, None, |c, v, _| c.sync_views = v[0] != 0),
    optional("Swap_buttons", 1, None, |c, v, _| c.swap_buttons = SwapModifier::from_code(v[0])),
    text("Scripts_directory", true, |c, s, _| {
        if !s.is_empty() {
            c.scripts_directory = PathBuf::from(s);
        }
    }),
    optional("Allow_multi_shortcuts", 1, None, |c, v, _| c.allow_multi_shortcuts = v[0] != 0),
    optional("Tilemap_detect_mirrored_x", 1, None, |c, v, _| {
        c.tilemap_allow_flipped_x = v[0] != 0;
    }),
    optional("Tilemap_detect_mirrored_y", 1, None, |c, v, _| {
        c.tilemap_allow_flipped_y = v[0] != 0;
    }),
    optional("Tilemap_count", 1, None, |c, v, _| c.tilemap_show_count = v[0] != 0),
    optional("Use_virtual_keyboard", 1, Some((0, 2)), |c, v, _| {
        c.use_virtual_keyboard = v[0] as u8;
    }),
    optional("Default_mode_layers", 1, None, |c, v, _| c.default_mode_layers = v[0] != 0),
    optional("MOTO_gamma", 1, Some((0, 255)), |c, v, _| c.moto_gamma = v[0] as u8),
];
