//! Fill a [`Config`] from `gfx2.ini`.
//!
//! The file is read front to back following [`schema::SCHEMA`]. Mandatory
//! entries must be present and valid or the whole load fails; optional
//! entries fall back to the defaults already in the record.

pub mod schema;

use crate::config::{BOOKMARK_LABEL_LEN, Config, NB_BOOKMARKS};
use crate::ini::{Corruption, IniError, IniReader};
use crate::paths::{self, INI_FILENAME, INIDEF_FILENAME, append_to_dir};
use crate::video::VideoModes;
use log::{debug, error, info};
use schema::{Presence, SCHEMA, Step, TextEntry, ValuesEntry};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// Everything the loader needs from the outside world.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Holds the user's `gfx2.ini`.
    pub config_dir: PathBuf,
    /// Holds the bundled `gfx2def.ini` and the default scripts directory.
    pub data_dir: PathBuf,
    pub video_modes: VideoModes,
    /// Platform default for the stylus cursor mode.
    pub stylus_mode: bool,
}

impl LoadContext {
    pub fn new(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
            video_modes: VideoModes::standard(),
            stylus_mode: cfg!(feature = "stylus"),
        }
    }

    pub fn with_video_modes(mut self, video_modes: VideoModes) -> Self {
        self.video_modes = video_modes;
        self
    }

    pub const fn with_stylus_mode(mut self, stylus_mode: bool) -> Self {
        self.stylus_mode = stylus_mode;
        self
    }

    /// The record before the file is read: defaults that depend on the
    /// platform are filled in here.
    pub fn initial_config(&self) -> Config {
        let primary = self.video_modes.primary();
        let defaults = Config::default();
        let (window_width, window_height) = if primary.fullscreen {
            (primary.width, primary.height)
        } else {
            (defaults.window_width, defaults.window_height)
        };
        Config {
            stylus_mode: self.stylus_mode,
            window_width,
            window_height,
            scripts_directory: paths::default_scripts_dir(&self.data_dir),
            ..defaults
        }
    }
}

// --- Entry point ---

/// Load the configuration into `conf`.
///
/// `conf` only receives the stylus default unless the whole file loads.
pub fn load(conf: &mut Config, ctx: &LoadContext) -> Result<(), IniError> {
    conf.stylus_mode = ctx.stylus_mode;

    let (path, mut reader) = open(ctx)?;
    debug!("Loading configuration from '{}'.", path.display());

    let loaded = read_config(&mut reader, ctx)?;
    *conf = loaded;
    info!("Configuration loaded from '{}'.", path.display());
    Ok(())
}

/// Like [`load`], but leaves `conf` holding [`LoadContext::initial_config`]
/// when the file is missing or rejected.
pub fn load_or_defaults(conf: &mut Config, ctx: &LoadContext) -> Result<(), IniError> {
    load(conf, ctx).inspect_err(|_| *conf = ctx.initial_config())
}

fn open(ctx: &LoadContext) -> Result<(PathBuf, IniReader<BufReader<File>>), IniError> {
    let user = append_to_dir(&ctx.config_dir, INI_FILENAME);
    match IniReader::open(&user) {
        Ok(reader) => return Ok((user, reader)),
        Err(e) => debug!("Cannot open '{}': {e}. Trying the defaults.", user.display()),
    }

    let fallback = append_to_dir(&ctx.data_dir, INIDEF_FILENAME);
    match IniReader::open(&fallback) {
        Ok(reader) => Ok((fallback, reader)),
        Err(e) => {
            error!("Cannot open '{}': {e}", fallback.display());
            Err(IniError::MissingFile {
                tried: vec![user, fallback],
            })
        }
    }
}

/// Run the whole schema against `reader` and return the filled record.
pub fn read_config<R: BufRead>(
    reader: &mut IniReader<R>,
    ctx: &LoadContext,
) -> Result<Config, IniError> {
    let mut conf = ctx.initial_config();
    for step in SCHEMA {
        match step {
            Step::Group(name) => reader.reach_group(name)?,
            Step::Values(entry) => read_entry(reader, entry, &mut conf, ctx)?,
            Step::Text(entry) => read_text(reader, entry, &mut conf, ctx)?,
            Step::Bookmarks => read_bookmarks(reader, &mut conf)?,
        }
    }
    Ok(conf)
}

fn check_range(entry: &ValuesEntry, values: &[i32], line: usize) -> Result<(), IniError> {
    let Some((min, max)) = entry.range else {
        return Ok(());
    };
    match values.iter().find(|v| !(min..=max).contains(*v)) {
        Some(&value) => Err(IniError::corrupted(
            line,
            Corruption::OutOfRange {
                key: entry.key.to_string(),
                value,
                min,
                max,
            },
        )),
        None => Ok(()),
    }
}

/// Optional lookups only fail the load on I/O errors.
fn keep_default(key: &str, err: IniError) -> Result<(), IniError> {
    match err {
        IniError::Io(_) => Err(err),
        _ => {
            debug!("{key}: {err}. Keeping the default.");
            Ok(())
        }
    }
}

fn read_entry<R: BufRead>(
    reader: &mut IniReader<R>,
    entry: &ValuesEntry,
    conf: &mut Config,
    ctx: &LoadContext,
) -> Result<(), IniError> {
    if !(entry.guard)(ctx) {
        return Ok(());
    }

    match entry.presence {
        Presence::Mandatory => {
            let values = reader.get_values(entry.key, entry.arity)?;
            check_range(entry, &values, reader.line_number())?;
            (entry.apply)(conf, &values, ctx);
            Ok(())
        }
        Presence::Optional => {
            let found = reader
                .speculate(|r| r.get_values(entry.key, entry.arity))
                .and_then(|values| {
                    check_range(entry, &values, reader.line_number())?;
                    Ok(values)
                });
            match found {
                Ok(values) => {
                    (entry.apply)(conf, &values, ctx);
                    Ok(())
                }
                Err(e) => keep_default(entry.key, e),
            }
        }
    }
}

fn read_text<R: BufRead>(
    reader: &mut IniReader<R>,
    entry: &TextEntry,
    conf: &mut Config,
    ctx: &LoadContext,
) -> Result<(), IniError> {
    match reader.speculate(|r| r.get_string(entry.key, entry.raw)) {
        Ok(value) => {
            (entry.apply)(conf, &value, ctx);
            Ok(())
        }
        Err(e) => keep_default(entry.key, e),
    }
}

fn optional_string<R: BufRead>(
    reader: &mut IniReader<R>,
    key: &str,
) -> Result<Option<String>, IniError> {
    match reader.speculate(|r| r.get_string(key, true)) {
        Ok(value) => Ok(Some(value)),
        Err(e) => keep_default(key, e).map(|()| None),
    }
}

/// Label/directory pairs, stopping at the first one missing.
fn read_bookmarks<R: BufRead>(
    reader: &mut IniReader<R>,
    conf: &mut Config,
) -> Result<(), IniError> {
    for slot in 0..NB_BOOKMARKS {
        let Some(label) = optional_string(reader, "Bookmark_label")? else {
            break;
        };
        if !label.is_empty() {
            conf.bookmarks[slot].label = label.chars().take(BOOKMARK_LABEL_LEN).collect();
        }

        let Some(directory) = optional_string(reader, "Bookmark_directory")? else {
            break;
        };
        if !directory.is_empty() {
            conf.bookmarks[slot].directory = Some(PathBuf::from(directory));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{LoadContext, load, load_or_defaults, read_config};
    use crate::config::{Config, CursorShape, PixelRatio, Rgb, SwapModifier};
    use crate::ini::{Corruption, IniError, IniReader, ValueError};
    use crate::paths::{INI_FILENAME, INIDEF_FILENAME};
    use crate::video::{VideoMode, VideoModes};
    use std::fs;
    use std::path::{Path, PathBuf};

    const MANDATORY: &str = "\
###########################################################################
;  GrafX2 configuration file
###########################################################################

[MOUSE]
  X_sensitivity = 2
  Y_sensitivity = 3
  X_correction_factor = 0
  Y_correction_factor = 0
  Cursor_aspect = 2

[MENU]
  Light_color = 42,42,42   ; R,G,B in 0..63
  Dark_color = 21,21,21
  Menu_ratio = -2

[FILE_SELECTOR]
  Show_hidden_files = no
  Show_hidden_directories = no
  Preview_delay = 8
  Maximize_preview = yes
  Find_file_fast = 0

[LOADING]
  Auto_set_resolution = no
  Set_resolution_according_to = 1
  Clear_palette = yes

[MISCELLANEOUS]
  Draw_limits = yes
  Adjust_brush_pick = yes
  Coordinates = 1
  Backup = no
  Undo_pages = 20
  Gauges_scrolling_speed_Left = 10
  Gauges_scrolling_speed_Right = 3
  Auto_save = no
  Vertices_per_polygon = 1024
  Fast_zoom = yes
  Separate_colors = no
  FX_feedback = yes
  Safety_colors = yes
  Opening_message = yes
  Clear_with_stencil = yes
  Auto_discontinuous = no
  Save_screen_size_in_GIF = no
  Auto_nb_colors_used = yes
";

    fn ctx() -> LoadContext {
        LoadContext::new("unused-config", "unused-data")
    }

    fn parse(text: &str) -> Result<Config, IniError> {
        parse_with(text, &ctx())
    }

    fn parse_with(text: &str, ctx: &LoadContext) -> Result<Config, IniError> {
        let mut reader = IniReader::new(text.as_bytes());
        read_config(&mut reader, ctx)
    }

    fn with_tail(tail: &str) -> String {
        format!("{MANDATORY}{tail}")
    }

    #[test]
    fn mandatory_schema_loads() {
        let cfg = parse(MANDATORY).unwrap();
        assert_eq!(cfg.mouse_sensitivity_x, 2);
        assert_eq!(cfg.mouse_sensitivity_y, 3);
        assert_eq!(cfg.cursor, CursorShape::Transparent);
        assert_eq!(cfg.light_color(), Rgb::from_6bit(42, 42, 42));
        assert_eq!(cfg.dark_color(), Rgb::from_6bit(21, 21, 21));
        assert_eq!(cfg.fav_menu_colors[0], Rgb::BLACK);
        assert_eq!(cfg.fav_menu_colors[3], Rgb::WHITE);
        assert_eq!(cfg.menu_ratio, -2);
        assert!(cfg.maximize_preview);
        assert!(cfg.clear_palette);
        assert!(cfg.coords_relative);
        assert_eq!(cfg.max_undo_pages, 20);
        assert_eq!(cfg.slider_delay_left, 10);
        assert_eq!(cfg.slider_delay_right, 3);
        assert_eq!(cfg.max_polygon_vertices, 1024);
        assert!(cfg.auto_count_used_colors);
    }

    #[test]
    fn absent_optional_keys_keep_their_defaults() {
        let cfg = parse(MANDATORY).unwrap();
        assert_eq!(cfg.double_click_speed, 500);
        assert_eq!(cfg.double_key_speed, 500);
        assert_eq!(cfg.mouse_merge_movement, 100);
        assert_eq!(cfg.palette_cells_x, 16);
        assert_eq!(cfg.palette_cells_y, 4);
        assert_eq!((cfg.window_width, cfg.window_height), (640, 480));
        assert_eq!((cfg.window_pos_x, cfg.window_pos_y), (9999, 9999));
        assert_eq!(cfg.pixel_ratio, PixelRatio::Simple);
        assert_eq!(cfg.skin_file, "skin_modern.png");
        assert_eq!(cfg.font_file, "font_Dpaint.png");
        assert!(cfg.sync_views);
        assert_eq!(cfg.moto_gamma, 28);
        assert!(cfg.scripts_directory.ends_with("scripts"));
    }

    #[test]
    fn sensitivity_in_range_is_stored() {
        let text = MANDATORY.replace("X_sensitivity = 2", "X_SENSITIVITY=4");
        assert_eq!(parse(&text).unwrap().mouse_sensitivity_x, 4);
    }

    #[test]
    fn sensitivity_out_of_range_rejects_the_load() {
        let text = MANDATORY.replace("X_sensitivity = 2", "X_SENSITIVITY=9");
        let err = parse(&text).unwrap_err();
        assert!(matches!(
            err,
            IniError::Corrupted {
                line: 6,
                kind: Corruption::OutOfRange { value: 9, min: 1, max: 4, .. },
            }
        ));
    }

    #[test]
    fn any_out_of_range_color_channel_rejects_the_load() {
        let text = MANDATORY.replace("Dark_color = 21,21,21", "Dark_color = 21,64,21");
        let err = parse(&text).unwrap_err();
        assert!(matches!(
            err,
            IniError::Corrupted { kind: Corruption::OutOfRange { value: 64, .. }, .. }
        ));
    }

    #[test]
    fn wrong_arity_rejects_the_load() {
        let more = MANDATORY.replace("Light_color = 42,42,42", "Light_color = 42,42,42,1");
        assert!(matches!(
            parse(&more).unwrap_err(),
            IniError::Corrupted { kind: Corruption::TooManyValues { expected: 3, .. }, .. }
        ));

        let fewer = MANDATORY.replace("Light_color = 42,42,42", "Light_color = 42,42");
        assert!(matches!(
            parse(&fewer).unwrap_err(),
            IniError::Corrupted { kind: Corruption::NotEnoughValues { found: 2, .. }, .. }
        ));
    }

    #[test]
    fn malformed_mandatory_token_rejects_the_load() {
        let text = MANDATORY.replace("X_sensitivity = 2", "X_sensitivity = abc");
        assert!(matches!(
            parse(&text).unwrap_err(),
            IniError::Corrupted {
                line: 6,
                kind: Corruption::BadValue {
                    source: ValueError::Unexpected { found: Some('a'), column: 0 },
                    ..
                },
            }
        ));
    }

    #[test]
    fn missing_section_or_key_rejects_the_load() {
        let no_loading = MANDATORY.replace("[LOADING]", "[LOADED]");
        let err = parse(&no_loading).unwrap_err();
        assert!(matches!(
            err,
            IniError::Corrupted { kind: Corruption::MissingGroup(ref g), .. } if g == "[LOADING]"
        ));

        let no_backup = MANDATORY.replace("  Backup = no\n", "");
        let err = parse(&no_backup).unwrap_err();
        assert!(matches!(
            err,
            IniError::Corrupted { kind: Corruption::MissingOption(ref k), .. } if k == "Backup"
        ));
    }

    #[test]
    fn keys_out_of_order_are_not_found() {
        let swapped = MANDATORY
            .replace("  X_sensitivity = 2\n", "")
            .replace("  Cursor_aspect = 2\n", "  Cursor_aspect = 2\n  X_sensitivity = 2\n");
        // X is found after Cursor_aspect, so Y_sensitivity has already been passed.
        assert!(parse(&swapped).unwrap_err().is_not_found());
    }

    #[test]
    fn optional_tail_is_applied() {
        let text = with_tail(
            "\
  Default_video_mode = 800x600
  Default_window_size = 1280,800
  Merge_movement = 250
  Mouse_motion_debounce = 5
  Palette_cells_X = 32
  Palette_cells_Y = 8
  Bookmark_label = Sprites and stuff
  Bookmark_directory = /home/artist/sprites;old
  Bookmark_label =
  Bookmark_directory =
  Palette_vertical = no
  Window_position = -1280,40
  Double_click_speed = 300
  Double_key_speed = 200
  Skin_file = skin_classic.png
  Font_file = font_Classic.png
  Pixel_ratio = 3
  Menubars_visible = 4
  Right_click_colorpick = yes
  Sync_views = no
  Swap_buttons = 2
  Scripts_directory = /opt/gfx2/scripts
  Allow_multi_shortcuts = yes
  Tilemap_detect_mirrored_x = yes
  Tilemap_detect_mirrored_y = no
  Tilemap_count = yes
  Use_virtual_keyboard = 2
  Default_mode_layers = yes
  MOTO_gamma = 30
",
        );
        let cfg = parse(&text).unwrap();
        assert_eq!(cfg.default_resolution, 5);
        assert_eq!((cfg.window_width, cfg.window_height), (1280, 800));
        assert_eq!(cfg.mouse_merge_movement, 250);
        assert_eq!(cfg.mouse_motion_debounce, 5);
        assert_eq!(cfg.palette_cells_x, 32);
        assert_eq!(cfg.palette_cells_y, 8);
        assert_eq!(cfg.bookmarks[0].label, "Sprites ");
        assert_eq!(
            cfg.bookmarks[0].directory,
            Some(PathBuf::from("/home/artist/sprites;old"))
        );
        assert!(cfg.bookmarks[1].is_empty());
        assert_eq!(cfg.bookmark_count(), 1);
        assert!(!cfg.palette_vertical);
        assert_eq!((cfg.window_pos_x, cfg.window_pos_y), (-1280, 40));
        assert_eq!(cfg.double_click_speed, 300);
        assert_eq!(cfg.double_key_speed, 200);
        assert_eq!(cfg.skin_file, "skin_classic.png");
        assert_eq!(cfg.font_file, "font_Classic.png");
        assert_eq!(cfg.pixel_ratio, PixelRatio::Double);
        assert!(!cfg.menu_bars.layers);
        assert!(cfg.menu_bars.tools);
        assert!(cfg.right_click_colorpick);
        assert!(!cfg.sync_views);
        assert_eq!(cfg.swap_buttons, SwapModifier::Alt);
        assert_eq!(cfg.scripts_directory, PathBuf::from("/opt/gfx2/scripts"));
        assert!(cfg.allow_multi_shortcuts);
        assert!(cfg.tilemap_allow_flipped_x);
        assert!(!cfg.tilemap_allow_flipped_y);
        assert!(cfg.tilemap_show_count);
        assert_eq!(cfg.use_virtual_keyboard, 2);
        assert!(cfg.default_mode_layers);
        assert_eq!(cfg.moto_gamma, 30);
    }

    #[test]
    fn a_missing_optional_key_does_not_hide_later_ones() {
        let cfg = parse(&with_tail(
            "  Window_position = 10,20\n  Double_key_speed = 250\n  MOTO_gamma = 22\n",
        ))
        .unwrap();
        assert_eq!(cfg.double_click_speed, 500);
        assert_eq!(cfg.double_key_speed, 250);
        assert_eq!((cfg.window_pos_x, cfg.window_pos_y), (10, 20));
        assert_eq!(cfg.moto_gamma, 22);
    }

    #[test]
    fn optional_keys_are_found_in_any_order() {
        let cfg = parse(&with_tail(
            "\
  MOTO_gamma = 22
  Window_position = 10,20
  Double_click_speed = 300
  Merge_movement = 7
",
        ))
        .unwrap();
        assert_eq!(cfg.moto_gamma, 22);
        assert_eq!((cfg.window_pos_x, cfg.window_pos_y), (10, 20));
        assert_eq!(cfg.double_click_speed, 300);
        assert_eq!(cfg.mouse_merge_movement, 7);
    }

    #[test]
    fn reversed_optional_tail_loads_the_same_values() {
        let tail: String = [
            "  Default_video_mode = 800x600",
            "  Default_window_size = 1280,800",
            "  Palette_cells_X = 32",
            "  Bookmark_label = Sprites",
            "  Bookmark_directory = /home/artist/sprites",
            "  Palette_vertical = no",
            "  Skin_file = skin_classic.png",
            "  Pixel_ratio = 3",
            "  Swap_buttons = 1",
            "  Scripts_directory = /opt/gfx2/scripts",
            "  MOTO_gamma = 30",
        ]
        .iter()
        .rev()
        .map(|line| format!("{line}\n"))
        .collect();

        let cfg = parse(&with_tail(&tail)).unwrap();
        assert_eq!(cfg.default_resolution, 5);
        assert_eq!((cfg.window_width, cfg.window_height), (1280, 800));
        assert_eq!(cfg.palette_cells_x, 32);
        assert_eq!(cfg.bookmarks[0].label, "Sprites");
        assert_eq!(
            cfg.bookmarks[0].directory,
            Some(PathBuf::from("/home/artist/sprites"))
        );
        assert!(!cfg.palette_vertical);
        assert_eq!(cfg.skin_file, "skin_classic.png");
        assert_eq!(cfg.pixel_ratio, PixelRatio::Double);
        assert_eq!(cfg.swap_buttons, SwapModifier::Ctrl);
        assert_eq!(cfg.scripts_directory, PathBuf::from("/opt/gfx2/scripts"));
        assert_eq!(cfg.moto_gamma, 30);
    }

    #[test]
    fn invalid_optional_values_keep_defaults() {
        let cfg = parse(&with_tail(
            "\
  Merge_movement = 5000
  Palette_cells_X = 0
  Palette_cells_Y = many
  Double_click_speed = 0
  Double_key_speed = 100,100
  Use_virtual_keyboard = 3
  MOTO_gamma = 300
",
        ))
        .unwrap();
        assert_eq!(cfg.mouse_merge_movement, 100);
        assert_eq!(cfg.palette_cells_x, 16);
        assert_eq!(cfg.palette_cells_y, 4);
        assert_eq!(cfg.double_click_speed, 500);
        assert_eq!(cfg.double_key_speed, 500);
        assert_eq!(cfg.use_virtual_keyboard, 0);
        assert_eq!(cfg.moto_gamma, 28);
    }

    #[test]
    fn small_window_sizes_are_ignored_per_axis() {
        let cfg = parse(&with_tail("  Default_window_size = 300,600\n")).unwrap();
        assert_eq!((cfg.window_width, cfg.window_height), (640, 600));
    }

    #[test]
    fn pixel_ratio_falls_back_to_simple() {
        let unknown = parse(&with_tail("  Pixel_ratio = 42\n")).unwrap();
        assert_eq!(unknown.pixel_ratio, PixelRatio::Simple);

        // Triple needs 960x600 but the window is 640x480.
        let too_small = parse(&with_tail("  Pixel_ratio = 4\n")).unwrap();
        assert_eq!(too_small.pixel_ratio, PixelRatio::Simple);

        let wide = parse(&with_tail("  Pixel_ratio = 1\n")).unwrap();
        assert_eq!(wide.pixel_ratio, PixelRatio::Wide);
    }

    #[test]
    fn fullscreen_primary_mode_skips_the_window_size() {
        let ctx = ctx().with_video_modes(VideoModes::new(vec![
            VideoMode::fullscreen(320, 240),
            VideoMode::fullscreen(640, 480),
        ]));
        let cfg = parse_with(
            &with_tail("  Default_window_size = 1280,800\n  Pixel_ratio = 1\n"),
            &ctx,
        )
        .unwrap();
        assert_eq!((cfg.window_width, cfg.window_height), (320, 240));
        assert_eq!(cfg.pixel_ratio, PixelRatio::Simple);
    }

    #[test]
    fn unknown_video_mode_label_keeps_mode_zero() {
        let cfg = parse(&with_tail("  Default_video_mode = 123x45\n")).unwrap();
        assert_eq!(cfg.default_resolution, 0);
    }

    #[test]
    fn bookmark_labels_are_truncated_and_limited() {
        let mut tail = String::new();
        for i in 0..6 {
            tail.push_str(&format!(
                "  Bookmark_label = Folder_number_{i}\n  Bookmark_directory = /d{i}\n"
            ));
        }
        let cfg = parse(&with_tail(&tail)).unwrap();
        assert_eq!(cfg.bookmark_count(), 4);
        assert_eq!(cfg.bookmarks[0].label, "Folder_n");
        assert_eq!(cfg.bookmarks[3].directory, Some(PathBuf::from("/d3")));
    }

    #[test]
    fn bookmarks_stop_at_the_first_missing_half() {
        let cfg = parse(&with_tail(
            "  Bookmark_label = Only\n  Palette_vertical = no\n",
        ))
        .unwrap();
        assert_eq!(cfg.bookmarks[0].label, "Only");
        assert_eq!(cfg.bookmarks[0].directory, None);
        assert!(!cfg.palette_vertical);
    }

    // --- File handling ---

    fn write(dir: &Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn user_file_wins_over_defaults() {
        let config_dir = tempfile::tempdir().unwrap();
        let data_dir = tempfile::tempdir().unwrap();
        write(config_dir.path(), INI_FILENAME, &MANDATORY.replace("Undo_pages = 20", "Undo_pages = 7"));
        write(data_dir.path(), INIDEF_FILENAME, MANDATORY);

        let mut cfg = Config::default();
        load(&mut cfg, &LoadContext::new(config_dir.path(), data_dir.path())).unwrap();
        assert_eq!(cfg.max_undo_pages, 7);
    }

    #[test]
    fn defaults_file_is_used_when_user_file_is_absent() {
        let config_dir = tempfile::tempdir().unwrap();
        let data_dir = tempfile::tempdir().unwrap();
        write(data_dir.path(), INIDEF_FILENAME, MANDATORY);

        let mut cfg = Config::default();
        load(&mut cfg, &LoadContext::new(config_dir.path(), data_dir.path())).unwrap();
        assert_eq!(cfg.max_undo_pages, 20);
        assert!(cfg.scripts_directory.starts_with(fs::canonicalize(data_dir.path()).unwrap()));
    }

    #[test]
    fn missing_files_only_touch_the_stylus_mode() {
        let config_dir = tempfile::tempdir().unwrap();
        let data_dir = tempfile::tempdir().unwrap();
        let ctx = LoadContext::new(config_dir.path(), data_dir.path()).with_stylus_mode(true);

        let mut cfg = Config {
            stylus_mode: false,
            max_undo_pages: 42,
            ..Config::default()
        };
        let before = cfg.clone();
        let err = load(&mut cfg, &ctx).unwrap_err();
        assert!(err.is_missing_file());
        assert!(cfg.stylus_mode);
        assert_eq!(Config { stylus_mode: false, ..cfg }, before);
        assert!(matches!(err, IniError::MissingFile { ref tried } if tried.len() == 2));
    }

    #[test]
    fn failed_load_can_fall_back_to_platform_defaults() {
        let config_dir = tempfile::tempdir().unwrap();
        let data_dir = tempfile::tempdir().unwrap();
        let ctx = LoadContext::new(config_dir.path(), data_dir.path())
            .with_video_modes(VideoModes::new(vec![VideoMode::fullscreen(800, 600)]))
            .with_stylus_mode(true);

        let mut cfg = Config {
            max_undo_pages: 42,
            ..Config::default()
        };
        assert!(load_or_defaults(&mut cfg, &ctx).unwrap_err().is_missing_file());
        assert_eq!(cfg, ctx.initial_config());
        assert_eq!(cfg.max_undo_pages, 10);
        assert!(cfg.stylus_mode);
        assert_eq!((cfg.window_width, cfg.window_height), (800, 600));
        assert!(cfg.scripts_directory.is_absolute());
        assert!(cfg.scripts_directory.ends_with("scripts"));
    }

    #[test]
    fn corrupted_file_leaves_the_record_untouched() {
        let config_dir = tempfile::tempdir().unwrap();
        write(
            config_dir.path(),
            INI_FILENAME,
            &MANDATORY.replace("Undo_pages = 20", "Undo_pages = 100"),
        );
        let mut cfg = Config {
            max_undo_pages: 42,
            ..Config::default()
        };
        let before = cfg.clone();
        let err = load(&mut cfg, &LoadContext::new(config_dir.path(), "no-data")).unwrap_err();
        assert!(err.is_corrupted());
        assert_eq!(cfg, before);
    }

    #[test]
    fn bundled_defaults_load() {
        let ctx = LoadContext::new("no-config-here", concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let mut cfg = Config::default();
        load(&mut cfg, &ctx).unwrap();
        assert_eq!(cfg.mouse_sensitivity_x, 1);
        assert_eq!(cfg.max_undo_pages, 10);
        assert_eq!(cfg.skin_file, "skin_modern.png");
    }
}
