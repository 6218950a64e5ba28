use clap::Parser;
use gfx2_config::config::Config;
use gfx2_config::loader::{self, LoadContext};
use gfx2_config::paths;
use std::path::PathBuf;
use std::process::ExitCode;

/// Load and check a GrafX2 configuration file
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding gfx2.ini (default: the per-user config directory)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    config_dir: Option<PathBuf>,

    /// Directory holding gfx2def.ini and the scripts
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    data_dir: Option<PathBuf>,

    /// Start in stylus cursor mode
    #[arg(long)]
    stylus: bool,

    /// Print the loaded settings
    #[arg(short, long)]
    print: bool,

    /// Log what the loader does
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .try_init();
    log::set_max_level(if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });

    let ctx = LoadContext::new(
        cli.config_dir.unwrap_or_else(paths::default_config_dir),
        cli.data_dir.unwrap_or_else(paths::default_data_dir),
    );
    let ctx = if cli.stylus { ctx.with_stylus_mode(true) } else { ctx };

    let mut conf = ctx.initial_config();
    let status = match loader::load_or_defaults(&mut conf, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Failed to load configuration, using defaults: {e}");
            ExitCode::FAILURE
        }
    };

    if cli.print {
        print_config(&conf, &ctx);
    }
    status
}

fn on_off(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn print_config(conf: &Config, ctx: &LoadContext) {
    let light = conf.light_color();
    let dark = conf.dark_color();
    let mode = ctx
        .video_modes
        .get(conf.default_resolution)
        .map_or_else(|| "?".to_string(), |m| m.label());

    println!("[MOUSE]");
    println!("  stylus mode      {}", on_off(conf.stylus_mode));
    println!(
        "  sensitivity      {}x{}",
        conf.mouse_sensitivity_x, conf.mouse_sensitivity_y
    );
    println!("  cursor           {}", conf.cursor.as_str());
    println!("  merge movement   {}", conf.mouse_merge_movement);
    println!("  double click     {} ms", conf.double_click_speed);
    println!("  double key       {} ms", conf.double_key_speed);
    println!("  swap buttons     {}", conf.swap_buttons.as_str());

    println!("[MENU]");
    println!("  light color      #{:02X}{:02X}{:02X}", light.r, light.g, light.b);
    println!("  dark color       #{:02X}{:02X}{:02X}", dark.r, dark.g, dark.b);
    println!("  menu ratio       {}", conf.menu_ratio);
    println!(
        "  menu bars        layers={} tools={}",
        on_off(conf.menu_bars.layers),
        on_off(conf.menu_bars.tools)
    );
    println!("  skin             {}", conf.skin_file);
    println!("  font             {}", conf.font_file);

    println!("[FILE_SELECTOR]");
    println!("  hidden files     {}", on_off(conf.show_hidden_files));
    println!("  hidden dirs      {}", on_off(conf.show_hidden_directories));
    println!("  preview delay    {}", conf.preview_delay);
    println!("  bookmarks        {}", conf.bookmark_count());
    for bookmark in conf.bookmarks.iter().filter(|b| !b.is_empty()) {
        let dir = bookmark
            .directory
            .as_ref()
            .map_or_else(String::new, |d| d.display().to_string());
        println!("    {:<8} {dir}", bookmark.label);
    }

    println!("[DISPLAY]");
    println!("  video mode       {mode}");
    println!("  window           {}x{}", conf.window_width, conf.window_height);
    println!("  window position  {},{}", conf.window_pos_x, conf.window_pos_y);
    println!("  pixel ratio      {}", conf.pixel_ratio.as_str());
    println!(
        "  palette          {}x{}{}",
        conf.palette_cells_x,
        conf.palette_cells_y,
        if conf.palette_vertical { " vertical" } else { "" }
    );

    println!("[MISCELLANEOUS]");
    println!("  undo pages       {}", conf.max_undo_pages);
    println!("  polygon vertices {}", conf.max_polygon_vertices);
    println!("  backup           {}", on_off(conf.backup));
    println!("  auto save        {}", on_off(conf.auto_save));
    println!("  scripts          {}", conf.scripts_directory.display());
    println!("  MO/TO gamma      {}.{}", conf.moto_gamma / 10, conf.moto_gamma % 10);
}
