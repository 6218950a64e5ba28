// --- Video modes known to the display layer ---
//
// The loader only needs two things from the display: the size of the first
// mode (to size the window and to check the pixel ratio) and a way to turn a
// `Default_video_mode` label back into a mode index.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoMode {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl VideoMode {
    pub const fn windowed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fullscreen: false,
        }
    }

    pub const fn fullscreen(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fullscreen: true,
        }
    }

    /// Label used in the INI file: `window` or `WIDTHxHEIGHT`.
    pub fn label(&self) -> String {
        if self.fullscreen {
            format!("{}x{}", self.width, self.height)
        } else {
            "window".to_string()
        }
    }
}

const STANDARD_FULLSCREEN: [(u32, u32); 9] = [
    (320, 200),
    (320, 240),
    (640, 400),
    (640, 480),
    (800, 600),
    (1024, 768),
    (1280, 1024),
    (1600, 1200),
    (1920, 1080),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoModes {
    modes: Vec<VideoMode>,
}

impl Default for VideoModes {
    fn default() -> Self {
        Self::standard()
    }
}

impl VideoModes {
    /// `modes[0]` is the primary mode. An empty list gets a 640x480 window.
    pub fn new(mut modes: Vec<VideoMode>) -> Self {
        if modes.is_empty() {
            modes.push(VideoMode::windowed(640, 480));
        }
        Self { modes }
    }

    /// A window followed by the usual fullscreen resolutions.
    pub fn standard() -> Self {
        let mut modes = vec![VideoMode::windowed(640, 480)];
        modes.extend(
            STANDARD_FULLSCREEN
                .iter()
                .map(|&(w, h)| VideoMode::fullscreen(w, h)),
        );
        Self { modes }
    }

    #[inline(always)]
    pub fn primary(&self) -> VideoMode {
        self.modes[0]
    }

    pub fn get(&self, index: usize) -> Option<VideoMode> {
        self.modes.get(index).copied()
    }

    /// Resolve a `Default_video_mode` label to a mode index.
    ///
    /// `window` names the first windowed mode; `WxH` the first fullscreen
    /// mode of that size. Blanks and case are ignored.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        let wanted: String = label
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        if wanted == "window" {
            return self.modes.iter().position(|m| !m.fullscreen);
        }

        let (w, h) = wanted.split_once('x')?;
        let (width, height) = (w.parse::<u32>().ok()?, h.parse::<u32>().ok()?);
        self.modes
            .iter()
            .position(|m| m.fullscreen && m.width == width && m.height == height)
    }
}
