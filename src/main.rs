// SPDX-License-Identifier: MIT
//
// glyphdesk — a mouse-driven desktop in the terminal.
//
// This binary wires the two crates together:
//
//   glyph-term   → raw mode, SGR mouse decoding, screen buffer, frame loop
//   glyph-window → windows and the desktop that stacks them
//
// The Desktop implements glyph-term's App trait. Each tick:
//
//   stdin → mouse decoder → Desktop::update → window drag/resize/close
//   Desktop::paint → screen buffer → one write → terminal
//
// Drag windows by the title bar, resize from the `#` corner, close with
// `[█]`, quit with `q`.
//
// Logging goes nowhere by default: stderr is the screen. Set
// GLYPHDESK_LOG_FILE to capture it (RUST_LOG picks the level).

use std::env;
use std::fs::File;
use std::path::Path;
use std::process;

use glyph_term::color::{Attr, CellColor};
use glyph_term::session::{Session, SessionConfig};
use glyph_term::style::Style;
use glyph_window::{Desktop, Window};

const USAGE: &str = "usage: glyphdesk [--fps <n>]";

// ─── Arguments ──────────────────────────────────────────────────────────────

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    fps: Option<u32>,
    help: bool,
}

/// Parse `--fps <n>`, `--fps=<n>`, and `-h`/`--help`.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let fps = match arg.as_str() {
            "-h" | "--help" => {
                opts.help = true;
                continue;
            }
            "--fps" => args.next().ok_or("--fps needs a value")?,
            other => match other.strip_prefix("--fps=") {
                Some(value) => value.to_owned(),
                None => return Err(format!("unexpected argument '{other}'")),
            },
        };
        let fps: u32 = fps.parse().map_err(|_| format!("invalid --fps value '{fps}'"))?;
        if fps == 0 {
            return Err("--fps must be at least 1".to_owned());
        }
        opts.fps = Some(fps);
    }

    Ok(opts)
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Default filter `warn`, overridable with `RUST_LOG`. Output goes to
/// `GLYPHDESK_LOG_FILE` when set; otherwise only `warn` and worse reach
/// stderr, and by then the session has usually restored the screen.
fn init_logging() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = env::var_os("GLYPHDESK_LOG_FILE") {
        match File::create(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("glyphdesk: cannot open log file {}: {e}", Path::new(&path).display());
            }
        }
    }

    builder.init();
}

// ─── Demo Desktop ───────────────────────────────────────────────────────────

fn build_desktop() -> Desktop {
    let mut desktop = Desktop::new();
    desktop.set_pointer_style(Style::from_colors(CellColor::BRIGHT_RED, CellColor::Default, Attr::BOLD));

    desktop.add_window(Window::new(3, 2, 34, 11, "Welcome"));

    let mut glyphs = Window::new(40, 4, 30, 9, "Glyphs");
    glyphs.set_content([
        "╔═╗ ╭─╮ ┏━┓  boxes",
        "╚═╝ ╰─╯ ┗━┛",
        "░▒▓█  shades",
        "αβγδ ÄÖÜ ñç  latin & greek",
        "→ ← ↑ ↓  arrows",
        "♠ ♣ ♥ ♦  suits",
        "one cell per code point, always",
        "scroll: arrows, track, or thumb",
        "…",
        "end of list",
    ]);
    desktop.add_window(glyphs);

    let mut help = Window::new(12, 14, 40, 8, "Help");
    help.set_content([
        "Drag the title bar to move.",
        "Drag # in the corner to resize.",
        "Click [█] to close.",
        "Press q to quit.",
    ]);
    desktop.add_window(help);

    desktop
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let opts = parse_args(env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("glyphdesk: {e}\n{USAGE}");
        process::exit(2);
    });
    if opts.help {
        println!("{USAGE}");
        return;
    }

    init_logging();

    let config = opts.fps.map_or_else(SessionConfig::default, SessionConfig::with_fps);
    let mut session = Session::new(config);
    let mut desktop = build_desktop();

    match session.run(&mut desktop) {
        Ok(exit) => log::debug!("exited via {exit:?}"),
        Err(e) => {
            eprintln!("glyphdesk: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn no_args_is_default() {
        assert_eq!(parse_args(args(&[])).unwrap(), Options::default());
    }

    #[test]
    fn fps_both_spellings() {
        assert_eq!(parse_args(args(&["--fps", "30"])).unwrap().fps, Some(30));
        assert_eq!(parse_args(args(&["--fps=120"])).unwrap().fps, Some(120));
    }

    #[test]
    fn fps_errors() {
        assert!(parse_args(args(&["--fps"])).is_err());
        assert!(parse_args(args(&["--fps", "fast"])).is_err());
        assert!(parse_args(args(&["--fps=0"])).is_err());
        assert!(parse_args(args(&["--fps", "-5"])).is_err());
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let err = parse_args(args(&["--frobnicate"])).unwrap_err();
        assert!(err.contains("--frobnicate"));
    }

    #[test]
    fn help_flag() {
        assert!(parse_args(args(&["-h"])).unwrap().help);
        assert!(parse_args(args(&["--help"])).unwrap().help);
    }

    #[test]
    fn demo_desktop_layout() {
        let desktop = build_desktop();
        let titles: Vec<&str> = desktop.windows().iter().map(Window::title).collect();
        assert_eq!(titles, ["Welcome", "Glyphs", "Help"]);
        assert!(desktop.windows().iter().all(Window::is_visible));
        assert_eq!(desktop.windows()[1].content().len(), 10);
    }
}
