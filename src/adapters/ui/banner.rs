//! ASCII banner (REGDESK) with a vertical color gradient.

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::ExecutableCommand;
use figlet_rs::FIGfont;
use std::io::{stdout, Write};

/// Deep blue (#1a4fd6).
const INK_BLUE: (u8, u8, u8) = (0x1a, 0x4f, 0xd6);
/// Warm amber (#f5a623).
const AMBER: (u8, u8, u8) = (0xf5, 0xa6, 0x23);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "REGDESK" in figlet with a blue-to-amber
/// gradient, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let Some(art) = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("REGDESK").map(|figure| figure.to_string()))
    else {
        let _ = out.execute(Print("REGDESK\r\n"));
        return;
    };
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(INK_BLUE, AMBER, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(Print(format!("v{} college registration desk\r\n", version)));
    let _ = out.flush();
}
