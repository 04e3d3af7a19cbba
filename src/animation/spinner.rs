/// Braille dot frames shown on the spin button while the wheel turns
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Current spinner frame for the given tick count
pub fn spinner_frame(tick_count: u64) -> char {
    let idx = (tick_count / 2) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}

/// Pointer glyph frames: the indicator "ticks" as segments pass under it
const POINTER_FRAMES: &[&str] = &["▼", "▾"];

/// Pointer glyph for the segment boundary count crossed so far
pub fn pointer_frame(boundaries_crossed: u64) -> &'static str {
    POINTER_FRAMES[(boundaries_crossed % POINTER_FRAMES.len() as u64) as usize]
}
