/// Brightness factor (0.0 - 1.0) for the prize reveal banner.
/// Fades in over the first few ticks, then breathes slowly.
pub fn reveal_intensity(ticks_since_reveal: u64) -> f32 {
    const FADE_TICKS: u64 = 8;
    const PERIOD: u64 = 40;

    if ticks_since_reveal < FADE_TICKS {
        return ticks_since_reveal as f32 / FADE_TICKS as f32;
    }
    let phase = (ticks_since_reveal % PERIOD) as f32 / PERIOD as f32;
    // 0.75 - 1.0 breathing band
    0.875 + 0.125 * (phase * std::f32::consts::TAU).cos()
}

/// Whether the banner is in the bright half of its pulse
pub fn is_bright(ticks_since_reveal: u64) -> bool {
    reveal_intensity(ticks_since_reveal) >= 0.875
}
