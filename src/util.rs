// Small browser helpers

/// Wall clock in milliseconds, the time base for entity interpolation.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn window_size() -> Option<(f64, f64)> {
    let win = web_sys::window()?;
    let w = win.inner_width().ok()?.as_f64()?;
    let h = win.inner_height().ok()?.as_f64()?;
    Some((w, h))
}
