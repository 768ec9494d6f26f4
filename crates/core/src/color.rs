use indexmap::IndexMap;

/// Fill and text colors, each a CSS color string (named or hex).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPair {
    pub fill: String,
    pub text: String,
}

/// Category colors for one render pass: seeded from an optional color
/// table, extended as unmapped keys are first drawn.
#[derive(Debug, Default)]
pub struct ColorScheme {
    table: IndexMap<String, ColorPair>,
    cursor: u32,
}

impl ColorScheme {
    pub fn new() -> ColorScheme {
        ColorScheme::default()
    }

    pub fn with_table(table: IndexMap<String, ColorPair>) -> ColorScheme {
        ColorScheme { table, cursor: 0 }
    }

    /// Nearest color for `key` or for an enclosing key on the stack,
    /// checked innermost first.
    ///
    /// An unmapped non-empty key is assigned the next generated pair
    /// and remembered, so it resolves identically for the rest of the
    /// run and descendants inherit it. Empty or missing keys get a
    /// one-off pair that is not remembered.
    pub fn resolve(&mut self, key: Option<&str>, stack: &[String]) -> ColorPair {
        if let Some(key) = key {
            if let Some(pair) = self.table.get(key) {
                return pair.clone();
            }
        }
        for enclosing in stack.iter().rev() {
            if let Some(pair) = self.table.get(enclosing) {
                return pair.clone();
            }
        }
        let pair = self.next_color();
        if let Some(key) = key.filter(|key| !key.is_empty()) {
            self.table.insert(key.to_owned(), pair.clone());
        }
        pair
    }

    /// Next pair from the palette. Hues advance by the golden angle so
    /// consecutive colors land far apart, lightness cycles through
    /// three steps, and the text color is black or white by luminance.
    fn next_color(&mut self) -> ColorPair {
        let step = self.cursor;
        self.cursor += 1;
        let hue = (f64::from(step) * 137.508) % 360.0;
        let lightness = [0.62, 0.45, 0.74][(step % 3) as usize];
        let (r, g, b) = hsl_to_rgb(hue, 0.6, lightness);
        let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
        let text = if luma > 150.0 { "black" } else { "white" };
        ColorPair {
            fill: format!("#{r:02x}{g:02x}{b:02x}"),
            text: text.to_owned(),
        }
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (x, 0.0, c),
        4 => (0.0, x, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
