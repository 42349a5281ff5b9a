use unicode_width::UnicodeWidthStr;

/// Fixed font and shape metrics used by the renderer. Text widths are
/// estimated from display cell counts, so CJK labels size correctly.
pub struct TextMetrics {
    pub char_width: f64,
    pub label_font_size: f64,
    pub label_font_size_hovered: f64,
    pub label_offset_y: f64,
    pub node_radius: f64,
    pub node_radius_hovered: f64,
    pub legend_font_size: f64,
    pub legend_row_height: f64,
    pub legend_padding: f64,
    pub legend_swatch: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            label_font_size: 12.0,
            label_font_size_hovered: 13.0,
            label_offset_y: 14.0,
            node_radius: 6.0,
            node_radius_hovered: 8.0,
            legend_font_size: 11.0,
            legend_row_height: 18.0,
            legend_padding: 10.0,
            legend_swatch: 10.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Size of the legend box for the given entry labels.
    pub fn legend_size(&self, labels: &[&str]) -> (f64, f64) {
        let max_label = labels
            .iter()
            .map(|l| self.text_width(l))
            .fold(0.0, f64::max);
        let width = self.legend_padding * 2.0 + self.legend_swatch + 6.0 + max_label;
        let height = self.legend_padding * 2.0 + labels.len() as f64 * self.legend_row_height;
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("users"), 5.0 * 7.0);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // 全角文字は幅2
        assert_eq!(m.text_width("ユーザー"), 8.0 * 7.0);
    }

    #[test]
    fn test_legend_size_grows_with_rows() {
        let m = TextMetrics::default();
        let (w1, h1) = m.legend_size(&["Table"]);
        let (w2, h2) = m.legend_size(&["Table", "ETL Task"]);
        assert!(w2 >= w1);
        assert!(h2 > h1);
    }
}
