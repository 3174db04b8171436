use plotters::style::RGBAColor;

/// Chart theme configuration
#[derive(Clone, Debug)]
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    /// Fill for single-series bar charts
    pub bar_color: RGBAColor,
    pub additions_color: RGBAColor,
    pub dropoffs_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(13, 13, 13, 1.0),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            bar_color: RGBAColor(66, 165, 245, 0.8),
            additions_color: RGBAColor(0, 255, 0, 0.6),
            dropoffs_color: RGBAColor(255, 0, 0, 0.6),
        }
    }
}

/// Chart style configuration
#[derive(Clone, Debug)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub font_size: u32,
    pub caption_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            line_width: 2,
            font_size: 15,
            caption_size: 30,
            margin: 10,
            label_area_size: 50,
        }
    }
}
