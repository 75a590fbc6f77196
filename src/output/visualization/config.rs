//! Plot configuration shared across visualization modules
//!
//! This module defines common configuration structures used by both
//! fit-overlay and convergence plotting functions.

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// Used by both fit-overlay (data vs. model) and convergence (loss
/// trace) plots.
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `line_color`: Line color for single-series plots
/// - `series_colors`: Optional colors for multi-series plots (one per series)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example: Single Series
///
/// ```rust,ignore
/// use kinfit_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::default();
/// config.title = "Glucose Decay".to_string();
/// config.line_color = RED;
/// config.width = 1920;  // Full HD
/// config.height = 1080;
/// ```
///
/// # Example: Multi-Series with Custom Colors
///
/// ```rust,ignore
/// let mut config = PlotConfig::default();
/// config.title = "Three Initial Concentrations".to_string();
/// config.series_colors = Some(vec![
///     RED,
///     BLUE,
///     GREEN,
/// ]);
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: "Concentration (g/L)")
    pub ylabel: String,

    /// Line color for single-series plots (default: RED)
    pub line_color: RGBColor,

    /// Optional colors for multi-series plots (one per series)
    ///
    /// If None, uses default palette: [RED, BLUE, GREEN, MAGENTA, CYAN, ...]
    /// If Some, must have at least as many colors as series
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),  // Set by specific plot type
            ylabel: "Concentration (g/L)".to_string(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust,ignore
/// let config = PlotConfig::fit_overlay(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create config for fit-overlay plots with optional custom title
    ///
    /// Sets xlabel to "Time" and title to custom value or "Fit Overlay"
    ///
    /// # Arguments
    ///
    /// * `title` - Custom title (String, &str) or None for default
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // With custom title (no Some() needed!)
    /// let config = PlotConfig::fit_overlay("Glucose Decay Fit");
    /// let config = PlotConfig::fit_overlay(format!("Fit: {}", model));
    ///
    /// // With default title
    /// let config = PlotConfig::fit_overlay(None::<&str>);
    /// ```
    pub fn fit_overlay(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.xlabel = "Time".to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Fit Overlay".to_string());
        config
    }

    /// Create config for convergence plots with optional custom title
    ///
    /// Sets xlabel to "Iteration", ylabel to "Loss (MSE)" and title to
    /// custom value or "Convergence"
    ///
    /// # Arguments
    ///
    /// * `title` - Custom title (String, &str) or None for default
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // With custom title (no Some() needed!)
    /// let config = PlotConfig::convergence("Mini-Batch Descent");
    /// let config = PlotConfig::convergence(format!("Loss, seed {}", seed));
    ///
    /// // With default title
    /// let config = PlotConfig::convergence(None::<&str>);
    /// ```
    pub fn convergence(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.xlabel = "Iteration".to_string();
        config.ylabel = "Loss (MSE)".to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Convergence".to_string());
        config
    }

    /// Create config for multi-series plots with custom colors
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use plotters::prelude::*;
    ///
    /// let config = PlotConfig::multi_series_colors(vec![RED, BLUE, GREEN]);
    /// ```
    pub fn multi_series_colors(colors: Vec<RGBColor>) -> Self {
        let mut config = Self::default();
        config.series_colors = Some(colors);
        config
    }

    /// Get color for series at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_series_color(&self, series_index: usize) -> RGBColor {
        if let Some(ref colors) = self.series_colors {
            if series_index < colors.len() {
                return colors[series_index];
            }
        }

        // Default palette
        let default_colors = vec![
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),  // Orange
            RGBColor(128, 0, 128),   // Purple
            RGBColor(255, 192, 203), // Pink
            RGBColor(165, 42, 42),   // Brown
        ];

        default_colors[series_index % default_colors.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
