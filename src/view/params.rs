/// Width/height hint a view is laid out with, in a parent container or in the
/// overlay layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizePolicy {
    /// Take all the space the parent offers on this axis.
    Fill,
    /// Size to the content.
    #[default]
    Wrap,
    /// Exact size in pixels.
    Fixed(f32),
}

/// Layout parameters a view holds inside its parent container.
///
/// The float machinery only forwards these: they are captured when a view
/// starts floating and restored verbatim when it returns to its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutParams {
    pub width: SizePolicy,
    pub height: SizePolicy,
}

impl LayoutParams {
    pub fn fixed(width: f32, height: f32) -> Self {
        Self {
            width: SizePolicy::Fixed(width),
            height: SizePolicy::Fixed(height),
        }
    }
}
