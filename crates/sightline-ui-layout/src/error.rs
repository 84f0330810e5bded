//! Configuration errors.

/// Rejected grid configuration.
///
/// These indicate caller misuse and are reported once, when the grid is
/// configured, rather than recovered from at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveAspectRatio { aspect_ratio: f32 },
    InvalidGap { gap: f32 },
    EmptyBreakpoints,
    ZeroColumns { min_width: f32 },
    UnorderedBreakpoints { previous: f32, next: f32 },
    NonMonotonicColumns { min_width: f32, columns: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveAspectRatio { aspect_ratio } => {
                write!(f, "aspect ratio must be finite and positive, got {aspect_ratio}")
            }
            ConfigError::InvalidGap { gap } => {
                write!(f, "gap must be finite and non-negative, got {gap}")
            }
            ConfigError::EmptyBreakpoints => write!(f, "at least one column breakpoint is required"),
            ConfigError::ZeroColumns { min_width } => {
                write!(f, "breakpoint at width {min_width} maps to zero columns")
            }
            ConfigError::UnorderedBreakpoints { previous, next } => write!(
                f,
                "breakpoint widths must be strictly increasing; {next} follows {previous}"
            ),
            ConfigError::NonMonotonicColumns { min_width, columns } => write!(
                f,
                "breakpoint at width {min_width} decreases the column count to {columns}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
