//! Column count as a step function of width.

use crate::ConfigError;
use smallvec::SmallVec;

/// Width at which the default layout switches from one to three columns.
pub const DEFAULT_WIDE_BREAKPOINT: f32 = 768.0;

/// One step of the column function: from `min_width` upwards use `columns`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnStep {
    pub min_width: f32,
    pub columns: usize,
}

impl ColumnStep {
    pub const fn new(min_width: f32, columns: usize) -> Self {
        Self { min_width, columns }
    }
}

/// Which measured width the breakpoints are evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BreakpointBasis {
    /// The host window width, like a CSS media query.
    #[default]
    Window,
    /// The grid container's own content width, like a container query.
    Container,
}

/// Ordered `(min_width -> columns)` pairs.
///
/// The last step whose `min_width` is at or below the queried width wins.
/// Widths below the first step still use the first step's column count, so
/// the function is total.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnBreakpoints {
    steps: SmallVec<[ColumnStep; 4]>,
}

impl Default for ColumnBreakpoints {
    fn default() -> Self {
        Self::from_steps([
            ColumnStep::new(0.0, 1),
            ColumnStep::new(DEFAULT_WIDE_BREAKPOINT, 3),
        ])
    }
}

impl ColumnBreakpoints {
    /// Creates breakpoints from steps without validating them.
    ///
    /// Use [`ColumnBreakpoints::validate`] (or [`crate::GridConfig::validate`])
    /// before handing them to a grid.
    pub fn from_steps(steps: impl IntoIterator<Item = ColumnStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// A fixed column count regardless of width.
    pub fn fixed(columns: usize) -> Self {
        Self::from_steps([ColumnStep::new(0.0, columns)])
    }

    pub fn steps(&self) -> &[ColumnStep] {
        &self.steps
    }

    /// Returns the column count for the given width.
    pub fn columns_for(&self, width: f32) -> usize {
        let Some(first) = self.steps.first() else {
            return 1;
        };
        if !width.is_finite() {
            return first.columns;
        }
        self.steps
            .iter()
            .take_while(|step| width >= step.min_width)
            .last()
            .unwrap_or(first)
            .columns
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::EmptyBreakpoints);
        }
        for step in &self.steps {
            if step.columns == 0 {
                return Err(ConfigError::ZeroColumns {
                    min_width: step.min_width,
                });
            }
        }
        for pair in self.steps.windows(2) {
            let (previous, next) = (pair[0], pair[1]);
            // NaN thresholds fail this comparison too
            if !(next.min_width > previous.min_width) {
                return Err(ConfigError::UnorderedBreakpoints {
                    previous: previous.min_width,
                    next: next.min_width,
                });
            }
            if next.columns < previous.columns {
                return Err(ConfigError::NonMonotonicColumns {
                    min_width: next.min_width,
                    columns: next.columns,
                });
            }
        }
        Ok(())
    }
}
