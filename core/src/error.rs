use core::fmt;

/// Static configuration rejected before a match starts.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    GridSizeOutOfRange { size: u32, min: u32, max: u32 },
    NpcCountOutOfRange { count: u32, min: u32, max: u32 },
    ZeroDuration,
    InvalidColor { text: String },
    ProbabilityOutOfRange { field: &'static str, value: f64 },
    NonPositiveCheatValue { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridSizeOutOfRange { size, min, max } => {
                write!(f, "grid size {size} out of range (allowed {min}..={max})")
            }
            Self::NpcCountOutOfRange { count, min, max } => {
                write!(f, "npc count {count} out of range (allowed {min}..={max})")
            }
            Self::ZeroDuration => write!(f, "match duration must be at least one second"),
            Self::InvalidColor { text } => {
                write!(f, "invalid colour {text:?}: expected #RRGGBB")
            }
            Self::ProbabilityOutOfRange { field, value } => {
                write!(f, "{field} must be a probability in [0, 1], got {value}")
            }
            Self::NonPositiveCheatValue { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
