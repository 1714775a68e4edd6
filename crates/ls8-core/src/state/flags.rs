use std::cmp::Ordering;

/// Condition code. At most one of less-than, greater-than or equal holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Flags {
    /// No comparison has executed yet.
    #[default]
    None,
    /// `L`: register A was less than register B.
    LessThan,
    /// `G`: register A was greater than register B.
    GreaterThan,
    /// `E`: the registers were equal.
    Equal,
}

impl Flags {
    /// Result of comparing `a` against `b`. Equality is tested first.
    #[must_use]
    pub fn compare(a: u8, b: u8) -> Self {
        match a.cmp(&b) {
            Ordering::Equal => Self::Equal,
            Ordering::Less => Self::LessThan,
            Ordering::Greater => Self::GreaterThan,
        }
    }

    /// Architectural `00000LGE` bit pattern of this state.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::None => 0b0000_0000,
            Self::LessThan => 0b0000_0100,
            Self::GreaterThan => 0b0000_0010,
            Self::Equal => 0b0000_0001,
        }
    }
}

/// Jump predicates over [`Flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// `JMP`.
    Always,
    /// `JEQ`.
    Equal,
    /// `JNE`: taken whenever the equal flag is clear, including before any `CMP`.
    NotEqual,
    /// `JGT`.
    Greater,
    /// `JGE`.
    GreaterOrEqual,
    /// `JLT`.
    Less,
    /// `JLE`.
    LessOrEqual,
}

impl Condition {
    /// Returns `true` when a jump guarded by this condition is taken.
    #[must_use]
    pub const fn holds(self, flags: Flags) -> bool {
        match self {
            Self::Always => true,
            Self::Equal => matches!(flags, Flags::Equal),
            Self::NotEqual => !matches!(flags, Flags::Equal),
            Self::Greater => matches!(flags, Flags::GreaterThan),
            Self::GreaterOrEqual => matches!(flags, Flags::GreaterThan | Flags::Equal),
            Self::Less => matches!(flags, Flags::LessThan),
            Self::LessOrEqual => matches!(flags, Flags::LessThan | Flags::Equal),
        }
    }
}
