/// Controls whether values appended to a [`Handle`](crate::Handle) are separated by spaces.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spacing {
    /// Insert a single space before every value except the first.
    #[default]
    Pad,
    /// Concatenate values exactly as rendered.
    AsIs,
}

impl Spacing {
    /// Reports whether the mode inserts a separating space between values.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Spacing;
    ///
    /// assert!(Spacing::Pad.pads());
    /// assert!(!Spacing::AsIs.pads());
    /// ```
    #[must_use]
    pub const fn pads(self) -> bool {
        matches!(self, Self::Pad)
    }
}

impl From<bool> for Spacing {
    /// Converts a "pad values" flag into a [`Spacing`].
    ///
    /// `true` maps to [`Spacing::Pad`] while `false` selects [`Spacing::AsIs`].
    fn from(pad: bool) -> Self {
        if pad { Self::Pad } else { Self::AsIs }
    }
}

impl From<Spacing> for bool {
    fn from(spacing: Spacing) -> Self {
        spacing.pads()
    }
}

#[cfg(test)]
mod tests;
