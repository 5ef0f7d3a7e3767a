use crate::ValueError;

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(ValueError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValueError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parses an optional input, treating `None` and blank text alike as absent.
    pub fn optional(input: Option<impl AsRef<str>>) -> Option<Self> {
        input.and_then(|s| Self::new(s).ok())
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  Ibuprofen \n").unwrap();
        assert_eq!(text.as_str(), "Ibuprofen");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(NonEmptyText::new("   "), Err(ValueError::Empty));
        assert_eq!(NonEmptyText::new(""), Err(ValueError::Empty));
    }

    #[test]
    fn optional_treats_blank_as_absent() {
        assert!(NonEmptyText::optional(Some("  ")).is_none());
        assert!(NonEmptyText::optional(None::<&str>).is_none());
        assert_eq!(
            NonEmptyText::optional(Some("Aspirin")).map(NonEmptyText::into_string),
            Some("Aspirin".to_string())
        );
    }
}
