//! Draft record for creation forms

/// A record being drafted, reset to `T::default()` after use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewModel<T> {
    draft: T,
}

impl<T: Default> NewModel<T> {
    /// Empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft
    #[must_use]
    pub const fn draft(&self) -> &T {
        &self.draft
    }

    /// Replace the draft
    pub fn set_draft(&mut self, draft: T) {
        self.draft = draft;
    }

    /// Edit the draft in place
    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.draft);
    }

    /// Reset to an empty draft
    pub fn reset(&mut self) {
        self.draft = T::default();
    }

    /// Take the draft out, leaving an empty one behind
    pub fn take(&mut self) -> T {
        std::mem::take(&mut self.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Draft {
        name: String,
        tech: Vec<String>,
    }

    #[test]
    fn edit_then_reset() {
        let mut new_model = NewModel::<Draft>::new();
        new_model.edit(|draft| {
            draft.name = "Hub".to_string();
            draft.tech.push("rust".to_string());
        });
        assert_eq!(new_model.draft().name, "Hub");

        new_model.reset();
        assert_eq!(new_model.draft(), &Draft::default());
    }

    #[test]
    fn take_leaves_empty_draft() {
        let mut new_model = NewModel::<Draft>::new();
        new_model.set_draft(Draft {
            name: "Hub".to_string(),
            tech: vec![],
        });

        let taken = new_model.take();
        assert_eq!(taken.name, "Hub");
        assert_eq!(new_model.draft(), &Draft::default());
    }
}
