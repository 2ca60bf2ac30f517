use crate::protocol::BackendAction;
use crate::validation::{validate_rating, MAX_RATING};

/// Star rating and comment composed in the feedback panel
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeedbackForm {
    /// 0 means no star selected yet
    pub rating: u8,
    pub comment: String,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clicking star `n` activates stars 1..=n.
    pub fn select_star(&mut self, star: u8) {
        self.rating = star.min(MAX_RATING);
    }

    pub fn is_star_active(&self, star: u8) -> bool {
        star >= 1 && star <= self.rating
    }

    /// Build the submit action and clear the form, or explain why not.
    pub fn submit(&mut self) -> Result<BackendAction, String> {
        let rating = validate_rating(self.rating)?;
        let action = BackendAction::SubmitFeedback {
            rating,
            comment: self.comment.trim().to_string(),
        };
        self.reset();
        Ok(action)
    }

    pub fn reset(&mut self) {
        self.rating = 0;
        self.comment.clear();
    }
}
