//! Form validation for the add and edit pages.
//!
//! Each `validate_*` function either yields the cleaned input or the list of
//! field errors to render next to the offending inputs.

use crate::models::{AddRequest, EditRequest, MoviePatch};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;
pub const MAX_REVIEW_LEN: usize = 250;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError { field, message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: &str) -> impl Iterator<Item = &str> {
        self.0.iter().filter(move |e| e.field == field).map(|e| e.message.as_str())
    }

    #[cfg(test)]
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Returns the trimmed search title.
pub fn validate_add(req: &AddRequest) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::default();
    let title = req.title.trim();
    if title.is_empty() {
        errors.push("title", "This field is required.");
    }
    errors.into_result(title.to_string())
}

pub fn validate_edit(req: &EditRequest) -> Result<MoviePatch, FieldErrors> {
    let mut errors = FieldErrors::default();

    let rating = match parse_rating(&req.rating) {
        Ok(rating) => Some(rating),
        Err(message) => {
            errors.push("rating", message);
            None
        },
    };

    let review = req.review.trim();
    if review.is_empty() {
        errors.push("review", "This field is required.");
    } else if review.chars().count() > MAX_REVIEW_LEN {
        errors.push("review", format!("Field cannot be longer than {MAX_REVIEW_LEN} characters."));
    }

    errors.into_result(MoviePatch { rating, review: Some(review.to_string()) })
}

fn parse_rating(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("This field is required.".to_string());
    }
    let rating: f64 = raw.parse().map_err(|_| "Not a valid decimal value.".to_string())?;
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(format!("Number must be between {MIN_RATING:.1} and {MAX_RATING:.1}."));
    }
    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(rating: &str, review: &str) -> EditRequest {
        EditRequest {
            rating: rating.to_string(),
            review: review.to_string(),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn add_requires_a_title() {
        let req = AddRequest { title: "   ".to_string(), csrf_token: String::new() };
        let errors = validate_add(&req).unwrap_err();
        assert_eq!(errors.fields(), vec!["title"]);
    }

    #[test]
    fn add_trims_the_title() {
        let req = AddRequest { title: "  Inception ".to_string(), csrf_token: String::new() };
        assert_eq!(validate_add(&req).unwrap(), "Inception");
    }

    #[test]
    fn edit_accepts_bounds_inclusive() {
        assert_eq!(validate_edit(&edit("0", "meh")).unwrap().rating, Some(0.0));
        assert_eq!(validate_edit(&edit("10", "wow")).unwrap().rating, Some(10.0));
        assert_eq!(validate_edit(&edit(" 7.5 ", "fine")).unwrap().rating, Some(7.5));
    }

    #[test]
    fn edit_rejects_out_of_range_ratings() {
        for raw in ["11", "-1", "10.01", "NaN", "inf"] {
            let errors = validate_edit(&edit(raw, "ok")).unwrap_err();
            assert_eq!(errors.fields(), vec!["rating"], "rating {raw:?}");
        }
    }

    #[test]
    fn edit_rejects_missing_or_non_numeric_rating() {
        let errors = validate_edit(&edit("", "ok")).unwrap_err();
        assert_eq!(errors.for_field("rating").collect::<Vec<_>>(), vec!["This field is required."]);

        let errors = validate_edit(&edit("nine", "ok")).unwrap_err();
        assert_eq!(
            errors.for_field("rating").collect::<Vec<_>>(),
            vec!["Not a valid decimal value."]
        );
    }

    #[test]
    fn edit_rejects_empty_or_long_review() {
        let errors = validate_edit(&edit("5", "  ")).unwrap_err();
        assert_eq!(errors.fields(), vec!["review"]);

        let long = "a".repeat(MAX_REVIEW_LEN + 1);
        assert!(validate_edit(&edit("5", &long)).is_err());
        assert!(validate_edit(&edit("5", &"a".repeat(MAX_REVIEW_LEN))).is_ok());
    }

    #[test]
    fn edit_reports_every_bad_field() {
        let errors = validate_edit(&edit("12", "")).unwrap_err();
        assert_eq!(errors.fields(), vec!["rating", "review"]);
    }

    #[test]
    fn valid_edit_builds_a_patch() {
        let patch = validate_edit(&edit("9.0", " Mind-bending ")).unwrap();
        assert_eq!(
            patch,
            MoviePatch { rating: Some(9.0), review: Some("Mind-bending".to_string()) }
        );
    }
}
