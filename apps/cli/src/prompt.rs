//! Interactive rating prompts.

use color_eyre::eyre::Result;
use dialoguer::Input;

use glean_shared::{MAX_RATING, MIN_RATING, RatingRange};

/// Ask for both rating bounds until a valid range is entered.
pub(crate) fn prompt_rating_range() -> Result<RatingRange> {
    let min = prompt_rating("Enter minimum rating (0-10)")?;
    let max = prompt_rating("Enter maximum rating (0-10)")?;
    Ok(RatingRange::new(min, max)?)
}

fn prompt_rating(label: &str) -> Result<f64> {
    let value = Input::<f64>::new()
        .with_prompt(label)
        .validate_with(|v: &f64| -> std::result::Result<(), String> {
            if (MIN_RATING..=MAX_RATING).contains(v) {
                Ok(())
            } else {
                Err(format!("Ratings must be between {MIN_RATING} and {MAX_RATING}."))
            }
        })
        .interact_text()?;
    Ok(value)
}
