pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_amount, prompt_category, prompt_food, prompt_session_action, prompt_yes_no,
    suggest_food_names, SessionAction,
};
pub use render::{
    display_categories, display_conversion, display_food_list, format_conversion,
    INVALID_AMOUNT_MESSAGE,
};
