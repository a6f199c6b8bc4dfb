mod initiate_validator_exit;
mod slash_validator;

pub use initiate_validator_exit::{
    compute_activation_exit_epoch, get_validator_churn_limit, initiate_validator_exit,
};
pub use slash_validator::slash_validator;
