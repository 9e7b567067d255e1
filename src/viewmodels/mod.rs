pub mod pagination;
pub mod copy_feedback;
pub mod login_viewmodel;
pub mod dashboard_viewmodel;

pub use pagination::{paginate, PageError, PageSize, PageState, PageView};
pub use copy_feedback::{CopyFeedback, COPY_FEEDBACK_MS};
pub use login_viewmodel::{LoginForm, LoginOutcome, LoginViewModel};
pub use dashboard_viewmodel::{DashboardEffect, DashboardState, DashboardViewModel};
