mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod landing;
pub use landing::Landing;

mod demo;
pub use demo::{CheckResultView, DemoWidget, LanguageSelect};

mod dashboard;
pub use dashboard::DashboardOverlay;

mod api_keys;
pub use api_keys::ApiKeysPage;

mod plan;
pub use plan::{PlanPanel, PlanTierCards};

mod payment;
pub use payment::PaymentView;

mod oauth_callback;
pub use oauth_callback::OAuthCallbackView;
