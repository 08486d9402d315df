pub mod dealer;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod spec;

pub use dealer::{DealerError, DeckManager};
pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::init_logging;
pub use middleware::{accepts_json, require_json, with_request_logging};
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use spec::{ApiSpec, SpecError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_provides_shared_components() {
        let ctx = AppContext::new_for_tests();

        assert_eq!(ctx.deck().remaining().expect("deck state"), 52);
        assert!(ctx.spec().to_json().is_ok());
    }
}
