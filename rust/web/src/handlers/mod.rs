pub mod dealer;
pub mod spec;

pub use dealer::{deal_hand, deal_hands, HandReply};
pub use spec::{openapi_json, openapi_yaml};
