pub mod forward_client;
pub mod forward_method;
