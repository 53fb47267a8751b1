pub mod config;
pub mod export;
pub mod extract;
pub mod http_client;
pub mod replay_fetch;
pub mod run;
