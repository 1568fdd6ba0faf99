pub mod dto;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod utils;
