pub mod app;
pub mod cli;
pub mod command;
pub mod datetime;
pub mod display;
pub mod executor;
pub mod model;
pub mod parser;
pub mod storage;
pub mod task_list;

pub use app::{Reply, Session, run};
