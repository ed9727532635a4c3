#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/basic_merge.rs"]
mod basic_merge;

#[path = "integration/split_pages.rs"]
mod split_pages;

#[path = "integration/session_flow.rs"]
mod session_flow;

#[path = "integration/error_cases.rs"]
mod error_cases;
