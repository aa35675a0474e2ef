#![allow(dead_code)]

pub mod mock_backend;
pub mod riskdesk_env;
