#![allow(dead_code)]

pub mod stub_backend;
pub mod test_utils;
