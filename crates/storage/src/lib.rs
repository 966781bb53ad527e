#![forbid(unsafe_code)]

pub mod repository;
pub mod rest;
pub mod retry;
