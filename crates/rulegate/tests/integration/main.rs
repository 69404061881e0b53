//! Integration tests for rulegate.

mod hook;
mod scenarios;
