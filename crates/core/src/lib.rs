//! Domain model of the submission grader.

pub mod domain;
