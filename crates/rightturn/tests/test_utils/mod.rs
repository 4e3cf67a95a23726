//! Shared fixtures: small dill components used across the test suites

#![allow(dead_code)]

use dill::{component, interface};

/// Service producing a greeting
pub trait Greeter: Send + Sync {
    fn greeting(&self) -> String;
}

/// Service producing a number
pub trait Counter: Send + Sync {
    fn count(&self) -> i32;
}

#[component]
#[interface(dyn Greeter)]
pub struct EnglishGreeter;

impl Greeter for EnglishGreeter {
    fn greeting(&self) -> String {
        "hello".to_string()
    }
}

#[component]
#[interface(dyn Counter)]
pub struct FortyTwo;

impl Counter for FortyTwo {
    fn count(&self) -> i32 {
        42
    }
}

/// Plain value registered as a singleton
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub name: String,
}

impl Settings {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}
