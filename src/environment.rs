use std::fmt::{Display, Formatter};

use clap::ValueEnum;

/// API environment to connect to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Default production environment.
    #[default]
    Production,
    /// European data residency.
    Eu,
    /// Australian data residency.
    Au,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://platform.reducto.ai",
            Environment::Eu => "https://eu.platform.reducto.ai",
            Environment::Au => "https://au.platform.reducto.ai",
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Eu => write!(f, "eu"),
            Environment::Au => write!(f, "au"),
        }
    }
}
