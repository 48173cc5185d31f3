use crate::core::ConfigProvider;
use crate::domain::model::SUPPORTED_DEGREES;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pbm-rotate")]
#[command(about = "Rotate a plain (P1) Portable Bit Map by a multiple of 90 degrees")]
pub struct CliConfig {
    /// Path of the .pbm file to read
    #[arg(long)]
    pub path: String,

    /// Path of the .pbm file to write
    #[arg(long)]
    pub export_path: String,

    /// Positive values rotate clockwise, negative values counterclockwise
    #[arg(long, allow_negative_numbers = true, value_parser = parse_degree)]
    pub degree: i32,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each phase")]
    pub monitor: bool,

    #[arg(long, help = "Print a JSON report on success")]
    pub json: bool,
}

pub fn parse_degree(value: &str) -> std::result::Result<i32, String> {
    let degree: i32 = value
        .trim()
        .parse()
        .map_err(|e| format!("'{}' is not an integer: {}", value, e))?;

    if SUPPORTED_DEGREES.contains(&degree) {
        Ok(degree)
    } else {
        Err(format!(
            "{} is not one of {}",
            degree,
            SUPPORTED_DEGREES.map(|d| d.to_string()).join(", ")
        ))
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.path
    }

    fn export_path(&self) -> &str {
        &self.export_path
    }

    fn degrees(&self) -> i32 {
        self.degree
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_job("path", "export_path", "degree", self)
    }
}
