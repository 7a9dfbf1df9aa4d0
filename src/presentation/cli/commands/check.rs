use crate::application::use_cases::check_connection::CheckConnectionUseCase;
use crate::domain::entities::credentials::Credentials;
use crate::infrastructure::api::ApiClient;
use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

/// Verify credentials and connectivity against the provider API
pub struct CheckCommand {
    /// Print extra detail
    pub verbose: bool,
}

impl CheckCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Execute the check command
    pub async fn execute(&self, api: Arc<ApiClient>, credentials: &Credentials) -> Result<()> {
        let use_case = CheckConnectionUseCase::new(api);
        let report = use_case.execute(credentials).await?;

        println!(
            "{} Authenticated as {} ({})",
            "✓".green().bold(),
            report.username.bold(),
            report.api_base
        );
        println!("  Consoles on account: {}", report.console_count);

        if let Some(found) = report.persistent_console_found {
            if found {
                println!("  Persistent console: {}", "available".green());
            } else {
                println!("  Persistent console: {}", "not found".red());
                return Err(anyhow::anyhow!(
                    "the configured persistent console does not exist"
                ));
            }
        }

        match &report.cpu {
            Some(cpu) => {
                if let (Some(used), Some(limit)) = (
                    cpu.daily_cpu_total_usage_seconds,
                    cpu.daily_cpu_limit_seconds,
                ) {
                    println!("  CPU quota: {:.0}s used of {:.0}s", used, limit);
                }
                if self.verbose {
                    if let Some(reset) = &cpu.next_reset_time {
                        println!("  Quota resets at: {}", reset);
                    }
                }
            }
            None => println!("  CPU quota: {}", "unavailable".yellow()),
        }

        Ok(())
    }
}
