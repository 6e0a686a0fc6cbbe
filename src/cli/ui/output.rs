use console::style;

use crate::cli::GenerateReport;

pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn section(&self, message: &str) {
        if !self.quiet {
            println!("\n{}", style(message).bold());
            println!("{}", "─".repeat(40));
        }
    }

    /// Final summary of a generate run
    pub fn report(&self, report: &GenerateReport) {
        self.section("Dependency docs");
        self.info(&format!("Project: {}", report.project_dir.display()));
        self.info(&format!(
            "Objects: {} ({} dependencies)",
            report.objects, report.edges
        ));
        self.info(&format!(
            "Models:  {} written, {} without dependencies or tags",
            report.files.len(),
            report.empty_files
        ));
        if report.docs_invoked {
            self.success("Documentation tool finished");
        } else {
            self.success("Project written (documentation tool skipped)");
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false)
    }
}
