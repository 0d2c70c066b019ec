// src/manage.rs

//! Project management commands behind the `manage` binary.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    process::{Command as Process, Stdio},
    str::FromStr,
};

use anyhow::{Context, Result, anyhow, bail};

use crate::config::Config;

const SERVER_BIN: &str = "question-pdf-api";

/// File suffixes removed by `clean`.
const CLEAN_SUFFIXES: [&str; 3] = [".rs.bk", ".profraw", ".orig"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Setup,
    Dev,
    Prod,
    Clean,
    Status,
    Help,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "setup" => Ok(Command::Setup),
            "dev" => Ok(Command::Dev),
            "prod" => Ok(Command::Prod),
            "clean" => Ok(Command::Clean),
            "status" => Ok(Command::Status),
            "help" => Ok(Command::Help),
            _ => Err(s.to_string()),
        }
    }
}

pub struct ProjectManager {
    root: PathBuf,
    config: Config,
}

impl ProjectManager {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn run(&self, command: Command) -> Result<()> {
        tracing::debug!("manage {} in {}", command, self.root.display());
        match command {
            Command::Setup => self.setup(),
            Command::Dev => self.start_dev_server(),
            Command::Prod => self.start_prod_server(),
            Command::Clean => {
                println!("Cleaning temporary files...");
                let cleaned = self.clean()?;
                println!("Cleaned {} items", cleaned);
                Ok(())
            }
            Command::Status => {
                print!("{}", self.status_report());
                Ok(())
            }
            Command::Help => {
                print!("{}", help_text());
                Ok(())
            }
        }
    }

    /// Resolves the data directory against the project root.
    pub fn data_dir(&self) -> PathBuf {
        if self.config.data_dir.is_absolute() {
            self.config.data_dir.clone()
        } else {
            self.root.join(&self.config.data_dir)
        }
    }

    /// Toolchain check, data directory, `.env`, dependency fetch.
    pub fn setup(&self) -> Result<()> {
        print!("{}", header("Quick Setup"));

        let mut ok = true;

        match cargo_version() {
            Ok(version) => println!("Found {}", version),
            Err(e) => {
                println!("Rust toolchain not available: {:#}", e);
                bail!("Setup failed");
            }
        }

        match self.prepare_data_dir() {
            Ok(()) => println!("Data directory ready at {}", self.data_dir().display()),
            Err(e) => {
                println!("Failed to prepare data directory: {:#}", e);
                ok = false;
            }
        }

        match self.ensure_env_file() {
            Ok(true) => println!("Created .env from .env.example"),
            Ok(false) => {}
            Err(e) => {
                println!("Failed to create .env: {:#}", e);
                ok = false;
            }
        }

        println!("Fetching dependencies...");
        match self.cargo(&["fetch"]).status() {
            Ok(status) if status.success() => println!("Dependencies fetched successfully"),
            Ok(status) => {
                println!("Failed to fetch dependencies ({})", status);
                ok = false;
            }
            Err(e) => {
                println!("Failed to run cargo fetch: {}", e);
                ok = false;
            }
        }

        if ok {
            println!("\nQuick setup completed successfully!");
            Ok(())
        } else {
            Err(anyhow!("Setup failed"))
        }
    }

    /// Creates `pdfs/` and an empty `questions.json` under the data directory.
    pub fn prepare_data_dir(&self) -> Result<()> {
        let data_dir = self.data_dir();
        let pdf_dir = data_dir.join("pdfs");
        fs::create_dir_all(&pdf_dir)
            .with_context(|| format!("creating {}", pdf_dir.display()))?;

        let questions = data_dir.join("questions.json");
        if !questions.exists() {
            fs::write(&questions, "[]")
                .with_context(|| format!("writing {}", questions.display()))?;
        }
        Ok(())
    }

    /// Copies `.env.example` to `.env` when the latter is missing. Returns whether a copy happened.
    pub fn ensure_env_file(&self) -> Result<bool> {
        let env_file = self.root.join(".env");
        let example = self.root.join(".env.example");
        if env_file.exists() || !example.exists() {
            return Ok(false);
        }
        fs::copy(&example, &env_file).context("copying .env.example")?;
        Ok(true)
    }

    pub fn start_dev_server(&self) -> Result<()> {
        println!("Starting development server...");
        self.print_urls();

        let mut cmd = if has_cargo_watch() {
            let run = format!("run --bin {}", SERVER_BIN);
            self.cargo(&["watch", "-x", &run])
        } else {
            println!("cargo-watch not installed, running without auto-reload");
            println!("(install it with `cargo install cargo-watch`)");
            self.cargo(&["run", "--bin", SERVER_BIN])
        };
        let status = cmd.status().context("starting development server")?;

        println!("\nServer stopped");
        if !status.success() {
            tracing::debug!("development server exited with {}", status);
        }
        Ok(())
    }

    pub fn start_prod_server(&self) -> Result<()> {
        println!("Starting production server...");
        self.print_urls();

        self.cargo(&["run", "--release", "--bin", SERVER_BIN])
            .status()
            .context("starting production server")?;

        println!("\nServer stopped");
        Ok(())
    }

    /// Removes build output and editor leftovers. Returns how many entries were removed.
    pub fn clean(&self) -> Result<usize> {
        let mut cleaned = 0;

        let target = self.root.join("target");
        if target.is_dir() {
            fs::remove_dir_all(&target).context("removing target/")?;
            cleaned += 1;
        }

        cleaned += clean_dir(&self.root)?;
        Ok(cleaned)
    }

    pub fn status_report(&self) -> String {
        let mut out = header("Project Status");

        let check = |found: bool, yes: &str, no: &str| {
            if found {
                format!("✓ {}", yes)
            } else {
                format!("✗ {}", no)
            }
        };

        out.push_str(&format!(
            "Environment file: {}\n",
            check(self.root.join(".env").exists(), "Found", "Not found")
        ));
        out.push_str(&format!(
            "Dependencies locked: {}\n",
            check(self.root.join("Cargo.lock").exists(), "Yes", "No (run setup)")
        ));
        out.push_str(&format!(
            "App structure: {}\n",
            check(self.root.join("src").is_dir(), "Found", "Not found")
        ));
        out.push_str(&format!(
            "Data directory: {}\n",
            check(self.data_dir().is_dir(), "Exists", "Not found")
        ));

        let external = self
            .config
            .external_service_url
            .as_ref()
            .map(|url| url.to_string())
            .unwrap_or_else(|| "not set (simulated answers)".to_string());

        out.push_str("\nConfiguration:\n");
        out.push_str(&format!("  - API Host: {}\n", self.config.api_host));
        out.push_str(&format!("  - API Port: {}\n", self.config.api_port));
        out.push_str(&format!("  - Data Directory: {}\n", self.data_dir().display()));
        out.push_str(&format!("  - External Service URL: {}\n", external));
        out.push_str(&format!(
            "  - External Service Timeout: {}s\n",
            self.config.external_service_timeout.as_secs_f64()
        ));
        out
    }

    fn print_urls(&self) {
        let base = format!("http://{}:{}", self.config.api_host, self.config.api_port);
        println!("Server will be available at {}", base);
        println!("API docs available at {}/docs", base);
    }

    fn cargo(&self, args: &[&str]) -> Process {
        tracing::debug!("running cargo {}", args.join(" "));
        let mut cmd = Process::new("cargo");
        cmd.args(args).current_dir(&self.root);
        cmd
    }
}

pub fn help_text() -> String {
    let mut out = header("Question & PDF Management API");
    out.push_str("Setup Commands:\n");
    out.push_str("  setup           Quick setup (check toolchain, data dir, .env, fetch deps)\n");
    out.push_str("\nDevelopment Commands:\n");
    out.push_str("  dev             Start development server with auto-reload\n");
    out.push_str("  prod            Start production server\n");
    out.push_str("\nTesting & Quality:\n");
    out.push_str("  clean           Clean build output and temporary files\n");
    out.push_str("\nUtilities:\n");
    out.push_str("  status          Show project status\n");
    out.push_str("  help            Show this help message\n");
    out
}

fn header(title: &str) -> String {
    let rule = "=".repeat(50);
    format!("\n{}\n{:^50}\n{}\n\n", rule, title, rule)
}

fn cargo_version() -> Result<String> {
    let output = Process::new("cargo")
        .arg("--version")
        .output()
        .context("running cargo --version")?;
    if !output.status.success() {
        bail!("cargo --version exited with {}", output.status);
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn has_cargo_watch() -> bool {
    Process::new("cargo")
        .args(["watch", "--version"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn clean_dir(dir: &Path) -> Result<usize> {
    let mut cleaned = 0;
    let entries = fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if entry.file_name() == ".git" {
                continue;
            }
            cleaned += clean_dir(&path)?;
        } else if file_type.is_file() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if CLEAN_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
                fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
                cleaned += 1;
            }
        }
    }

    Ok(cleaned)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Setup => "setup",
            Command::Dev => "dev",
            Command::Prod => "prod",
            Command::Clean => "clean",
            Command::Status => "status",
            Command::Help => "help",
        };
        f.write_str(name)
    }
}
