//! Interactive `setenvvars` command.
//!
//! Walks the installer through the LaSalle-specific `.env` settings of a
//! basic front-end app. Answers are written as typed; nothing is validated.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;

use super::SetupError;
use super::env_file::{
    ADMIN_API_URL_PLACEHOLDER, APP_DOMAIN_NAME_PLACEHOLDER, APP_NAME_PLACEHOLDER,
    APP_URL_PLACEHOLDER, EnvFile, JWT_AUD_CLAIM_PLACEHOLDER, JWT_KEY_PLACEHOLDER, domain_from_url,
};
use crate::app::BASIC_FRONTEND_APP;
use crate::auth::sources::random_alphanumeric;

/// Length of the generated `LASALLE_JWT_KEY`.
pub const JWT_KEY_LENGTH: usize = 64;

const RULE: &str = "================================================================================";
const THIN_RULE: &str = "-----------------------------------------------------------------------";
const STARS: &str = "************************************************************************************************";

/// How a run of the command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The installed app is not the basic front-end; nothing was touched.
    WrongApp,
    /// The installer did not confirm; nothing was touched.
    Aborted,
    /// Every setting was written.
    Completed(Summary),
}

/// Values written during a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub app_name: String,
    pub app_url: String,
    pub app_domain_name: String,
    pub jwt_key: String,
    pub jwt_aud_claim: String,
    pub admin_api_url: String,
    /// Whether `.env` was created from `.env.example`.
    pub env_file_created: bool,
    /// Whether a fresh `APP_KEY` was generated.
    pub app_key_generated: bool,
}

/// The `setenvvars` command, generic over its terminal.
pub struct SetEnvVars<R, W> {
    input: R,
    output: W,
    env_path: PathBuf,
    example_path: PathBuf,
    app_name: Option<String>,
    environment: String,
}

impl<R: BufRead, W: Write> SetEnvVars<R, W> {
    /// `app_name` is the currently configured `LASALLE_APP_NAME`;
    /// `environment` is only echoed in the intro.
    pub fn new(
        input: R,
        output: W,
        env_path: impl Into<PathBuf>,
        example_path: impl Into<PathBuf>,
        app_name: Option<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            input,
            output,
            env_path: env_path.into(),
            example_path: example_path.into(),
            app_name,
            environment: environment.into(),
        }
    }

    /// Run the command to completion.
    ///
    /// # Errors
    /// Returns `SetupError::Io` on file or terminal failures and
    /// `SetupError::UnexpectedEof` if input ends mid-way. Settings written
    /// before the failure stay written.
    pub fn run(&mut self) -> Result<Outcome, SetupError> {
        if self.app_name.as_deref() != Some(BASIC_FRONTEND_APP) {
            self.wrong_app_notice()?;
            return Ok(Outcome::WrongApp);
        }

        self.intro()?;

        self.blank()?;
        self.alert("Are you sure that you want to run this command?")?;
        let confirmation = self.ask("(type the full word \"yes\" to continue)")?;
        if confirmation != "yes" {
            self.line("You did *not* type \"yes\", so aborting this command. Bye!")?;
            self.outro()?;
            return Ok(Outcome::Aborted);
        }
        self.line("ok... you said that you want to continue running this command. Let us continue then...")?;

        let env_file_created = self.ensure_env_file()?;
        let mut env = EnvFile::load(&self.env_path)?;

        let app_key_generated = self.ensure_app_key(&mut env)?;

        self.section("APP_NAME")?;
        self.line("What is your application's name (APP_NAME)?")?;
        self.line("An example is: LaSalle Software Front-end Blog App")?;
        let app_name = self.ask_carefully()?;
        self.line(&format!("You typed \"{app_name}\"."))?;
        self.write_setting(&mut env, "APP_NAME", APP_NAME_PLACEHOLDER, &app_name, true)?;

        self.section("APP_URL")?;
        self.line("What is your application's full URL (APP_URL)?")?;
        self.line("  * MUST start with \"http://\" or \"https://\"")?;
        self.line("  * NO trailing slash!")?;
        self.line("  * example: https://lasallesoftware.ca")?;
        self.line("  * example: https://lasallesoftware.ca:8888")?;
        let app_url = self.ask_carefully()?;
        self.write_setting(&mut env, "APP_URL", APP_URL_PLACEHOLDER, &app_url, false)?;

        self.section("LASALLE_APP_DOMAIN_NAME")?;
        self.line("This is done automatically based on your APP_URL.")?;
        let app_domain_name = domain_from_url(&app_url).to_string();
        self.write_setting(
            &mut env,
            "LASALLE_APP_DOMAIN_NAME",
            APP_DOMAIN_NAME_PLACEHOLDER,
            &app_domain_name,
            false,
        )?;

        self.section("LASALLE_JWT_KEY")?;
        let jwt_key = random_alphanumeric(JWT_KEY_LENGTH);
        self.write_setting(&mut env, "LASALLE_JWT_KEY", JWT_KEY_PLACEHOLDER, &jwt_key, false)?;

        self.section("LASALLE_JWT_AUD_CLAIM")?;
        self.line("This front-end app needs to know what administrative back-end app it belongs to.")?;
        self.line("So, you need to specify the name of the relevant admin app.")?;
        self.line("The name of your admin app is the value of the \"LASALLE_APP_DOMAIN_NAME\" in its .env file.")?;
        self.line("Alternatively, this is the title field of the installed_domains db table.")?;
        let jwt_aud_claim = self.ask("What is the name of your admin app?")?;
        self.write_setting(
            &mut env,
            "LASALLE_JWT_AUD_CLAIM",
            JWT_AUD_CLAIM_PLACEHOLDER,
            &jwt_aud_claim,
            false,
        )?;

        self.section("LASALLE_ADMIN_API_URL")?;
        self.line("This front-end app needs to know the url of the administrative back-end app it belongs to.")?;
        self.line("The url of your admin app is the value of the \"APP_URL\" in its .env file.")?;
        let admin_api_url = self.ask("What is the URL of your admin app?")?;
        self.write_setting(
            &mut env,
            "LASALLE_ADMIN_API_URL",
            ADMIN_API_URL_PLACEHOLDER,
            &admin_api_url,
            false,
        )?;

        self.admin_instructions(&app_domain_name, &jwt_key)?;
        self.outro()?;

        Ok(Outcome::Completed(Summary {
            app_name,
            app_url,
            app_domain_name,
            jwt_key,
            jwt_aud_claim,
            admin_api_url,
            env_file_created,
            app_key_generated,
        }))
    }

    /// Copy `.env.example` to `.env` when `.env` does not exist yet.
    fn ensure_env_file(&mut self) -> Result<bool, SetupError> {
        if self.env_path.exists() {
            return Ok(false);
        }

        self.section(".ENV file creation")?;
        self.line("Your environment file does not exist, so let's create it...")?;
        std::fs::copy(&self.example_path, &self.env_path)?;
        tracing::info!(
            "created {} from {}",
            self.env_path.display(),
            self.example_path.display()
        );
        self.line("Your .env file now exists!")?;
        Ok(true)
    }

    /// Generate `APP_KEY` when it is empty or absent.
    fn ensure_app_key(&mut self, env: &mut EnvFile) -> Result<bool, SetupError> {
        if env.get("APP_KEY").is_some_and(|key| !key.is_empty()) {
            return Ok(false);
        }

        self.section("APP_KEY")?;
        self.line("Your APP_KEY environment variable has not been set.")?;
        self.line("Setting your APP_KEY...")?;
        env.set_var("APP_KEY", &generate_app_key());
        env.save(&self.env_path)?;
        self.line("Your env's APP_KEY is now set!")?;
        Ok(true)
    }

    fn write_setting(
        &mut self,
        env: &mut EnvFile,
        name: &str,
        placeholder: &str,
        value: &str,
        quoted: bool,
    ) -> Result<(), SetupError> {
        self.line(&format!(
            "Attempting to set {name} in your .env to \"{value}\"..."
        ))?;
        if env.replace_placeholder(placeholder, value, quoted) == 0 {
            self.line(&format!(
                "{placeholder} was not found in your .env, so {name} was left unchanged."
            ))?;
            return Ok(());
        }
        env.save(&self.env_path)?;
        self.line(&format!(
            "Attempt to modify your env's {name} to {value} is successful!"
        ))
    }

    fn ask(&mut self, question: &str) -> Result<String, SetupError> {
        write!(self.output, "{question}\n > ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(SetupError::UnexpectedEof);
        }
        Ok(answer.trim().to_string())
    }

    fn ask_carefully(&mut self) -> Result<String, SetupError> {
        self.ask("(I do *not* check for syntax or for anything, so please type c-a-r-e-f-u-l-l-y!)")
    }

    fn line(&mut self, text: &str) -> Result<(), SetupError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn blank(&mut self) -> Result<(), SetupError> {
        writeln!(self.output, "\n")?;
        Ok(())
    }

    fn alert(&mut self, text: &str) -> Result<(), SetupError> {
        let stars = "*".repeat(text.len() + 12);
        self.line(&stars)?;
        self.line(&format!("*     {text}     *"))?;
        self.line(&stars)
    }

    fn section(&mut self, title: &str) -> Result<(), SetupError> {
        self.blank()?;
        self.line(THIN_RULE)?;
        self.line(&format!("  {title}:"))?;
        self.line(THIN_RULE)
    }

    fn wrong_app_notice(&mut self) -> Result<(), SetupError> {
        let installed = self.app_name.as_deref().unwrap_or("").to_uppercase();
        self.blank()?;
        self.line("This command is specifically for my LaSalle Software's front-end application.")?;
        self.line(&format!(
            "You are installing my {installed} LaSalle Software application."
        ))?;
        self.line("So I am exiting you out of this command.")?;
        self.line("You are now exited from setenvvars.")?;
        self.blank()
    }

    fn intro(&mut self) -> Result<(), SetupError> {
        let environment = self.environment.clone();
        self.blank()?;
        self.line(RULE)?;
        self.line("                       Welcome to my LaSalle Software's")?;
        self.line("               Front-end App's Environment Variable set-up Command!")?;
        self.line(RULE)?;
        self.line("  This command sets LaSalle Software specific environment variables")?;
        self.line("  in your .env file.")?;
        self.line(RULE)?;
        if self.env_path.exists() {
            self.line(&format!(
                "  This is LaSalle Software's {} application.",
                BASIC_FRONTEND_APP.to_uppercase()
            ))?;
            self.line(THIN_RULE)?;
            self.line(&format!("  This is your {environment} environment."))?;
            self.line(THIN_RULE)?;
        }
        self.line("  This command assumes that the LaSalle Software specific environment")?;
        self.line("  variables exist in your .env with their original \"dummy\" values.")?;
        self.line(RULE)?;
        self.line("  Read https://lasallesoftware.ca/docs/v2/gettingstarted_installation_frontendapp")?;
        self.line("   *BEFORE* running this command.")?;
        self.line(RULE)
    }

    fn admin_instructions(
        &mut self,
        app_domain_name: &str,
        jwt_key: &str,
    ) -> Result<(), SetupError> {
        self.blank()?;
        self.line(STARS)?;
        self.line(" You now have to log into your admin app and enter info about your new front-end app.")?;
        self.line(STARS)?;
        self.line(" Please log into your admin app, with your owner credentials.")?;
        self.line("")?;
        self.line(" Click \"Installed Domains\" in the left vertical menu.")?;
        self.line("   * Click the blue \"Create Installed Domain\" button.")?;
        self.line(&format!("   * In the \"Title\", enter exactly \"{app_domain_name}\""))?;
        self.line("   * Enter a \"Description\"")?;
        self.line("   * Check the \"Enabled\" box (if not already checked)")?;
        self.line("   * Click the blue \"Create Installed Domain\" button")?;
        self.line("")?;
        self.line(" Click \"JWT Keys\" in the left vertical menu, at the top.")?;
        self.line("   * Click the blue \"Create JWT Key\" button.")?;
        self.line("   * Click the down arrow in the \"Installed Domain\" drop-down")?;
        self.line(&format!("   * Highlight \"{app_domain_name}\", and then click it"))?;
        self.line(&format!("   * In the \"Key\" box, enter exactly \"{jwt_key}\""))?;
        self.line("   * Check the \"Enabled\" box (if not already checked)")?;
        self.line("   * Click the blue \"Create JWT KEY\" button")?;
        self.line("")?;
        self.line("  Done! You may log out of your admin app.")?;
        self.line(STARS)
    }

    fn outro(&mut self) -> Result<(), SetupError> {
        self.blank()?;
        self.line("=====================================================================")?;
        self.line("                 ** setenvvars has finished **")?;
        self.line("=====================================================================")?;
        self.blank()
    }
}

/// A new application key in the `base64:` form the framework expects.
fn generate_app_key() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    format!("base64:{}", STANDARD.encode(bytes))
}

/// Resolve the `.env` and `.env.example` paths inside `dir`.
#[must_use]
pub fn default_paths(dir: &Path) -> (PathBuf, PathBuf) {
    (
        dir.join(super::env_file::ENV_FILE_NAME),
        dir.join(super::env_file::ENV_EXAMPLE_FILE_NAME),
    )
}
