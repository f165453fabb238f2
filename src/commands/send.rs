//! `hearth send` - encode time tokens and push, fetch or save a schedule
//!
//! Tokens are order independent. `file:`, `host:`, `get:` and `post:`
//! prefixes are matched without regard to case; anything else is a time
//! token.

use std::path::PathBuf;
use std::time::Duration;

use hearth::client::{ClientConfig, RequestMethod, ScheduleClient};
use hearth::error::{Error, Result};
use hearth::schedule::{parse_time_token, TimeOfDay, WeeklySchedule};

/// What one `send` invocation should do
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SendPlan {
    /// Where to write the encoded schedule
    pub file: Option<PathBuf>,

    /// Base URL of the remote host
    pub host: Option<String>,

    /// Method and action path for the host; the last one given wins
    pub action: Option<(RequestMethod, String)>,

    /// Parsed time tokens, in the order given
    pub times: Vec<TimeOfDay>,
}

fn strip_prefix_ci<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    let head = token.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &token[prefix.len()..])
}

impl SendPlan {
    /// Classify command line tokens.
    ///
    /// A bad time token fails the whole plan; its error names the token's
    /// 0-based position.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut plan = Self::default();

        for (index, token) in tokens.iter().enumerate() {
            let token = token.as_ref();
            if let Some(file) = strip_prefix_ci(token, "file:") {
                plan.file = Some(PathBuf::from(file));
            } else if let Some(host) = strip_prefix_ci(token, "host:") {
                plan.host = Some(host.to_string());
            } else if let Some(action) = strip_prefix_ci(token, "get:") {
                plan.action = Some((RequestMethod::Get, action.to_string()));
            } else if let Some(action) = strip_prefix_ci(token, "post:") {
                plan.action = Some((RequestMethod::Post, action.to_string()));
            } else {
                plan.times.push(parse_time_token(token, index)?);
            }
        }

        Ok(plan)
    }

    fn schedule(&self) -> Result<WeeklySchedule> {
        Ok(WeeklySchedule::from_times(&self.times)?)
    }
}

/// Run the plan built from `tokens`
pub async fn send(tokens: Vec<String>, timeout_secs: u64) -> Result<()> {
    tracing::info!(args = ?tokens, "Send command");
    let plan = SendPlan::from_tokens(tokens.as_slice())?;

    if plan.host.is_none() && plan.file.is_none() {
        tracing::warn!("Nothing to do: give host:<url> or file:<path>");
    }

    if let Some(host) = &plan.host {
        println!("HOST : {host}");
        let (method, action) = plan
            .action
            .as_ref()
            .ok_or_else(|| Error::usage("No action for host was given"))?;

        let client = ScheduleClient::new(
            ClientConfig::new(host.as_str()).with_timeout(Duration::from_secs(timeout_secs)),
        )?;

        let body = match method {
            RequestMethod::Get => {
                if !plan.times.is_empty() {
                    println!("{}", plan.schedule()?);
                }
                println!("GET  : {action}");
                client.get(action).await?
            }
            RequestMethod::Post => {
                println!("POST : {action}");
                let schedule = plan.schedule()?;
                client.post_schedule(action, &schedule).await?
            }
        };
        println!("{body}");
    }

    if let Some(file) = &plan.file {
        println!("FILE : {}", file.display());
        println!("ITEMS: {}", plan.times.len());
        let schedule = plan.schedule()?;
        tokio::fs::write(file, schedule.to_wire()).await?;
        tracing::info!(file = %file.display(), values = schedule.len(), "Schedule written");
    }

    Ok(())
}
