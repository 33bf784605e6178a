/*!
# Menu Driver

Explicit state machine behind the operator console. Each state handler
returns the next state as data, so repeated trips back to the top menu
never grow the stack.

```text
TopMenu -> RegionSelect -> ProfileSelect -> View -> Quit
   ^            |               |        \-> Edit -> TopMenu | Quit
   +------------+---------------+
```
*/

use std::io::Write;

use tracing::{debug, info, instrument, warn};

use groundctl_config::RegionChoice;
use groundctl_core::model::MissionProfileSummary;
use groundctl_core::{ClientError, ClientFactory, GroundStation};

use crate::edit::EditFlow;
use crate::prompt::Prompter;
use crate::view;
use crate::EngineError;

const NO_ACCESS: &str =
    "Your AWS account doesn't have access to this region. Exiting to main menu.";
const EXIT_ROW: &str = "Exit";

/// What the operator asked to do with a mission profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    View,
    Update,
}

impl Task {
    fn verb(self) -> &'static str {
        match self {
            Task::View => "view",
            Task::Update => "update",
        }
    }
}

/// Where a finished flow sends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Next {
    TopMenu,
    Quit,
}

enum State {
    TopMenu,
    RegionSelect(Task),
    ProfileSelect {
        task: Task,
        region: RegionChoice,
        client: Box<dyn GroundStation>,
    },
    View {
        client: Box<dyn GroundStation>,
        profile: MissionProfileSummary,
    },
    Edit {
        client: Box<dyn GroundStation>,
        profile: MissionProfileSummary,
    },
    Quit,
}

impl From<Next> for State {
    fn from(next: Next) -> Self {
        match next {
            Next::TopMenu => State::TopMenu,
            Next::Quit => State::Quit,
        }
    }
}

/// Selector row for one profile: name padded to 30 columns, then the id.
pub fn profile_row(summary: &MissionProfileSummary) -> String {
    format!("{:<30}  --  {}", summary.name, summary.id)
}

/// Interactive session over a client factory, a prompt source and an
/// output sink.
pub struct Console<F, P, W> {
    factory: F,
    prompter: P,
    out: W,
    regions: Vec<RegionChoice>,
}

impl<F, P, W> Console<F, P, W>
where
    F: ClientFactory,
    P: Prompter,
    W: Write,
{
    pub fn new(factory: F, prompter: P, out: W, regions: Vec<RegionChoice>) -> Self {
        Self {
            factory,
            prompter,
            out,
            regions,
        }
    }

    /// Hand back the prompter and output sink.
    pub fn into_parts(self) -> (P, W) {
        (self.prompter, self.out)
    }

    /// Run until the operator quits or a flow ends the session.
    #[instrument(level = "info", name = "console", skip(self))]
    pub async fn run(&mut self) -> Result<(), EngineError> {
        let mut state = State::TopMenu;
        loop {
            state = match state {
                State::TopMenu => self.top_menu()?,
                State::RegionSelect(task) => self.select_region(task).await?,
                State::ProfileSelect {
                    task,
                    region,
                    client,
                } => self.select_profile(task, &region, client).await?,
                State::View { client, profile } => {
                    view::show(client.as_ref(), &profile, &mut self.out).await?.into()
                }
                State::Edit { client, profile } => {
                    EditFlow::new(client.as_ref(), &profile.id, &mut self.prompter, &mut self.out)
                        .run()
                        .await?
                        .into()
                }
                State::Quit => {
                    info!("session ended");
                    self.out.flush()?;
                    return Ok(());
                }
            };
        }
    }

    fn top_menu(&mut self) -> Result<State, EngineError> {
        let items = [
            "View mission profile".to_string(),
            "Update mission profile".to_string(),
            "Quit".to_string(),
        ];
        let state = match self.prompter.select("What would you like to do?", &items)? {
            0 => State::RegionSelect(Task::View),
            1 => State::RegionSelect(Task::Update),
            _ => State::Quit,
        };
        Ok(state)
    }

    async fn select_region(&mut self, task: Task) -> Result<State, EngineError> {
        let items: Vec<String> = self.regions.iter().map(ToString::to_string).collect();
        let index = self
            .prompter
            .select("Which region would you like to use?", &items)?;
        let region = self.regions[index].clone();
        debug!(region = %region.code, ?task, "region selected");

        match self.factory.connect(&region.code).await {
            Ok(client) => Ok(State::ProfileSelect {
                task,
                region,
                client,
            }),
            Err(e) => self.no_access(&region, e),
        }
    }

    async fn select_profile(
        &mut self,
        task: Task,
        region: &RegionChoice,
        client: Box<dyn GroundStation>,
    ) -> Result<State, EngineError> {
        let profiles = match client.list_mission_profiles().await {
            Ok(profiles) => profiles,
            Err(e) => return self.no_access(region, e),
        };

        if profiles.is_empty() {
            writeln!(
                self.out,
                "No mission profiles in {region}. Exiting to main menu."
            )?;
            return Ok(State::TopMenu);
        }

        let mut rows: Vec<String> = profiles.iter().map(profile_row).collect();
        rows.push(EXIT_ROW.to_string());

        let prompt = format!("Which mission profile would you like to {}?", task.verb());
        let index = self.prompter.select(&prompt, &rows)?;
        let Some(profile) = profiles.into_iter().nth(index) else {
            writeln!(self.out, "No mission profile selected. Exiting to main menu.")?;
            return Ok(State::TopMenu);
        };

        debug!(id = %profile.id, ?task, "mission profile selected");
        Ok(match task {
            Task::View => State::View { client, profile },
            Task::Update => State::Edit { client, profile },
        })
    }

    fn no_access(&mut self, region: &RegionChoice, err: ClientError) -> Result<State, EngineError> {
        warn!(region = %region.code, error = %err, "region unavailable");
        writeln!(self.out, "{NO_ACCESS}")?;
        writeln!(self.out, "{err}")?;
        Ok(State::TopMenu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_pad_names_to_thirty_columns() {
        let row = profile_row(&MissionProfileSummary {
            id: "0a1b".into(),
            name: "aqua".into(),
        });
        assert_eq!(row, format!("aqua{}  --  0a1b", " ".repeat(26)));
    }

    #[test]
    fn long_names_are_not_truncated() {
        let name = "x".repeat(40);
        let row = profile_row(&MissionProfileSummary {
            id: "id".into(),
            name: name.clone(),
        });
        assert_eq!(row, format!("{name}  --  id"));
    }
}
