//! Instance selection
//!
//! Resolution order:
//! 1. `--instance NAME`: the instance with that name, or an error
//! 2. Single running instance: use it
//! 3. Several instances: interactive selection (or an error in batch mode)
//! 4. No instances: error

use dialoguer::{theme::ColorfulTheme, Select};
use log::debug;
use std::io::IsTerminal;

use crate::config::{defaults::PROGRAM_NAME, registry as registry_config};
use crate::error::{PassengerError, Result};
use crate::output::{format_instances_table, instance_label};

use super::models::Instance;
use super::registry::InstanceRegistry;

/// Select the instance to operate on
///
/// # Arguments
/// * `registry` - Registry to scan
/// * `name` - Instance name from `--instance`
/// * `command` - Subcommand name, used in the hint for ambiguous selections
/// * `batch_mode` - If true, never prompt
pub fn select_instance(
    registry: &InstanceRegistry,
    name: Option<&str>,
    command: &str,
    batch_mode: bool,
) -> Result<Instance> {
    if let Some(name) = name {
        debug!("Selecting instance by name: {}", name);
        return registry
            .find_by_name(name)?
            .ok_or_else(|| PassengerError::InstanceNotFound(name.to_string()));
    }

    let mut instances = registry.list()?;
    match instances.len() {
        0 => Err(PassengerError::NoInstanceRunning(no_instance_message(
            registry,
        ))),
        1 => {
            let instance = instances.remove(0);
            debug!(
                "Using single running instance '{}' at {}",
                instance.name(),
                instance.dir().display()
            );
            Ok(instance)
        }
        _ => {
            let interactive =
                !batch_mode && std::io::stdin().is_terminal() && std::io::stderr().is_terminal();
            if interactive {
                interactive_instance_selection(instances)
            } else {
                Err(PassengerError::MultipleInstances(
                    multiple_instances_message(&instances, command),
                ))
            }
        }
    }
}

/// Prompt user to select an instance interactively
fn interactive_instance_selection(mut instances: Vec<Instance>) -> Result<Instance> {
    eprintln!(
        "\nMultiple {} instances are running on this machine:",
        PROGRAM_NAME
    );

    let labels: Vec<String> = instances.iter().map(instance_label).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select an instance")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| {
            PassengerError::MultipleInstances(format!("Failed to select instance: {}", e))
        })?;

    let instance = instances.swap_remove(selection);
    debug!("User selected instance: {}", instance.name());
    Ok(instance)
}

/// Error message when no instance is running
fn no_instance_message(registry: &InstanceRegistry) -> String {
    let checked: Vec<String> = registry
        .dirs()
        .iter()
        .map(|d| format!("   {}", d.display()))
        .collect();

    format!(
        "*** ERROR: {program} doesn't seem to be running. If you are sure that it is\n\
         running, it may use a custom instance registry directory. In that case, set\n\
         the environment variable {env} to that directory and run this command again.\n\
         \n\
         Checked:\n{checked}",
        program = PROGRAM_NAME,
        env = registry_config::DIR_ENV_VAR,
        checked = checked.join("\n")
    )
}

/// Error message when several instances are running and none was chosen
fn multiple_instances_message(instances: &[Instance], command: &str) -> String {
    format!(
        "It appears that multiple {program} instances are running. Please select a\n\
         specific one by running:\n\
         \n\
         \x20 passenger-config {command} --instance <NAME>\n\
         \n\
         The following {program} instances are running:\n\
         \n\
         {table}",
        program = PROGRAM_NAME,
        command = command,
        table = format_instances_table(instances)
    )
}
