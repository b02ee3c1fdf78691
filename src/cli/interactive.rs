//! Interactive text menu driving grant-access and collection.
//!
//! Failures of individual operations are reported and the menu is shown
//! again; only I/O errors end the session early. End of input behaves like
//! choosing exit.

use std::io::{self, BufRead, Write};

use gitlab_warden::WardenConfig;
use gitlab_warden::gitlab::{
    CollectorSettings, GitLabGateway, MembershipReconciler, MembershipRequest,
    PaginatedCollector, RestGateway, Role, WardenError,
};

use super::connect;
use super::output::{io_error, write_collection_report, write_reconcile_report};

const MENU: &str = "\n--- Main Menu ---\n1. Grant Access\n2. Collect issues/merge requests created in a given year\n3. Exit";

/// Menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    GrantAccess,
    CollectItems,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::GrantAccess),
            "2" => Some(Self::CollectItems),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Runs the menu on standard input and output.
///
/// # Errors
///
/// Returns [`WardenError::MissingCredential`] when no token is configured,
/// or [`WardenError::Io`] when the terminal cannot be read or written.
pub async fn run(config: &WardenConfig) -> Result<(), WardenError> {
    let settings = config.collector_settings()?;
    let gateway = connect(config, RestGateway::for_token)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout().lock();
    run_menu(
        &gateway,
        settings,
        &config.entity_kind,
        &mut input,
        &mut stdout,
    )
    .await
}

/// Runs the menu over arbitrary input and output.
///
/// `default_entity_kind` is used when the entity type prompt is left
/// blank. This function is exposed for testing with mock gateways.
pub async fn run_menu<G, R, W>(
    gateway: &G,
    settings: CollectorSettings,
    default_entity_kind: &str,
    input: &mut R,
    output: &mut W,
) -> Result<(), WardenError>
where
    G: GitLabGateway,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(output, "{MENU}").map_err(|e| io_error(&e))?;
        let Some(answer) = prompt(input, output, "Enter your choice (1-3): ")? else {
            return Ok(());
        };

        match Choice::parse(&answer) {
            Some(Choice::GrantAccess) => {
                let Some(request) = read_membership_request(input, output, default_entity_kind)?
                else {
                    return Ok(());
                };
                let report = MembershipReconciler::new(gateway).reconcile(&request).await;
                write_reconcile_report(output, &report)?;
            }
            Some(Choice::CollectItems) => {
                let Some(item_kind) = prompt(input, output, "Enter mr or issues: ")? else {
                    return Ok(());
                };
                let Some(year) = read_year(input, output)? else {
                    return Ok(());
                };
                let report = PaginatedCollector::with_settings(gateway, settings)
                    .collect(&item_kind, year)
                    .await;
                write_collection_report(output, &report)?;
            }
            Some(Choice::Exit) => {
                return writeln!(output, "Exiting program.").map_err(|e| io_error(&e));
            }
            None => {
                writeln!(
                    output,
                    "Invalid choice. Please enter a number between 1 and 3."
                )
                .map_err(|e| io_error(&e))?;
            }
        }
    }
}

fn read_membership_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_entity_kind: &str,
) -> Result<Option<MembershipRequest>, WardenError> {
    let Some(username) = prompt(input, output, "Enter username: ")? else {
        return Ok(None);
    };
    let Some(entity) = prompt(input, output, "Enter project or group name: ")? else {
        return Ok(None);
    };
    let kind_label = format!("Enter entity type (project/group) [{default_entity_kind}]: ");
    let Some(entity_kind) = prompt(input, output, &kind_label)? else {
        return Ok(None);
    };
    let roles: Vec<&str> = Role::ALL.iter().map(|role| role.name()).collect();
    let role_label = format!("Enter role ({}): ", roles.join(", "));
    let Some(role) = prompt(input, output, &role_label)? else {
        return Ok(None);
    };

    let chosen_kind = if entity_kind.is_empty() {
        default_entity_kind
    } else {
        entity_kind.as_str()
    };
    Ok(Some(MembershipRequest::new(
        &username,
        &entity,
        chosen_kind,
        &role,
    )))
}

/// Asks for a year until four ASCII digits are entered.
fn read_year<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<i32>, WardenError> {
    loop {
        let Some(answer) = prompt(input, output, "Enter a 4-digit year number: ")? else {
            return Ok(None);
        };
        if let Some(year) = parse_year(&answer) {
            return Ok(Some(year));
        }
        writeln!(
            output,
            "Invalid input. Please enter a valid year / 4-digit number."
        )
        .map_err(|e| io_error(&e))?;
    }
}

fn parse_year(answer: &str) -> Option<i32> {
    if answer.len() == 4 && answer.bytes().all(|byte| byte.is_ascii_digit()) {
        answer.parse().ok()
    } else {
        None
    }
}

/// Writes `label`, then reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>, WardenError> {
    write!(output, "{label}").map_err(|e| io_error(&e))?;
    output.flush().map_err(|e| io_error(&e))?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(|e| io_error(&e))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}
